use super::common::{env, CaskRepo};
use casket_errors::{AuditError, Error};
use casket_events::{AppEvent, AuditEvent};
use casket_ops::{audit_modified_casks, AuditRequest};
use casket_testkit::{fixtures, RecordingAuditor};
use casket_types::CommitRange;

fn request(range: String, cleanup: bool) -> AuditRequest {
    AuditRequest {
        commit_range: CommitRange::new(range),
        cleanup,
    }
}

#[tokio::test]
async fn relevant_stanza_changes_drive_download_verification() {
    let Some(repo) = CaskRepo::new() else { return };
    repo.write("Casks/foo.rb", &fixtures::checksummed_cask("foo", "1.0"));
    repo.write("Casks/bar.rb", &fixtures::checksummed_cask("bar", "1.0"));
    let base = repo.commit("add casks").unwrap();

    // foo gets a new version and checksum, bar only a comment
    repo.write("Casks/foo.rb", &fixtures::checksummed_cask("foo", "2.0").replace(&"3".repeat(64), &"4".repeat(64)));
    repo.write("Casks/bar.rb", &format!("# maintained upstream\n{}", fixtures::checksummed_cask("bar", "1.0")));
    let head = repo.commit("update casks").unwrap();

    let e = env(&repo, RecordingAuditor::new());
    let report = audit_modified_casks(&e.ctx, request(format!("{base}..{head}"), false))
        .await
        .unwrap();

    assert_eq!(report.audited.len(), 2);
    assert!(e.auditor.options_for("foo").unwrap().download);
    assert!(!e.auditor.options_for("bar").unwrap().download);
    assert!(!e.auditor.options_for("foo").unwrap().check_token_conflicts);
}

#[tokio::test]
async fn new_casks_are_checked_for_token_conflicts() {
    let Some(repo) = CaskRepo::new() else { return };
    let base = repo.git(&["rev-parse", "HEAD"]).unwrap();
    repo.write("Casks/fresh.rb", &fixtures::checksummed_cask("fresh", "0.1"));
    repo.write("Casks/nightly.rb", &fixtures::unchecked_cask("nightly"));
    let head = repo.commit("add casks").unwrap();

    let mut e = env(&repo, RecordingAuditor::new());
    audit_modified_casks(&e.ctx, request(format!("{base}..{head}"), false))
        .await
        .unwrap();

    let fresh = e.auditor.options_for("fresh").unwrap();
    assert!(fresh.check_token_conflicts);
    assert!(fresh.download);

    // sha256 :no_check never verifies a download
    let nightly = e.auditor.options_for("nightly").unwrap();
    assert!(nightly.check_token_conflicts);
    assert!(!nightly.download);

    let mut listed = None;
    while let Ok(message) = e.rx.try_recv() {
        if let AppEvent::Audit(AuditEvent::ChangesDiscovered { casks, .. }) = message.event {
            listed = Some(casks);
        }
    }
    let mut listed = listed.unwrap();
    listed.sort();
    assert_eq!(listed, vec!["fresh", "nightly"]);
}

#[tokio::test]
async fn unchanged_casks_range_is_a_silent_success() {
    let Some(repo) = CaskRepo::new() else { return };
    let base = repo.git(&["rev-parse", "HEAD"]).unwrap();
    repo.write("README.md", "casks, documented\n");
    let head = repo.commit("docs").unwrap();

    let e = env(&repo, RecordingAuditor::new());
    let report = audit_modified_casks(&e.ctx, request(format!("{base}..{head}"), false))
        .await
        .unwrap();

    assert!(report.audited.is_empty());
    assert!(e.auditor.audits().is_empty());
}

#[tokio::test]
async fn failures_are_aggregated_and_cleanup_still_runs() {
    let Some(repo) = CaskRepo::new() else { return };
    let base = repo.git(&["rev-parse", "HEAD"]).unwrap();
    repo.write("Casks/alpha.rb", &fixtures::unchecked_cask("alpha"));
    repo.write("Casks/beta.rb", &fixtures::unchecked_cask("beta"));
    let head = repo.commit("add casks").unwrap();

    let e = env(&repo, RecordingAuditor::new().failing(&["alpha", "beta"]));
    let err = audit_modified_casks(&e.ctx, request(format!("{base}..{head}"), true))
        .await
        .unwrap_err();

    match err {
        Error::Audit(AuditError::CasksFailed { tokens }) => {
            // git lists files in path order
            assert_eq!(tokens, vec!["alpha", "beta"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(std::fs::read_dir(&e.cache).unwrap().count(), 0);
}

#[tokio::test]
async fn unknown_revision_is_fatal_and_cleanup_still_runs() {
    let Some(repo) = CaskRepo::new() else { return };

    let e = env(&repo, RecordingAuditor::new());
    let err = audit_modified_casks(&e.ctx, request("no-such-rev..HEAD".to_string(), true))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Vcs(_)));
    assert!(e.auditor.audits().is_empty());
    assert_eq!(std::fs::read_dir(&e.cache).unwrap().count(), 0);
}

#[tokio::test]
async fn cache_is_kept_without_cleanup_flag() {
    let Some(repo) = CaskRepo::new() else { return };
    let head = repo.git(&["rev-parse", "HEAD"]).unwrap();

    let e = env(&repo, RecordingAuditor::new());
    audit_modified_casks(&e.ctx, request(format!("{head}..{head}"), false))
        .await
        .unwrap();

    assert_eq!(std::fs::read_dir(&e.cache).unwrap().count(), 1);
}

#[tokio::test]
async fn auditor_runs_from_the_repository_root() {
    let Some(repo) = CaskRepo::new() else { return };
    let base = repo.git(&["rev-parse", "HEAD"]).unwrap();
    repo.write("Casks/foo.rb", &fixtures::unchecked_cask("foo"));
    let head = repo.commit("add foo").unwrap();

    let e = env(&repo, RecordingAuditor::new());
    audit_modified_casks(&e.ctx, request(format!("{base}..{head}"), false))
        .await
        .unwrap();

    let root = &e.auditor.audits()[0].root;
    assert_eq!(
        std::fs::canonicalize(root).unwrap(),
        std::fs::canonicalize(repo.path()).unwrap()
    );
}
