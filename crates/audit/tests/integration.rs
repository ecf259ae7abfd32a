use casket_audit::{Auditor, CaskAuditDispatcher, CommandAuditor};
use casket_changes::ChangeSet;
use casket_config::AuditorConfig;
use casket_errors::{AuditError, CaskError, Error};
use casket_events::{AppEvent, AuditEvent};
use casket_platform::PlatformContext;
use casket_testkit::{fixtures, CaskDiff, GitScript, MapLoader, RecordingAuditor, ScriptedProcess};
use casket_types::{AuditOptions, CaskDefinition, CaskFilePath, ChecksumPolicy, CommitRange};
use casket_vcs::Git;
use std::path::Path;
use std::sync::Arc;

const ROOT: &str = "/repo";
const RANGE: &str = "main..feature";

fn changes(modified_or_added: &[&str], added: &[&str]) -> ChangeSet {
    ChangeSet {
        modified_or_added: modified_or_added.iter().map(|f| CaskFilePath::from(*f)).collect(),
        added: added.iter().map(|f| CaskFilePath::from(*f)).collect(),
    }
}

fn git_for(script: GitScript) -> (Git, Arc<ScriptedProcess>) {
    let process = Arc::new(script.build());
    (
        Git::new("git", process.clone(), PlatformContext::default()).in_dir(ROOT),
        process,
    )
}

#[tokio::test]
async fn download_follows_relevant_stanza_changes() {
    let (git, _) = git_for(
        GitScript::new(ROOT, RANGE)
            .file_diff(
                "Casks/foo.rb",
                &CaskDiff::new("Casks/foo.rb").added(&format!("  sha256 '{}'", "f".repeat(64))).build(),
            )
            .file_diff(
                "Casks/bar.rb",
                &CaskDiff::new("Casks/bar.rb").added("  # upstream moved").build(),
            ),
    );
    let loader = MapLoader::new().checksummed("foo").checksummed("bar");
    let auditor = RecordingAuditor::new();
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git);

    let outcome = dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/foo.rb", "Casks/bar.rb"], &[]),
        )
        .await
        .unwrap();

    assert!(outcome.failed.is_empty());
    assert!(auditor.options_for("foo").unwrap().download);
    assert!(!auditor.options_for("bar").unwrap().download);
    assert_eq!(auditor.audits()[0].root, Path::new(ROOT));
}

#[tokio::test]
async fn no_check_skips_the_file_diff() {
    let (git, process) = git_for(GitScript::new(ROOT, RANGE));
    let loader = MapLoader::new().unchecked("nightly");
    let auditor = RecordingAuditor::new();
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git);

    dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/nightly.rb"], &[]),
        )
        .await
        .unwrap();

    assert!(!auditor.options_for("nightly").unwrap().download);
    assert!(process.calls().is_empty());
}

#[tokio::test]
async fn token_conflicts_checked_only_for_added_files() {
    let (git, _) = git_for(GitScript::new(ROOT, RANGE));
    let loader = MapLoader::new().unchecked("old").unchecked("new");
    let auditor = RecordingAuditor::new();
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git);

    dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/old.rb", "Casks/new.rb"], &["Casks/new.rb"]),
        )
        .await
        .unwrap();

    assert!(!auditor.options_for("old").unwrap().check_token_conflicts);
    assert!(auditor.options_for("new").unwrap().check_token_conflicts);
    assert_eq!(
        auditor.options_for("new").unwrap().commit_range,
        CommitRange::new(RANGE)
    );
}

#[tokio::test]
async fn failures_keep_encounter_order_and_scan_continues() {
    let (git, _) = git_for(GitScript::new(ROOT, RANGE));
    let loader = MapLoader::new().unchecked("a").unchecked("b").unchecked("c");
    let auditor = RecordingAuditor::new().failing(&["c", "a"]);
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git);

    let outcome = dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/a.rb", "Casks/b.rb", "Casks/c.rb"], &[]),
        )
        .await
        .unwrap();

    assert_eq!(auditor.audited_tokens(), vec!["a", "b", "c"]);
    assert_eq!(outcome.failed_tokens(), vec!["a", "c"]);
    assert_eq!(outcome.records.len(), 3);
}

#[tokio::test]
async fn duplicate_listing_is_audited_twice() {
    let (git, _) = git_for(GitScript::new(ROOT, RANGE));
    let loader = MapLoader::new().unchecked("dup");
    let auditor = RecordingAuditor::new().failing(&["dup"]);
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git);

    let outcome = dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/dup.rb", "Casks/dup.rb"], &[]),
        )
        .await
        .unwrap();

    assert_eq!(outcome.failed_tokens(), vec!["dup", "dup"]);
}

#[tokio::test]
async fn load_failure_aborts_remaining_scan() {
    let (git, _) = git_for(GitScript::new(ROOT, RANGE));
    let loader = MapLoader::new().unchecked("a").unchecked("c");
    let auditor = RecordingAuditor::new();
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git);

    let err = dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/a.rb", "Casks/b.rb", "Casks/c.rb"], &[]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cask(CaskError::NotFound { .. })));
    assert_eq!(auditor.audited_tokens(), vec!["a"]);
}

#[tokio::test]
async fn token_comes_from_definition_not_file_name() {
    let (git, _) = git_for(GitScript::new(ROOT, RANGE));
    let loader = MapLoader::new().with(CaskDefinition::new(
        "real-token",
        CaskFilePath::from("Casks/odd-name.rb"),
        ChecksumPolicy::NoCheck,
    ));
    let auditor = RecordingAuditor::new().failing(&["real-token"]);
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git);

    let outcome = dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/odd-name.rb"], &[]),
        )
        .await
        .unwrap();

    assert_eq!(outcome.failed_tokens(), vec!["real-token"]);
    assert_eq!(outcome.records[0].path, CaskFilePath::from("Casks/odd-name.rb"));
}

#[tokio::test]
async fn emits_start_and_completion_per_cask() {
    let (git, _) = git_for(GitScript::new(ROOT, RANGE));
    let loader = MapLoader::new().unchecked("foo");
    let auditor = RecordingAuditor::new().failing(&["foo"]);
    let (tx, mut rx) = casket_events::channel();
    let dispatcher = CaskAuditDispatcher::new(&loader, &auditor, &git).with_events(tx);

    dispatcher
        .dispatch(
            Path::new(ROOT),
            &CommitRange::new(RANGE),
            &changes(&["Casks/foo.rb"], &["Casks/foo.rb"]),
        )
        .await
        .unwrap();

    assert!(matches!(
        rx.try_recv().unwrap().event,
        AppEvent::Audit(AuditEvent::CaskAuditStarted { ref token, download: false, check_token_conflicts: true })
            if token == "foo"
    ));
    assert!(matches!(
        rx.try_recv().unwrap().event,
        AppEvent::Audit(AuditEvent::CaskAuditCompleted { passed: false, .. })
    ));
}

#[tokio::test]
async fn command_auditor_maps_exit_status() {
    let process = Arc::new(
        ScriptedProcess::new()
            .ok(&["brew", "cask", "audit", "--download", "Casks/foo.rb"], "")
            .fail(&["brew", "cask", "audit", "Casks/foo.rb"], "Error: audit failed\n", 1),
    );
    let auditor = CommandAuditor::new(AuditorConfig::default(), process.clone(), PlatformContext::default());
    let cask = CaskDefinition::new(
        "foo",
        "Casks/foo.rb".into(),
        ChecksumPolicy::Checksum("f".repeat(64)),
    );

    let mut options = AuditOptions {
        download: true,
        check_token_conflicts: false,
        commit_range: CommitRange::new(RANGE),
    };
    assert!(auditor.audit(Path::new(ROOT), &cask, &options).await.unwrap());

    options.download = false;
    assert!(!auditor.audit(Path::new(ROOT), &cask, &options).await.unwrap());

    let calls = process.calls();
    assert_eq!(calls[0].cwd.as_deref(), Some(Path::new(ROOT)));
    assert!(calls[0]
        .env
        .contains(&("CASKET_COMMIT_RANGE".to_string(), RANGE.to_string())));
}

#[tokio::test]
async fn command_auditor_that_cannot_start_is_fatal() {
    let process = Arc::new(ScriptedProcess::new().missing_program("brew"));
    let auditor = CommandAuditor::new(AuditorConfig::default(), process, PlatformContext::default());
    let cask = CaskDefinition::new("foo", "Casks/foo.rb".into(), ChecksumPolicy::NoCheck);
    let options = AuditOptions {
        download: false,
        check_token_conflicts: false,
        commit_range: CommitRange::new(RANGE),
    };

    let err = auditor.audit(Path::new(ROOT), &cask, &options).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Audit(AuditError::AuditorUnavailable { ref program, .. }) if program == "brew"
    ));
}

#[test]
fn fixture_sources_parse() {
    let cask = casket_loader::parse_cask(&"Casks/foo.rb".into(), &fixtures::checksummed_cask("foo", "1.0")).unwrap();
    assert_eq!(cask.token, "foo");
}
