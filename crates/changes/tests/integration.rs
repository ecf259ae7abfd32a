use casket_changes::{added_relevant_stanza, CaskLayout, ChangeSetResolver, StanzaChangeClassifier};
use casket_errors::{Error, VcsError};
use casket_events::{AppEvent, AuditEvent};
use casket_platform::PlatformContext;
use casket_testkit::arb::{
    arb_irrelevant_added_line, arb_relevant_added_line, arb_unchanged_line,
};
use casket_testkit::{fixtures, GitScript};
use casket_types::{CaskFilePath, CommitRange};
use casket_vcs::Git;
use proptest::prelude::*;
use std::path::Path;
use std::sync::Arc;

const ROOT: &str = "/repo";
const RANGE: &str = "main..topic";

fn git_for(script: GitScript) -> Git {
    Git::new("git", Arc::new(script.build()), PlatformContext::default()).in_dir(ROOT)
}

#[tokio::test]
async fn resolves_both_sets_in_reported_order() {
    let git = git_for(
        GitScript::new(ROOT, RANGE)
            .modified_or_added(&["Casks/zeta.rb", "Casks/alpha.rb", "Casks/mid.rb"])
            .added(&["Casks/mid.rb"]),
    );
    let resolver = ChangeSetResolver::new(&git, CaskLayout::default());

    let changes = resolver
        .resolve(Path::new(ROOT), &CommitRange::new(RANGE))
        .await
        .unwrap();

    assert_eq!(
        changes.modified_or_added,
        vec![
            CaskFilePath::from("Casks/zeta.rb"),
            CaskFilePath::from("Casks/alpha.rb"),
            CaskFilePath::from("Casks/mid.rb"),
        ]
    );
    assert_eq!(changes.added, vec![CaskFilePath::from("Casks/mid.rb")]);
}

#[tokio::test]
async fn empty_listing_gives_empty_set_and_no_announcement() {
    let git = git_for(GitScript::new(ROOT, RANGE).modified_or_added(&[]).added(&[]));
    let (tx, mut rx) = casket_events::channel();
    let resolver = ChangeSetResolver::new(&git, CaskLayout::default()).with_events(tx);

    let changes = resolver
        .resolve(Path::new(ROOT), &CommitRange::new(RANGE))
        .await
        .unwrap();

    assert!(changes.is_empty());
    assert!(changes.added.is_empty());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn announces_tokens_of_changed_casks() {
    let git = git_for(
        GitScript::new(ROOT, RANGE)
            .modified_or_added(&["Casks/foo.rb", "Casks/bar.rb"])
            .added(&[]),
    );
    let (tx, mut rx) = casket_events::channel();
    let resolver = ChangeSetResolver::new(&git, CaskLayout::default()).with_events(tx);

    resolver
        .resolve(Path::new(ROOT), &CommitRange::new(RANGE))
        .await
        .unwrap();

    let message = rx.try_recv().unwrap();
    match message.event {
        AppEvent::Audit(AuditEvent::ChangesDiscovered { commit_range, casks }) => {
            assert_eq!(commit_range, RANGE);
            assert_eq!(casks, vec!["foo", "bar"]);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn bad_range_propagates_stderr() {
    let git = git_for(GitScript::new(ROOT, RANGE).bad_range());
    let resolver = ChangeSetResolver::new(&git, CaskLayout::default());

    let err = resolver
        .resolve(Path::new(ROOT), &CommitRange::new(RANGE))
        .await
        .unwrap_err();

    match err {
        Error::Vcs(VcsError::CommandFailed { stderr, .. }) => {
            assert!(stderr.starts_with("fatal: ambiguous argument 'main..topic'"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn repository_root_outside_checkout_fails() {
    let git = git_for(GitScript::new(ROOT, RANGE).outside_checkout());
    let resolver = ChangeSetResolver::new(&git, CaskLayout::default());
    assert!(resolver.repository_root().await.is_err());
}

#[tokio::test]
async fn classifier_reads_the_file_diff() {
    let git = git_for(
        GitScript::new(ROOT, RANGE)
            .file_diff("Casks/foo.rb", &fixtures::version_bump_diff("Casks/foo.rb"))
            .file_diff("Casks/bar.rb", &fixtures::homepage_only_diff("Casks/bar.rb")),
    );
    let classifier = StanzaChangeClassifier::new(&git);
    let range = CommitRange::new(RANGE);

    assert!(classifier
        .is_relevant_change(&"Casks/foo.rb".into(), &range)
        .await
        .unwrap());
    assert!(!classifier
        .is_relevant_change(&"Casks/bar.rb".into(), &range)
        .await
        .unwrap());
}

#[tokio::test]
async fn classifier_propagates_diff_failure() {
    let git = git_for(GitScript::new(ROOT, RANGE));
    let classifier = StanzaChangeClassifier::new(&git);
    assert!(classifier
        .is_relevant_change(&"Casks/unknown.rb".into(), &CommitRange::new(RANGE))
        .await
        .is_err());
}

proptest! {
    #[test]
    fn irrelevant_lines_never_classify(
        unchanged in prop::collection::vec(arb_unchanged_line(), 0..10),
        added in prop::collection::vec(arb_irrelevant_added_line(), 0..10),
    ) {
        let diff = unchanged.into_iter().chain(added).collect::<Vec<_>>().join("\n");
        prop_assert_eq!(added_relevant_stanza(&diff), None);
    }

    #[test]
    fn one_relevant_added_line_is_enough(
        before in prop::collection::vec(arb_unchanged_line(), 0..10),
        relevant in arb_relevant_added_line(),
        after in prop::collection::vec(arb_irrelevant_added_line(), 0..10),
    ) {
        let lines: Vec<String> = before.into_iter().chain(std::iter::once(relevant)).chain(after).collect();
        prop_assert!(added_relevant_stanza(&lines.join("\n")).is_some());
    }

    #[test]
    fn line_order_does_not_matter(
        mut lines in prop::collection::vec(
            prop_oneof![arb_unchanged_line(), arb_irrelevant_added_line(), arb_relevant_added_line()],
            0..12,
        ),
    ) {
        let forward = added_relevant_stanza(&lines.join("\n")).is_some();
        lines.reverse();
        let backward = added_relevant_stanza(&lines.join("\n")).is_some();
        prop_assert_eq!(forward, backward);
    }
}
