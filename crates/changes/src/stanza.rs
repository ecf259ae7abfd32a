//! Detect added lines in download-relevant stanzas

use casket_errors::Error;
use casket_types::{CaskFilePath, CommitRange, Stanza};
use casket_vcs::Git;

/// First relevant stanza an added line of `diff` starts with.
///
/// A line counts when it begins with `+`, and after that single `+` and any
/// whitespace starts with one of [`Stanza::RELEVANT`]. The match is a plain
/// prefix test on each line: `urls` counts as `url`, and only added lines are
/// considered, so removing a stanza is not a relevant change.
#[must_use]
pub fn added_relevant_stanza(diff: &str) -> Option<Stanza> {
    diff.lines()
        .filter_map(|line| line.strip_prefix('+'))
        .map(str::trim_start)
        .find_map(|body| {
            Stanza::RELEVANT
                .into_iter()
                .find(|stanza| body.starts_with(stanza.as_str()))
        })
}

/// Classifies a cask file's change over a range
pub struct StanzaChangeClassifier<'a> {
    git: &'a Git,
}

impl<'a> StanzaChangeClassifier<'a> {
    #[must_use]
    pub fn new(git: &'a Git) -> Self {
        Self { git }
    }

    /// Whether the file's diff over `range` adds a line to a relevant stanza
    ///
    /// # Errors
    ///
    /// Propagates version control failures.
    pub async fn is_relevant_change(
        &self,
        file: &CaskFilePath,
        range: &CommitRange,
    ) -> Result<bool, Error> {
        let diff = self.git.diff_file(range, file.as_path()).await?;
        let stanza = added_relevant_stanza(&diff);
        tracing::debug!(file = %file, stanza = ?stanza, "classified cask change");
        Ok(stanza.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_relevant_stanza() {
        assert_eq!(added_relevant_stanza("+  version '2.0'"), Some(Stanza::Version));
        assert_eq!(added_relevant_stanza("+\tsha256 'abc'"), Some(Stanza::Sha256));
        assert_eq!(added_relevant_stanza("+url \"x\""), Some(Stanza::Url));
        assert_eq!(
            added_relevant_stanza("+  appcast 'https://x/feed'"),
            Some(Stanza::Appcast)
        );
    }

    #[test]
    fn ignores_removed_and_context_lines() {
        let diff = "-  version '1.0'\n   url 'x'\n+  homepage 'y'";
        assert_eq!(added_relevant_stanza(diff), None);
    }

    #[test]
    fn prefix_match_counts() {
        assert_eq!(added_relevant_stanza("+  urls are here"), Some(Stanza::Url));
    }

    #[test]
    fn stanza_must_begin_the_line() {
        assert_eq!(added_relevant_stanza("+  # bump version"), None);
        assert_eq!(added_relevant_stanza("+  app 'Url.app'"), None);
    }

    #[test]
    fn file_header_is_not_an_added_line() {
        assert_eq!(added_relevant_stanza("+++ b/Casks/url.rb"), None);
    }

    #[test]
    fn empty_diff_is_irrelevant() {
        assert_eq!(added_relevant_stanza(""), None);
    }
}
