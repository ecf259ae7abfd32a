//! Cask sources and canned diffs.

/// Source of a cask with a pinned checksum.
pub fn checksummed_cask(token: &str, version: &str) -> String {
    format!(
        "cask '{token}' do\n  version '{version}'\n  sha256 '{sha}'\n\n  url \"https://example.com/{token}-#{{version}}.dmg\"\n  name '{token}'\n  homepage 'https://example.com/'\n\n  app '{token}.app'\nend\n",
        sha = "3".repeat(64),
    )
}

/// Source of a cask whose download is never verified.
pub fn unchecked_cask(token: &str) -> String {
    format!(
        "cask \"{token}\" do\n  version :latest\n  sha256 :no_check\n\n  url \"https://example.com/{token}.zip\"\n  homepage \"https://example.com/\"\n\n  app \"{token}.app\"\nend\n"
    )
}

/// A diff touching only the `homepage` stanza.
pub fn homepage_only_diff(path: &str) -> String {
    crate::CaskDiff::new(path)
        .context("  url \"https://example.com/app.dmg\"")
        .removed("  homepage \"http://example.com/\"")
        .added("  homepage \"https://example.com/\"")
        .build()
}

/// A diff bumping `version` and `sha256`.
pub fn version_bump_diff(path: &str) -> String {
    crate::CaskDiff::new(path)
        .removed("  version '1.0'")
        .removed(&format!("  sha256 '{}'", "1".repeat(64)))
        .added("  version '2.0'")
        .added(&format!("  sha256 '{}'", "2".repeat(64)))
        .build()
}
