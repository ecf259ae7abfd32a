//! Message formatting helpers

/// Render `count` followed by `noun`, adding a plural `s` unless the count is one.
///
/// `pluralize(1, "cask")` is `"1 cask"`, `pluralize(3, "modified cask")` is
/// `"3 modified casks"`.
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_and_plural() {
        assert_eq!(pluralize(1, "cask"), "1 cask");
        assert_eq!(pluralize(0, "cask"), "0 casks");
        assert_eq!(pluralize(2, "modified cask"), "2 modified casks");
    }
}
