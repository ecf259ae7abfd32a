//! Stanza extraction from cask source

use async_trait::async_trait;
use casket_errors::{CaskError, Error};
use casket_types::{CaskDefinition, CaskFilePath, ChecksumPolicy};
use std::path::Path;

use crate::CaskLoader;

/// Reads cask files from disk and extracts their stanzas
#[derive(Debug, Clone, Copy, Default)]
pub struct DslCaskLoader;

impl DslCaskLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CaskLoader for DslCaskLoader {
    async fn load(&self, root: &Path, file: &CaskFilePath) -> Result<CaskDefinition, Error> {
        let full_path = file.resolve(root);
        let source = match tokio::fs::read_to_string(&full_path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CaskError::NotFound {
                    path: full_path.display().to_string(),
                }
                .into());
            }
            Err(e) => return Err(Error::io_with_path(&e, &full_path)),
        };

        let cask = parse_cask(file, &source)?;
        tracing::debug!(token = %cask.token, path = %file, "loaded cask");
        Ok(cask)
    }
}

/// Extract a definition from cask source.
///
/// Recognises the `cask '<token>' do` header (optionally written as
/// `cask :v1 => '<token>' do`) and the first `sha256`, `version` and `url`
/// stanzas. Comment lines are skipped. Anything else is left for the auditor.
///
/// # Errors
///
/// Returns `CaskError::MissingToken` when there is no header. A `sha256`
/// value that is neither a quoted digest nor `:no_check` (per-architecture
/// hashes, computed values) loads as `ChecksumPolicy::Unspecified`.
pub fn parse_cask(file: &CaskFilePath, source: &str) -> Result<CaskDefinition, Error> {
    let mut token = None;
    let mut sha256 = None;
    let mut version = None;
    let mut url = None;

    for line in source.lines().map(str::trim) {
        if line.starts_with('#') {
            continue;
        }

        if token.is_none() {
            if let Some(rest) = keyword_argument(line, "cask") {
                token = parse_header(rest);
                continue;
            }
        }

        if sha256.is_none() {
            if let Some(rest) = keyword_argument(line, "sha256") {
                sha256 = Some(parse_checksum(rest).unwrap_or_else(|| {
                    tracing::debug!(%file, value = rest, "sha256 value left to the auditor");
                    ChecksumPolicy::Unspecified
                }));
                continue;
            }
        }

        if version.is_none() {
            if let Some(rest) = keyword_argument(line, "version") {
                version = Some(literal(rest));
                continue;
            }
        }

        if url.is_none() {
            if let Some(rest) = keyword_argument(line, "url") {
                url = Some(literal(rest));
            }
        }
    }

    let token = token.ok_or_else(|| CaskError::MissingToken {
        path: file.to_string(),
    })?;

    Ok(CaskDefinition {
        token,
        path: file.clone(),
        sha256: sha256.unwrap_or(ChecksumPolicy::Unspecified),
        version,
        url,
    })
}

/// Text after `keyword` when the line is a call to it
fn keyword_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.starts_with(|c: char| c.is_whitespace()) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Token from `'<token>' do` or `:v1 => '<token>' do`
fn parse_header(rest: &str) -> Option<String> {
    let rest = match rest.strip_prefix(':') {
        Some(versioned) => versioned.split_once("=>")?.1.trim_start(),
        None => rest,
    };
    let (token, tail) = quoted(rest)?;
    if token.is_empty() || tail.trim_start().strip_prefix("do").is_none() {
        return None;
    }
    Some(token.to_string())
}

fn parse_checksum(rest: &str) -> Option<ChecksumPolicy> {
    if rest.strip_prefix(":no_check").is_some_and(ends_expression) {
        return Some(ChecksumPolicy::NoCheck);
    }
    let (digest, _) = quoted(rest)?;
    Some(ChecksumPolicy::Checksum(digest.to_string()))
}

/// A quoted value without its quotes, otherwise the expression text as written
fn literal(rest: &str) -> String {
    match quoted(rest) {
        Some((value, _)) => value.to_string(),
        None => rest
            .split_once(',')
            .map_or(rest, |(head, _)| head)
            .trim()
            .to_string(),
    }
}

/// Split a leading single or double quoted string from `text`
fn quoted(text: &str) -> Option<(&str, &str)> {
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &text[1..];
    let end = body.find(quote)?;
    Some((&body[..end], &body[end + 1..]))
}

fn ends_expression(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with('#')
}
