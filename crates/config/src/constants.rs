//! Built-in defaults for the cask repository layout and external programs

/// Directory under the repository root that holds cask files
pub const CASK_DIR: &str = "Casks";
/// Extension of cask files
pub const CASK_EXTENSION: &str = "rb";

pub const VCS_PROGRAM: &str = "git";

pub const AUDITOR_PROGRAM: &str = "brew";
pub const AUDITOR_ARGS: &[&str] = &["cask", "audit"];
pub const DOWNLOAD_FLAG: &str = "--download";
pub const TOKEN_CONFLICTS_FLAG: &str = "--token-conflicts";
/// Environment variable through which the auditor receives the commit range
pub const COMMIT_RANGE_ENV: &str = "CASKET_COMMIT_RANGE";

/// Download cache location relative to the platform cache directory
pub const CACHE_SUBDIR: &str = "Homebrew/Cask";
pub const LOGS_SUBDIR: &str = "casket/logs";
