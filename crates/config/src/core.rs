//! Configuration sections

use crate::constants;
use casket_types::ColorChoice;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub color: ColorChoice,
}

/// Where casks live and how version control is reached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_cask_dir")]
    pub cask_dir: String,
    #[serde(default = "default_cask_extension")]
    pub cask_extension: String,
    #[serde(default = "default_vcs_program")]
    pub vcs_program: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            cask_dir: default_cask_dir(),
            cask_extension: default_cask_extension(),
            vcs_program: default_vcs_program(),
        }
    }
}

/// External auditor invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditorConfig {
    #[serde(default = "default_auditor_program")]
    pub program: String,
    #[serde(default = "default_auditor_args")]
    pub args: Vec<String>,
    #[serde(default = "default_download_flag")]
    pub download_flag: String,
    #[serde(default = "default_token_conflicts_flag")]
    pub token_conflicts_flag: String,
    #[serde(default = "default_commit_range_env")]
    pub commit_range_env: String,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            program: default_auditor_program(),
            args: default_auditor_args(),
            download_flag: default_download_flag(),
            token_conflicts_flag: default_token_conflicts_flag(),
            commit_range_env: default_commit_range_env(),
        }
    }
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Download cache emptied by `--cleanup`
    pub cache_path: Option<PathBuf>,
    pub logs_path: Option<PathBuf>,
}

// Default value functions for serde
fn default_cask_dir() -> String {
    constants::CASK_DIR.to_string()
}

fn default_cask_extension() -> String {
    constants::CASK_EXTENSION.to_string()
}

fn default_vcs_program() -> String {
    constants::VCS_PROGRAM.to_string()
}

fn default_auditor_program() -> String {
    constants::AUDITOR_PROGRAM.to_string()
}

fn default_auditor_args() -> Vec<String> {
    constants::AUDITOR_ARGS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_download_flag() -> String {
    constants::DOWNLOAD_FLAG.to_string()
}

fn default_token_conflicts_flag() -> String {
    constants::TOKEN_CONFLICTS_FLAG.to_string()
}

fn default_commit_range_env() -> String {
    constants::COMMIT_RANGE_ENV.to_string()
}
