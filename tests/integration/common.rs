use casket_config::Config;
use casket_events::EventReceiver;
use casket_ops::{CacheCleanup, OpsContextBuilder, OpsCtx};
use casket_testkit::RecordingAuditor;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

/// A throwaway git repository holding casks
pub struct CaskRepo {
    pub dir: TempDir,
}

impl CaskRepo {
    /// `None` when git is unavailable.
    pub fn new() -> Option<Self> {
        let dir = TempDir::new().ok()?;
        let repo = Self { dir };
        repo.git(&["init", "--quiet"])?;
        repo.git(&["config", "user.email", "test@example.com"])?;
        repo.git(&["config", "user.name", "Test"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        std::fs::create_dir_all(repo.path().join("Casks")).ok()?;
        std::fs::write(repo.path().join("README.md"), "casks\n").ok()?;
        repo.commit("initial")?;
        Some(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .ok()?;
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn write(&self, file: &str, source: &str) {
        std::fs::write(self.path().join(file), source).unwrap();
    }

    /// Commit everything and return the new HEAD
    pub fn commit(&self, message: &str) -> Option<String> {
        self.git(&["add", "-A"])?;
        self.git(&["commit", "--quiet", "--allow-empty", "-m", message])?;
        self.git(&["rev-parse", "HEAD"])
    }
}

pub struct Env {
    pub ctx: OpsCtx,
    pub rx: EventReceiver,
    pub auditor: Arc<RecordingAuditor>,
    pub cache: PathBuf,
    _cache_dir: TempDir,
}

/// Context running against `repo` with a recording auditor and a temp cache
pub fn env(repo: &CaskRepo, auditor: RecordingAuditor) -> Env {
    let cache_dir = TempDir::new().unwrap();
    let cache = cache_dir.path().join("Cask");
    std::fs::create_dir_all(&cache).unwrap();
    std::fs::write(cache.join("foo--1.0.dmg"), b"cached").unwrap();

    let mut config = Config::default();
    config.paths.cache_path = Some(cache.clone());

    let (tx, rx) = casket_events::channel();
    let auditor = Arc::new(auditor);
    let ctx = OpsContextBuilder::new()
        .with_cleanup(Arc::new(
            CacheCleanup::new(config.cache_path()).with_events(tx.clone()),
        ))
        .with_config(config)
        .with_event_sender(tx)
        .with_auditor(auditor.clone())
        .with_working_dir(repo.path())
        .build()
        .unwrap();

    Env {
        ctx,
        rx,
        auditor,
        cache,
        _cache_dir: cache_dir,
    }
}
