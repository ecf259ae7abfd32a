//! Download cache cleanup

use async_trait::async_trait;
use casket_errors::{Error, StorageError};
use casket_events::{AppEvent, CleanupEvent, EventEmitter, EventSender, FailureContext};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Removes cached download artifacts
#[async_trait]
pub trait Cleanup: Send + Sync {
    /// Returns the number of cache entries removed.
    async fn clean(&self) -> Result<usize, Error>;
}

/// Empties the download cache directory
#[derive(Debug, Clone)]
pub struct CacheCleanup {
    path: PathBuf,
    events: Option<EventSender>,
}

impl CacheCleanup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            events: None,
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove every entry it can; entries that resist removal are returned
    /// alongside the count instead of stopping the sweep.
    async fn remove_entries(&self) -> Result<(usize, Vec<StorageError>), Error> {
        let mut entries = match tokio::fs::read_dir(&self.path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok((0, Vec::new())),
            Err(e) => return Err(StorageError::from_io_with_path(&e, &self.path).into()),
        };

        let mut removed = 0;
        let mut failures = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, &self.path))?
        {
            let path = entry.path();
            let result = match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => tokio::fs::remove_dir_all(&path).await,
                Ok(_) => tokio::fs::remove_file(&path).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "could not remove cache entry");
                    failures.push(StorageError::from_io_with_path(&e, &path));
                }
            }
        }

        Ok((removed, failures))
    }
}

impl EventEmitter for CacheCleanup {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}

#[async_trait]
impl Cleanup for CacheCleanup {
    async fn clean(&self) -> Result<usize, Error> {
        let start = Instant::now();
        self.emit(AppEvent::Cleanup(CleanupEvent::Starting {
            path: self.path.clone(),
        }));

        match self.remove_entries().await {
            Ok((entries_removed, failures)) if failures.is_empty() => {
                let duration = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                self.emit(AppEvent::Cleanup(CleanupEvent::Completed {
                    path: self.path.clone(),
                    entries_removed,
                    duration_ms: duration,
                }));
                Ok(entries_removed)
            }
            Ok((entries_removed, mut failures)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    removed = entries_removed,
                    failed = failures.len(),
                    "download cache only partly cleaned"
                );
                for failure in &failures {
                    self.emit(AppEvent::Cleanup(CleanupEvent::Failed {
                        path: failure.path().to_path_buf(),
                        failure: FailureContext::from_error(failure),
                    }));
                }
                Err(failures.swap_remove(0).into())
            }
            Err(e) => {
                self.emit(AppEvent::Cleanup(CleanupEvent::Failed {
                    path: self.path.clone(),
                    failure: FailureContext::from_error(&e),
                }));
                Err(e)
            }
        }
    }
}

/// Run `body`, then `cleanup` exactly once, however `body` finishes.
///
/// The body's result is returned unchanged and a panic inside it is resumed
/// after cleanup. A cleanup failure is logged and does not change the result.
///
/// # Errors
///
/// Returns whatever `body` returns.
pub async fn with_cleanup<F, T>(cleanup: Option<&dyn Cleanup>, body: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let result = AssertUnwindSafe(body).catch_unwind().await;

    if let Some(cleanup) = cleanup {
        match cleanup.clean().await {
            Ok(removed) => tracing::debug!(removed, "download cache cleaned"),
            Err(e) => tracing::warn!(error = %e, "download cache cleanup failed"),
        }
    }

    match result {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
