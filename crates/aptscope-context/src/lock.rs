use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use fs2::FileExt;

pub const DEFAULT_LOCK_PATH: &str = "/tmp/.aptscope-lock";
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30 * 60);

const ACQUIRE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A cross-process mutual-exclusion token backed by an exclusive advisory
/// lock on a well-known filesystem path. The file carries no data; only
/// the lock matters. Dropping the guard releases the lock, so no exit path
/// can leak it.
#[derive(Debug)]
pub struct ContextLock {
    file: Option<File>,
    path: PathBuf,
}

impl ContextLock {
    /// Acquire the exclusive lock on `path`, polling until it is free or
    /// `timeout` elapses.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)
            .with_context(|| format!("failed to open lock file: {}", path.display()))?;

        let deadline = Instant::now() + timeout;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => break,
                Err(err) if err.kind() == fs2::lock_contended_error().kind() => {
                    if Instant::now() >= deadline {
                        return Err(anyhow!(
                            "timed out after {:?} waiting for lock held by another process: {}",
                            timeout,
                            path.display()
                        ));
                    }
                    thread::sleep(ACQUIRE_POLL_INTERVAL);
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("failed to lock file: {}", path.display())
                    });
                }
            }
        }

        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
        })
    }

    /// Release the lock explicitly. Dropping the guard has the same effect
    /// but cannot report an unlock failure.
    pub fn release(mut self) -> Result<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.unlock()
                .with_context(|| format!("failed to unlock: {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl Drop for ContextLock {
    fn drop(&mut self) {
        let _ = self.release_inner();
    }
}
