use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use aptscope_core::parse_new_packages;
use log::{debug, error, info};

use crate::lock::{ContextLock, DEFAULT_LOCK_PATH, DEFAULT_LOCK_TIMEOUT};
use crate::PackageEngine;

/// Policy for one dependency context.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub lock_path: PathBuf,
    pub lock_timeout: Duration,
    /// Also remove packages the package manager pulled in automatically.
    pub aggressively_remove: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            lock_path: PathBuf::from(DEFAULT_LOCK_PATH),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            aggressively_remove: false,
        }
    }
}

/// Install the requested packages, run `block` with the names that were
/// newly installed, and finally remove whatever that list still contains.
///
/// The block may mutate the list; removal acts on its contents at cleanup
/// time, never on a snapshot. Packages that were already present are never
/// removed. The cross-process lock serializes overlapping invocations and
/// is released on every exit path; when nothing new was installed it is
/// released before the block runs, since no later mutation is needed.
///
/// A block error is re-raised unmodified after cleanup. A removal failure
/// after a successful block propagates once the lock is released.
pub fn with_dependencies<E, F, T>(
    engine: &mut E,
    options: &ContextOptions,
    package_names: &[String],
    block: F,
) -> Result<T>
where
    E: PackageEngine,
    F: FnOnce(&mut Vec<String>) -> Result<T>,
{
    if package_names.is_empty() {
        debug!("no packages requested");
        let mut installed = Vec::new();
        return block(&mut installed);
    }

    info!("acquiring lock to perform install");
    let mut lock = Some(ContextLock::acquire(
        &options.lock_path,
        options.lock_timeout,
    )?);

    info!("installing {}", package_names.join(", "));
    let output = match engine.install(package_names) {
        Ok(output) => output,
        Err(err) => {
            error!("error occurred installing packages");
            if let Some(lock) = lock.take() {
                if let Err(unlock_err) = lock.release() {
                    error!("lock release failed after install error: {unlock_err:#}");
                }
            }
            return Err(err);
        }
    };
    debug!("aptitude output:\n{output}");

    let mut installed: Vec<String> = parse_new_packages(&output, options.aggressively_remove)
        .into_iter()
        .map(|package| package.name)
        .collect();
    if installed.is_empty() {
        debug!("no new packages were installed");
        // Nothing will need removal, so stop excluding other invocations.
        if let Some(lock) = lock.take() {
            lock.release()?;
        }
    } else {
        info!("installed {}", installed.join(", "));
    }

    let outcome = block(&mut installed);

    let removal = if installed.is_empty() {
        Ok(())
    } else {
        info!("removing {}", installed.join(", "));
        engine.remove(&installed)
    };
    let unlock = match lock.take() {
        Some(lock) => lock.release(),
        None => Ok(()),
    };

    match outcome {
        Ok(value) => match (removal, unlock) {
            (Ok(()), Ok(())) => Ok(value),
            (Err(err), unlock) => {
                if let Err(unlock_err) = unlock {
                    error!("lock release failed during cleanup: {unlock_err:#}");
                }
                Err(err)
            }
            (Ok(()), Err(err)) => Err(err),
        },
        Err(err) => {
            if let Err(removal_err) = removal {
                error!("package removal failed during cleanup: {removal_err:#}");
            }
            if let Err(unlock_err) = unlock {
                error!("lock release failed during cleanup: {unlock_err:#}");
            }
            Err(err)
        }
    }
}
