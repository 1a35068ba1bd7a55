mod context;
mod engine;
mod lock;

pub use context::{with_dependencies, ContextOptions};
pub use engine::{Aptitude, PackageEngine};
pub use lock::{ContextLock, DEFAULT_LOCK_PATH, DEFAULT_LOCK_TIMEOUT};
