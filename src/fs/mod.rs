//! Filesystem utilities for autoserver.
//!
//! Atomic writes for generated artifacts, directory creation for the
//! project skeleton, and permission/symlink helpers used by the git hook
//! and deploy steps.

pub mod atomic;
mod links;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
pub use links::{ensure_dir, mark_executable, replace_symlink};
