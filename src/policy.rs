//! Write Policy: the create/overwrite/skip gate in front of every artifact.
//!
//! The decision is recomputed at the moment of writing for each destination
//! and never cached. Evaluating it prints a notice naming the path; that
//! notice is how the operator sees what a run did.

use std::fmt;
use std::path::Path;

/// Outcome of evaluating the Write Policy for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteDecision {
    /// Destination absent; it will be created.
    Create,
    /// Destination present and the run allows overwriting.
    Overwrite,
    /// Destination present and left untouched.
    Skip,
}

impl WriteDecision {
    /// Whether the caller may write the destination.
    pub fn proceeds(self) -> bool {
        !matches!(self, WriteDecision::Skip)
    }

    /// Operator-facing notice for this decision on `path`.
    pub fn notice(self, path: &Path) -> String {
        match self {
            WriteDecision::Create => format!("Creating [{}]", path.display()),
            WriteDecision::Overwrite => {
                format!("path [{}] exists, overwriting", path.display())
            }
            WriteDecision::Skip => format!("path [{}] exists, skipping", path.display()),
        }
    }
}

impl fmt::Display for WriteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WriteDecision::Create => "created",
            WriteDecision::Overwrite => "overwritten",
            WriteDecision::Skip => "skipped",
        };
        f.pad(s)
    }
}

/// Decide whether `path` may be written, and say so.
///
/// Never fails: a path whose existence cannot be determined (for example a
/// parent without search permission) is treated as absent, and the real
/// error surfaces when the write is attempted.
pub fn decide(path: &Path, overwrite: bool) -> WriteDecision {
    let decision = evaluate(path, overwrite);
    println!("{}", decision.notice(path));
    decision
}

fn evaluate(path: &Path, overwrite: bool) -> WriteDecision {
    // A dangling symlink counts as present.
    let exists = path.symlink_metadata().is_ok();

    match (exists, overwrite) {
        (false, _) => WriteDecision::Create,
        (true, true) => WriteDecision::Overwrite,
        (true, false) => WriteDecision::Skip,
    }
}
