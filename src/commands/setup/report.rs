//! Per-run record of what happened to each artifact.

use crate::artifacts::{Artifact, ArtifactKind};
use crate::policy::WriteDecision;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportEntry {
    pub kind: ArtifactKind,
    pub destination: PathBuf,
    pub decision: WriteDecision,
}

#[derive(Debug, Default)]
pub(crate) struct SetupReport {
    pub entries: Vec<ReportEntry>,
}

impl SetupReport {
    pub fn record(&mut self, artifact: &Artifact, decision: WriteDecision) {
        self.entries.push(ReportEntry {
            kind: artifact.kind,
            destination: artifact.destination.clone(),
            decision,
        });
    }

    pub fn count(&self, decision: WriteDecision) -> usize {
        self.entries.iter().filter(|e| e.decision == decision).count()
    }

    /// Decision recorded for `destination`, if it was processed.
    #[cfg(test)]
    pub fn decision_for(&self, destination: &std::path::Path) -> Option<WriteDecision> {
        self.entries
            .iter()
            .find(|e| e.destination == destination)
            .map(|e| e.decision)
    }

    pub fn print_summary(&self) {
        if self.entries.is_empty() {
            println!("No artifacts generated.");
            return;
        }

        println!("Artifacts:");
        for entry in &self.entries {
            println!(
                "  {:<6} {:<12} {}",
                entry.kind,
                entry.decision,
                entry.destination.display()
            );
        }
        println!();
        println!(
            "{} created, {} overwritten, {} skipped.",
            self.count(WriteDecision::Create),
            self.count(WriteDecision::Overwrite),
            self.count(WriteDecision::Skip)
        );
        if self.count(WriteDecision::Skip) > 0 {
            println!("Run with --overwrite to regenerate skipped files.");
        }
    }
}
