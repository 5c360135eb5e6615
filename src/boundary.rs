use std::fmt;

/// Warnings raised while finishing a release step.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A post-write version-control step failed; the file stays written
    HousekeepingFailed { step: String, reason: String },
    /// An auto-generated commit was left out of the changelog
    SkippedGeneratedCommit { hash: String },
    /// The commit range produced no change notes
    NoChangeNotes { since: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::HousekeepingFailed { step, reason } => {
                write!(f, "git {} failed, continuing: {}", step, reason)
            }
            BoundaryWarning::SkippedGeneratedCommit { hash } => {
                let short = crate::domain::changelog::short_hash(hash);
                write!(f, "Skipped auto-generated commit {}", short)
            }
            BoundaryWarning::NoChangeNotes { since } => {
                write!(f, "No change notes found in commits since {}", since)
            }
        }
    }
}
