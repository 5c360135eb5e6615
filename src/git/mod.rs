//! Version-control abstraction layer
//!
//! Release steps talk to the repository only through the [VersionControl]
//! trait, so the guards and parsing around it can be exercised without a
//! real repository.
//!
//! - [repository::Git2Repository]: the real implementation, backed by `git2`
//! - [mock::MockRepository]: a scripted implementation for tests
//!
//! ```rust
//! # use tpie_release::git::VersionControl;
//! # fn example<V: VersionControl>(vcs: &V) -> tpie_release::Result<()> {
//! let branch = vcs.current_branch()?;
//! let head = vcs.head_short_hash()?;
//! let messages = vcs.messages_since(&head)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit information for changelog generation
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The raw commit message
    pub message: String,
}

/// Name and email a commit is authored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Repository operations used by the release steps.
///
/// Read queries come first in a run and their failures are fatal. The
/// mutating operations at the end are treated as best-effort by callers.
pub trait VersionControl {
    /// Name of the checked-out branch (`HEAD` when detached).
    fn current_branch(&self) -> Result<String>;

    /// First seven characters of the HEAD commit id.
    fn head_short_hash(&self) -> Result<String>;

    /// Commits reachable from HEAD but not from `since`, newest first.
    ///
    /// `since` may be a short hash.
    fn messages_since(&self, since: &str) -> Result<Vec<CommitInfo>>;

    /// Stores `identity` as the repository-local author.
    fn set_identity(&self, identity: &Identity) -> Result<()>;

    /// Stages every change in the working tree.
    fn stage_all(&self) -> Result<()>;

    /// Commits the index on top of HEAD.
    fn commit(&self, message: &str) -> Result<()>;

    /// Force-pushes the current branch to `remote`.
    fn push_force(&self, remote: &str) -> Result<()>;
}
