use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Identity, VersionControl};
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
///
/// Every trait call is appended to [MockRepository::calls] so tests can
/// assert which operations ran, and in what order.
pub struct MockRepository {
    branch: String,
    head: String,
    commits: Vec<CommitInfo>,
    failing: Vec<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a mock on `branch` whose HEAD is `head`
    pub fn new(branch: impl Into<String>, head: impl Into<String>) -> Self {
        MockRepository {
            branch: branch.into(),
            head: head.into(),
            commits: Vec::new(),
            failing: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Add a commit; commits are returned newest first, in insertion order
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.commits.push(CommitInfo {
            hash: hash.into(),
            message: message.into(),
        });
    }

    /// Make the named operation (e.g. `"push_force"`) return an error
    pub fn fail_on(&mut self, operation: &'static str) {
        self.failing.push(operation);
    }

    /// Names of the operations invoked so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &'static str, detail: &str) -> Result<()> {
        let entry = if detail.is_empty() {
            operation.to_string()
        } else {
            format!("{} {}", operation, detail)
        };
        self.calls.borrow_mut().push(entry);

        if self.failing.contains(&operation) {
            return Err(ReleaseError::external(format!("{} failed", operation)));
        }
        Ok(())
    }
}

impl VersionControl for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.record("current_branch", "")?;
        Ok(self.branch.clone())
    }

    fn head_short_hash(&self) -> Result<String> {
        self.record("head_short_hash", "")?;
        Ok(self.head.clone())
    }

    fn messages_since(&self, since: &str) -> Result<Vec<CommitInfo>> {
        self.record("messages_since", since)?;
        Ok(self.commits.clone())
    }

    fn set_identity(&self, identity: &Identity) -> Result<()> {
        self.record("set_identity", &identity.name)
    }

    fn stage_all(&self) -> Result<()> {
        self.record("stage_all", "")
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record("commit", message)
    }

    fn push_force(&self, remote: &str) -> Result<()> {
        self.record("push_force", remote)
    }
}
