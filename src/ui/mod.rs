//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The operator prompt and its injectable implementations

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_commit_summary, display_error, display_preview,
    display_proposed_version, display_status, display_success,
};

/// Source of the replacement version during a bump.
pub trait VersionPrompt {
    /// Asks for the new version, given the one currently recorded.
    ///
    /// The answer is returned trimmed; validation is the caller's job.
    fn ask_version(&self, current: &str) -> Result<String>;
}

/// Reads the new version from standard input.
///
/// Works with piped input as well as an interactive terminal.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        ConsolePrompt
    }
}

impl VersionPrompt for ConsolePrompt {
    fn ask_version(&self, current: &str) -> Result<String> {
        let stdin = io::stdin();
        read_version(&mut stdin.lock(), &mut io::stdout(), current)
    }
}

/// Writes the version prompt to `output` and reads one answer line from `input`.
pub fn read_version<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current: &str,
) -> Result<String> {
    write!(output, "Current Version - {} | Version bump: ", current)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Answers with a version decided up front (`--set`, tests).
#[derive(Debug, Clone)]
pub struct FixedVersion(pub String);

impl VersionPrompt for FixedVersion {
    fn ask_version(&self, _current: &str) -> Result<String> {
        Ok(self.0.trim().to_string())
    }
}
