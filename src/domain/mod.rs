//! Domain logic - pure text and record rules independent of git operations

pub mod changelog;
pub mod descriptor;
pub mod manifest;
pub mod token;

pub use changelog::{parse_commit_log, ChangelogEntry, ChangelogHead, Section};
pub use descriptor::Descriptor;
pub use manifest::{Manifest, ManifestRecord, ManifestUpdate};
pub use token::VersionToken;
