//! Changelog text model: the recorded head line, commit-note grouping and
//! section rendering. Everything here is pure string work.

use std::fmt::Write as _;

use crate::error::{ReleaseError, Result};

/// First character of an auto-generated commit message.
pub const SENTINEL: char = '$';

/// Group used for notes written before any `#File` header.
pub const OVERALL_GROUP: &str = "Overall";

/// Length of a short commit hash.
pub const SHORT_HASH_LEN: usize = 7;

const GROUP_MARKER: char = '#';
const NESTED_BULLET: &str = "--";

/// Truncates a commit id to its short form.
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

/// Version and commit recorded by the newest changelog section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogHead {
    pub version: String,
    pub short_hash: String,
}

impl ChangelogHead {
    /// Reads `## Version - <version> - [<hash>](<url>)` from the first line.
    ///
    /// The version is the third token from the end and the hash is the last
    /// token minus its leading `[`, cut to seven characters.
    pub fn parse(changelog: &str) -> Result<Self> {
        let first_line = changelog.lines().next().unwrap_or_default();
        let tokens: Vec<&str> = first_line.split(' ').collect();
        if tokens.len() < 3 {
            return Err(ReleaseError::changelog(format!(
                "first line does not record a version: {:?}",
                first_line
            )));
        }

        let version = tokens[tokens.len() - 3].to_string();
        let link = tokens[tokens.len() - 1];
        let short_hash = link
            .chars()
            .skip(1)
            .take(SHORT_HASH_LEN)
            .collect::<String>();

        Ok(ChangelogHead {
            version,
            short_hash,
        })
    }
}

/// Change notes for one file (or the `Overall` bucket).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub group: String,
    pub notes: Vec<String>,
}

/// Groups commit-message lines by the `#File` headers that precede them.
///
/// Blank and single-character lines are dropped, as is any line starting
/// with [`SENTINEL`]. Quote characters around a line are removed. A `--`
/// prefix becomes a tab-indented bullet. Groups keep first-seen order and a
/// repeated header appends to the existing group.
pub fn parse_commit_log(log: &str) -> Vec<ChangelogEntry> {
    let mut entries: Vec<ChangelogEntry> = Vec::new();
    let mut current: Option<usize> = None;

    for raw in log.lines() {
        let line = raw.trim_end().trim_matches('"');
        if line.chars().count() <= 1 || line.starts_with(SENTINEL) {
            continue;
        }

        if let Some(name) = line.strip_prefix(GROUP_MARKER) {
            current = Some(group_index(&mut entries, name.trim()));
            continue;
        }

        let note = match line.strip_prefix(NESTED_BULLET) {
            Some(rest) => format!("\t-{}", rest),
            None => line.to_string(),
        };
        let idx = *current.get_or_insert_with(|| group_index(&mut entries, OVERALL_GROUP));
        entries[idx].notes.push(note);
    }

    entries
}

fn group_index(entries: &mut Vec<ChangelogEntry>, name: &str) -> usize {
    match entries.iter().position(|e| e.group == name) {
        Some(idx) => idx,
        None => {
            entries.push(ChangelogEntry {
                group: name.to_string(),
                notes: Vec::new(),
            });
            entries.len() - 1
        }
    }
}

/// Inputs for one rendered changelog section.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub version: &'a str,
    pub short_hash: &'a str,
    pub commit_url: &'a str,
    /// File name listed under the version-bump note.
    pub descriptor_name: &'a str,
    pub entries: &'a [ChangelogEntry],
}

impl Section<'_> {
    /// Renders the section; every block ends in a blank line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "## Version - {} - [{}]({})",
            self.version, self.short_hash, self.commit_url
        );
        let _ = write!(
            out,
            "#### {}\n- Version bump to `{}`\n\n",
            self.descriptor_name, self.version
        );
        for entry in self.entries {
            let _ = write!(out, "#### {}\n{}\n\n", entry.group, entry.notes.join("\n"));
        }
        out
    }

    /// Places the section ahead of the existing changelog text.
    pub fn prepend_to(&self, changelog: &str) -> String {
        let mut out = self.render();
        out.push_str(changelog);
        out
    }
}
