use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::cli::{read_file, require_files, write_file};
use crate::config::Config;
use crate::domain::changelog::{parse_commit_log, short_hash, SENTINEL};
use crate::domain::{ChangelogEntry, ChangelogHead, Descriptor, Section};
use crate::error::{Result, ValidationError};
use crate::git::{Identity, VersionControl};
use crate::ui;

/// Options for the changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogOptions {
    /// Render and preview without writing or committing
    pub dry_run: bool,

    /// Commit and force-push the rewritten changelog
    pub push: bool,
}

impl Default for ChangelogOptions {
    fn default() -> Self {
        ChangelogOptions {
            dry_run: false,
            push: true,
        }
    }
}

/// Result of a changelog run
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogOutcome {
    pub version: String,
    pub short_hash: String,
    pub entries: Vec<ChangelogEntry>,
    /// False in dry-run mode
    pub written: bool,
    /// True only when every housekeeping step succeeded
    pub pushed: bool,
    pub warnings: Vec<BoundaryWarning>,
}

/// File contents and recorded state checked before any repository access.
#[derive(Debug, Clone)]
pub struct ChangelogPlan {
    changelog_path: PathBuf,
    descriptor_name: String,
    changelog: String,
    version: String,
    previous: ChangelogHead,
}

impl ChangelogPlan {
    /// Reads the descriptor and changelog and applies the version guard.
    ///
    /// Nothing here touches version control, so a missing file or an
    /// unchanged version is reported before the repository is even opened.
    pub fn prepare(config: &Config) -> Result<Self> {
        let paths = &config.paths;
        require_files(&[paths.changelog.as_path(), paths.descriptor.as_path()])?;

        let descriptor = Descriptor::new(read_file(&paths.descriptor)?);
        let changelog = read_file(&paths.changelog)?;
        let previous = ChangelogHead::parse(&changelog)?;
        let version = descriptor.version().to_string();

        if version.is_empty() || version == previous.version {
            return Err(ValidationError::VersionUnchanged {
                descriptor: version,
                changelog: previous.version,
            }
            .into());
        }

        let descriptor_name = paths
            .descriptor
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| paths.descriptor.display().to_string());

        tracing::debug!(%version, previous = %previous.version, "changelog version guard passed");
        Ok(ChangelogPlan {
            changelog_path: paths.changelog.clone(),
            descriptor_name,
            changelog,
            version,
            previous,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn previous(&self) -> &ChangelogHead {
        &self.previous
    }

    /// Runs the repository guards, writes the new section and publishes it.
    pub fn execute<V: VersionControl + ?Sized>(
        self,
        config: &Config,
        vcs: &V,
        options: &ChangelogOptions,
    ) -> Result<ChangelogOutcome> {
        let expected = &config.repository.integration_branch;
        let branch = vcs.current_branch()?;
        if &branch != expected {
            return Err(ValidationError::BranchMismatch {
                expected: expected.clone(),
                actual: branch,
            }
            .into());
        }

        let head = short_hash(&vcs.head_short_hash()?).to_string();
        if head == self.previous.short_hash {
            return Err(ValidationError::NoNewCommits {
                last_commit: self.previous.short_hash,
                head,
            }
            .into());
        }

        let mut warnings = Vec::new();
        let mut log = Vec::new();
        for commit in vcs.messages_since(&self.previous.short_hash)? {
            if commit.message.trim_start_matches('"').starts_with(SENTINEL) {
                warnings.push(BoundaryWarning::SkippedGeneratedCommit { hash: commit.hash });
                continue;
            }
            log.push(commit.message);
        }

        let subjects: Vec<String> = log
            .iter()
            .map(|m| m.lines().next().unwrap_or_default().to_string())
            .collect();
        ui::display_commit_summary(&subjects, &branch);

        let entries = parse_commit_log(&log.join("\n"));
        if entries.is_empty() {
            warnings.push(BoundaryWarning::NoChangeNotes {
                since: self.previous.short_hash.clone(),
            });
        }

        let commit_url = config.repository.commit_url(&head);
        let section = Section {
            version: &self.version,
            short_hash: &head,
            commit_url: &commit_url,
            descriptor_name: &self.descriptor_name,
            entries: &entries,
        };

        for warning in &warnings {
            tracing::warn!(%warning, "changelog");
            ui::display_boundary_warning(warning);
        }

        if options.dry_run {
            ui::display_preview("Dry run: new changelog section", &section.render());
            return Ok(ChangelogOutcome {
                version: self.version,
                short_hash: head,
                entries,
                written: false,
                pushed: false,
                warnings,
            });
        }

        write_file(&self.changelog_path, &section.prepend_to(&self.changelog))?;
        ui::display_success(&format!(
            "Added version {} to {}",
            self.version,
            self.changelog_path.display()
        ));

        let pushed = if options.push {
            let failures = publish(config, vcs, &self.version);
            let clean = failures.is_empty();
            warnings.extend(failures);
            clean
        } else {
            false
        };

        Ok(ChangelogOutcome {
            version: self.version,
            short_hash: head,
            entries,
            written: true,
            pushed,
            warnings,
        })
    }
}

/// Prepares and executes changelog generation in one call.
pub fn run_changelog<V: VersionControl + ?Sized>(
    config: &Config,
    vcs: &V,
    options: &ChangelogOptions,
) -> Result<ChangelogOutcome> {
    ChangelogPlan::prepare(config)?.execute(config, vcs, options)
}

/// Commit message for the generated changelog; starts with the sentinel so
/// the next run leaves it out.
pub fn commit_message(version: &str) -> String {
    format!("{} Autogenerated Changelog for {}", SENTINEL, version)
}

/// Best-effort identity/stage/commit/push sequence.
///
/// Each step runs even if an earlier one failed. Failures come back as
/// warnings; the changelog file is already written and stays so.
fn publish<V: VersionControl + ?Sized>(
    config: &Config,
    vcs: &V,
    version: &str,
) -> Vec<BoundaryWarning> {
    let identity = Identity {
        name: config.bot.name.clone(),
        email: config.bot.email.clone(),
    };
    let message = commit_message(version);
    let remote = &config.repository.remote;

    let steps: [(&str, Result<()>); 4] = [
        ("config", vcs.set_identity(&identity)),
        ("add", vcs.stage_all()),
        ("commit", vcs.commit(&message)),
        ("push", vcs.push_force(remote)),
    ];

    let mut failures = Vec::new();
    for (step, result) in steps {
        if let Err(e) = result {
            let warning = BoundaryWarning::HousekeepingFailed {
                step: step.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!(%warning, "housekeeping");
            ui::display_boundary_warning(&warning);
            failures.push(warning);
        }
    }

    if failures.is_empty() {
        ui::display_success(&format!("Pushed changelog for {} to {}", version, remote));
    }
    failures
}
