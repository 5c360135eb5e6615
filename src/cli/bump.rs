use crate::cli::{read_file, require_files, write_file};
use crate::config::Config;
use crate::domain::{Descriptor, Manifest, ManifestUpdate};
use crate::error::{Result, ValidationError};
use crate::ui::{self, VersionPrompt};

/// Options for the version-bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOptions {
    /// Validate and preview without writing either file
    pub dry_run: bool,

    /// Value written to the manifest's LastUpdate (UTC epoch seconds)
    pub timestamp: i64,
}

impl BumpOptions {
    /// Options stamped with the current UTC time.
    pub fn now(dry_run: bool) -> Self {
        BumpOptions {
            dry_run,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Result of a successful version bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    /// Version the descriptor carried before the bump
    pub previous: String,

    /// Version now written to both files
    pub version: String,

    /// False in dry-run mode
    pub written: bool,
}

/// Bumps the descriptor's four version fields and the manifest record.
///
/// Both files are read and every check (empty input, unchanged descriptor,
/// unchanged manifest) runs before the first write, so a rejected bump
/// leaves both files as they were.
pub fn run_version_bump(
    config: &Config,
    prompt: &dyn VersionPrompt,
    options: &BumpOptions,
) -> Result<BumpOutcome> {
    let paths = &config.paths;
    require_files(&[paths.descriptor.as_path(), paths.manifest.as_path()])?;

    ui::display_status(&format!("Opening {}", paths.descriptor.display()));
    let descriptor = Descriptor::new(read_file(&paths.descriptor)?);
    let mut manifest = Manifest::parse(&read_file(&paths.manifest)?)?;

    let previous = descriptor.current_version()?.to_string();
    let version = prompt.ask_version(&previous)?;

    if version.is_empty() {
        return Err(ValidationError::EmptyVersion.into());
    }
    if version == previous {
        return Err(ValidationError::DescriptorUnchanged { version }.into());
    }

    manifest.apply(&ManifestUpdate {
        version: version.clone(),
        last_update: options.timestamp,
        download_link: config.repository.download_link_for(&version),
    })?;

    let bumped = descriptor.with_version(&version);
    let manifest_json = manifest.to_json()?;
    ui::display_proposed_version(&previous, &version);

    if options.dry_run {
        ui::display_preview(
            &format!("Dry run: {} would become", paths.manifest.display()),
            &manifest_json,
        );
        return Ok(BumpOutcome {
            previous,
            version,
            written: false,
        });
    }

    write_file(&paths.descriptor, bumped.as_str())?;
    ui::display_success(&format!(
        "Updated {} Version: {}",
        paths.descriptor.display(),
        version
    ));

    write_file(&paths.manifest, &manifest_json)?;
    ui::display_success(&format!(
        "Updated {} Version: {}",
        paths.manifest.display(),
        version
    ));

    tracing::info!(%previous, %version, "version bumped");
    Ok(BumpOutcome {
        previous,
        version,
        written: true,
    })
}
