use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tpie_release::cli::bump::{run_version_bump, BumpOptions};
use tpie_release::cli::changelog::{ChangelogOptions, ChangelogPlan};
use tpie_release::config;
use tpie_release::git::Git2Repository;
use tpie_release::ui::{self, ConsolePrompt, FixedVersion, VersionPrompt};
use tpie_release::{logging, ReleaseError};

#[derive(Parser)]
#[command(
    name = "tpie-release",
    version,
    about = "Bump plugin versions and generate the changelog from git history"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Preview what would happen without making changes"
    )]
    dry_run: bool,

    #[arg(short, long, global = true, help = "Show debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set a new version in the project descriptor and plugin manifest
    Bump {
        #[arg(long, value_name = "VERSION", help = "Use this version instead of prompting")]
        set: Option<String>,
    },
    /// Prepend a changelog section built from commits since the last one
    Changelog {
        #[arg(long, help = "Write the changelog but skip commit and push")]
        no_push: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: Args) -> std::result::Result<(), ReleaseError> {
    let config = config::load_config(args.config.as_deref())?;

    match args.command {
        Command::Bump { set } => {
            let prompt: Box<dyn VersionPrompt> = match set {
                Some(version) => Box::new(FixedVersion(version)),
                None => Box::new(ConsolePrompt::new()),
            };
            let outcome =
                run_version_bump(&config, prompt.as_ref(), &BumpOptions::now(args.dry_run))?;
            if !outcome.written {
                ui::display_status("Dry run: no files were changed");
            }
        }
        Command::Changelog { no_push } => {
            let plan = ChangelogPlan::prepare(&config)?;
            ui::display_status(&format!(
                "Generating changelog for {} (previous: {})",
                plan.version(),
                plan.previous().version
            ));

            let repo = Git2Repository::open(".")?;
            let options = ChangelogOptions {
                dry_run: args.dry_run,
                push: !no_push,
            };
            let outcome = plan.execute(&config, &repo, &options)?;

            if !outcome.written {
                ui::display_status("Dry run: changelog was not changed");
            } else if !outcome.pushed && !no_push {
                ui::display_status("Changelog written locally; commit and push it manually");
            }
        }
    }

    Ok(())
}
