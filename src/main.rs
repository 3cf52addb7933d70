use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use git_release::cli::{run_last_release, run_verify};
use git_release::config::{self, Config};
use git_release::git::Git2Repository;
use git_release::{ui, ReleaseError};

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Validate release branches and find the last release of a branch"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Print debug output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the tag format and the branch configuration
    Verify,

    /// Show the last release of a configured branch
    LastRelease {
        #[arg(short, long, help = "Branch to inspect")]
        branch: String,

        #[arg(long, help = "Only consider versions lower than this one")]
        before: Option<String>,
    },

    /// Show configured branches
    List,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Verify => verify(&config),
        Command::LastRelease { branch, before } => show_last_release(&config, &branch, before),
        Command::List => list_configured_branches(&config),
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn open_repository() -> Git2Repository {
    match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    }
}

fn verify(config: &Config) -> Result<()> {
    let repo = open_repository();

    match run_verify(config, &repo) {
        Ok(branches) => {
            ui::display_branches(&branches);
            ui::display_success("Branch configuration is valid");
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn show_last_release(config: &Config, branch: &str, before: Option<String>) -> Result<()> {
    let repo = open_repository();

    match run_last_release(config, &repo, branch, before.as_deref()) {
        Ok(report) => {
            ui::display_last_release(&report.branch.name, report.last_release.as_ref());
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn list_configured_branches(config: &Config) -> Result<()> {
    let branches = config.branch_names();

    if branches.is_empty() {
        ui::display_error("No branches configured in gitrelease.toml");
        std::process::exit(1);
    }

    ui::display_available_branches(&branches);
    Ok(())
}

fn exit_with(error: ReleaseError) -> ! {
    match error {
        ReleaseError::Branches(errors) => ui::display_branch_errors(&errors),
        other => ui::display_error(&other.to_string()),
    }
    std::process::exit(1);
}
