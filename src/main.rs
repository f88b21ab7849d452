use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_scope::config;
use git_scope::git::Git2Repository;
use git_scope::{find_tags, resolve_commits, ui};

#[derive(Parser)]
#[command(
    name = "git-scope",
    version,
    about = "List the commits and release tags that belong to one package of a monorepo"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Log git queries to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Commits touching a directory since the last release
    Commits {
        #[arg(help = "Package directory, relative to --cwd")]
        dir: PathBuf,

        #[arg(long, default_value = ".", help = "Working directory inside the repository")]
        cwd: PathBuf,

        #[arg(long, help = "Full hash of the last release commit (exclusive)")]
        since: Option<String>,

        #[arg(long, help = "Only follow first-parent links into this branch")]
        first_parent: Option<String>,
    },
    /// Tags merged into a branch
    Tags {
        #[arg(short, long, help = "Branch to inspect (defaults to config)")]
        branch: Option<String>,

        #[arg(short, long = "filter", help = "Substring every tag must contain (repeatable)")]
        filters: Vec<String>,

        #[arg(long, default_value = ".", help = "Working directory inside the repository")]
        cwd: PathBuf,
    },
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    match args.command {
        Command::Commits {
            dir,
            cwd,
            since,
            first_parent,
        } => {
            let git = Git2Repository::open(&cwd)?;
            let first_parent = first_parent.or(config.first_parent_branch);

            let commits = resolve_commits(
                &git,
                &cwd,
                &dir,
                since.as_deref(),
                first_parent.as_deref(),
            )?;

            ui::display_commits(&commits, &dir.display().to_string());
        }
        Command::Tags {
            branch,
            filters,
            cwd,
        } => {
            let git = Git2Repository::open(&cwd)?;
            let branch = branch.unwrap_or(config.branch);
            let filters = if filters.is_empty() {
                config.tags.filters
            } else {
                filters
            };

            let tags = find_tags(&git, &branch, &filters)?;
            ui::display_tags(&tags, &branch);
        }
    }

    Ok(())
}
