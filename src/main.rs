//! vcs-git - structured views of a git repository
//!
//! Binary entry point: runs one query against a working copy and prints the
//! parsed result.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vcs_git::model::CommitLog;
use vcs_git::{CommitQuery, GitClient, GitRepository, Repository};

#[derive(Parser)]
#[command(name = "vcs-git")]
#[command(about = "Query a git working copy through the git command line", long_about = None)]
struct Cli {
    /// Working copy to operate on
    #[arg(short = 'C', long, default_value = ".", global = true)]
    repo: PathBuf,

    /// git binary to run
    #[arg(long, default_value = "git", global = true)]
    git: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List commits with their created and deleted files
    Log {
        /// Only commits touching this path
        path: Option<String>,
        /// Maximum number of commits
        #[arg(short = 'n', long)]
        number: Option<usize>,
        /// Exclusive lower bound of the range
        #[arg(long)]
        since: Option<String>,
        /// Inclusive upper bound of the range
        #[arg(long)]
        until: Option<String>,
    },
    /// Show a single commit
    Show { revision: String },
    /// List a branch with the last commit of every entry
    Tree {
        #[arg(default_value = "HEAD")]
        branch: String,
        path: Option<String>,
        #[arg(short, long)]
        recursive: bool,
    },
    /// List remote branches of origin
    Branches,
    /// Print the current branch
    Branch,
    /// Print the latest revision
    Revision,
    /// Print short status
    Status,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut repo = GitRepository::new(
        GitClient::default().with_binary(cli.git),
        vcs_git::system::LiveFileSystem,
    );
    repo.set_working_copy(&cli.repo)?;

    match cli.command {
        Some(Commands::Log {
            path,
            number,
            since,
            until,
        }) => {
            let commits = repo.commits(&CommitQuery {
                path,
                number,
                since,
                until,
            })?;
            for commit in commits.values() {
                print_commit(commit);
            }
        }
        Some(Commands::Show { revision }) => match repo.commit_log(&revision)? {
            Some(commit) => print_commit(&commit),
            None => eprintln!("no commit found for {revision}"),
        },
        Some(Commands::Tree {
            branch,
            path,
            recursive,
        }) => {
            for entry in repo.tree(&branch, path.as_deref(), recursive)?.values() {
                let suffix = if entry.is_directory() { "/" } else { "" };
                let last = entry
                    .commit
                    .as_ref()
                    .map(|c| format!("{} {}", c.friendly_revision(), c.date.trim()))
                    .unwrap_or_default();
                println!(
                    "{} {:>8}  {}{}  {}",
                    entry.friendly_revision(),
                    entry.size,
                    entry.path,
                    suffix,
                    last
                );
            }
        }
        Some(Commands::Branches) => {
            for name in repo.branches()?.keys() {
                println!("{name}");
            }
        }
        Some(Commands::Branch) => println!("{}", repo.branch()?),
        Some(Commands::Revision) => {
            if let Some(revision) = repo.revision()? {
                println!("{revision}");
            }
        }
        Some(Commands::Status) | None => {
            for line in repo.status()? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn print_commit(commit: &CommitLog) {
    println!("{} {}", commit.friendly_revision(), commit.author);
    println!("    {}", commit.date.trim());
    for line in commit.message.lines() {
        println!("    {}", line.trim_start());
    }
    for file in commit.files.values() {
        println!("    {} mode {} {}", file.action, file.mode, file.path);
    }
    println!();
}
