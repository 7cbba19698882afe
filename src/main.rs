//! commitmate - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use commitmate::commit::{CommitFlags, CommitOutcome, run_commit};
use commitmate::config::{generate_config_template, load_config, write_config};
use commitmate::format::{Rustfmt, SourceFormatter};
use commitmate::git::{GitRepository, RepositoryHandle, select_remote_url};

/// Stage, format and commit with an author picked from the remote URL.
#[derive(Parser, Debug)]
#[command(name = "commitmate")]
#[command(about = "Stage, format and commit with an author picked from the remote URL")]
#[command(version)]
struct Cli {
    /// Author name for the commit
    #[arg(short = 'u', long, global = true)]
    username: Option<String>,

    /// Author email for the commit (preferred)
    #[arg(long, visible_alias = "email", global = true)]
    mailbox: Option<String>,

    /// Author email for the commit (fallback when --mailbox is unset)
    #[arg(short = 'e', long, global = true)]
    eddress: Option<String>,

    /// Commit message
    #[arg(short = 'm', long, global = true)]
    message: Option<String>,

    /// Amend the previous commit
    #[arg(short = 'a', long, global = true)]
    amend: bool,

    /// Amend even if the commit was already pushed
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Stage changes without committing
    #[arg(long, global = true)]
    no_commit: bool,

    /// Run rustfmt on changed Rust files before committing
    #[arg(long, global = true)]
    format: bool,

    /// Fill a missing author name/email from git config
    #[arg(long, global = true)]
    auto_sign: bool,

    /// Path to the commitmate configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the configuration and the signature resolved for this repository
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Print a configuration template for this repository (same as `config example`)
    #[command(name = "config-example")]
    ConfigExample(ExampleArgs),
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print a configuration template for this repository
    Example(ExampleArgs),
}

#[derive(Args, Debug)]
struct ExampleArgs {
    /// Write the template to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn commit_flags(&self) -> CommitFlags {
        CommitFlags {
            username: self.username.clone().unwrap_or_default(),
            mailbox: self.mailbox.clone().unwrap_or_default(),
            eddress: self.eddress.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
            amend: self.amend,
            force: self.force,
            no_commit: self.no_commit,
            format: self.format,
            auto_sign: self.auto_sign,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_root = std::env::current_dir().context("Failed to read current directory")?;
    debug!("Project root: {}", project_root.display());

    match &cli.command {
        None => commit(&cli, &project_root),
        Some(Command::Config { action: None }) => show_config(&cli, &project_root),
        Some(Command::Config {
            action: Some(ConfigAction::Example(args)),
        })
        | Some(Command::ConfigExample(args)) => preview_config_template(&project_root, args),
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the commit workflow.
fn commit(cli: &Cli, project_root: &Path) -> Result<()> {
    let repo = GitRepository::discover(project_root)
        .context("Not a git repository. Run commitmate from within a git repository.")?;

    let mut flags = cli.commit_flags();

    if let Some(config_path) = &cli.config {
        let config = load_config(config_path).context("Failed to load configuration")?;
        let signature = config
            .resolve_signature(&repo)
            .context("Failed to resolve signature from remotes")?;
        flags.apply_signature(signature);
    }

    for warning in flags.validate() {
        warn!("{}", warning);
    }

    let formatter = if flags.format {
        Some(Rustfmt::locate().context("Formatting requested but rustfmt is unavailable")?)
    } else {
        None
    };
    let formatter = formatter.as_ref().map(|f| f as &dyn SourceFormatter);

    let outcome = run_commit(&repo, formatter, &flags).context("Commit failed")?;

    match outcome {
        CommitOutcome::NoChanges => println!("No changes to commit."),
        CommitOutcome::StagedOnly => println!("Changes staged (no commit)."),
        CommitOutcome::Committed(oid) => println!("✓ Committed {}", short_id(oid)),
        CommitOutcome::Amended(oid) => println!("✓ Amended {}", short_id(oid)),
    }

    Ok(())
}

/// Show the loaded configuration, the resolved signature and the
/// effective flags.
fn show_config(cli: &Cli, project_root: &Path) -> Result<()> {
    let Some(config_path) = &cli.config else {
        bail!("Missing config path. Use -c/--config <PATH>.");
    };

    let config = load_config(config_path).context("Failed to load configuration")?;
    println!("Configuration ({}):", config_path.display());
    println!("{}", config.to_json_pretty()?);

    let repo = GitRepository::discover(project_root)
        .context("Not a git repository. Run commitmate from within a git repository.")?;
    let signature = config
        .resolve_signature(&repo)
        .context("Failed to resolve signature from remotes")?;

    match signature {
        Some(s) => println!(
            "\nResolved signature: {} ({} <{}>)",
            s.name,
            s.username,
            s.address()
        ),
        None => println!("\nResolved signature: none"),
    }

    let mut flags = cli.commit_flags();
    flags.apply_signature(signature);
    println!("\nEffective flags:");
    println!("{}", serde_json::to_string_pretty(&flags)?);

    Ok(())
}

/// Print (or write) a template built from the repository's remote.
fn preview_config_template(project_root: &Path, args: &ExampleArgs) -> Result<()> {
    let remote_url = current_remote_url(project_root);
    let template = generate_config_template(remote_url.as_deref());

    match &args.output {
        Some(path) => {
            write_config(path, &template).context("Failed to write configuration template")?;
            println!("✓ Wrote configuration template to {}", path.display());
        }
        None => {
            eprintln!("Generated configuration template:");
            println!("{}", template.to_json_pretty()?);
            eprintln!("Save this template to a file (e.g., commitmate.json) and pass it with -c.");
        }
    }

    Ok(())
}

/// Remote URL of the repository at `project_root`, if any.
fn current_remote_url(project_root: &Path) -> Option<String> {
    let repo = match GitRepository::discover(project_root) {
        Ok(repo) => repo,
        Err(e) => {
            debug!("No repository for template: {}", e);
            return None;
        }
    };

    match repo.list_remotes() {
        Ok(remotes) => select_remote_url(&remotes).map(str::to_string),
        Err(e) => {
            warn!("Could not read remotes: {}", e);
            None
        }
    }
}

fn short_id(oid: git2::Oid) -> String {
    oid.to_string().chars().take(7).collect()
}
