mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use sync_core::config::{SandboxEnv, Verbosity};

#[derive(Parser)]
#[command(
    name = "secret-sync",
    about = "Check that AI-denied secret files are also hidden from the sandbox container",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root the sandbox mounts
    #[arg(long, global = true, env = "WORKSPACE", default_value = "/workspace")]
    workspace: PathBuf,

    /// Sandbox environment (selects which compose file to audit)
    #[arg(long, global = true, env = "SANDBOX_ENV", default_value = "default")]
    sandbox_env: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit AI-denied files against the container definition
    Check {
        /// Only report missing files
        #[arg(long, conflicts_with = "summary")]
        quiet: bool,

        /// One-line compliance summary
        #[arg(long)]
        summary: bool,
    },

    /// Poll GitHub for a newer sandbox template release
    UpdateCheck {
        /// GitHub repository to poll (owner/name)
        #[arg(long, default_value = cmd::update::DEFAULT_TEMPLATE_REPO)]
        repo: String,

        /// Poll even if the last check was recent
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Unrecognized environment values warn and fall back; the tool never
    // signals failure through its exit status.
    let sandbox_env = SandboxEnv::from_str(&cli.sandbox_env).unwrap_or_else(|err| {
        tracing::warn!("{err}; checking the default compose file");
        SandboxEnv::Default
    });
    match cli.command {
        Commands::Check { quiet, summary } => {
            let verbosity = resolve_verbosity(quiet, summary);
            cmd::check::run(&cli.workspace, sandbox_env, verbosity)
        }
        Commands::UpdateCheck { repo, force } => cmd::update::run(&cli.workspace, &repo, force),
    }
}

/// Flags win over the SECRET_SYNC_OUTPUT environment variable; the default
/// is the full verbose report. An unrecognized mode warns and falls back.
fn resolve_verbosity(quiet: bool, summary: bool) -> Verbosity {
    if quiet {
        return Verbosity::Quiet;
    }
    if summary {
        return Verbosity::Summary;
    }
    match std::env::var("SECRET_SYNC_OUTPUT") {
        Ok(mode) => Verbosity::from_str(&mode).unwrap_or_else(|err| {
            tracing::warn!("{err}; using verbose output");
            Verbosity::Verbose
        }),
        Err(_) => Verbosity::Verbose,
    }
}
