//! dblock command-line interface.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;

use dblock::reversal::{self, ReversalOutcome};
use dblock::{Config, HostsBlocker, logging, paths};

/// Block distracting domains through the hosts file, with timed undo.
#[derive(Parser, Debug)]
#[command(name = "dblock", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Minutes after which the operation is reversed (0 disables the timer)
    #[arg(
        short = 't',
        long,
        global = true,
        value_name = "MINUTES",
        default_value_t = 0
    )]
    timeout: u64,

    /// Path to the configuration file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enable blocking of the configured domains
    Enable,
    /// Disable blocking
    Disable,
    /// Show the current blocking status
    Status,
    /// List the configured domains and subdomains
    List,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init().context("failed to initialize logging")?;

    let result = run(cli).await;
    if let Err(ref e) = result {
        error!("{e:#}");
    }
    result
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => paths::config_file()?,
    };
    let config = Config::load(&config_path).with_context(|| {
        format!(
            "failed to load configuration from {}",
            config_path.display()
        )
    })?;

    if matches!(cli.command, Command::Enable | Command::Disable) && !paths::is_root() {
        bail!("Insufficient permissions. Please run the command with 'sudo'.");
    }

    match cli.command {
        Command::Enable => {
            let blocker = HostsBlocker::for_config(&config)?;
            blocker
                .enable(&config)
                .context("failed to enable blocking")?;
            println!("Blocking enabled.");

            if cli.timeout > 0 {
                println!("Blocking will be disabled in {} minutes.", cli.timeout);
                let outcome = reversal::race(
                    Duration::from_secs(cli.timeout * 60),
                    || blocker.disable(),
                    shutdown_signal(),
                )
                .await;
                report_reversal(outcome, "Blocking disabled after timeout.")?;
            }
        }
        Command::Disable => {
            let blocker = HostsBlocker::for_config(&config)?;
            blocker.disable().context("failed to disable blocking")?;
            println!("Blocking disabled.");

            if cli.timeout > 0 {
                println!("Blocking will be re-enabled in {} minutes.", cli.timeout);
                let outcome = reversal::race(
                    Duration::from_secs(cli.timeout * 60),
                    || blocker.enable(&config),
                    shutdown_signal(),
                )
                .await;
                report_reversal(outcome, "Blocking re-enabled after timeout.")?;
            }
        }
        Command::Status => {
            let blocker = HostsBlocker::for_config(&config)?;
            let status = blocker
                .status()
                .context("failed to read blocking status")?;
            println!("Blocking status: {status}");
        }
        Command::List => list_domains(&config),
    }

    Ok(())
}

fn report_reversal(outcome: ReversalOutcome, done_message: &str) -> Result<()> {
    match outcome {
        ReversalOutcome::Fired(Ok(())) => {
            println!("{done_message}");
            Ok(())
        }
        ReversalOutcome::Fired(Err(e)) => Err(e).context("timed reversal failed"),
        ReversalOutcome::Interrupted => {
            println!("\nInterrupted before the timeout elapsed. Exiting.");
            Ok(())
        }
    }
}

fn list_domains(config: &Config) {
    println!("Configured domains:");
    for domain in &config.domains {
        println!(" - {domain}");
    }
    println!("Configured subdomains:");
    for subdomain in &config.subdomains {
        println!(" - {subdomain}");
    }
}

/// Completes on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            // No SIGTERM listener; SIGINT alone still settles the race.
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupt signal received"),
        () = terminate => tracing::info!("terminate signal received"),
    }
}
