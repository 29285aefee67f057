//! # tap-auth CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tap_auth_cli::config::CliConfig;
use tap_auth_cli::keys::{run_keygen, KeygenArgs};
use tap_auth_cli::operation::{run_auth, run_redeem, AuthArgs, RedeemArgs};
use tap_auth_cli::verify::{run_verify, VerifyArgs};

/// TAP token-auth authority toolchain.
///
/// Generates secp256k1 authority keys, signs auth and redeem operations,
/// and verifies published operation records.
#[derive(Parser, Debug)]
#[command(name = "tap-auth", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a secp256k1 authority key pair.
    Keygen(KeygenArgs),

    /// Sign an auth operation for the given tickers.
    Auth(AuthArgs),

    /// Sign a redeem operation from a payload file.
    Redeem(RedeemArgs),

    /// Verify an operation record against a public key.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("tap-auth CLI starting");

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Keygen(args) => run_keygen(args),
        Commands::Auth(args) => run_auth(args, &config),
        Commands::Redeem(args) => run_redeem(args, &config),
        Commands::Verify(args) => run_verify(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
