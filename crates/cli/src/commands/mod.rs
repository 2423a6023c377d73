//! CLI command definitions and execution
//!
//! All commands are thin collaborators around the sl-core analysis
//! engine: they parse arguments, resolve endpoint configuration, build
//! the storage client, and render results.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod analyse;
mod buckets;
mod completions;
mod endpoint;

/// sl - Bucket usage analyser for S3-compatible object storage
///
/// Enumerates every object in a bucket, reconstructs the folder
/// structure implied by key prefixes, and reports per-folder and
/// whole-bucket sizes.
#[derive(Parser, Debug)]
#[command(name = "sl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage storage endpoints
    #[command(subcommand)]
    Endpoint(endpoint::EndpointCommands),

    /// List buckets on an endpoint
    Buckets(buckets::BucketsArgs),

    /// Analyse folder sizes in a bucket
    Analyse(analyse::AnalyseArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Endpoint(cmd) => endpoint::execute(cmd, cli.json).await,
        Commands::Buckets(args) => buckets::execute(args, output_config).await,
        Commands::Analyse(args) => analyse::execute(args, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}
