//! Endpoint management commands
//!
//! Endpoints are named references to S3-compatible storage services,
//! including connection details and credentials, stored in the s3lens
//! configuration file.

use clap::Subcommand;
use serde::Serialize;
use sl_core::{ConfigManager, Endpoint};

use crate::exit_code::ExitCode;

/// Endpoint subcommands for managing storage service connections
#[derive(Subcommand, Debug)]
pub enum EndpointCommands {
    /// Add or update an endpoint
    Set(SetArgs),

    /// List all configured endpoints
    List(ListArgs),

    /// Remove an endpoint
    Remove(RemoveArgs),
}

/// Arguments for the `endpoint set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Endpoint name (e.g., "local", "s3", "minio")
    pub name: String,

    /// Endpoint URL (e.g., "http://localhost:9000", "https://s3.amazonaws.com")
    pub url: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Region (default: us-east-1)
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Bucket addressing style: path or virtual (default: path)
    #[arg(long, default_value = "path")]
    pub addressing: String,
}

/// Arguments for the `endpoint list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show full details including URLs
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `endpoint remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the endpoint to remove
    pub name: String,
}

/// JSON output for endpoint list
#[derive(Serialize)]
struct EndpointListOutput {
    endpoints: Vec<EndpointInfo>,
}

/// Endpoint information for JSON output (without credentials)
#[derive(Serialize)]
struct EndpointInfo {
    name: String,
    url: String,
    region: String,
    path_style: bool,
}

impl From<&Endpoint> for EndpointInfo {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            region: endpoint.region.clone(),
            path_style: endpoint.path_style,
        }
    }
}

/// JSON output for endpoint set/remove operations
#[derive(Serialize)]
struct EndpointOperationOutput {
    success: bool,
    endpoint: String,
    message: String,
}

fn print_error(message: &str, json_output: bool) {
    if json_output {
        eprintln!("{}", serde_json::json!({"error": message}));
    } else {
        eprintln!("Error: {message}");
    }
}

/// Execute an endpoint subcommand
pub async fn execute(cmd: EndpointCommands, json_output: bool) -> ExitCode {
    let manager = match ConfigManager::new() {
        Ok(m) => m,
        Err(e) => {
            print_error(&e.to_string(), json_output);
            return ExitCode::GeneralError;
        }
    };

    match cmd {
        EndpointCommands::Set(args) => execute_set(args, &manager, json_output),
        EndpointCommands::List(args) => execute_list(args, &manager, json_output),
        EndpointCommands::Remove(args) => execute_remove(args, &manager, json_output),
    }
}

fn execute_set(args: SetArgs, manager: &ConfigManager, json_output: bool) -> ExitCode {
    if args.addressing != "path" && args.addressing != "virtual" {
        print_error("Addressing must be 'path' or 'virtual'", json_output);
        return ExitCode::UsageError;
    }

    let mut endpoint = Endpoint::new(&args.name, &args.url, &args.access_key, &args.secret_key);
    endpoint.region = args.region;
    endpoint.path_style = args.addressing == "path";

    match manager.set_endpoint(endpoint) {
        Ok(()) => {
            if json_output {
                let output = EndpointOperationOutput {
                    success: true,
                    endpoint: args.name.clone(),
                    message: format!("Endpoint '{}' configured successfully", args.name),
                };
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else {
                println!("Endpoint '{}' configured successfully.", args.name);
            }
            ExitCode::Success
        }
        Err(e @ (sl_core::Error::Config(_) | sl_core::Error::InvalidUrl(_))) => {
            print_error(&e.to_string(), json_output);
            ExitCode::UsageError
        }
        Err(e) => {
            print_error(&e.to_string(), json_output);
            ExitCode::GeneralError
        }
    }
}

fn execute_list(args: ListArgs, manager: &ConfigManager, json_output: bool) -> ExitCode {
    match manager.endpoints() {
        Ok(endpoints) => {
            if json_output {
                let output = EndpointListOutput {
                    endpoints: endpoints.iter().map(EndpointInfo::from).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else if endpoints.is_empty() {
                println!("No endpoints configured.");
            } else if args.long {
                for endpoint in &endpoints {
                    println!(
                        "{:<12} {} (region: {}, addressing: {})",
                        endpoint.name,
                        endpoint.url,
                        endpoint.region,
                        if endpoint.path_style { "path" } else { "virtual" }
                    );
                }
            } else {
                for endpoint in &endpoints {
                    println!("{:<12} {}", endpoint.name, endpoint.url);
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            print_error(&e.to_string(), json_output);
            ExitCode::GeneralError
        }
    }
}

fn execute_remove(args: RemoveArgs, manager: &ConfigManager, json_output: bool) -> ExitCode {
    match manager.remove_endpoint(&args.name) {
        Ok(()) => {
            if json_output {
                let output = EndpointOperationOutput {
                    success: true,
                    endpoint: args.name.clone(),
                    message: format!("Endpoint '{}' removed successfully", args.name),
                };
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else {
                println!("Endpoint '{}' removed successfully.", args.name);
            }
            ExitCode::Success
        }
        Err(sl_core::Error::EndpointNotFound(_)) => {
            print_error(&format!("Endpoint '{}' not found", args.name), json_output);
            ExitCode::NotFound
        }
        Err(e) => {
            print_error(&e.to_string(), json_output);
            ExitCode::GeneralError
        }
    }
}
