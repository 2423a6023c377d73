//! buckets command - List buckets on an endpoint
//!
//! Thin passthrough over the bucket-listing capability of the storage
//! backend; no analysis happens here.

use clap::Args;
use comfy_table::Table;
use serde::Serialize;
use sl_core::{BucketInfo, ConfigManager, ObjectLister as _};
use sl_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List buckets on an endpoint
#[derive(Args, Debug)]
pub struct BucketsArgs {
    /// Endpoint name
    pub endpoint: String,
}

/// Output structure for the buckets command (JSON format)
#[derive(Debug, Serialize)]
struct BucketsOutput {
    buckets: Vec<BucketInfo>,
}

/// Execute the buckets command
pub async fn execute(args: BucketsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ConfigManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let endpoint = match manager.endpoint(&args.endpoint) {
        Ok(e) => e,
        Err(_) => {
            formatter.error(&format!("Endpoint '{}' not found", args.endpoint));
            return ExitCode::NotFound;
        }
    };

    let client = match S3Client::new(&endpoint).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::NetworkError;
        }
    };

    match client.list_buckets().await {
        Ok(buckets) => {
            if formatter.is_json() {
                formatter.json(&BucketsOutput { buckets });
            } else if buckets.is_empty() {
                formatter.println("No buckets.");
            } else {
                let mut table = Table::new();
                table.set_header(vec!["NAME", "CREATED"]);
                for bucket in &buckets {
                    let created = bucket
                        .created
                        .map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    table.add_row(vec![bucket.name.clone(), created]);
                }
                formatter.println(&table.to_string());
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list buckets: {e}"));
            ExitCode::from(&e)
        }
    }
}
