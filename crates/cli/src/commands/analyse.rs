//! analyse command - Folder size breakdown of a bucket
//!
//! Runs the sl-core analysis engine against one bucket and renders the
//! folder tree with cumulative sizes, largest first.

use clap::Args;
use humansize::{format_size, BINARY};
use serde::Serialize;
use sl_core::{analyse, ConfigManager, PrefixNode};
use sl_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Analyse folder sizes in a bucket
#[derive(Args, Debug)]
pub struct AnalyseArgs {
    /// Target path (endpoint/bucket)
    pub target: String,

    /// Limit displayed folder depth (human output only)
    #[arg(long)]
    pub depth: Option<usize>,
}

/// Output structure for the analyse command (JSON format)
#[derive(Debug, Serialize)]
struct AnalyseOutput<'a> {
    bucket: &'a str,
    object_count: u64,
    total_size: u64,
    total_size_human: String,
    folders: &'a PrefixNode,
}

/// Execute the analyse command
pub async fn execute(args: AnalyseArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let (endpoint_name, bucket) = match parse_analyse_path(&args.target) {
        Ok(parsed) => parsed,
        Err(e) => {
            formatter.error(&e);
            return ExitCode::UsageError;
        }
    };

    let manager = match ConfigManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let endpoint = match manager.endpoint(&endpoint_name) {
        Ok(e) => e,
        Err(_) => {
            formatter.error(&format!("Endpoint '{endpoint_name}' not found"));
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

    let spinner = Spinner::new(&output_config, &format!("Analysing '{bucket}'..."));
    let result = analyse(&client, &bucket).await;
    spinner.finish_and_clear();

    match result {
        Ok(analysis) => {
            tracing::debug!(
                bucket = %bucket,
                objects = analysis.object_count,
                total_size = analysis.total_size,
                "analysis complete"
            );
            if formatter.is_json() {
                let output = AnalyseOutput {
                    bucket: &bucket,
                    object_count: analysis.object_count,
                    total_size: analysis.total_size,
                    total_size_human: format_size(analysis.total_size, BINARY),
                    folders: &analysis.root,
                };
                formatter.json(&output);
            } else {
                formatter.println(&format!(
                    "{}: {} objects, {}",
                    bucket,
                    analysis.object_count,
                    format_size(analysis.total_size, BINARY)
                ));
                for line in render_tree(&analysis.root, args.depth) {
                    formatter.println(&line);
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

/// Parse analyse target path into (endpoint, bucket)
fn parse_analyse_path(path: &str) -> Result<(String, String), String> {
    let path = path.trim_end_matches('/');

    if path.is_empty() {
        return Err("Path cannot be empty".to_string());
    }

    let parts: Vec<&str> = path.splitn(2, '/').collect();

    if parts.len() != 2 || parts[1].is_empty() {
        return Err(format!(
            "Invalid path format: '{path}'. Expected: endpoint/bucket"
        ));
    }

    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Render the folder tree as indented lines, one folder per line.
///
/// Siblings are ordered by descending size, then name, so the heaviest
/// folders surface first. `depth` limits how many levels are shown.
fn render_tree(root: &PrefixNode, depth: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    render_children(root, 0, depth, &mut lines);
    lines
}

fn render_children(node: &PrefixNode, level: usize, depth: Option<usize>, lines: &mut Vec<String>) {
    let mut entries: Vec<(&String, &PrefixNode)> = node.children.iter().collect();
    entries.sort_by(|a, b| b.1.size.cmp(&a.1.size).then_with(|| a.0.cmp(b.0)));

    for (name, child) in entries {
        lines.push(format!(
            "{:>10}  {}{}/",
            format_size(child.size, BINARY),
            "  ".repeat(level),
            name
        ));
        if depth.map_or(true, |d| level + 1 < d) {
            render_children(child, level + 1, depth, lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_core::{aggregate, ObjectDescriptor};

    fn sample_analysis() -> sl_core::BucketAnalysis {
        aggregate(&[
            ObjectDescriptor::new("a/b/c.txt", 100),
            ObjectDescriptor::new("a/d.txt", 50),
            ObjectDescriptor::new("a/b/e.txt", 25),
            ObjectDescriptor::new("z/f.txt", 200),
            ObjectDescriptor::new("readme.txt", 10),
        ])
    }

    #[test]
    fn test_parse_analyse_path_valid() {
        let (endpoint, bucket) = parse_analyse_path("minio/photos").unwrap();
        assert_eq!(endpoint, "minio");
        assert_eq!(bucket, "photos");
    }

    #[test]
    fn test_parse_analyse_path_trailing_slash() {
        let (endpoint, bucket) = parse_analyse_path("minio/photos/").unwrap();
        assert_eq!(endpoint, "minio");
        assert_eq!(bucket, "photos");
    }

    #[test]
    fn test_parse_analyse_path_invalid() {
        assert!(parse_analyse_path("").is_err());
        assert!(parse_analyse_path("minio").is_err());
        assert!(parse_analyse_path("minio/").is_err());
    }

    #[test]
    fn test_render_tree_orders_by_size() {
        let analysis = sample_analysis();
        let lines = render_tree(&analysis.root, None);

        assert_eq!(
            lines,
            vec![
                "     200 B  z/",
                "     175 B  a/",
                "     125 B    b/",
            ]
        );
    }

    #[test]
    fn test_render_tree_depth_limit() {
        let analysis = sample_analysis();
        let lines = render_tree(&analysis.root, Some(1));

        assert_eq!(lines, vec!["     200 B  z/", "     175 B  a/"]);
    }

    #[test]
    fn test_render_tree_empty() {
        let analysis = aggregate(&[]);
        assert!(render_tree(&analysis.root, None).is_empty());
    }
}
