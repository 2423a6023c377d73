//! Integration tests for the sl CLI
//!
//! The config-store tests run hermetically against the built binary
//! with an isolated SL_CONFIG_DIR. Tests in `live_server` additionally
//! need a running S3-compatible server and are gated behind the
//! `integration` feature:
//!
//! ```bash
//! TEST_S3_ENDPOINT=http://localhost:9000 \
//! TEST_S3_ACCESS_KEY=accesskey \
//! TEST_S3_SECRET_KEY=secretkey \
//! TEST_S3_BUCKET=test-bucket \
//! cargo test -p s3lens-cli --features integration
//! ```

use std::path::Path;
use std::process::{Command, Output};

use anyhow::{Context, Result};
use tempfile::TempDir;

fn run_sl(args: &[&str], config_dir: &Path) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_sl"))
        .args(args)
        .env("SL_CONFIG_DIR", config_dir)
        .output()
        .context("failed to execute sl binary")
}

#[test]
fn test_endpoint_round_trip() -> Result<()> {
    let dir = TempDir::new()?;

    let out = run_sl(
        &[
            "endpoint",
            "set",
            "local",
            "http://localhost:9000",
            "accesskey",
            "supersecret",
        ],
        dir.path(),
    )?;
    assert!(
        out.status.success(),
        "endpoint set failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let out = run_sl(&["endpoint", "list", "--json"], dir.path())?;
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout)?;
    assert!(stdout.contains("\"local\""));
    assert!(stdout.contains("http://localhost:9000"));
    // Credentials must never appear in list output.
    assert!(!stdout.contains("supersecret"));

    let out = run_sl(&["endpoint", "remove", "local"], dir.path())?;
    assert!(out.status.success());

    // Removing again reports not-found.
    let out = run_sl(&["endpoint", "remove", "local"], dir.path())?;
    assert_eq!(out.status.code(), Some(5));

    Ok(())
}

#[test]
fn test_endpoint_set_rejects_bad_url() -> Result<()> {
    let dir = TempDir::new()?;

    let out = run_sl(
        &["endpoint", "set", "bad", "not a url", "key", "secret"],
        dir.path(),
    )?;
    assert_eq!(out.status.code(), Some(2));

    let out = run_sl(
        &["endpoint", "set", "bad", "ftp://host", "key", "secret"],
        dir.path(),
    )?;
    assert_eq!(out.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_analyse_rejects_malformed_target() -> Result<()> {
    let dir = TempDir::new()?;

    let out = run_sl(&["analyse", "noslash"], dir.path())?;
    assert_eq!(out.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_analyse_unknown_endpoint() -> Result<()> {
    let dir = TempDir::new()?;

    let out = run_sl(&["analyse", "nope/some-bucket"], dir.path())?;
    assert_eq!(out.status.code(), Some(5));

    Ok(())
}

#[test]
fn test_completions_generate() -> Result<()> {
    let dir = TempDir::new()?;

    let out = run_sl(&["completions", "bash"], dir.path())?;
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout)?.contains("sl"));

    Ok(())
}

#[cfg(feature = "integration")]
mod live_server {
    use super::*;

    /// S3 test configuration from the environment, or None to skip
    fn test_config() -> Option<(String, String, String, String)> {
        let endpoint = std::env::var("TEST_S3_ENDPOINT").ok()?;
        let access_key = std::env::var("TEST_S3_ACCESS_KEY").ok()?;
        let secret_key = std::env::var("TEST_S3_SECRET_KEY").ok()?;
        let bucket = std::env::var("TEST_S3_BUCKET").ok()?;
        Some((endpoint, access_key, secret_key, bucket))
    }

    fn setup(dir: &Path) -> Result<Option<String>> {
        let Some((endpoint, access_key, secret_key, bucket)) = test_config() else {
            eprintln!("TEST_S3_* not set; skipping live server test");
            return Ok(None);
        };

        let out = run_sl(
            &["endpoint", "set", "test", &endpoint, &access_key, &secret_key],
            dir,
        )?;
        anyhow::ensure!(
            out.status.success(),
            "endpoint set failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
        Ok(Some(bucket))
    }

    #[test]
    fn test_buckets_lists_configured_server() -> Result<()> {
        let dir = TempDir::new()?;
        let Some(_) = setup(dir.path())? else {
            return Ok(());
        };

        let out = run_sl(&["buckets", "test", "--json"], dir.path())?;
        assert!(
            out.status.success(),
            "{}",
            String::from_utf8_lossy(&out.stderr)
        );
        assert!(String::from_utf8(out.stdout)?.contains("buckets"));

        Ok(())
    }

    #[test]
    fn test_analyse_live_bucket() -> Result<()> {
        let dir = TempDir::new()?;
        let Some(bucket) = setup(dir.path())? else {
            return Ok(());
        };

        let out = run_sl(
            &["analyse", &format!("test/{bucket}"), "--json"],
            dir.path(),
        )?;
        assert!(
            out.status.success(),
            "{}",
            String::from_utf8_lossy(&out.stderr)
        );

        let stdout = String::from_utf8(out.stdout)?;
        assert!(stdout.contains("object_count"));
        assert!(stdout.contains("total_size"));

        Ok(())
    }

    #[test]
    fn test_analyse_missing_bucket_exit_code() -> Result<()> {
        let dir = TempDir::new()?;
        let Some(_) = setup(dir.path())? else {
            return Ok(());
        };

        let out = run_sl(
            &["analyse", "test/no-such-bucket-s3lens-test"],
            dir.path(),
        )?;
        assert_eq!(out.status.code(), Some(5));

        Ok(())
    }
}
