//! sl-s3: S3 SDK adapter for s3lens
//!
//! This crate implements the ObjectLister trait using aws-sdk-s3. It is
//! the only crate that directly depends on the AWS SDK.

pub mod client;

pub use client::S3Client;
