//! sl-core: Bucket analysis engine for s3lens
//!
//! This crate provides the core functionality for the sl CLI:
//! - Exhaustive, paginated object enumeration over the ObjectLister trait
//! - Prefix-tree aggregation of per-folder and whole-bucket sizes
//! - Endpoint configuration management
//!
//! The crate is independent of any specific S3 SDK: backends plug in by
//! implementing [`ObjectLister`], which also keeps the pagination and
//! aggregation logic testable without a network.

pub mod analysis;
pub mod config;
pub mod error;
pub mod lister;
pub mod traits;

pub use analysis::{aggregate, analyse, BucketAnalysis, PrefixNode};
pub use config::{Config, ConfigManager, Endpoint};
pub use error::{Error, Result};
pub use lister::list_all_objects;
pub use traits::{BucketInfo, ObjectDescriptor, ObjectLister, ObjectPage};
