//! Bucket analysis engine
//!
//! Consumes a fully materialized object set and builds the folder tree
//! implied by `/`-delimited key prefixes, rolling descendant sizes up
//! into every ancestor. This is the pure half of the pipeline: no I/O,
//! no suspension, and it cannot fail on any well-formed input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::lister::list_all_objects;
use crate::traits::{ObjectDescriptor, ObjectLister};

/// One node of the folder tree, keyed by path segment.
///
/// `size` is the sum of the sizes of every object whose key has this
/// node's path as a prefix, direct children and deeper descendants
/// alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrefixNode {
    /// Cumulative size in bytes of everything under this prefix
    pub size: u64,

    /// Child folders by segment name
    pub children: BTreeMap<String, PrefixNode>,
}

impl PrefixNode {
    /// Look up an immediate child by segment name.
    pub fn child(&self, name: &str) -> Option<&PrefixNode> {
        self.children.get(name)
    }

    /// Whether this node has no child folders.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Result of analysing one bucket: the folder tree plus whole-bucket
/// totals. Constructed fresh per analysis and never cached here.
#[derive(Debug, Clone, Serialize)]
pub struct BucketAnalysis {
    /// Root of the folder tree; represents the bucket itself
    pub root: PrefixNode,

    /// Number of objects in the bucket, including keys with no `/`
    pub object_count: u64,

    /// Sum of all object sizes in bytes
    pub total_size: u64,
}

/// Aggregate an object set into a folder tree and totals.
///
/// Every object counts toward `object_count` and `total_size`, but only
/// keys containing a `/` are inserted into the tree: a key with no
/// separator lives at the bucket root and belongs to no folder. Keys
/// are split on `/` and the final segment (the leaf name) dropped, so a
/// trailing-slash folder-marker key falls out of the same rule with no
/// special case. The result is independent of input order.
///
/// A negative size, which conforming backends never report, is treated
/// as zero.
pub fn aggregate(objects: &[ObjectDescriptor]) -> BucketAnalysis {
    let mut root = PrefixNode::default();
    let mut object_count: u64 = 0;
    let mut total_size: u64 = 0;

    for object in objects {
        object_count += 1;
        let size = object.size.max(0) as u64;
        total_size += size;

        if !object.key.contains('/') {
            continue;
        }

        let segments: Vec<&str> = object.key.split('/').collect();
        let mut node = &mut root;
        for segment in &segments[..segments.len() - 1] {
            node = node.children.entry((*segment).to_string()).or_default();
            node.size += size;
        }
    }

    // The root rollup counts only objects that live inside a folder.
    root.size = root.children.values().map(|child| child.size).sum();

    BucketAnalysis {
        root,
        object_count,
        total_size,
    }
}

/// Analyse one bucket: enumerate every object, then aggregate.
///
/// The single operation the engine exposes to collaborators. Each call
/// is a pure function of the bucket's listing at call time; a listing
/// failure aborts the analysis with no partial result.
pub async fn analyse(lister: &dyn ObjectLister, bucket: &str) -> Result<BucketAnalysis> {
    let objects = list_all_objects(lister, bucket).await?;
    Ok(aggregate(&objects))
}
