//! Decodes flat path buckets and builds the vertex table.

use std::collections::HashMap;

use funnel_error::Result;

use crate::codec::NameCodec;
use crate::config::BucketOrder;
use crate::model::{FlatPath, GraphNode};
use crate::summary::{PathSummary, ordered};

/// One decoded traversal and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSequence {
    pub nodes: Vec<String>,
    pub count: i64,
}

/// Result of path aggregation.
///
/// The vertex table is keyed by decoded name: lookup and storage use the
/// same key, and ids are handed out in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    paths: Vec<FlatPath>,
    sequences: Vec<PathSequence>,
    vertices: Vec<GraphNode>,
    index: HashMap<String, usize>,
}

impl PathTable {
    /// Flat paths in scan order, keys still encoded.
    pub fn paths(&self) -> &[FlatPath] {
        &self.paths
    }

    pub fn sequences(&self) -> &[PathSequence] {
        &self.sequences
    }

    /// Vertices in first-seen order; position equals id.
    pub fn vertices(&self) -> &[GraphNode] {
        &self.vertices
    }

    pub fn into_parts(self) -> (Vec<FlatPath>, Vec<PathSequence>, Vec<GraphNode>) {
        (self.paths, self.sequences, self.vertices)
    }

    fn intern(&mut self, name: &str) {
        if self.index.contains_key(name) {
            return;
        }
        let id = self.vertices.len();
        self.index.insert(name.to_string(), id);
        self.vertices.push(GraphNode::new(id, name));
    }
}

/// Converts `(encodedPath, count)` buckets into a [`PathTable`].
#[derive(Debug, Clone, Copy)]
pub struct PathAggregator<'c> {
    codec: &'c NameCodec,
    order: BucketOrder,
}

impl<'c> PathAggregator<'c> {
    pub fn new(codec: &'c NameCodec) -> Self {
        Self {
            codec,
            order: BucketOrder::AsReceived,
        }
    }

    pub fn with_order(mut self, order: BucketOrder) -> Self {
        self.order = order;
        self
    }

    pub fn aggregate(&self, summary: &PathSummary) -> Result<PathTable> {
        let mut table = PathTable::default();
        for bucket in ordered(&summary.buckets, self.order) {
            let nodes = self.codec.decode_path(&bucket.key)?;
            for name in &nodes {
                table.intern(name);
            }
            table.paths.push(FlatPath {
                path: bucket.key.clone(),
                count: bucket.doc_count,
            });
            table.sequences.push(PathSequence {
                nodes,
                count: bucket.doc_count,
            });
        }
        tracing::debug!(
            paths = table.paths.len(),
            vertices = table.vertices.len(),
            "aggregated paths"
        );
        Ok(table)
    }
}
