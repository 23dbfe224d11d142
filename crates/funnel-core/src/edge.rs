//! Flattens the nested from/to summary into weighted edges.

use funnel_error::Result;

use crate::codec::NameCodec;
use crate::config::BucketOrder;
use crate::model::GraphEdge;
use crate::summary::{EdgeSummary, ordered};

/// Converts an [`EdgeSummary`] into a flat edge list.
///
/// The backend already yields one count per `(from, to)` pair, so no
/// deduplication happens here.
#[derive(Debug, Clone, Copy)]
pub struct EdgeAggregator<'c> {
    codec: &'c NameCodec,
    order: BucketOrder,
}

impl<'c> EdgeAggregator<'c> {
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

    pub fn aggregate(&self, summary: &EdgeSummary) -> Result<Vec<GraphEdge>> {
        let mut edges = Vec::new();
        for source in ordered(&summary.buckets, self.order) {
            let from = self.codec.decode(&source.key)?;
            for target in ordered(&source.targets.buckets, self.order) {
                let to = self.codec.decode(&target.key)?;
                edges.push(GraphEdge::new(from.clone(), to, target.doc_count));
            }
        }
        tracing::debug!(
            sources = summary.buckets.len(),
            edges = edges.len(),
            "aggregated edges"
        );
        Ok(edges)
    }
}
