//! Final assembly of the two output artifacts.

use funnel_error::{Error, Result};

use crate::config::BuildOptions;
use crate::edge::EdgeAggregator;
use crate::model::{Graph, GraphNode, Paths};
use crate::path::PathAggregator;
use crate::rank::NodeRanker;
use crate::summary::{EdgeSummary, PATH_AGGREGATION, PathSummary};

/// Merges edges, the path vertex table and node ranks into a [`Graph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphAssembler<'o> {
    options: &'o BuildOptions,
}

impl<'o> GraphAssembler<'o> {
    pub fn new(options: &'o BuildOptions) -> Self {
        Self { options }
    }

    /// Build the ranked graph.
    ///
    /// An absent or empty edge summary means no session matched: the result
    /// is an empty graph and the path summary is not looked at. Otherwise the
    /// path summary must be present.
    pub fn assemble(
        &self,
        edges: Option<&EdgeSummary>,
        paths: Option<&PathSummary>,
    ) -> Result<Graph> {
        let Some(edge_summary) = edges.filter(|summary| !summary.is_empty()) else {
            tracing::debug!("edge summary empty, skipping path aggregation");
            return Ok(Graph::default());
        };

        let codec = self.options.codec()?;
        let order = self.options.bucket_order;

        let edges = EdgeAggregator::new(&codec)
            .with_order(order)
            .aggregate(edge_summary)?;

        let paths = paths.ok_or_else(|| Error::missing_aggregation(PATH_AGGREGATION))?;
        let table = PathAggregator::new(&codec).with_order(order).aggregate(paths)?;
        let ranks = NodeRanker::rank(table.sequences());

        let (_, _, vertices) = table.into_parts();
        let mut vertices: Vec<_> = vertices
            .into_iter()
            .map(|node| {
                let rank = ranks.rank_of(&node.name);
                node.with_rank(rank)
            })
            .collect();
        vertices.sort_by_key(|node| node.id);
        check_dense_ids(&vertices)?;

        let graph = Graph { vertices, edges };
        if self.options.warn_on_disjoint {
            let dangling = graph.dangling_endpoints();
            if !dangling.is_empty() {
                tracing::warn!(
                    count = dangling.len(),
                    nodes = ?dangling,
                    "edge endpoints without a path vertex"
                );
            }
        }
        Ok(graph)
    }
}

/// Builds the path enumeration view; no edges, no ranking.
#[derive(Debug, Clone, Copy)]
pub struct PathViewAssembler<'o> {
    options: &'o BuildOptions,
}

impl<'o> PathViewAssembler<'o> {
    pub fn new(options: &'o BuildOptions) -> Self {
        Self { options }
    }

    pub fn assemble(&self, paths: Option<&PathSummary>) -> Result<Paths> {
        let paths = paths.ok_or_else(|| Error::missing_aggregation(PATH_AGGREGATION))?;
        let codec = self.options.codec()?;
        let table = PathAggregator::new(&codec)
            .with_order(self.options.bucket_order)
            .aggregate(paths)?;

        let (paths, _, vertices) = table.into_parts();
        check_dense_ids(&vertices)?;
        Ok(Paths { vertices, paths })
    }
}

/// Vertex ids must be `0..N` in list order.
fn check_dense_ids(vertices: &[GraphNode]) -> Result<()> {
    match vertices.iter().enumerate().find(|(at, node)| node.id != *at) {
        None => Ok(()),
        Some((at, node)) => Err(Error::invariant_violation(format!(
            "vertex '{}' has id {} at position {}",
            node.name, node.id, at
        ))
        .with_context("vertex", node.name.clone())),
    }
}
