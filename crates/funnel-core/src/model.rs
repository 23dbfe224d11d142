//! Output artifacts of a build: the ranked graph and the path view.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A state in the funnel.
///
/// `id` is dense over `[0, N)` and assigned in first-seen order while
/// scanning path records. `rank` is `None` for a node that was never seen in
/// any path, and for every vertex of a [`Paths`] view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: usize,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl GraphNode {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: Option<u32>) -> Self {
        self.rank = rank;
        self
    }
}

/// One observed transition, with decoded endpoint names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "value")]
    pub weight: i64,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// A distinct complete traversal, kept in its encoded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatPath {
    pub path: String,
    pub count: i64,
}

/// Ranked transition graph.
///
/// Vertices come from path records only. An edge endpoint that never occurs
/// inside a path has no vertex; see [`Graph::dangling_endpoints`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub vertices: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    pub fn vertex(&self, name: &str) -> Option<&GraphNode> {
        self.vertices.iter().find(|node| node.name == name)
    }

    /// Edge endpoints with no matching vertex, in edge order, deduplicated.
    pub fn dangling_endpoints(&self) -> Vec<&str> {
        let known: HashSet<&str> = self.vertices.iter().map(|node| node.name.as_str()).collect();
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .flat_map(|edge| [edge.from.as_str(), edge.to.as_str()])
            .filter(|name| !known.contains(name) && seen.insert(*name))
            .collect()
    }
}

/// Path enumeration view: vertices in encounter order, never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    pub vertices: Vec<GraphNode>,
    pub paths: Vec<FlatPath>,
}
