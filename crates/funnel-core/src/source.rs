//! The seam to the query layer that produces aggregation summaries.

use serde::{Deserialize, Serialize};

use funnel_error::Result;

use crate::config::BuildOptions;
use crate::summary::{EdgeSummary, PathSummary};

/// Request filters, passed through to the query layer untouched.
pub type Filters = serde_json::Map<String, serde_json::Value>;

/// Filters selecting the sessions a graph is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphRequest {
    #[serde(default)]
    pub filters: Filters,
}

/// Filters selecting the sessions a path view is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsRequest {
    #[serde(default)]
    pub filters: Filters,
}

/// Produces the two aggregation summaries for a tenant.
///
/// `Ok(None)` means the response carried no such aggregation. Transport or
/// backend trouble is reported as an `Err`, normally of kind
/// `BackendFailure`.
pub trait SummarySource: Send + Sync {
    fn edge_summary(&self, tenant: &str, filters: &Filters) -> Result<Option<EdgeSummary>>;

    fn path_summary(&self, tenant: &str, filters: &Filters) -> Result<Option<PathSummary>>;

    /// Both summaries for one graph build. Backends able to batch the two
    /// queries into one round trip override this.
    fn graph_summaries(
        &self,
        tenant: &str,
        filters: &Filters,
    ) -> Result<(Option<EdgeSummary>, Option<PathSummary>)> {
        let edges = self.edge_summary(tenant, filters)?;
        let paths = self.path_summary(tenant, filters)?;
        Ok((edges, paths))
    }
}

/// Summaries that are already materialized in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    edges: Option<EdgeSummary>,
    paths: Option<PathSummary>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edges(mut self, edges: EdgeSummary) -> Self {
        self.edges = Some(edges);
        self
    }

    pub fn with_paths(mut self, paths: PathSummary) -> Self {
        self.paths = Some(paths);
        self
    }
}

impl SummarySource for StaticSource {
    fn edge_summary(&self, _tenant: &str, _filters: &Filters) -> Result<Option<EdgeSummary>> {
        Ok(self.edges.clone())
    }

    fn path_summary(&self, _tenant: &str, _filters: &Filters) -> Result<Option<PathSummary>> {
        Ok(self.paths.clone())
    }
}

/// Per-call dependencies of a build: the summary source and the options.
#[derive(Clone, Copy)]
pub struct AnalyticsContext<'a> {
    source: &'a dyn SummarySource,
    options: &'a BuildOptions,
}

impl<'a> AnalyticsContext<'a> {
    pub fn new(source: &'a dyn SummarySource, options: &'a BuildOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &'a dyn SummarySource {
        self.source
    }

    pub fn options(&self) -> &'a BuildOptions {
        self.options
    }
}
