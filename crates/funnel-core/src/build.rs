//! Public build operations: fetch summaries, assemble, wrap failures.

use std::time::Instant;

use tracing::{error, info};

use funnel_error::Result;

use crate::assemble::{GraphAssembler, PathViewAssembler};
use crate::model::{Graph, Paths};
use crate::source::{AnalyticsContext, GraphRequest, PathsRequest};

/// Build the ranked transition graph for `tenant`.
///
/// Fails as a whole or succeeds as a whole. The error keeps its kind so
/// callers can tell a retryable `BackendFailure` from an internal one, and
/// carries the operation and tenant as context.
pub fn build_graph(
    tenant: &str,
    ctx: &AnalyticsContext<'_>,
    request: &GraphRequest,
) -> Result<Graph> {
    let start = Instant::now();
    let result = fetch_and_assemble_graph(tenant, ctx, request);
    match &result {
        Ok(graph) => info!(
            tenant,
            vertices = graph.vertices.len(),
            edges = graph.edges.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "graph built"
        ),
        Err(err) => error!(tenant, error = %err, "error building graph"),
    }
    result.map_err(|err| {
        err.with_operation("graph::build")
            .with_context("tenant", tenant)
    })
}

/// Build the path enumeration view for `tenant`.
pub fn build_paths(
    tenant: &str,
    ctx: &AnalyticsContext<'_>,
    request: &PathsRequest,
) -> Result<Paths> {
    let start = Instant::now();
    let result = fetch_and_assemble_paths(tenant, ctx, request);
    match &result {
        Ok(view) => info!(
            tenant,
            vertices = view.vertices.len(),
            paths = view.paths.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "paths built"
        ),
        Err(err) => error!(tenant, error = %err, "error calculating paths"),
    }
    result.map_err(|err| {
        err.with_operation("paths::build")
            .with_context("tenant", tenant)
    })
}

fn fetch_and_assemble_graph(
    tenant: &str,
    ctx: &AnalyticsContext<'_>,
    request: &GraphRequest,
) -> Result<Graph> {
    let (edges, paths) = ctx.source().graph_summaries(tenant, &request.filters)?;
    tracing::debug!(
        tenant,
        edge_sources = edges.as_ref().map_or(0, |s| s.buckets.len()),
        path_buckets = paths.as_ref().map_or(0, |s| s.buckets.len()),
        "fetched graph summaries"
    );
    GraphAssembler::new(ctx.options()).assemble(edges.as_ref(), paths.as_ref())
}

fn fetch_and_assemble_paths(
    tenant: &str,
    ctx: &AnalyticsContext<'_>,
    request: &PathsRequest,
) -> Result<Paths> {
    let paths = ctx.source().path_summary(tenant, &request.filters)?;
    PathViewAssembler::new(ctx.options()).assemble(paths.as_ref())
}
