use std::collections::HashSet;

use funnel_core::{
    AnalyticsContext, BucketOrder, BuildOptions, EdgeSummary, Error, ErrorKind, Filters, Graph,
    GraphEdge, GraphRequest, NameCodec, PathSummary, PathsRequest, Result, StaticSource,
    SummarySource, build_graph, build_paths,
};
use pretty_assertions::assert_eq;

fn signup_source() -> StaticSource {
    StaticSource::new()
        .with_edges(
            EdgeSummary::new()
                .with_source("login", [("signup", 5), ("browse", 3)])
                .with_source("signup", [("browse", 5)]),
        )
        .with_paths(PathSummary::from_buckets([
            ("login>signup>browse", 5),
            ("login>browse", 3),
        ]))
}

/// Source whose backend is down.
struct UnreachableSource;

impl SummarySource for UnreachableSource {
    fn edge_summary(&self, _tenant: &str, _filters: &Filters) -> Result<Option<EdgeSummary>> {
        Err(Error::backend_failure("multi-search failed").set_source(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }

    fn path_summary(&self, _tenant: &str, _filters: &Filters) -> Result<Option<PathSummary>> {
        Err(Error::backend_failure("search failed"))
    }
}

#[test]
fn graph_edges_match_nested_summary() {
    let source = StaticSource::new()
        .with_edges(EdgeSummary::new().with_source("login", [("signup", 5), ("browse", 3)]))
        .with_paths(PathSummary::from_buckets([("login>signup", 5)]));
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let graph = build_graph("acme", &ctx, &GraphRequest::default()).unwrap();
    let edges: HashSet<GraphEdge> = graph.edges.into_iter().collect();
    let expected: HashSet<GraphEdge> = [
        GraphEdge::new("login", "signup", 5),
        GraphEdge::new("login", "browse", 3),
    ]
    .into_iter()
    .collect();
    assert_eq!(edges, expected);
}

#[test]
fn empty_edge_summary_yields_empty_graph() {
    let source = StaticSource::new()
        .with_edges(EdgeSummary::new())
        .with_paths(PathSummary::from_buckets([("login>signup", 5)]));
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let graph = build_graph("acme", &ctx, &GraphRequest::default()).unwrap();
    assert_eq!(graph, Graph::default());

    let absent = StaticSource::new().with_paths(PathSummary::from_buckets([("a", 1)]));
    let ctx = AnalyticsContext::new(&absent, &options);
    assert!(build_graph("acme", &ctx, &GraphRequest::default()).unwrap().is_empty());
}

#[test]
fn vertex_count_matches_distinct_names() {
    let source = signup_source();
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let graph = build_graph("acme", &ctx, &GraphRequest::default()).unwrap();
    assert_eq!(graph.vertices.len(), 3);
    let ids: Vec<usize> = graph.vertices.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn rebuild_assigns_identical_ids() {
    let source = signup_source();
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let first = build_graph("acme", &ctx, &GraphRequest::default()).unwrap();
    let second = build_graph("acme", &ctx, &GraphRequest::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pinned_order_makes_ids_independent_of_backend_order() {
    let options = BuildOptions::default().with_bucket_order(BucketOrder::ByKey);
    let forward = StaticSource::new()
        .with_edges(EdgeSummary::new().with_source("a", [("b", 1)]))
        .with_paths(PathSummary::from_buckets([("b>c", 1), ("a>b", 1)]));
    let reversed = StaticSource::new()
        .with_edges(EdgeSummary::new().with_source("a", [("b", 1)]))
        .with_paths(PathSummary::from_buckets([("a>b", 1), ("b>c", 1)]));

    let left = build_graph("t", &AnalyticsContext::new(&forward, &options), &GraphRequest::default())
        .unwrap();
    let right = build_graph("t", &AnalyticsContext::new(&reversed, &options), &GraphRequest::default())
        .unwrap();
    assert_eq!(left.vertices, right.vertices);
    assert_eq!(left.vertex("a").map(|v| v.id), Some(0));
}

#[test]
fn start_nodes_rank_below_end_nodes() {
    let source = StaticSource::new()
        .with_edges(
            EdgeSummary::new()
                .with_source("A", [("B", 10), ("C", 5)])
                .with_source("B", [("C", 10)]),
        )
        .with_paths(PathSummary::from_buckets([("A>B>C", 10), ("A>C", 5)]));
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let graph = build_graph("acme", &ctx, &GraphRequest::default()).unwrap();
    let a = graph.vertex("A").and_then(|v| v.rank).unwrap();
    let c = graph.vertex("C").and_then(|v| v.rank).unwrap();
    assert!(a < c, "A rank {a} should be below C rank {c}");
}

#[test]
fn path_view_lists_vertices_in_first_seen_order() {
    let source = StaticSource::new().with_paths(PathSummary::from_buckets([("X>Y", 2), ("Z", 1)]));
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let view = build_paths("acme", &ctx, &PathsRequest::default()).unwrap();
    let names: Vec<&str> = view.vertices.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["X", "Y", "Z"]);
    let paths: Vec<(&str, i64)> = view.paths.iter().map(|p| (p.path.as_str(), p.count)).collect();
    assert_eq!(paths, vec![("X>Y", 2), ("Z", 1)]);
}

#[test]
fn names_with_separator_survive_a_build() {
    let codec = NameCodec::default();
    let checkout = "cart > checkout";
    let path = codec.encode_path(&["home", checkout]);
    let source = StaticSource::new()
        .with_edges(EdgeSummary::new().with_source("home", [(codec.encode(checkout), 4)]))
        .with_paths(PathSummary::from_buckets([(path.clone(), 4)]));
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let graph = build_graph("acme", &ctx, &GraphRequest::default()).unwrap();
    assert_eq!(graph.edges, vec![GraphEdge::new("home", checkout, 4)]);
    assert_eq!(graph.vertex(checkout).map(|v| v.id), Some(1));
    assert!(graph.dangling_endpoints().is_empty());

    let view = build_paths("acme", &ctx, &PathsRequest::default()).unwrap();
    assert_eq!(view.paths[0].path, path);
}

#[test]
fn backend_failure_is_wrapped_and_retryable() {
    let source = UnreachableSource;
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let err = build_graph("acme", &ctx, &GraphRequest::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BackendFailure);
    assert!(err.is_retryable());
    assert_eq!(err.operation(), "graph::build");
    assert_eq!(err.context_value("tenant"), Some("acme"));
    assert!(std::error::Error::source(&err).is_some());

    let err = build_paths("acme", &ctx, &PathsRequest::default()).unwrap_err();
    assert_eq!(err.operation(), "paths::build");
}

#[test]
fn corrupt_path_token_is_an_internal_error() {
    let source = StaticSource::new()
        .with_edges(EdgeSummary::new().with_source("a", [("b", 1)]))
        .with_paths(PathSummary::from_buckets([("a>b%Z", 1)]));
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let err = build_graph("acme", &ctx, &GraphRequest::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailed);
    assert!(err.kind().is_internal());
    assert!(!err.is_retryable());
}

#[test]
fn missing_path_summary_fails_path_view() {
    let source = StaticSource::new();
    let options = BuildOptions::default();
    let ctx = AnalyticsContext::new(&source, &options);

    let err = build_paths("acme", &ctx, &PathsRequest::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingAggregation);
    assert_eq!(err.context_value("aggregation"), Some("paths"));
}

#[test]
fn concurrent_builds_share_a_source() {
    let source = signup_source();
    let options = BuildOptions::default();
    let expected = build_graph(
        "acme",
        &AnalyticsContext::new(&source, &options),
        &GraphRequest::default(),
    )
    .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let ctx = AnalyticsContext::new(&source, &options);
                    build_graph("acme", &ctx, &GraphRequest::default())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}
