//! Funnel graph construction from pre-aggregated session data.
//!
//! Two summaries come in from the query layer: a from/to transition count
//! and a frequency table of complete paths. Two artifacts go out: a ranked
//! [`Graph`] and a [`Paths`] enumeration.
//!
//! ```text
//! EdgeSummary ──► EdgeAggregator ───────────────────────┐
//!                                                        ├─► GraphAssembler ─► Graph
//! PathSummary ──► PathAggregator ──► NodeRanker ────────┘
//!                        └──────────► PathViewAssembler ─► Paths
//! ```
//!
//! Every build is a pure, synchronous pass over data owned by the call.
//! Vertices come only from path records; edge endpoints that never occur in
//! a path have no vertex (see [`Graph::dangling_endpoints`]).

pub mod assemble;
pub mod build;
pub mod codec;
pub mod config;
pub mod edge;
pub mod model;
pub mod path;
pub mod rank;
pub mod source;
pub mod summary;

pub use assemble::{GraphAssembler, PathViewAssembler};
pub use build::{build_graph, build_paths};
pub use codec::{DEFAULT_SEPARATOR, NameCodec};
pub use config::{BucketOrder, BuildOptions};
pub use edge::EdgeAggregator;
pub use funnel_error::{Error, ErrorKind, ErrorStatus, Result};
pub use model::{FlatPath, Graph, GraphEdge, GraphNode, Paths};
pub use path::{PathAggregator, PathSequence, PathTable};
pub use rank::{NodeRanker, NodeRanks, NodeScore};
pub use source::{AnalyticsContext, Filters, GraphRequest, PathsRequest, StaticSource, SummarySource};
pub use summary::{EdgeSummary, PathSummary, SourceBucket, TargetBuckets, TermBucket};
