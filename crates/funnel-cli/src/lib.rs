//! funnel command-line interface.
//!
pub mod options;
pub mod output;
pub mod source;

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use funnel_core::{
    AnalyticsContext, BuildOptions, GraphRequest, PathsRequest, Result, build_graph, build_paths,
};

pub use options::BuildArgs;
pub use output::OutputFormat;
pub use source::FileSource;

/// What a run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Ranked graph from an edge summary and a path summary.
    Graph { edges: PathBuf, paths: PathBuf },
    /// Path enumeration from a path summary.
    Paths { paths: PathBuf },
    /// Encode display names into one flat path key.
    Encode { names: Vec<String> },
}

/// Options for running funnel.
#[derive(Debug, Clone)]
pub struct FunnelOptions {
    pub mode: Mode,
    pub tenant: String,
    pub build: BuildOptions,
    pub format: OutputFormat,
}

/// Main entry point
pub fn run_main(opts: &FunnelOptions) -> Result<String> {
    let start = Instant::now();
    let output = match &opts.mode {
        Mode::Graph { edges, paths } => {
            let source = FileSource::new(Some(edges.clone()), Some(paths.clone()));
            let ctx = AnalyticsContext::new(&source, &opts.build);
            let graph = build_graph(&opts.tenant, &ctx, &GraphRequest::default())?;
            match opts.format {
                OutputFormat::Text => output::render_graph_text(&graph),
                format => output::render_json(&graph, format)?,
            }
        }
        Mode::Paths { paths } => {
            let source = FileSource::new(None, Some(paths.clone()));
            let ctx = AnalyticsContext::new(&source, &opts.build);
            let view = build_paths(&opts.tenant, &ctx, &PathsRequest::default())?;
            match opts.format {
                OutputFormat::Text => output::render_paths_text(&view, &opts.build.codec()?)?,
                format => output::render_json(&view, format)?,
            }
        }
        Mode::Encode { names } => opts.build.codec()?.encode_path(names),
    };
    info!(elapsed_secs = start.elapsed().as_secs_f64(), "run complete");
    Ok(output)
}
