//! Output rendering (JSON and plain text).

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use funnel_core::{Error, ErrorKind, Graph, NameCodec, Paths, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Single-line JSON
    Compact,
    /// Human readable listing
    Text,
}

pub fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Compact => serde_json::to_string(value),
        _ => serde_json::to_string_pretty(value),
    };
    rendered.map_err(|err| {
        Error::new(ErrorKind::SerializationFailed, err.to_string())
            .with_operation("output::render")
            .set_source(err)
    })
}

/// Vertices by rank then id, followed by the edges.
pub fn render_graph_text(graph: &Graph) -> String {
    let mut out = String::new();
    let mut vertices: Vec<_> = graph.vertices.iter().collect();
    vertices.sort_by_key(|node| (node.rank.unwrap_or(u32::MAX), node.id));

    let _ = writeln!(out, "vertices ({}):", vertices.len());
    for node in vertices {
        let rank = node.rank.map_or_else(|| "-".to_string(), |r| r.to_string());
        let _ = writeln!(out, "  [{rank:>3}] #{:<4} {}", node.id, node.name);
    }

    let _ = writeln!(out, "edges ({}):", graph.edges.len());
    for edge in &graph.edges {
        let _ = writeln!(out, "  {} -> {} ({})", edge.from, edge.to, edge.weight);
    }

    let dangling = graph.dangling_endpoints();
    if !dangling.is_empty() {
        let _ = writeln!(out, "endpoints without vertex: {}", dangling.join(", "));
    }
    out
}

/// Paths with their counts, node names decoded and joined with ` > `.
pub fn render_paths_text(view: &Paths, codec: &NameCodec) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "paths ({}):", view.paths.len());
    for path in &view.paths {
        let names = codec.decode_path(&path.path)?;
        let _ = writeln!(out, "  {:>8}  {}", path.count, names.join(" > "));
    }
    Ok(out)
}
