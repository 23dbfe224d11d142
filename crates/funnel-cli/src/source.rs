//! Summary source backed by JSON files on disk.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use funnel_core::summary::{EDGE_AGGREGATION, PATH_AGGREGATION};
use funnel_core::{EdgeSummary, Error, ErrorKind, Filters, PathSummary, Result, SummarySource};

/// Reads summaries from exported search responses.
///
/// A file holds either the bare aggregation (`{"buckets": [...]}`) or a whole
/// search response, in which case the aggregation is looked up by name under
/// `aggregations`. A response without that aggregation yields `None`; any
/// other object is rejected rather than read as an empty summary.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    edges: Option<PathBuf>,
    paths: Option<PathBuf>,
}

impl FileSource {
    pub fn new(edges: Option<PathBuf>, paths: Option<PathBuf>) -> Self {
        Self { edges, paths }
    }
}

impl SummarySource for FileSource {
    fn edge_summary(&self, tenant: &str, _filters: &Filters) -> Result<Option<EdgeSummary>> {
        match &self.edges {
            Some(path) => load_aggregation(path, EDGE_AGGREGATION, tenant),
            None => Ok(None),
        }
    }

    fn path_summary(&self, tenant: &str, _filters: &Filters) -> Result<Option<PathSummary>> {
        match &self.paths {
            Some(path) => load_aggregation(path, PATH_AGGREGATION, tenant),
            None => Ok(None),
        }
    }
}

fn load_aggregation<T: DeserializeOwned>(
    path: &Path,
    aggregation: &str,
    tenant: &str,
) -> Result<Option<T>> {
    let file = path.display().to_string();
    debug!(tenant, file = file.as_str(), aggregation, "loading summary");

    let raw = std::fs::read_to_string(path)
        .map_err(|err| Error::from(err).with_context("path", file.clone()))?;
    let value: Value = serde_json::from_str(&raw)
        .map_err(|err| Error::from(err).with_context("path", file.clone()))?;

    let value = match value {
        Value::Object(mut object) if object.contains_key("aggregations") => {
            match object.remove("aggregations") {
                Some(Value::Object(mut aggregations)) => match aggregations.remove(aggregation) {
                    Some(Value::Null) | None => return Ok(None),
                    Some(found) => found,
                },
                _ => return Ok(None),
            }
        }
        Value::Object(object) if object.contains_key("buckets") => Value::Object(object),
        Value::Object(object) if is_search_response(&object) => return Ok(None),
        _ => {
            return Err(Error::new(
                ErrorKind::DeserializationFailed,
                format!("neither an aggregation nor a search response, expected '{aggregation}'"),
            )
            .with_operation("json")
            .with_context("path", file));
        }
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| Error::from(err).with_context("path", file))
}

/// A response that ran the search but carries no aggregations at all.
fn is_search_response(object: &Map<String, Value>) -> bool {
    object.contains_key("took") || object.contains_key("hits")
}
