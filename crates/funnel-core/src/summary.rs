//! Aggregation summaries handed over by the query layer.
//!
//! The shapes mirror the backend's terms-aggregation JSON, so a raw response
//! fragment deserializes directly:
//!
//! ```json
//! {"buckets": [{"key": "login", "doc_count": 8,
//!               "to_nodes": {"buckets": [{"key": "signup", "doc_count": 5}]}}]}
//! ```

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::config::BucketOrder;

/// Name of the nested from/to aggregation in a search response.
pub const EDGE_AGGREGATION: &str = "from_nodes";
/// Name of the flat path aggregation in a search response.
pub const PATH_AGGREGATION: &str = "paths";

/// One group-by bucket: an encoded key and its document count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermBucket {
    pub key: String,
    pub doc_count: i64,
}

impl TermBucket {
    pub fn new(key: impl Into<String>, doc_count: i64) -> Self {
        Self {
            key: key.into(),
            doc_count,
        }
    }
}

/// Targets of one source node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetBuckets {
    #[serde(default)]
    pub buckets: Vec<TermBucket>,
}

/// Source node bucket of the edge summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBucket {
    pub key: String,
    #[serde(default)]
    pub doc_count: i64,
    /// The `to_nodes` sub-aggregation.
    #[serde(rename = "to_nodes", default)]
    pub targets: TargetBuckets,
}

/// Nested grouping `fromToken -> { toToken -> docCount }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSummary {
    #[serde(default)]
    pub buckets: Vec<SourceBucket>,
}

impl EdgeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source bucket with its `(toToken, count)` targets.
    pub fn with_source<K, I, T>(mut self, from: K, targets: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (T, i64)>,
        T: Into<String>,
    {
        let buckets: Vec<TermBucket> = targets
            .into_iter()
            .map(|(key, count)| TermBucket::new(key, count))
            .collect();
        self.buckets.push(SourceBucket {
            key: from.into(),
            doc_count: buckets.iter().map(|b| b.doc_count).sum(),
            targets: TargetBuckets { buckets },
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Flat grouping `encodedPath -> docCount`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSummary {
    #[serde(default)]
    pub buckets: Vec<TermBucket>,
}

impl PathSummary {
    pub fn from_buckets<I, K>(buckets: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        Self {
            buckets: buckets
                .into_iter()
                .map(|(key, count)| TermBucket::new(key, count))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Anything with a bucket key and a document count.
pub trait Bucket {
    fn key(&self) -> &str;
    fn doc_count(&self) -> i64;
}

impl Bucket for TermBucket {
    fn key(&self) -> &str {
        &self.key
    }

    fn doc_count(&self) -> i64 {
        self.doc_count
    }
}

impl Bucket for SourceBucket {
    fn key(&self) -> &str {
        &self.key
    }

    fn doc_count(&self) -> i64 {
        self.doc_count
    }
}

/// Borrow `buckets` in the requested order. `AsReceived` keeps backend order.
pub fn ordered<B: Bucket>(buckets: &[B], order: BucketOrder) -> Vec<&B> {
    let mut view: Vec<&B> = buckets.iter().collect();
    match order {
        BucketOrder::AsReceived => {}
        BucketOrder::ByKey => view.sort_by(|a, b| a.key().cmp(b.key())),
        BucketOrder::ByCountDesc => {
            view.sort_by(|a, b| {
                (Reverse(a.doc_count()), a.key()).cmp(&(Reverse(b.doc_count()), b.key()))
            })
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "buckets": [
                {"key": "login", "doc_count": 8,
                 "to_nodes": {"buckets": [
                    {"key": "signup", "doc_count": 5},
                    {"key": "browse", "doc_count": 3}
                 ]}}
            ]
        }"#;
        let summary: EdgeSummary = serde_json::from_str(json).unwrap();
        let expected = EdgeSummary::new().with_source("login", [("signup", 5), ("browse", 3)]);
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_missing_buckets_is_empty() {
        let summary: PathSummary = serde_json::from_str("{}").unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_ordering() {
        let summary = PathSummary::from_buckets([("b", 1), ("c", 7), ("a", 7)]);
        let keys = |order: BucketOrder| -> Vec<&str> {
            ordered(&summary.buckets, order)
                .into_iter()
                .map(|b| b.key.as_str())
                .collect()
        };
        assert_eq!(keys(BucketOrder::AsReceived), vec!["b", "c", "a"]);
        assert_eq!(keys(BucketOrder::ByKey), vec!["a", "b", "c"]);
        assert_eq!(keys(BucketOrder::ByCountDesc), vec!["a", "c", "b"]);
    }
}
