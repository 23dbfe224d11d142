//! Build configuration.
//!
//! Options can be assembled in code with the `with_*` builders or loaded from
//! a TOML file:
//!
//! ```toml
//! separator = ">"
//! bucket_order = "by-key"
//! warn_on_disjoint = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use funnel_error::{Error, Result};

use crate::codec::{DEFAULT_SEPARATOR, NameCodec};

/// Order in which aggregation buckets are consumed.
///
/// Node ids follow the order paths are scanned in, and the backend decides
/// bucket order. Callers that need ids to be stable across runs pin an
/// explicit order here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BucketOrder {
    /// Keep whatever order the backend returned.
    #[default]
    AsReceived,
    /// Ascending by encoded bucket key.
    ByKey,
    /// Descending by document count, ties by ascending key.
    ByCountDesc,
}

/// Options shared by graph and path builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Separator between node tokens in a flat path.
    pub separator: char,
    pub bucket_order: BucketOrder,
    /// Log edge endpoints that have no vertex.
    pub warn_on_disjoint: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            bucket_order: BucketOrder::default(),
            warn_on_disjoint: true,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_bucket_order(mut self, order: BucketOrder) -> Self {
        self.bucket_order = order;
        self
    }

    pub fn with_warn_on_disjoint(mut self, warn: bool) -> Self {
        self.warn_on_disjoint = warn;
        self
    }

    /// Codec for the configured separator.
    pub fn codec(&self) -> Result<NameCodec> {
        NameCodec::new(self.separator)
    }

    pub fn validate(&self) -> Result<()> {
        self.codec().map(|_| ())
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self = toml::from_str(source).map_err(|err| {
            Error::config_invalid(err.message().to_string())
                .with_operation("config::parse")
                .set_source(err)
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|err| Error::from(err).with_context("path", path.display().to_string()))?;
        Self::from_toml_str(&source).map_err(|err| err.with_context("path", path.display().to_string()))
    }
}
