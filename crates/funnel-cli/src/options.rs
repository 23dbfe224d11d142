//! Build options shared by every subcommand.

use std::path::PathBuf;

use clap::Args;

use funnel_core::{BucketOrder, BuildOptions, Result};

/// Options that shape a build; flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// TOML file with build options.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Path separator between node tokens.
    #[arg(long, value_name = "CHAR", global = true)]
    pub separator: Option<char>,

    /// Bucket order applied before ids are assigned: as-received, by-key, by-count-desc.
    #[arg(long = "order", value_name = "ORDER", global = true)]
    pub bucket_order: Option<BucketOrder>,

    /// Do not log edge endpoints missing from the vertex set.
    #[arg(long = "quiet-disjoint", global = true)]
    pub quiet_disjoint: bool,
}

impl BuildArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn with_bucket_order(mut self, order: BucketOrder) -> Self {
        self.bucket_order = Some(order);
        self
    }

    /// Load the config file, if any, then apply flag overrides.
    pub fn resolve(&self) -> Result<BuildOptions> {
        let mut options = match &self.config {
            Some(path) => BuildOptions::from_toml_file(path)?,
            None => BuildOptions::default(),
        };
        if let Some(separator) = self.separator {
            options = options.with_separator(separator);
        }
        if let Some(order) = self.bucket_order {
            options = options.with_bucket_order(order);
        }
        if self.quiet_disjoint {
            options = options.with_warn_on_disjoint(false);
        }
        options.validate()?;
        Ok(options)
    }
}
