use std::path::PathBuf;

use clap::{Parser, Subcommand};

use funnel::{BuildArgs, FunnelOptions, Mode, OutputFormat, run_main};
use funnel_core::Result;

#[derive(Parser, Debug)]
#[command(
    name = "funnel",
    about = "funnel: ranked state graphs from session path aggregations",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    build: BuildArgs,

    /// Tenant the summaries belong to (used for logging)
    #[arg(long, default_value = "default", global = true)]
    tenant: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the ranked transition graph
    Graph {
        /// Edge summary (from_nodes aggregation) as JSON
        #[arg(long, value_name = "FILE")]
        edges: PathBuf,
        /// Path summary (paths aggregation) as JSON
        #[arg(long, value_name = "FILE")]
        paths: PathBuf,
    },
    /// List distinct paths and their vertices
    Paths {
        /// Path summary (paths aggregation) as JSON
        #[arg(long, value_name = "FILE")]
        paths: PathBuf,
    },
    /// Encode state names into a flat path key
    Encode {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

pub fn run(args: Cli) -> Result<()> {
    init_tracing(args.verbose);

    let mode = match args.command {
        Command::Graph { edges, paths } => Mode::Graph { edges, paths },
        Command::Paths { paths } => Mode::Paths { paths },
        Command::Encode { names } => Mode::Encode { names },
    };
    let opts = FunnelOptions {
        mode,
        tenant: args.tenant,
        build: args.build.resolve()?,
        format: args.format,
    };

    let output = run_main(&opts)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &output)?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{output}"),
    }
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
