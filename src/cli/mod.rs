//! Command-line interface definitions.

mod aggregators;
mod check;
pub mod output;
mod solve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::adapter::dataset::{read_dataset, LoadedDataset};
use crate::app::{Config, RorParameters};
use crate::error::Result;

/// ror - Robust Ordinal Regression rankings with UTA-GMS models.
#[derive(Parser, Debug)]
#[command(name = "ror")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// When to use colors in output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a dataset and print its ranks
    Solve(SolveArgs),

    /// Parse and validate a dataset without solving
    Check(DatasetArgs),

    /// List result aggregators and tie resolvers
    Aggregators,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    const fn forced(self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

/// Dataset and parameter overrides shared by commands that load a dataset.
#[derive(Args, Debug, Clone, Default)]
pub struct DatasetArgs {
    /// Path to the dataset file
    pub dataset: PathBuf,

    /// Path to the configuration file (defaults to ./ror.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Results aggregator, e.g. BordaResultAggregator
    #[arg(long)]
    pub aggregator: Option<String>,

    /// Tie resolver, e.g. CopelandTieResolver
    #[arg(long)]
    pub tie_resolver: Option<String>,

    /// Minimal separation of strictly preferred alternatives
    #[arg(long)]
    pub eps: Option<f64>,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to stderr as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Explain the relative position of two alternatives
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    pub explain: Option<Vec<String>>,
}

/// Run the parsed command.
#[allow(clippy::result_large_err)]
pub fn run(cli: Cli) -> Result<()> {
    output::set_color(cli.color.forced());
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Solve(args) => solve::execute(&args),
        Commands::Check(args) => check::execute(&args),
        Commands::Aggregators => {
            aggregators::execute();
            Ok(())
        }
    }
}

/// A dataset with its effective parameters.
struct Session {
    loaded: LoadedDataset,
    parameters: RorParameters,
}

impl DatasetArgs {
    /// Parameters given on the command line.
    fn parameters(&self) -> RorParameters {
        RorParameters {
            eps: self.eps,
            results_aggregator: self.aggregator.clone(),
            tie_resolver: self.tie_resolver.clone(),
            ..RorParameters::default()
        }
    }

    /// Load config, start logging, read the dataset and stack parameters.
    ///
    /// Precedence, highest first: flags, dataset `#Parameters`, config file.
    #[allow(clippy::result_large_err)]
    fn open(&self) -> Result<Session> {
        let mut config = Config::discover(self.config.as_deref())?;
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.json_logs {
            config.logging.format = "json".into();
        }
        config.init_logging();
        debug!(path = %self.dataset.display(), "Loading dataset");

        let loaded = read_dataset(&self.dataset)?;
        let parameters = config
            .parameters
            .clone()
            .overlay(&loaded.parameters)
            .overlay(&self.parameters());
        parameters.validate()?;
        Ok(Session { loaded, parameters })
    }
}
