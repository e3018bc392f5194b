//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_application::ConsensusStrategy;
use std::path::PathBuf;

/// Output format for the final recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Recommendation, agent verdicts and the full debate history
    Full,
    /// Recommendation and agent verdicts only
    Summary,
    /// JSON output
    Json,
}

/// Consensus strategy as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Deterministic rule cascade
    Rules,
    /// External reasoning service, falling back to rules on failure
    Reasoning,
}

impl From<StrategyArg> for ConsensusStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Rules => ConsensusStrategy::Rules,
            StrategyArg::Reasoning => ConsensusStrategy::Reasoning,
        }
    }
}

/// CLI arguments for investment-council
#[derive(Parser, Debug)]
#[command(name = "investment-council")]
#[command(author, version, about = "Investment council - evaluator agents deliberate on one proposed investment")]
#[command(long_about = r#"
Investment Council asks a fixed set of evaluator agents to review a proposed
investment, round after round, until they reach consensus or the iteration
limit is hit.

Each round:
1. Every registered agent reads its declared inputs and returns a verdict
2. The consensus evaluator (rules or reasoning service) decides
3. On REITERATE, MODIFY recommendations are collected for the next round

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables (e.g. COUNCIL_COUNCIL__MAX_ITERATIONS=3)
2. --config <path>        Explicit config file
3. ./council.toml         Project-level config
4. ~/.config/investment-council/config.toml   Global config

Example:
  investment-council user_1 AAPL_2026 50000 0.15
  investment-council --strategy reasoning --max-iterations 3 user_1 AAPL_2026 50000 0.15
"#)]
pub struct Cli {
    /// User whose profile is evaluated
    #[arg(required_unless_present = "show_config")]
    pub user_id: Option<String>,

    /// Asset under consideration
    #[arg(required_unless_present = "show_config")]
    pub asset_id: Option<String>,

    /// Proposed investment amount
    #[arg(required_unless_present = "show_config")]
    pub amount: Option<f64>,

    /// Share of the total portfolio as a fraction (0.15 = 15%)
    #[arg(required_unless_present = "show_config")]
    pub portfolio_share: Option<f64>,

    /// Override the maximum number of deliberation rounds
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Override the consensus strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// JSON document file with users, assets and market snapshots
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Invoke agents one after another instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
