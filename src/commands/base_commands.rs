use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::config::{GameFormat, MatchFormat};

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
    /// Log debug details to stderr
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare serving first against choosing a side with Monte Carlo matches
    Simulate(SimulateArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Simulation config YAML; replaces the match options below
    #[arg(long)]
    pub config: Option<String>,
    /// Number of matches per strategy
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub simulations: usize,
    /// Singles or doubles
    #[arg(short, long, value_enum, default_value_t = GameFormat::Doubles)]
    pub game_format: GameFormat,
    /// Points needed to win a game (11, 15 or 21)
    #[arg(short, long, default_value_t = 11)]
    pub points: u32,
    /// Best of one or best of three games
    #[arg(short, long, value_enum, default_value_t = MatchFormat::BestOf3)]
    pub match_format: MatchFormat,
    /// Per-point bias in percentage points toward team A's starting end (-5..=5)
    #[arg(short = 'a', long, default_value_t = 0, allow_negative_numbers = true)]
    pub side_advantage: i32,
    /// The opening server forfeits the first point of every game
    #[arg(long)]
    pub first_point_rule: bool,
    /// Player ratings, team A first (defaults: 4.5 for singles, 4.5 4.0 4.5 4.0 for doubles)
    #[arg(short, long = "rating", num_args = 1..)]
    pub ratings: Vec<f64>,
    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write results to this file
    #[arg(short, long)]
    pub output: Option<String>,
    /// Serialization format for --output
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
    /// Write a PNG bar chart of both win rates
    #[arg(short, long)]
    pub chart: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}
