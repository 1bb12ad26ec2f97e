//! CLI command definitions

use clap::{Parser, ValueEnum};
use consensus_application::SynthesisMode;
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every round
    Full,
    /// Only the final consensus report
    Report,
    /// Progress events as JSON lines
    Json,
}

/// Consensus strategy flag
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SynthesisArg {
    /// One surviving model writes the summary
    Moderated,
    /// Deterministic overlap analysis only
    Heuristic,
}

impl From<SynthesisArg> for SynthesisMode {
    fn from(arg: SynthesisArg) -> Self {
        match arg {
            SynthesisArg::Moderated => SynthesisMode::Moderated,
            SynthesisArg::Heuristic => SynthesisMode::Heuristic,
        }
    }
}

/// CLI arguments for consensus
#[derive(Parser, Debug)]
#[command(name = "consensus")]
#[command(author, version, about = "Multi-AI debate - models argue, revise, and reach consensus")]
#[command(long_about = r#"
Consensus runs a debate between several AI models.

Every model answers the question in round 1. In each later round, a model
sees what the others said last round and may critique or revise its own
position. After the final round a consensus report summarizes where the
models agree and diverge.

Model output is obtained by spawning a configured command per call, for
example `ollama run <model>` with the prompt on stdin.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./consensus.toml    Project-level config
3. ~/.config/consensus/config.toml   Global config

Example:
  consensus "What's the best way to handle errors in Rust?"
  consensus -m claude -m gpt -r 3 "Compare async runtimes"
  consensus --provider-cmd ollama --provider-arg run --provider-arg "{model}" "Is REST dead?"
"#)]
pub struct Cli {
    /// The question to debate
    pub question: Option<String>,

    /// Background context given to every model alongside the question
    #[arg(short = 'C', long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Models to include in the debate (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Number of debate rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Timeout in seconds for each provider call
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Token budget per provider call
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// How the final consensus report is produced
    #[arg(long, value_enum, value_name = "MODE")]
    pub synthesis: Option<SynthesisArg>,

    /// Provider command to spawn for each model call
    #[arg(long, value_name = "PROGRAM")]
    pub provider_cmd: Option<String>,

    /// Argument for the provider command; repeat per argument,
    /// "{model}" is replaced with the model name
    #[arg(long, value_name = "ARG")]
    pub provider_arg: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress live progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the model catalog (built-ins plus config overrides) and exit
    #[arg(long)]
    pub list_models: bool,
}
