//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for orchestration results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer with provider, confidence and timing details
    Full,
    /// Only the cited answer text
    Answer,
    /// JSON output
    Json,
}

impl From<OutputFormat> for concord_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => concord_domain::OutputFormat::Full,
            OutputFormat::Answer => concord_domain::OutputFormat::Answer,
            OutputFormat::Json => concord_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for concord
#[derive(Parser, Debug)]
#[command(name = "concord")]
#[command(author, version, about = "Ask several LLMs at once and get one cited answer")]
#[command(long_about = r#"
Concord sends your question to every configured LLM provider at once,
scores the answers and returns the single best one, citing official
sources found on trusted government domains for your jurisdiction.

Each request goes through three stages:
1. Retrieval: search the jurisdiction's trusted domains
2. Dispatch: query every provider in parallel
3. Selection: score, vote and attach the source legend

Providers are enabled by their API keys (OPENAI_API_KEY, GOOGLE_API_KEY,
ANTHROPIC_API_KEY). With none available, a generic advisory is returned.

Configuration files are loaded from (in priority order):
1. CONCORD_* env vars   e.g. CONCORD_RETRIEVAL__MAX_SOURCES=3
2. --config <path>      Explicit config file
3. ./concord.toml       Project-level config
4. ~/.config/concord/config.toml   Global config

Example:
  concord "How many days of annual leave am I entitled to?" -j SG
  concord -o json --context "You are a payroll specialist." "Is overtime taxed?"
"#)]
pub struct Cli {
    /// The question to answer
    pub question: Option<String>,

    /// Jurisdiction code (e.g. US, UK, SG); defaults to the configured one
    #[arg(short, long, value_name = "CODE")]
    pub jurisdiction: Option<String>,

    /// System context sent to every provider instead of the default
    #[arg(long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
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

    /// List jurisdictions and their trusted domains, then exit
    #[arg(long)]
    pub list_jurisdictions: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Effective output format: CLI flag, then config, then `answer`.
    pub fn output_format(&self, configured: Option<concord_domain::OutputFormat>) -> concord_domain::OutputFormat {
        self.output
            .map(Into::into)
            .or(configured)
            .unwrap_or_default()
    }
}
