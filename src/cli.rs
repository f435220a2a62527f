//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the CLI argument structure. Every option can
//! also come from an environment variable (a `.env` file is loaded by the
//! binary before parsing), and converts into the library's
//! [`ExtractConfig`] and [`AnalysisConfig`].
//!
//! | Flag | Env | Default |
//! |------|-----|---------|
//! | `--input` | `INPUT_FILE` | `messages.txt` |
//! | `-o, --output` | `OUTPUT_FILE` | `messages_<sender>.odt` |
//! | `-s, --sender` | `SENDER_NAME` | prompted |
//! | `--endpoint` | `OLLAMA_URL` | `http://localhost:11434` |
//! | `--model` | `OLLAMA_MODEL` | `deepseek-r1` |
//! | `--timeout` | `OLLAMA_TIMEOUT` | `300` |

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    AnalysisConfig, DEFAULT_ENDPOINT, DEFAULT_INPUT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
    ExtractConfig,
};
use crate::parsing::Grammar;

/// Pull one participant's messages out of a chat export, review them,
/// and save them as ODT or PDF.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpluck")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpluck
    chatpluck --input chat.txt --sender \"Alice\"
    chatpluck --input chat.txt --list-senders
    chatpluck -s Alice -o alice.pdf --analyze --model llama3.2
    chatpluck -s Alice --legacy --yes")]
pub struct Args {
    /// Path to the exported chat transcript
    #[arg(long, env = "INPUT_FILE", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output document (.odt or .pdf)
    #[arg(short, long, env = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Sender whose messages to extract (prompted when absent)
    #[arg(short, long, env = "SENDER_NAME")]
    pub sender: Option<String>,

    /// Append a personality analysis from a local model
    #[arg(long)]
    pub analyze: bool,

    /// Base URL of the Ollama-compatible server
    #[arg(long, env = "OLLAMA_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model used for the analysis
    #[arg(long, env = "OLLAMA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Analysis request timeout in seconds
    #[arg(long, env = "OLLAMA_TIMEOUT", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Match lines on " - <sender>:" instead of the timestamped format (deprecated)
    #[arg(long)]
    pub legacy: bool,

    /// Save without asking for approval or a filename
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the senders found in the transcript and exit
    #[arg(long)]
    pub list_senders: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Returns the grammar selected by `--legacy`.
    pub fn grammar(&self) -> Grammar {
        if self.legacy {
            Grammar::Legacy
        } else {
            Grammar::Timestamped
        }
    }

    /// Builds the extraction settings.
    pub fn extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::new()
            .with_input(&self.input)
            .with_grammar(self.grammar())
            .with_auto_approve(self.yes);
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        if let Some(sender) = self.sender.as_deref().filter(|s| !s.is_empty()) {
            config = config.with_sender(sender);
        }
        config
    }

    /// Builds the analysis settings.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new()
            .with_enabled(self.analyze)
            .with_endpoint(&self.endpoint)
            .with_model(&self.model)
            .with_timeout_secs(self.timeout)
    }

    /// Returns the default log filter for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "chatpluck=warn",
            1 => "chatpluck=debug",
            _ => "chatpluck=trace",
        }
    }
}
