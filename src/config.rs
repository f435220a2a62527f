//! Configuration types for extraction and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. The binary builds them from its
//! command-line arguments.
//!
//! - [`ExtractConfig`] - input, output, sender and grammar settings
//! - [`AnalysisConfig`] - endpoint, model and timeout for personality analysis
//!
//! # Example
//!
//! ```rust
//! use chatpluck::config::{AnalysisConfig, ExtractConfig};
//! use chatpluck::parsing::Grammar;
//!
//! let extract = ExtractConfig::new()
//!     .with_input("chat.txt")
//!     .with_sender("Alice")
//!     .with_grammar(Grammar::Timestamped);
//!
//! let analysis = AnalysisConfig::new()
//!     .with_model("llama3.2")
//!     .with_timeout_secs(60);
//!
//! assert_eq!(extract.output_path_for("Alice").to_str(), Some("messages_Alice.odt"));
//! assert!(analysis.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChatpluckError, Result};
use crate::parsing::Grammar;

/// Transcript read when no input path is given.
pub const DEFAULT_INPUT: &str = "messages.txt";

/// Base URL of a local Ollama server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Model asked for the analysis.
pub const DEFAULT_MODEL: &str = "deepseek-r1";

/// Local models can take minutes on long transcripts.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Instruction sent alongside the message bodies.
pub const DEFAULT_INSTRUCTION: &str =
    "Analyze the chat data and provide a personality and behavior analysis.";

/// Settings for one extraction run.
///
/// # Example
///
/// ```rust
/// use chatpluck::config::ExtractConfig;
///
/// let config = ExtractConfig::new().with_output("alice.pdf");
/// assert_eq!(config.output_path_for("Alice").to_str(), Some("alice.pdf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Transcript path (default: `messages.txt`)
    pub input: PathBuf,

    /// Output document path. `None` means derive it from the sender.
    pub output: Option<PathBuf>,

    /// Sender to extract. `None` means ask the operator.
    pub sender: Option<String>,

    /// Record grammar (default: timestamped)
    pub grammar: Grammar,

    /// Skip the approval prompt (default: false)
    pub auto_approve: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            sender: None,
            grammar: Grammar::default(),
            auto_approve: false,
        }
    }
}

impl ExtractConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transcript path.
    #[must_use]
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    /// Sets the output document path.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Sets the sender to extract.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the record grammar.
    #[must_use]
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Enables or disables the approval prompt.
    #[must_use]
    pub fn with_auto_approve(mut self, enabled: bool) -> Self {
        self.auto_approve = enabled;
        self
    }

    /// Returns the input path.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Returns the configured output path, or the default one for `sender`.
    pub fn output_path_for(&self, sender: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(sender))
    }
}

/// Builds `messages_<sender>.odt`, with each whitespace run in the sender
/// replaced by a single `_`.
///
/// ```rust
/// use chatpluck::config::default_output_path;
///
/// assert_eq!(
///     default_output_path("Mary  Ann").to_str(),
///     Some("messages_Mary_Ann.odt")
/// );
/// ```
pub fn default_output_path(sender: &str) -> PathBuf {
    let mut name = String::with_capacity(sender.len());
    let mut in_space = false;
    for c in sender.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    PathBuf::from(format!("messages_{name}.odt"))
}

/// Settings for the personality analysis request.
///
/// # Example
///
/// ```rust
/// use chatpluck::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_enabled(true)
///     .with_endpoint("http://gpu-box:11434/");
/// assert_eq!(config.generate_url(), "http://gpu-box:11434/api/generate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Run the analysis at all (default: false)
    pub enabled: bool,

    /// Base URL of the Ollama-compatible server
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Request timeout in seconds (default: 300)
    pub timeout_secs: u64,

    /// System instruction sent with the messages
    pub instruction: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            instruction: DEFAULT_INSTRUCTION.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the analysis.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the server base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the system instruction.
    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the full URL of the generate call.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }

    /// Checks that the settings can produce a request.
    ///
    /// # Errors
    ///
    /// [`ChatpluckError::Config`] for a non-HTTP endpoint, an empty model or
    /// a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ChatpluckError::Config(format!(
                "analysis endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ChatpluckError::Config("analysis model is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ChatpluckError::Config(
                "analysis timeout must be at least 1 second".into(),
            ));
        }
        Ok(())
    }
}
