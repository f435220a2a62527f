//! Personality analysis of an extraction.
//!
//! The message bodies (no timestamps) are sent as the prompt to a text
//! generation model, with an instruction asking for a personality and
//! behavior summary. The model sits behind the [`AnalysisClient`] trait:
//! [`OllamaClient`] talks to an Ollama-compatible server (feature
//! `analysis`), [`CannedClient`] returns a fixed answer for tests and dry
//! runs.
//!
//! # Example
//!
//! ```
//! use chatpluck::analysis::{CannedClient, analyze};
//! use chatpluck::config::AnalysisConfig;
//! use chatpluck::core::Extraction;
//! use chatpluck::parsing::Grammar;
//! use chatpluck::ExtractedMessage;
//!
//! let extraction = Extraction::new(
//!     "Alice",
//!     Grammar::Timestamped,
//!     vec![ExtractedMessage::new("1/1/24, 1:00 AM", "Morning all!")],
//! );
//! let client = CannedClient::new("<think>hmm</think>Cheerful early riser.");
//!
//! let summary = analyze(&client, &extraction, &AnalysisConfig::new())?;
//! assert_eq!(summary, "Cheerful early riser.");
//! # Ok::<(), chatpluck::ChatpluckError>(())
//! ```

#[cfg(feature = "analysis")]
mod ollama;

#[cfg(feature = "analysis")]
pub use ollama::OllamaClient;

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::core::Extraction;
use crate::error::{AnalysisErrorKind, Result};

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// A text generation backend.
pub trait AnalysisClient {
    /// Generates a completion for `prompt` under the `system` instruction.
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> std::result::Result<String, AnalysisErrorKind>;

    /// Lists the models the backend can serve.
    fn list_models(&self) -> std::result::Result<Vec<String>, AnalysisErrorKind>;

    /// Returns `true` if a model whose name starts with `model` is served.
    fn is_model_available(&self, model: &str) -> std::result::Result<bool, AnalysisErrorKind> {
        Ok(self.list_models()?.iter().any(|m| m.starts_with(model)))
    }
}

/// Runs the analysis for `extraction` and returns the cleaned summary.
///
/// # Errors
///
/// [`AnalysisErrorKind::EmptyInput`] if every body is blank, otherwise
/// whatever the client reports, wrapped in
/// [`ChatpluckError::Analysis`](crate::ChatpluckError::Analysis).
pub fn analyze(
    client: &dyn AnalysisClient,
    extraction: &Extraction,
    config: &AnalysisConfig,
) -> Result<String> {
    let prompt = extraction.bodies_text();
    if prompt.trim().is_empty() {
        return Err(AnalysisErrorKind::EmptyInput.into());
    }

    debug!(
        model = %config.model,
        messages = extraction.len(),
        prompt_bytes = prompt.len(),
        "requesting analysis"
    );
    let raw = client.generate(&config.model, &prompt, &config.instruction)?;
    let summary = strip_think(&raw);
    if summary.is_empty() {
        return Err(AnalysisErrorKind::Response("model returned an empty summary".into()).into());
    }

    info!(chars = summary.len(), "analysis complete");
    Ok(summary)
}

/// Removes `<think>...</think>` reasoning blocks and trims the rest.
///
/// An unterminated `<think>` drops everything after it.
pub fn strip_think(text: &str) -> String {
    let cleaned = THINK_BLOCK.replace_all(text, "");
    let cleaned = match cleaned.find("<think>") {
        Some(at) => &cleaned[..at],
        None => &cleaned[..],
    };
    cleaned.trim().to_string()
}

/// Client that always answers with the same text.
#[derive(Debug, Clone)]
pub struct CannedClient {
    response: String,
    models: Vec<String>,
}

impl CannedClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            models: vec![crate::config::DEFAULT_MODEL.to_string()],
        }
    }

    #[must_use]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }
}

impl AnalysisClient for CannedClient {
    fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _system: &str,
    ) -> std::result::Result<String, AnalysisErrorKind> {
        Ok(self.response.clone())
    }

    fn list_models(&self) -> std::result::Result<Vec<String>, AnalysisErrorKind> {
        Ok(self.models.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ExtractedMessage;
    use crate::parsing::Grammar;
    use std::cell::RefCell;

    /// Records what it was asked.
    struct RecordingClient {
        seen: RefCell<Vec<(String, String, String)>>,
    }

    impl AnalysisClient for RecordingClient {
        fn generate(
            &self,
            model: &str,
            prompt: &str,
            system: &str,
        ) -> std::result::Result<String, AnalysisErrorKind> {
            self.seen
                .borrow_mut()
                .push((model.into(), prompt.into(), system.into()));
            Ok("ok".into())
        }

        fn list_models(&self) -> std::result::Result<Vec<String>, AnalysisErrorKind> {
            Ok(vec![])
        }
    }

    struct FailingClient;

    impl AnalysisClient for FailingClient {
        fn generate(
            &self,
            _model: &str,
            _prompt: &str,
            _system: &str,
        ) -> std::result::Result<String, AnalysisErrorKind> {
            Err(AnalysisErrorKind::Connection {
                url: "http://localhost:11434".into(),
            })
        }

        fn list_models(&self) -> std::result::Result<Vec<String>, AnalysisErrorKind> {
            Err(AnalysisErrorKind::Http("down".into()))
        }
    }

    fn extraction(bodies: &[&str]) -> Extraction {
        Extraction::new(
            "Alice",
            Grammar::Timestamped,
            bodies
                .iter()
                .map(|b| ExtractedMessage::new("1/1/24, 1:00 AM", *b))
                .collect(),
        )
    }

    #[test]
    fn test_prompt_is_bodies_only() {
        let client = RecordingClient {
            seen: RefCell::new(vec![]),
        };
        let config = AnalysisConfig::new().with_model("llama3");
        analyze(&client, &extraction(&["one", "two"]), &config).unwrap();

        let seen = client.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "llama3");
        assert_eq!(seen[0].1, "one\ntwo");
        assert_eq!(seen[0].2, crate::config::DEFAULT_INSTRUCTION);
    }

    #[test]
    fn test_blank_input_is_rejected_before_request() {
        let client = RecordingClient {
            seen: RefCell::new(vec![]),
        };
        let err = analyze(&client, &extraction(&["", "  "]), &AnalysisConfig::new()).unwrap_err();
        assert!(err.is_analysis());
        assert!(client.seen.borrow().is_empty());
    }

    #[test]
    fn test_client_error_is_propagated() {
        let err = analyze(&FailingClient, &extraction(&["hi"]), &AnalysisConfig::new()).unwrap_err();
        assert!(err.is_analysis());
        assert!(err.to_string().contains("Is Ollama running?"));
    }

    #[test]
    fn test_think_only_answer_is_an_error() {
        let client = CannedClient::new("<think>nothing to say</think>");
        let err = analyze(&client, &extraction(&["hi"]), &AnalysisConfig::new()).unwrap_err();
        assert!(err.is_analysis());
    }

    #[test]
    fn test_strip_think() {
        assert_eq!(strip_think("plain"), "plain");
        assert_eq!(strip_think("<think>\nA\nB\n</think>\n\nSummary"), "Summary");
        assert_eq!(strip_think("a<think>x</think>b<think>y</think>c"), "abc");
        assert_eq!(strip_think("Summary <think>cut off"), "Summary");
    }

    #[test]
    fn test_model_availability() {
        let client = CannedClient::new("x").with_models(vec!["deepseek-r1:7b".into()]);
        assert!(client.is_model_available("deepseek-r1").unwrap());
        assert!(!client.is_model_available("llama3").unwrap());
        assert!(FailingClient.is_model_available("x").is_err());
    }
}
