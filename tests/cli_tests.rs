//! Additional tests for the CLI argument types and the string-parsed enums
//! they feed.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use chatpluck::cli::Args;
use chatpluck::config::{DEFAULT_ENDPOINT, DEFAULT_INPUT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use chatpluck::format::DocumentFormat;
use chatpluck::parsing::Grammar;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("chatpluck").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_defaults() {
    let args = parse(&[]);
    assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
    assert!(args.output.is_none());
    assert!(!args.analyze);
    assert!(!args.yes);
    assert_eq!(args.grammar(), Grammar::Timestamped);

    let analysis = args.analysis_config();
    assert!(!analysis.enabled);
    assert_eq!(analysis.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(analysis.model, DEFAULT_MODEL);
    assert_eq!(analysis.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(args.log_filter(), "chatpluck=warn");
}

#[test]
fn test_default_output_follows_sender() {
    let config = parse(&["-s", "Mary Ann"]).extract_config();
    assert_eq!(config.output_path_for("Mary Ann"), PathBuf::from("messages_Mary_Ann.odt"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(Args::try_parse_from(["chatpluck", "--format", "csv"]).is_err());
}

#[test]
fn test_grammar_from_str_all_variants() {
    assert_eq!(Grammar::from_str("timestamped").unwrap(), Grammar::Timestamped);
    assert_eq!(Grammar::from_str("Strict").unwrap(), Grammar::Timestamped);
    assert_eq!(Grammar::from_str("legacy").unwrap(), Grammar::Legacy);

    let err = Grammar::from_str("loose").unwrap_err();
    assert!(err.contains("timestamped, strict, legacy"));
}

#[test]
fn test_document_format_from_str_all_variants() {
    assert_eq!(DocumentFormat::from_str("odt").unwrap(), DocumentFormat::Odt);
    assert_eq!(DocumentFormat::from_str("PDF").unwrap(), DocumentFormat::Pdf);
    assert!(DocumentFormat::from_str("docx").is_err());
    assert!(DocumentFormat::from_str("").is_err());
}

#[test]
fn test_document_format_metadata() {
    for format in DocumentFormat::all() {
        assert_eq!(format.extension(), format.feature());
        assert_eq!(format.to_string().to_lowercase(), format.extension());
    }
    assert_eq!(DocumentFormat::Pdf.mime_type(), "application/pdf");
}
