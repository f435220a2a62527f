//! # chatpluck CLI
//!
//! Command-line interface for the chatpluck library.

use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chatpluck::cli::Args;
use chatpluck::config::{AnalysisConfig, default_output_path};
use chatpluck::core::{Document, Extraction, SenderCatalog, extract_messages};
use chatpluck::format::export;
use chatpluck::parsing::Grammar;
use chatpluck::prompt::TerminalPrompt;
use chatpluck::{ChatpluckError, Transcript};

/// Invalid sender answers allowed before giving up.
const SELECTION_ATTEMPTS: usize = 3;

fn main() {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();
    let args = <Args as ClapParser>::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatpluckError> {
    let total_start = Instant::now();
    let config = args.extract_config();
    let analysis_config = args.analysis_config();
    let mut prompt = TerminalPrompt::stdio();

    println!("📦 chatpluck v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", config.input().display());
    if config.grammar == Grammar::Legacy {
        println!("🕰️  Grammar: legacy (deprecated)");
    }
    if analysis_config.enabled {
        println!("🧠 Model:   {} @ {}", analysis_config.model, analysis_config.endpoint);
    }
    println!();

    // Step 1: Read and catalog
    println!("⏳ Reading transcript...");
    let read_start = Instant::now();
    let transcript = Transcript::from_path(config.input())?;
    let catalog = SenderCatalog::from_transcript(&transcript);
    println!(
        "   {} lines, {} senders ({:.2}s)",
        transcript.len(),
        catalog.len(),
        read_start.elapsed().as_secs_f64()
    );

    if args.list_senders {
        let catalog = catalog.require_non_empty(&transcript)?;
        println!();
        println!("👥 Senders:");
        for (index, sender, count) in catalog.numbered(&transcript) {
            println!("   {:>3}. {} ({} messages)", index, sender, count);
        }
        return Ok(());
    }

    // Step 2: Pick the sender
    let sender = match &config.sender {
        Some(sender) if !config.grammar.discovers_senders() => {
            warn!("legacy grammar skips the sender check and may misattribute quoted lines");
            sender.clone()
        }
        Some(sender) => {
            let catalog = catalog.require_non_empty(&transcript)?;
            catalog.select(sender)?.to_string()
        }
        None => {
            let catalog = catalog.require_non_empty(&transcript)?;
            println!();
            prompt.choose_sender(&catalog, &transcript, SELECTION_ATTEMPTS)?
        }
    };
    println!("👤 Sender:  {}", sender);

    // Step 3: Extract
    let extraction = match extract_messages(&transcript, &sender, config.grammar).require_non_empty() {
        Ok(extraction) => extraction,
        Err(e) if e.is_no_messages() => {
            println!("ℹ️  No messages found for \"{}\"", sender);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!();
    println!("📩 Messages from \"{}\":", sender);
    for (i, msg) in extraction.iter().enumerate() {
        println!("{}. {}", i + 1, msg);
    }

    // Step 4: Optional analysis
    let analysis = if analysis_config.enabled {
        let summary = run_analysis(&extraction, &analysis_config)?;
        println!();
        println!("🧠 Personality Analysis:");
        println!("{}", summary);
        Some(summary)
    } else {
        None
    };

    // Step 5: Approval
    println!();
    if config.auto_approve {
        println!("⏭️  Skipping approval (--yes)");
    } else if !prompt.confirm("Do you approve saving these messages?")? {
        println!("❌ Operation canceled.");
        return Ok(());
    }

    // Step 6: Export
    let default_path = default_output_path(&sender);
    let output = match &config.output {
        Some(path) => path.clone(),
        None if config.auto_approve => default_path.clone(),
        None => prompt.output_path(&default_path)?,
    };

    let doc = Document::from_extraction(&extraction, analysis.as_deref());
    let written = export_with_retry(&doc, output, &default_path, &mut prompt, !config.auto_approve)?;

    println!();
    println!("✅ Messages saved to {}", written.display());

    println!();
    println!("📊 Summary:");
    println!("   Transcript: {} lines", transcript.len());
    println!("   Extracted:  {} messages", extraction.len());
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Writes the document, offering another filename after a failed export.
///
/// The extraction is kept in memory, so a retry never re-reads the transcript.
fn export_with_retry<R: BufRead, W: Write>(
    doc: &Document,
    mut path: PathBuf,
    default_path: &std::path::Path,
    prompt: &mut TerminalPrompt<R, W>,
    interactive: bool,
) -> Result<PathBuf, ChatpluckError> {
    loop {
        println!("💾 Writing {}...", path.display());
        match export(doc, &path) {
            Ok(_) => return Ok(path),
            Err(e) if interactive && e.is_export() => {
                eprintln!("❌ Error: {}", e);
                if !prompt.confirm("Save to a different file?")? {
                    return Err(e);
                }
                path = prompt.output_path(default_path)?;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(feature = "analysis")]
fn run_analysis(extraction: &Extraction, config: &AnalysisConfig) -> Result<String, ChatpluckError> {
    use chatpluck::analysis::{AnalysisClient, OllamaClient, analyze};

    let client = OllamaClient::new(config)?;
    match client.is_model_available(&config.model) {
        Ok(false) => println!("⚠️  Model '{}' is not listed by {}", config.model, client.base_url()),
        Ok(true) => {}
        Err(e) => warn!(error = %e, "could not list models"),
    }

    println!("🧠 Analyzing {} messages with {}...", extraction.len(), config.model);
    let start = Instant::now();
    let summary = analyze(&client, extraction, config)?;
    println!("   Done ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(summary)
}

#[cfg(not(feature = "analysis"))]
fn run_analysis(_extraction: &Extraction, _config: &AnalysisConfig) -> Result<String, ChatpluckError> {
    Err(ChatpluckError::Config(
        "--analyze needs chatpluck built with the 'analysis' feature".into(),
    ))
}
