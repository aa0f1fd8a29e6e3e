use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use cdscheck::cli;
use cdscheck::config::TranslatorConfig;
use cdscheck::fasta;
use cdscheck::logging;
use cdscheck::translation_table::TranslationTable;
use cdscheck::translator::{TranslationFixes, TranslationRequest, Translator};
use cdscheck::validation::Severity;

#[derive(Parser)]
#[command(
    name = "translate_fasta",
    about = "Translate nucleotide FASTA records into protein FASTA"
)]
struct Cli {
    /// Nucleotide FASTA file (optionally gzip compressed)
    fasta: PathBuf,

    /// NCBI genetic code; defaults to the configured table or 1
    #[arg(short = 't', long = "table")]
    table: Option<u32>,

    /// Reading frame offset (1, 2 or 3)
    #[arg(long = "codon-start", default_value_t = 1)]
    codon_start: usize,

    /// Treat records as 5' partial
    #[arg(long = "left-partial")]
    left_partial: bool,

    /// Treat records as 3' partial
    #[arg(long = "right-partial")]
    right_partial: bool,

    /// Apply every available fix instead of reporting errors
    #[arg(long = "fix")]
    fix: bool,

    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    logging::init_logger(cli_args.verbose)?;

    cli::banner("Translate FASTA");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = match &cli_args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::default(),
    };
    let table = cli_args
        .table
        .or(config.default_translation_table)
        .unwrap_or(TranslationTable::DEFAULT);
    let fixes = if cli_args.fix {
        TranslationFixes::all()
    } else {
        config.fixes
    };

    let request = TranslationRequest {
        codon_start: cli_args.codon_start,
        left_partial: cli_args.left_partial,
        right_partial: cli_args.right_partial,
        fixes,
        ..TranslationRequest::new(table)
    };
    let translator = Translator::new(request)
        .map_err(|e| anyhow::anyhow!("invalid translation settings: {e}"))?;

    cli::kv("FASTA", &cli_args.fasta.display().to_string());
    cli::kv("Genetic code", &table.to_string());
    cli::kv("Codon start", &cli_args.codon_start.to_string());

    let records = fasta::read_fasta(&cli_args.fasta)
        .with_context(|| format!("failed to read FASTA: {}", cli_args.fasta.display()))?;
    cli::kv("Records", &records.len().to_string());

    eprintln!();

    // ── Translation ──────────────────────────────────────
    cli::section("Translation");

    let mut num_failed = 0usize;
    for (id, bases) in &records {
        match translator.translate(bases) {
            Ok(result) => {
                debug!("{id}: {} codons", result.codons().len());
                if result.is_fixed() {
                    cli::warning(&format!("{id}: fixes applied"));
                }
                println!(">{id}");
                println!("{}", result.conceptual_translation());
            }
            Err(err) => {
                num_failed += 1;
                let mut message = err.into_message(Severity::Error);
                message.params.insert(0, id.clone());
                cli::message(&message);
            }
        }
    }

    eprintln!();
    cli::kv("Translated", &(records.len() - num_failed).to_string());
    cli::kv("Failed", &num_failed.to_string());
    if num_failed == 0 {
        cli::success("all records translated");
    }

    cli::print_summary(start);
    Ok(())
}
