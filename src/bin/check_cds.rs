use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use cdscheck::cds::CdsTranslator;
use cdscheck::cli;
use cdscheck::config::TranslatorConfig;
use cdscheck::entry;
use cdscheck::logging;
use cdscheck::segment::LocalSegmentFactory;
use cdscheck::taxonomy::InMemoryTaxonomy;
use cdscheck::validation::{Severity, ValidationResult};

#[derive(Parser)]
#[command(
    name = "check_cds",
    about = "Translate CDS features and check them against their declared translations"
)]
struct Cli {
    /// JSON file of entries (optionally gzip compressed)
    entries: PathBuf,

    /// JSON file of taxa used to select genetic codes
    #[arg(short = 't', long = "taxonomy")]
    taxonomy: Option<PathBuf>,

    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write the entries, with fixes and accepted translations applied, to this file
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Print debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    logging::init_logger(cli_args.verbose)?;

    cli::banner("Check CDS");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = match &cli_args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::default(),
    };
    let taxonomy = match &cli_args.taxonomy {
        Some(path) => InMemoryTaxonomy::from_file(path)?,
        None => InMemoryTaxonomy::default(),
    };

    cli::kv("Entries", &cli_args.entries.display().to_string());
    cli::kv("Taxa", &taxonomy.len().to_string());
    cli::kv("Accept translation", &config.accept_translation.to_string());
    if let Some(severity) = config.severity {
        cli::kv("Severity", &severity.to_string());
    }

    let mut entries = entry::read_entries(&cli_args.entries)
        .with_context(|| format!("failed to read entries: {}", cli_args.entries.display()))?;
    cli::kv("Entry count", &entries.len().to_string());

    eprintln!();

    // ── Translation ──────────────────────────────────────
    cli::section("Translation");

    let translator = CdsTranslator::new(config, &taxonomy, &LocalSegmentFactory);
    let mut results = ValidationResult::new();
    let mut num_features = 0usize;

    for entry in &mut entries {
        // features are translated against a snapshot so they can be updated in place
        let snapshot = entry.clone();
        for feature in entry.features.iter_mut().filter(|f| f.is_translatable()) {
            num_features += 1;
            let result = translator.translate(feature, &snapshot);
            for message in result.messages() {
                cli::message(message);
            }
            results.extend(result);
        }
    }

    eprintln!();

    // ── Summary ──────────────────────────────────────────
    cli::section("Summary");

    cli::kv("Features", &num_features.to_string());
    cli::kv("Errors", &results.count(Severity::Error).to_string());
    cli::kv("Warnings", &results.count(Severity::Warning).to_string());
    cli::kv("Fixes", &results.count(Severity::Fix).to_string());

    if let Some(out) = &cli_args.out {
        let file = File::create(out)
            .with_context(|| format!("failed to create output: {}", out.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &entries)
            .with_context(|| format!("failed to write entries: {}", out.display()))?;
        cli::kv("Output", &out.display().to_string());
    }

    if results.is_valid() {
        cli::success("all translations are valid");
    } else {
        cli::warning("translation errors found");
    }

    cli::print_summary(start);

    if !results.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}
