//! cdscheck: codon translation and CDS translation validation for annotated
//! nucleotide sequence records.

pub mod error;

pub mod amino_acid;
pub mod cds;
pub mod cli;
pub mod codon;
pub mod codon_translator;
pub mod config;
pub mod entry;
pub mod fasta;
pub mod logging;
pub mod qualifiers;
pub mod segment;
pub mod strand;
pub mod taxonomy;
pub mod translation_table;
pub mod translator;
pub mod validation;
