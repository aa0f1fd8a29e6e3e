//! Sequence entry model consulted by CDS translation.

mod feature;
mod location;

pub use feature::{CDS, Feature, FeatureKind, PEPTIDE_FEATURES, Qualifier, SOURCE, qualifier};
pub use location::{CompoundLocation, Location};

use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fasta;

/// Data class of constructed (CON) entries, which may carry no sequence.
pub const CON_DATA_CLASS: &str = "CON";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub primary_accession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_class: Option<String>,
    /// Nucleotide sequence, lower case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Entry {
    #[must_use]
    pub fn new(primary_accession: &str, sequence: &str) -> Self {
        Self {
            primary_accession: primary_accession.to_string(),
            sequence: Some(sequence.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// The first `source` feature.
    #[must_use]
    pub fn primary_source_feature(&self) -> Option<&Feature> {
        self.features.iter().find(|f| f.kind() == FeatureKind::Source)
    }

    #[must_use]
    pub fn is_con(&self) -> bool {
        self.data_class.as_deref() == Some(CON_DATA_CLASS)
    }

    /// Sequence bytes, if the entry has a non-empty sequence.
    #[must_use]
    pub fn sequence_bytes(&self) -> Option<&[u8]> {
        self.sequence
            .as_deref()
            .map(str::as_bytes)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn sequence_length(&self) -> usize {
        self.sequence.as_ref().map_or(0, String::len)
    }
}

/// Read a JSON array of entries from a reader.
pub fn parse_entries<R: BufRead>(reader: R) -> Result<Vec<Entry>, Error> {
    let mut entries: Vec<Entry> = serde_json::from_reader(reader)
        .map_err(|e| Error::Parse(format!("invalid entry JSON: {e}")))?;
    for entry in &mut entries {
        if let Some(sequence) = entry.sequence.as_mut() {
            sequence.make_ascii_lowercase();
        }
    }
    Ok(entries)
}

/// Read entries from a JSON file, gzip-compressed if it ends in `.gz`.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>, Error> {
    parse_entries(fasta::open(path)?)
}
