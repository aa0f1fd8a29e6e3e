//! Immutable per-CDS translation configuration.

use serde::{Deserialize, Serialize};

use crate::translation_table::TranslationTable;

/// Forces an amino acid for the codon at `begin..=end`.
///
/// Positions are 1-based within the sense-strand sequence being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationException {
    pub begin: usize,
    pub end: usize,
    pub amino_acid: u8,
}

/// Forces an amino acid for every occurrence of one concrete codon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonException {
    pub codon: String,
    pub amino_acid: u8,
}

/// Repairs the translator may apply instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFixes {
    /// Promote a degenerate start codon to `M`.
    pub degenerate_start_codon: bool,
    /// Mark the feature left-partial when it does not start with `M`.
    pub missing_start_codon: bool,
    /// Clear right-partiality when a stop codon is present.
    pub right_partial_stop_codon: bool,
    /// Drop leftover bases after the stop codon.
    pub right_partial_codon: bool,
}

impl TranslationFixes {
    /// All fixes enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            degenerate_start_codon: true,
            missing_start_codon: true,
            right_partial_stop_codon: true,
            right_partial_codon: true,
        }
    }
}

/// Everything a [`Translator`](super::Translator) needs for one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub translation_table: u32,
    /// 1-based reading frame offset (1, 2 or 3).
    pub codon_start: usize,
    pub left_partial: bool,
    pub right_partial: bool,
    /// Pseudo gene or pseudo CDS.
    pub non_translating: bool,
    /// The feature declares a translational exception.
    pub exception: bool,
    pub peptide_feature: bool,
    pub translation_exceptions: Vec<TranslationException>,
    pub codon_exceptions: Vec<CodonException>,
    pub fixes: TranslationFixes,
}

impl Default for TranslationRequest {
    fn default() -> Self {
        Self {
            translation_table: TranslationTable::DEFAULT,
            codon_start: 1,
            left_partial: false,
            right_partial: false,
            non_translating: false,
            exception: false,
            peptide_feature: false,
            translation_exceptions: Vec::new(),
            codon_exceptions: Vec::new(),
            fixes: TranslationFixes::default(),
        }
    }
}

impl TranslationRequest {
    #[must_use]
    pub fn new(translation_table: u32) -> Self {
        Self {
            translation_table,
            ..Self::default()
        }
    }

    /// Exception or pseudo features tolerate structural problems.
    #[must_use]
    pub fn is_tolerant(&self) -> bool {
        self.exception || self.non_translating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let request = TranslationRequest::default();
        assert_eq!(request.translation_table, 1);
        assert_eq!(request.codon_start, 1);
        assert!(!request.is_tolerant());
        assert_eq!(request.fixes, TranslationFixes::default());
    }

    #[test]
    fn fixes_deserialize_camel_case() {
        let fixes: TranslationFixes =
            serde_json::from_str(r#"{"missingStartCodon": true, "rightPartialCodon": true}"#)
                .unwrap();
        assert!(fixes.missing_start_codon);
        assert!(fixes.right_partial_codon);
        assert!(!fixes.degenerate_start_codon);
    }
}
