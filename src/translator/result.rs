//! Output of one translation pass.

use crate::codon::Codon;

/// Codons produced by a [`Translator`](super::Translator) and the fixes it applied.
///
/// Built once per translation and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResult {
    pub(crate) codons: Vec<Codon>,
    pub(crate) conceptual_translation_codons: usize,
    pub(crate) trailing_bases: String,
    pub(crate) fixed_degenerate_start_codon: bool,
    pub(crate) fixed_missing_start_codon: bool,
    pub(crate) fixed_right_partial_stop_codon: bool,
    pub(crate) fixed_right_partial_codon: bool,
    pub(crate) fixed_left_partial: bool,
    pub(crate) fixed_right_partial: bool,
    pub(crate) left_partial: bool,
    pub(crate) right_partial: bool,
    pub(crate) trimmed_trailing_bases: usize,
}

impl TranslationResult {
    pub(crate) fn new(left_partial: bool, right_partial: bool) -> Self {
        Self {
            left_partial,
            right_partial,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn codons(&self) -> &[Codon] {
        &self.codons
    }

    /// Number of leading codons that form the conceptual translation.
    #[must_use]
    pub fn conceptual_translation_codons(&self) -> usize {
        self.conceptual_translation_codons
    }

    /// Leftover bases (0 to 2) that did not form a translated codon.
    #[must_use]
    pub fn trailing_bases(&self) -> &str {
        &self.trailing_bases
    }

    /// Amino acids of every codon, stops included.
    #[must_use]
    pub fn translation(&self) -> String {
        self.codons.iter().map(|c| char::from(c.amino_acid())).collect()
    }

    /// Amino acids before the trailing stop codons.
    #[must_use]
    pub fn conceptual_translation(&self) -> String {
        self.codons
            .iter()
            .take(self.conceptual_translation_codons)
            .map(|c| char::from(c.amino_acid()))
            .collect()
    }

    /// The translated bases: codons followed by trailing bases.
    #[must_use]
    pub fn sequence(&self) -> String {
        let mut sequence = String::with_capacity(self.translation_length());
        for codon in &self.codons {
            sequence.push_str(codon.codon());
        }
        sequence.push_str(&self.trailing_bases);
        sequence
    }

    /// Number of bases covered by codons and trailing bases.
    #[must_use]
    pub fn translation_length(&self) -> usize {
        self.codons.len() * 3 + self.trailing_bases.len()
    }

    #[must_use]
    pub fn has_conceptual_translation(&self) -> bool {
        self.conceptual_translation_codons > 0
    }

    #[must_use]
    pub fn is_fixed_degenerate_start_codon(&self) -> bool {
        self.fixed_degenerate_start_codon
    }

    #[must_use]
    pub fn is_fixed_missing_start_codon(&self) -> bool {
        self.fixed_missing_start_codon
    }

    #[must_use]
    pub fn is_fixed_right_partial_stop_codon(&self) -> bool {
        self.fixed_right_partial_stop_codon
    }

    #[must_use]
    pub fn is_fixed_right_partial_codon(&self) -> bool {
        self.fixed_right_partial_codon
    }

    /// Left partiality was changed by a fix.
    #[must_use]
    pub fn is_fixed_left_partial(&self) -> bool {
        self.fixed_left_partial
    }

    /// Right partiality was changed by a fix.
    #[must_use]
    pub fn is_fixed_right_partial(&self) -> bool {
        self.fixed_right_partial
    }

    /// True if any repair was applied.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.fixed_degenerate_start_codon
            || self.fixed_missing_start_codon
            || self.fixed_right_partial_stop_codon
            || self.fixed_right_partial_codon
    }

    /// Final left partiality in sense-strand orientation.
    #[must_use]
    pub fn is_left_partial(&self) -> bool {
        self.left_partial
    }

    #[must_use]
    pub fn is_right_partial(&self) -> bool {
        self.right_partial
    }

    /// Bases removed from the 3' end by the right-partial codon fix.
    #[must_use]
    pub fn trimmed_trailing_bases(&self) -> usize {
        self.trimmed_trailing_bases
    }
}
