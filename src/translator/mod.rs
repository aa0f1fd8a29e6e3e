//! Translation of a coding sequence into protein.
//!
//! A [`Translator`] walks a sense-strand nucleotide sequence codon by codon,
//! honouring the reading frame, partiality and per-position exceptions, then
//! validates the protein (start codon, stop codons, frame length). Optional
//! fixes repair common submission errors instead of failing.

mod exceptions;
mod request;
mod result;

pub use request::{CodonException, TranslationException, TranslationFixes, TranslationRequest};
pub use result::TranslationResult;

use std::collections::HashMap;

use log::debug;

use crate::amino_acid;
use crate::codon::{self, Codon};
use crate::codon_translator::CodonTranslator;
use crate::error::TranslationError;
use crate::validation::MessageKey;

/// Translator for one coding sequence, configured by an immutable request.
#[derive(Debug, Clone)]
pub struct Translator {
    request: TranslationRequest,
    codon_translator: CodonTranslator,
}

impl Translator {
    /// Fails with `CodonTranslator-2` if the genetic code is not defined.
    pub fn new(request: TranslationRequest) -> Result<Self, TranslationError> {
        let mut codon_translator = CodonTranslator::new(request.translation_table)?;
        for exception in &request.codon_exceptions {
            codon_translator.add_codon_exception(&exception.codon, exception.amino_acid);
        }
        Ok(Self {
            request,
            codon_translator,
        })
    }

    #[must_use]
    pub fn request(&self) -> &TranslationRequest {
        &self.request
    }

    #[must_use]
    pub fn codon_translator(&self) -> &CodonTranslator {
        &self.codon_translator
    }

    /// Translate a sense-strand sequence.
    pub fn translate(&self, bases: &[u8]) -> Result<TranslationResult, TranslationError> {
        self.validate_codon_start(bases.len())?;
        let exceptions = exceptions::position_map(
            &self.request.translation_exceptions,
            self.request.codon_start,
            bases.len(),
        )?;

        // a partial terminal stop exception is completed before the frame check
        let mut bases = bases.to_vec();
        bases.resize(bases.len() + exceptions.padding, b'n');
        self.validate_frame(bases.len())?;

        let mut result =
            TranslationResult::new(self.request.left_partial, self.request.right_partial);
        self.walk(&bases, &exceptions.amino_acids, &mut result)?;

        if result.codons.is_empty() {
            if self.request.is_tolerant() {
                return Ok(result);
            }
            return Err(TranslationError::new(MessageKey::EMPTY_TRANSLATION));
        }

        self.validate_translation(&mut result)?;
        Ok(result)
    }

    fn validate_codon_start(&self, length: usize) -> Result<(), TranslationError> {
        let request = &self.request;
        let codon_start = request.codon_start;
        if !(1..=3).contains(&codon_start) {
            return Err(TranslationError::new(MessageKey::INVALID_CODON_START).with(codon_start));
        }
        if codon_start != 1 && !(request.left_partial || request.non_translating) {
            return Err(
                TranslationError::new(MessageKey::CODON_START_NOT_PARTIAL).with(codon_start)
            );
        }
        if length < 3 && codon_start != 1 {
            return Err(TranslationError::new(MessageKey::SHORT_SEQUENCE_CODON_START)
                .with(codon_start)
                .with(length));
        }
        Ok(())
    }

    fn validate_frame(&self, length: usize) -> Result<(), TranslationError> {
        let request = &self.request;
        if length < 3 {
            if !(request.left_partial && request.right_partial) {
                return Err(
                    TranslationError::new(MessageKey::SHORT_SEQUENCE_NOT_PARTIAL).with(length)
                );
            }
            return Ok(());
        }
        let in_frame = (length - request.codon_start + 1) % 3 == 0;
        let tolerated = request.peptide_feature
            || request.left_partial
            || request.right_partial
            || request.is_tolerant();
        if !in_frame && !tolerated {
            return Err(TranslationError::new(MessageKey::INVALID_FRAME_LENGTH)
                .with(length)
                .with(request.codon_start));
        }
        Ok(())
    }

    fn walk(
        &self,
        bases: &[u8],
        exceptions: &HashMap<usize, u8>,
        result: &mut TranslationResult,
    ) -> Result<(), TranslationError> {
        let length = bases.len();
        let first_offset = self.request.codon_start - 1;
        let is_start = |offset: usize| offset == first_offset && !self.request.left_partial;

        let mut offset = first_offset;
        while offset + 3 <= length {
            let codon = self.translate_codon(
                &bases[offset..offset + 3],
                offset + 1,
                is_start(offset),
                exceptions,
                result,
            )?;
            result.codons.push(codon);
            offset += 3;
        }

        if offset < length {
            let mut padded = bases[offset..].to_vec();
            padded.resize(3, b'n');
            let codon =
                self.translate_codon(&padded, offset + 1, is_start(offset), exceptions, result)?;
            if codon.amino_acid() == amino_acid::UNKNOWN {
                result.trailing_bases = bases[offset..]
                    .iter()
                    .map(|&b| char::from(codon::normalize_base(b)))
                    .collect();
            } else {
                result.codons.push(codon);
            }
        }

        let unknown = result
            .codons
            .iter()
            .filter(|c| c.amino_acid() == amino_acid::UNKNOWN)
            .count();
        if unknown * 2 > result.codons.len() {
            return Err(TranslationError::new(MessageKey::TOO_MANY_UNKNOWN_AMINO_ACIDS)
                .with(unknown)
                .with(result.codons.len()));
        }
        Ok(())
    }

    fn translate_codon(
        &self,
        bases: &[u8],
        position: usize,
        start: bool,
        exceptions: &HashMap<usize, u8>,
        result: &mut TranslationResult,
    ) -> Result<Codon, TranslationError> {
        let mut codon = Codon::new(bases, position);
        if let Some(&amino_acid) = exceptions.get(&position) {
            codon.set_translation_exception(amino_acid);
            return Ok(codon);
        }
        if !start {
            self.codon_translator.translate_other_codon(&mut codon)?;
            return Ok(codon);
        }

        self.codon_translator.translate_start_codon(&mut codon)?;
        if self.request.fixes.degenerate_start_codon
            && codon.amino_acid() != amino_acid::METHIONINE
            && self.codon_translator.is_degenerate_start_codon(&codon)
        {
            debug!("fixed degenerate start codon {} at {}", codon.codon(), position);
            codon.set_translation_exception(amino_acid::METHIONINE);
            result.fixed_degenerate_start_codon = true;
        }
        Ok(codon)
    }

    /// Check start and stop codons, applying enabled fixes.
    ///
    /// Problems tolerated for the feature leave the result without a
    /// conceptual translation instead of failing.
    fn validate_translation(&self, result: &mut TranslationResult) -> Result<(), TranslationError> {
        let request = &self.request;
        let trailing_stops = result
            .codons
            .iter()
            .rev()
            .take_while(|c| c.is_stop())
            .count();
        let conceptual = result.codons.len() - trailing_stops;
        result.conceptual_translation_codons = conceptual;

        if conceptual == 0 {
            let terminal_stop_only =
                trailing_stops == 1 && result.trailing_bases.is_empty() && result.left_partial;
            if request.is_tolerant() || terminal_stop_only {
                return Ok(());
            }
            return Err(TranslationError::new(MessageKey::ONLY_STOP_CODONS));
        }

        let internal_stop = result.codons[..conceptual]
            .iter()
            .find(|c| c.is_stop())
            .map(Codon::position);
        if let Some(position) = internal_stop {
            if request.is_tolerant() {
                return degrade(result);
            }
            return Err(TranslationError::new(MessageKey::INTERNAL_STOP_CODON).with(position));
        }

        let first = &result.codons[0];
        if first.amino_acid() != amino_acid::METHIONINE
            && !result.left_partial
            && !request.exception
            && !request.peptide_feature
        {
            if request.fixes.missing_start_codon {
                debug!("fixed missing start codon {}", first.codon());
                // codon 1 keeps its start table amino acid, which is not Met here
                result.left_partial = true;
                result.fixed_left_partial = true;
                result.fixed_missing_start_codon = true;
            } else if request.non_translating {
                return degrade(result);
            } else {
                return Err(
                    TranslationError::new(MessageKey::MISSING_START_CODON).with(first.codon())
                );
            }
        }

        if trailing_stops > 1 {
            if request.non_translating {
                return degrade(result);
            }
            return Err(
                TranslationError::new(MessageKey::MULTIPLE_TRAILING_STOP_CODONS).with(trailing_stops)
            );
        }

        if trailing_stops == 1 && result.right_partial {
            if request.fixes.right_partial_stop_codon {
                debug!("fixed right partial CDS with stop codon");
                result.right_partial = false;
                result.fixed_right_partial = true;
                result.fixed_right_partial_stop_codon = true;
            } else if request.non_translating {
                return degrade(result);
            } else {
                return Err(TranslationError::new(MessageKey::STOP_CODON_RIGHT_PARTIAL));
            }
        }

        if trailing_stops == 0 && !result.right_partial && !request.peptide_feature {
            if request.non_translating {
                return degrade(result);
            }
            return Err(TranslationError::new(MessageKey::MISSING_STOP_CODON));
        }

        if trailing_stops > 0 && !result.trailing_bases.is_empty() {
            if request.fixes.right_partial_codon {
                debug!("trimmed {} bases after stop codon", result.trailing_bases.len());
                result.trimmed_trailing_bases = result.trailing_bases.len();
                result.trailing_bases.clear();
                result.fixed_right_partial_codon = true;
            } else if request.non_translating {
                return degrade(result);
            } else {
                return Err(TranslationError::new(MessageKey::STOP_CODON_TRAILING_BASES)
                    .with(&result.trailing_bases));
            }
        }

        Ok(())
    }
}

/// Leave the result without a conceptual translation.
fn degrade(result: &mut TranslationResult) -> Result<(), TranslationError> {
    result.conceptual_translation_codons = 0;
    Ok(())
}

/// Compare a declared translation with a conceptual one.
///
/// `X` in the declared translation matches any residue. Trailing `X` runs in
/// the declared translation are padding: they may extend past the conceptual
/// translation but only match unknown residues. The comparison is not
/// symmetric.
#[must_use]
pub fn equals_translation(expected: &str, conceptual: &str) -> bool {
    let expected = expected.as_bytes();
    let conceptual = conceptual.as_bytes();
    if expected.len() < conceptual.len() {
        return false;
    }
    let padding_start = expected
        .iter()
        .rposition(|&aa| aa != amino_acid::UNKNOWN)
        .map_or(0, |i| i + 1);

    let aligned = expected.iter().zip(conceptual).enumerate();
    for (i, (&e, &c)) in aligned {
        let matches = if i < padding_start {
            e == c || e == amino_acid::UNKNOWN
        } else {
            c == amino_acid::UNKNOWN
        };
        if !matches {
            return false;
        }
    }
    expected[conceptual.len()..]
        .iter()
        .all(|&aa| aa == amino_acid::UNKNOWN)
}
