//! Validation of per-position translation exceptions.

use std::collections::HashMap;

use crate::amino_acid;
use crate::error::TranslationError;
use crate::validation::MessageKey;

use super::request::TranslationException;

/// Validated translation exceptions.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct ExceptionPositions {
    /// Forced amino acid keyed by the 1-based position of the codon's first base.
    pub amino_acids: HashMap<usize, u8>,
    /// `n` bases needed to complete a partial terminal stop codon.
    pub padding: usize,
}

/// Check translation exceptions against the sequence and reading frame.
///
/// A 1 or 2 base stop exception at the end of the sequence is accepted; the
/// sequence must then be padded with `n` to complete the codon.
pub(super) fn position_map(
    exceptions: &[TranslationException],
    codon_start: usize,
    length: usize,
) -> Result<ExceptionPositions, TranslationError> {
    let mut positions = ExceptionPositions {
        amino_acids: HashMap::with_capacity(exceptions.len()),
        padding: 0,
    };
    for exception in exceptions {
        let TranslationException {
            begin,
            end,
            amino_acid,
        } = *exception;

        if begin < codon_start {
            return Err(TranslationError::new(MessageKey::EXCEPTION_BEFORE_CODON_START)
                .with(begin)
                .with(codon_start));
        }
        if begin > length {
            return Err(TranslationError::new(MessageKey::EXCEPTION_BEYOND_SEQUENCE)
                .with(begin)
                .with(length));
        }
        if end < begin {
            return Err(TranslationError::new(MessageKey::EXCEPTION_END_BEFORE_BEGIN)
                .with(begin)
                .with(end));
        }
        if end > length {
            return Err(TranslationError::new(MessageKey::EXCEPTION_BEYOND_SEQUENCE)
                .with(end)
                .with(length));
        }

        let span = end - begin + 1;
        let partial_stop = span < 3 && amino_acid == amino_acid::STOP && end == length;
        if span != 3 && !partial_stop {
            return Err(TranslationError::new(MessageKey::EXCEPTION_INVALID_SPAN)
                .with(begin)
                .with(end));
        }
        if (begin - codon_start) % 3 != 0 {
            return Err(TranslationError::new(MessageKey::EXCEPTION_OUT_OF_FRAME)
                .with(begin)
                .with(codon_start));
        }
        if partial_stop {
            positions.padding = 3 - span;
        }
        positions.amino_acids.insert(begin, amino_acid);
    }
    Ok(positions)
}
