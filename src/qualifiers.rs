//! Parsing of `/transl_except` and `/codon` qualifier values.

use crate::amino_acid;
use crate::codon;
use crate::entry::qualifier;
use crate::error::TranslationError;
use crate::validation::MessageKey;

/// A parsed `/transl_except` value in entry coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslExcept {
    pub begin: usize,
    pub end: usize,
    pub complement: bool,
    pub amino_acid: u8,
}

/// A parsed `/codon` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonQualifier {
    pub codon: String,
    pub amino_acid: u8,
}

/// Parse `(pos:213..215,aa:Trp)`, `(pos:complement(4156..4158),aa:TERM)`
/// or `(pos:1017,aa:TERM)`.
pub fn parse_transl_except(value: &str) -> Result<TranslExcept, TranslationError> {
    let invalid = || invalid_qualifier(qualifier::TRANSL_EXCEPT, value);
    let (position, aa) = split_fields(value, "pos:").ok_or_else(invalid)?;

    let (range, complement) = match position
        .strip_prefix("complement(")
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (position, false),
    };
    let (begin, end) = match range.split_once("..") {
        Some((begin, end)) => (parse_position(begin), parse_position(end)),
        None => (parse_position(range), parse_position(range)),
    };
    let (Some(begin), Some(end)) = (begin, end) else {
        return Err(invalid());
    };

    Ok(TranslExcept {
        begin,
        end,
        complement,
        amino_acid: amino_acid::from_abbreviation(aa).ok_or_else(invalid)?,
    })
}

/// Parse `(seq:"tga",aa:Trp)`.
pub fn parse_codon(value: &str) -> Result<CodonQualifier, TranslationError> {
    let invalid = || invalid_qualifier(qualifier::CODON, value);
    let (sequence, aa) = split_fields(value, "seq:").ok_or_else(invalid)?;

    let bases = sequence.trim_matches('"').to_ascii_lowercase();
    let is_codon = bases.len() == 3
        && bases
            .bytes()
            .all(|b| !codon::base_expansion(codon::normalize_base(b)).is_empty());
    if !is_codon {
        return Err(invalid());
    }

    Ok(CodonQualifier {
        codon: bases,
        amino_acid: amino_acid::from_abbreviation(aa).ok_or_else(invalid)?,
    })
}

/// Split `(<prefix><first>,aa:<second>)` into its two values.
fn split_fields<'a>(value: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let inner = value
        .trim()
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))?;
    let (first, second) = inner.rsplit_once(",aa:")?;
    let first = first.trim().strip_prefix(prefix)?.trim();
    Some((first, second.trim()))
}

fn parse_position(value: &str) -> Option<usize> {
    value
        .trim()
        .trim_start_matches('<')
        .trim_start_matches('>')
        .parse()
        .ok()
        .filter(|&p| p > 0)
}

fn invalid_qualifier(name: &str, value: &str) -> TranslationError {
    TranslationError::new(MessageKey::INVALID_QUALIFIER)
        .with(name)
        .with(value)
}
