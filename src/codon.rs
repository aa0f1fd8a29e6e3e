//! Codon model: a 3-base codon, its resolved amino acid and its concrete expansions.

use crate::amino_acid;

/// Concrete bases for every IUPAC nucleotide code (lower case).
static AMBIGUOUS_BASES: [(u8, &[u8]); 15] = [
    (b'a', b"a"),
    (b'c', b"c"),
    (b'g', b"g"),
    (b't', b"t"),
    (b'r', b"ag"),
    (b'y', b"ct"),
    (b'm', b"ac"),
    (b'k', b"gt"),
    (b's', b"cg"),
    (b'w', b"at"),
    (b'h', b"act"),
    (b'b', b"cgt"),
    (b'v', b"acg"),
    (b'd', b"agt"),
    (b'n', b"acgt"),
];

/// Concrete bases a nucleotide code stands for; empty for unknown characters.
#[must_use]
pub fn base_expansion(base: u8) -> &'static [u8] {
    AMBIGUOUS_BASES
        .iter()
        .find(|(code, _)| *code == base)
        .map(|&(_, bases)| bases)
        .unwrap_or(&[])
}

/// Normalise a nucleotide to lower-case JCBN (`U` becomes `t`).
#[must_use]
pub fn normalize_base(base: u8) -> u8 {
    match base.to_ascii_lowercase() {
        b'u' => b't',
        other => other,
    }
}

/// All concrete codons a codon string expands to, in table order.
///
/// Returns `None` when any of the three characters is not a nucleotide code.
#[must_use]
pub fn expand(codon: &str) -> Option<Vec<String>> {
    let bases = codon.as_bytes();
    if bases.len() != 3 {
        return None;
    }
    let first = base_expansion(bases[0]);
    let second = base_expansion(bases[1]);
    let third = base_expansion(bases[2]);
    if first.is_empty() || second.is_empty() || third.is_empty() {
        return None;
    }
    let mut codons = Vec::with_capacity(first.len() * second.len() * third.len());
    for &a in first {
        for &b in second {
            for &c in third {
                codons.push(String::from_utf8_lossy(&[a, b, c]).into_owned());
            }
        }
    }
    Some(codons)
}

/// One concrete codon (only `a`, `c`, `g`, `t`) derived from an ambiguous codon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnAmbiguousCodon {
    pub codon: String,
    pub amino_acid: u8,
    pub codon_exception: bool,
}

/// A codon read from a nucleotide sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codon {
    codon: String,
    position: usize,
    amino_acid: u8,
    translation_exception: bool,
    codon_exception: bool,
    unambiguous_codons: Vec<UnAmbiguousCodon>,
}

impl Codon {
    /// Build an untranslated codon from three bases at a 1-based position.
    #[must_use]
    pub fn new(bases: &[u8], position: usize) -> Self {
        let normalized: Vec<u8> = bases.iter().map(|&b| normalize_base(b)).collect();
        Self {
            codon: String::from_utf8_lossy(&normalized).into_owned(),
            position,
            amino_acid: amino_acid::UNKNOWN,
            translation_exception: false,
            codon_exception: false,
            unambiguous_codons: Vec::new(),
        }
    }

    #[must_use]
    pub fn codon(&self) -> &str {
        &self.codon
    }

    /// 1-based position of the first base in the translated sequence.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn amino_acid(&self) -> u8 {
        self.amino_acid
    }

    #[must_use]
    pub fn is_translation_exception(&self) -> bool {
        self.translation_exception
    }

    #[must_use]
    pub fn is_codon_exception(&self) -> bool {
        self.codon_exception
    }

    #[must_use]
    pub fn unambiguous_codons(&self) -> &[UnAmbiguousCodon] {
        &self.unambiguous_codons
    }

    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.amino_acid == amino_acid::STOP
    }

    pub(crate) fn set_resolution(
        &mut self,
        amino_acid: u8,
        unambiguous_codons: Vec<UnAmbiguousCodon>,
    ) {
        self.codon_exception = unambiguous_codons.iter().any(|c| c.codon_exception);
        self.amino_acid = amino_acid;
        self.unambiguous_codons = unambiguous_codons;
    }

    /// Force an amino acid regardless of table lookup.
    pub(crate) fn set_translation_exception(&mut self, amino_acid: u8) {
        self.amino_acid = amino_acid;
        self.translation_exception = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unambiguous_bases_expand_to_themselves() {
        assert_eq!(base_expansion(b'a'), b"a");
        assert_eq!(base_expansion(b't'), b"t");
    }

    #[test]
    fn ambiguous_bases() {
        assert_eq!(base_expansion(b'n'), b"acgt");
        assert_eq!(base_expansion(b'r'), b"ag");
        assert_eq!(base_expansion(b'y'), b"ct");
        assert!(base_expansion(b'x').is_empty());
        assert!(base_expansion(b'-').is_empty());
    }

    #[test]
    fn expand_concrete_codon() {
        assert_eq!(expand("atg"), Some(vec!["atg".to_string()]));
    }

    #[test]
    fn expand_ambiguous_codon() {
        assert_eq!(
            expand("gay"),
            Some(vec!["gac".to_string(), "gat".to_string()])
        );
        assert_eq!(expand("nnn").map(|c| c.len()), Some(64));
        assert_eq!(expand("rrn").map(|c| c.len()), Some(16));
    }

    #[test]
    fn expand_rejects_unknown_characters() {
        assert_eq!(expand("a-g"), None);
        assert_eq!(expand("at"), None);
    }

    #[test]
    fn codon_normalization() {
        let codon = Codon::new(b"AUG", 4);
        assert_eq!(codon.codon(), "atg");
        assert_eq!(codon.position(), 4);
        assert_eq!(codon.amino_acid(), b'X');
        assert!(!codon.is_translation_exception());
    }

    #[test]
    fn codon_exception_flag_follows_expansions() {
        let mut codon = Codon::new(b"tga", 1);
        codon.set_resolution(
            b'W',
            vec![UnAmbiguousCodon {
                codon: "tga".to_string(),
                amino_acid: b'W',
                codon_exception: true,
            }],
        );
        assert!(codon.is_codon_exception());
        assert_eq!(codon.amino_acid(), b'W');
    }
}
