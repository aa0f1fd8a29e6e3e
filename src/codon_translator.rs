//! Resolution of single (possibly ambiguous) codons to amino acids.

use std::collections::HashMap;

use crate::amino_acid;
use crate::codon::{self, Codon, UnAmbiguousCodon};
use crate::error::TranslationError;
use crate::translation_table::{TranslationTable, TranslationTableFactory};
use crate::validation::MessageKey;

/// Translates codons with one genetic code and a set of per-run codon overrides.
#[derive(Debug, Clone)]
pub struct CodonTranslator {
    table: &'static TranslationTable,
    codon_exceptions: HashMap<String, u8>,
}

impl CodonTranslator {
    /// Create a translator for an NCBI genetic code id.
    pub fn new(code_id: u32) -> Result<Self, TranslationError> {
        Ok(Self {
            table: lookup_table(code_id)?,
            codon_exceptions: HashMap::new(),
        })
    }

    /// Switch to another genetic code, keeping codon exceptions.
    pub fn set_translation_table(&mut self, code_id: u32) -> Result<(), TranslationError> {
        self.table = lookup_table(code_id)?;
        Ok(())
    }

    #[must_use]
    pub fn translation_table(&self) -> &'static TranslationTable {
        self.table
    }

    /// Force an amino acid for an exact concrete codon.
    pub fn add_codon_exception(&mut self, codon: &str, amino_acid: u8) {
        let normalized: Vec<u8> = codon.bytes().map(codon::normalize_base).collect();
        self.codon_exceptions.insert(
            String::from_utf8_lossy(&normalized).into_owned(),
            amino_acid,
        );
    }

    pub fn translate_start_codon(&self, codon: &mut Codon) -> Result<(), TranslationError> {
        self.translate(codon, true)
    }

    pub fn translate_other_codon(&self, codon: &mut Codon) -> Result<(), TranslationError> {
        self.translate(codon, false)
    }

    fn translate(&self, codon: &mut Codon, start: bool) -> Result<(), TranslationError> {
        let expansions = codon::expand(codon.codon()).ok_or_else(|| unresolved(codon))?;
        let mut resolved = Vec::with_capacity(expansions.len());
        let mut amino_acid: Option<u8> = None;
        for concrete in expansions {
            let (aa, codon_exception) = self
                .resolve(&concrete, start)
                .ok_or_else(|| unresolved(codon))?;
            amino_acid = Some(match amino_acid {
                Some(previous) => amino_acid::reconcile(previous, aa),
                None => aa,
            });
            resolved.push(UnAmbiguousCodon {
                codon: concrete,
                amino_acid: aa,
                codon_exception,
            });
        }
        codon.set_resolution(amino_acid.unwrap_or(amino_acid::UNKNOWN), resolved);
        Ok(())
    }

    /// Amino acid of a concrete codon and whether a codon exception supplied it.
    fn resolve(&self, concrete: &str, start: bool) -> Option<(u8, bool)> {
        if let Some(&aa) = self.codon_exceptions.get(concrete) {
            return Some((aa, true));
        }
        let aa = if start {
            self.table.start_amino_acid(concrete)
        } else {
            self.table.other_amino_acid(concrete)
        };
        aa.map(|aa| (aa, false))
    }

    /// True if any concrete expansion is a start codon.
    #[must_use]
    pub fn is_degenerate_start_codon(&self, codon: &Codon) -> bool {
        self.any_expansion(codon, true, amino_acid::METHIONINE)
    }

    /// True if any concrete expansion is a stop codon.
    #[must_use]
    pub fn is_degenerate_stop_codon(&self, codon: &Codon) -> bool {
        self.any_expansion(codon, false, amino_acid::STOP)
    }

    fn any_expansion(&self, codon: &Codon, start: bool, target: u8) -> bool {
        codon::expand(codon.codon()).is_some_and(|expansions| {
            expansions
                .iter()
                .any(|concrete| self.resolve(concrete, start).map(|(aa, _)| aa) == Some(target))
        })
    }

    #[must_use]
    pub fn is_ambiguous_codon(&self, codon: &Codon) -> bool {
        codon::expand(codon.codon()).is_some_and(|expansions| expansions.len() > 1)
    }

    /// A concrete non-ATG codon that acts as a start codon in this genetic code.
    #[must_use]
    pub fn is_alternative_start_codon(&self, codon: &Codon) -> bool {
        self.is_degenerate_start_codon(codon)
            && !self.is_ambiguous_codon(codon)
            && self.resolve(codon.codon(), false).map(|(aa, _)| aa) != Some(amino_acid::METHIONINE)
    }
}

fn lookup_table(code_id: u32) -> Result<&'static TranslationTable, TranslationError> {
    TranslationTableFactory::table(code_id)
        .ok_or_else(|| TranslationError::new(MessageKey::UNKNOWN_TRANSLATION_TABLE).with(code_id))
}

fn unresolved(codon: &Codon) -> TranslationError {
    TranslationError::new(MessageKey::UNRESOLVED_CODON)
        .with(codon.codon())
        .with(codon.position())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn other(translator: &CodonTranslator, bases: &[u8]) -> Codon {
        let mut codon = Codon::new(bases, 1);
        translator.translate_other_codon(&mut codon).unwrap();
        codon
    }

    fn start(translator: &CodonTranslator, bases: &[u8]) -> Codon {
        let mut codon = Codon::new(bases, 1);
        translator.translate_start_codon(&mut codon).unwrap();
        codon
    }

    #[test]
    fn concrete_codons_match_table() {
        for id in TranslationTableFactory::ids() {
            let translator = CodonTranslator::new(id).unwrap();
            let table = translator.translation_table();
            for (concrete, &aa) in table.other_codon_map() {
                let codon = other(&translator, concrete.as_bytes());
                assert_eq!(codon.amino_acid(), aa, "table {id} codon {concrete}");
                assert!(!translator.is_ambiguous_codon(&codon));
            }
        }
    }

    #[test]
    fn unknown_table() {
        let err = CodonTranslator::new(99).unwrap_err();
        assert_eq!(err.key, MessageKey::UNKNOWN_TRANSLATION_TABLE);
        assert_eq!(err.params, vec!["99".to_string()]);

        let mut translator = CodonTranslator::new(1).unwrap();
        assert!(translator.set_translation_table(7).is_err());
        assert_eq!(translator.translation_table().id(), 1);
    }

    #[test]
    fn ambiguous_codon_with_single_amino_acid() {
        let translator = CodonTranslator::new(1).unwrap();
        let codon = other(&translator, b"gay");
        assert_eq!(codon.amino_acid(), b'D');
        assert_eq!(codon.unambiguous_codons().len(), 2);
        assert!(translator.is_ambiguous_codon(&codon));

        // four-fold degenerate site
        assert_eq!(other(&translator, b"gcn").amino_acid(), b'A');
        // both purine stops
        assert_eq!(other(&translator, b"tar").amino_acid(), b'*');
    }

    #[test]
    fn ambiguous_amino_acid_pair() {
        let translator = CodonTranslator::new(1).unwrap();
        // aac/aat = N, gac/gat = D
        assert_eq!(other(&translator, b"ray").amino_acid(), b'B');
        // caa/cag = Q, gaa/gag = E
        assert_eq!(other(&translator, b"sar").amino_acid(), b'Z');
        // att = I, ctt = L
        assert_eq!(other(&translator, b"mtt").amino_acid(), b'J');
    }

    #[test]
    fn unrelated_amino_acids_become_unknown() {
        let translator = CodonTranslator::new(1).unwrap();
        assert_eq!(other(&translator, b"ntg").amino_acid(), b'X');
        assert_eq!(other(&translator, b"nnn").amino_acid(), b'X');
    }

    #[test]
    fn start_codon_map() {
        let standard = CodonTranslator::new(1).unwrap();
        assert_eq!(start(&standard, b"ttg").amino_acid(), b'M');
        assert_eq!(start(&standard, b"ntg").amino_acid(), b'X');

        let bacterial = CodonTranslator::new(11).unwrap();
        assert_eq!(start(&bacterial, b"ntg").amino_acid(), b'M');
        assert_eq!(start(&bacterial, b"gtg").amino_acid(), b'M');
    }

    #[test]
    fn unresolved_codon() {
        let translator = CodonTranslator::new(1).unwrap();
        let mut codon = Codon::new(b"a-g", 7);
        let err = translator.translate_other_codon(&mut codon).unwrap_err();
        assert_eq!(err.key, MessageKey::UNRESOLVED_CODON);
        assert_eq!(err.params, vec!["a-g".to_string(), "7".to_string()]);
    }

    #[test]
    fn codon_exception_overrides_table() {
        let mut translator = CodonTranslator::new(1).unwrap();
        translator.add_codon_exception("TGA", b'W');
        let codon = other(&translator, b"tga");
        assert_eq!(codon.amino_acid(), b'W');
        assert!(codon.is_codon_exception());

        // tgg is W, tga overridden to W
        let codon = other(&translator, b"tgr");
        assert_eq!(codon.amino_acid(), b'W');
        assert!(codon.is_codon_exception());
        assert!(!translator.is_degenerate_stop_codon(&codon));
    }

    #[test]
    fn degenerate_start_and_stop() {
        let translator = CodonTranslator::new(1).unwrap();
        assert!(translator.is_degenerate_start_codon(&Codon::new(b"ntg", 1)));
        assert!(translator.is_degenerate_start_codon(&Codon::new(b"atg", 1)));
        assert!(!translator.is_degenerate_start_codon(&Codon::new(b"gtg", 1)));
        assert!(translator.is_degenerate_stop_codon(&Codon::new(b"tnn", 1)));
        assert!(!translator.is_degenerate_stop_codon(&Codon::new(b"atg", 1)));
        assert!(!translator.is_degenerate_stop_codon(&Codon::new(b"a-g", 1)));
    }

    #[test]
    fn alternative_start_codon() {
        let translator = CodonTranslator::new(11).unwrap();
        assert!(translator.is_alternative_start_codon(&Codon::new(b"gtg", 1)));
        assert!(!translator.is_alternative_start_codon(&Codon::new(b"atg", 1)));
        assert!(!translator.is_alternative_start_codon(&Codon::new(b"ntg", 1)));
        assert!(!translator.is_alternative_start_codon(&Codon::new(b"ccc", 1)));
    }
}
