//! Translation of CDS and peptide features against their entry.
//!
//! [`CdsTranslator`] configures a fresh [`Translator`] per feature, translates
//! the feature's bases and compares the conceptual translation with the
//! declared `/translation`. Applied fixes are written back to the feature.

mod configure;

pub use configure::configure_from_feature;

use log::{debug, warn};

use crate::amino_acid;
use crate::config::TranslatorConfig;
use crate::entry::{Entry, Feature, FeatureKind, qualifier};
use crate::error::Error;
use crate::segment::SegmentFactory;
use crate::strand::{Partiality, Strand};
use crate::taxonomy::TaxonomyClient;
use crate::translator::{self, TranslationResult, Translator};
use crate::validation::{MessageKey, Origin, Severity, ValidationMessage, ValidationResult};

/// Translates features using a taxonomy for genetic code selection and a
/// segment factory for base extraction.
pub struct CdsTranslator<'a> {
    config: TranslatorConfig,
    taxonomy: &'a dyn TaxonomyClient,
    segment_factory: &'a dyn SegmentFactory,
}

impl<'a> CdsTranslator<'a> {
    pub fn new(
        config: TranslatorConfig,
        taxonomy: &'a dyn TaxonomyClient,
        segment_factory: &'a dyn SegmentFactory,
    ) -> Self {
        Self {
            config,
            taxonomy,
            segment_factory,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate one feature, updating its `/translation`, location and
    /// qualifiers when a translation is accepted or a fix is applied.
    pub fn translate(&self, feature: &mut Feature, entry: &Entry) -> ValidationResult {
        let mut result = ValidationResult::new();
        if feature.location.locations.is_empty() {
            return result;
        }
        if entry.is_con() && entry.sequence_bytes().is_none() {
            return result;
        }

        let origin = Origin {
            accession: entry.primary_accession.clone(),
            feature: format!("{} {}", feature.name, feature.location),
        };
        if let Some(translation) = self.translate_feature(feature, entry, &mut result) {
            self.write_back(feature, &translation, &mut result);
            self.compare(feature, &translation, &mut result);
        }

        result.set_origin(&origin);
        if let Some(severity) = self.config.severity {
            result.set_severity(severity);
        }
        if !result.is_valid() {
            warn!("rejected {origin}");
        }
        result
    }

    /// Run the pre-checks and the translator; `None` when translation did not happen.
    fn translate_feature(
        &self,
        feature: &Feature,
        entry: &Entry,
        result: &mut ValidationResult,
    ) -> Option<TranslationResult> {
        check_amino_acids(feature, result);
        let Some(sequence) = entry.sequence_bytes() else {
            result.append(error(MessageKey::MISSING_SEQUENCE));
            return None;
        };
        if !result.is_valid() {
            return None;
        }

        if feature.is_exception() && feature.translation().is_none() {
            result.append(error(MessageKey::EXCEPTION_WITHOUT_TRANSLATION));
            return None;
        }

        let request = match configure_from_feature(
            feature,
            entry,
            self.taxonomy,
            self.config.fixes,
            result,
        ) {
            Ok(request) => request,
            Err(err) => {
                result.append(err.into_message(Severity::Error));
                return None;
            }
        };

        if !check_locations(feature, sequence.len(), result) {
            return None;
        }

        let bases = match self
            .segment_factory
            .create_segment(sequence, &feature.location)
        {
            Ok(bases) => bases,
            Err(Error::RemoteSegment(location)) => {
                result.append(error(MessageKey::REMOTE_SEGMENT_UNAVAILABLE).with(location));
                return None;
            }
            Err(err) => {
                result.append(error(MessageKey::LOCATION_OUT_OF_RANGE).with(err));
                return None;
            }
        };

        let translated = Translator::new(request).and_then(|t| t.translate(&bases));
        match translated {
            Ok(translation) => Some(translation),
            Err(err) => {
                debug!("translation failed: {err}");
                result.append(err.into_message(Severity::Error));
                None
            }
        }
    }

    /// Apply the translator's fixes to the feature and report them.
    fn write_back(
        &self,
        feature: &mut Feature,
        translation: &TranslationResult,
        result: &mut ValidationResult,
    ) {
        let strand = feature.location.strand();

        if translation.is_fixed_left_partial() || translation.is_fixed_right_partial() {
            let sense = Partiality::new(translation.is_left_partial(), translation.is_right_partial());
            feature
                .location
                .set_partiality(sense.from_sense_strand(strand));
        }

        if translation.is_fixed_degenerate_start_codon() {
            // the fix is only reported when it can be recorded on the feature
            match start_codon_exception(feature, translation, strand) {
                Some(value) => {
                    feature.add_qualifier(qualifier::TRANSL_EXCEPT, Some(&value));
                    result.append(fix(MessageKey::FIXED_DEGENERATE_START_CODON));
                }
                None => warn!("no /transl_except for remote start codon in {}", feature.location),
            }
        }
        if translation.is_fixed_missing_start_codon() {
            result.append(fix(MessageKey::FIXED_MISSING_START_CODON));
        }
        if translation.is_fixed_right_partial_stop_codon() {
            result.append(fix(MessageKey::FIXED_RIGHT_PARTIAL_STOP_CODON));
        }
        if translation.is_fixed_right_partial_codon() {
            let trimmed = translation.trimmed_trailing_bases();
            feature.location.trim_three_prime(trimmed);
            result.append(fix(MessageKey::FIXED_RIGHT_PARTIAL_CODON).with(trimmed));
        }
    }

    /// Decide between the declared and the conceptual translation.
    fn compare(
        &self,
        feature: &mut Feature,
        translation: &TranslationResult,
        result: &mut ValidationResult,
    ) {
        let conceptual = translation.conceptual_translation();
        let tolerant = feature.is_exception() || feature.is_pseudo();

        let Some(expected) = feature.translation().map(str::to_string) else {
            if feature.kind() != FeatureKind::Peptide && translation.has_conceptual_translation() {
                feature.set_qualifier(qualifier::TRANSLATION, &conceptual);
            }
            return;
        };

        if !translation.has_conceptual_translation() && tolerant {
            return;
        }

        if translator::equals_translation(&expected, &conceptual) {
            if feature.is_exception() {
                result.append(
                    ValidationMessage::new(Severity::Warning, MessageKey::UNNECESSARY_EXCEPTION),
                );
            }
        } else if self.config.accept_translation {
            feature.set_qualifier(qualifier::TRANSLATION, &conceptual);
            result.append(
                ValidationMessage::new(Severity::Warning, MessageKey::TRANSLATION_MISMATCH)
                    .with(expected)
                    .with(conceptual),
            );
        } else if !tolerant {
            result.append(
                error(MessageKey::TRANSLATION_MISMATCH)
                    .with(expected)
                    .with(conceptual),
            );
        }
    }
}

fn error(key: MessageKey) -> ValidationMessage {
    ValidationMessage::new(Severity::Error, key)
}

fn fix(key: MessageKey) -> ValidationMessage {
    ValidationMessage::new(Severity::Fix, key)
}

/// Report every declared translation character that is not an amino acid.
fn check_amino_acids(feature: &Feature, result: &mut ValidationResult) {
    let Some(translation) = feature.translation() else {
        return;
    };
    for (i, aa) in translation.bytes().enumerate() {
        if !amino_acid::is_valid(aa) {
            result.append(
                error(MessageKey::INVALID_AMINO_ACID)
                    .with(char::from(aa))
                    .with(i + 1),
            );
        }
    }
}

/// Local locations must lie on the entry sequence. Remote locations are not checked.
fn check_locations(feature: &Feature, length: usize, result: &mut ValidationResult) -> bool {
    let mut valid = true;
    for location in &feature.location.locations {
        if location.is_remote() {
            continue;
        }
        if location.begin == 0 || location.begin > location.end || location.end > length {
            result.append(
                error(MessageKey::LOCATION_OUT_OF_RANGE)
                    .with(location)
                    .with(length),
            );
            valid = false;
        }
    }
    valid
}

/// `/transl_except` value marking the start codon as Met.
fn start_codon_exception(
    feature: &Feature,
    translation: &TranslationResult,
    strand: Strand,
) -> Option<String> {
    let start = translation.codons().first()?.position();
    let location = &feature.location;
    let first = location.to_global_position(start)?;
    let last = location.to_global_position(start + 2)?;
    let (begin, end) = (first.min(last), first.max(last));
    let value = if strand.is_complement() {
        format!("(pos:complement({begin}..{end}),aa:Met)")
    } else {
        format!("(pos:{begin}..{end},aa:Met)")
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{CompoundLocation, Location};
    use crate::segment::LocalSegmentFactory;
    use crate::taxonomy::InMemoryTaxonomy;
    use crate::translator::TranslationFixes;

    fn cds(begin: usize, end: usize) -> Feature {
        Feature::new("CDS", CompoundLocation::new(vec![Location::new(begin, end)]))
    }

    fn run(config: TranslatorConfig, feature: &mut Feature, entry: &Entry) -> ValidationResult {
        let taxonomy = InMemoryTaxonomy::default();
        CdsTranslator::new(config, &taxonomy, &LocalSegmentFactory).translate(feature, entry)
    }

    fn errors(result: &ValidationResult) -> Vec<String> {
        result
            .messages()
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .map(|m| m.key.to_string())
            .collect()
    }

    fn with_fixes(fixes: TranslationFixes) -> TranslatorConfig {
        TranslatorConfig {
            fixes,
            ..TranslatorConfig::default()
        }
    }

    #[test]
    fn adds_missing_translation() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 9);
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert!(result.is_valid());
        assert_eq!(feature.translation(), Some("MK"));
        // only the selected genetic code is reported
        assert_eq!(result.len(), 1);
        assert_eq!(result.count(Severity::Info), 1);
    }

    #[test]
    fn matching_translation() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 9);
        feature.add_qualifier(qualifier::TRANSL_TABLE, Some("1"));
        feature.add_qualifier(qualifier::TRANSLATION, Some("MK"));
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert!(result.is_empty());
    }

    #[test]
    fn mismatching_translation() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 9);
        feature.add_qualifier(qualifier::TRANSLATION, Some("MR"));
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert_eq!(errors(&result), vec!["CDSTranslator-2"]);
        let message = result.find(MessageKey::TRANSLATION_MISMATCH).unwrap();
        assert_eq!(message.params, vec!["MR".to_string(), "MK".to_string()]);
        assert_eq!(feature.translation(), Some("MR"));
    }

    #[test]
    fn accept_conceptual_translation() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 9);
        feature.add_qualifier(qualifier::TRANSLATION, Some("MR"));
        let config = TranslatorConfig {
            accept_translation: true,
            ..TranslatorConfig::default()
        };
        let result = run(config, &mut feature, &entry);
        assert!(result.is_valid());
        let message = result.find(MessageKey::TRANSLATION_MISMATCH).unwrap();
        assert_eq!(message.severity, Severity::Warning);
        assert_eq!(feature.translation(), Some("MK"));
    }

    #[test]
    fn unnecessary_exception() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 9);
        feature.add_qualifier(qualifier::EXCEPTION, Some("RNA editing"));
        feature.add_qualifier(qualifier::TRANSLATION, Some("MK"));
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert!(result.is_valid());
        let message = result.find(MessageKey::UNNECESSARY_EXCEPTION).unwrap();
        assert_eq!(message.severity, Severity::Warning);
    }

    #[test]
    fn exception_without_translation() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 9);
        feature.add_qualifier(qualifier::EXCEPTION, Some("RNA editing"));
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert_eq!(errors(&result), vec!["CDSTranslator-1"]);
    }

    #[test]
    fn pseudo_keeps_declared_translation() {
        let entry = Entry::new("AB000001", "atgtaaaaataa");
        let mut feature = cds(1, 12);
        feature.add_qualifier(qualifier::PSEUDO, None);
        feature.add_qualifier(qualifier::TRANSLATION, Some("MXK"));
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert!(result.is_valid());
        assert_eq!(feature.translation(), Some("MXK"));
    }

    #[test]
    fn invalid_amino_acids() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 9);
        feature.add_qualifier(qualifier::TRANSLATION, Some("M#"));
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert_eq!(errors(&result), vec!["CDSTranslator-11"]);
        let message = result.find(MessageKey::INVALID_AMINO_ACID).unwrap();
        assert_eq!(message.params, vec!["#".to_string(), "2".to_string()]);
    }

    #[test]
    fn missing_sequence() {
        let entry = Entry::new("AB000001", "");
        let mut feature = cds(1, 9);
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert_eq!(errors(&result), vec!["CDSTranslator-12"]);
    }

    #[test]
    fn con_entry_without_sequence_is_skipped() {
        let entry = Entry {
            data_class: Some("CON".to_string()),
            ..Entry::new("AB000001", "")
        };
        let mut feature = cds(1, 9);
        assert!(run(TranslatorConfig::default(), &mut feature, &entry).is_empty());
    }

    #[test]
    fn feature_without_location_is_skipped() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = Feature::new("CDS", CompoundLocation::default());
        assert!(run(TranslatorConfig::default(), &mut feature, &entry).is_empty());
    }

    #[test]
    fn location_out_of_range() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = cds(1, 30);
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert_eq!(errors(&result), vec!["CDSTranslator-4"]);
    }

    #[test]
    fn remote_segment() {
        let entry = Entry::new("AB000001", "atgaaataa");
        let mut feature = Feature::new(
            "CDS",
            CompoundLocation::new(vec![
                Location::new(1, 6),
                Location::remote("AB000002.1", 1, 3),
            ]),
        );
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert_eq!(errors(&result), vec!["CDSTranslator-13"]);
        let message = result.find(MessageKey::REMOTE_SEGMENT_UNAVAILABLE).unwrap();
        assert_eq!(message.params, vec!["AB000002.1:1..3".to_string()]);
    }

    /// Returns the same bases for every location, remote ones included.
    struct FixedSegmentFactory(&'static str);

    impl SegmentFactory for FixedSegmentFactory {
        fn create_segment(
            &self,
            _sequence: &[u8],
            _location: &CompoundLocation,
        ) -> Result<Vec<u8>, Error> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn degenerate_start_codon_on_remote_segment() {
        let entry = Entry::new("AB000001", "aaataa");
        let mut feature = Feature::new(
            "CDS",
            CompoundLocation::new(vec![
                Location::remote("AB000002.1", 1, 3),
                Location::new(1, 6),
            ]),
        );
        let config = with_fixes(TranslationFixes {
            degenerate_start_codon: true,
            ..TranslationFixes::default()
        });
        let taxonomy = InMemoryTaxonomy::default();
        let segments = FixedSegmentFactory("ntgaaataa");
        let result = CdsTranslator::new(config, &taxonomy, &segments).translate(&mut feature, &entry);
        assert!(result.is_valid());
        assert!(!result.has_key(MessageKey::FIXED_DEGENERATE_START_CODON));
        assert_eq!(feature.qualifier_value(qualifier::TRANSL_EXCEPT), None);
        assert_eq!(feature.translation(), Some("MK"));
    }

    #[test]
    fn translator_error_carries_origin() {
        let entry = Entry::new("AB000001", "atgaaa");
        let mut feature = cds(1, 6);
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        assert_eq!(errors(&result), vec!["Translator-15"]);
        let origin = result
            .find(MessageKey::MISSING_STOP_CODON)
            .and_then(|m| m.origin.clone())
            .unwrap();
        assert_eq!(origin.accession, "AB000001");
        assert_eq!(origin.feature, "CDS 1..6");
    }

    #[test]
    fn severity_override() {
        let entry = Entry::new("AB000001", "atgaaa");
        let mut feature = cds(1, 6);
        let config = TranslatorConfig {
            severity: Some(Severity::Warning),
            ..TranslatorConfig::default()
        };
        let result = run(config, &mut feature, &entry);
        assert!(result.is_valid());
        assert_eq!(result.count(Severity::Warning), result.len());
    }

    #[test]
    fn fix_degenerate_start_codon() {
        let entry = Entry::new("AB000001", "ntgaaataa");
        let mut feature = cds(1, 9);
        let fixes = TranslationFixes {
            degenerate_start_codon: true,
            ..TranslationFixes::default()
        };
        let result = run(with_fixes(fixes), &mut feature, &entry);
        assert!(result.is_valid());
        assert!(result.has_key(MessageKey::FIXED_DEGENERATE_START_CODON));
        assert_eq!(
            feature.qualifier_value(qualifier::TRANSL_EXCEPT),
            Some("(pos:1..3,aa:Met)")
        );
        assert_eq!(feature.translation(), Some("MK"));
    }

    #[test]
    fn fix_degenerate_start_codon_on_complement() {
        // reverse complement of ntgaaataa
        let entry = Entry::new("AB000001", "ttatttcan");
        let mut feature = Feature::new(
            "CDS",
            CompoundLocation {
                complement: true,
                ..CompoundLocation::new(vec![Location::new(1, 9)])
            },
        );
        let fixes = TranslationFixes {
            degenerate_start_codon: true,
            ..TranslationFixes::default()
        };
        let result = run(with_fixes(fixes), &mut feature, &entry);
        assert!(result.is_valid());
        assert_eq!(
            feature.qualifier_value(qualifier::TRANSL_EXCEPT),
            Some("(pos:complement(7..9),aa:Met)")
        );
    }

    #[test]
    fn fix_missing_start_codon() {
        let entry = Entry::new("AB000001", "aaaaaataa");
        let mut feature = cds(1, 9);
        let fixes = TranslationFixes {
            missing_start_codon: true,
            ..TranslationFixes::default()
        };
        let result = run(with_fixes(fixes), &mut feature, &entry);
        assert!(result.is_valid());
        assert!(result.has_key(MessageKey::FIXED_MISSING_START_CODON));
        assert!(feature.location.left_partial);
        assert!(!feature.location.right_partial);
        assert_eq!(feature.translation(), Some("KK"));
    }

    #[test]
    fn fix_missing_start_codon_on_complement() {
        // reverse complement of aaaaaataa
        let entry = Entry::new("AB000001", "ttatttttt");
        let mut feature = Feature::new(
            "CDS",
            CompoundLocation {
                complement: true,
                ..CompoundLocation::new(vec![Location::new(1, 9)])
            },
        );
        let fixes = TranslationFixes {
            missing_start_codon: true,
            ..TranslationFixes::default()
        };
        let result = run(with_fixes(fixes), &mut feature, &entry);
        assert!(result.is_valid());
        // the 5' end of a complement feature is its right end
        assert!(!feature.location.left_partial);
        assert!(feature.location.right_partial);
    }

    #[test]
    fn fix_right_partial_stop_and_trailing_bases() {
        let entry = Entry::new("AB000001", "atgaaataaag");
        let mut feature = cds(1, 11);
        feature.location.right_partial = true;
        let result = run(with_fixes(TranslationFixes::all()), &mut feature, &entry);
        assert!(result.is_valid());
        assert!(result.has_key(MessageKey::FIXED_RIGHT_PARTIAL_STOP_CODON));
        let trimmed = result.find(MessageKey::FIXED_RIGHT_PARTIAL_CODON).unwrap();
        assert_eq!(trimmed.params, vec!["2".to_string()]);
        assert_eq!(trimmed.severity, Severity::Fix);
        assert!(!feature.location.right_partial);
        assert_eq!(feature.location.to_string(), "1..9");
        assert_eq!(feature.translation(), Some("MK"));
    }

    #[test]
    fn declared_table_mismatch_still_translates() {
        let entry = Entry::new("AB000001", "atgtgataa");
        let mut feature = cds(1, 9);
        feature.add_qualifier(qualifier::TRANSL_TABLE, Some("2"));
        let result = run(TranslatorConfig::default(), &mut feature, &entry);
        // no taxon, so the declared code is used without complaint
        assert!(result.is_valid());
        // TGA is tryptophan in the vertebrate mitochondrial code
        assert_eq!(feature.translation(), Some("MW"));
    }
}
