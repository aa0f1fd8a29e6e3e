//! Derivation of a translation request from a feature and its entry.

use log::debug;

use crate::entry::{Entry, Feature, FeatureKind, qualifier};
use crate::error::TranslationError;
use crate::qualifiers;
use crate::taxonomy::{Taxon, TaxonomyClient};
use crate::translation_table::TranslationTable;
use crate::translator::{
    CodonException, TranslationException, TranslationFixes, TranslationRequest,
};
use crate::validation::{MessageKey, Severity, ValidationMessage, ValidationResult};

const MITOCHONDRION: &str = "mitochondrion";
const KINETOPLAST: &str = "kinetoplast";
const KINETOPLAST_GENETIC_CODE: u32 = 4;
const MITOCHONDRIAL_GENETIC_CODE: u32 = 2;

/// Organelles translated with the plastid genetic code.
const PLASTIDS: [&str; 9] = [
    "plastid",
    "chloroplast",
    "chromoplast",
    "cyanelle",
    "apicoplast",
    "leucoplast",
    "proplastid",
    "chromatophore",
    "kleptoplast",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Organelle {
    Mitochondrion,
    Kinetoplast,
    Plastid,
}

/// Classify an `/organelle` value such as `plastid:chloroplast`.
fn classify_organelle(value: &str) -> Option<Organelle> {
    let value = value.trim().to_ascii_lowercase();
    if value.contains(KINETOPLAST) {
        Some(Organelle::Kinetoplast)
    } else if value.starts_with(MITOCHONDRION) {
        Some(Organelle::Mitochondrion)
    } else if PLASTIDS.iter().any(|p| value.contains(p)) {
        Some(Organelle::Plastid)
    } else {
        None
    }
}

/// Build the translation request for a CDS or peptide feature.
///
/// Genetic code selection messages (`CDSTranslator-5`, `CDSTranslator-6`) are
/// appended to `result`; qualifier problems abort with an error.
pub fn configure_from_feature(
    feature: &Feature,
    entry: &Entry,
    taxonomy: &dyn TaxonomyClient,
    fixes: TranslationFixes,
    result: &mut ValidationResult,
) -> Result<TranslationRequest, TranslationError> {
    let translation_table = select_translation_table(feature, entry, taxonomy, result)?;
    let codon_start = match feature.codon_start() {
        Some(value) => parse_numeric(qualifier::CODON_START, value)?,
        None => 1,
    };
    let partiality = feature
        .location
        .partiality()
        .to_sense_strand(feature.location.strand());

    Ok(TranslationRequest {
        translation_table,
        codon_start: codon_start as usize,
        left_partial: partiality.left,
        right_partial: partiality.right,
        non_translating: feature.is_pseudo(),
        exception: feature.is_exception(),
        peptide_feature: feature.kind() == FeatureKind::Peptide,
        translation_exceptions: translation_exceptions(feature)?,
        codon_exceptions: codon_exceptions(feature)?,
        fixes,
    })
}

fn select_translation_table(
    feature: &Feature,
    entry: &Entry,
    taxonomy: &dyn TaxonomyClient,
    result: &mut ValidationResult,
) -> Result<u32, TranslationError> {
    let declared = feature
        .transl_table()
        .map(|value| parse_numeric(qualifier::TRANSL_TABLE, value))
        .transpose()?;

    let source = entry.primary_source_feature();
    let organelle = source.and_then(Feature::organelle).and_then(classify_organelle);
    let taxon_code = source
        .and_then(|source| find_taxon(source, taxonomy))
        .and_then(|taxon| taxon_genetic_code(&taxon, organelle));

    let selected = match (declared, taxon_code) {
        (Some(declared), Some(taxon_code)) => {
            if declared != taxon_code {
                let mismatch = MessageKey::TRANSLATION_TABLE_MISMATCH;
                result.append(
                    ValidationMessage::new(Severity::Error, mismatch)
                        .with(declared)
                        .with(taxon_code),
                );
            }
            return Ok(declared);
        }
        (Some(declared), None) => return Ok(declared),
        (None, Some(taxon_code)) => taxon_code,
        (None, None) => match organelle {
            Some(Organelle::Mitochondrion) => MITOCHONDRIAL_GENETIC_CODE,
            Some(Organelle::Kinetoplast) => KINETOPLAST_GENETIC_CODE,
            Some(Organelle::Plastid) => TranslationTable::PLASTID,
            None => TranslationTable::DEFAULT,
        },
    };

    debug!("selected genetic code {selected} for {}", entry.primary_accession);
    result.append(
        ValidationMessage::new(Severity::Info, MessageKey::TRANSLATION_TABLE_SELECTED)
            .with(selected),
    );
    Ok(selected)
}

/// Taxon of the source feature, by `/db_xref` taxon id then by `/organism`.
fn find_taxon(source: &Feature, taxonomy: &dyn TaxonomyClient) -> Option<Taxon> {
    source
        .taxon_id()
        .and_then(|id| taxonomy.taxon_by_id(id))
        .or_else(|| {
            source
                .organism()
                .and_then(|name| taxonomy.taxon_by_scientific_name(name))
        })
}

fn taxon_genetic_code(taxon: &Taxon, organelle: Option<Organelle>) -> Option<u32> {
    match organelle {
        Some(Organelle::Mitochondrion | Organelle::Kinetoplast) => {
            taxon.mitochondrial_genetic_code()
        }
        Some(Organelle::Plastid) => Some(TranslationTable::PLASTID),
        None => taxon.genetic_code(),
    }
}

fn parse_numeric(name: &str, value: &str) -> Result<u32, TranslationError> {
    value.trim().parse().map_err(|_| {
        TranslationError::new(MessageKey::INVALID_NUMERIC_QUALIFIER)
            .with(name)
            .with(value)
    })
}

/// `/transl_except` qualifiers mapped to 1-based sense-strand positions.
fn translation_exceptions(
    feature: &Feature,
) -> Result<Vec<TranslationException>, TranslationError> {
    let location = &feature.location;
    feature
        .transl_excepts()
        .map(|value| -> Result<TranslationException, TranslationError> {
            let parsed = qualifiers::parse_transl_except(value)?;
            let begin = location.to_local_position(parsed.begin);
            let end = location.to_local_position(parsed.end);
            let (Some(begin), Some(end)) = (begin, end) else {
                return Err(TranslationError::new(MessageKey::INVALID_QUALIFIER)
                    .with(qualifier::TRANSL_EXCEPT)
                    .with(value));
            };
            Ok(TranslationException {
                begin: begin.min(end),
                end: begin.max(end),
                amino_acid: parsed.amino_acid,
            })
        })
        .collect()
}

fn codon_exceptions(feature: &Feature) -> Result<Vec<CodonException>, TranslationError> {
    feature
        .codons()
        .map(|value| -> Result<CodonException, TranslationError> {
            let parsed = qualifiers::parse_codon(value)?;
            Ok(CodonException {
                codon: parsed.codon,
                amino_acid: parsed.amino_acid,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{CompoundLocation, Location};
    use crate::taxonomy::InMemoryTaxonomy;

    fn taxonomy() -> InMemoryTaxonomy {
        InMemoryTaxonomy::new(vec![
            Taxon {
                tax_id: 9606,
                scientific_name: "Homo sapiens".to_string(),
                genetic_code: Some(1),
                mitochondrial_genetic_code: Some(2),
                division: Some("HUM".to_string()),
            },
            Taxon {
                tax_id: 4932,
                scientific_name: "Saccharomyces cerevisiae".to_string(),
                genetic_code: Some(1),
                mitochondrial_genetic_code: Some(3),
                division: Some("FUN".to_string()),
            },
        ])
    }

    fn entry(source_qualifiers: &[(&str, &str)]) -> Entry {
        let mut source = Feature::new("source", CompoundLocation::new(vec![Location::new(1, 30)]));
        for &(name, value) in source_qualifiers {
            source.add_qualifier(name, Some(value));
        }
        let mut entry = Entry::new("AB000001", &"a".repeat(30));
        entry.features.push(source);
        entry
    }

    fn cds(location: CompoundLocation) -> Feature {
        Feature::new("CDS", location)
    }

    fn configure(feature: &Feature, entry: &Entry) -> (TranslationRequest, ValidationResult) {
        let mut result = ValidationResult::new();
        let request = configure_from_feature(
            feature,
            entry,
            &taxonomy(),
            TranslationFixes::default(),
            &mut result,
        )
        .unwrap();
        (request, result)
    }

    fn simple_cds() -> Feature {
        cds(CompoundLocation::new(vec![Location::new(1, 9)]))
    }

    #[test]
    fn classify_organelles() {
        assert_eq!(classify_organelle("mitochondrion"), Some(Organelle::Mitochondrion));
        assert_eq!(
            classify_organelle("mitochondrion:kinetoplast"),
            Some(Organelle::Kinetoplast)
        );
        assert_eq!(classify_organelle("plastid:chloroplast"), Some(Organelle::Plastid));
        assert_eq!(classify_organelle("plastid:apicoplast"), Some(Organelle::Plastid));
        assert_eq!(classify_organelle("nucleomorph"), None);
    }

    #[test]
    fn default_genetic_code() {
        let (request, result) = configure(&simple_cds(), &entry(&[]));
        assert_eq!(request.translation_table, 1);
        assert_eq!(request.codon_start, 1);
        let info = result.find(MessageKey::TRANSLATION_TABLE_SELECTED).unwrap();
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(info.params, vec!["1".to_string()]);
    }

    #[test]
    fn taxon_genetic_code_by_id_and_name() {
        let (request, _) = configure(
            &simple_cds(),
            &entry(&[("db_xref", "taxon:4932"), ("organelle", "mitochondrion")]),
        );
        assert_eq!(request.translation_table, 3);

        let (request, _) = configure(
            &simple_cds(),
            &entry(&[("organism", "Homo sapiens"), ("organelle", "mitochondrion")]),
        );
        assert_eq!(request.translation_table, 2);

        let (request, _) = configure(
            &simple_cds(),
            &entry(&[("organism", "Homo sapiens"), ("organelle", "plastid:chloroplast")]),
        );
        assert_eq!(request.translation_table, 11);
    }

    #[test]
    fn organelle_heuristics_without_taxon() {
        let (request, _) = configure(&simple_cds(), &entry(&[("organelle", "mitochondrion")]));
        assert_eq!(request.translation_table, 2);
        let (request, _) = configure(
            &simple_cds(),
            &entry(&[("organelle", "mitochondrion:kinetoplast")]),
        );
        assert_eq!(request.translation_table, 4);
        let (request, _) = configure(&simple_cds(), &entry(&[("organelle", "plastid")]));
        assert_eq!(request.translation_table, 11);
    }

    #[test]
    fn declared_table_wins_over_taxon() {
        let mut feature = simple_cds();
        feature.add_qualifier("transl_table", Some("11"));
        let (request, result) = configure(&feature, &entry(&[("organism", "Homo sapiens")]));
        assert_eq!(request.translation_table, 11);
        let error = result.find(MessageKey::TRANSLATION_TABLE_MISMATCH).unwrap();
        assert_eq!(error.severity, Severity::Error);
        assert!(!result.has_key(MessageKey::TRANSLATION_TABLE_SELECTED));
    }

    #[test]
    fn declared_table_matching_taxon() {
        let mut feature = simple_cds();
        feature.add_qualifier("transl_table", Some("1"));
        let (request, result) = configure(&feature, &entry(&[("db_xref", "taxon:9606")]));
        assert_eq!(request.translation_table, 1);
        assert!(result.is_empty());
    }

    #[test]
    fn non_numeric_qualifiers() {
        for (name, value) in [("transl_table", "eleven"), ("codon_start", "one")] {
            let mut feature = simple_cds();
            feature.add_qualifier(name, Some(value));
            let err = configure_from_feature(
                &feature,
                &entry(&[]),
                &taxonomy(),
                TranslationFixes::default(),
                &mut ValidationResult::new(),
            )
            .unwrap_err();
            assert_eq!(err.key, MessageKey::INVALID_NUMERIC_QUALIFIER);
            assert_eq!(err.params, vec![name.to_string(), value.to_string()]);
        }
    }

    #[test]
    fn feature_flags() {
        let mut feature = Feature::new(
            "mat_peptide",
            CompoundLocation::new(vec![Location::new(1, 9)]),
        );
        feature.add_qualifier("pseudo", None);
        feature.add_qualifier("exception", Some("RNA editing"));
        feature.add_qualifier("codon_start", Some("2"));
        let (request, _) = configure(&feature, &entry(&[]));
        assert!(request.peptide_feature);
        assert!(request.non_translating);
        assert!(request.exception);
        assert_eq!(request.codon_start, 2);
    }

    #[test]
    fn partiality_reversed_on_complement() {
        let location = CompoundLocation {
            complement: true,
            left_partial: true,
            ..CompoundLocation::new(vec![Location::new(1, 9)])
        };
        let (request, _) = configure(&cds(location), &entry(&[]));
        assert!(!request.left_partial);
        assert!(request.right_partial);
    }

    #[test]
    fn translation_exceptions_in_sense_coordinates() {
        let location = CompoundLocation {
            complement: true,
            ..CompoundLocation::new(vec![Location::new(1, 12)])
        };
        let mut feature = cds(location);
        feature.add_qualifier("transl_except", Some("(pos:complement(4..6),aa:Sec)"));
        let (request, _) = configure(&feature, &entry(&[]));
        assert_eq!(
            request.translation_exceptions,
            vec![TranslationException {
                begin: 7,
                end: 9,
                amino_acid: b'U',
            }]
        );
    }

    #[test]
    fn translation_exception_outside_feature() {
        let mut feature = simple_cds();
        feature.add_qualifier("transl_except", Some("(pos:20..22,aa:Trp)"));
        let err = configure_from_feature(
            &feature,
            &entry(&[]),
            &taxonomy(),
            TranslationFixes::default(),
            &mut ValidationResult::new(),
        )
        .unwrap_err();
        assert_eq!(err.key, MessageKey::INVALID_QUALIFIER);
    }

    #[test]
    fn codon_exceptions_from_qualifiers() {
        let mut feature = simple_cds();
        feature.add_qualifier("codon", Some("(seq:\"tga\",aa:Trp)"));
        let (request, _) = configure(&feature, &entry(&[]));
        assert_eq!(
            request.codon_exceptions,
            vec![CodonException {
                codon: "tga".to_string(),
                amino_acid: b'W',
            }]
        );
    }
}
