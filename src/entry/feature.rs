//! Features and qualifiers of a sequence entry.

use serde::{Deserialize, Serialize};

use super::location::CompoundLocation;

pub const CDS: &str = "CDS";
pub const SOURCE: &str = "source";

/// Feature keys handled as peptides: translated but without start or stop requirements.
pub const PEPTIDE_FEATURES: [&str; 4] =
    ["mat_peptide", "sig_peptide", "transit_peptide", "propeptide"];

pub mod qualifier {
    pub const TRANSLATION: &str = "translation";
    pub const TRANSL_TABLE: &str = "transl_table";
    pub const CODON_START: &str = "codon_start";
    pub const TRANSL_EXCEPT: &str = "transl_except";
    pub const CODON: &str = "codon";
    pub const EXCEPTION: &str = "exception";
    pub const PSEUDO: &str = "pseudo";
    pub const PSEUDOGENE: &str = "pseudogene";
    pub const ORGANISM: &str = "organism";
    pub const ORGANELLE: &str = "organelle";
    pub const DB_XREF: &str = "db_xref";
}

/// A `/name=value` annotation. Flag qualifiers such as `/pseudo` have no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Qualifier {
    #[must_use]
    pub fn new(name: &str, value: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Cds,
    Peptide,
    Source,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub location: CompoundLocation,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
}

impl Feature {
    #[must_use]
    pub fn new(name: &str, location: CompoundLocation) -> Self {
        Self {
            name: name.to_string(),
            location,
            qualifiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        match self.name.as_str() {
            CDS => FeatureKind::Cds,
            SOURCE => FeatureKind::Source,
            name if PEPTIDE_FEATURES.contains(&name) => FeatureKind::Peptide,
            _ => FeatureKind::Other,
        }
    }

    /// CDS and peptide features carry a translation.
    #[must_use]
    pub fn is_translatable(&self) -> bool {
        matches!(self.kind(), FeatureKind::Cds | FeatureKind::Peptide)
    }

    pub fn qualifiers_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Qualifier> {
        self.qualifiers.iter().filter(move |q| q.name == name)
    }

    #[must_use]
    pub fn has_qualifier(&self, name: &str) -> bool {
        self.qualifiers.iter().any(|q| q.name == name)
    }

    /// Value of the first qualifier with this name.
    #[must_use]
    pub fn qualifier_value(&self, name: &str) -> Option<&str> {
        self.qualifiers_named(name).find_map(|q| q.value.as_deref())
    }

    /// Replace the value of the first qualifier with this name, or add one.
    pub fn set_qualifier(&mut self, name: &str, value: &str) {
        match self.qualifiers.iter_mut().find(|q| q.name == name) {
            Some(qualifier) => qualifier.value = Some(value.to_string()),
            None => self.add_qualifier(name, Some(value)),
        }
    }

    pub fn add_qualifier(&mut self, name: &str, value: Option<&str>) {
        self.qualifiers.push(Qualifier::new(name, value));
    }

    pub fn remove_qualifiers(&mut self, name: &str) {
        self.qualifiers.retain(|q| q.name != name);
    }

    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.qualifier_value(qualifier::TRANSLATION)
    }

    #[must_use]
    pub fn transl_table(&self) -> Option<&str> {
        self.qualifier_value(qualifier::TRANSL_TABLE)
    }

    #[must_use]
    pub fn codon_start(&self) -> Option<&str> {
        self.qualifier_value(qualifier::CODON_START)
    }

    /// `/pseudo` or `/pseudogene`.
    #[must_use]
    pub fn is_pseudo(&self) -> bool {
        self.has_qualifier(qualifier::PSEUDO) || self.has_qualifier(qualifier::PSEUDOGENE)
    }

    #[must_use]
    pub fn is_exception(&self) -> bool {
        self.has_qualifier(qualifier::EXCEPTION)
    }

    pub fn transl_excepts(&self) -> impl Iterator<Item = &str> {
        self.qualifiers_named(qualifier::TRANSL_EXCEPT)
            .filter_map(|q| q.value.as_deref())
    }

    pub fn codons(&self) -> impl Iterator<Item = &str> {
        self.qualifiers_named(qualifier::CODON)
            .filter_map(|q| q.value.as_deref())
    }

    #[must_use]
    pub fn organism(&self) -> Option<&str> {
        self.qualifier_value(qualifier::ORGANISM)
    }

    #[must_use]
    pub fn organelle(&self) -> Option<&str> {
        self.qualifier_value(qualifier::ORGANELLE)
    }

    /// Taxonomy id from `/db_xref="taxon:<id>"`.
    #[must_use]
    pub fn taxon_id(&self) -> Option<u64> {
        self.qualifiers_named(qualifier::DB_XREF)
            .filter_map(|q| q.value.as_deref())
            .find_map(|value| value.strip_prefix("taxon:"))
            .and_then(|id| id.trim().parse().ok())
    }
}
