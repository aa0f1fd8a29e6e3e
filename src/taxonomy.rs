//! Taxonomy lookups used to select a genetic code.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// A taxonomy node with the genetic codes used by its nuclear and mitochondrial genomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxon {
    pub tax_id: u64,
    pub scientific_name: String,
    #[serde(default)]
    pub genetic_code: Option<u32>,
    #[serde(default)]
    pub mitochondrial_genetic_code: Option<u32>,
    #[serde(default)]
    pub division: Option<String>,
}

impl Taxon {
    #[must_use]
    pub fn genetic_code(&self) -> Option<u32> {
        self.genetic_code
    }

    #[must_use]
    pub fn mitochondrial_genetic_code(&self) -> Option<u32> {
        self.mitochondrial_genetic_code
    }

    #[must_use]
    pub fn division(&self) -> Option<&str> {
        self.division.as_deref()
    }
}

/// Source of taxonomy information.
pub trait TaxonomyClient {
    fn taxon_by_id(&self, tax_id: u64) -> Option<Taxon>;

    fn taxon_by_scientific_name(&self, scientific_name: &str) -> Option<Taxon>;
}

/// Taxonomy held in memory, loaded from a JSON array of taxa.
#[derive(Debug, Default)]
pub struct InMemoryTaxonomy {
    by_id: HashMap<u64, Taxon>,
    // lower-case scientific name -> tax id
    by_name: HashMap<String, u64>,
}

impl InMemoryTaxonomy {
    #[must_use]
    pub fn new(taxa: Vec<Taxon>) -> Self {
        let mut taxonomy = Self::default();
        for taxon in taxa {
            taxonomy.insert(taxon);
        }
        taxonomy
    }

    pub fn insert(&mut self, taxon: Taxon) {
        self.by_name
            .insert(taxon.scientific_name.to_lowercase(), taxon.tax_id);
        self.by_id.insert(taxon.tax_id, taxon);
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read taxonomy file: {}", path.display()))?;
        let taxa: Vec<Taxon> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse taxonomy file: {}", path.display()))?;
        validate(&taxa)?;
        Ok(Self::new(taxa))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn validate(taxa: &[Taxon]) -> Result<()> {
    for taxon in taxa {
        if taxon.scientific_name.trim().is_empty() {
            bail!("taxon {} has no scientific name", taxon.tax_id);
        }
    }
    Ok(())
}

impl TaxonomyClient for InMemoryTaxonomy {
    fn taxon_by_id(&self, tax_id: u64) -> Option<Taxon> {
        self.by_id.get(&tax_id).cloned()
    }

    fn taxon_by_scientific_name(&self, scientific_name: &str) -> Option<Taxon> {
        self.by_name
            .get(&scientific_name.trim().to_lowercase())
            .and_then(|id| self.by_id.get(id))
            .cloned()
    }
}
