use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::translation_table::TranslationTableFactory;
use crate::translator::TranslationFixes;
use crate::validation::Severity;

/// Options for CDS translation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorConfig {
    /// Repairs applied instead of reporting errors.
    pub fixes: TranslationFixes,
    /// Replace a mismatching declared translation with the conceptual one.
    pub accept_translation: bool,
    /// Force every message of a call to this severity.
    pub severity: Option<Severity>,
    /// Genetic code for inputs that carry no feature context (FASTA translation).
    pub default_translation_table: Option<u32>,
}

impl TranslatorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(id) = self.default_translation_table
            && !TranslationTableFactory::is_defined(id)
        {
            bail!("invalid defaultTranslationTable: {id} is not a defined genetic code");
        }
        if self.severity == Some(Severity::Fix) {
            bail!("invalid severity override: FIX is reserved for applied repairs");
        }
        Ok(())
    }
}
