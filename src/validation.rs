//! Validation messages, severities and the stable message-key taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// The record is rejected.
    Error,
    /// The record is accepted with a caveat.
    Warning,
    /// Informational only.
    Info,
    /// An automatic repair was applied.
    Fix,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
            Self::Fix => write!(f, "FIX"),
        }
    }
}

/// Component a message key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Translator,
    CodonTranslator,
    CdsTranslator,
}

impl KeyFamily {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Translator => "Translator",
            Self::CodonTranslator => "CodonTranslator",
            Self::CdsTranslator => "CDSTranslator",
        }
    }
}

/// Stable message key such as `Translator-11`.
///
/// Downstream consumers match on the rendered key, so the family and number
/// of every constant below must never change. Some conditions share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    family: KeyFamily,
    number: u8,
}

impl MessageKey {
    const fn translator(number: u8) -> Self {
        Self {
            family: KeyFamily::Translator,
            number,
        }
    }

    const fn codon_translator(number: u8) -> Self {
        Self {
            family: KeyFamily::CodonTranslator,
            number,
        }
    }

    const fn cds_translator(number: u8) -> Self {
        Self {
            family: KeyFamily::CdsTranslator,
            number,
        }
    }

    pub const EMPTY_TRANSLATION: Self = Self::translator(1);
    pub const INVALID_CODON_START: Self = Self::translator(2);
    pub const CODON_START_NOT_PARTIAL: Self = Self::translator(3);
    pub const SHORT_SEQUENCE_CODON_START: Self = Self::translator(4);
    pub const EXCEPTION_BEFORE_CODON_START: Self = Self::translator(4);
    pub const EXCEPTION_BEYOND_SEQUENCE: Self = Self::translator(6);
    pub const EXCEPTION_END_BEFORE_BEGIN: Self = Self::translator(7);
    pub const EXCEPTION_INVALID_SPAN: Self = Self::translator(8);
    pub const EXCEPTION_OUT_OF_FRAME: Self = Self::translator(9);
    pub const SHORT_SEQUENCE_NOT_PARTIAL: Self = Self::translator(10);
    pub const INVALID_FRAME_LENGTH: Self = Self::translator(11);
    pub const ONLY_STOP_CODONS: Self = Self::translator(12);
    pub const MULTIPLE_TRAILING_STOP_CODONS: Self = Self::translator(13);
    pub const STOP_CODON_RIGHT_PARTIAL: Self = Self::translator(14);
    pub const MISSING_STOP_CODON: Self = Self::translator(15);
    pub const STOP_CODON_TRAILING_BASES: Self = Self::translator(16);
    pub const INTERNAL_STOP_CODON: Self = Self::translator(17);
    pub const MISSING_START_CODON: Self = Self::translator(18);
    pub const TOO_MANY_UNKNOWN_AMINO_ACIDS: Self = Self::translator(20);

    pub const UNRESOLVED_CODON: Self = Self::codon_translator(1);
    pub const UNKNOWN_TRANSLATION_TABLE: Self = Self::codon_translator(2);

    pub const EXCEPTION_WITHOUT_TRANSLATION: Self = Self::cds_translator(1);
    pub const TRANSLATION_MISMATCH: Self = Self::cds_translator(2);
    pub const UNNECESSARY_EXCEPTION: Self = Self::cds_translator(3);
    pub const LOCATION_OUT_OF_RANGE: Self = Self::cds_translator(4);
    pub const TRANSLATION_TABLE_MISMATCH: Self = Self::cds_translator(5);
    pub const TRANSLATION_TABLE_SELECTED: Self = Self::cds_translator(6);
    pub const FIXED_DEGENERATE_START_CODON: Self = Self::cds_translator(7);
    pub const FIXED_MISSING_START_CODON: Self = Self::cds_translator(8);
    pub const FIXED_RIGHT_PARTIAL_STOP_CODON: Self = Self::cds_translator(9);
    pub const FIXED_RIGHT_PARTIAL_CODON: Self = Self::cds_translator(10);
    pub const INVALID_AMINO_ACID: Self = Self::cds_translator(11);
    pub const MISSING_SEQUENCE: Self = Self::cds_translator(12);
    pub const REMOTE_SEGMENT_UNAVAILABLE: Self = Self::cds_translator(13);
    pub const INVALID_QUALIFIER: Self = Self::cds_translator(14);
    pub const INVALID_NUMERIC_QUALIFIER: Self = Self::cds_translator(15);

    #[must_use]
    pub fn family(self) -> KeyFamily {
        self.family
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.number
    }

    /// Short human-readable description used in console reports.
    #[must_use]
    pub fn summary(self) -> &'static str {
        match (self.family, self.number) {
            (KeyFamily::Translator, 1) => "no amino acids were translated",
            (KeyFamily::Translator, 2) => "codon start must be 1, 2 or 3",
            (KeyFamily::Translator, 3) => "codon start other than 1 requires a 5' partial feature",
            (KeyFamily::Translator, 4) => "position precedes the codon start",
            (KeyFamily::Translator, 6) => "translation exception lies beyond the sequence",
            (KeyFamily::Translator, 7) => "translation exception ends before it begins",
            (KeyFamily::Translator, 8) => "translation exception must span exactly one codon",
            (KeyFamily::Translator, 9) => "translation exception is out of frame",
            (KeyFamily::Translator, 10) => "sequence shorter than one codon must be partial",
            (KeyFamily::Translator, 11) => "sequence length is not a multiple of three",
            (KeyFamily::Translator, 12) => "translation consists of stop codons only",
            (KeyFamily::Translator, 13) => "more than one trailing stop codon",
            (KeyFamily::Translator, 14) => "3' partial feature ends with a stop codon",
            (KeyFamily::Translator, 15) => "translation does not end with a stop codon",
            (KeyFamily::Translator, 16) => "stop codon is followed by trailing bases",
            (KeyFamily::Translator, 17) => "internal stop codons",
            (KeyFamily::Translator, 18) => "translation does not start with methionine",
            (KeyFamily::Translator, 20) => "more than half of the codons are unknown",
            (KeyFamily::CodonTranslator, 1) => "codon could not be translated",
            (KeyFamily::CodonTranslator, 2) => "unknown translation table",
            (KeyFamily::CdsTranslator, 1) => "exception feature without translation",
            (KeyFamily::CdsTranslator, 2) => "declared translation differs from conceptual translation",
            (KeyFamily::CdsTranslator, 3) => "exception is not needed, translations match",
            (KeyFamily::CdsTranslator, 4) => "location lies outside the sequence",
            (KeyFamily::CdsTranslator, 5) => "translation table differs from the taxonomy",
            (KeyFamily::CdsTranslator, 6) => "translation table selected",
            (KeyFamily::CdsTranslator, 7) => "degenerate start codon translated as methionine",
            (KeyFamily::CdsTranslator, 8) => "missing start codon, feature made 5' partial",
            (KeyFamily::CdsTranslator, 9) => "stop codon found, 3' partiality removed",
            (KeyFamily::CdsTranslator, 10) => "trailing bases after the stop codon removed",
            (KeyFamily::CdsTranslator, 11) => "translation contains invalid amino acids",
            (KeyFamily::CdsTranslator, 12) => "entry has no sequence",
            (KeyFamily::CdsTranslator, 13) => "remote location sequence is not available",
            (KeyFamily::CdsTranslator, 14) => "invalid qualifier value",
            (KeyFamily::CdsTranslator, 15) => "qualifier value is not a valid number",
            _ => "unknown message",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family.prefix(), self.number)
    }
}

impl Serialize for MessageKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Record a message points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub accession: String,
    pub feature: String,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.accession, self.feature)
    }
}

/// A single severity-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub key: MessageKey,
    pub params: Vec<String>,
    pub origin: Option<Origin>,
}

impl ValidationMessage {
    pub fn new(severity: Severity, key: MessageKey) -> Self {
        Self {
            severity,
            key,
            params: Vec::new(),
            origin: None,
        }
    }

    #[must_use]
    pub fn with(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params.extend(params);
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.key, self.key.summary())?;
        if !self.params.is_empty() {
            write!(f, " [{}]", self.params.join(", "))?;
        }
        if let Some(origin) = &self.origin {
            write!(f, " ({origin})")?;
        }
        Ok(())
    }
}

/// Ordered collection of messages produced by one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: ValidationMessage) {
        self.messages.push(message);
    }

    pub fn extend(&mut self, other: ValidationResult) {
        self.messages.extend(other.messages);
    }

    #[must_use]
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// True when no message has `Error` severity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    #[must_use]
    pub fn has_key(&self, key: MessageKey) -> bool {
        self.messages.iter().any(|m| m.key == key)
    }

    #[must_use]
    pub fn find(&self, key: MessageKey) -> Option<&ValidationMessage> {
        self.messages.iter().find(|m| m.key == key)
    }

    /// Force every message to the given severity.
    pub fn set_severity(&mut self, severity: Severity) {
        for message in &mut self.messages {
            message.severity = severity;
        }
    }

    /// Attach an origin to every message that does not carry one yet.
    pub fn set_origin(&mut self, origin: &Origin) {
        for message in &mut self.messages {
            if message.origin.is_none() {
                message.origin = Some(origin.clone());
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
