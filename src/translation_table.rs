//! NCBI genetic codes as start-codon and other-codon maps.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::amino_acid;

/// Base order of the NCBI amino acid strings (TTT, TTC, TTA, TTG, TCT, ...).
const NCBI_BASE_ORDER: [u8; 4] = [b't', b'c', b'a', b'g'];

/// NCBI genetic code definition: id, name, amino acids (NCBI order), start codons.
struct GeneticCodeDefinition {
    id: u32,
    name: &'static str,
    amino_acids: &'static str,
    start_codons: &'static [&'static str],
}

#[rustfmt::skip]
static GENETIC_CODES: [GeneticCodeDefinition; 27] = [
    GeneticCodeDefinition { id: 1, name: "Standard",
        amino_acids: "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "ctg", "atg"] },
    GeneticCodeDefinition { id: 2, name: "Vertebrate Mitochondrial",
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
        start_codons: &["att", "atc", "ata", "atg", "gtg"] },
    GeneticCodeDefinition { id: 3, name: "Yeast Mitochondrial",
        amino_acids: "FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ata", "atg"] },
    GeneticCodeDefinition { id: 4, name: "Mold, Protozoan, and Coelenterate Mitochondrial and Mycoplasma/Spiroplasma",
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["tta", "ttg", "ctg", "att", "atc", "ata", "atg", "gtg"] },
    GeneticCodeDefinition { id: 5, name: "Invertebrate Mitochondrial",
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "att", "atc", "ata", "atg", "gtg"] },
    GeneticCodeDefinition { id: 6, name: "Ciliate, Dasycladacean and Hexamita Nuclear",
        amino_acids: "FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 9, name: "Echinoderm and Flatworm Mitochondrial",
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        start_codons: &["atg", "gtg"] },
    GeneticCodeDefinition { id: 10, name: "Euplotid Nuclear",
        amino_acids: "FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 11, name: "Bacterial, Archaeal and Plant Plastid",
        amino_acids: "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "ctg", "att", "atc", "ata", "atg", "gtg"] },
    GeneticCodeDefinition { id: 12, name: "Alternative Yeast Nuclear",
        amino_acids: "FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ctg", "atg"] },
    GeneticCodeDefinition { id: 13, name: "Ascidian Mitochondrial",
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "ata", "atg", "gtg"] },
    GeneticCodeDefinition { id: 14, name: "Alternative Flatworm Mitochondrial",
        amino_acids: "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 15, name: "Blepharisma Macronuclear",
        amino_acids: "FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 16, name: "Chlorophycean Mitochondrial",
        amino_acids: "FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 21, name: "Trematode Mitochondrial",
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        start_codons: &["atg", "gtg"] },
    GeneticCodeDefinition { id: 22, name: "Scenedesmus obliquus Mitochondrial",
        amino_acids: "FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 23, name: "Thraustochytrium Mitochondrial",
        amino_acids: "FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["att", "atg", "gtg"] },
    GeneticCodeDefinition { id: 24, name: "Rhabdopleuridae Mitochondrial",
        amino_acids: "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "ctg", "atg", "gtg"] },
    GeneticCodeDefinition { id: 25, name: "Candidate Division SR1 and Gracilibacteria",
        amino_acids: "FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "atg", "gtg"] },
    GeneticCodeDefinition { id: 26, name: "Pachysolen tannophilus Nuclear",
        amino_acids: "FFLLSSSSYY**CC*WLLLAPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ctg", "atg"] },
    GeneticCodeDefinition { id: 27, name: "Karyorelict Nuclear",
        amino_acids: "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 28, name: "Condylostoma Nuclear",
        amino_acids: "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 29, name: "Mesodinium Nuclear",
        amino_acids: "FFLLSSSSYYYYCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 30, name: "Peritrich Nuclear",
        amino_acids: "FFLLSSSSYYEECC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 31, name: "Blastocrithidia Nuclear",
        amino_acids: "FFLLSSSSYYEECCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["atg"] },
    GeneticCodeDefinition { id: 32, name: "Balanophoraceae Plastid",
        amino_acids: "FFLLSSSSYY*WCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "ctg", "att", "atc", "ata", "atg", "gtg"] },
    GeneticCodeDefinition { id: 33, name: "Cephalodiscidae Mitochondrial",
        amino_acids: "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        start_codons: &["ttg", "ctg", "atg", "gtg"] },
];

/// Process-wide table cache, built on first use and read-only afterwards.
static TABLES: LazyLock<BTreeMap<u32, TranslationTable>> = LazyLock::new(|| {
    GENETIC_CODES
        .iter()
        .map(|definition| (definition.id, TranslationTable::from_definition(definition)))
        .collect()
});

/// Codon to amino acid maps for one genetic code.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    id: u32,
    name: &'static str,
    start_codon_map: HashMap<String, u8>,
    other_codon_map: HashMap<String, u8>,
}

impl TranslationTable {
    /// The standard code.
    pub const DEFAULT: u32 = 1;
    /// Bacterial, archaeal and plant plastid code.
    pub const PLASTID: u32 = 11;

    fn from_definition(definition: &GeneticCodeDefinition) -> Self {
        let mut start_codon_map = HashMap::with_capacity(64);
        let mut other_codon_map = HashMap::with_capacity(64);
        for (i, &aa) in definition.amino_acids.as_bytes().iter().enumerate() {
            let codon = String::from_utf8_lossy(&[
                NCBI_BASE_ORDER[i / 16],
                NCBI_BASE_ORDER[(i / 4) % 4],
                NCBI_BASE_ORDER[i % 4],
            ])
            .into_owned();
            let start_aa = if definition.start_codons.contains(&codon.as_str()) {
                amino_acid::METHIONINE
            } else {
                aa
            };
            start_codon_map.insert(codon.clone(), start_aa);
            other_codon_map.insert(codon, aa);
        }
        Self {
            id: definition.id,
            name: definition.name,
            start_codon_map,
            other_codon_map,
        }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Amino acid of a concrete codon in the first position of a CDS.
    #[must_use]
    pub fn start_amino_acid(&self, codon: &str) -> Option<u8> {
        self.start_codon_map.get(codon).copied()
    }

    /// Amino acid of a concrete codon anywhere after the first position.
    #[must_use]
    pub fn other_amino_acid(&self, codon: &str) -> Option<u8> {
        self.other_codon_map.get(codon).copied()
    }

    #[must_use]
    pub fn start_codon_map(&self) -> &HashMap<String, u8> {
        &self.start_codon_map
    }

    #[must_use]
    pub fn other_codon_map(&self) -> &HashMap<String, u8> {
        &self.other_codon_map
    }
}

/// Lookup of translation tables by NCBI genetic code id.
pub struct TranslationTableFactory;

impl TranslationTableFactory {
    #[must_use]
    pub fn table(id: u32) -> Option<&'static TranslationTable> {
        TABLES.get(&id)
    }

    #[must_use]
    pub fn is_defined(id: u32) -> bool {
        TABLES.contains_key(&id)
    }

    /// All defined genetic code ids in ascending order.
    pub fn ids() -> impl Iterator<Item = u32> {
        TABLES.keys().copied()
    }
}
