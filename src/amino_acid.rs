//! Amino acid alphabet: validity, three-letter abbreviations and ambiguity classes.

/// Stop codon.
pub const STOP: u8 = b'*';
/// Unknown amino acid.
pub const UNKNOWN: u8 = b'X';
/// Methionine, the canonical start.
pub const METHIONINE: u8 = b'M';

/// Ambiguous amino acid letters and the concrete amino acids they stand for.
static AMBIGUOUS_AMINO_ACIDS: [(u8, &[u8]); 3] = [
    (b'B', b"ND"), // Asx
    (b'Z', b"QE"), // Glx
    (b'J', b"IL"), // Xle
];

static ABBREVIATIONS: [(&str, u8); 30] = [
    ("ala", b'A'),
    ("arg", b'R'),
    ("asn", b'N'),
    ("asp", b'D'),
    ("asx", b'B'),
    ("cys", b'C'),
    ("gln", b'Q'),
    ("glu", b'E'),
    ("glx", b'Z'),
    ("gly", b'G'),
    ("his", b'H'),
    ("ile", b'I'),
    ("xle", b'J'),
    ("leu", b'L'),
    ("lys", b'K'),
    ("met", b'M'),
    ("phe", b'F'),
    ("pro", b'P'),
    ("pyl", b'O'),
    ("sec", b'U'),
    ("ser", b'S'),
    ("thr", b'T'),
    ("trp", b'W'),
    ("tyr", b'Y'),
    ("val", b'V'),
    ("xaa", b'X'),
    ("other", b'X'),
    ("unk", b'X'),
    ("term", b'*'),
    ("ter", b'*'),
];

/// Returns true for the upper-case amino acid letters and `*`.
#[must_use]
pub fn is_valid(aa: u8) -> bool {
    matches!(
        aa,
        b'A' | b'B'
            | b'C'
            | b'D'
            | b'E'
            | b'F'
            | b'G'
            | b'H'
            | b'I'
            | b'J'
            | b'K'
            | b'L'
            | b'M'
            | b'N'
            | b'O'
            | b'P'
            | b'Q'
            | b'R'
            | b'S'
            | b'T'
            | b'U'
            | b'V'
            | b'W'
            | b'X'
            | b'Y'
            | b'Z'
            | b'*'
    )
}

/// Resolve a qualifier amino acid such as `Trp`, `TERM` or `W`.
#[must_use]
pub fn from_abbreviation(abbreviation: &str) -> Option<u8> {
    let abbreviation = abbreviation.trim();
    if abbreviation.len() == 1 {
        let aa = abbreviation.as_bytes()[0].to_ascii_uppercase();
        return is_valid(aa).then_some(aa);
    }
    let lower = abbreviation.to_ascii_lowercase();
    ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, aa)| aa)
}

/// Concrete amino acids an (optionally ambiguous) letter stands for.
fn members(aa: u8) -> &'static [u8] {
    AMBIGUOUS_AMINO_ACIDS
        .iter()
        .find(|(letter, _)| *letter == aa)
        .map(|&(_, members)| members)
        .unwrap_or_else(|| single(aa))
}

fn single(aa: u8) -> &'static [u8] {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ*";
    LETTERS
        .iter()
        .position(|&l| l == aa)
        .map(|i| &LETTERS[i..i + 1])
        .unwrap_or(&[])
}

/// Combine two resolved amino acids into one.
///
/// Equal inputs are returned unchanged. Two amino acids that fall into the same
/// ambiguity class (`B`, `Z`, `J`) become that class; anything else is `X`.
#[must_use]
pub fn reconcile(first: u8, second: u8) -> u8 {
    if first == second {
        return first;
    }
    if first == UNKNOWN || second == UNKNOWN {
        return UNKNOWN;
    }
    let first_members = members(first);
    let second_members = members(second);
    if first_members.is_empty() || second_members.is_empty() {
        return UNKNOWN;
    }
    AMBIGUOUS_AMINO_ACIDS
        .iter()
        .find(|(_, class)| {
            first_members
                .iter()
                .chain(second_members)
                .all(|aa| class.contains(aa))
        })
        .map(|&(letter, _)| letter)
        .unwrap_or(UNKNOWN)
}
