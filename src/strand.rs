//! Strand orientation and partiality of coding features.

use std::fmt;

/// Strand orientation of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    #[default]
    Forward,
    Complement,
}

impl Strand {
    #[must_use]
    pub fn is_complement(self) -> bool {
        self == Self::Complement
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Complement => write!(f, "-"),
        }
    }
}

/// Whether the 5' (left) and 3' (right) ends of a feature are incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Partiality {
    pub left: bool,
    pub right: bool,
}

impl Partiality {
    #[must_use]
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Convert location partiality to sense-strand partiality.
    ///
    /// Left and right swap on the complement strand. Equal flags are unchanged.
    #[must_use]
    pub fn to_sense_strand(self, strand: Strand) -> Self {
        if strand.is_complement() && self.left != self.right {
            Self {
                left: self.right,
                right: self.left,
            }
        } else {
            self
        }
    }

    /// Convert sense-strand partiality back to location partiality.
    #[must_use]
    pub fn from_sense_strand(self, strand: Strand) -> Self {
        // the swap is its own inverse
        self.to_sense_strand(strand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_strand_is_unchanged() {
        let partiality = Partiality::new(true, false);
        assert_eq!(partiality.to_sense_strand(Strand::Forward), partiality);
        assert_eq!(partiality.from_sense_strand(Strand::Forward), partiality);
    }

    #[test]
    fn complement_strand_swaps() {
        let partiality = Partiality::new(true, false);
        assert_eq!(
            partiality.to_sense_strand(Strand::Complement),
            Partiality::new(false, true)
        );
    }

    #[test]
    fn equal_flags_never_swap() {
        for flag in [true, false] {
            let partiality = Partiality::new(flag, flag);
            assert_eq!(partiality.to_sense_strand(Strand::Complement), partiality);
        }
    }

    #[test]
    fn round_trip() {
        let partiality = Partiality::new(false, true);
        for strand in [Strand::Forward, Strand::Complement] {
            assert_eq!(
                partiality.to_sense_strand(strand).from_sense_strand(strand),
                partiality
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Complement.to_string(), "-");
    }
}
