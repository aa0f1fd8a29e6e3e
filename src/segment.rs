//! Extraction of a feature's sense-strand bases from an entry sequence.

use crate::entry::{CompoundLocation, Location};
use crate::error::Error;

/// IUPAC complement of a nucleotide, lower case. Unknown characters are kept.
#[must_use]
pub fn complement_base(base: u8) -> u8 {
    match base.to_ascii_lowercase() {
        b'a' => b't',
        b't' | b'u' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'r' => b'y',
        b'y' => b'r',
        b'k' => b'm',
        b'm' => b'k',
        b'b' => b'v',
        b'v' => b'b',
        b'd' => b'h',
        b'h' => b'd',
        other => other,
    }
}

/// Reverse complement a sequence in place.
pub fn reverse_complement(bases: &mut [u8]) {
    bases.reverse();
    for base in bases.iter_mut() {
        *base = complement_base(*base);
    }
}

/// Builds the nucleotide sequence a location describes.
pub trait SegmentFactory {
    fn create_segment(
        &self,
        sequence: &[u8],
        location: &CompoundLocation,
    ) -> Result<Vec<u8>, Error>;
}

/// Reads segments from the entry's own sequence; remote locations are not available.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSegmentFactory;

impl LocalSegmentFactory {
    fn segment(sequence: &[u8], location: &Location) -> Result<Vec<u8>, Error> {
        if let Some(accession) = &location.remote_accession {
            return Err(Error::RemoteSegment(location_string(accession, location)));
        }
        let in_range = location.begin > 0
            && location.begin <= location.end
            && location.end <= sequence.len();
        if !in_range {
            return Err(Error::Validation(format!(
                "location {location} outside sequence of length {}",
                sequence.len()
            )));
        }
        let mut bases: Vec<u8> = sequence[location.begin - 1..location.end]
            .iter()
            .map(u8::to_ascii_lowercase)
            .collect();
        if location.complement {
            reverse_complement(&mut bases);
        }
        Ok(bases)
    }
}

fn location_string(accession: &str, location: &Location) -> String {
    format!("{accession}:{}..{}", location.begin, location.end)
}

impl SegmentFactory for LocalSegmentFactory {
    fn create_segment(
        &self,
        sequence: &[u8],
        location: &CompoundLocation,
    ) -> Result<Vec<u8>, Error> {
        let mut bases = Vec::with_capacity(location.length());
        for part in &location.locations {
            bases.extend(Self::segment(sequence, part)?);
        }
        if location.complement {
            reverse_complement(&mut bases);
        }
        Ok(bases)
    }
}
