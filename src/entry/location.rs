//! Feature locations and sense-strand position mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::strand::{Partiality, Strand};

/// A 1-based inclusive base range, optionally on another sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub begin: usize,
    pub end: usize,
    #[serde(default)]
    pub complement: bool,
    /// Accession of the sequence this range refers to when it is not the entry's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_accession: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end,
            complement: false,
            remote_accession: None,
        }
    }

    #[must_use]
    pub fn complement(begin: usize, end: usize) -> Self {
        Self {
            complement: true,
            ..Self::new(begin, end)
        }
    }

    #[must_use]
    pub fn remote(accession: &str, begin: usize, end: usize) -> Self {
        Self {
            remote_accession: Some(accession.to_string()),
            ..Self::new(begin, end)
        }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        (self.end + 1).saturating_sub(self.begin)
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.remote_accession.is_some()
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        (self.begin..=self.end).contains(&position)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = match &self.remote_accession {
            Some(accession) => format!("{accession}:{}..{}", self.begin, self.end),
            None if self.begin == self.end => self.begin.to_string(),
            None => format!("{}..{}", self.begin, self.end),
        };
        if self.complement {
            write!(f, "complement({range})")
        } else {
            f.write_str(&range)
        }
    }
}

/// A location segment in sense-strand order.
#[derive(Debug, Clone, Copy)]
struct SenseSegment<'a> {
    index: usize,
    location: &'a Location,
    reverse: bool,
}

/// The joined locations of a feature with its partiality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundLocation {
    pub locations: Vec<Location>,
    /// The whole join is on the complement strand.
    #[serde(default)]
    pub complement: bool,
    #[serde(default)]
    pub left_partial: bool,
    #[serde(default)]
    pub right_partial: bool,
}

impl CompoundLocation {
    #[must_use]
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        let all_complement =
            !self.locations.is_empty() && self.locations.iter().all(|l| l.complement);
        if self.complement || all_complement {
            Strand::Complement
        } else {
            Strand::Forward
        }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.locations.iter().map(Location::length).sum()
    }

    #[must_use]
    pub fn partiality(&self) -> Partiality {
        Partiality::new(self.left_partial, self.right_partial)
    }

    pub fn set_partiality(&mut self, partiality: Partiality) {
        self.left_partial = partiality.left;
        self.right_partial = partiality.right;
    }

    /// Segments in the order their bases appear in the sense-strand sequence.
    fn sense_segments(&self) -> Vec<SenseSegment<'_>> {
        let segments = self
            .locations
            .iter()
            .enumerate()
            .map(|(index, location)| SenseSegment {
                index,
                location,
                reverse: location.complement != self.complement,
            });
        if self.complement {
            segments.rev().collect()
        } else {
            segments.collect()
        }
    }

    /// Map a position on the entry sequence to a 1-based sense-strand position.
    ///
    /// Remote locations contribute their length but never match.
    #[must_use]
    pub fn to_local_position(&self, global: usize) -> Option<usize> {
        let mut offset = 0;
        for segment in self.sense_segments() {
            let location = segment.location;
            if !location.is_remote() && location.contains(global) {
                let within = if segment.reverse {
                    location.end - global
                } else {
                    global - location.begin
                };
                return Some(offset + within + 1);
            }
            offset += location.length();
        }
        None
    }

    /// Map a 1-based sense-strand position back to the entry sequence.
    #[must_use]
    pub fn to_global_position(&self, local: usize) -> Option<usize> {
        if local == 0 {
            return None;
        }
        let mut remaining = local - 1;
        for segment in self.sense_segments() {
            let location = segment.location;
            let length = location.length();
            if remaining < length {
                if location.is_remote() {
                    return None;
                }
                return Some(if segment.reverse {
                    location.end - remaining
                } else {
                    location.begin + remaining
                });
            }
            remaining -= length;
        }
        None
    }

    /// Remove `bases` from the 3' end of the sense-strand sequence.
    ///
    /// Segments that become empty are dropped.
    pub fn trim_three_prime(&mut self, mut bases: usize) {
        while bases > 0 {
            let Some(last) = self.sense_segments().last().map(|s| (s.index, s.reverse)) else {
                return;
            };
            let (index, reverse) = last;
            let length = self.locations[index].length();
            if length <= bases {
                self.locations.remove(index);
                bases -= length;
                continue;
            }
            let location = &mut self.locations[index];
            if reverse {
                location.begin += bases;
            } else {
                location.end -= bases;
            }
            bases = 0;
        }
    }
}

impl fmt::Display for CompoundLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut inner = self
            .locations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        if self.locations.len() > 1 {
            inner = format!("join({inner})");
        }
        if self.complement {
            write!(f, "complement({inner})")
        } else {
            f.write_str(&inner)
        }
    }
}
