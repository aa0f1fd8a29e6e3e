//! Parser for FASTA files of coding sequences.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::Error;

/// Open a file for buffered reading, decompressing it if the name ends in `.gz`.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let file = File::open(path)?;
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
    if is_gzip {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a plain or gzip-compressed FASTA file.
pub fn read_fasta(path: &Path) -> Result<Vec<(String, Vec<u8>)>, Error> {
    parse_fasta(open(path)?)
}

/// Reads gzip-compressed FASTA and yields (id, sequence) pairs.
pub fn parse_fasta_gz<R: Read>(reader: R) -> Result<Vec<(String, Vec<u8>)>, Error> {
    parse_fasta(BufReader::new(GzDecoder::new(reader)))
}

/// Reads FASTA from a buffered reader and yields (id, sequence) pairs.
///
/// Bases are lower-cased. Whitespace inside sequence lines is dropped.
pub fn parse_fasta<R: BufRead>(reader: R) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut results: Vec<(String, Vec<u8>)> = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_sequence: Vec<u8> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                results.push((id, std::mem::take(&mut current_sequence)));
            }
            current_id = Some(extract_id(header)?);
        } else if current_id.is_some() {
            current_sequence.extend(
                line.bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_lowercase()),
            );
        } else if !line.trim().is_empty() {
            return Err(Error::Format("sequence data before first FASTA header".to_string()));
        }
    }

    if let Some(id) = current_id {
        results.push((id, current_sequence));
    }

    Ok(results)
}

/// Extracts the record id from a FASTA header (without `>`).
///
/// `ENA|AB000263|AB000263.1 ...` style headers yield the second field,
/// anything else the first whitespace-delimited token.
fn extract_id(header: &str) -> Result<String, Error> {
    let first_token = header.split_whitespace().next().unwrap_or("");
    if first_token.is_empty() {
        return Err(Error::Parse(format!("empty FASTA header: >{header}")));
    }

    let mut fields = first_token.split('|');
    if let (Some(_), Some(id)) = (fields.next(), fields.next())
        && !id.is_empty()
    {
        return Ok(id.to_string());
    }
    Ok(first_token.to_string())
}
