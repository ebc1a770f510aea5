//! word2vec / GloVe readers
//!
//! Text layout: optional `"<count> <dim>"` header, then `term v1 .. vD` per
//! line. Files without the header (GloVe) take the dimension from the first
//! row. Binary layout: ASCII header line, then per entry `term ` followed by
//! `dim` little-endian f32 values.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{ModelError, Result};
use crate::vectors::KeyedVectors;

/// Load a text-format model from disk
pub fn load_text(path: &Path) -> Result<KeyedVectors> {
    log::info!("Reading word2vec text model from: {}", path.display());
    read_text(BufReader::new(File::open(path)?))
}

/// Load a binary-format model from disk
pub fn load_binary(path: &Path) -> Result<KeyedVectors> {
    log::info!("Reading word2vec binary model from: {}", path.display());
    read_binary(BufReader::new(File::open(path)?))
}

/// Widest vector accepted from a header
const MAX_DIMENSION: usize = 1 << 16;

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let count = parts.next()?.parse().ok()?;
    let dimension = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((count, dimension))
}

fn check_dimension(dimension: usize) -> Result<usize> {
    if dimension == 0 || dimension > MAX_DIMENSION {
        return Err(ModelError::format(
            1,
            format!(
                "header dimension {} outside 1..={}",
                dimension, MAX_DIMENSION
            ),
        ));
    }
    Ok(dimension)
}

pub fn read_text<R: BufRead>(reader: R) -> Result<KeyedVectors> {
    let mut table: Option<KeyedVectors> = None;
    let mut expected_count = None;
    let mut vector = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        if idx == 0 {
            if let Some((count, dimension)) = parse_header(&line) {
                let dimension = check_dimension(dimension)?;
                expected_count = Some(count);
                table = Some(KeyedVectors::with_capacity(dimension, count));
                continue;
            }
        }

        let mut parts = line.split_whitespace();
        let term = match parts.next() {
            Some(term) => term.to_string(),
            None => continue,
        };

        vector.clear();
        for part in parts {
            let value: f32 = part
                .parse()
                .map_err(|_| ModelError::format(line_no, format!("invalid number '{}'", part)))?;
            vector.push(value);
        }

        let table = table.get_or_insert_with(|| KeyedVectors::with_capacity(vector.len(), 0));
        table.push(term, &vector, line_no)?;
    }

    let table = table.filter(|t| !t.is_empty()).ok_or(ModelError::EmptyVocabulary)?;
    if let Some(count) = expected_count {
        if count != table.len() {
            log::warn!(
                "Header announced {} terms, loaded {} distinct terms",
                count,
                table.len()
            );
        }
    }

    log::info!("Loaded {} terms ({}d)", table.len(), table.dimension());
    Ok(table)
}

pub fn read_binary<R: BufRead>(mut reader: R) -> Result<KeyedVectors> {
    let mut header = String::new();
    reader.read_line(&mut header)?;
    let (count, dimension) = parse_header(&header)
        .ok_or_else(|| ModelError::format(1, "expected '<count> <dim>' header"))?;
    let dimension = check_dimension(dimension)?;

    let mut table = KeyedVectors::with_capacity(dimension, count);
    let mut raw = vec![0u8; dimension * std::mem::size_of::<f32>()];
    let mut vector = vec![0.0_f32; dimension];
    let mut word = Vec::new();

    for entry in 1..=count {
        word.clear();
        reader.read_until(b' ', &mut word)?;
        if word.pop() != Some(b' ') {
            return Err(ModelError::format(entry, "unexpected end of file in term"));
        }
        let start = word
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(word.len());
        let term = String::from_utf8_lossy(&word[start..]).into_owned();

        reader.read_exact(&mut raw).map_err(|e| {
            ModelError::format(entry, format!("truncated vector for '{}': {}", term, e))
        })?;
        for (value, chunk) in vector.iter_mut().zip(raw.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        table.push(term, &vector, entry)?;
    }

    if table.is_empty() {
        return Err(ModelError::EmptyVocabulary);
    }

    log::info!("Loaded {} terms ({}d)", table.len(), table.dimension());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn binary_model(entries: &[(&str, [f32; 2])]) -> Vec<u8> {
        let mut out = format!("{} 2\n", entries.len()).into_bytes();
        for (term, vector) in entries {
            out.extend_from_slice(term.as_bytes());
            out.push(b' ');
            for value in vector {
                out.extend_from_slice(&value.to_le_bytes());
            }
            out.push(b'\n');
        }
        out
    }

    #[test]
    fn test_text_with_header() {
        let text = "3 2\ncat 1.0 0.0\ndog 0.9 0.1\ncar 0.0 1.0\n";
        let table = read_text(Cursor::new(text)).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.dimension(), 2);
        assert_eq!(table.terms()[2], "car");
    }

    #[test]
    fn test_text_without_header() {
        let text = "cat 1.0 0.0 0.5\ndog 0.9 0.1 0.4\n";
        let table = read_text(Cursor::new(text)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 3);
    }

    #[test]
    fn test_text_skips_blank_lines() {
        let text = "2 2\n\ncat 1.0 0.0\n\ndog 0.0 1.0\n";
        assert_eq!(read_text(Cursor::new(text)).unwrap().len(), 2);
    }

    #[test]
    fn test_text_bad_number() {
        let text = "2 2\ncat 1.0 0.0\ndog 0.9 abc\n";
        match read_text(Cursor::new(text)).unwrap_err() {
            ModelError::Format { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("abc"));
            }
            other => panic!("Expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_text_ragged_row() {
        let text = "cat 1.0 0.0\ndog 0.9\n";
        assert!(matches!(
            read_text(Cursor::new(text)),
            Err(ModelError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_text_non_finite_value() {
        let text = "a NaN 1.0\nb 1.0 0.0\n";
        match read_text(Cursor::new(text)).unwrap_err() {
            ModelError::Format { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("non-finite"));
            }
            other => panic!("Expected format error, got {other:?}"),
        }
        assert!(matches!(
            read_text(Cursor::new("a 1.0 0.0\nb inf 0.0\n")),
            Err(ModelError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_text_oversized_header_count() {
        let table = read_text(Cursor::new("18446744073709551615 2\ncat 1.0 0.0\n")).unwrap();
        assert_eq!(table.len(), 1);

        assert!(matches!(
            read_text(Cursor::new("18446744073709551615 300\ncat 1.0 0.0\n")),
            Err(ModelError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_text_bad_header_dimension() {
        assert!(matches!(
            read_text(Cursor::new("1 4611686018427387904\ncat 1.0 0.0\n")),
            Err(ModelError::Format { line: 1, .. })
        ));
        assert!(matches!(
            read_text(Cursor::new("1 0\ncat\n")),
            Err(ModelError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_text_header_only_is_empty() {
        assert!(matches!(
            read_text(Cursor::new("0 300\n")),
            Err(ModelError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_binary_round_trip() {
        let bytes = binary_model(&[("cat", [1.0, 0.0]), ("dog", [0.6, 0.8])]);
        let table = read_binary(Cursor::new(bytes)).unwrap();
        assert_eq!(table.terms(), ["cat".to_string(), "dog".to_string()]);
        let sim = table.similarity("cat", "dog").unwrap();
        assert!((sim - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_binary_truncated() {
        let mut bytes = binary_model(&[("cat", [1.0, 0.0]), ("dog", [0.6, 0.8])]);
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(
            read_binary(Cursor::new(bytes)),
            Err(ModelError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_binary_bad_header() {
        assert!(matches!(
            read_binary(Cursor::new(b"not a header\n".to_vec())),
            Err(ModelError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_binary_oversized_header() {
        assert!(matches!(
            read_binary(Cursor::new(b"1 4611686018427387904\ncat ".to_vec())),
            Err(ModelError::Format { line: 1, .. })
        ));

        let mut bytes = binary_model(&[("cat", [1.0, 0.0])]);
        bytes.splice(0..1, b"18446744073709551615".iter().copied());
        assert!(matches!(
            read_binary(Cursor::new(bytes)),
            Err(ModelError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_load_text_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2 2").unwrap();
        writeln!(file, "cat 1.0 0.0").unwrap();
        writeln!(file, "dog 0.0 1.0").unwrap();
        let table = load_text(file.path()).unwrap();
        assert!(table.contains("dog"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_text(Path::new("/nonexistent/model.txt")),
            Err(ModelError::Io(_))
        ));
    }
}
