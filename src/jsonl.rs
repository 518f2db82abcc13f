// JSONL reading and writing

use eyre::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{info, warn};

/// Read every parseable line of a JSONL file, in file order.
///
/// Blank lines are ignored. Lines that fail to read or parse are skipped
/// with a warning.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("Failed to open JSONL file {:?}", path))?;
    let reader = BufReader::new(file);
    let mut items = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to read line, skipping"
                );
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str(&line) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to parse JSON, skipping"
                );
            }
        }
    }

    info!(file = ?path, count = items.len(), "Loaded records from JSONL");

    Ok(items)
}

/// Write each item as one JSON line
pub fn write_jsonl<T: Serialize, W: Write>(writer: &mut W, items: &[T]) -> Result<()> {
    for item in items {
        let json = serde_json::to_string(item).context("Failed to serialize record")?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        id: u64,
        name: String,
    }

    #[test]
    fn test_read_skips_blank_and_malformed_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.jsonl");
        fs::write(
            &path,
            "{\"id\":1,\"name\":\"Ann\"}\n\n{not json}\n{\"id\":2,\"name\":\"Bob\"}\n",
        )
        .unwrap();

        let rows: Vec<Row> = read_jsonl(&path).unwrap();
        assert_eq!(
            rows,
            vec![
                Row { id: 1, name: "Ann".to_string() },
                Row { id: 2, name: "Bob".to_string() },
            ]
        );
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result: Result<Vec<Row>> = read_jsonl(&temp.path().join("absent.jsonl"));
        assert!(result.is_err());
    }

    #[test]
    fn test_write_one_object_per_line() {
        let mut out = Vec::new();
        let rows = vec![Row { id: 1, name: "Ann".to_string() }, Row { id: 2, name: "Bob".to_string() }];
        write_jsonl(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"id\":1,\"name\":\"Ann\"}\n{\"id\":2,\"name\":\"Bob\"}\n");
    }
}
