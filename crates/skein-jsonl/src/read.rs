//! Resilient JSONL reading.

use crate::error::Result;
use crate::warning::Warning;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads a JSONL file, skipping malformed lines instead of failing.
///
/// Each non-empty line is deserialized as a `T`. Lines that fail to parse
/// produce a [`Warning`] and are skipped; blank lines are ignored silently.
/// Only IO failures (file missing, permission denied) abort the read.
///
/// Returns the successfully parsed records in file order together with the
/// warnings collected along the way.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a read fails mid-stream.
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => warnings.push(Warning::MalformedLine {
                line_number,
                error: e.to_string(),
            }),
        }
    }

    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        warnings = warnings.len(),
        "read JSONL file"
    );

    Ok((records, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: String,
        value: u32,
    }

    #[tokio::test]
    async fn reads_well_formed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        std::fs::write(
            &path,
            "{\"id\":\"a\",\"value\":1}\n{\"id\":\"b\",\"value\":2}\n",
        )
        .unwrap();

        let (records, warnings) = read_jsonl_resilient::<Record, _>(&path).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(warnings.is_empty());
        assert_eq!(records[0].id, "a");
        assert_eq!(records[1].value, 2);
    }

    #[tokio::test]
    async fn malformed_line_becomes_warning_not_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        std::fs::write(
            &path,
            "{\"id\":\"a\",\"value\":1}\nnot json at all\n{\"id\":\"c\",\"value\":3}\n",
        )
        .unwrap();

        let (records, warnings) = read_jsonl_resilient::<Record, _>(&path).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line_number(), 2);
    }

    #[tokio::test]
    async fn blank_lines_are_skipped_silently() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        std::fs::write(&path, "\n{\"id\":\"a\",\"value\":1}\n\n  \n").unwrap();

        let (records, warnings) = read_jsonl_resilient::<Record, _>(&path).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.jsonl");
        let result = read_jsonl_resilient::<Record, _>(&path).await;
        assert!(result.is_err());
    }
}
