//! Atomic JSONL writing.
//!
//! On POSIX systems a rename within one filesystem is atomic. Writes go to a
//! sibling temp file first, then the temp file is renamed over the target, so
//! an interrupted write leaves the original file intact.

use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Atomically writes a slice of values to a JSONL file.
///
/// Each value is serialized onto its own line. The data is first written to
/// `<path>.tmp` and then renamed over `path`; on failure the temp file is
/// removed on a best-effort basis and the original file is left unchanged.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, a value fails to
/// serialize, or the final rename fails.
pub async fn write_jsonl_atomic<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = temp_sibling(path);

    if let Err(e) = write_all(&temp_path, values).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;

    tracing::debug!(path = %path.display(), records = values.len(), "wrote JSONL file");
    Ok(())
}

async fn write_all<T: Serialize>(temp_path: &Path, values: &[T]) -> Result<()> {
    let file = File::create(temp_path).await?;
    let mut writer = BufWriter::new(file);

    for value in values {
        let line = serde_json::to_string(value)?;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    Ok(())
}

/// Temp file path next to the target: `links.jsonl` -> `links.jsonl.tmp`.
/// Staying in the same directory keeps the final rename on one filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
