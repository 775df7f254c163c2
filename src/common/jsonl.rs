use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Read a line-delimited JSON file into typed records.
///
/// A missing file yields an empty vector. A malformed line is fatal for the
/// whole file: line-level corruption is not locally recoverable without
/// risking data loss, so the caller gets an error before any output is
/// written.
pub fn read_jsonl<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("Failed to read line {} of {}", idx + 1, path.display()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row: T = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {} of {}", idx + 1, path.display()))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Rewrite a line-delimited JSON file in full.
///
/// Records land in a uuid-suffixed sibling first and are renamed into place,
/// so a crash mid-write leaves the previous file untouched.
pub fn write_jsonl<T: Serialize, P: AsRef<Path>>(path: P, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let tmp = temp_sibling(path);
    {
        let file = File::create(&tmp)
            .with_context(|| format!("Failed to create temp file: {}", tmp.display()))?;
        let mut writer = BufWriter::new(file);
        for row in rows {
            let json_line = serde_json::to_string(row).context("Failed to serialize record")?;
            writeln!(writer, "{}", json_line)
                .with_context(|| format!("Failed to write to: {}", tmp.display()))?;
        }
        writer.flush()?;
    }

    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move temp file into place: {}", path.display()))?;
    Ok(())
}

/// Write one pretty-printed JSON document, with the same temp-then-rename
/// pattern as `write_jsonl`.
pub fn write_json_pretty<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let json = serde_json::to_string_pretty(value).context("Failed to serialize document")?;
    let tmp = temp_sibling(path);
    fs::write(&tmp, format!("{}\n", json))
        .with_context(|| format!("Failed to write temp file: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move temp file into place: {}", path.display()))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let run_id = Uuid::new_v4().to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!("{}.{}.tmp", file_name, &run_id[..8]))
}
