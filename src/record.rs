//! Publication record loading.
//!
//! Handles loading publication records from Zotero API payloads, supporting
//! the API item shape (record wrapped under a `data` field), bare record
//! arrays, and JSONL format (one item per line).

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading records.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid JSONL at line {line}: {message}")]
    JsonlError { line: usize, message: String },

    #[error("Payload must be a JSON array")]
    NotAnArray,
}

/// A contributor to a work, identified by last name for display purposes.
///
/// Non-person creators (e.g. institutions) may carry no `lastName`; they
/// deserialize to an empty token rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    #[serde(default)]
    pub last_name: String,
}

impl Creator {
    pub fn new(last_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
        }
    }
}

/// A single bibliographic entry as returned by the Zotero publications API.
///
/// Every field is defaulted so that partial records deserialize cleanly;
/// the formatter is total over whatever the API hands back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibRecord {
    /// Contributors in display order.
    #[serde(default)]
    pub creators: Vec<Creator>,
    /// Publication date in Zotero's loosely-specified format
    /// (e.g. "2022-05-01", "May 2022", "2022").
    #[serde(default)]
    pub date: String,
    /// Title of the work.
    #[serde(default)]
    pub title: String,
    /// Journal or venue name, for journal articles.
    #[serde(default)]
    pub publication_title: Option<String>,
    /// Issuing institution, for report-type records.
    #[serde(default)]
    pub institution: Option<String>,
    /// Supplementary free-text notes.
    #[serde(default)]
    pub extra: Option<String>,
    /// Link target; when present the title is rendered as a hyperlink.
    #[serde(default)]
    pub url: Option<String>,
}

/// Loads publication records from a JSON or JSONL file.
///
/// # Arguments
///
/// * `path` - Path to the payload file
///
/// # Returns
///
/// The records in payload order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains invalid JSON.
pub fn load_records(path: &Path) -> Result<Vec<BibRecord>, RecordError> {
    let content = fs::read_to_string(path)?;
    parse_records(&content)
}

/// Parses publication records from payload text.
///
/// Supports two input formats:
/// - JSON array: either Zotero API items (`[{"data": {...}}, ...]`) or
///   bare record objects (`[{"title": ...}, ...]`)
/// - JSONL: one item per line, either shape
///
/// Empty input yields an empty vector.
pub fn parse_records(content: &str) -> Result<Vec<BibRecord>, RecordError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let value: serde_json::Value = serde_json::from_str(trimmed)?;
        return records_from_value(value);
    }

    // Treat as JSONL: parse each non-empty line as one item
    let mut records = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let item: serde_json::Value =
            serde_json::from_str(line).map_err(|e| RecordError::JsonlError {
                line: line_num + 1, // 1-indexed line numbers
                message: e.to_string(),
            })?;
        let record = record_from_item(&item).map_err(|e| RecordError::JsonlError {
            line: line_num + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Converts a parsed JSON array of API items into records, preserving order.
pub fn records_from_value(value: serde_json::Value) -> Result<Vec<BibRecord>, RecordError> {
    let items = value.as_array().ok_or(RecordError::NotAnArray)?;
    items
        .iter()
        .map(|item| record_from_item(item).map_err(RecordError::from))
        .collect()
}

/// Unwraps the API `data` envelope if present, then deserializes the record.
fn record_from_item(item: &serde_json::Value) -> Result<BibRecord, serde_json::Error> {
    let inner = item.get("data").unwrap_or(item);
    serde_json::from_value(inner.clone())
}
