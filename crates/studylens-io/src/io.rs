//! Record loading (JSON / JSON array / JSONL) and atomic writes

use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use studylens_core::AnalysisRecord;

use crate::LoadError;

/// Load analysis records from a file holding one JSON object, a JSON
/// array of objects, or one object per line.
pub fn load_records(path: &Path) -> Result<Vec<AnalysisRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    parse_records(&text, &path.display().to_string())
}

/// Parse records from text; `origin` names the source in errors and logs
pub fn parse_records(text: &str, origin: &str) -> Result<Vec<AnalysisRecord>, LoadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LoadError::EmptyInput {
            origin: origin.to_string(),
        });
    }

    if trimmed.starts_with('[') {
        let items: Vec<Value> =
            serde_json::from_str(trimmed).map_err(|e| LoadError::json(origin, e))?;
        let records = parse_items(items, origin);
        if records.is_empty() {
            return Err(LoadError::EmptyInput {
                origin: origin.to_string(),
            });
        }
        return Ok(records);
    }

    match serde_json::from_str::<AnalysisRecord>(trimmed) {
        Ok(record) => Ok(vec![record]),
        Err(single_err) => parse_lines(trimmed, origin).ok_or_else(|| LoadError::json(origin, single_err)),
    }
}

// Array elements that are not record objects are skipped, like bad JSONL lines.
fn parse_items(items: Vec<Value>, origin: &str) -> Vec<AnalysisRecord> {
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(origin, index, error = %e, "skipping malformed record");
            }
        }
    }
    records
}

// JSONL: malformed lines are skipped; `None` when no line parsed.
fn parse_lines(text: &str, origin: &str) -> Option<Vec<AnalysisRecord>> {
    let mut records = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(origin, line = line_num + 1, error = %e, "skipping malformed record");
            }
        }
    }
    (!records.is_empty()).then_some(records)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

/// Pretty-print `value` as JSON and write it atomically
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), LoadError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| LoadError::json(path.display().to_string(), e))?;
    atomic_write(path, json.as_bytes()).map_err(|e| LoadError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use studylens_core::DocumentType;

    #[test]
    fn test_single_object() {
        let records = parse_records(r#"{"id": 1, "documentType": "coe"}"#, "inline").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].document_type, DocumentType::Coe);
    }

    #[test]
    fn test_json_array() {
        let records = parse_records(r#"[{"id": 1}, {"id": 2, "summary": "x"}]"#, "inline").unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_array_keeps_valid_records_next_to_odd_ones() {
        let text = r#"[
            {"id": 1, "filename": "coe.pdf"},
            {"id": null, "filename": null, "analysis": {"a": 1}, "rawAnalysis": {"a": 2}},
            42,
            {"id": 3}
        ]"#;
        let records = parse_records(text, "inline").unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 0, 3]);
        assert_eq!(records[1].filename, "");
        assert_eq!(records[1].raw_analysis, Some(serde_json::json!({"a": 1})));
    }

    #[test]
    fn test_array_of_non_records_is_empty_input() {
        assert!(matches!(
            parse_records("[1, \"two\", null]", "inline"),
            Err(LoadError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_jsonl_skips_malformed_lines() {
        let text = "{\"id\": 1}\nnot json\n\n{\"id\": 3}\n";
        let records = parse_records(text, "inline").unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_empty_and_garbage_inputs() {
        assert!(matches!(
            parse_records("  \n", "inline"),
            Err(LoadError::EmptyInput { .. })
        ));
        assert!(matches!(parse_records("[]", "inline"), Err(LoadError::EmptyInput { .. })));
        assert!(matches!(
            parse_records("{\"id\": ", "inline"),
            Err(LoadError::Json { .. })
        ));
    }

    #[test]
    fn test_load_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        std::fs::write(&path, "{\"id\": 5, \"filename\": \"offer.pdf\"}\n").unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records[0].filename, "offer.pdf");

        let missing = load_records(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_atomic_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json(&path, &serde_json::json!({"ok": true})).unwrap();
        let read: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read["ok"], true);
        assert!(!path.with_extension("tmp").exists());
    }
}
