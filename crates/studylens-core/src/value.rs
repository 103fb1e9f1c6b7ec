//! Safe navigation and display conversion over untyped JSON

use serde_json::{Map, Value};

use crate::NOT_SPECIFIED;

// Keys tried, in order, when an array item is itself an object.
const ITEM_LABEL_KEYS: &[&str] = &["reason", "description", "text", "name", "title", "value"];

// Values the AI service emits in place of "missing".
const PLACEHOLDERS: &[&str] = &["not specified", "n/a", "null", "undefined"];

/// Walk a dotted path. Every intermediate segment must exist and be an
/// object; segments are case-sensitive.
pub fn lookup<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Render a JSON value as display text; `None` when there is nothing to show
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_item).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(_) | Value::Null => None,
    }
}

fn display_item(item: &Value) -> Option<String> {
    match item {
        Value::Object(obj) => ITEM_LABEL_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(display_value)),
        other => display_value(other),
    }
}

/// Display text usable as a resolved value: present, non-empty, and not a
/// stand-in for "missing"
pub fn accept(value: &Value) -> Option<String> {
    display_value(value).filter(|text| !is_placeholder(text))
}

pub fn is_placeholder(text: &str) -> bool {
    text == NOT_SPECIFIED
        || PLACEHOLDERS
            .iter()
            .any(|p| text.eq_ignore_ascii_case(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_lookup_nested_path() {
        let map = as_map(json!({"courseDetails": {"duration": {"startDate": "2025-02-24"}}}));
        assert_eq!(
            lookup(&map, "courseDetails.duration.startDate"),
            Some(&json!("2025-02-24"))
        );
        assert_eq!(lookup(&map, "courseDetails.duration.endDate"), None);
    }

    #[test]
    fn test_lookup_requires_object_intermediates() {
        let map = as_map(json!({"courseDetails": "Master of IT", "list": [{"a": 1}]}));
        assert_eq!(lookup(&map, "courseDetails.name"), None);
        assert_eq!(lookup(&map, "list.0.a"), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let map = as_map(json!({"institutionDetails": {"name": "RMIT"}}));
        assert_eq!(lookup(&map, "InstitutionDetails.name"), None);
    }

    #[test]
    fn test_display_value_kinds() {
        assert_eq!(display_value(&json!("  RMIT  ")), Some("RMIT".to_string()));
        assert_eq!(display_value(&json!("   ")), None);
        assert_eq!(display_value(&json!(38500)), Some("38500".to_string()));
        assert_eq!(display_value(&json!(true)), Some("Yes".to_string()));
        assert_eq!(display_value(&json!(null)), None);
        assert_eq!(display_value(&json!({"a": 1})), None);
        assert_eq!(display_value(&json!([])), None);
    }

    #[test]
    fn test_display_array_items() {
        let reasons = json!([
            {"reason": "Insufficient financial capacity", "criterion": "8202"},
            "Incomplete study history",
            {"code": 3}
        ]);
        assert_eq!(
            display_value(&reasons).unwrap(),
            "Insufficient financial capacity, Incomplete study history"
        );
    }

    #[test]
    fn test_accept_rejects_placeholders() {
        assert_eq!(accept(&json!(NOT_SPECIFIED)), None);
        assert_eq!(accept(&json!("N/A")), None);
        assert_eq!(accept(&json!("Not Specified")), None);
        assert_eq!(accept(&json!("None")), Some("None".to_string()));
    }
}
