//! Record and field types shared by the reconciler

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::NOT_SPECIFIED;

/// Kind of uploaded document, one variant per known analysis schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Confirmation of Enrolment
    Coe,
    OfferLetter,
    VisaRejection,
    /// Any tag without a dedicated schema, kept verbatim
    Other(String),
}

impl DocumentType {
    pub fn from_tag(tag: &str) -> Self {
        let canonical = tag.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match canonical.as_str() {
            "coe" | "confirmation_of_enrolment" | "confirmation_of_enrollment"
            | "enrollment_confirmation" | "enrolment_confirmation" => DocumentType::Coe,
            "offer_letter" | "offer" | "letter_of_offer" => DocumentType::OfferLetter,
            "visa_rejection" | "visa_refusal" | "rejection_letter" | "refusal_letter" => {
                DocumentType::VisaRejection
            }
            _ => DocumentType::Other(tag.trim().to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            DocumentType::Coe => "coe",
            DocumentType::OfferLetter => "offer_letter",
            DocumentType::VisaRejection => "visa_rejection",
            DocumentType::Other(tag) => tag,
        }
    }

    /// Human-readable name for headings
    pub fn label(&self) -> &str {
        match self {
            DocumentType::Coe => "Confirmation of Enrolment",
            DocumentType::OfferLetter => "Offer Letter",
            DocumentType::VisaRejection => "Visa Refusal",
            DocumentType::Other(tag) if tag.is_empty() => "Document",
            DocumentType::Other(tag) => tag,
        }
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Other(String::new())
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl Serialize for DocumentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for DocumentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.map(|t| DocumentType::from_tag(&t)).unwrap_or_default())
    }
}

/// One uploaded document and whatever the AI analysis produced for it.
///
/// Deserialization never rejects an object: absent, null or mistyped
/// fields fall back to defaults, and a record with nothing but a `summary`
/// is still renderable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RecordRepr")]
pub struct AnalysisRecord {
    pub id: i64,
    pub filename: String,
    pub document_type: DocumentType,
    /// Structured AI output: an object, or a string holding embedded JSON
    #[serde(rename = "analysis", skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Remaining top-level keys, consulted after the analysis itself
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisRecord {
    /// Record carrying only free text, as produced when structuring failed
    pub fn from_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }
}

// Wire shape of a record. Every spelling the upstream service has used is
// its own field so that two spellings on one object never collide.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RecordRepr {
    id: Option<Value>,
    filename: Option<Value>,
    file_name: Option<Value>,
    document_type: Option<Value>,
    #[serde(rename = "document_type")]
    document_type_snake: Option<Value>,
    analysis: Option<Value>,
    raw_analysis: Option<Value>,
    analysis_result: Option<Value>,
    summary: Option<Value>,
    created_at: Option<Value>,
    #[serde(rename = "created_at")]
    created_at_snake: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RecordRepr> for AnalysisRecord {
    fn from(repr: RecordRepr) -> Self {
        Self {
            id: repr.id.as_ref().and_then(lenient_id).unwrap_or_default(),
            filename: first_text([repr.filename, repr.file_name]).unwrap_or_default(),
            document_type: first_text([repr.document_type, repr.document_type_snake])
                .map(|tag| DocumentType::from_tag(&tag))
                .unwrap_or_default(),
            raw_analysis: [repr.analysis, repr.raw_analysis, repr.analysis_result]
                .into_iter()
                .flatten()
                .next(),
            summary: first_text([repr.summary]),
            created_at: [repr.created_at, repr.created_at_snake]
                .into_iter()
                .flatten()
                .find_map(|raw| lenient_timestamp(&raw)),
            extra: repr.extra,
        }
    }
}

// JSON null already arrives as `None`, so the first `Some` is the first
// non-null spelling.
fn first_text<const N: usize>(candidates: [Option<Value>; N]) -> Option<String> {
    candidates.into_iter().flatten().find_map(|value| match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_id(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// Unparseable timestamps degrade to `None` rather than rejecting the record.
fn lenient_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    tracing::debug!(raw, "ignoring unparseable createdAt");
    None
}

/// A named displayable fact and where to look for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    /// Dotted paths into the analysis, most trusted first
    #[serde(default)]
    pub candidate_paths: Vec<String>,
}

impl FieldSpec {
    pub fn new(key: &str, label: &str, candidate_paths: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            candidate_paths: candidate_paths.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Which lookup tier produced a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", content = "path", rename_all = "snake_case")]
pub enum Resolution {
    /// A candidate path through the normalized analysis
    Path(String),
    /// Same-name key on the normalized analysis (original or flattened)
    Direct,
    /// Same-name key on the top-level record
    Record,
    /// Pattern match in the free-text summary
    Summary,
    /// Nothing matched
    Sentinel,
}

/// A field with its display value; never absent, at worst [`NOT_SPECIFIED`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedField {
    #[serde(flatten)]
    pub spec: FieldSpec,
    pub value: String,
    pub source: Resolution,
}

impl ResolvedField {
    pub fn key(&self) -> &str {
        &self.spec.key
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn is_specified(&self) -> bool {
        self.value != NOT_SPECIFIED
    }
}
