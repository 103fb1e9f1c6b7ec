//! Tiered field resolution over a normalized analysis

use serde_json::{Map, Value};
use studylens_text::try_extract;

use crate::config::ReconcilerConfig;
use crate::normalize::normalize;
use crate::types::{AnalysisRecord, FieldSpec, Resolution, ResolvedField};
use crate::value::{accept, lookup};
use crate::NOT_SPECIFIED;

/// Resolves display fields for analysis records.
///
/// Tiers, first match wins:
/// 1. candidate paths through the normalized analysis
/// 2. same-name key on the normalized analysis
/// 3. same-name key on the record itself
/// 4. pattern extraction from the summary text
/// 5. [`NOT_SPECIFIED`]
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcilerConfig,
}

impl Reconciler {
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Resolve one field against an already normalized analysis
    pub fn resolve(
        &self,
        field: &FieldSpec,
        record: &AnalysisRecord,
        normalized: &Map<String, Value>,
    ) -> ResolvedField {
        let (value, source) = self
            .find(field, record, normalized)
            .unwrap_or_else(|| (NOT_SPECIFIED.to_string(), Resolution::Sentinel));
        tracing::trace!(key = %field.key, source = ?source, "field resolved");
        ResolvedField {
            spec: field.clone(),
            value,
            source,
        }
    }

    /// Normalize the record's analysis, then resolve one field
    pub fn resolve_field(&self, field: &FieldSpec, record: &AnalysisRecord) -> ResolvedField {
        let normalized = normalize(record.raw_analysis.as_ref());
        self.resolve(field, record, &normalized)
    }

    /// Normalize once and resolve every field, preserving order
    pub fn resolve_all(&self, fields: &[FieldSpec], record: &AnalysisRecord) -> Vec<ResolvedField> {
        let normalized = normalize(record.raw_analysis.as_ref());
        fields
            .iter()
            .map(|field| self.resolve(field, record, &normalized))
            .collect()
    }

    fn find(
        &self,
        field: &FieldSpec,
        record: &AnalysisRecord,
        normalized: &Map<String, Value>,
    ) -> Option<(String, Resolution)> {
        for path in &field.candidate_paths {
            if let Some(value) = lookup(normalized, path).and_then(accept) {
                return Some((value, Resolution::Path(path.clone())));
            }
        }

        if let Some(value) = normalized.get(&field.key).and_then(accept) {
            return Some((value, Resolution::Direct));
        }

        if let Some(value) = record.extra.get(&field.key).and_then(accept) {
            return Some((value, Resolution::Record));
        }

        if self.config.text_fallback {
            if let Some(value) = summary_text(record, normalized)
                .and_then(|summary| try_extract(summary, &field.key))
            {
                return Some((value, Resolution::Summary));
            }
        }

        None
    }
}

/// Resolve with the default configuration
pub fn resolve(field: &FieldSpec, record: &AnalysisRecord) -> ResolvedField {
    Reconciler::default().resolve_field(field, record)
}

/// The record's summary, or a `summary` string inside the analysis
pub fn summary_text<'a>(
    record: &'a AnalysisRecord,
    normalized: &'a Map<String, Value>,
) -> Option<&'a str> {
    record
        .summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            normalized
                .get("summary")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with(analysis: Value) -> AnalysisRecord {
        AnalysisRecord {
            raw_analysis: Some(analysis),
            ..AnalysisRecord::default()
        }
    }

    fn institution() -> FieldSpec {
        FieldSpec::new(
            "institutionName",
            "Institution",
            &["institutionDetails.name", "provider.name"],
        )
    }

    #[test]
    fn test_earlier_path_wins() {
        let record = record_with(json!({
            "institutionDetails": {"name": "First"},
            "provider": {"name": "Second"}
        }));
        let resolved = resolve(&institution(), &record);
        assert_eq!(resolved.value, "First");
        assert_eq!(
            resolved.source,
            Resolution::Path("institutionDetails.name".to_string())
        );
    }

    #[test]
    fn test_sentinel_path_skipped() {
        let record = record_with(json!({
            "institutionDetails": {"name": NOT_SPECIFIED},
            "provider": {"name": "Second"}
        }));
        assert_eq!(resolve(&institution(), &record).value, "Second");
    }

    #[test]
    fn test_direct_key_after_paths() {
        let field = FieldSpec::new("tuitionFee", "Tuition", &["fees.tuition"]);
        let record = record_with(json!({"tuitionFee": 32000}));
        let resolved = resolve(&field, &record);
        assert_eq!(resolved.value, "32000");
        assert_eq!(resolved.source, Resolution::Direct);
    }

    #[test]
    fn test_flattened_alias_found_by_key() {
        let field = FieldSpec::new("perYearCost", "Cost per Year", &[]);
        let record = record_with(json!({
            "financialDetails": {"costBreakdown": {"perYear": "$41,000"}}
        }));
        let resolved = resolve(&field, &record);
        assert_eq!(resolved.value, "$41,000");
        assert_eq!(resolved.source, Resolution::Direct);
    }

    #[test]
    fn test_record_level_key() {
        let field = FieldSpec::new("visaSubclass", "Visa Subclass", &["visaDetails.subclass"]);
        let mut record = AnalysisRecord::default();
        record.extra.insert("visaSubclass".to_string(), json!("500"));
        let resolved = resolve(&field, &record);
        assert_eq!(resolved.value, "500");
        assert_eq!(resolved.source, Resolution::Record);
    }

    #[test]
    fn test_summary_fallback() {
        let record = AnalysisRecord::from_summary("Offer to study at Example University in 2025.");
        let resolved = resolve(&institution(), &record);
        assert_eq!(resolved.value, "Example University");
        assert_eq!(resolved.source, Resolution::Summary);
    }

    #[test]
    fn test_summary_inside_analysis() {
        let record = record_with(json!({"summary": "Course commencing on 14 July 2025."}));
        let field = FieldSpec::new("startDate", "Start Date", &[]);
        assert_eq!(resolve(&field, &record).value, "14 July 2025");
    }

    #[test]
    fn test_text_fallback_disabled() {
        let reconciler = Reconciler::new(ReconcilerConfig {
            text_fallback: false,
            ..ReconcilerConfig::default()
        });
        let record = AnalysisRecord::from_summary("Offer to study at Example University.");
        let resolved = reconciler.resolve_field(&institution(), &record);
        assert_eq!(resolved.value, NOT_SPECIFIED);
        assert_eq!(resolved.source, Resolution::Sentinel);
    }

    #[test]
    fn test_nothing_matches_is_sentinel() {
        let field = FieldSpec::new("oshcProvider", "OSHC Provider", &["healthInsurance.provider"]);
        let resolved = resolve(&field, &AnalysisRecord::default());
        assert_eq!(resolved.value, NOT_SPECIFIED);
        assert!(!resolved.is_specified());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let record = record_with(json!({"institutionDetails": {"name": "Curtin University"}}));
        let reconciler = Reconciler::default();
        let fields = vec![institution(), FieldSpec::new("startDate", "Start", &[])];
        assert_eq!(
            reconciler.resolve_all(&fields, &record),
            reconciler.resolve_all(&fields, &record)
        );
    }
}
