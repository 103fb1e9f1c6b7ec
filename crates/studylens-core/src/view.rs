//! Resolved, render-ready view of one analysis record

use chrono::{DateTime, Utc};
use serde::Serialize;
use studylens_text::Highlighter;

use crate::catalog::Catalog;
use crate::normalize::normalize;
use crate::resolve::{summary_text, Reconciler};
use crate::types::{AnalysisRecord, DocumentType, ResolvedField};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSection {
    pub title: String,
    pub fields: Vec<ResolvedField>,
}

/// Every catalog field resolved for one record; derived, never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub id: i64,
    pub filename: String,
    pub document_type: DocumentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub sections: Vec<ResolvedSection>,
}

impl AnalysisView {
    pub fn build(record: &AnalysisRecord, catalog: &Catalog, reconciler: &Reconciler) -> Self {
        let normalized = normalize(record.raw_analysis.as_ref());
        let sections = catalog
            .sections
            .iter()
            .map(|section| ResolvedSection {
                title: section.title.clone(),
                fields: section
                    .fields
                    .iter()
                    .map(|field| reconciler.resolve(field, record, &normalized))
                    .collect(),
            })
            .collect();

        Self {
            id: record.id,
            filename: record.filename.clone(),
            document_type: record.document_type.clone(),
            created_at: record.created_at,
            summary: summary_text(record, &normalized).map(str::to_string),
            sections,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&ResolvedField> {
        self.fields().find(|f| f.key() == key)
    }

    /// `(specified, total)` field counts
    pub fn completeness(&self) -> (usize, usize) {
        let total = self.fields().count();
        let specified = self.fields().filter(|f| f.is_specified()).count();
        (specified, total)
    }

    pub fn highlighted_summary(&self, highlighter: &Highlighter) -> Option<String> {
        self.summary.as_deref().map(|s| highlighter.highlight(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NOT_SPECIFIED;
    use serde_json::json;

    #[test]
    fn test_build_coe_view() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "id": 3,
            "filename": "coe.pdf",
            "documentType": "coe",
            "analysis": {
                "institutionDetails": {"name": "Swinburne University of Technology"},
                "healthInsurance": {"provider": "Allianz Care"}
            }
        }))
        .unwrap();
        let catalog = Catalog::for_document(&record.document_type);
        let view = AnalysisView::build(&record, &catalog, &Reconciler::default());

        assert_eq!(view.sections.len(), catalog.sections.len());
        assert_eq!(
            view.field("institutionName").unwrap().value,
            "Swinburne University of Technology"
        );
        assert_eq!(view.field("oshcProvider").unwrap().value, "Allianz Care");
        assert_eq!(view.field("studentId").unwrap().value, NOT_SPECIFIED);

        let (specified, total) = view.completeness();
        assert_eq!(specified, 2);
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn test_highlighted_summary() {
        let record = AnalysisRecord::from_summary("Tuition of $12,000 per semester.");
        let view = AnalysisView::build(
            &record,
            &Catalog::for_document(&DocumentType::default()),
            &Reconciler::default(),
        );
        let highlighted = view.highlighted_summary(&Highlighter::default()).unwrap();
        assert!(highlighted.contains(r#"<span class="highlight-amount">$12,000</span>"#));
    }
}
