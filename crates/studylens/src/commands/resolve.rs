use std::path::Path;

use studylens_core::{AnalysisRecord, AnalysisView, CatalogSet, Reconciler};
use studylens_io::{load_catalogs, load_config, load_records, parse_records, write_json, Paths};
use studylens_text::Highlighter;

use crate::cli::OutputFormat;

pub struct ResolveArgs<'a> {
    pub input: &'a str,
    pub format: OutputFormat,
    pub catalog: Option<&'a Path>,
    pub text_fallback: bool,
    pub output: Option<&'a Path>,
}

pub fn run(args: ResolveArgs<'_>) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let mut config = load_config(&paths)?;
    if !args.text_fallback {
        config.text_fallback = false;
    }

    let catalog_path = args
        .catalog
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths.catalog_file());
    let catalogs = load_catalogs(&catalog_path)?;

    let records = if args.input == "-" {
        parse_records(&super::text_or_stdin(None)?, "stdin")?
    } else {
        load_records(Path::new(args.input))?
    };

    let highlighter = config.highlighter();
    let reconciler = Reconciler::new(config);
    let views = build_views(&records, &catalogs, &reconciler);
    tracing::info!(records = views.len(), "resolved analysis records");

    if let Some(output) = args.output {
        write_json(output, &views)?;
        println!("Wrote {} view(s) to {}", views.len(), output.display());
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
        OutputFormat::Text => {
            for view in &views {
                print!("{}", render_text(view, &highlighter));
            }
        }
    }
    Ok(())
}

pub fn build_views(
    records: &[AnalysisRecord],
    catalogs: &CatalogSet,
    reconciler: &Reconciler,
) -> Vec<AnalysisView> {
    records
        .iter()
        .map(|record| {
            let catalog = catalogs.catalog_for(&record.document_type);
            AnalysisView::build(record, &catalog, reconciler)
        })
        .collect()
}

pub fn render_text(view: &AnalysisView, highlighter: &Highlighter) -> String {
    let (specified, total) = view.completeness();
    let name = if view.filename.is_empty() {
        "(unnamed)"
    } else {
        view.filename.as_str()
    };

    let mut out = format!("#{} {} [{}]\n", view.id, name, view.document_type.label());
    if let Some(created) = view.created_at {
        out.push_str(&format!("Analyzed: {}\n", created.format("%Y-%m-%d %H:%M UTC")));
    }
    out.push_str(&format!("Completeness: {specified}/{total} fields\n"));
    if let Some(summary) = view.highlighted_summary(highlighter) {
        out.push_str(&format!("Summary: {summary}\n"));
    }

    for section in &view.sections {
        out.push_str(&format!("\n  {}\n", section.title));
        for field in &section.fields {
            out.push_str(&format!("    {:<28} {}\n", field.label(), field.value));
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use studylens_core::{Catalog, DocumentType, NOT_SPECIFIED};

    #[test]
    fn test_views_follow_document_type() {
        let records = vec![
            AnalysisRecord {
                document_type: DocumentType::Coe,
                ..AnalysisRecord::default()
            },
            AnalysisRecord {
                document_type: DocumentType::VisaRejection,
                ..AnalysisRecord::default()
            },
        ];
        let views = build_views(&records, &CatalogSet::new(), &Reconciler::default());
        assert!(views[0].field("oshcProvider").is_some());
        assert!(views[1].field("rejectionReasons").is_some());
    }

    #[test]
    fn test_render_text_lists_sections() {
        let record = AnalysisRecord {
            id: 9,
            filename: "offer.pdf".to_string(),
            document_type: DocumentType::OfferLetter,
            summary: Some("Deposit of $5,000 due before 1 March 2025.".to_string()),
            ..AnalysisRecord::default()
        };
        let catalog = Catalog::for_document(&record.document_type);
        let view = AnalysisView::build(&record, &catalog, &Reconciler::default());
        let text = render_text(&view, &Highlighter::default());

        assert!(text.starts_with("#9 offer.pdf [Offer Letter]"));
        assert!(text.contains("Fees & Scholarship"));
        assert!(text.contains(NOT_SPECIFIED));
        assert!(text.contains(r#"<span class="highlight-amount">$5,000</span>"#));
    }

    #[test]
    fn test_render_text_header_lines() {
        let record: AnalysisRecord = serde_json::from_value(serde_json::json!({
            "id": 4,
            "documentType": "coe",
            "createdAt": "2025-03-01T10:30:00Z"
        }))
        .unwrap();
        let catalog = Catalog::for_document(&record.document_type);
        let view = AnalysisView::build(&record, &catalog, &Reconciler::default());
        let text = render_text(&view, &Highlighter::default());

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("#4 (unnamed) [Confirmation of Enrolment]"));
        assert_eq!(lines.next(), Some("Analyzed: 2025-03-01 10:30 UTC"));
        assert_eq!(
            lines.next(),
            Some(format!("Completeness: 0/{} fields", catalog.len()).as_str())
        );
        assert!(!text.contains("Summary:"));
        assert!(text.ends_with("\n\n"));
    }
}
