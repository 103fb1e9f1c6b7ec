use studylens_core::{Catalog, DocumentType};
use studylens_io::{load_catalogs, Paths};

use crate::cli::OutputFormat;

const KNOWN_TYPES: [DocumentType; 3] = [
    DocumentType::Coe,
    DocumentType::OfferLetter,
    DocumentType::VisaRejection,
];

pub fn run(document_type: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let catalogs = load_catalogs(&paths.catalog_file())?;

    let types: Vec<DocumentType> = match document_type {
        Some(tag) => vec![DocumentType::from_tag(tag)],
        None => KNOWN_TYPES.to_vec(),
    };

    match format {
        OutputFormat::Json => {
            let listing: serde_json::Map<String, serde_json::Value> = types
                .iter()
                .map(|doc| -> anyhow::Result<(String, serde_json::Value)> {
                    let catalog = catalogs.catalog_for(doc);
                    Ok((doc.as_tag().to_string(), serde_json::to_value(catalog)?))
                })
                .collect::<anyhow::Result<_>>()?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Text => {
            for doc in &types {
                print!("{}", render_catalog(doc, &catalogs.catalog_for(doc)));
            }
        }
    }
    Ok(())
}

fn render_catalog(doc: &DocumentType, catalog: &Catalog) -> String {
    let mut out = format!("{} ({} fields)\n", doc.label(), catalog.len());
    for section in &catalog.sections {
        out.push_str(&format!("  {}\n", section.title));
        for field in &section.fields {
            out.push_str(&format!(
                "    {:<24} {:<28} {}\n",
                field.key,
                field.label,
                field.candidate_paths.join(" | ")
            ));
        }
    }
    out
}
