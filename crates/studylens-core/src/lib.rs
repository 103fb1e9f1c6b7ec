//! Field reconciliation for AI document analyses.
//!
//! Raw analysis output is normalized into a flat lookup map, then every
//! displayable field is resolved through candidate paths, same-name keys and
//! summary text, ending at [`NOT_SPECIFIED`].

mod catalog;
mod config;
mod normalize;
mod resolve;
mod types;
pub mod value;
mod view;

pub use catalog::{Catalog, CatalogSet, Section};
pub use config::ReconcilerConfig;
pub use normalize::normalize;
pub use resolve::{resolve, summary_text, Reconciler};
pub use studylens_text::NOT_SPECIFIED;
pub use types::{AnalysisRecord, DocumentType, FieldSpec, Resolution, ResolvedField};
pub use view::{AnalysisView, ResolvedSection};
