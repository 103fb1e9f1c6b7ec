//! Free-text helpers for AI document analyses: last-resort field
//! extraction from summaries and highlighting of monetary figures.

mod extract;
mod highlight;

pub use extract::{extract, try_extract, TextField, SCHOLARSHIP_AWARDED};
pub use highlight::{find_amounts, highlight, HighlightStyle, Highlighter};

/// Display text used whenever a field cannot be resolved.
pub const NOT_SPECIFIED: &str = "Not specified in document";
