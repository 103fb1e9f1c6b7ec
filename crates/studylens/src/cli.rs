use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "studylens")]
#[command(version)]
#[command(about = "Resolve display fields from AI document analyses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every catalog field for analysis records
    Resolve {
        /// JSON, JSON array or JSONL file of records ("-" for stdin)
        input: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Catalog overrides (defaults to ~/.studylens/catalog.json)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Skip regex extraction from summary text
        #[arg(long)]
        no_text_fallback: bool,

        /// Write JSON views to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract one field from free text (argument or stdin)
    Extract {
        /// Field key, e.g. institutionName or startDate
        #[arg(short, long)]
        field: String,

        text: Option<String>,
    },

    /// Highlight amounts and percentages in text (argument or stdin)
    Highlight {
        text: Option<String>,

        /// List matched figures instead of marking up the text
        #[arg(long)]
        amounts: bool,
    },

    /// Show the field catalog for a document type
    Fields {
        /// Document tag, e.g. coe, offer_letter, visa_rejection
        #[arg(short, long)]
        document_type: Option<String>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write default config and catalog files to ~/.studylens
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,
}
