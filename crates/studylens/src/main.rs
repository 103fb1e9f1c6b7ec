mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries rendered output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            input,
            format,
            catalog,
            no_text_fallback,
            output,
        } => commands::resolve::run(commands::resolve::ResolveArgs {
            input: &input,
            format,
            catalog: catalog.as_deref(),
            text_fallback: !no_text_fallback,
            output: output.as_deref(),
        }),
        Commands::Extract { field, text } => commands::extract::run(&field, text.as_deref()),
        Commands::Highlight { text, amounts } => commands::highlight::run(text.as_deref(), amounts),
        Commands::Fields {
            document_type,
            format,
        } => commands::fields::run(document_type.as_deref(), format),
        Commands::Init { force } => commands::init::run(force),
        Commands::Version => commands::version::run(),
    }
}
