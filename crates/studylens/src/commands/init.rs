use studylens_core::{CatalogSet, ReconcilerConfig};
use studylens_io::{write_json, Paths};

pub fn run(force: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let written = install(&paths, force)?;

    if written.is_empty() {
        println!("Nothing to do: config already present in {}", paths.root.display());
        println!("Use --force to overwrite.");
    } else {
        for file in written {
            println!("✓ Wrote {file}");
        }
    }
    Ok(())
}

/// Write default files under `paths`, returning what was written
pub(crate) fn install(paths: &Paths, force: bool) -> anyhow::Result<Vec<String>> {
    let mut written = Vec::new();

    let config_path = paths.config_file();
    if force || !config_path.exists() {
        write_json(&config_path, &ReconcilerConfig::default())?;
        written.push(config_path.display().to_string());
    }

    let catalog_path = paths.catalog_file();
    if force || !catalog_path.exists() {
        write_json(&catalog_path, &CatalogSet::builtin())?;
        written.push(catalog_path.display().to_string());
    }

    tracing::debug!(files = written.len(), "init complete");
    Ok(written)
}
