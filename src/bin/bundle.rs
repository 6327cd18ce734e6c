// Converts a JSON export from the training side into the three bincode
// artifacts the app loads.
// Usage: rent_bundle <export.json> [out_dir]
use anyhow::{bail, Context};
use rent_core::config::AppConfig;
use rent_core::persistence::{import_json_bundle, save_bundle, ArtifactPaths};
use rent_core::{logging, RentEngine};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init(&config.log_filter);

    let mut args = std::env::args().skip(1);
    let Some(export) = args.next().map(PathBuf::from) else {
        bail!("usage: rent_bundle <export.json> [out_dir]");
    };
    let paths = match args.next() {
        Some(dir) => ArtifactPaths::in_dir(dir),
        None => config.artifact_paths(),
    };

    let bundle = import_json_bundle(&export)
        .with_context(|| format!("importing {}", export.display()))?;
    // Refuse to write artifacts the app would reject at startup.
    RentEngine::from_bundle(bundle.clone()).context("export is not usable for prediction")?;

    save_bundle(&bundle, &paths).context("writing artifacts")?;
    println!(
        "Wrote {} localities, {} model features to:\n  {}\n  {}\n  {}",
        bundle.encoder.len(),
        bundle.model.n_features(),
        paths.model.display(),
        paths.pipeline.display(),
        paths.localities.display()
    );
    Ok(())
}
