use anyhow::{Context, Result};
use lyricsim_etl::{build_model, Normalizer};
use std::path::PathBuf;

/// Build settings given on the command line; each overrides the config.
#[derive(Debug, Default)]
pub struct BuildOverrides {
    pub dataset: Option<PathBuf>,
    pub sample_size: Option<usize>,
    pub seed: Option<u64>,
    pub max_features: Option<usize>,
}

pub fn run_build(artifact: Option<PathBuf>, overrides: BuildOverrides) -> Result<()> {
    let mut config = super::load_config(artifact)?;
    if let Some(dataset) = overrides.dataset {
        config.dataset_path = Some(dataset);
    }
    if let Some(sample_size) = overrides.sample_size {
        config.sample_size = sample_size;
    }
    if let Some(seed) = overrides.seed {
        config.sample_seed = Some(seed);
    }
    if let Some(max_features) = overrides.max_features {
        config.max_features = max_features;
    }

    config.validate()?;

    let normalizer = Normalizer::from_config(&config);
    let report = build_model(&config, &normalizer).context("Model build failed")?;

    println!("\n✓ Build complete");
    println!("  Songs: {}", report.records);
    println!("  Vocabulary: {} terms", report.vocabulary);
    println!("  Artifact: {}", report.artifact_path.display());
    Ok(())
}
