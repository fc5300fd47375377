pub mod build;
pub mod config;
pub mod recommend;
pub mod titles;

pub use build::{run_build, BuildOverrides};
pub use recommend::run_recommend;
pub use titles::list_titles;

use anyhow::Result;
use lyricsim_etl::Config;
use std::path::PathBuf;

/// Load the configuration, honouring the global `--artifact` flag.
fn load_config(artifact: Option<PathBuf>) -> Result<Config> {
    match artifact {
        Some(path) => Config::load_with_artifact_path(path),
        None => Config::load(),
    }
}
