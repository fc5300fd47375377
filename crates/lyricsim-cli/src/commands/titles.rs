use anyhow::{Context, Result};
use lyricsim_search::Recommender;
use std::path::PathBuf;

pub fn list_titles(artifact: Option<PathBuf>, filter: Option<&str>) -> Result<()> {
    let config = super::load_config(artifact)?;
    let recommender = Recommender::load(&config.artifact_path).with_context(|| {
        format!(
            "Failed to load model from {}",
            config.artifact_path.display()
        )
    })?;

    let filter = filter.map(str::to_lowercase);
    let mut shown = 0;
    for title in recommender.titles() {
        if let Some(filter) = &filter {
            if !title.to_lowercase().contains(filter.as_str()) {
                continue;
            }
        }
        println!("{title}");
        shown += 1;
    }

    log::debug!("Listed {} of {} songs", shown, recommender.len());
    Ok(())
}
