use anyhow::{Context, Result};
use lyricsim_search::{Lookup, Recommendation, Recommender};
use std::path::PathBuf;

pub fn run_recommend(artifact: Option<PathBuf>, title: &str, top_n: Option<usize>) -> Result<()> {
    let config = super::load_config(artifact)?;
    let recommender = Recommender::load(&config.artifact_path).with_context(|| {
        format!(
            "Failed to load model from {} (run `lyricsim build` first)",
            config.artifact_path.display()
        )
    })?;

    match recommender.recommend(title, top_n.unwrap_or(config.top_n)) {
        Lookup::NotFound => println!("Sorry, song not found."),
        Lookup::Found(recs) => {
            println!("Top similar songs:\n");
            print!("{}", render_table(&recs));
        }
    }
    Ok(())
}

/// Render recommendations as a 1-indexed, column-aligned table.
fn render_table(recs: &[Recommendation]) -> String {
    let artist_width = recs
        .iter()
        .map(|r| r.artist.chars().count())
        .chain(std::iter::once("artist".len()))
        .max()
        .unwrap_or(0);

    let header = format!("{:>5}  {:<artist_width$}  song\n", "S.No.", "artist");
    let rows = recs.iter().map(|rec| {
        format!(
            "{:>5}  {:<artist_width$}  {}\n",
            rec.rank, rec.artist, rec.title
        )
    });
    std::iter::once(header).chain(rows).collect()
}
