use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lyricsim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the model artifact (default: ~/.local/share/lyricsim/model.lyrsim)
    #[arg(long, global = true)]
    artifact: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Build the similarity model from a lyrics dataset
    ///
    /// Reads a CSV dataset with `artist`, `song`, and `text` columns and
    /// draws a random sample of songs from it. For each sampled song:
    ///
    /// - Strips digits, punctuation, and symbols from the lyrics and lowercases them
    /// - Removes English stopwords
    ///
    /// The cleaned lyrics are weighted with TF-IDF over the most frequent
    /// terms, and the cosine similarity of every pair of songs is computed.
    /// Records and the similarity matrix are saved together as one artifact.
    ///
    /// The build runs to completion or writes nothing.
    Build {
        /// Path to the dataset CSV
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Number of songs to sample
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        sample_size: Option<u64>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Vocabulary cap for TF-IDF
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_features: Option<u64>,
    },
    /// Show songs with lyrics similar to the given song
    Recommend {
        /// Song title (case-insensitive)
        title: String,

        /// Number of recommendations
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
        top_n: Option<u64>,
    },
    /// List the song titles available for recommendation
    Titles {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print a single config value, or the whole config file
    Get {
        /// Config key
        key: Option<String>,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            dataset,
            sample_size,
            seed,
            max_features,
        } => {
            let overrides = commands::BuildOverrides {
                dataset,
                sample_size: sample_size.map(to_usize).transpose()?,
                seed,
                max_features: max_features.map(to_usize).transpose()?,
            };
            commands::run_build(cli.artifact, overrides)?;
        }
        Commands::Recommend { title, top_n } => {
            let top_n = top_n.map(to_usize).transpose()?;
            commands::run_recommend(cli.artifact, &title, top_n)?;
        }
        Commands::Titles { filter } => {
            commands::list_titles(cli.artifact, filter.as_deref())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Get { key } => commands::config::get_config(key)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}

fn to_usize(value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| anyhow::anyhow!("value {} is too large", value))
}
