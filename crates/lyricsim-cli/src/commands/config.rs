use anyhow::{Context, Result};
use lyricsim_etl::{config, Config};

const VALID_KEYS: &str = "dataset_path, artifact_path, sample_size, sample_seed, max_features, \
                          token_pattern, stopwords_path, top_n";

fn display_path(path: Option<&std::path::Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| String::from("<not set>"))
}

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    for key in VALID_KEYS.split(", ") {
        println!("  {}: {}", key, value_of(&config, key)?);
    }

    println!("\nPriority: CLI args > ENV vars (LYRICSIM_*) > Config file > Defaults");

    Ok(())
}

fn value_of(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "dataset_path" => display_path(config.dataset_path.as_deref()),
        "artifact_path" => config.artifact_path.display().to_string(),
        "sample_size" => config.sample_size.to_string(),
        "sample_seed" => config
            .sample_seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| String::from("<not set>")),
        "max_features" => config.max_features.to_string(),
        "token_pattern" => config.token_pattern.clone(),
        "stopwords_path" => display_path(config.stopwords_path.as_deref()),
        "top_n" => config.top_n.to_string(),
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    };
    Ok(value)
}

/// Get a specific config value.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;
        println!("{}", value_of(&config, &key)?);
    } else {
        // No key provided, show entire config file contents
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'lyricsim config init' to create it.");
        }
    }

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure lyricsim.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
