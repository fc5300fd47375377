use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of songs drawn from the dataset.
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

/// Default vocabulary cap for the TF-IDF vectorizer.
pub const DEFAULT_MAX_FEATURES: usize = 5_000;

/// Default number of recommendations returned per query.
pub use lyricsim_core::DEFAULT_TOP_N;

/// Default pattern for the primary word tokenizer.
pub const DEFAULT_TOKEN_PATTERN: &str = "[a-z]+";

/// Configuration for lyricsim.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (LYRICSIM_* prefix)
/// 3. Config file (~/.config/lyricsim/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the lyrics dataset CSV (columns: artist, song, text).
    ///
    /// Can be set via:
    /// - CLI: lyricsim build --dataset /path/to/songs.csv
    /// - ENV: LYRICSIM_DATASET_PATH
    /// - Config: dataset_path = "/path/to/songs.csv"
    pub dataset_path: Option<PathBuf>,

    /// Path to the model artifact written by `build` and read by `recommend`.
    ///
    /// Can be set via:
    /// - CLI: --artifact /path/to/model.lyrsim
    /// - ENV: LYRICSIM_ARTIFACT_PATH
    /// - Config: artifact_path = "/path/to/model.lyrsim"
    /// - Default: ~/.local/share/lyricsim/model.lyrsim
    pub artifact_path: PathBuf,

    /// Number of songs sampled from the dataset. Must be positive.
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub sample_size: usize,

    /// Seed for sampling. Unset means a fresh random sample on every build.
    #[serde(deserialize_with = "number_or_string::option")]
    pub sample_seed: Option<u64>,

    /// Maximum vocabulary size for TF-IDF. Must be positive.
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub max_features: usize,

    /// Regex for the primary word tokenizer.
    pub token_pattern: String,

    /// Optional stopword list (one term per line) replacing the built-in list.
    pub stopwords_path: Option<PathBuf>,

    /// Number of recommendations shown per query. Must be positive.
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub top_n: usize,
}

/// Numeric settings from `LYRICSIM_*` variables arrive as strings.
mod number_or_string {
    use serde::{de, Deserialize, Deserializer};
    use std::fmt::Display;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    impl<T> Raw<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        fn resolve<E: de::Error>(self) -> Result<T, E> {
            match self {
                Self::Number(n) => Ok(n),
                Self::Text(s) => s
                    .trim()
                    .parse()
                    .map_err(|e| E::custom(format!("invalid number {s:?}: {e}"))),
            }
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Raw::<T>::deserialize(deserializer)?.resolve()
    }

    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Option::<Raw<T>>::deserialize(deserializer)?
            .map(Raw::resolve)
            .transpose()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            artifact_path: default_artifact_path(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            sample_seed: None,
            max_features: DEFAULT_MAX_FEATURES,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            stopwords_path: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/lyricsim/config.toml
    /// Reads environment variables with LYRICSIM_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("lyricsim");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would make a build or a query meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first of `sample_size`, `max_features`,
    /// or `top_n` that is zero.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("sample_size", self.sample_size),
            ("max_features", self.max_features),
            ("top_n", self.top_n),
        ] {
            if value == 0 {
                anyhow::bail!("Invalid config: {} must be a positive integer", key);
            }
        }
        Ok(())
    }

    /// Load configuration with a custom artifact path.
    ///
    /// This is used when the --artifact CLI flag is provided.
    pub fn load_with_artifact_path(artifact_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.artifact_path = artifact_path;
        Ok(config)
    }
}

/// Get the default artifact path.
///
/// Returns: ~/.local/share/lyricsim/model.lyrsim (or platform equivalent)
fn default_artifact_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lyricsim")
        .join("model.lyrsim")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/lyricsim/config.toml
/// - macOS: ~/Library/Application Support/lyricsim/config.toml
/// - Windows: %APPDATA%\lyricsim\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lyricsim")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Lyricsim Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (LYRICSIM_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Lyrics dataset in CSV form with a header row.
# Required columns: artist, song, text. Other columns (e.g. link) are ignored.
#
# Can also be set via:
# - CLI: lyricsim build --dataset /path/to/songs.csv
# - Environment: LYRICSIM_DATASET_PATH=/path/to/songs.csv
#dataset_path = "/path/to/spotify_millsongdata.csv"

# Model artifact written by `lyricsim build` and read by `lyricsim recommend`
#
# Default: Platform-specific data directory
#artifact_path = "/path/to/model.lyrsim"

# Number of songs sampled from the dataset (all songs if the dataset is smaller)
sample_size = 10000

# Fix the sampling seed to make builds reproducible
#sample_seed = 42

# Vocabulary cap: keep only the most frequent terms across the corpus
max_features = 5000

# Pattern used by the word tokenizer. If it fails to compile, lyricsim
# falls back to plain whitespace splitting.
token_pattern = "[a-z]+"

# Replace the built-in English stopword list (one term per line)
#stopwords_path = "/path/to/stopwords.txt"

# Number of recommendations shown per query
top_n = 5
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.artifact_path.as_os_str().is_empty());
        assert!(config.dataset_path.is_none());
        assert_eq!(config.sample_size, 10_000);
        assert_eq!(config.max_features, 5_000);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert_eq!(config.token_pattern, "[a-z]+");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_settings() {
        for key in ["sample_size", "max_features", "top_n"] {
            let mut config = Config::default();
            match key {
                "sample_size" => config.sample_size = 0,
                "max_features" => config.max_features = 0,
                _ => config.top_n = 0,
            }
            let err = config.validate().unwrap_err().to_string();
            assert!(err.contains(key), "error {err:?} should name {key}");
        }
    }

    #[test]
    fn test_numeric_settings_accept_strings() {
        let config: Config = toml::from_str(
            "sample_size = \"500\"\nmax_features = \" 250 \"\ntop_n = 3\nsample_seed = \"42\"\n",
        )
        .unwrap();
        assert_eq!(config.sample_size, 500);
        assert_eq!(config.max_features, 250);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.sample_seed, Some(42));
    }

    #[test]
    fn test_numeric_settings_reject_garbage() {
        assert!(toml::from_str::<Config>("top_n = \"five\"").is_err());
        assert!(toml::from_str::<Config>("sample_seed = \"-1\"").is_err());
    }

    #[test]
    fn test_numeric_env_override() {
        std::env::set_var("LYRICSIM_SAMPLE_SIZE", "500");
        let result = Config::load();
        std::env::remove_var("LYRICSIM_SAMPLE_SIZE");
        assert_eq!(result.unwrap().sample_size, 500);
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_artifact_path() {
        let custom_path = PathBuf::from("/tmp/test.lyrsim");
        let config = Config::load_with_artifact_path(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().artifact_path, custom_path);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(config.max_features, DEFAULT_MAX_FEATURES);
        assert_eq!(config.token_pattern, DEFAULT_TOKEN_PATTERN);
        assert!(config.dataset_path.is_none());
    }
}
