//! Label sets and output defaults, persisted as TOML.

use anyhow::{Context, Result};
use semscope_protocol::RelationLabels;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSettings,

    /// The five label sets driving extraction
    #[serde(default)]
    pub labels: RelationLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Read enhanced dependencies as well as basic ones
    #[serde(default)]
    pub enhanced: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[i] predicate ( role:label: term )` lines
    #[default]
    Text,
    /// Text with character spans
    Full,
    /// `predicate(s=term)` forms
    Short,
    Json,
}

impl Config {
    /// `~/.semscope/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not find home directory")?;
        Ok(home.join(".semscope").join("config.toml"))
    }

    /// Load from `path`, or the defaults if there is no file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;

        for (label, class) in config.labels.overlapping() {
            warn!(%label, ?class, "label appears in several label sets");
        }
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).context("serializing config")?;
        fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Delete the file so the defaults apply again. False if there was none.
    pub fn remove(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path).with_context(|| format!("removing {}", path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semscope_protocol::LabelClass;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.labels.subject.contains("nsubj"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.labels = config.labels.with(LabelClass::SUBJECT, &["nsubj", "nsubj:xsubj"]);
        config.output.format = OutputFormat::Short;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);

        assert!(Config::remove(&path).unwrap());
        assert!(!Config::remove(&path).unwrap());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[labels]\nobject = [\"obj\"]\n").unwrap();

        // Unlisted sets keep their defaults
        let config = Config::load(&path).unwrap();
        assert_eq!(config.labels.object.len(), 1);
        assert_eq!(config.labels.subject, RelationLabels::default().subject);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[labels]\nobject = 3\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
