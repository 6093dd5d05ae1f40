//! Configuration loading and photo resolution

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ranking::{DEFAULT_MIN_REVIEWS, DEFAULT_TOP_LIMIT};

/// Default staff document path, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "staff_data.json";

/// Default staff photos directory
pub const DEFAULT_PHOTOS_DIR: &str = "staff_photos";

/// Resolved bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Path of the persisted staff document
    pub data_file: PathBuf,

    /// Directory holding staff photos
    pub photos_dir: PathBuf,

    /// Minimum review count for leaderboard inclusion
    pub min_reviews: usize,

    /// Leaderboard length cap
    pub top_limit: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            photos_dir: PathBuf::from(DEFAULT_PHOTOS_DIR),
            min_reviews: DEFAULT_MIN_REVIEWS,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}

/// Values supplied on the command line or via environment variables
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub photos_dir: Option<PathBuf>,
    pub min_reviews: Option<usize>,
    pub top_limit: Option<usize>,
}

/// Optional TOML config file contents
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_file: Option<PathBuf>,
    photos_dir: Option<PathBuf>,
    min_reviews: Option<usize>,
    top_limit: Option<usize>,
}

impl BotConfig {
    /// Resolve configuration following the priority order:
    /// 1. Command-line argument / environment variable (highest priority)
    /// 2. TOML config file (explicit path, else `./foros.toml`, else the
    ///    platform config directory)
    /// 3. Compiled default (fallback)
    pub fn resolve(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let file = load_config_file(config_path)?;
        let defaults = BotConfig::default();

        Ok(BotConfig {
            data_file: overrides
                .data_file
                .or(file.data_file)
                .unwrap_or(defaults.data_file),
            photos_dir: overrides
                .photos_dir
                .or(file.photos_dir)
                .unwrap_or(defaults.photos_dir),
            min_reviews: overrides
                .min_reviews
                .or(file.min_reviews)
                .unwrap_or(defaults.min_reviews),
            top_limit: overrides
                .top_limit
                .or(file.top_limit)
                .unwrap_or(defaults.top_limit),
        })
    }
}

fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(ConfigFile::default()),
        },
    };

    let raw = std::fs::read_to_string(&path)?;
    toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Default config file location: `./foros.toml`, then the user config dir
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("foros.toml");
    if local.exists() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("foros").join("config.toml");
    user.exists().then_some(user)
}

/// Resolve a staff photo filename against the photos directory.
///
/// An absent filename or a file that does not exist both mean "no photo".
pub fn resolve_photo(photos_dir: &Path, photo: Option<&str>) -> Option<PathBuf> {
    let path = photos_dir.join(photo?);
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file_or_overrides() {
        let config = BotConfig::resolve(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.photos_dir, PathBuf::from(DEFAULT_PHOTOS_DIR));
        assert_eq!(config.min_reviews, DEFAULT_MIN_REVIEWS);
        assert_eq!(config.top_limit, DEFAULT_TOP_LIMIT);
    }

    #[test]
    fn overrides_beat_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foros.toml");
        std::fs::write(&path, "min_reviews = 5\ntop_limit = 20\n").unwrap();

        let overrides = ConfigOverrides {
            min_reviews: Some(2),
            ..Default::default()
        };
        let config = BotConfig::resolve(Some(&path), overrides).unwrap();

        assert_eq!(config.min_reviews, 2);
        assert_eq!(config.top_limit, 20);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(
            BotConfig::resolve(Some(&missing), ConfigOverrides::default()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn photo_resolution_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("anna.jpg"), b"jpeg").unwrap();

        assert!(resolve_photo(dir.path(), Some("anna.jpg")).is_some());
        assert!(resolve_photo(dir.path(), Some("boris.jpg")).is_none());
        assert!(resolve_photo(dir.path(), None).is_none());
    }
}
