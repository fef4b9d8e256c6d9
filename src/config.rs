//! Runtime settings.
//!
//! Defaults come from [`Settings::default`], an optional TOML file (cargo feature
//! `config`) overrides them, and command-line flags override both.

use crate::error::{Result, TickloopError};
use crate::input::QuitKey;
use crate::render::protocol::Scene;
use std::time::Duration;

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 100;
pub const DEFAULT_QUIT_KEY: char = 'q';

/// Settings for one application run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct Settings {
    pub refresh_interval_ms: u64,
    pub quit_key: char,
    pub scene: Scene,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            quit_key: DEFAULT_QUIT_KEY,
            scene: Scene::default(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the current setting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub refresh_interval_ms: Option<u64>,
    pub quit_key: Option<char>,
    pub scene: Option<Scene>,
}

impl Settings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn quit_key(&self) -> QuitKey {
        QuitKey::char(self.quit_key)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(ms) = overrides.refresh_interval_ms {
            self.refresh_interval_ms = ms;
        }
        if let Some(key) = overrides.quit_key {
            self.quit_key = key;
        }
        if let Some(scene) = overrides.scene {
            self.scene = scene;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_ms == 0 {
            return Err(TickloopError::invalid_argument(
                "refresh interval must be at least 1ms",
            ));
        }
        if self.quit_key.is_control() || self.quit_key.is_whitespace() {
            return Err(TickloopError::invalid_argument(format!(
                "quit key {:?} is not a printable character",
                self.quit_key
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| TickloopError::config(err.to_string()))
    }

    /// Load settings from an explicit file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            TickloopError::config(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::from_toml_str(&contents)
    }

    /// `<config_dir>/tickloop/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tickloop").join("config.toml"))
    }

    /// Load the default file if present, else fall back to defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("loading settings from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.refresh_interval(), Duration::from_millis(100));
        assert_eq!(settings.quit_key, 'q');
        assert_eq!(settings.scene, Scene::Counter);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let settings = Settings::default().apply(Overrides {
            refresh_interval_ms: Some(250),
            quit_key: None,
            scene: Some(Scene::Greeting),
        });
        assert_eq!(settings.refresh_interval_ms, 250);
        assert_eq!(settings.quit_key, 'q');
        assert_eq!(settings.scene, Scene::Greeting);
    }

    #[test]
    fn validate_rejects_zero_interval_and_control_keys() {
        let zero = Settings {
            refresh_interval_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(TickloopError::InvalidArgument { .. })
        ));

        let tab = Settings {
            quit_key: '\t',
            ..Settings::default()
        };
        assert!(tab.validate().is_err());
    }

    #[cfg(feature = "config")]
    mod file {
        use super::*;
        use std::io::Write;

        #[test]
        fn parses_partial_toml() {
            let settings = Settings::from_toml_str("refresh_interval_ms = 50\nscene = \"hello\"\n")
                .unwrap();
            assert_eq!(settings.refresh_interval_ms, 50);
            assert_eq!(settings.scene, Scene::Greeting);
            assert_eq!(settings.quit_key, 'q');
        }

        #[test]
        fn rejects_unknown_fields() {
            let result = Settings::from_toml_str("colour = \"red\"\n");
            assert!(matches!(result, Err(TickloopError::ConfigError { .. })));
        }

        #[test]
        fn loads_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "quit_key = \"x\"").unwrap();
            let settings = Settings::load(file.path()).unwrap();
            assert_eq!(settings.quit_key, 'x');
        }

        #[test]
        fn missing_explicit_file_is_config_error() {
            let dir = tempfile::tempdir().unwrap();
            let result = Settings::load(&dir.path().join("absent.toml"));
            assert!(matches!(result, Err(TickloopError::ConfigError { .. })));
        }
    }
}
