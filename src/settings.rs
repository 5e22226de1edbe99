// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use dirs_next::config_dir;
use hullcheck_engine::GjkConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneSettings {
    /// Peak displacement of each cube along x.
    pub amplitude: f32,
    /// Angular frequency in radians per millisecond.
    pub frequency: f64,
    pub cube_size: f32,
    pub frame_count: u32,
    pub frame_interval_ms: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            amplitude: 2.0,
            frequency: 0.005,
            cube_size: 1.0,
            frame_count: 600,
            frame_interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneSettings,
    pub gjk: GjkConfig,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization/Deserialization Error: {0}")]
    Serde(#[from] toml::de::Error),

    #[error("Serialization Error: {0}")]
    SerdeSer(#[from] toml::ser::Error),

    #[error("Configuration Directory Not Found")]
    ConfigDirNotFound,
}

impl Settings {
    fn settings_dir() -> Result<PathBuf, SettingsError> {
        let config_dir = config_dir().ok_or(SettingsError::ConfigDirNotFound)?;
        Ok(config_dir.join("hullcheck").join("settings"))
    }

    fn user_settings_path() -> Result<PathBuf, SettingsError> {
        Ok(Settings::settings_dir()?.join("user_settings.toml"))
    }

    fn default_settings_path() -> Result<PathBuf, SettingsError> {
        Ok(Settings::settings_dir()?.join("default_settings.toml"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Creates the parent directory when missing.
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Loads user settings, falling back to the default file and then to built-in values.
    /// Never fails: any error is logged and the built-in values are used.
    pub fn load_user_settings() -> Settings {
        match Settings::initialize_settings() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Error initializing settings: {}", e);
                Settings::default()
            }
        }
    }

    fn initialize_settings() -> Result<Self, SettingsError> {
        let user_settings_path = Settings::user_settings_path()?;
        let default_settings_path = Settings::default_settings_path()?;

        if user_settings_path.exists() {
            match Settings::load_from_file(&user_settings_path) {
                Ok(settings) => Ok(settings),
                Err(e) => {
                    log::warn!(
                        "Failed to load user settings: {}. Attempting to load defaults.",
                        e
                    );
                    Settings::load_defaults(user_settings_path, default_settings_path)
                }
            }
        } else {
            log::info!("User settings not found. Loading default settings.");
            Settings::load_defaults(user_settings_path, default_settings_path)
        }
    }

    /// Loads the default file (or built-in values) and saves the result as user settings.
    fn load_defaults(user_path: PathBuf, default_path: PathBuf) -> Result<Self, SettingsError> {
        if default_path.exists() {
            let settings = Settings::load_from_file(&default_path)?;
            settings.save_to_file(&user_path)?;
            log::info!("Default settings loaded and saved as user settings.");
            Ok(settings)
        } else {
            log::warn!("Default settings file not found. Using built-in defaults.");
            let settings = Settings::default();
            settings.save_to_file(&default_path)?;
            settings.save_to_file(&user_path)?;
            Ok(settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    /// Points HOME and XDG_CONFIG_HOME at `dir` for the duration of the test and restores them
    /// on drop.
    struct ConfigDirGuard {
        original_home: Option<String>,
        original_xdg_config_home: Option<String>,
    }

    impl ConfigDirGuard {
        fn redirect_to(dir: &Path) -> Self {
            let guard = Self {
                original_home: env::var("HOME").ok(),
                original_xdg_config_home: env::var("XDG_CONFIG_HOME").ok(),
            };
            // SAFETY: every test touching the environment is #[serial].
            unsafe {
                env::set_var("HOME", dir);
                env::set_var("XDG_CONFIG_HOME", dir);
            }
            guard
        }
    }

    impl Drop for ConfigDirGuard {
        fn drop(&mut self) {
            // SAFETY: see `redirect_to`.
            unsafe {
                match &self.original_home {
                    Some(val) => env::set_var("HOME", val),
                    None => env::remove_var("HOME"),
                }
                match &self.original_xdg_config_home {
                    Some(val) => env::set_var("XDG_CONFIG_HOME", val),
                    None => env::remove_var("XDG_CONFIG_HOME"),
                }
            }
        }
    }

    const CUSTOM_SETTINGS: &str = r#"
        [scene]
        amplitude = 3.5
        frequency = 0.01
        cube_size = 2.0
        frame_count = 10
        frame_interval_ms = 33

        [gjk]
        max_iterations = 16
        initial_direction = [0.0, 1.0, 0.0]
    "#;

    #[test]
    #[serial]
    fn test_settings_paths_live_under_config_dir() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let _guard = ConfigDirGuard::redirect_to(temp_dir.path());

        let expected = temp_dir.path().join("hullcheck").join("settings");
        assert_eq!(
            Settings::user_settings_path().unwrap(),
            expected.join("user_settings.toml")
        );
        assert_eq!(
            Settings::default_settings_path().unwrap(),
            expected.join("default_settings.toml")
        );
    }

    #[test]
    fn test_load_from_valid_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, CUSTOM_SETTINGS).unwrap();

        let settings = Settings::load_from_file(&path).unwrap();

        assert_eq!(settings.scene.amplitude, 3.5);
        assert_eq!(settings.scene.frequency, 0.01);
        assert_eq!(settings.scene.cube_size, 2.0);
        assert_eq!(settings.scene.frame_count, 10);
        assert_eq!(settings.scene.frame_interval_ms, 33);
        assert_eq!(settings.gjk.max_iterations, 16);
        assert_eq!(settings.gjk.initial_direction, Vec3::Y);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("partial.toml");
        fs::write(&path, "[scene]\namplitude = 1.25\n").unwrap();

        let settings = Settings::load_from_file(&path).unwrap();

        assert_eq!(settings.scene.amplitude, 1.25);
        assert_eq!(settings.scene.frame_count, SceneSettings::default().frame_count);
        assert_eq!(settings.gjk, GjkConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_a_serde_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[scene\namplitude = ").unwrap();

        let result = Settings::load_from_file(&path);
        assert!(matches!(result, Err(SettingsError::Serde(_))));
    }

    #[test]
    fn test_save_then_load_preserves_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("settings.toml");

        let mut settings = Settings::default();
        settings.scene.frame_count = 42;
        settings.gjk.max_iterations = 32;
        settings.save_to_file(&path).unwrap();

        assert_eq!(Settings::load_from_file(&path).unwrap(), settings);
    }

    #[test]
    #[serial]
    fn test_first_run_writes_builtin_defaults() {
        let temp_dir = tempdir().unwrap();
        let _guard = ConfigDirGuard::redirect_to(temp_dir.path());

        let settings = Settings::initialize_settings().unwrap();

        assert_eq!(settings, Settings::default());
        assert!(Settings::user_settings_path().unwrap().exists());
        assert!(Settings::default_settings_path().unwrap().exists());
    }

    #[test]
    #[serial]
    fn test_missing_user_settings_copies_default_file() {
        let temp_dir = tempdir().unwrap();
        let _guard = ConfigDirGuard::redirect_to(temp_dir.path());

        let default_path = Settings::default_settings_path().unwrap();
        fs::create_dir_all(default_path.parent().unwrap()).unwrap();
        fs::write(&default_path, CUSTOM_SETTINGS).unwrap();

        let settings = Settings::initialize_settings().unwrap();

        assert_eq!(settings.scene.amplitude, 3.5);
        let user_copy = Settings::load_from_file(&Settings::user_settings_path().unwrap()).unwrap();
        assert_eq!(user_copy, settings);
    }

    #[test]
    #[serial]
    fn test_corrupt_user_settings_fall_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let _guard = ConfigDirGuard::redirect_to(temp_dir.path());

        let user_path = Settings::user_settings_path().unwrap();
        fs::create_dir_all(user_path.parent().unwrap()).unwrap();
        fs::write(&user_path, "not = [valid").unwrap();

        let settings = Settings::load_user_settings();

        assert_eq!(settings, Settings::default());
        // The corrupt file is replaced with loadable defaults.
        assert_eq!(Settings::load_from_file(&user_path).unwrap(), Settings::default());
    }
}
