//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vista_lod::{DebugFlags, GracePolicy, LodSettings};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// LOD selection settings.
    pub lod: LodSettings,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Headless demo scene settings.
    pub demo: DemoConfig,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw LOD distance spheres.
    pub show_gizmos: bool,
    /// Draw the current level and distance next to each object.
    pub show_debug_text: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

/// Demo scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of LOD objects placed along the X axis.
    pub object_count: u32,
    /// Spacing between neighbouring objects.
    pub spacing: f32,
    /// Frames to simulate.
    pub ticks: u32,
    /// Viewpoint speed in units per second.
    pub viewpoint_speed: f32,
    /// Frames (1-based) during which no viewpoint exists.
    pub blackout_ticks: Vec<u32>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_gizmos: true,
            show_debug_text: true,
            log_level: "info".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            object_count: 16,
            spacing: 25.0,
            ticks: 240,
            viewpoint_speed: 120.0,
            blackout_ticks: Vec::new(),
        }
    }
}

impl DebugConfig {
    /// Overlay flags applied to every LOD object.
    pub fn flags(&self) -> DebugFlags {
        DebugFlags {
            show_gizmos: self.show_gizmos,
            show_debug_text: self.show_debug_text,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for this application, if one exists.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vista"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// Only the grace policy and debug flags take effect on objects that are
    /// already registered; distance-model changes need re-registration.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Check that LOD settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fov = self.lod.model.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::InvalidValue {
                field: "lod.model.fov_degrees",
                reason: format!("{fov} is outside (0, 180)"),
            });
        }
        if self.lod.max_levels == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lod.max_levels",
                reason: "at least one level is required".to_string(),
            });
        }
        if let GracePolicy::Multiplier(factor) = self.lod.grace
            && !(factor >= 1.0 && factor.is_finite())
        {
            return Err(ConfigError::InvalidValue {
                field: "lod.grace",
                reason: format!("multiplier {factor} must be a finite value of at least 1"),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_lod::ThresholdValidation;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap();
        assert!(ron_str.contains("fov_degrees: 60.0"));
        assert!(ron_str.contains("max_levels: 5"));
        assert!(ron_str.contains("grace: Disabled"));
    }

    /// Both the written name and the variant name load as no grace.
    #[test]
    fn test_disabled_grace_from_ron() {
        let ron_str = ron::to_string(&Config::default()).unwrap();
        assert!(!ron_str.contains("r#"));

        let config: Config = ron::from_str("(lod: (grace: Disabled))").unwrap();
        assert_eq!(config.lod.grace, GracePolicy::None);
        let config: Config = ron::from_str("(lod: (grace: None))").unwrap();
        assert_eq!(config.lod.grace, GracePolicy::None);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.lod.grace = GracePolicy::Multiplier(1.5);
        config.lod.validation = ThresholdValidation::Reject;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_grace_policy_from_ron() {
        let config: Config = ron::from_str("(lod: (grace: Multiplier(1.5)))").unwrap();
        assert_eq!(config.lod.grace, GracePolicy::Multiplier(1.5));
        assert_eq!(config.lod.max_levels, 5);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(lod: ())").unwrap();
        assert_eq!(config.debug, DebugConfig::default());
        assert_eq!(config.demo, DemoConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.lod.model.fov_degrees = 75.0;
        config.debug.show_gizmos = false;
        config.demo.blackout_ticks = vec![3, 4];

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.lod.grace = GracePolicy::Multiplier(2.0);
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().lod.grace, GracePolicy::Multiplier(2.0));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fov() {
        let mut config = Config::default();
        config.lod.model.fov_degrees = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "lod.model.fov_degrees", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_shrinking_grace() {
        let mut config = Config::default();
        config.lod.grace = GracePolicy::Multiplier(0.5);
        assert!(config.validate().is_err());
        config.lod.grace = GracePolicy::Multiplier(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(lod: (max_levels: 0))").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_debug_flags_follow_config() {
        let mut config = Config::default();
        config.debug.show_debug_text = false;
        let flags = config.debug.flags();
        assert!(flags.show_gizmos);
        assert!(!flags.show_debug_text);
    }
}
