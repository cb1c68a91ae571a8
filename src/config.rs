use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GameError;
use crate::words::WordDifficulty;

/// Play area geometry and spawn ranges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Spawn columns `min_x..=max_x` must fit inside this
    pub width: f32,
    /// Enemies past this vertical position have escaped
    pub height: f32,
    pub spawn_y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 640.0,
            spawn_y: -50.0,
            min_x: 50.0,
            max_x: 400.0,
            min_speed: 50.0,
            max_speed: 100.0,
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub lives: u32,
    pub initial_spawn_delay_ms: u64,
    pub min_spawn_delay_ms: u64,
    pub spawn_delay_step_ms: u64,
    pub ramp_interval_ms: u64,
    pub base_points: u64,
    pub combo_bonus: u64,
    pub combo_threshold: u32,
    pub freeze_duration_ms: u64,
    pub spawn_difficulty: WordDifficulty,
    pub field: FieldConfig,
    /// Seed for shuffles and spawn rolls; fresh entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            initial_spawn_delay_ms: 1000,
            min_spawn_delay_ms: 400,
            spawn_delay_step_ms: 50,
            ramp_interval_ms: 10_000,
            base_points: 10,
            combo_bonus: 5,
            combo_threshold: 15,
            freeze_duration_ms: 3000,
            spawn_difficulty: WordDifficulty::Medium,
            field: FieldConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let checks = [
            (self.lives > 0, "lives must be positive"),
            (self.combo_threshold > 0, "combo_threshold must be positive"),
            (self.min_spawn_delay_ms > 0, "min_spawn_delay_ms must be positive"),
            (
                self.initial_spawn_delay_ms >= self.min_spawn_delay_ms,
                "initial_spawn_delay_ms must not be below min_spawn_delay_ms",
            ),
            (self.ramp_interval_ms > 0, "ramp_interval_ms must be positive"),
            (self.freeze_duration_ms > 0, "freeze_duration_ms must be positive"),
            (self.field.min_x <= self.field.max_x, "field.min_x must not exceed field.max_x"),
            (self.field.min_x >= 0.0, "field.min_x must not be negative"),
            (self.field.max_x <= self.field.width, "field.max_x must lie inside field.width"),
            (
                self.field.min_speed <= self.field.max_speed,
                "field.min_speed must not exceed field.max_speed",
            ),
            (self.field.min_speed >= 0.0, "field.min_speed must not be negative"),
            (
                self.field.spawn_y < self.field.height,
                "field.spawn_y must be above the escape boundary",
            ),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(GameError::InvalidConfig(*reason)),
            None => Ok(()),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> Result<(), GameError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "type-rangers") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("type_rangers_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> GameConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<GameConfig>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => log::warn!("ignoring unreadable config {}: {err}", self.path.display()),
            }
        }
        GameConfig::default()
    }

    fn save(&self, cfg: &GameConfig) -> Result<(), GameError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = GameConfig::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = GameConfig {
            lives: 5,
            initial_spawn_delay_ms: 1500,
            combo_threshold: 10,
            spawn_difficulty: WordDifficulty::Long,
            seed: Some(42),
            field: FieldConfig {
                height: 800.0,
                ..FieldConfig::default()
            },
            ..GameConfig::default()
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{ "lives": 1 }"#).unwrap();

        assert_eq!(cfg.lives, 1);
        assert_eq!(cfg.combo_threshold, 15);
        assert_eq!(cfg.field, FieldConfig::default());
    }

    #[test]
    fn unreadable_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"not json").unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), GameConfig::default());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_combo_threshold_is_rejected() {
        let cfg = GameConfig {
            combo_threshold: 0,
            ..GameConfig::default()
        };

        assert_matches!(cfg.validate(), Err(GameError::InvalidConfig(reason)) if reason.contains("combo_threshold"));
    }

    #[test]
    fn spawn_columns_must_fit_the_field() {
        let mut cfg = GameConfig::default();
        cfg.field.max_x = cfg.field.width + 1.0;
        assert_matches!(cfg.validate(), Err(GameError::InvalidConfig(reason)) if reason.contains("field.width"));

        let mut cfg = GameConfig::default();
        cfg.field.min_x = -10.0;
        assert_matches!(cfg.validate(), Err(GameError::InvalidConfig(reason)) if reason.contains("min_x"));

        let mut cfg = GameConfig::default();
        cfg.field.max_x = cfg.field.width;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn initial_delay_below_floor_is_rejected() {
        let cfg = GameConfig {
            initial_spawn_delay_ms: 100,
            min_spawn_delay_ms: 400,
            ..GameConfig::default()
        };

        assert_matches!(cfg.validate(), Err(GameError::InvalidConfig(_)));
    }
}
