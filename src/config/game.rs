use serde::Deserialize;
use std::path::Path;

use crate::catalog::Difficulty;

/// One week. Longer intervals are rejected by `validate`.
pub const MAX_HORDE_INTERVAL_SEC: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_horde_interval_sec")]
    pub horde_interval_sec: u64,
    #[serde(default = "default_battle_duration_ms")]
    pub battle_duration_ms: u64,
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,
    #[serde(default = "default_generator_max_input")]
    pub generator_max_input: u32,
    #[serde(default = "default_generator_wins_to_recharge")]
    pub generator_wins_to_recharge: u32,
    #[serde(default)]
    pub rng_seed: u64,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_status_interval_ticks")]
    pub status_interval_ticks: u64,
}

fn default_tick_rate_ms() -> u64 {
    200
}
fn default_horde_interval_sec() -> u64 {
    300
}
fn default_battle_duration_ms() -> u64 {
    2000
}
fn default_notification_ttl_ms() -> u64 {
    1500
}
fn default_generator_max_input() -> u32 {
    20
}
fn default_generator_wins_to_recharge() -> u32 {
    2
}
fn default_difficulty() -> String {
    "normal".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}
fn default_status_interval_ticks() -> u64 {
    300
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_rate_ms: default_tick_rate_ms(),
            horde_interval_sec: default_horde_interval_sec(),
            battle_duration_ms: default_battle_duration_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
            generator_max_input: default_generator_max_input(),
            generator_wins_to_recharge: default_generator_wins_to_recharge(),
            rng_seed: 0,
            difficulty: default_difficulty(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            status_interval_ticks: default_status_interval_ticks(),
        }
    }
}

impl GameConfig {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content, path)
    }

    /// Load from `path`, or fall back to defaults when the file does not exist.
    pub fn from_file_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(GameConfig::default())
        }
    }

    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self, String> {
        let config: GameConfig =
            toml::from_str(content).map_err(|e| format!("{}: {}", source_path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn horde_interval_ms(&self) -> u64 {
        self.horde_interval_sec.saturating_mul(1000)
    }

    /// The configured difficulty. Only valid after `validate` has passed.
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(&self.difficulty).unwrap_or(Difficulty::Normal)
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.tick_rate_ms == 0 {
            errors.push(format!(
                "tick_rate_ms must be > 0, got {}. Example: tick_rate_ms = 200",
                self.tick_rate_ms
            ));
        }

        if self.horde_interval_sec == 0 {
            errors.push(format!(
                "horde_interval_sec must be > 0, got {}. Example: horde_interval_sec = 300",
                self.horde_interval_sec
            ));
        } else if self.horde_interval_sec > MAX_HORDE_INTERVAL_SEC {
            errors.push(format!(
                "horde_interval_sec must be <= {}, got {}. Example: horde_interval_sec = 300",
                MAX_HORDE_INTERVAL_SEC, self.horde_interval_sec
            ));
        }

        if self.notification_ttl_ms == 0 {
            errors.push(format!(
                "notification_ttl_ms must be > 0, got {}. Example: notification_ttl_ms = 1500",
                self.notification_ttl_ms
            ));
        }

        if self.generator_max_input == 0 {
            errors.push(format!(
                "generator_max_input must be > 0, got {}. Example: generator_max_input = 20",
                self.generator_max_input
            ));
        }

        if self.generator_wins_to_recharge == 0 {
            errors.push(format!(
                "generator_wins_to_recharge must be > 0, got {}. Example: generator_wins_to_recharge = 2",
                self.generator_wins_to_recharge
            ));
        }

        if self.status_interval_ticks == 0 {
            errors.push(format!(
                "status_interval_ticks must be > 0, got {}. Example: status_interval_ticks = 300",
                self.status_interval_ticks
            ));
        }

        if Difficulty::parse(&self.difficulty).is_none() {
            errors.push(format!(
                "difficulty must be one of easy, normal, hard, got '{}'. Example: difficulty = \"normal\"",
                self.difficulty
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "log_level must be one of {:?}, got '{}'. Example: log_level = \"info\"",
                valid_levels, self.log_level
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.log_format.as_str()) {
            errors.push(format!(
                "log_format must be one of {:?}, got '{}'. Example: log_format = \"text\"",
                valid_formats, self.log_format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn test_path() -> PathBuf {
        PathBuf::from("test-farm.toml")
    }

    #[test]
    fn valid_config_loads_all_fields() {
        let toml = r#"
            tick_rate_ms = 100
            horde_interval_sec = 60
            battle_duration_ms = 500
            notification_ttl_ms = 3000
            generator_max_input = 50
            generator_wins_to_recharge = 3
            rng_seed = 1234
            difficulty = "hard"
            log_level = "debug"
            log_format = "json"
            status_interval_ticks = 10
        "#;
        let config = GameConfig::from_toml_str(toml, &test_path()).unwrap();
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.horde_interval_sec, 60);
        assert_eq!(config.horde_interval_ms(), 60_000);
        assert_eq!(config.battle_duration_ms, 500);
        assert_eq!(config.notification_ttl_ms, 3000);
        assert_eq!(config.generator_max_input, 50);
        assert_eq!(config.generator_wins_to_recharge, 3);
        assert_eq!(config.rng_seed, 1234);
        assert_eq!(config.difficulty(), Difficulty::Hard);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.status_interval_ticks, 10);
    }

    #[test]
    fn defaults_applied_for_empty_config() {
        let config = GameConfig::from_toml_str("", &test_path()).unwrap();
        assert_eq!(config.tick_rate_ms, 200);
        assert_eq!(config.horde_interval_sec, 300);
        assert_eq!(config.battle_duration_ms, 2000);
        assert_eq!(config.notification_ttl_ms, 1500);
        assert_eq!(config.generator_max_input, 20);
        assert_eq!(config.generator_wins_to_recharge, 2);
        assert_eq!(config.rng_seed, 0);
        assert_eq!(config.difficulty(), Difficulty::Normal);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn default_impl_matches_empty_toml() {
        let parsed = GameConfig::from_toml_str("", &test_path()).unwrap();
        let default = GameConfig::default();
        assert_eq!(parsed.tick_rate_ms, default.tick_rate_ms);
        assert_eq!(parsed.horde_interval_sec, default.horde_interval_sec);
        assert_eq!(parsed.generator_max_input, default.generator_max_input);
        assert_eq!(parsed.difficulty, default.difficulty);
    }

    #[test]
    fn invalid_tick_rate_rejected() {
        let err = GameConfig::from_toml_str("tick_rate_ms = 0", &test_path()).unwrap_err();
        assert!(err.contains("tick_rate_ms"));
        assert!(err.contains("> 0"));
    }

    #[test]
    fn oversized_horde_interval_rejected() {
        let toml = "horde_interval_sec = 10000000000000000";
        let err = GameConfig::from_toml_str(toml, &test_path()).unwrap_err();
        assert!(err.contains("horde_interval_sec must be <="));
        assert!(err.contains("Example:"));

        let unchecked = GameConfig {
            horde_interval_sec: u64::MAX,
            ..GameConfig::default()
        };
        assert_eq!(unchecked.horde_interval_ms(), u64::MAX);
    }

    #[test]
    fn invalid_difficulty_rejected() {
        let err =
            GameConfig::from_toml_str(r#"difficulty = "nightmare""#, &test_path()).unwrap_err();
        assert!(err.contains("difficulty"));
        assert!(err.contains("nightmare"));
    }

    #[test]
    fn invalid_log_level_rejected() {
        let err = GameConfig::from_toml_str(r#"log_level = "verbose""#, &test_path()).unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn multiple_errors_reported_together() {
        let toml = "tick_rate_ms = 0\nhorde_interval_sec = 0\ngenerator_max_input = 0";
        let err = GameConfig::from_toml_str(toml, &test_path()).unwrap_err();
        assert!(err.contains("tick_rate_ms"));
        assert!(err.contains("horde_interval_sec"));
        assert!(err.contains("generator_max_input"));
    }

    #[test]
    fn malformed_toml_includes_source_path() {
        let err = GameConfig::from_toml_str("tick_rate_ms = [invalid", &test_path()).unwrap_err();
        assert!(err.contains("test-farm.toml"));
    }

    #[test]
    fn from_file_loads_valid_config() {
        let mut tmp = NamedTempFile::new().unwrap();
        use std::io::Write;
        writeln!(tmp, "horde_interval_sec = 30").unwrap();
        let config = GameConfig::from_file(tmp.path()).unwrap();
        assert_eq!(config.horde_interval_sec, 30);
    }

    #[test]
    fn from_file_missing_file_error() {
        let err = GameConfig::from_file(Path::new("/nonexistent/farm.toml")).unwrap_err();
        assert!(err.contains("Cannot read"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::from_file_or_default(Path::new("/nonexistent/farm.toml")).unwrap();
        assert_eq!(config.tick_rate_ms, 200);
    }
}
