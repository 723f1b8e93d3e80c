use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrideConfig {
    pub data: DataConfig,
    pub energy: EnergyConfig,
    pub rewards: RewardConfig,
}

impl StrideConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: StrideConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("STRIDE_DATA_DIR") {
            self.data.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("STRIDE_XP_PER_PLAN") {
            if let Ok(n) = v.parse() {
                self.rewards.xp_per_plan = n;
            }
        }
        if let Ok(v) = std::env::var("STRIDE_XP_PER_COMPLETION") {
            if let Ok(n) = v.parse() {
                self.rewards.xp_per_completion = n;
            }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the persisted ledger and gamification files.
    pub data_dir: PathBuf,
    pub history_file: String,
    pub gamification_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            history_file: "task_history.json".to_string(),
            gamification_file: "gamification_data.json".to_string(),
        }
    }
}

impl DataConfig {
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }

    pub fn gamification_path(&self) -> PathBuf {
        self.data_dir.join(&self.gamification_file)
    }
}

/// Peak/slump windows as half-open hour intervals `[start, end)`, local time.
/// Listed order matters: the first matching window wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub peak_hours: Vec<(u32, u32)>,
    pub slump_hours: Vec<(u32, u32)>,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        // High energy in the morning (9-12) and evening (18-20), dip after lunch (14-16).
        Self {
            peak_hours: vec![(9, 12), (18, 20)],
            slump_hours: vec![(14, 16)],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// XP awarded when a plan is generated.
    pub xp_per_plan: i64,
    /// XP awarded when a plan is marked completed.
    pub xp_per_completion: i64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            xp_per_plan: 10,
            xp_per_completion: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = StrideConfig::default();
        assert_eq!(cfg.energy.peak_hours, vec![(9, 12), (18, 20)]);
        assert_eq!(cfg.energy.slump_hours, vec![(14, 16)]);
        assert_eq!(cfg.rewards.xp_per_plan, 10);
        assert_eq!(cfg.data.history_path(), PathBuf::from("./task_history.json"));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: StrideConfig = toml::from_str(
            r#"
            [energy]
            peak_hours = [[8, 11]]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.energy.peak_hours, vec![(8, 11)]);
        // Unspecified sections keep their defaults
        assert_eq!(cfg.energy.slump_hours, vec![(14, 16)]);
        assert_eq!(cfg.rewards.xp_per_completion, 25);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let cfg = StrideConfig::load_or_default("/nonexistent/stride.toml");
        assert_eq!(cfg.energy.peak_hours, vec![(9, 12), (18, 20)]);
    }
}
