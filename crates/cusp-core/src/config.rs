//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `CUSP_POSE_TABLE`, `CUSP_LOG`
//! 2. Project-local: `.cusp/config.toml`
//! 3. Global: `~/.cusp/config.toml`

use crate::error::{CuspError, Result};
use crate::id::ToothId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Modifier key that turns a planar drag into a rotation about local Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Shift,
    Ctrl,
    Alt,
}

/// Drag "feel" parameters. These are tuning constants, not derived from the
/// camera projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Scene units of local translation per unit of NDC pointer travel.
    #[serde(default = "default_translate_sensitivity")]
    pub translate_sensitivity: f64,
    /// Radians of rotation about local Z per unit of horizontal NDC travel.
    #[serde(default = "default_rotate_sensitivity")]
    pub rotate_sensitivity: f64,
    #[serde(default)]
    pub rotate_modifier: ModifierKey,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            translate_sensitivity: default_translate_sensitivity(),
            rotate_sensitivity: default_rotate_sensitivity(),
            rotate_modifier: ModifierKey::default(),
        }
    }
}

fn default_translate_sensitivity() -> f64 {
    20.0
}
fn default_rotate_sensitivity() -> f64 {
    std::f64::consts::PI
}

/// One config file. Every field is optional so layers merge field by field.
#[derive(Debug, Clone, Default, Deserialize)]
struct CuspConfigFile {
    #[serde(default)]
    pose_table: Option<String>,
    #[serde(default)]
    model_pattern: Option<String>,
    #[serde(default)]
    teeth: Option<Vec<String>>,
    #[serde(default)]
    log_filter: Option<String>,
    #[serde(default)]
    interaction: InteractionLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct InteractionLayer {
    #[serde(default)]
    translate_sensitivity: Option<f64>,
    #[serde(default)]
    rotate_sensitivity: Option<f64>,
    #[serde(default)]
    rotate_modifier: Option<ModifierKey>,
}

/// Resolved configuration with all layers applied
#[derive(Debug, Clone, PartialEq)]
pub struct CuspConfig {
    /// Path or `http(s)://` URL of the pose table.
    pub pose_table: String,
    /// Asset path pattern; `{id}` is replaced by the tooth id.
    pub model_pattern: String,
    pub teeth: Vec<ToothId>,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub interaction: InteractionConfig,
}

impl Default for CuspConfig {
    fn default() -> Self {
        Self {
            pose_table: "CoordStep0.txt".to_string(),
            model_pattern: "models/tooth_{id}.glb".to_string(),
            teeth: ToothId::fdi_permanent(),
            log_filter: "info".to_string(),
            interaction: InteractionConfig::default(),
        }
    }
}

impl CuspConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = CuspConfig::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        let local_path = PathBuf::from(".cusp/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            config.merge(local);
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = CuspConfig::default();
        config.merge(Self::load_file(path)?);
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Asset path for a tooth's geometry.
    pub fn model_path(&self, id: &ToothId) -> String {
        self.model_pattern.replace("{id}", id.as_str())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".cusp").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<CuspConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CuspError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge(&mut self, overlay: CuspConfigFile) {
        if let Some(pose_table) = overlay.pose_table {
            self.pose_table = pose_table;
        }
        if let Some(model_pattern) = overlay.model_pattern {
            self.model_pattern = model_pattern;
        }
        if let Some(teeth) = overlay.teeth {
            self.teeth = teeth.into_iter().map(ToothId::from).collect();
        }
        if let Some(log_filter) = overlay.log_filter {
            self.log_filter = log_filter;
        }
        let interaction = overlay.interaction;
        if let Some(s) = interaction.translate_sensitivity {
            self.interaction.translate_sensitivity = s;
        }
        if let Some(s) = interaction.rotate_sensitivity {
            self.interaction.rotate_sensitivity = s;
        }
        if let Some(key) = interaction.rotate_modifier {
            self.interaction.rotate_modifier = key;
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(pose_table) = std::env::var("CUSP_POSE_TABLE") {
            self.pose_table = pose_table;
        }
        if let Ok(filter) = std::env::var("CUSP_LOG") {
            self.log_filter = filter;
        }
    }

    fn validate(&self) -> Result<()> {
        let sensitivities = [
            ("translate_sensitivity", self.interaction.translate_sensitivity),
            ("rotate_sensitivity", self.interaction.rotate_sensitivity),
        ];
        for (name, value) in sensitivities {
            if !value.is_finite() {
                return Err(CuspError::ConfigError(format!(
                    "interaction.{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
