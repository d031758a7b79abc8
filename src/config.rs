use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::expression::ExpressionThresholds;
use crate::gesture::GestureThresholds;

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub ui: UiConfig,
    pub thresholds: Thresholds,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub mirror_mode: bool,
    pub show_landmarks: bool,
}

/// Classifier calibration overrides. The defaults are the constants the
/// rules were tuned with; edit config.json to experiment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Thresholds {
    pub expression: ExpressionThresholds,
    pub gesture: GestureThresholds,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub label_scale: usize,
    pub font_size_pt: u32,
    pub font_family: String, // e.g. "Arial", "Terminus"
    pub landmark_dot_size: usize,
    pub mesh_color_hex: String,       // e.g. "#00FF00"
    pub hand_color_hex: String,
    pub expression_color_hex: String,
    pub gesture_color_hex: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            mirror_mode: true,
            show_landmarks: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            label_scale: 6,
            font_size_pt: 32,
            font_family: "Monospace".to_string(),
            landmark_dot_size: 1,
            mesh_color_hex: "#00FF00".to_string(),
            hand_color_hex: "#00FFFF".to_string(),
            expression_color_hex: "#00FF00".to_string(),
            gesture_color_hex: "#FFFF00".to_string(),
        }
    }
}

impl AppConfig {
    const PATH: &'static str = "config.json";

    pub fn load() -> Result<Self> {
        let config = if Path::new(Self::PATH).exists() {
            let content = fs::read_to_string(Self::PATH)?;
            // Missing fields fall back to defaults thanks to #[serde(default)].
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => {
                    println!("Loaded configuration from {}", Self::PATH);
                    c
                }
                Err(e) => {
                    println!("Error parsing config: {}. Loading defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!("Configuration file not found. Creating default at {}", Self::PATH);
            Self::default()
        };

        // Save back so new fields show up in the file.
        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::PATH, content)?;
        Ok(())
    }
}
