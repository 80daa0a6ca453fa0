//! Runtime configuration for the overlay tool.

use crate::palette::default_palette;
use crate::scene::DEFAULT_POINT_MARKER;
use crate::types::{reference_levels, Color, ConfidenceLevel};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub scene_json: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Data-point file: one `x y` pair per line.
    pub points: PathBuf,
    /// Cluster file: one `x y width height angle` row per line.
    pub clusters: PathBuf,
    /// Plot bounds as `[xmin, xmax, ymin, ymax]`, passed through to the
    /// renderer.
    #[serde(default)]
    pub axis: Option<[f32; 4]>,
    /// Marker hint for the raw data points, passed through to the renderer.
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "reference_levels_vec")]
    pub levels: Vec<ConfidenceLevel>,
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    /// Seed for randomized color picking; omit for deterministic cycling.
    #[serde(default)]
    pub color_seed: Option<u64>,
    #[serde(default)]
    pub output: OutputConfig,
}

fn reference_levels_vec() -> Vec<ConfidenceLevel> {
    reference_levels().to_vec()
}

fn default_marker() -> String {
    DEFAULT_POINT_MARKER.to_string()
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, String> {
    let config: RuntimeConfig = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &RuntimeConfig) -> Result<(), String> {
    if config.levels.is_empty() {
        return Err("levels must not be empty".to_string());
    }
    for level in &config.levels {
        if !(level.k > 0.0 && level.k.is_finite()) {
            return Err(format!(
                "confidence scale k must be a positive finite number, got {}",
                level.k
            ));
        }
        if !(0.0..=1.0).contains(&level.alpha) {
            return Err(format!("alpha must lie in [0, 1], got {}", level.alpha));
        }
    }
    if config.palette.is_empty() {
        return Err("palette must not be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config =
            parse_config(r#"{ "points": "input.dat", "clusters": "result.dat" }"#).unwrap();
        assert_eq!(config.levels, reference_levels().to_vec());
        assert_eq!(config.palette, default_palette());
        assert_eq!(config.axis, None);
        assert_eq!(config.marker, DEFAULT_POINT_MARKER);
        assert_eq!(config.color_seed, None);
        assert!(config.output.scene_json.is_none());
    }

    #[test]
    fn full_config_round_trips() {
        let config = parse_config(
            r#"{
                "points": "inputMouse.dat",
                "clusters": "resultMouse.dat",
                "axis": [0.0, 1.0, 0.1, 0.9],
                "marker": "b.",
                "levels": [{ "k": 1.388, "alpha": 0.8 }],
                "palette": ["gold", "peru"],
                "color_seed": 42,
                "output": { "scene_json": "scene.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.axis, Some([0.0, 1.0, 0.1, 0.9]));
        assert_eq!(config.marker, "b.");
        assert_eq!(config.levels.len(), 1);
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.color_seed, Some(42));
    }

    #[test]
    fn rejects_bad_levels() {
        let bad_k = r#"{ "points": "p", "clusters": "c", "levels": [{ "k": 0.0, "alpha": 0.5 }] }"#;
        assert!(parse_config(bad_k).is_err());
        let bad_alpha =
            r#"{ "points": "p", "clusters": "c", "levels": [{ "k": 1.0, "alpha": 1.5 }] }"#;
        assert!(parse_config(bad_alpha).is_err());
        let empty = r#"{ "points": "p", "clusters": "c", "levels": [] }"#;
        assert!(parse_config(empty).is_err());
    }

    #[test]
    fn rejects_empty_palette() {
        let config = r#"{ "points": "p", "clusters": "c", "palette": [] }"#;
        assert!(parse_config(config).is_err());
    }
}
