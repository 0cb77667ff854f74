use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::foundation::core::SurfaceId;
use crate::foundation::error::{EngineError, EngineResult};

/// Width every scene's layout arithmetic is authored against.
pub const REFERENCE_WIDTH: f64 = 860.0;
/// Backing-store pixels per logical pixel.
pub const DEVICE_PIXEL_RATIO: u32 = 2;
/// Quiescence window before a resize burst is applied.
pub const RESIZE_DEBOUNCE_MS: u64 = 200;
/// Scheduler ticks per revealed typewriter character.
pub const TYPEWRITER_EVERY_TICKS: u32 = 3;

/// The twelve diagram surfaces and their pre-layout heights.
pub const DEFAULT_SURFACES: [(&str, u32); 12] = [
    ("c1", 200),
    ("c2", 180),
    ("c3", 200),
    ("c4", 200),
    ("c5", 250),
    ("c6", 240),
    ("c7", 220),
    ("c8", 340),
    ("c9", 200),
    ("c10", 220),
    ("c11", 360),
    ("c12", 220),
];

/// One known drawing surface.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfaceSpec {
    /// Surface identifier.
    pub id: SurfaceId,
    /// Logical height used until the container reports a measured one.
    pub fallback_height: u32,
}

/// Engine configuration, loadable from JSON. Missing fields take the defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Reference width scenes are authored against.
    pub reference_width: f64,
    /// Fixed device pixel ratio.
    pub device_pixel_ratio: u32,
    /// Resize debounce window in milliseconds.
    pub resize_debounce_ms: u64,
    /// Scheduler ticks per typewriter character.
    pub typewriter_every_ticks: u32,
    /// Known surfaces, in registration order.
    pub surfaces: Vec<SurfaceSpec>,
    /// Background for exported frames (straight RGBA8); transparent when unset.
    pub clear_rgba: Option<[u8; 4]>,
    /// Font file used by the raster backend for labels.
    pub font_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_width: REFERENCE_WIDTH,
            device_pixel_ratio: DEVICE_PIXEL_RATIO,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            typewriter_every_ticks: TYPEWRITER_EVERY_TICKS,
            surfaces: DEFAULT_SURFACES
                .iter()
                .map(|&(id, fallback_height)| SurfaceSpec {
                    id: SurfaceId::from(id),
                    fallback_height,
                })
                .collect(),
            clear_rgba: None,
            font_path: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate JSON text.
    pub fn from_json_str(s: &str) -> EngineResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| EngineError::config(format!("invalid json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Check invariants the engine relies on.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.reference_width.is_finite() || self.reference_width <= 0.0 {
            return Err(EngineError::validation(
                "reference_width must be finite and > 0",
            ));
        }
        if self.device_pixel_ratio == 0 {
            return Err(EngineError::validation("device_pixel_ratio must be > 0"));
        }
        if self.typewriter_every_ticks == 0 {
            return Err(EngineError::validation("typewriter_every_ticks must be > 0"));
        }
        let mut seen = BTreeSet::new();
        for s in &self.surfaces {
            if s.id.as_str().trim().is_empty() {
                return Err(EngineError::validation("surface id must be non-empty"));
            }
            if s.fallback_height == 0 {
                return Err(EngineError::validation(format!(
                    "surface '{}' fallback_height must be > 0",
                    s.id
                )));
            }
            if !seen.insert(&s.id) {
                return Err(EngineError::validation(format!(
                    "duplicate surface id '{}'",
                    s.id
                )));
            }
        }
        Ok(())
    }

    /// Debounce window as a duration.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Configured fallback height for `id`.
    pub fn fallback_height(&self, id: &SurfaceId) -> Option<u32> {
        self.surfaces
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.fallback_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_constants() {
        let cfg = EngineConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.reference_width, 860.0);
        assert_eq!(cfg.device_pixel_ratio, 2);
        assert_eq!(cfg.resize_debounce(), Duration::from_millis(200));
        assert_eq!(cfg.surfaces.len(), 12);
        assert_eq!(cfg.fallback_height(&SurfaceId::from("c8")), Some(340));
        assert_eq!(cfg.fallback_height(&SurfaceId::from("c99")), None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{ "reference_width": 640 }"#).unwrap();
        assert_eq!(cfg.reference_width, 640.0);
        assert_eq!(cfg.surfaces.len(), 12);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{ "surfaces": [
            { "id": "a", "fallback_height": 10 },
            { "id": "a", "fallback_height": 20 }
        ] }"#;
        let err = EngineConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("duplicate surface id"));
    }

    #[test]
    fn rejects_bad_constants() {
        for json in [
            r#"{ "reference_width": 0 }"#,
            r#"{ "device_pixel_ratio": 0 }"#,
            r#"{ "typewriter_every_ticks": 0 }"#,
            r#"{ "surfaces": [ { "id": "a", "fallback_height": 0 } ] }"#,
            r#"{ "surfaces": [ { "id": " ", "fallback_height": 5 } ] }"#,
        ] {
            assert!(EngineConfig::from_json_str(json).is_err(), "{json}");
        }
    }

    #[test]
    fn unknown_fields_are_config_errors() {
        let err = EngineConfig::from_json_str(r#"{ "fps": 60 }"#).unwrap_err();
        assert!(err.to_string().contains("config error:"));
    }
}
