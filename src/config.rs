//! Slot configuration
//!
//! Uses RON (Rusty Object Notation) for a human-editable config file.
//! Every section falls back to defaults when omitted, so an empty `()`
//! is a valid config.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use log::{info, warn};

use crate::error::ConfigError;
use crate::reels::{ReelLayout, SpinTiming, SymbolTexture, default_symbol_textures};

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "assets/slots.ron";

/// Validation limits
pub mod limits {
    /// Maximum number of reels
    pub const MAX_REELS: usize = 16;
    /// Maximum symbol slots per reel
    pub const MAX_SYMBOLS_PER_REEL: usize = 16;
    /// Maximum number of symbol textures
    pub const MAX_TEXTURES: usize = 64;
    /// Maximum symbol texture edge (pixels)
    pub const MAX_TEXTURE_SIZE: f32 = 4096.0;
}

/// Window settings for the demo binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "MONSTER SLOTS!".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    pub window: WindowConfig,
    pub layout: ReelLayout,
    pub spin: SpinTiming,
    pub textures: Vec<SymbolTexture>,
    /// Fixed RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            layout: ReelLayout::default(),
            spin: SpinTiming::default(),
            textures: default_symbol_textures(),
            seed: None,
        }
    }
}

fn positive(value: f64, what: &str) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be positive (got {})", what, value))
    }
}

fn non_negative(value: f64, what: &str) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must not be negative (got {})", what, value))
    }
}

impl SlotConfig {
    /// Parse from RON text and validate
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load `path` if it exists, otherwise defaults. A broken file is
    /// reported and replaced by defaults so the demo still starts.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write as pretty RON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .indentor("  ".to_string());
        let text = ron::ser::to_string_pretty(self, config)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, text)?;
        Ok(())
    }

    /// Check ranges that would make the reels misbehave
    pub fn validate(&self) -> Result<(), String> {
        let layout = &self.layout;
        if layout.reel_count == 0 || layout.reel_count > limits::MAX_REELS {
            return Err(format!("reel_count must be 1..={} (got {})", limits::MAX_REELS, layout.reel_count));
        }
        if layout.symbols_per_reel == 0 || layout.symbols_per_reel > limits::MAX_SYMBOLS_PER_REEL {
            return Err(format!("symbols_per_reel must be 1..={} (got {})",
                limits::MAX_SYMBOLS_PER_REEL, layout.symbols_per_reel));
        }
        positive(layout.reel_width as f64, "reel_width")?;
        positive(layout.symbol_size, "symbol_size")?;
        non_negative(layout.blur_per_unit, "blur_per_unit")?;

        let spin = &self.spin;
        non_negative(spin.base_distance, "spin.base_distance")?;
        non_negative(spin.distance_per_reel, "spin.distance_per_reel")?;
        positive(spin.base_duration_ms, "spin.base_duration_ms")?;
        non_negative(spin.duration_per_reel_ms, "spin.duration_per_reel_ms")?;
        non_negative(spin.duration_per_extra_ms, "spin.duration_per_extra_ms")?;
        if let Some(amount) = spin.easing.amount() {
            if !amount.is_finite() {
                return Err(format!("spin.easing amount must be finite (got {})", amount));
            }
        }

        if self.textures.is_empty() {
            return Err("at least one symbol texture is required".to_string());
        }
        if self.textures.len() > limits::MAX_TEXTURES {
            return Err(format!("too many textures ({} > {})", self.textures.len(), limits::MAX_TEXTURES));
        }
        for (i, tex) in self.textures.iter().enumerate() {
            positive(tex.width as f64, &format!("textures[{}].width", i))?;
            positive(tex.height as f64, &format!("textures[{}].height", i))?;
            if tex.width > limits::MAX_TEXTURE_SIZE || tex.height > limits::MAX_TEXTURE_SIZE {
                return Err(format!("textures[{}] is {}x{}, larger than {} px",
                    i, tex.width, tex.height, limits::MAX_TEXTURE_SIZE));
            }
        }

        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(format!("window size must be positive (got {}x{})", self.window.width, self.window.height));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::Easing;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = SlotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.reel_count, 5);
        assert_eq!(config.layout.symbols_per_reel, 4);
        assert_eq!(config.layout.symbol_size, 150.0);
        assert_eq!(config.textures.len(), 4);
    }

    #[test]
    fn test_empty_ron_uses_defaults() {
        let config = SlotConfig::from_ron("()").unwrap();
        assert_eq!(config.layout, ReelLayout::default());
        assert_eq!(config.spin.base_duration_ms, 2500.0);
    }

    #[test]
    fn test_partial_override() {
        let text = r#"(
            layout: (reel_count: 3),
            spin: (extra_range: 0, easing: Linear),
            seed: Some(9),
        )"#;
        let config = SlotConfig::from_ron(text).unwrap();
        assert_eq!(config.layout.reel_count, 3);
        assert_eq!(config.layout.symbol_size, 150.0);
        assert_eq!(config.spin.extra_range, 0);
        assert!(matches!(config.spin.easing, Easing::Linear));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "(layout: (reel_count: 0))",
            "(layout: (symbol_size: -1.0))",
            "(spin: (base_duration_ms: 0.0))",
            "(textures: [])",
            "(window: (width: 0))",
            "(spin: (easing: BackOut(amount: NaN)))",
            r#"(textures: [(name: "huge", path: "", width: 1000000.0, height: 1000000.0)])"#,
        ];
        for text in cases {
            let err = SlotConfig::from_ron(text).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{}", text);
        }
    }

    #[test]
    fn test_rejects_infinite_easing_amount() {
        let mut config = SlotConfig::default();
        config.spin.easing = Easing::BackOut { amount: f64::INFINITY };
        assert!(config.validate().is_err());

        config.spin.easing = Easing::Linear;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = SlotConfig::from_ron("(layout: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("slots.ron");

        let mut config = SlotConfig::default();
        config.layout.reel_count = 4;
        config.spin.easing = Easing::BackOut { amount: 0.8 };
        config.save(&path).unwrap();

        let loaded = SlotConfig::load(&path).unwrap();
        assert_eq!(loaded.layout.reel_count, 4);
        assert_eq!(loaded.textures, config.textures);
        assert!(matches!(loaded.spin.easing, Easing::BackOut { amount } if amount == 0.8));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = SlotConfig::load(&path).unwrap();
        assert_eq!(config.layout, ReelLayout::default());
        assert_eq!(config.textures, default_symbol_textures());
    }

    #[test]
    fn test_load_or_default_fallbacks() {
        let dir = TempDir::new().unwrap();

        let missing = SlotConfig::load_or_default(&dir.path().join("missing.ron"));
        assert_eq!(missing.layout, ReelLayout::default());

        let broken = dir.path().join("broken.ron");
        std::fs::write(&broken, "not ron").unwrap();
        let fallback = SlotConfig::load_or_default(&broken);
        assert_eq!(fallback.layout, ReelLayout::default());
    }
}
