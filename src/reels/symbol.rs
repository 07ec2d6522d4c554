//! Reel symbols
//!
//! A symbol is a sprite slot on a reel: which texture it shows, where it sits
//! inside its reel column, and how it is scaled to fit a square cell.

use serde::{Serialize, Deserialize};

/// A texture a symbol can show (design-time data, stored in config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolTexture {
    /// Display name
    pub name: String,
    /// Image path, relative to the working directory. Empty means the
    /// generated placeholder tile is drawn instead.
    #[serde(default)]
    pub path: String,
    /// Pixel width (replaced by the loaded image's width when it loads)
    pub width: f32,
    /// Pixel height (replaced by the loaded image's height when it loads)
    pub height: f32,
    /// Placeholder color (RGB 0-255) used when the image can't be loaded
    #[serde(default = "default_placeholder_color")]
    pub color: [u8; 3],
}

fn default_placeholder_color() -> [u8; 3] {
    [200, 200, 200]
}

impl SymbolTexture {
    pub fn new(name: &str, path: &str, width: f32, height: f32, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            width,
            height,
            color,
        }
    }

    /// Whether an image file is configured for this texture
    pub fn has_image(&self) -> bool {
        !self.path.trim().is_empty()
    }

    /// Uniform scale that fits the texture inside a `cell` x `cell` square.
    ///
    /// Degenerate sizes fit at scale 1.
    pub fn fit_scale(&self, cell: f64) -> f64 {
        let (w, h) = (self.width as f64, self.height as f64);
        if w <= 0.0 || h <= 0.0 {
            return 1.0;
        }
        (cell / w).min(cell / h)
    }
}

/// The default symbol set (the four monsters).
///
/// No artwork ships with the crate, so these draw as colored placeholder
/// tiles; set `path` in the config to use real images.
pub fn default_symbol_textures() -> Vec<SymbolTexture> {
    vec![
        SymbolTexture::new("egg_head", "", 142.0, 165.0, [236, 196, 120]),
        SymbolTexture::new("flower_top", "", 158.0, 172.0, [231, 92, 140]),
        SymbolTexture::new("helmlok", "", 160.0, 146.0, [98, 170, 214]),
        SymbolTexture::new("skully", "", 150.0, 150.0, [180, 220, 110]),
    ]
}

/// A symbol slot on a reel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolSprite {
    /// Index into the machine's texture table
    pub texture: usize,
    /// Horizontal offset inside the reel column (centers the scaled texture)
    pub x: f64,
    /// Vertical offset inside the reel column
    pub y: f64,
    /// Uniform display scale
    pub scale: f64,
    /// How many times this slot has been re-skinned after wrapping
    pub reskins: u32,
}

impl SymbolSprite {
    /// Create a symbol at vertical offset `y`, fitted to the cell
    pub fn new(texture: usize, info: &SymbolTexture, cell: f64, y: f64) -> Self {
        let mut sprite = Self {
            texture,
            x: 0.0,
            y,
            scale: 1.0,
            reskins: 0,
        };
        sprite.fit(texture, info, cell);
        sprite
    }

    /// Assign a texture and recompute scale and horizontal centering
    pub fn fit(&mut self, texture: usize, info: &SymbolTexture, cell: f64) {
        self.texture = texture;
        self.scale = info.fit_scale(cell);
        self.x = ((cell - info.width as f64 * self.scale) / 2.0).round();
    }

    /// Re-skin after wrapping past the visible window
    pub fn reskin(&mut self, texture: usize, info: &SymbolTexture, cell: f64) {
        self.fit(texture, info, cell);
        self.reskins += 1;
    }

    /// Displayed size in pixels
    pub fn display_size(&self, info: &SymbolTexture) -> (f64, f64) {
        (info.width as f64 * self.scale, info.height as f64 * self.scale)
    }
}
