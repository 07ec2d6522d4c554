//! Reel state
//!
//! One vertical strip of recyclable symbols. The strip scrolls by a
//! continuous `position` (in symbol units); each symbol's offset is derived
//! from it with modular arithmetic, so a handful of sprites give the look of
//! an endless strip.

use rand::Rng;
use super::symbol::{SymbolSprite, SymbolTexture};

/// Symbols per reel in the default layout
pub const SYMBOLS_PER_REEL: usize = 4;

/// Motion-blur strength per symbol unit scrolled in one tick
pub const DEFAULT_BLUR_PER_UNIT: f64 = 8.0;

/// A single reel
#[derive(Debug, Clone)]
pub struct ReelState {
    /// Symbol slots, top to bottom at position 0
    pub symbols: Vec<SymbolSprite>,
    /// Scroll coordinate (in symbols). Animated by the tween scheduler.
    pub position: f64,
    /// Position at the previous tick (velocity source)
    pub previous_position: f64,
    /// Motion blur for this reel, derived from velocity each tick
    pub blur: f64,
}

impl ReelState {
    /// Build a reel with `count` randomly skinned symbols laid out top to bottom
    pub fn new<R: Rng + ?Sized>(count: usize, textures: &[SymbolTexture], cell: f64, rng: &mut R) -> Self {
        let symbols = if textures.is_empty() {
            Vec::new()
        } else {
            (0..count)
                .map(|j| {
                    let tex = rng.gen_range(0..textures.len());
                    SymbolSprite::new(tex, &textures[tex], cell, j as f64 * cell)
                })
                .collect()
        };

        Self {
            symbols,
            position: 0.0,
            previous_position: 0.0,
            blur: 0.0,
        }
    }

    /// Distance scrolled since the previous tick
    pub fn velocity(&self) -> f64 {
        self.position - self.previous_position
    }

    /// Vertical offset of symbol `j` at the current position
    pub fn symbol_offset(&self, j: usize, cell: f64) -> f64 {
        let count = self.symbols.len() as f64;
        (self.position + j as f64).rem_euclid(count) * cell - cell
    }

    /// Per-frame visual update: blur from velocity, symbol offsets, recycling.
    ///
    /// A symbol is re-skinned only on the tick it wraps from below the window
    /// (offset > cell) back above it (offset < 0). Returns how many wrapped.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        textures: &[SymbolTexture],
        cell: f64,
        blur_per_unit: f64,
        rng: &mut R,
    ) -> usize {
        self.blur = self.velocity() * blur_per_unit;
        self.previous_position = self.position;

        let mut recycled = 0;
        for j in 0..self.symbols.len() {
            let y = self.symbol_offset(j, cell);
            let symbol = &mut self.symbols[j];
            let prev_y = symbol.y;
            symbol.y = y;

            if y < 0.0 && prev_y > cell && !textures.is_empty() {
                let tex = rng.gen_range(0..textures.len());
                symbol.reskin(tex, &textures[tex], cell);
                recycled += 1;
            }
        }
        recycled
    }
}
