//! Slot rendering
//!
//! Draws the slot machine with macroquad: reel columns, masks above and
//! below the three visible rows, header and spin text. Motion blur is faked
//! with faded copies offset along the scroll direction.

use macroquad::prelude::*;
use slot_reels::config::{limits, SlotConfig};
use slot_reels::reels::{SlotMachine, SymbolTexture};

/// Visible rows between the masks
const VISIBLE_ROWS: f32 = 3.0;

/// Text sizes (pixels)
const TEXT_SIZE: f32 = 36.0;

const TEXT_FILL: Color = Color::new(0.0, 1.0, 0.6, 1.0);
const TEXT_STROKE: Color = Color::new(0.29, 0.094, 0.314, 1.0);
const MASK_COLOR: Color = BLACK;

/// GPU textures for the symbol table, index-aligned with the machine's textures
pub struct SymbolArt {
    textures: Vec<Texture2D>,
}

/// Load every symbol image. Symbols without a path, or whose image fails to
/// load, get a generated placeholder of the configured size and color.
///
/// Returns the art plus the texture table with sizes measured from what loaded.
pub async fn load_symbol_art(defs: &[SymbolTexture]) -> (SymbolArt, Vec<SymbolTexture>) {
    let mut textures = Vec::with_capacity(defs.len());
    let mut measured = Vec::with_capacity(defs.len());

    for def in defs {
        if !def.has_image() {
            log::debug!("Symbol '{}' has no image, using placeholder", def.name);
            measured.push(def.clone());
            textures.push(placeholder_texture(def));
            continue;
        }
        let texture = match load_texture(&def.path).await {
            Ok(tex) => {
                tex.set_filter(FilterMode::Linear);
                log::info!("Loaded symbol '{}' ({}x{})", def.name, tex.width(), tex.height());
                tex
            }
            Err(e) => {
                log::warn!("Failed to load symbol '{}': {}, using placeholder", def.name, e);
                placeholder_texture(def)
            }
        };

        let mut info = def.clone();
        info.width = texture.width();
        info.height = texture.height();
        measured.push(info);
        textures.push(texture);
    }

    (SymbolArt { textures }, measured)
}

/// Solid tile with a darker frame
fn placeholder_texture(def: &SymbolTexture) -> Texture2D {
    let w = def.width.clamp(1.0, limits::MAX_TEXTURE_SIZE) as u16;
    let h = def.height.clamp(1.0, limits::MAX_TEXTURE_SIZE) as u16;
    let [r, g, b] = def.color;
    let fill = Color::from_rgba(r, g, b, 255);
    let frame = Color::from_rgba(r / 2, g / 2, b / 2, 255);

    let mut image = Image::gen_image_color(w, h, fill);
    let border = 6u32.min(w as u32 / 2).min(h as u32 / 2);
    for y in 0..h as u32 {
        for x in 0..w as u32 {
            if x < border || y < border || x >= w as u32 - border || y >= h as u32 - border {
                image.set_pixel(x, y, frame);
            }
        }
    }

    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Linear);
    texture
}

/// Screen placement derived from the current window size
#[derive(Debug, Clone, Copy)]
pub struct SlotLayout {
    /// Height of each mask bar
    pub margin: f32,
    /// Left edge of the first reel column
    pub reels_x: f32,
    /// Top of the visible window
    pub reels_y: f32,
}

impl SlotLayout {
    pub fn compute(config: &SlotConfig) -> Self {
        let cell = config.layout.symbol_size as f32;
        let margin = (screen_height() - cell * VISIBLE_ROWS) / 2.0;
        let reels_x = (screen_width() - config.layout.reel_width * config.layout.reel_count as f32).round();
        Self { margin, reels_x, reels_y: margin }
    }

    /// The bottom mask, which doubles as the spin button
    pub fn spin_button(&self, config: &SlotConfig) -> Rect {
        let cell = config.layout.symbol_size as f32;
        Rect::new(0.0, cell * VISIBLE_ROWS + self.margin, screen_width(), self.margin)
    }
}

/// Draw text centered in `area` with a stroke and drop shadow
fn draw_banner_text(text: &str, area: Rect) {
    let size = measure_text(text, None, TEXT_SIZE as u16, 1.0);
    let x = (area.x + (area.w - size.width) / 2.0).round();
    let y = (area.y + (area.h - size.height) / 2.0).round() + size.offset_y;

    // Drop shadow (distance 6 at 30 degrees)
    let (sx, sy) = (6.0 * (std::f32::consts::PI / 6.0).cos(), 6.0 * (std::f32::consts::PI / 6.0).sin());
    draw_text(text, x + sx, y + sy, TEXT_SIZE, Color::new(0.0, 0.0, 0.0, 0.6));

    for (dx, dy) in [(-2.0, 0.0), (2.0, 0.0), (0.0, -2.0), (0.0, 2.0)] {
        draw_text(text, x + dx, y + dy, TEXT_SIZE, TEXT_STROKE);
    }
    draw_text(text, x, y, TEXT_SIZE, TEXT_FILL);
}

/// Draw the whole slot scene
pub fn draw_slots(machine: &SlotMachine, art: &SymbolArt, config: &SlotConfig, layout: &SlotLayout) {
    let reel_width = config.layout.reel_width;

    for (i, reel) in machine.reels.iter().enumerate() {
        let column_x = layout.reels_x + i as f32 * reel_width;
        let blur = reel.blur as f32;

        for symbol in &reel.symbols {
            let Some(texture) = art.textures.get(symbol.texture) else {
                continue;
            };
            let Some(info) = machine.textures().get(symbol.texture) else {
                continue;
            };
            let (w, h) = symbol.display_size(info);
            let x = column_x + symbol.x as f32;
            let y = layout.reels_y + symbol.y as f32;
            let params = DrawTextureParams {
                dest_size: Some(vec2(w as f32, h as f32)),
                ..Default::default()
            };

            if blur.abs() > 0.5 {
                let ghost = Color::new(1.0, 1.0, 1.0, 0.3);
                draw_texture_ex(texture, x, y - blur * 0.5, ghost, params.clone());
                draw_texture_ex(texture, x, y + blur * 0.5, ghost, params.clone());
                draw_texture_ex(texture, x, y, Color::new(1.0, 1.0, 1.0, 0.7), params);
            } else {
                draw_texture_ex(texture, x, y, WHITE, params);
            }
        }
    }

    // Masks hide symbols outside the three visible rows
    let top = Rect::new(0.0, 0.0, screen_width(), layout.margin);
    let bottom = layout.spin_button(config);
    draw_rectangle(top.x, top.y, top.w, top.h, MASK_COLOR);
    draw_rectangle(bottom.x, bottom.y, bottom.w, bottom.h, MASK_COLOR);

    draw_banner_text(&config.window.title, top);
    let prompt = if machine.is_running() { "Good luck!" } else { "Spin the wheels!" };
    draw_banner_text(prompt, bottom);
}

/// True when the player asked for a spin this frame (click on the bottom bar or Space)
pub fn spin_requested(config: &SlotConfig, layout: &SlotLayout) -> bool {
    if is_key_pressed(KeyCode::Space) {
        return true;
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        let (mx, my) = mouse_position();
        return layout.spin_button(config).contains(vec2(mx, my));
    }
    false
}
