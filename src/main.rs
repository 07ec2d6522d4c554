//! MONSTER SLOTS: a tweened slot machine
//!
//! Five reels of recycled monster symbols. Click the bottom bar (or press
//! Space) to spin; reels roll with a back-out overshoot and stop one after
//! another. The scene is driven once per frame: tweens first, then reels.

mod render;

use macroquad::prelude::*;
use slot_reels::config::{SlotConfig, DEFAULT_CONFIG_PATH};
use slot_reels::tween::FrameClock;
use slot_reels::{SlotScene, VERSION};
use std::path::Path;

fn window_conf() -> Conf {
    // Runs before main, so logging is not up yet; main loads the config again
    let config = SlotConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH));
    Conf {
        window_title: format!("{} v{}", config.window.title, VERSION),
        window_width: config.window.width,
        window_height: config.window.height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = SlotConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH));

    // Texture loading is the only async step; finish it before ticking
    let (art, textures) = render::load_symbol_art(&config.textures).await;
    log::info!("Loaded {} symbol textures", textures.len());

    let seed = config
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64);
    let mut scene = SlotScene::new(&config, textures, FrameClock, seed);

    log::info!("=== MONSTER SLOTS v{} (seed {}) ===", VERSION, seed);

    loop {
        clear_background(Color::from_rgba(16, 16, 24, 255));

        let layout = render::SlotLayout::compute(&config);
        if render::spin_requested(&config, &layout) && scene.spin() {
            log::debug!("Spin {}", scene.machine.session().spins);
        }

        scene.update();
        render::draw_slots(&scene.machine, &art, &config, &layout);

        next_frame().await;
    }
}
