//! Slot reels: a per-frame tween scheduler and the slot-machine reels it drives
//!
//! The core is renderer-agnostic. An external frame loop calls, once per frame
//! and in this order:
//! 1. `TweenScheduler::advance` (writes interpolated reel positions)
//! 2. `SlotMachine::tick` (blur, symbol offsets, recycling)
//!
//! `SlotScene` bundles both in the right order.

pub mod config;
pub mod error;
pub mod reels;
pub mod scene;
pub mod tween;

pub use config::SlotConfig;
pub use error::{ConfigError, TweenError};
pub use scene::{FrameReport, SlotScene};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
