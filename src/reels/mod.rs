//! Reels
//!
//! The slot-machine side of the demo: reel strips, their symbols, and the
//! spin session that drives them through the tween scheduler.
//!
//! Key concepts:
//! - ReelState: scroll position, previous position, blur, symbol slots
//! - SymbolSprite: one recyclable slot, re-skinned when it wraps
//! - SlotMachine: all reels plus the running flag that blocks overlapping spins

pub mod symbol;
pub mod reel;
pub mod machine;

pub use symbol::{SymbolSprite, SymbolTexture, default_symbol_textures};
pub use reel::{ReelState, SYMBOLS_PER_REEL, DEFAULT_BLUR_PER_UNIT};
pub use machine::{SlotMachine, SpinSession, SpinTiming, ReelLayout, ReelPlan, plan_reel};
