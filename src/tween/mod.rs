//! Tweening
//!
//! Time-bounded interpolation of numeric fields, advanced once per frame
//! by an external driver.
//!
//! Key pieces:
//! - Easing: curve from normalized progress to eased progress
//! - Clock: monotonic millisecond source used to stamp tween start times
//! - TweenScheduler: owns active tweens, writes interpolated values back

pub mod clock;
pub mod easing;
pub mod scheduler;

pub use clock::{Clock, FrameClock, ManualClock};
pub use easing::{back_out, lerp, Easing, DEFAULT_BACK_OUT_AMOUNT};
pub use scheduler::{Callback, Tween, TweenHandle, TweenProgress, TweenRequest, TweenScheduler};
