//! Easing curves and interpolation
//!
//! An easing maps normalized progress in [0, 1] to eased progress.
//! Eased progress may leave [0, 1] (back-out overshoots past 1 before settling).

use serde::{Serialize, Deserialize};

/// Default overshoot amount for the back-out curve
pub const DEFAULT_BACK_OUT_AMOUNT: f64 = 0.5;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Cubic back-out: `(t-1)^2 * ((amount+1)*(t-1) + amount) + 1`
///
/// Passes through 0 at t=0 and 1 at t=1, overshooting 1 in between
/// for any positive `amount`.
#[inline]
pub fn back_out(amount: f64, t: f64) -> f64 {
    let u = t - 1.0;
    u * u * ((amount + 1.0) * u + amount) + 1.0
}

/// Easing curve applied to a tween's phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Easing {
    /// Identity
    Linear,
    /// Springy stop that overshoots the target and settles back
    BackOut { amount: f64 },
    /// Caller-supplied curve (not serializable)
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::back_out()
    }
}

impl Easing {
    /// Back-out with the default overshoot amount
    pub const fn back_out() -> Self {
        Easing::BackOut { amount: DEFAULT_BACK_OUT_AMOUNT }
    }

    /// Map a phase in [0, 1] to eased progress
    pub fn sample(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::BackOut { amount } => back_out(*amount, t),
            Easing::Custom(f) => f(t),
        }
    }

    /// The curve's tuning parameter, if it has one
    pub fn amount(&self) -> Option<f64> {
        match self {
            Easing::BackOut { amount } => Some(*amount),
            Easing::Linear | Easing::Custom(_) => None,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::BackOut { .. } => "back-out",
            Easing::Custom(_) => "custom",
        }
    }
}
