//! Tween Scheduler
//!
//! Owns the list of active tweens and advances them once per frame.
//!
//! A tween animates one `f64` field on a context value `T`. The field is
//! addressed by an accessor closure captured at schedule time, so the
//! scheduler never holds a reference into `T` between frames. The context is
//! passed back in on every `advance`, and callbacks receive it mutably.
//!
//! Per advance, for each tween in scheduling order:
//! 1. phase = clamp((now - start) / duration, 0, 1)
//! 2. write lerp(start, target, easing(phase)), then call on_change
//! 3. at phase 1: write the exact target, call on_complete once, mark finished
//!
//! Finished tweens are removed in one batch after the pass, so a completion
//! never skips or double-visits a sibling.

use super::clock::{Clock, FrameClock};
use super::easing::{lerp, Easing};
use crate::error::TweenError;

/// Accessor for the animated field on the context
type FieldFn<T> = Box<dyn Fn(&mut T) -> Option<&mut f64>>;

/// Per-tween callback, invoked with the context and the tween's progress
pub type Callback<T> = Box<dyn FnMut(&mut T, &TweenProgress)>;

/// Stable identifier for a scheduled tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

impl TweenHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Snapshot passed to callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenProgress {
    pub handle: TweenHandle,
    /// Normalized elapsed time in [0, 1]
    pub phase: f64,
    /// Value written to the field this tick
    pub value: f64,
}

/// A request to animate a field, built before handing it to the scheduler
pub struct TweenRequest<T> {
    field: FieldFn<T>,
    target_value: f64,
    duration_ms: f64,
    easing: Easing,
    on_change: Option<Callback<T>>,
    on_complete: Option<Callback<T>>,
}

impl<T: 'static> TweenRequest<T> {
    /// Animate the field returned by `field` to `target_value` over `duration_ms`.
    ///
    /// Uses linear easing unless `easing` is called.
    pub fn new<F>(field: F, target_value: f64, duration_ms: f64) -> Self
    where
        F: Fn(&mut T) -> Option<&mut f64> + 'static,
    {
        Self {
            field: Box::new(field),
            target_value,
            duration_ms,
            easing: Easing::Linear,
            on_change: None,
            on_complete: None,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Called every tick while the tween is active, after the field is written
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut T, &TweenProgress) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Called exactly once, on the tick the phase reaches 1
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut T, &TweenProgress) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// An active tween
pub struct Tween<T> {
    handle: TweenHandle,
    field: FieldFn<T>,
    start_value: f64,
    target_value: f64,
    duration_ms: f64,
    start_ms: f64,
    easing: Easing,
    on_change: Option<Callback<T>>,
    on_complete: Option<Callback<T>>,
    finished: bool,
    /// Set once the accessor stops resolving, so the warning is logged once
    field_lost: bool,
}

impl<T> Tween<T> {
    pub fn handle(&self) -> TweenHandle {
        self.handle
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Phase at `now_ms`, clamped to [0, 1]
    pub fn phase_at(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    fn write(&mut self, ctx: &mut T, value: f64) {
        match (self.field)(ctx) {
            Some(slot) => *slot = value,
            None => {
                if !self.field_lost {
                    log::warn!("Tween {} lost its target field; skipping writes", self.handle.0);
                    self.field_lost = true;
                }
            }
        }
    }
}

/// Scheduler for active tweens over a context `T`
pub struct TweenScheduler<T, C = FrameClock> {
    clock: C,
    tweens: Vec<Tween<T>>,
    next_id: u64,
}

impl<T> Default for TweenScheduler<T, FrameClock> {
    fn default() -> Self {
        Self::new(FrameClock)
    }
}

impl<T, C: Clock> TweenScheduler<T, C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            tweens: Vec::new(),
            next_id: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start a tween. The start value is read from `ctx` now, the start time
    /// from the scheduler's clock. `ctx` is not modified.
    pub fn schedule(&mut self, ctx: &mut T, request: TweenRequest<T>) -> Result<TweenHandle, TweenError> {
        let TweenRequest { field, target_value, duration_ms, easing, on_change, on_complete } = request;

        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(TweenError::InvalidDuration(duration_ms));
        }
        if !target_value.is_finite() {
            return Err(TweenError::NonFiniteTarget(target_value));
        }
        if let Some(amount) = easing.amount().filter(|a| !a.is_finite()) {
            return Err(TweenError::NonFiniteEasing(amount));
        }
        let start_value = match field(ctx) {
            Some(v) => *v,
            None => return Err(TweenError::UnreadableField),
        };
        if !start_value.is_finite() {
            return Err(TweenError::NonFiniteStart(start_value));
        }

        let handle = TweenHandle(self.next_id);
        self.next_id += 1;

        self.tweens.push(Tween {
            handle,
            field,
            start_value,
            target_value,
            duration_ms,
            start_ms: self.clock.now_ms(),
            easing,
            on_change,
            on_complete,
            finished: false,
            field_lost: false,
        });

        Ok(handle)
    }

    /// Advance every active tween to `now_ms`. Returns how many completed.
    pub fn advance(&mut self, now_ms: f64, ctx: &mut T) -> usize {
        let mut completed = 0;

        for tween in self.tweens.iter_mut() {
            let phase = tween.phase_at(now_ms);
            let value = lerp(tween.start_value, tween.target_value, tween.easing.sample(phase));
            tween.write(ctx, value);

            if let Some(on_change) = tween.on_change.as_mut() {
                on_change(ctx, &TweenProgress { handle: tween.handle, phase, value });
            }

            if phase >= 1.0 {
                // Exact end value regardless of easing rounding
                let target = tween.target_value;
                tween.write(ctx, target);
                if let Some(mut on_complete) = tween.on_complete.take() {
                    on_complete(ctx, &TweenProgress { handle: tween.handle, phase, value: target });
                }
                tween.finished = true;
                completed += 1;
            }
        }

        if completed > 0 {
            self.tweens.retain(|t| !t.finished);
        }
        completed
    }

    /// Advance using the scheduler's own clock
    pub fn tick(&mut self, ctx: &mut T) -> usize {
        let now = self.clock.now_ms();
        self.advance(now, ctx)
    }

    /// Number of active tweens
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }

    /// Active tweens in scheduling order
    pub fn iter(&self) -> impl Iterator<Item = &Tween<T>> {
        self.tweens.iter()
    }
}
