//! Slot Machine
//!
//! Owns the reels and the spin session. A spin asks the tween scheduler to
//! roll every reel's `position` to a randomized target; each frame `tick`
//! turns the (already interpolated) positions into blur and symbol offsets.
//!
//! Later reels roll further and for longer, giving the cascading stop.
//! The session goes idle once every reel that was scheduled has stopped.
//! Completion is counted rather than tied to the last reel, because a random
//! extra can make an earlier reel outlast a later one.

use rand::Rng;
use serde::{Serialize, Deserialize};
use log::{debug, warn};

use crate::tween::{Clock, Easing, TweenRequest, TweenScheduler};
use super::reel::{ReelState, DEFAULT_BLUR_PER_UNIT, SYMBOLS_PER_REEL};
use super::symbol::SymbolTexture;

/// Reel geometry and look
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelLayout {
    /// Number of reels
    pub reel_count: usize,
    /// Symbol slots per reel
    pub symbols_per_reel: usize,
    /// Horizontal distance between reel columns (pixels)
    pub reel_width: f32,
    /// Square cell size each symbol is fitted into (pixels)
    pub symbol_size: f64,
    /// Motion blur per symbol unit scrolled in one tick
    pub blur_per_unit: f64,
}

impl Default for ReelLayout {
    fn default() -> Self {
        Self {
            reel_count: 5,
            symbols_per_reel: SYMBOLS_PER_REEL,
            reel_width: 160.0,
            symbol_size: 150.0,
            blur_per_unit: DEFAULT_BLUR_PER_UNIT,
        }
    }
}

/// How far and how long each reel rolls
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTiming {
    /// Symbols every reel rolls at minimum
    pub base_distance: f64,
    /// Extra symbols per reel index
    pub distance_per_reel: f64,
    /// Roll time of the first reel (ms)
    pub base_duration_ms: f64,
    /// Extra roll time per reel index (ms)
    pub duration_per_reel_ms: f64,
    /// Extra roll time per unit of random extra (ms)
    pub duration_per_extra_ms: f64,
    /// Random extra is drawn from `0..extra_range`
    pub extra_range: u32,
    /// Easing for the roll
    pub easing: Easing,
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self {
            base_distance: 10.0,
            distance_per_reel: 5.0,
            base_duration_ms: 2500.0,
            duration_per_reel_ms: 600.0,
            duration_per_extra_ms: 600.0,
            extra_range: 3,
            easing: Easing::back_out(),
        }
    }
}

/// Where and how long one reel rolls for a spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelPlan {
    pub reel: usize,
    pub extra: u32,
    pub target: f64,
    pub duration_ms: f64,
}

/// Roll plan for reel `index` currently at `position`
pub fn plan_reel(index: usize, position: f64, extra: u32, timing: &SpinTiming) -> ReelPlan {
    let i = index as f64;
    let e = extra as f64;
    ReelPlan {
        reel: index,
        extra,
        target: position + timing.base_distance + i * timing.distance_per_reel + e,
        duration_ms: timing.base_duration_ms + i * timing.duration_per_reel_ms + e * timing.duration_per_extra_ms,
    }
}

/// Progress of the current (or last) spin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpinSession {
    /// True from spin start until every scheduled reel has stopped
    pub running: bool,
    /// Reels whose roll was scheduled this spin
    pub scheduled: usize,
    /// Reels that have stopped this spin
    pub completed: usize,
    /// Spins started since creation
    pub spins: u64,
}

/// The reels plus spin bookkeeping
pub struct SlotMachine {
    pub reels: Vec<ReelState>,
    textures: Vec<SymbolTexture>,
    symbol_size: f64,
    blur_per_unit: f64,
    timing: SpinTiming,
    session: SpinSession,
    plans: Vec<ReelPlan>,
}

impl SlotMachine {
    pub fn new<R: Rng + ?Sized>(
        layout: &ReelLayout,
        timing: SpinTiming,
        textures: Vec<SymbolTexture>,
        rng: &mut R,
    ) -> Self {
        let mut reels = Vec::with_capacity(layout.reel_count);
        for _ in 0..layout.reel_count {
            reels.push(ReelState::new(layout.symbols_per_reel, &textures, layout.symbol_size, &mut *rng));
        }

        Self {
            reels,
            textures,
            symbol_size: layout.symbol_size,
            blur_per_unit: layout.blur_per_unit,
            timing,
            session: SpinSession::default(),
            plans: Vec::new(),
        }
    }

    pub fn session(&self) -> SpinSession {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn textures(&self) -> &[SymbolTexture] {
        &self.textures
    }

    /// Plans of the reels scheduled by the most recent spin
    pub fn last_plans(&self) -> &[ReelPlan] {
        &self.plans
    }

    /// Start a spin. Ignored (returns false) while a spin is running or
    /// when there is nothing to roll.
    pub fn start_spin<C: Clock, R: Rng + ?Sized>(
        &mut self,
        scheduler: &mut TweenScheduler<SlotMachine, C>,
        rng: &mut R,
    ) -> bool {
        if self.session.running {
            debug!("Spin ignored: reels still running");
            return false;
        }
        if self.reels.is_empty() {
            return false;
        }

        self.session.running = true;
        self.session.scheduled = 0;
        self.session.completed = 0;
        self.plans.clear();

        let timing = self.timing;
        for i in 0..self.reels.len() {
            let extra = if timing.extra_range > 0 { rng.gen_range(0..timing.extra_range) } else { 0 };
            let plan = plan_reel(i, self.reels[i].position, extra, &timing);

            let request = TweenRequest::new(
                move |m: &mut SlotMachine| m.reels.get_mut(i).map(|r| &mut r.position),
                plan.target,
                plan.duration_ms,
            )
            .easing(timing.easing)
            .on_complete(move |m: &mut SlotMachine, _| m.reel_stopped(i));

            match scheduler.schedule(self, request) {
                Ok(_) => {
                    debug!("Reel {} rolls to {} over {} ms", i, plan.target, plan.duration_ms);
                    self.session.scheduled += 1;
                    self.plans.push(plan);
                }
                Err(e) => warn!("Reel {} did not start: {}", i, e),
            }
        }

        if self.session.scheduled == 0 {
            self.session.running = false;
            return false;
        }
        self.session.spins += 1;
        true
    }

    fn reel_stopped(&mut self, index: usize) {
        self.session.completed += 1;
        if self.session.completed < self.session.scheduled {
            return;
        }
        if index + 1 != self.reels.len() {
            debug!("Reel {} stopped after the final reel", index);
        }
        self.session.running = false;
        debug!("All {} reels stopped", self.session.completed);
    }

    /// Per-frame visual update. Run after the scheduler's advance.
    /// Returns how many symbols were recycled.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let cell = self.symbol_size;
        let blur = self.blur_per_unit;
        let mut recycled = 0;
        for reel in self.reels.iter_mut() {
            recycled += reel.update(&self.textures, cell, blur, &mut *rng);
        }
        recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reels::symbol::default_symbol_textures;
    use crate::tween::{Clock, ManualClock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn machine(layout: &ReelLayout) -> (SlotMachine, TweenScheduler<SlotMachine, ManualClock>, ManualClock, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let machine = SlotMachine::new(layout, SpinTiming::default(), default_symbol_textures(), &mut rng);
        let clock = ManualClock::new(0.0);
        (machine, TweenScheduler::new(clock.clone()), clock, rng)
    }

    fn run_until_idle(
        machine: &mut SlotMachine,
        sched: &mut TweenScheduler<SlotMachine, ManualClock>,
        clock: &ManualClock,
        rng: &mut StdRng,
    ) -> u32 {
        let mut frames = 0;
        while machine.is_running() {
            let now = clock.advance(1000.0 / 60.0);
            sched.advance(now, machine);
            machine.tick(rng);
            frames += 1;
            assert!(frames < 10_000, "spin never finished");
        }
        frames
    }

    #[test]
    fn test_plan_matches_formula() {
        let timing = SpinTiming::default();
        let plan = plan_reel(2, 7.0, 1, &timing);
        assert_eq!(plan.target, 7.0 + 10.0 + 10.0 + 1.0);
        assert_eq!(plan.duration_ms, 2500.0 + 1200.0 + 600.0);
    }

    #[test]
    fn test_plan_cascades_with_same_extra() {
        let timing = SpinTiming::default();
        for extra in 0..3 {
            let durations: Vec<f64> = (0..5).map(|i| plan_reel(i, 0.0, extra, &timing).duration_ms).collect();
            assert!(durations.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_start_spin_schedules_every_reel() {
        let (mut machine, mut sched, _clock, mut rng) = machine(&ReelLayout::default());

        assert!(machine.start_spin(&mut sched, &mut rng));
        assert!(machine.is_running());
        assert_eq!(sched.len(), 5);
        assert_eq!(machine.session().scheduled, 5);
        assert_eq!(machine.session().spins, 1);

        for (tween, plan) in sched.iter().zip(machine.last_plans()) {
            assert!(plan.extra < 3);
            assert_eq!(tween.target_value(), plan.target);
            assert_eq!(tween.duration_ms(), plan.duration_ms);
            assert!(matches!(tween.easing(), Easing::BackOut { amount } if amount == 0.5));
        }
        // Scheduling alone does not move anything
        assert!(machine.reels.iter().all(|r| r.position == 0.0));
    }

    #[test]
    fn test_spin_while_running_is_ignored() {
        let (mut machine, mut sched, clock, mut rng) = machine(&ReelLayout::default());

        machine.start_spin(&mut sched, &mut rng);
        let before: Vec<(f64, f64)> = sched.iter().map(|t| (t.target_value(), t.duration_ms())).collect();

        clock.advance(500.0);
        sched.tick(&mut machine);
        assert!(!machine.start_spin(&mut sched, &mut rng));

        let after: Vec<(f64, f64)> = sched.iter().map(|t| (t.target_value(), t.duration_ms())).collect();
        assert_eq!(before, after);
        assert_eq!(machine.session().spins, 1);
    }

    #[test]
    fn test_spin_runs_to_rest() {
        let (mut machine, mut sched, clock, mut rng) = machine(&ReelLayout::default());

        machine.start_spin(&mut sched, &mut rng);
        let plans = machine.last_plans().to_vec();
        let longest = plans.iter().map(|p| p.duration_ms).fold(0.0, f64::max);

        run_until_idle(&mut machine, &mut sched, &clock, &mut rng);

        // Idle only once the longest roll is done
        assert!(clock.now_ms() >= longest);
        assert!(sched.is_empty());
        assert_eq!(machine.session().completed, 5);
        for (reel, plan) in machine.reels.iter().zip(&plans) {
            assert_eq!(reel.position, plan.target);
        }
    }

    #[test]
    fn test_reels_overshoot_then_settle() {
        let (mut machine, mut sched, clock, mut rng) = machine(&ReelLayout::default());

        machine.start_spin(&mut sched, &mut rng);
        let target = machine.last_plans()[0].target;
        let mut peak = 0.0f64;
        while machine.is_running() {
            let now = clock.advance(1000.0 / 60.0);
            sched.advance(now, &mut machine);
            machine.tick(&mut rng);
            peak = peak.max(machine.reels[0].position);
        }
        assert!(peak > target);
        assert_eq!(machine.reels[0].position, target);
    }

    #[test]
    fn test_blur_and_recycling_during_spin() {
        let (mut machine, mut sched, clock, mut rng) = machine(&ReelLayout::default());

        machine.start_spin(&mut sched, &mut rng);
        let mut max_blur = 0.0f64;
        let mut recycled = 0;
        while machine.is_running() {
            let now = clock.advance(1000.0 / 60.0);
            sched.advance(now, &mut machine);
            recycled += machine.tick(&mut rng);
            max_blur = max_blur.max(machine.reels[0].blur);
        }
        assert!(max_blur > 0.0);
        // Every reel rolls at least 10 symbols over 4 slots
        assert!(recycled >= 5 * 2);

        // At rest the blur decays to zero on the next tick
        machine.tick(&mut rng);
        assert!(machine.reels.iter().all(|r| r.blur == 0.0));
    }

    #[test]
    fn test_second_spin_continues_from_rest() {
        let (mut machine, mut sched, clock, mut rng) = machine(&ReelLayout::default());

        machine.start_spin(&mut sched, &mut rng);
        run_until_idle(&mut machine, &mut sched, &clock, &mut rng);
        let rest: Vec<f64> = machine.reels.iter().map(|r| r.position).collect();

        assert!(machine.start_spin(&mut sched, &mut rng));
        for (plan, start) in machine.last_plans().iter().zip(&rest) {
            assert!(plan.target >= start + 10.0);
        }
        assert_eq!(machine.session().spins, 2);
    }

    #[test]
    fn test_no_reels_never_runs() {
        let layout = ReelLayout { reel_count: 0, ..Default::default() };
        let (mut machine, mut sched, _clock, mut rng) = machine(&layout);

        assert!(!machine.start_spin(&mut sched, &mut rng));
        assert!(!machine.is_running());
        assert_eq!(machine.tick(&mut rng), 0);
    }

    #[test]
    fn test_rejected_rolls_do_not_block_session() {
        let (mut machine, mut sched, _clock, mut rng) = machine(&ReelLayout::default());
        machine.timing.base_duration_ms = -10_000.0;

        assert!(!machine.start_spin(&mut sched, &mut rng));
        assert!(!machine.is_running());
        assert!(sched.is_empty());
    }

    #[test]
    fn test_out_of_order_stop_still_waits_for_all() {
        let layout = ReelLayout { reel_count: 2, ..Default::default() };
        let (mut machine, mut sched, clock, mut rng) = machine(&layout);
        // Reel 0 outlasts reel 1
        machine.timing.duration_per_reel_ms = -1000.0;
        machine.timing.extra_range = 0;

        machine.start_spin(&mut sched, &mut rng);
        clock.set(1500.0);
        sched.tick(&mut machine);
        assert_eq!(machine.session().completed, 1);
        assert!(machine.is_running());

        clock.set(2500.0);
        sched.tick(&mut machine);
        assert!(!machine.is_running());
    }
}
