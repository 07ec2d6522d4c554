//! Slot scene
//!
//! Frame driver tying the tween scheduler to the slot machine.
//! Each frame runs the scheduler first, then the reel update, so the reels
//! read positions that were interpolated this frame.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SlotConfig;
use crate::reels::{SlotMachine, SymbolTexture};
use crate::tween::{Clock, TweenScheduler};

/// What happened during one frame update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Reel rolls that finished this frame
    pub tweens_completed: usize,
    /// Symbols re-skinned after wrapping
    pub symbols_recycled: usize,
}

/// Scheduler, machine, and RNG for one slot scene
pub struct SlotScene<C: Clock> {
    pub scheduler: TweenScheduler<SlotMachine, C>,
    pub machine: SlotMachine,
    rng: StdRng,
}

impl<C: Clock> SlotScene<C> {
    /// Build a scene from config. `textures` replaces `config.textures` so the
    /// caller can pass sizes measured from loaded images.
    pub fn new(config: &SlotConfig, textures: Vec<SymbolTexture>, clock: C, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let machine = SlotMachine::new(&config.layout, config.spin, textures, &mut rng);
        Self {
            scheduler: TweenScheduler::new(clock),
            machine,
            rng,
        }
    }

    /// Build a scene using the configured textures as-is
    pub fn from_config(config: &SlotConfig, clock: C, seed: u64) -> Self {
        Self::new(config, config.textures.clone(), clock, seed)
    }

    /// Start a spin unless one is running
    pub fn spin(&mut self) -> bool {
        self.machine.start_spin(&mut self.scheduler, &mut self.rng)
    }

    pub fn is_running(&self) -> bool {
        self.machine.is_running()
    }

    /// Advance one frame at the clock's current time
    pub fn update(&mut self) -> FrameReport {
        let now = self.scheduler.clock().now_ms();
        self.update_at(now)
    }

    /// Advance one frame at `now_ms`
    pub fn update_at(&mut self, now_ms: f64) -> FrameReport {
        let tweens_completed = self.scheduler.advance(now_ms, &mut self.machine);
        let symbols_recycled = self.machine.tick(&mut self.rng);
        FrameReport { tweens_completed, symbols_recycled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::{Easing, ManualClock};

    fn scene() -> (SlotScene<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0.0);
        (SlotScene::from_config(&SlotConfig::default(), clock.clone(), 1234), clock)
    }

    #[test]
    fn test_full_spin_cycle() {
        let (mut scene, clock) = scene();

        assert!(scene.spin());
        assert!(!scene.spin());

        let mut completed = 0;
        let mut recycled = 0;
        let mut frames = 0;
        while scene.is_running() {
            clock.advance(1000.0 / 60.0);
            let report = scene.update();
            completed += report.tweens_completed;
            recycled += report.symbols_recycled;
            frames += 1;
            assert!(frames < 10_000);
        }

        assert_eq!(completed, 5);
        let reskins: u32 = scene.machine.reels.iter().flat_map(|r| &r.symbols).map(|s| s.reskins).sum();
        assert_eq!(recycled, reskins as usize);
        assert!(recycled > 0);
        assert!(scene.scheduler.is_empty());
        for (reel, plan) in scene.machine.reels.iter().zip(scene.machine.last_plans()) {
            assert_eq!(reel.position, plan.target);
        }
        assert!(scene.spin());
    }

    #[test]
    fn test_reels_read_this_frames_position() {
        let (mut scene, clock) = scene();
        scene.spin();

        clock.set(1000.0);
        scene.update();
        // Blur reflects the motion produced by this frame's advance
        let reel = &scene.machine.reels[0];
        assert_eq!(reel.previous_position, reel.position);
        assert!(reel.position > 0.0);
        assert!(reel.blur > 0.0);
    }

    #[test]
    fn test_nan_easing_never_reaches_reels() {
        // Built directly, skipping config validation
        let mut config = SlotConfig::default();
        config.spin.easing = Easing::BackOut { amount: f64::NAN };
        let clock = ManualClock::new(0.0);
        let mut scene = SlotScene::from_config(&config, clock.clone(), 1234);

        assert!(!scene.spin());
        assert!(scene.scheduler.is_empty());

        clock.set(1000.0);
        scene.update();
        for reel in &scene.machine.reels {
            assert_eq!(reel.position, 0.0);
            assert_eq!(reel.blur, 0.0);
            assert!(reel.symbols.iter().all(|s| s.y.is_finite()));
        }
    }

    #[test]
    fn test_same_seed_same_spin() {
        let (mut a, _) = scene();
        let (mut b, _) = scene();
        a.spin();
        b.spin();
        assert_eq!(a.machine.last_plans(), b.machine.last_plans());
    }

    #[test]
    fn test_idle_update_is_quiet() {
        let (mut scene, _clock) = scene();
        let report = scene.update_at(0.0);
        assert_eq!(report.tweens_completed, 0);
    }
}
