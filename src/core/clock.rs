//! Animation clock and loop control

use bevy::prelude::*;

/// Ordered stages of one animation tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationSystems {
    /// Advance the clock.
    Clock,
    /// Advance the scene model.
    Model,
    /// Mirror the model into entity transforms.
    Sync,
    /// Loop bookkeeping (tick limit).
    Control,
}

/// Elapsed time since the loop started plus the number of ticks run.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    elapsed_secs: f32,
    ticks: u64,
}

impl AnimationClock {
    /// Count one tick lasting `delta_secs`; returns the new elapsed time.
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        self.elapsed_secs += delta_secs.max(0.0);
        self.ticks += 1;
        self.elapsed_secs
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Run/stop flag of the animation loop
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AnimationLoop {
    state: LoopState,
    tick_limit: Option<u64>,
}

impl AnimationLoop {
    pub fn new(tick_limit: Option<u64>) -> Self {
        Self {
            state: LoopState::Running,
            tick_limit,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Record that `ticks` ticks have completed. Returns true if this stopped the loop.
    pub fn observe_tick(&mut self, ticks: u64) -> bool {
        match self.tick_limit {
            Some(limit) if self.is_running() && ticks >= limit => {
                self.stop();
                true
            }
            _ => false,
        }
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Run condition gating every [`AnimationSystems`] stage.
pub fn animation_running(animation: Res<AnimationLoop>) -> bool {
    animation.is_running()
}

/// Advance by the unclamped wall-clock frame time.
pub fn advance_animation_clock(time: Res<Time<Real>>, mut clock: ResMut<AnimationClock>) {
    clock.advance(time.delta_secs());
}

pub fn enforce_tick_limit(
    clock: Res<AnimationClock>,
    mut animation: ResMut<AnimationLoop>,
    mut exit: MessageWriter<AppExit>,
) {
    if animation.observe_tick(clock.ticks()) {
        info!(
            "Animation stopped after {} ticks ({:.2}s)",
            clock.ticks(),
            clock.elapsed_secs()
        );
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates_elapsed_and_ticks() {
        let mut clock = AnimationClock::default();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.elapsed_secs(), 0.75);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_clock_ignores_negative_delta() {
        let mut clock = AnimationClock::default();
        clock.advance(1.0);
        clock.advance(-3.0);
        assert_eq!(clock.elapsed_secs(), 1.0);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_unbounded_loop_never_stops() {
        let mut animation = AnimationLoop::default();
        for ticks in 1..10_000 {
            assert!(!animation.observe_tick(ticks));
        }
        assert!(animation.is_running());
    }

    #[test]
    fn test_tick_limit_stops_once() {
        let mut animation = AnimationLoop::new(Some(3));
        assert!(!animation.observe_tick(2));
        assert!(animation.observe_tick(3));
        assert_eq!(animation.state(), LoopState::Stopped);
        assert!(!animation.observe_tick(4));
    }
}
