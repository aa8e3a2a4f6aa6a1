//! Win animation: the goal grows until it covers the screen, the next level
//! is swapped in underneath, then the cover fades away.

use crate::infrastructure::AnimationSettings;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Scaling,
    Fading,
}

#[derive(Debug, Clone)]
pub struct WinAnimation {
    phase: AnimationPhase,
    elapsed: Duration,
    finished: bool,
    scale_duration: Duration,
    fade_duration: Duration,
}

impl WinAnimation {
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            phase: AnimationPhase::Scaling,
            elapsed: Duration::ZERO,
            finished: false,
            scale_duration: settings.scale_duration(),
            fade_duration: settings.fade_duration(),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Advances the clock. Returns the phase that just completed, if any.
    ///
    /// A completed scale step stays at full scale until [`start_fade`] is
    /// called; a completed fade stays transparent.
    ///
    /// [`start_fade`]: WinAnimation::start_fade
    pub fn advance(&mut self, dt: Duration) -> Option<AnimationPhase> {
        if self.finished {
            return None;
        }
        let duration = self.current_duration();
        self.elapsed = (self.elapsed + dt).min(duration);
        self.finished = self.elapsed >= duration;
        self.finished.then_some(self.phase)
    }

    pub fn start_fade(&mut self) {
        self.phase = AnimationPhase::Fading;
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }

    /// Linear progress of the current phase in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let duration = self.current_duration();
        if duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// How far the cover has grown, eased in.
    pub fn scale_progress(&self) -> f64 {
        match self.phase {
            AnimationPhase::Scaling => ease_in(self.progress()),
            AnimationPhase::Fading => 1.0,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self.phase {
            AnimationPhase::Scaling => 1.0,
            AnimationPhase::Fading => 1.0 - self.progress(),
        }
    }

    fn current_duration(&self) -> Duration {
        match self.phase {
            AnimationPhase::Scaling => self.scale_duration,
            AnimationPhase::Fading => self.fade_duration,
        }
    }
}

/// Quadratic ease-in: starts slow, ends at full speed.
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}
