use crate::animation::ease::Ease;
use crate::foundation::error::{MotionError, MotionResult};

/// Which way a tween is currently heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenDirection {
    Forward,
    Backward,
}

/// Time-driven progress from 0 to 1 that can be played, reversed, and restarted.
///
/// Reversing mid-flight continues from the current position rather than jumping, which is what
/// scroll-toggled entrances need when the user changes direction quickly.
#[derive(Clone, Debug)]
pub struct Tween {
    duration_secs: f64,
    ease: Ease,
    elapsed_secs: f64,
    direction: Option<TweenDirection>,
}

impl Tween {
    pub fn new(duration_secs: f64, ease: Ease) -> MotionResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(MotionError::validation(format!(
                "tween duration must be finite and > 0, got {duration_secs}"
            )));
        }
        Ok(Self {
            duration_secs,
            ease,
            elapsed_secs: 0.0,
            direction: None,
        })
    }

    pub fn play(&mut self) {
        self.direction = Some(TweenDirection::Forward);
    }

    pub fn reverse(&mut self) {
        self.direction = Some(TweenDirection::Backward);
    }

    /// Jump back to the start and play forward.
    pub fn restart(&mut self) {
        self.elapsed_secs = 0.0;
        self.play();
    }

    /// Stop and pin progress to `fraction`.
    pub fn seek(&mut self, fraction: f64) {
        self.elapsed_secs = fraction.clamp(0.0, 1.0) * self.duration_secs;
        self.direction = None;
    }

    pub fn direction(&self) -> Option<TweenDirection> {
        self.direction
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// `true` while the tween still has ground to cover.
    pub fn is_active(&self) -> bool {
        match self.direction {
            Some(TweenDirection::Forward) => self.elapsed_secs < self.duration_secs,
            Some(TweenDirection::Backward) => self.elapsed_secs > 0.0,
            None => false,
        }
    }

    /// Advance by `dt_secs`. Returns `true` when progress changed.
    pub fn advance(&mut self, dt_secs: f64) -> bool {
        if !self.is_active() || dt_secs <= 0.0 {
            return false;
        }
        let before = self.elapsed_secs;
        self.elapsed_secs = match self.direction {
            Some(TweenDirection::Forward) => (before + dt_secs).min(self.duration_secs),
            Some(TweenDirection::Backward) => (before - dt_secs).max(0.0),
            None => before,
        };
        if !self.is_active() {
            self.direction = None;
        }
        self.elapsed_secs != before
    }

    /// Linear progress in `[0, 1]`.
    pub fn linear_progress(&self) -> f64 {
        (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.ease.apply(self.linear_progress())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
