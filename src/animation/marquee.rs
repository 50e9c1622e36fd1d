use crate::animation::style::Style;
use crate::foundation::core::ElementId;
use crate::foundation::error::{MotionError, MotionResult};

/// Endless horizontal loop over a track holding two copies of its content.
///
/// The track slides from 0 to -50% of its own width once per period, then wraps, so the second
/// copy lands exactly where the first started.
#[derive(Clone, Debug, PartialEq)]
pub struct Marquee {
    pub target: ElementId,
    pub period_secs: f64,
    elapsed_secs: f64,
}

impl Marquee {
    pub const TRAVEL_PERCENT: f64 = -50.0;

    pub fn new(target: ElementId, period_secs: f64) -> MotionResult<Self> {
        if !period_secs.is_finite() || period_secs <= 0.0 {
            return Err(MotionError::validation(format!(
                "marquee period must be finite and > 0, got {period_secs}"
            )));
        }
        Ok(Self {
            target,
            period_secs,
            elapsed_secs: 0.0,
        })
    }

    /// Fraction of the current loop, in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.elapsed_secs / self.period_secs
    }

    pub fn advance(&mut self, dt_secs: f64) {
        self.elapsed_secs = (self.elapsed_secs + dt_secs.max(0.0)).rem_euclid(self.period_secs);
    }

    pub fn style(&self) -> Style {
        Style::translate_percent(Self::TRAVEL_PERCENT * self.phase(), 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/marquee.rs"]
mod tests;
