use std::time::Duration;

use crate::animation::ease::Ease;
use crate::foundation::core::{ElementId, Vec2, check_fraction};
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::responsiveness_for_settle;
use crate::trigger::element::{ReplayPolicy, TriggerEffect, TriggerSpec};

/// Every tunable of the motion engine.
///
/// All sections default individually, so a partial JSON document only overrides what it names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub scroll: ScrollConfig,
    pub pointer: PointerConfig,
    pub triggers: TriggerDefaults,
    /// Upper bound on a single tick's delta.
    pub max_delta_ms: u64,
    /// `None` asks the host's `prefers-reduced-motion` media query; `Some` forces the gate.
    pub reduced_motion: Option<bool>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            pointer: PointerConfig::default(),
            triggers: TriggerDefaults::default(),
            max_delta_ms: 100,
            reduced_motion: None,
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.scroll.validate()?;
        self.pointer.validate()?;
        self.triggers.validate()?;
        if self.max_delta_ms == 0 {
            return Err(MotionError::validation("max_delta_ms must be > 0"));
        }
        Ok(())
    }

    pub fn max_delta(&self) -> Duration {
        Duration::from_millis(self.max_delta_ms)
    }
}

fn check_responsiveness(name: &str, v: f64) -> MotionResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MotionError::validation(format!(
            "{name} must be finite and > 0, got {v}"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Exponential approach rate in 1/s. The default settles to 1% in about 1.5s.
    pub responsiveness: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            responsiveness: responsiveness_for_settle(1.5, 0.01),
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> MotionResult<()> {
        check_responsiveness("scroll.responsiveness", self.responsiveness)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Exponential approach rate in 1/s; faster than scroll so the cursor feels attached.
    pub responsiveness: f64,
    /// Scale applied to the follower while over an interactive element.
    pub hover_scale: f64,
    /// Offset from the follower's top-left corner to the pointer tip.
    pub hotspot: Vec2,
    /// Timing of hover image reveals.
    pub reveal: RevealConfig,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            // 15% of the remaining distance per 60 Hz frame.
            responsiveness: -(0.85f64).ln() * 60.0,
            hover_scale: 2.5,
            hotspot: Vec2::new(10.0, 10.0),
            reveal: RevealConfig::default(),
        }
    }
}

impl PointerConfig {
    pub fn validate(&self) -> MotionResult<()> {
        check_responsiveness("pointer.responsiveness", self.responsiveness)?;
        if !self.hover_scale.is_finite() || self.hover_scale <= 0.0 {
            return Err(MotionError::validation(format!(
                "pointer.hover_scale must be finite and > 0, got {}",
                self.hover_scale
            )));
        }
        if !(self.hotspot.x.is_finite() && self.hotspot.y.is_finite()) {
            return Err(MotionError::validation("pointer.hotspot must be finite"));
        }
        self.reveal.validate()
    }
}

/// Hover image reveal: a clip wipe plus fade in on enter, and a shorter one out on leave.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub show_secs: f64,
    pub show_ease: Ease,
    pub hide_secs: f64,
    pub hide_ease: Ease,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            show_secs: 0.35,
            show_ease: Ease::OutQuad,
            hide_secs: 0.25,
            hide_ease: Ease::InQuad,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> MotionResult<()> {
        for (name, v) in [
            ("pointer.reveal.show_secs", self.show_secs),
            ("pointer.reveal.hide_secs", self.hide_secs),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(MotionError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Values new trigger registrations start from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TriggerDefaults {
    pub enter_threshold: f64,
    pub exit_threshold: f64,
    pub replay_policy: ReplayPolicy,
    pub duration_secs: f64,
    pub ease: Ease,
}

impl Default for TriggerDefaults {
    fn default() -> Self {
        Self {
            enter_threshold: 0.85,
            exit_threshold: 0.0,
            replay_policy: ReplayPolicy::PlayReversePlay,
            duration_secs: 0.8,
            ease: Ease::OutQuad,
        }
    }
}

impl TriggerDefaults {
    pub fn validate(&self) -> MotionResult<()> {
        check_fraction("triggers.enter_threshold", self.enter_threshold)?;
        check_fraction("triggers.exit_threshold", self.exit_threshold)?;
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(MotionError::validation(format!(
                "triggers.duration_secs must be finite and > 0, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }

    /// A registration for `target` carrying these defaults.
    pub fn spec(&self, target: ElementId, effect: TriggerEffect) -> TriggerSpec {
        TriggerSpec {
            target,
            enter_threshold: self.enter_threshold,
            exit_threshold: self.exit_threshold,
            replay_policy: self.replay_policy,
            effect,
            duration_secs: self.duration_secs,
            ease: self.ease,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
