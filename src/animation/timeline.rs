use crate::animation::ease::Ease;
use crate::animation::style::Style;
use crate::foundation::core::ElementId;
use crate::foundation::error::{MotionError, MotionResult};

/// Where a step starts relative to what is already on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Placement {
    /// Right after the previous step ends.
    AfterPrevious,
    /// Relative to the previous step's end; negative values overlap (`"-=1.2"`).
    OffsetFromPreviousEnd(f64),
    /// At an absolute time from the timeline start.
    At(f64),
}

/// One property change on one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepSpec {
    pub target: ElementId,
    pub from: Style,
    pub to: Style,
    pub duration_secs: f64,
    #[serde(default)]
    pub ease: Ease,
}

#[derive(Clone, Debug)]
struct ResolvedStep {
    spec: StepSpec,
    start_secs: f64,
}

impl ResolvedStep {
    fn end_secs(&self) -> f64 {
        self.start_secs + self.spec.duration_secs
    }
}

/// A fixed sequence of tweens sampled against elapsed time.
///
/// Steps may overlap. Sampling emits styles in insertion order so a later step on the same
/// element wins once it has started.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    delay_secs: f64,
    steps: Vec<ResolvedStep>,
}

impl Timeline {
    pub fn new(delay_secs: f64) -> Self {
        Self {
            delay_secs: delay_secs.max(0.0),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, spec: StepSpec, placement: Placement) -> MotionResult<&mut Self> {
        if !spec.duration_secs.is_finite() || spec.duration_secs <= 0.0 {
            return Err(MotionError::validation(format!(
                "timeline step for {} needs a positive duration",
                spec.target
            )));
        }
        let prev_end = self.steps.last().map(ResolvedStep::end_secs).unwrap_or(0.0);
        let start_secs = match placement {
            Placement::AfterPrevious => prev_end,
            Placement::OffsetFromPreviousEnd(off) => prev_end + off,
            Placement::At(t) => t,
        }
        .max(0.0);
        self.steps.push(ResolvedStep { spec, start_secs });
        Ok(self)
    }

    /// `template` applied to each target, each starting `each_secs` after the one before.
    /// The template's own `target` is ignored.
    pub fn stagger(
        &mut self,
        targets: &[ElementId],
        template: &StepSpec,
        each_secs: f64,
        placement: Placement,
    ) -> MotionResult<&mut Self> {
        for (i, &target) in targets.iter().enumerate() {
            let spec = StepSpec {
                target,
                ..template.clone()
            };
            let placement = if i == 0 {
                placement
            } else {
                let first = self.steps.len() - i;
                Placement::At(self.steps[first].start_secs + each_secs * i as f64)
            };
            self.push(spec, placement)?;
        }
        Ok(self)
    }

    /// Total length including the initial delay.
    pub fn duration_secs(&self) -> f64 {
        self.delay_secs
            + self
                .steps
                .iter()
                .map(ResolvedStep::end_secs)
                .fold(0.0, f64::max)
    }

    pub fn is_finished(&self, elapsed_secs: f64) -> bool {
        elapsed_secs >= self.duration_secs()
    }

    /// Styles for every element touched by the timeline at `elapsed_secs`.
    ///
    /// Steps that have not started yet still render their `from` state when they are the first
    /// step for their element, so nothing flashes before the timeline reaches it.
    pub fn sample(&self, elapsed_secs: f64) -> Vec<(ElementId, Style)> {
        let local = elapsed_secs - self.delay_secs;
        let mut out: Vec<(ElementId, Style)> = Vec::with_capacity(self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            let started = local >= step.start_secs;
            let first_for_target = !self.steps[..i]
                .iter()
                .any(|s| s.spec.target == step.spec.target);
            if !started && !first_for_target {
                continue;
            }
            let t = ((local - step.start_secs) / step.spec.duration_secs).clamp(0.0, 1.0);
            let style = Style::lerp(&step.spec.from, &step.spec.to, step.spec.ease.apply(t));
            out.push((step.spec.target, style));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
