use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::animation::scramble::scramble;
use crate::animation::style::Style;
use crate::animation::tween::Tween;
use crate::foundation::core::{ElementId, Rect, Viewport, check_fraction, to_document_space};
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::Host;

/// Whether leaving the trigger zone resets an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReplayPolicy {
    /// Plays once; `Played` is terminal.
    PlayOnce,
    /// Plays on entry, reverses on exit, plays again on re-entry.
    #[default]
    PlayReversePlay,
    /// Plays on entry and stays played past the zone end; reverses only when scrolled back
    /// above the zone start.
    PlayReverseOnLeaveBack,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TriggerState {
    #[default]
    Idle,
    Played,
    Reversed,
}

/// A zone boundary crossed between two scroll positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Crossing {
    /// Scrolling forward past the zone start.
    Enter,
    /// Scrolling forward past the zone end.
    Leave,
    /// Scrolling backward past the zone end.
    EnterBack,
    /// Scrolling backward past the zone start.
    LeaveBack,
}

impl Crossing {
    pub fn is_entry(self) -> bool {
        matches!(self, Self::Enter | Self::EnterBack)
    }
}

/// What a state transition asks of the element's animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TriggerAction {
    Play,
    Reverse,
}

/// The animation an element plays when it enters its trigger zone.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerEffect {
    /// Interpolate between two styles with the element's ease.
    Style { from: Style, to: Style },
    /// Reveal `text` left to right through scrambled glyphs.
    Scramble {
        text: String,
        #[serde(default)]
        seed: u64,
    },
}

/// Registration record for one scroll-triggered element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    pub target: ElementId,
    /// Viewport line the element's top must reach to enter (0 = top, 1 = bottom).
    pub enter_threshold: f64,
    /// Viewport line the element's bottom must pass to leave.
    pub exit_threshold: f64,
    pub replay_policy: ReplayPolicy,
    pub effect: TriggerEffect,
    pub duration_secs: f64,
    pub ease: Ease,
}

impl TriggerSpec {
    pub fn validate(&self) -> MotionResult<()> {
        check_fraction("enter_threshold", self.enter_threshold)?;
        check_fraction("exit_threshold", self.exit_threshold)?;
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(MotionError::validation(format!(
                "trigger duration must be finite and > 0, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }
}

/// An element's trigger zone expressed in virtual scroll space.
///
/// The element is in the zone for scroll positions in `[start, end)`: from when its top reaches
/// the enter line until its bottom passes the exit line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerZone {
    pub start: f64,
    pub end: f64,
}

impl TriggerZone {
    /// `document_rect` is the element's rectangle in document coordinates.
    pub fn measure(document_rect: Rect, viewport: Viewport, enter: f64, exit: f64) -> Self {
        let start = document_rect.y0 - viewport.line_at(enter);
        let end = (document_rect.y1 - viewport.line_at(exit)).max(start);
        Self { start, end }
    }

    pub fn contains(self, position: f64) -> bool {
        self.start <= position && position < self.end
    }

    /// Every boundary crossed moving from `from` to `to`, in the order they were crossed.
    pub fn crossings(self, from: f64, to: f64) -> SmallVec<[Crossing; 2]> {
        let mut out = SmallVec::new();
        if to > from {
            if from < self.start && self.start <= to {
                out.push(Crossing::Enter);
            }
            if from < self.end && self.end <= to {
                out.push(Crossing::Leave);
            }
        } else if to < from {
            if to < self.end && self.end <= from {
                out.push(Crossing::EnterBack);
            }
            if to < self.start && self.start <= from {
                out.push(Crossing::LeaveBack);
            }
        }
        out
    }
}

/// Runtime state for one registered element.
#[derive(Clone, Debug)]
pub struct AnimatableElement {
    spec: TriggerSpec,
    state: TriggerState,
    tween: Tween,
    /// Scroll position of the last successful evaluation.
    last_scroll: Option<f64>,
}

impl AnimatableElement {
    pub fn new(spec: TriggerSpec) -> MotionResult<Self> {
        spec.validate()?;
        let tween = Tween::new(spec.duration_secs, spec.ease)?;
        Ok(Self {
            spec,
            state: TriggerState::Idle,
            tween,
            last_scroll: None,
        })
    }

    pub fn id(&self) -> ElementId {
        self.spec.target
    }

    pub fn spec(&self) -> &TriggerSpec {
        &self.spec
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Measure the element against the scroll position `to` and list the crossings since the
    /// last successful evaluation. A failed measurement leaves the last position untouched so
    /// the next evaluation still sees every crossing.
    pub fn crossings(
        &mut self,
        to: f64,
        viewport: Viewport,
        host: &dyn Host,
    ) -> MotionResult<SmallVec<[Crossing; 2]>> {
        let bounds = host.element_bounds(self.spec.target)?;
        let document_rect = to_document_space(bounds, to);
        let zone = TriggerZone::measure(
            document_rect,
            viewport,
            self.spec.enter_threshold,
            self.spec.exit_threshold,
        );
        let from = self.last_scroll.unwrap_or(f64::NEG_INFINITY);
        self.last_scroll = Some(to);
        Ok(zone.crossings(from, to))
    }

    /// Apply one crossing to the state machine. Returns the action taken, if any.
    pub fn apply(&mut self, crossing: Crossing) -> Option<TriggerAction> {
        let next = next_state(self.state, crossing, self.spec.replay_policy)?;
        self.state = next;
        let action = match next {
            TriggerState::Played => {
                self.tween.play();
                TriggerAction::Play
            }
            TriggerState::Reversed | TriggerState::Idle => {
                self.tween.reverse();
                TriggerAction::Reverse
            }
        };
        Some(action)
    }

    /// Advance the effect by `dt_secs` and write it when it moved.
    pub fn advance(&mut self, dt_secs: f64, frame: u64, host: &mut dyn Host) -> MotionResult<()> {
        if self.tween.advance(dt_secs) {
            self.render(frame, host)?;
        }
        Ok(())
    }

    /// Write the effect at its current progress.
    pub fn render(&self, frame: u64, host: &mut dyn Host) -> MotionResult<()> {
        match &self.spec.effect {
            TriggerEffect::Style { from, to } => {
                host.write_style(self.spec.target, &Style::lerp(from, to, self.tween.progress()))
            }
            TriggerEffect::Scramble { text, seed } => host.write_text(
                self.spec.target,
                &scramble(text, self.tween.linear_progress(), seed ^ frame),
            ),
        }
    }
}

/// Pure transition function of the trigger state machine.
pub fn next_state(
    state: TriggerState,
    crossing: Crossing,
    policy: ReplayPolicy,
) -> Option<TriggerState> {
    match (state, crossing, policy) {
        (TriggerState::Idle | TriggerState::Reversed, c, _) if c.is_entry() => {
            Some(TriggerState::Played)
        }
        (TriggerState::Played, Crossing::Leave | Crossing::LeaveBack, ReplayPolicy::PlayReversePlay)
        | (TriggerState::Played, Crossing::LeaveBack, ReplayPolicy::PlayReverseOnLeaveBack) => {
            Some(TriggerState::Reversed)
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/element.rs"]
mod tests;
