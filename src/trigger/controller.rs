use crate::clock::frame_clock::Tick;
use crate::foundation::core::ElementId;
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::listeners::ListenerSet;
use crate::host::{EventKind, Host, ListenerTarget};
use crate::scroll::smooth::ScrollFrame;
use crate::trigger::element::{
    AnimatableElement, Crossing, TriggerAction, TriggerSpec, TriggerState,
};

/// Handle returned by [`TriggerController::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TriggerId(pub u64);

/// One state change, recorded for inspection and tracing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TriggerTransition {
    pub id: TriggerId,
    pub target: ElementId,
    pub crossing: Crossing,
    pub from: TriggerState,
    pub to: TriggerState,
    pub action: TriggerAction,
    /// Virtual scroll position that caused the transition.
    pub position: f64,
}

/// Owns the enter/exit state machine of every scroll-triggered element.
///
/// Crossings are evaluated on each scroll notification, in registration order. Effects advance
/// on the controller's own tick.
#[derive(Debug)]
pub struct TriggerController {
    elements: Vec<(TriggerId, AnimatableElement)>,
    next_id: u64,
    staged_removals: Vec<ElementId>,
    transitions: Vec<TriggerTransition>,
    listeners: ListenerSet,
}

impl TriggerController {
    /// Subscribe to document mutations so removed elements can be dropped.
    pub fn install(host: &mut dyn Host) -> Self {
        let mut listeners = ListenerSet::new();
        listeners.attach(host, ListenerTarget::Document, EventKind::Mutation);
        Self {
            elements: Vec::new(),
            next_id: 0,
            staged_removals: Vec::new(),
            transitions: Vec::new(),
            listeners,
        }
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// Register an element. It starts `Idle` with its effect written at progress 0.
    pub fn register(&mut self, spec: TriggerSpec, host: &mut dyn Host) -> MotionResult<TriggerId> {
        let element = AnimatableElement::new(spec)?;
        element.render(0, host)?;
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        tracing::debug!(?id, target = %element.id(), "trigger registered");
        self.elements.push((id, element));
        Ok(id)
    }

    /// Drop an element, mid-animation or not. Returns `false` when `id` is unknown.
    pub fn unregister(&mut self, id: TriggerId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|(i, _)| *i != id);
        before != self.elements.len()
    }

    pub fn state(&self, id: TriggerId) -> Option<TriggerState> {
        self.element(id).map(AnimatableElement::state)
    }

    pub fn element(&self, id: TriggerId) -> Option<&AnimatableElement> {
        self.elements.iter().find(|(i, _)| *i == id).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Stage elements the host reported as removed; they are dropped on the next update.
    pub fn stage_removed(&mut self, removed: &[ElementId]) {
        self.staged_removals.extend_from_slice(removed);
    }

    /// Transitions recorded since the last call.
    pub fn take_transitions(&mut self) -> Vec<TriggerTransition> {
        std::mem::take(&mut self.transitions)
    }

    fn drop_staged(&mut self) {
        if self.staged_removals.is_empty() {
            return;
        }
        let removed = std::mem::take(&mut self.staged_removals);
        self.elements.retain(|(id, e)| {
            let keep = !removed.contains(&e.id());
            if !keep {
                tracing::debug!(?id, target = %e.id(), "trigger target removed");
            }
            keep
        });
    }

    /// Evaluate every element's crossings for the scroll position in `frame`.
    pub fn on_scroll(&mut self, frame: &ScrollFrame, host: &mut dyn Host) {
        self.drop_staged();
        let position = frame.current;
        let transitions = &mut self.transitions;
        self.elements.retain_mut(|(id, element)| {
            let crossings = match element.crossings(position, frame.viewport, host) {
                Ok(c) => c,
                Err(MotionError::MissingTarget(target)) => {
                    tracing::debug!(?id, %target, "trigger target missing, dropped");
                    return false;
                }
                Err(e) => {
                    tracing::warn!(?id, "trigger skipped this frame: {e}");
                    return true;
                }
            };
            for crossing in crossings {
                let from = element.state();
                if let Some(action) = element.apply(crossing) {
                    let t = TriggerTransition {
                        id: *id,
                        target: element.id(),
                        crossing,
                        from,
                        to: element.state(),
                        action,
                        position,
                    };
                    tracing::debug!(
                        id = ?t.id,
                        crossing = ?t.crossing,
                        from = ?t.from,
                        to = ?t.to,
                        position,
                        "trigger transition"
                    );
                    transitions.push(t);
                }
            }
            true
        });
    }

    /// Advance every effect by one tick.
    pub fn tick(&mut self, tick: &Tick, host: &mut dyn Host) -> MotionResult<()> {
        self.drop_staged();
        let dt = tick.dt_secs();
        self.elements.retain_mut(|(id, element)| {
            match element.advance(dt, tick.frame, host) {
                Ok(()) => true,
                Err(e) if e.is_missing_target() => {
                    tracing::debug!(?id, "trigger target missing, dropped");
                    false
                }
                Err(e) => {
                    tracing::warn!(?id, "trigger render failed: {e}");
                    true
                }
            }
        });
        Ok(())
    }

    /// Detach the mutation listener. Returns how many were removed.
    pub fn detach_listeners(&mut self, host: &mut dyn Host) -> usize {
        self.listeners.detach_all(host)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/controller.rs"]
mod tests;
