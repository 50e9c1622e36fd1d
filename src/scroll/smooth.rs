use crate::clock::frame_clock::Tick;
use crate::foundation::core::{ScrollDirection, Viewport};
use crate::foundation::math::damp;
use crate::host::listeners::ListenerSet;
use crate::host::{EventKind, GlobalEffect, Host, ListenerTarget};

/// Below this distance (px) the virtual position snaps onto the raw one.
const SETTLE_EPSILON: f64 = 0.01;

/// The page's scroll position, raw and smoothed.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollState {
    /// Last physical scroll offset staged by input.
    pub raw_position: f64,
    /// Eased position every animation reads.
    pub virtual_position: f64,
    /// Virtual delta over the last tick.
    pub velocity: f64,
    /// Largest valid offset for the current document and viewport.
    pub limit: f64,
}

/// Scroll notification handed to every scroll-driven subsystem after each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFrame {
    pub previous: f64,
    pub current: f64,
    pub direction: ScrollDirection,
    pub viewport: Viewport,
    /// `true` when the viewport changed since the previous notification.
    pub resized: bool,
}

/// Turns discrete scroll input into a continuous, framerate-independent eased position.
#[derive(Debug)]
pub struct SmoothScroll {
    state: ScrollState,
    responsiveness: f64,
    viewport: Viewport,
    staged_viewport: Option<Viewport>,
    jump_pending: bool,
    listeners: ListenerSet,
}

impl SmoothScroll {
    /// Take over scrolling on `host`: listen for scroll input and suppress native jumps.
    pub fn install(host: &mut dyn Host, responsiveness: f64) -> Self {
        let viewport = host.viewport();
        let limit = viewport.scroll_limit(host.document_height());
        let start = host.native_scroll_offset().clamp(0.0, limit);

        let mut listeners = ListenerSet::new();
        listeners.attach(host, ListenerTarget::Window, EventKind::Wheel);
        listeners.attach(host, ListenerTarget::Window, EventKind::Scroll);
        listeners.attach(host, ListenerTarget::Window, EventKind::Resize);
        host.set_global_effect(GlobalEffect::NativeScrollOverride, true);

        tracing::debug!(start, limit, responsiveness, "smooth scroll installed");
        Self {
            state: ScrollState {
                raw_position: start,
                virtual_position: start,
                velocity: 0.0,
                limit,
            },
            responsiveness,
            viewport,
            staged_viewport: None,
            jump_pending: false,
            listeners,
        }
    }

    /// Native listeners held for scroll input.
    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// Raw and virtual position as of the last tick.
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Viewport the current position is clamped against.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Stage a wheel or touch delta.
    pub fn stage_delta(&mut self, delta: f64) {
        if delta.is_finite() {
            self.state.raw_position = (self.state.raw_position + delta).clamp(0.0, self.state.limit);
        }
    }

    /// Stage an absolute offset reported by the platform.
    pub fn stage_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.state.raw_position = offset.clamp(0.0, self.state.limit);
        }
    }

    /// Programmatic scroll. `immediate` skips the easing on the next tick.
    pub fn scroll_to(&mut self, position: f64, immediate: bool) {
        self.stage_offset(position);
        self.jump_pending |= immediate;
    }

    /// Stage a viewport change; the next tick re-clamps and reports `resized`.
    pub fn stage_resize(&mut self, viewport: Viewport) {
        self.staged_viewport = Some(viewport);
    }

    /// Advance the virtual position by one tick and render it on the host.
    pub fn advance(&mut self, tick: &Tick, host: &mut dyn Host) -> ScrollFrame {
        let resized = match self.staged_viewport.take() {
            Some(vp) => {
                self.viewport = vp;
                true
            }
            None => false,
        };
        self.state.limit = self.viewport.scroll_limit(host.document_height());
        self.state.raw_position = self.state.raw_position.clamp(0.0, self.state.limit);

        let previous = self.state.virtual_position;
        let mut next = if self.jump_pending {
            self.jump_pending = false;
            self.state.raw_position
        } else {
            damp(
                previous,
                self.state.raw_position,
                self.responsiveness,
                tick.dt_secs(),
            )
        };
        if (self.state.raw_position - next).abs() < SETTLE_EPSILON {
            next = self.state.raw_position;
        }
        next = next.clamp(0.0, self.state.limit);

        self.state.virtual_position = next;
        self.state.velocity = next - previous;
        host.apply_scroll(next);

        ScrollFrame {
            previous,
            current: next,
            direction: ScrollDirection::between(previous, next),
            viewport: self.viewport,
            resized,
        }
    }

    /// Detach every scroll listener. Returns how many were removed.
    pub fn detach_listeners(&mut self, host: &mut dyn Host) -> usize {
        self.listeners.detach_all(host)
    }

    /// Give native scrolling back to the host.
    pub fn restore_globals(&mut self, host: &mut dyn Host) {
        host.set_global_effect(GlobalEffect::NativeScrollOverride, false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
