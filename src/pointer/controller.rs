use crate::clock::frame_clock::Tick;
use crate::config::{PointerConfig, RevealConfig};
use crate::foundation::core::{ElementId, Point};
use crate::foundation::error::MotionResult;
use crate::host::listeners::ListenerSet;
use crate::host::{EventKind, GlobalEffect, Host, ListenerTarget};
use crate::pointer::follower::PointerFollower;
use crate::pointer::hover::HoverRegistry;

/// Smooths the pointer for a follower visual and tracks hover over interactive elements.
#[derive(Debug)]
pub struct PointerController {
    follower: PointerFollower,
    cursor: Option<ElementId>,
    cursor_hidden: bool,
    hover: HoverRegistry,
    reveal: RevealConfig,
    listeners: ListenerSet,
}

impl PointerController {
    /// Listen for pointer movement and document mutations, and track the interactive elements
    /// already present.
    pub fn install(host: &mut dyn Host, config: &PointerConfig) -> Self {
        let mut listeners = ListenerSet::new();
        listeners.attach(host, ListenerTarget::Window, EventKind::PointerMove);
        listeners.attach(host, ListenerTarget::Document, EventKind::Mutation);
        let mut hover = HoverRegistry::new();
        hover.scan(host);
        Self {
            follower: PointerFollower::new(
                config.responsiveness,
                config.hover_scale,
                config.hotspot,
            ),
            cursor: None,
            cursor_hidden: false,
            hover,
            reveal: config.reveal.clone(),
            listeners,
        }
    }

    pub fn follower(&self) -> &PointerFollower {
        &self.follower
    }

    pub fn hover(&self) -> &HoverRegistry {
        &self.hover
    }

    pub fn cursor(&self) -> Option<ElementId> {
        self.cursor
    }

    /// `true` when an event of `kind` at `target` is one this controller listens for.
    pub fn hears(&self, kind: EventKind, target: ListenerTarget) -> bool {
        self.listeners.hears(kind, target) || self.hover.listeners().hears(kind, target)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len() + self.hover.listeners().len()
    }

    /// Render `element` as the follower and hide the native cursor.
    pub fn enable_cursor(&mut self, element: ElementId, host: &mut dyn Host) -> MotionResult<()> {
        host.write_style(element, &self.follower.style())?;
        self.cursor = Some(element);
        if !self.cursor_hidden {
            host.set_global_effect(GlobalEffect::NativeCursorHidden, true);
            self.cursor_hidden = true;
        }
        Ok(())
    }

    /// Re-scramble `text` on `element` each time the pointer enters it.
    pub fn add_hover_scramble(
        &mut self,
        element: ElementId,
        text: impl Into<String>,
        host: &mut dyn Host,
    ) -> MotionResult<()> {
        self.hover.add_scramble(element, text, host)
    }

    /// Reveal `image` while the pointer is over `trigger`, using the configured timing.
    pub fn add_hover_reveal(
        &mut self,
        trigger: ElementId,
        image: ElementId,
        host: &mut dyn Host,
    ) -> MotionResult<()> {
        self.hover.add_reveal(trigger, image, &self.reveal, host)
    }

    /// Stage the latest pointer position; the follower chases it on the next tick.
    pub fn stage_move(&mut self, position: Point) {
        self.follower.stage_target(position);
    }

    pub fn pointer_enter(&mut self, element: ElementId) {
        self.hover.pointer_enter(element);
    }

    pub fn pointer_leave(&mut self, element: ElementId) {
        self.hover.pointer_leave(element);
    }

    pub fn on_mutation(&mut self, added: &[ElementId], removed: &[ElementId], host: &mut dyn Host) {
        self.hover.on_mutation(added, removed, host);
        if self.cursor.is_some_and(|c| removed.contains(&c)) {
            tracing::debug!("cursor element removed");
            self.cursor = None;
        }
    }

    /// Advance the follower, render it, then advance hover effects.
    pub fn tick(&mut self, tick: &Tick, host: &mut dyn Host) -> MotionResult<()> {
        self.follower.set_hovering(self.hover.is_hovering());
        self.follower.advance(tick.dt_secs());
        if let Some(cursor) = self.cursor
            && let Err(e) = host.write_style(cursor, &self.follower.style())
        {
            tracing::warn!(%cursor, "cursor dropped: {e}");
            self.cursor = None;
        }
        self.hover.advance(tick.dt_secs(), tick.frame, host);
        Ok(())
    }

    /// Detach the pointer listeners and every per-element hover listener.
    pub fn detach_listeners(&mut self, host: &mut dyn Host) -> usize {
        self.listeners.detach_all(host) + self.hover.detach_all(host)
    }

    /// Show the native cursor again if it was hidden.
    pub fn restore_globals(&mut self, host: &mut dyn Host) {
        if std::mem::take(&mut self.cursor_hidden) {
            host.set_global_effect(GlobalEffect::NativeCursorHidden, false);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/controller.rs"]
mod tests;
