//! Page lifecycle: the single context object that owns the frame clock and every subsystem.
//!
//! [`Page::mount`] decides once whether motion is allowed, installs the subsystems, and
//! registers one tick callback per subsystem in update order:
//!
//! 1. smooth scroll, which then notifies triggers and scrub regions of the new position,
//! 2. trigger effects,
//! 3. time-driven timelines and marquees,
//! 4. the pointer follower.
//!
//! [`Page::unmount`] reverses it: tick callbacks off, listeners off, global effects restored.

use std::time::Duration;

use crate::animation::marquee::Marquee;
use crate::animation::runner::AnimationRunner;
use crate::animation::timeline::Timeline;
use crate::clock::frame_clock::{FrameClock, Tick, TickId};
use crate::config::MotionConfig;
use crate::foundation::core::ElementId;
use crate::foundation::error::MotionResult;
use crate::host::{Host, HostEvent, MediaFeature};
use crate::pointer::controller::PointerController;
use crate::scroll::scrub::{ScrubController, ScrubId, ScrubRegion, ScrubSpec};
use crate::scroll::smooth::{ScrollState, SmoothScroll};
use crate::trigger::controller::{TriggerController, TriggerId, TriggerTransition};
use crate::trigger::element::{TriggerSpec, TriggerState};

/// Whether the page animates at all. Decided once at mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum MotionGate {
    Enabled,
    /// Reduced motion requested: nothing is installed and registrations are ignored.
    ReducedMotion,
}

/// Frame context handed to every tick callback.
#[derive(Debug)]
pub struct Stage<H> {
    host: H,
    scroll: Option<SmoothScroll>,
    triggers: Option<TriggerController>,
    scrubs: Option<ScrubController>,
    runner: Option<AnimationRunner>,
    pointer: Option<PointerController>,
}

impl<H: Host> Stage<H> {
    fn bare(host: H) -> Self {
        Self {
            host,
            scroll: None,
            triggers: None,
            scrubs: None,
            runner: None,
            pointer: None,
        }
    }

    fn scroll_tick(&mut self, tick: &Tick) -> MotionResult<()> {
        let Some(scroll) = self.scroll.as_mut() else {
            return Ok(());
        };
        let frame = scroll.advance(tick, &mut self.host);
        if let Some(triggers) = self.triggers.as_mut() {
            triggers.on_scroll(&frame, &mut self.host);
        }
        if let Some(scrubs) = self.scrubs.as_mut() {
            scrubs.on_scroll(&frame, &mut self.host);
        }
        Ok(())
    }

    fn triggers_tick(&mut self, tick: &Tick) -> MotionResult<()> {
        match self.triggers.as_mut() {
            Some(t) => t.tick(tick, &mut self.host),
            None => Ok(()),
        }
    }

    fn runner_tick(&mut self, tick: &Tick) -> MotionResult<()> {
        match self.runner.as_mut() {
            Some(r) => r.tick(tick, &mut self.host),
            None => Ok(()),
        }
    }

    fn pointer_tick(&mut self, tick: &Tick) -> MotionResult<()> {
        match self.pointer.as_mut() {
            Some(p) => p.tick(tick, &mut self.host),
            None => Ok(()),
        }
    }
}

/// A mounted page.
pub struct Page<H: Host + 'static> {
    clock: FrameClock<Stage<H>>,
    stage: Stage<H>,
    gate: MotionGate,
    config: MotionConfig,
    ticks: Vec<TickId>,
}

impl<H: Host + 'static> Page<H> {
    #[tracing::instrument(skip(host))]
    pub fn mount(mut host: H, config: MotionConfig) -> MotionResult<Self> {
        config.validate()?;
        let reduced = config
            .reduced_motion
            .unwrap_or_else(|| host.matches_media(MediaFeature::PrefersReducedMotion));
        let mut clock = FrameClock::new(config.max_delta());

        if reduced {
            tracing::info!("reduced motion requested, page mounted static");
            return Ok(Self {
                clock,
                stage: Stage::bare(host),
                gate: MotionGate::ReducedMotion,
                config,
                ticks: Vec::new(),
            });
        }

        let scroll = SmoothScroll::install(&mut host, config.scroll.responsiveness);
        let triggers = TriggerController::install(&mut host);
        let pointer = if host.matches_media(MediaFeature::HoverNone) {
            tracing::debug!("touch-only device, pointer follower disabled");
            None
        } else {
            Some(PointerController::install(&mut host, &config.pointer))
        };

        let mut ticks = vec![
            clock.on_tick(|t, s: &mut Stage<H>| s.scroll_tick(t)),
            clock.on_tick(|t, s: &mut Stage<H>| s.triggers_tick(t)),
            clock.on_tick(|t, s: &mut Stage<H>| s.runner_tick(t)),
        ];
        if pointer.is_some() {
            ticks.push(clock.on_tick(|t, s: &mut Stage<H>| s.pointer_tick(t)));
        }
        clock.start();

        tracing::debug!(callbacks = ticks.len(), "page mounted");
        Ok(Self {
            clock,
            stage: Stage {
                host,
                scroll: Some(scroll),
                triggers: Some(triggers),
                scrubs: Some(ScrubController::new()),
                runner: Some(AnimationRunner::new()),
                pointer,
            },
            gate: MotionGate::Enabled,
            config,
            ticks,
        })
    }

    /// Whether motion was enabled at mount, and why not if it wasn't.
    pub fn gate(&self) -> MotionGate {
        self.gate
    }

    pub fn is_enabled(&self) -> bool {
        self.gate == MotionGate::Enabled
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// The host this page renders to.
    pub fn host(&self) -> &H {
        &self.stage.host
    }

    /// Mutable host access, for embedders that change the document between frames.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.stage.host
    }

    /// The shared frame clock driving every subsystem.
    pub fn clock(&self) -> &FrameClock<Stage<H>> {
        &self.clock
    }

    /// Drive one display refresh at host time `now`.
    pub fn frame(&mut self, now: Duration) -> Option<Tick> {
        self.clock.frame(now, &mut self.stage)
    }

    /// Stage native input for the next tick. Events no subsystem listens for are ignored.
    pub fn dispatch(&mut self, event: HostEvent) {
        let (kind, target) = (event.kind(), event.target());
        let stage = &mut self.stage;
        let scroll = stage
            .scroll
            .as_mut()
            .filter(|s| s.listeners().hears(kind, target));
        let pointer = stage.pointer.as_mut().filter(|p| p.hears(kind, target));
        let triggers = stage
            .triggers
            .as_mut()
            .filter(|t| t.listeners().hears(kind, target));

        match event {
            HostEvent::Wheel { delta } => {
                if let Some(s) = scroll {
                    s.stage_delta(delta);
                }
            }
            HostEvent::NativeScroll { offset } => {
                if let Some(s) = scroll {
                    s.stage_offset(offset);
                }
            }
            HostEvent::ScrollTo {
                position,
                immediate,
            } => {
                if let Some(s) = scroll {
                    s.scroll_to(position, immediate);
                }
            }
            HostEvent::Resize { viewport } => {
                if let Some(s) = scroll {
                    s.stage_resize(viewport);
                }
            }
            HostEvent::PointerMove { position } => {
                if let Some(p) = pointer {
                    p.stage_move(position);
                }
            }
            HostEvent::PointerEnter { element } => {
                if let Some(p) = pointer {
                    p.pointer_enter(element);
                }
            }
            HostEvent::PointerLeave { element } => {
                if let Some(p) = pointer {
                    p.pointer_leave(element);
                }
            }
            HostEvent::Mutation { added, removed } => {
                // Scrub regions ride on the trigger controller's mutation subscription.
                if let Some(t) = triggers {
                    t.stage_removed(&removed);
                    if let Some(s) = stage.scrubs.as_mut() {
                        s.stage_removed(&removed);
                    }
                }
                if let Some(p) = pointer {
                    p.on_mutation(&added, &removed, &mut stage.host);
                }
            }
        }
    }

    /// Register a scroll-triggered element. `Ok(None)` when motion is disabled.
    pub fn register_trigger(&mut self, spec: TriggerSpec) -> MotionResult<Option<TriggerId>> {
        match self.stage.triggers.as_mut() {
            Some(t) => t.register(spec, &mut self.stage.host).map(Some),
            None => Ok(None),
        }
    }

    /// Stop tracking a trigger. `false` when `id` is unknown or motion is disabled.
    pub fn unregister_trigger(&mut self, id: TriggerId) -> bool {
        self.stage
            .triggers
            .as_mut()
            .is_some_and(|t| t.unregister(id))
    }

    /// `None` for unknown, removed, or gated-off triggers.
    pub fn trigger_state(&self, id: TriggerId) -> Option<TriggerState> {
        self.stage.triggers.as_ref().and_then(|t| t.state(id))
    }

    /// Trigger transitions since the last call.
    pub fn take_transitions(&mut self) -> Vec<TriggerTransition> {
        self.stage
            .triggers
            .as_mut()
            .map(TriggerController::take_transitions)
            .unwrap_or_default()
    }

    /// Add a pinned or parallax scrub region. `Ok(None)` when motion is disabled.
    pub fn add_scrub(&mut self, spec: ScrubSpec) -> MotionResult<Option<ScrubId>> {
        match self.stage.scrubs.as_mut() {
            Some(s) => s.add(spec).map(Some),
            None => Ok(None),
        }
    }

    /// `None` for unknown ids and once the region's section or pin has left the document.
    pub fn scrub(&self, id: ScrubId) -> Option<&ScrubRegion> {
        self.stage.scrubs.as_ref().and_then(|s| s.get(id))
    }

    /// Render `element` as the pointer follower. `Ok(false)` when the follower is disabled.
    pub fn enable_cursor(&mut self, element: ElementId) -> MotionResult<bool> {
        match self.stage.pointer.as_mut() {
            Some(p) => p.enable_cursor(element, &mut self.stage.host).map(|()| true),
            None => Ok(false),
        }
    }

    /// Re-scramble `text` on `element` each time the pointer enters it. `false` when motion is gated off.
    pub fn add_hover_scramble(
        &mut self,
        element: ElementId,
        text: impl Into<String>,
    ) -> MotionResult<bool> {
        match self.stage.pointer.as_mut() {
            Some(p) => p
                .add_hover_scramble(element, text, &mut self.stage.host)
                .map(|()| true),
            None => Ok(false),
        }
    }

    /// Wipe `image` in while the pointer is over `trigger`. `false` when motion is gated off.
    pub fn add_hover_reveal(&mut self, trigger: ElementId, image: ElementId) -> MotionResult<bool> {
        match self.stage.pointer.as_mut() {
            Some(p) => p
                .add_hover_reveal(trigger, image, &mut self.stage.host)
                .map(|()| true),
            None => Ok(false),
        }
    }

    /// Scroll `target` horizontally by half its width every `period_secs`, looping. `false`
    /// when motion is gated off.
    pub fn add_marquee(&mut self, target: ElementId, period_secs: f64) -> MotionResult<bool> {
        let marquee = Marquee::new(target, period_secs)?;
        Ok(match self.stage.runner.as_mut() {
            Some(r) => {
                r.add_marquee(marquee);
                true
            }
            None => false,
        })
    }

    /// Play an intro timeline from its first frame. `false` when motion is gated off.
    pub fn add_timeline(&mut self, timeline: Timeline) -> bool {
        match self.stage.runner.as_mut() {
            Some(r) => {
                r.add_timeline(timeline, &mut self.stage.host);
                true
            }
            None => false,
        }
    }

    /// Smooth scroll position, or `None` when motion is disabled.
    pub fn scroll_state(&self) -> Option<ScrollState> {
        self.stage.scroll.as_ref().map(|s| *s.state())
    }

    pub fn pointer(&self) -> Option<&PointerController> {
        self.stage.pointer.as_ref()
    }

    /// Native listeners currently held by every subsystem.
    pub fn listener_count(&self) -> usize {
        let s = &self.stage;
        s.scroll.as_ref().map_or(0, |x| x.listeners().len())
            + s.triggers.as_ref().map_or(0, |x| x.listeners().len())
            + s.pointer.as_ref().map_or(0, PointerController::listener_count)
    }

    /// Tear every subsystem down: tick callbacks off, then native listeners off, then global
    /// effects restored. Idempotent; the page stays usable as a static page afterwards.
    pub fn teardown(&mut self) {
        for id in self.ticks.drain(..) {
            self.clock.off_tick(id);
        }
        self.clock.stop();

        let stage = &mut self.stage;
        let mut scroll = stage.scroll.take();
        let mut triggers = stage.triggers.take();
        let mut pointer = stage.pointer.take();
        stage.scrubs = None;
        stage.runner = None;

        let mut detached = 0;
        if let Some(s) = scroll.as_mut() {
            detached += s.detach_listeners(&mut stage.host);
        }
        if let Some(t) = triggers.as_mut() {
            detached += t.detach_listeners(&mut stage.host);
        }
        if let Some(p) = pointer.as_mut() {
            detached += p.detach_listeners(&mut stage.host);
        }

        if let Some(s) = scroll.as_mut() {
            s.restore_globals(&mut stage.host);
        }
        if let Some(p) = pointer.as_mut() {
            p.restore_globals(&mut stage.host);
        }
        tracing::debug!(detached, "page torn down");
    }

    /// Tear the page down and hand the host back.
    pub fn unmount(mut self) -> H {
        self.teardown();
        self.stage.host
    }
}

impl<H: Host + 'static> std::fmt::Debug for Page<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("gate", &self.gate)
            .field("clock", &self.clock)
            .field("ticks", &self.ticks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/page.rs"]
mod tests;
