//! Folio-motion is a scroll-synchronized animation engine for single-page sites.
//!
//! One [`Page`] owns a shared [`FrameClock`] and the subsystems it drives each frame:
//!
//! - [`SmoothScroll`] eases native scroll input into a virtual scroll position,
//! - [`TriggerController`] plays and reverses entrance effects as elements cross their zones,
//! - [`ScrubController`] pins sections and scrubs styles directly from scroll progress,
//! - [`PointerController`] smooths a cursor follower and tracks hover over interactive elements.
//!
//! Everything the engine reads or writes goes through the [`Host`] trait; [`MockHost`] is an
//! in-memory implementation used by tests and the `folio-motion` CLI.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod clock;
pub(crate) mod host;
pub(crate) mod page;
pub(crate) mod pointer;
pub(crate) mod scroll;
pub(crate) mod trigger;

/// Accessibility helpers.
pub mod a11y;
/// Engine configuration.
pub mod config;
/// Scripted simulation against [`MockHost`].
pub mod scene;

pub use crate::foundation::core::{
    ElementId, ListenerId, Point, Rect, ScrollDirection, Vec2, Viewport,
};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::marquee::Marquee;
pub use crate::animation::runner::AnimationRunner;
pub use crate::animation::scramble::{SCRAMBLE_GLYPHS, hover_reveal_secs, scramble};
pub use crate::animation::style::Style;
pub use crate::animation::timeline::{Placement, StepSpec, Timeline};
pub use crate::animation::tween::{Tween, TweenDirection};
pub use crate::clock::frame_clock::{FrameClock, Tick, TickId};
pub use crate::config::{
    MotionConfig, PointerConfig, RevealConfig, ScrollConfig, TriggerDefaults,
};
pub use crate::host::listeners::ListenerSet;
pub use crate::host::mock::{HostWrite, MockElement, MockHost};
pub use crate::host::{
    ElementInfo, EventKind, GlobalEffect, Host, HostEvent, ListenerTarget, MediaFeature, PinLayout,
};
pub use crate::page::{MotionGate, Page, Stage};
pub use crate::pointer::controller::PointerController;
pub use crate::pointer::follower::PointerFollower;
pub use crate::pointer::hover::{
    HoverEdge, HoverRegistry, HoverReveal, HoverScramble, is_interactive,
};
pub use crate::scroll::scrub::{
    ScrollRange, ScrubBinding, ScrubController, ScrubId, ScrubPhase, ScrubRegion, ScrubSpec,
};
pub use crate::scroll::smooth::{ScrollFrame, ScrollState, SmoothScroll};
pub use crate::trigger::controller::{TriggerController, TriggerId, TriggerTransition};
pub use crate::trigger::element::{
    AnimatableElement, Crossing, ReplayPolicy, TriggerAction, TriggerEffect, TriggerSpec,
    TriggerState, TriggerZone, next_state,
};
