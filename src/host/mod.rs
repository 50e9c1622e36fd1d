//! The boundary between the engine and the environment that owns the real elements.
//!
//! In a browser this is the DOM; in tests and the CLI it is [`mock::MockHost`]. Everything the
//! engine reads (layout, media features) or writes (styles, pins, global side effects) goes
//! through [`Host`], and every native listener it installs is tracked by a [`ListenerSet`].

pub(crate) mod listeners;
pub(crate) mod mock;

use crate::animation::style::Style;
use crate::foundation::core::{ElementId, ListenerId, Point, Rect, Viewport};
use crate::foundation::error::MotionResult;

/// Kinds of native input the engine can subscribe to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum EventKind {
    /// Wheel and touch scroll deltas.
    Wheel,
    /// Native scroll offset changes and programmatic scroll requests.
    Scroll,
    PointerMove,
    PointerEnter,
    PointerLeave,
    Resize,
    /// Elements added to or removed from the document.
    Mutation,
}

/// What a native listener is attached to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ListenerTarget {
    Window,
    Document,
    Element(ElementId),
}

/// Media features queried once at mount.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum MediaFeature {
    /// `(prefers-reduced-motion: reduce)`
    PrefersReducedMotion,
    /// `(hover: none)`, i.e. a touch-only device.
    HoverNone,
}

/// Page-wide side effects that must be undone on teardown.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum GlobalEffect {
    /// Native scrolling is replaced by the virtual scroll position.
    NativeScrollOverride,
    /// The platform cursor is hidden in favor of a follower element.
    NativeCursorHidden,
}

/// Layout lock applied to a pinned element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PinLayout {
    /// Normal document flow, pushed down by `offset` pixels.
    Flow { offset: f64 },
    /// Fixed to `rect` in viewport coordinates.
    Fixed { rect: Rect },
}

/// Static description of an element, used by the interactive-element predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ElementInfo {
    /// Lower-case tag name.
    pub tag: String,
    pub role: Option<String>,
    pub tabindex: Option<i32>,
}

impl ElementInfo {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

/// Native input delivered by the host to [`crate::Page::dispatch`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HostEvent {
    Wheel { delta: f64 },
    NativeScroll { offset: f64 },
    /// Programmatic scroll (`scrollIntoView` and friends).
    ScrollTo { position: f64, immediate: bool },
    PointerMove { position: Point },
    PointerEnter { element: ElementId },
    PointerLeave { element: ElementId },
    Resize { viewport: Viewport },
    Mutation {
        #[serde(default)]
        added: Vec<ElementId>,
        #[serde(default)]
        removed: Vec<ElementId>,
    },
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Wheel { .. } => EventKind::Wheel,
            Self::NativeScroll { .. } | Self::ScrollTo { .. } => EventKind::Scroll,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerEnter { .. } => EventKind::PointerEnter,
            Self::PointerLeave { .. } => EventKind::PointerLeave,
            Self::Resize { .. } => EventKind::Resize,
            Self::Mutation { .. } => EventKind::Mutation,
        }
    }

    /// Where the event was delivered.
    pub fn target(&self) -> ListenerTarget {
        match self {
            Self::PointerEnter { element } | Self::PointerLeave { element } => {
                ListenerTarget::Element(*element)
            }
            Self::Mutation { .. } => ListenerTarget::Document,
            _ => ListenerTarget::Window,
        }
    }
}

/// Environment the engine runs against.
///
/// Element bounds are viewport-relative at the scroll position last passed to
/// [`Host::apply_scroll`], and are recomputed on every call.
pub trait Host {
    fn viewport(&self) -> Viewport;
    fn document_height(&self) -> f64;
    /// The platform's own scroll offset.
    fn native_scroll_offset(&self) -> f64;
    fn element_bounds(&self, element: ElementId) -> MotionResult<Rect>;
    fn element_info(&self, element: ElementId) -> Option<ElementInfo>;
    /// Every element currently in the document, in document order.
    fn query_elements(&self) -> Vec<ElementId>;
    fn matches_media(&self, feature: MediaFeature) -> bool;

    fn add_listener(&mut self, target: ListenerTarget, kind: EventKind) -> ListenerId;
    fn remove_listener(&mut self, id: ListenerId);

    /// Render the document at the given virtual scroll position.
    fn apply_scroll(&mut self, position: f64);
    fn write_style(&mut self, element: ElementId, style: &Style) -> MotionResult<()>;
    fn write_text(&mut self, element: ElementId, text: &str) -> MotionResult<()>;
    fn set_pin_layout(&mut self, element: ElementId, layout: PinLayout) -> MotionResult<()>;
    fn set_global_effect(&mut self, effect: GlobalEffect, enabled: bool);
}

#[cfg(test)]
#[path = "../../tests/unit/host/event.rs"]
mod tests;
