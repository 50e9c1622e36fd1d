use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Vec2};

/// Opaque handle to a host element, stable for the element's lifetime.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to one native listener attached through the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ListenerId(pub u64);

/// Visible viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> MotionResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(MotionError::validation(
                "Viewport width and height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Pixel offset from the viewport top for a fractional position (0 = top, 1 = bottom).
    pub fn line_at(self, fraction: f64) -> f64 {
        fraction * self.height
    }

    /// Largest scroll offset a document of `document_height` allows.
    pub fn scroll_limit(self, document_height: f64) -> f64 {
        (document_height - self.height).max(0.0)
    }
}

/// Direction of travel between two scroll positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollDirection {
    Forward,
    Backward,
    Still,
}

impl ScrollDirection {
    pub fn between(from: f64, to: f64) -> Self {
        if to > from {
            Self::Forward
        } else if to < from {
            Self::Backward
        } else {
            Self::Still
        }
    }
}

/// Translate a viewport-relative rectangle into document space at `scroll`.
pub fn to_document_space(viewport_rect: Rect, scroll: f64) -> Rect {
    viewport_rect + Vec2::new(0.0, scroll)
}

/// Validate a fractional viewport position.
pub fn check_fraction(name: &str, v: f64) -> MotionResult<f64> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(MotionError::validation(format!(
            "{name} must be within [0, 1], got {v}"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
