use crate::animation::style::Style;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::damp_point;

/// A smoothed visual that trails the pointer.
///
/// Raw positions are staged by pointer-move input; the rendered position only moves on
/// [`PointerFollower::advance`]. Until the first move there is nothing to follow and the visual
/// stays hidden.
#[derive(Clone, Debug)]
pub struct PointerFollower {
    target: Option<Point>,
    rendered: Option<Point>,
    hovering: bool,
    responsiveness: f64,
    hover_scale: f64,
    hotspot: Vec2,
}

impl PointerFollower {
    pub fn new(responsiveness: f64, hover_scale: f64, hotspot: Vec2) -> Self {
        Self {
            target: None,
            rendered: None,
            hovering: false,
            responsiveness,
            hover_scale,
            hotspot,
        }
    }

    pub fn stage_target(&mut self, position: Point) {
        if position.x.is_finite() && position.y.is_finite() {
            self.target = Some(position);
        }
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    pub fn rendered(&self) -> Option<Point> {
        self.rendered
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// One smoothing step. The first step after the first move snaps onto the pointer.
    pub fn advance(&mut self, dt_secs: f64) {
        let Some(target) = self.target else {
            return;
        };
        self.rendered = Some(match self.rendered {
            Some(current) => damp_point(current, target, self.responsiveness, dt_secs),
            None => target,
        });
    }

    /// Style of the follower element for the current rendered position.
    pub fn style(&self) -> Style {
        match self.rendered {
            None => Style::opacity(0.0),
            Some(p) => {
                let at = p - self.hotspot;
                let scale = if self.hovering { self.hover_scale } else { 1.0 };
                Style::opacity(1.0)
                    .with_translate(at.x, at.y)
                    .with_scale(scale)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/follower.rs"]
mod tests;
