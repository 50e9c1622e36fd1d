use crate::foundation::core::Vec2;
use crate::foundation::math::{lerp, lerp_vec};

/// Visual properties written to a host element.
///
/// `None` fields are left untouched by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Translation in CSS pixels.
    pub translate: Option<Vec2>,
    /// Translation as a percentage of the element's own size.
    pub translate_percent: Option<Vec2>,
    /// Uniform scale.
    pub scale: Option<f64>,
    /// Right clip inset as a fraction of the element's width (`inset(0 N% 0 0)`); `1` hides it.
    pub clip_inset: Option<f64>,
}

impl Style {
    pub fn opacity(v: f64) -> Self {
        Self {
            opacity: Some(v),
            ..Self::default()
        }
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Some(Vec2::new(x, y)),
            ..Self::default()
        }
    }

    pub fn translate_percent(x: f64, y: f64) -> Self {
        Self {
            translate_percent: Some(Vec2::new(x, y)),
            ..Self::default()
        }
    }

    pub fn clip_inset(v: f64) -> Self {
        Self {
            clip_inset: Some(v),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn with_translate(mut self, x: f64, y: f64) -> Self {
        self.translate = Some(Vec2::new(x, y));
        self
    }

    pub fn with_scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn with_clip_inset(mut self, v: f64) -> Self {
        self.clip_inset = Some(v);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.opacity.is_none()
            && self.translate.is_none()
            && self.translate_percent.is_none()
            && self.scale.is_none()
            && self.clip_inset.is_none()
    }

    /// Field-wise interpolation. A field present on only one side holds that side's value.
    pub fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        fn scalar(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
            match (a, b) {
                (Some(a), Some(b)) => Some(lerp(a, b, t)),
                (a, b) => b.or(a),
            }
        }
        fn vec(a: Option<Vec2>, b: Option<Vec2>, t: f64) -> Option<Vec2> {
            match (a, b) {
                (Some(a), Some(b)) => Some(lerp_vec(a, b, t)),
                (a, b) => b.or(a),
            }
        }

        Self {
            opacity: scalar(from.opacity, to.opacity, t),
            translate: vec(from.translate, to.translate, t),
            translate_percent: vec(from.translate_percent, to.translate_percent, t),
            scale: scalar(from.scale, to.scale, t),
            clip_inset: scalar(from.clip_inset, to.clip_inset, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/style.rs"]
mod tests;
