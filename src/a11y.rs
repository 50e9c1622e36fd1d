//! Accessibility helpers: motion preferences and WCAG 2.1 contrast.

use crate::foundation::error::{MotionError, MotionResult};
use crate::host::{Host, MediaFeature};

/// Minimum contrast for normal-size text at level AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum contrast for large text at level AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;

/// User and device preferences that gate motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MotionPreferences {
    /// `(prefers-reduced-motion: reduce)`
    pub reduced_motion: bool,
    /// `(hover: none)`: no precise pointer to follow.
    pub touch_only: bool,
}

impl MotionPreferences {
    pub fn detect(host: &dyn Host) -> Self {
        Self {
            reduced_motion: host.matches_media(MediaFeature::PrefersReducedMotion),
            touch_only: host.matches_media(MediaFeature::HoverNone),
        }
    }
}

/// Parse `#rrggbb` (or `#rgb`) into 8-bit channels.
pub fn parse_hex_color(hex: &str) -> MotionResult<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(MotionError::validation(format!("invalid hex color {hex:?}")));
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => {
            return Err(MotionError::validation(format!(
                "expected a #rrggbb color, got {hex:?}"
            )));
        }
    };
    let rgb = u32::from_str_radix(&expanded, 16)
        .map_err(|_| MotionError::validation(format!("invalid hex color {hex:?}")))?;
    Ok([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
}

/// WCAG relative luminance of an sRGB color.
pub fn relative_luminance([r, g, b]: [u8; 3]) -> f64 {
    fn linear(c: u8) -> f64 {
        let v = f64::from(c) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Contrast ratio between two hex colors, from 1 (identical) to 21 (black on white).
pub fn contrast_ratio(foreground: &str, background: &str) -> MotionResult<f64> {
    let a = relative_luminance(parse_hex_color(foreground)?);
    let b = relative_luminance(parse_hex_color(background)?);
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    Ok((lighter + 0.05) / (darker + 0.05))
}

#[cfg(test)]
#[path = "../tests/unit/a11y.rs"]
mod tests;
