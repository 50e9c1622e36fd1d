use crate::foundation::core::{Point, Vec2};

/// Fraction of the remaining distance covered in `dt_secs` by an exponential approach with
/// rate `responsiveness` (1/s). Always in `[0, 1)`, so a step can never overshoot.
pub(crate) fn smoothing_alpha(responsiveness: f64, dt_secs: f64) -> f64 {
    if responsiveness <= 0.0 || dt_secs <= 0.0 {
        return 0.0;
    }
    1.0 - (-responsiveness * dt_secs).exp()
}

/// Responsiveness that settles to within `tolerance` of the target after `settle_secs`.
pub(crate) fn responsiveness_for_settle(settle_secs: f64, tolerance: f64) -> f64 {
    -tolerance.ln() / settle_secs
}

pub(crate) fn damp(current: f64, target: f64, responsiveness: f64, dt_secs: f64) -> f64 {
    current + (target - current) * smoothing_alpha(responsiveness, dt_secs)
}

pub(crate) fn damp_point(current: Point, target: Point, responsiveness: f64, dt_secs: f64) -> Point {
    let a = smoothing_alpha(responsiveness, dt_secs);
    current + (target - current) * a
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn lerp_vec(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
