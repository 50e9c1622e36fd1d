use crate::foundation::math::Rng64;

/// Glyphs substituted for characters that have not been revealed yet.
pub const SCRAMBLE_GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()";

/// Render `source` partially revealed at `fraction` of the way through a scramble.
///
/// The first `floor(len * fraction)` characters are shown as-is, whitespace is always kept, and
/// every other character is replaced by a glyph picked from [`SCRAMBLE_GLYPHS`]. The output is a
/// pure function of its inputs; vary `seed` per frame to make the noise flicker.
pub fn scramble(source: &str, fraction: f64, seed: u64) -> String {
    let len = source.chars().count();
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let revealed = (len as f64 * fraction).floor() as usize;
    if revealed >= len {
        return source.to_owned();
    }

    let mut rng = Rng64::new(seed ^ (revealed as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93));
    source
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < revealed || c.is_whitespace() {
                c
            } else {
                char::from(SCRAMBLE_GLYPHS[rng.below(SCRAMBLE_GLYPHS.len())])
            }
        })
        .collect()
}

/// Seconds a hover scramble takes to resolve `source`: one character every 60ms.
pub fn hover_reveal_secs(source: &str) -> f64 {
    (source.chars().count().max(1) as f64) * 0.06
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scramble.rs"]
mod tests;
