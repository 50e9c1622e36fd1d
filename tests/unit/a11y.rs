use super::*;
use crate::foundation::core::Viewport;
use crate::host::mock::MockHost;

#[test]
fn black_on_white_is_twenty_one() {
    let r = contrast_ratio("#000000", "#ffffff").unwrap();
    assert!((r - 21.0).abs() < 1e-9);
    assert_eq!(contrast_ratio("#ffffff", "#000000").unwrap(), r);
}

#[test]
fn identical_colors_are_one() {
    assert!((contrast_ratio("#777777", "#777").unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn grey_on_white_sits_at_the_aa_boundary() {
    let r = contrast_ratio("#767676", "#FFFFFF").unwrap();
    assert!(r >= WCAG_AA_NORMAL_TEXT, "{r}");
    let r = contrast_ratio("#777777", "#FFFFFF").unwrap();
    assert!(r < WCAG_AA_NORMAL_TEXT, "{r}");
}

#[test]
fn rejects_malformed_colors() {
    assert!(parse_hex_color("#12345").is_err());
    assert!(parse_hex_color("#zzzzzz").is_err());
    assert!(parse_hex_color("#+fffff").is_err());
    assert!(parse_hex_color("+ff").is_err());
    assert!(parse_hex_color("#ff ").is_err());
    assert_eq!(parse_hex_color("0a0B0c").unwrap(), [10, 11, 12]);
}

#[test]
fn detects_media_preferences() {
    let h = MockHost::new(Viewport::new(390.0, 844.0).unwrap(), 2000.0)
        .with_media(MediaFeature::HoverNone, true);
    assert_eq!(
        MotionPreferences::detect(&h),
        MotionPreferences {
            reduced_motion: false,
            touch_only: true,
        }
    );
}
