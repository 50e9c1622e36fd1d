use super::*;

#[test]
fn loops_from_zero_to_minus_fifty() {
    let mut m = Marquee::new(ElementId(1), 20.0).unwrap();
    assert_eq!(m.style(), Style::translate_percent(0.0, 0.0));
    m.advance(5.0);
    assert_eq!(m.style(), Style::translate_percent(-12.5, 0.0));
    m.advance(15.0);
    assert_eq!(m.phase(), 0.0, "wraps exactly at the period");
    m.advance(30.0);
    assert_eq!(m.style(), Style::translate_percent(-25.0, 0.0));
}

#[test]
fn ignores_negative_time_and_rejects_bad_periods() {
    let mut m = Marquee::new(ElementId(1), 4.0).unwrap();
    m.advance(-1.0);
    assert_eq!(m.phase(), 0.0);
    assert!(Marquee::new(ElementId(1), 0.0).is_err());
    assert!(Marquee::new(ElementId(1), f64::NAN).is_err());
}
