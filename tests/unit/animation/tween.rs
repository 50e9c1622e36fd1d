use super::*;

#[test]
fn rejects_non_positive_duration() {
    assert!(Tween::new(0.0, Ease::Linear).is_err());
    assert!(Tween::new(f64::INFINITY, Ease::Linear).is_err());
}

#[test]
fn plays_to_completion_and_stops() {
    let mut t = Tween::new(1.0, Ease::Linear).unwrap();
    assert!(!t.advance(0.5), "idle tween must not move");
    t.play();
    assert!(t.advance(0.25));
    assert_eq!(t.linear_progress(), 0.25);
    assert!(t.advance(2.0));
    assert_eq!(t.linear_progress(), 1.0);
    assert!(!t.is_active());
    assert_eq!(t.direction(), None);
}

#[test]
fn reverse_continues_from_current_position() {
    let mut t = Tween::new(1.0, Ease::Linear).unwrap();
    t.play();
    t.advance(0.6);
    t.reverse();
    t.advance(0.2);
    assert!((t.linear_progress() - 0.4).abs() < 1e-12);
    t.advance(5.0);
    assert_eq!(t.linear_progress(), 0.0);
    assert!(!t.is_active());
}

#[test]
fn eased_progress_uses_curve() {
    let mut t = Tween::new(2.0, Ease::OutQuad).unwrap();
    t.play();
    t.advance(1.0);
    assert_eq!(t.linear_progress(), 0.5);
    assert_eq!(t.progress(), 0.75);
}

#[test]
fn restart_and_seek() {
    let mut t = Tween::new(1.0, Ease::Linear).unwrap();
    t.seek(0.7);
    assert_eq!(t.linear_progress(), 0.7);
    assert!(!t.is_active());
    t.restart();
    assert_eq!(t.linear_progress(), 0.0);
    assert!(t.is_active());
}
