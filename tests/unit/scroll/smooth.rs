use std::time::Duration;

use super::*;
use crate::foundation::math::responsiveness_for_settle;
use crate::host::mock::MockHost;

fn host() -> MockHost {
    MockHost::new(Viewport::new(1280.0, 800.0).unwrap(), 10_800.0)
}

fn tick(frame: u64, dt_secs: f64) -> Tick {
    let dt = Duration::from_secs_f64(dt_secs);
    Tick {
        frame,
        now: dt * frame as u32,
        dt,
        raw_dt: dt,
    }
}

#[test]
fn install_takes_over_scrolling() {
    let mut h = host();
    let mut s = SmoothScroll::install(&mut h, 3.0);
    assert!(h.global_enabled(GlobalEffect::NativeScrollOverride));
    assert_eq!(h.active_listeners(), 3);
    assert_eq!(s.state().limit, 10_000.0);

    s.detach_listeners(&mut h);
    s.restore_globals(&mut h);
    assert_eq!(h.active_listeners(), 0);
    assert!(!h.global_enabled(GlobalEffect::NativeScrollOverride));
}

#[test]
fn converges_within_settle_time_without_overshoot() {
    let mut h = host();
    let k = responsiveness_for_settle(1.5, 0.01);
    let mut s = SmoothScroll::install(&mut h, k);
    s.stage_delta(1000.0);

    let mut last = 0.0;
    for f in 0..91 {
        let frame = s.advance(&tick(f, 1.0 / 60.0), &mut h);
        assert!(frame.current >= last, "virtual position went backwards");
        assert!(frame.current <= 1000.0, "overshoot at frame {f}");
        last = frame.current;
    }
    assert!((1000.0 - last) <= 10.0, "still {last} after 1.5s");
    assert_eq!(h.applied_scroll(), last);
    s.detach_listeners(&mut h);
}

#[test]
fn easing_is_framerate_independent() {
    let mut h60 = host();
    let mut h120 = host();
    let mut a = SmoothScroll::install(&mut h60, 3.0);
    let mut b = SmoothScroll::install(&mut h120, 3.0);
    a.stage_delta(500.0);
    b.stage_delta(500.0);
    for f in 0..30 {
        a.advance(&tick(f, 1.0 / 60.0), &mut h60);
    }
    for f in 0..60 {
        b.advance(&tick(f, 1.0 / 120.0), &mut h120);
    }
    let diff = a.state().virtual_position - b.state().virtual_position;
    assert!(diff.abs() < 1e-6, "diverged by {diff}");
    a.detach_listeners(&mut h60);
    b.detach_listeners(&mut h120);
}

#[test]
fn raw_and_virtual_are_clamped_to_document() {
    let mut h = host();
    let mut s = SmoothScroll::install(&mut h, 50.0);
    s.stage_delta(-400.0);
    assert_eq!(s.state().raw_position, 0.0);
    s.stage_delta(1e9);
    assert_eq!(s.state().raw_position, 10_000.0);
    for f in 0..600 {
        s.advance(&tick(f, 1.0 / 60.0), &mut h);
    }
    assert_eq!(s.state().virtual_position, 10_000.0);
    s.detach_listeners(&mut h);
}

#[test]
fn immediate_scroll_to_skips_easing() {
    let mut h = host();
    let mut s = SmoothScroll::install(&mut h, 3.0);
    s.scroll_to(2500.0, true);
    let frame = s.advance(&tick(0, 1.0 / 60.0), &mut h);
    assert_eq!(frame.current, 2500.0);
    assert_eq!(frame.direction, ScrollDirection::Forward);
    assert_eq!(s.state().velocity, 2500.0);
    s.detach_listeners(&mut h);
}

#[test]
fn resize_is_applied_on_next_tick() {
    let mut h = host();
    let mut s = SmoothScroll::install(&mut h, 3.0);
    let vp = Viewport::new(1280.0, 1800.0).unwrap();
    s.stage_resize(vp);
    assert_eq!(s.viewport().height, 800.0);
    let frame = s.advance(&tick(0, 0.0), &mut h);
    assert!(frame.resized);
    assert_eq!(frame.viewport, vp);
    assert_eq!(s.state().limit, 9_000.0);
    let frame = s.advance(&tick(1, 0.0), &mut h);
    assert!(!frame.resized);
    s.detach_listeners(&mut h);
}

#[test]
fn starts_from_native_offset() {
    let mut h = host().with_native_scroll(1200.0);
    let mut s = SmoothScroll::install(&mut h, 3.0);
    assert_eq!(s.state().virtual_position, 1200.0);
    assert_eq!(s.state().raw_position, 1200.0);
    s.detach_listeners(&mut h);
}
