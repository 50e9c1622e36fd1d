use super::*;
use crate::foundation::error::MotionError;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn start_is_idempotent() {
    let mut clock: FrameClock<u32> = FrameClock::new(ms(100));
    clock.on_tick(|_, n| {
        *n += 1;
        Ok(())
    });
    assert!(clock.start());
    assert!(!clock.start());

    let mut calls = 0u32;
    clock.frame(ms(0), &mut calls);
    clock.frame(ms(16), &mut calls);
    assert_eq!(calls, 2);
}

#[test]
fn stopped_clock_delivers_nothing_until_restarted() {
    let mut clock: FrameClock<u32> = FrameClock::new(ms(100));
    clock.start();
    clock.stop();
    clock.on_tick(|_, n| {
        *n += 1;
        Ok(())
    });

    let mut calls = 0u32;
    assert!(clock.frame(ms(16), &mut calls).is_none());
    assert_eq!(calls, 0);

    clock.start();
    assert!(clock.frame(ms(32), &mut calls).is_some());
    assert_eq!(calls, 1);
}

#[test]
fn callbacks_run_in_registration_order() {
    let mut clock: FrameClock<Vec<&'static str>> = FrameClock::new(ms(100));
    clock.on_tick(|_, log| {
        log.push("scroll");
        Ok(())
    });
    clock.on_tick(|_, log| {
        log.push("triggers");
        Ok(())
    });
    clock.on_tick(|_, log| {
        log.push("pointer");
        Ok(())
    });
    clock.start();
    let mut log = Vec::new();
    clock.frame(ms(0), &mut log);
    assert_eq!(log, ["scroll", "triggers", "pointer"]);
}

#[test]
fn failing_callback_does_not_stop_the_frame() {
    let mut clock: FrameClock<Vec<&'static str>> = FrameClock::new(ms(100));
    clock.on_tick(|_, _| Err(MotionError::validation("boom")));
    clock.on_tick(|_, log| {
        log.push("after");
        Ok(())
    });
    clock.start();
    let mut log = Vec::new();
    clock.frame(ms(0), &mut log);
    clock.frame(ms(16), &mut log);
    assert_eq!(log, ["after", "after"]);
}

#[test]
fn large_deltas_are_clamped() {
    let mut clock: FrameClock<Vec<Tick>> = FrameClock::new(ms(100));
    clock.on_tick(|t, seen| {
        seen.push(*t);
        Ok(())
    });
    clock.start();
    let mut seen = Vec::new();
    clock.frame(ms(1_000), &mut seen);
    clock.frame(ms(1_016), &mut seen);
    clock.frame(ms(6_016), &mut seen);

    assert_eq!(seen[0].dt, Duration::ZERO);
    assert_eq!(seen[1].dt, ms(16));
    assert!(!seen[1].is_clamped());
    assert_eq!(seen[2].dt, ms(100));
    assert_eq!(seen[2].raw_dt, ms(5_000));
    assert!(seen[2].is_clamped());
    assert_eq!(seen[2].frame, 2);
}

#[test]
fn off_tick_unregisters_once() {
    let mut clock: FrameClock<u32> = FrameClock::new(ms(100));
    let a = clock.on_tick(|_, n| {
        *n += 1;
        Ok(())
    });
    let _b = clock.on_tick(|_, n| {
        *n += 10;
        Ok(())
    });
    assert!(clock.off_tick(a));
    assert!(!clock.off_tick(a));
    assert_eq!(clock.callback_count(), 1);

    clock.start();
    let mut n = 0;
    clock.frame(ms(0), &mut n);
    assert_eq!(n, 10);
}
