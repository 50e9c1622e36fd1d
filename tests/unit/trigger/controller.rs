use std::time::Duration;

use super::*;
use crate::animation::ease::Ease;
use crate::animation::style::Style;
use crate::foundation::core::{Rect, ScrollDirection, Viewport};
use crate::host::ElementInfo;
use crate::host::mock::MockHost;
use crate::trigger::element::{ReplayPolicy, TriggerEffect};

const HEADING: ElementId = ElementId(1);
const CARD: ElementId = ElementId(2);

fn vp() -> Viewport {
    Viewport::new(1280.0, 800.0).unwrap()
}

// HEADING's zone is [1320, 2400) with the default thresholds.
fn host() -> MockHost {
    MockHost::new(vp(), 10_800.0)
        .with_element(
            HEADING,
            Rect::new(0.0, 2000.0, 1280.0, 2400.0),
            ElementInfo::tag("h2"),
        )
        .with_element(
            CARD,
            Rect::new(0.0, 2100.0, 1280.0, 2500.0),
            ElementInfo::tag("article"),
        )
}

fn spec(target: ElementId, policy: ReplayPolicy) -> TriggerSpec {
    TriggerSpec {
        target,
        enter_threshold: 0.85,
        exit_threshold: 0.0,
        replay_policy: policy,
        effect: TriggerEffect::Style {
            from: Style::opacity(0.0),
            to: Style::opacity(1.0),
        },
        duration_secs: 0.8,
        ease: Ease::OutQuad,
    }
}

struct Scroller {
    at: f64,
}

impl Scroller {
    fn to(&mut self, c: &mut TriggerController, h: &mut MockHost, position: f64) {
        h.apply_scroll(position);
        let frame = ScrollFrame {
            previous: self.at,
            current: position,
            direction: ScrollDirection::between(self.at, position),
            viewport: vp(),
            resized: false,
        };
        self.at = position;
        c.on_scroll(&frame, h);
    }
}

fn states(transitions: &[TriggerTransition]) -> Vec<TriggerState> {
    transitions.iter().map(|t| t.to).collect()
}

#[test]
fn play_once_fires_exactly_once() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    let id = c.register(spec(HEADING, ReplayPolicy::PlayOnce), &mut h).unwrap();
    let mut s = Scroller { at: 0.0 };

    for pos in [0.0, 600.0, 1200.0, 1400.0, 1800.0, 3000.0, 1400.0, 200.0, 0.0, 1500.0] {
        s.to(&mut c, &mut h, pos);
    }
    let log = c.take_transitions();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].from, TriggerState::Idle);
    assert_eq!(log[0].to, TriggerState::Played);
    assert_eq!(log[0].position, 1400.0);
    assert_eq!(c.state(id), Some(TriggerState::Played));
    c.detach_listeners(&mut h);
}

#[test]
fn reversible_round_trip() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    let id = c
        .register(spec(HEADING, ReplayPolicy::PlayReversePlay), &mut h)
        .unwrap();
    let mut s = Scroller { at: 0.0 };

    s.to(&mut c, &mut h, 0.0);
    s.to(&mut c, &mut h, 1500.0);
    assert_eq!(c.state(id), Some(TriggerState::Played));
    s.to(&mut c, &mut h, 500.0);
    assert_eq!(c.state(id), Some(TriggerState::Reversed));
    s.to(&mut c, &mut h, 1500.0);
    assert_eq!(c.state(id), Some(TriggerState::Played));

    assert_eq!(
        states(&c.take_transitions()),
        [TriggerState::Played, TriggerState::Reversed, TriggerState::Played]
    );
    c.detach_listeners(&mut h);
}

#[test]
fn single_tick_across_the_zone_applies_both_transitions() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    let id = c
        .register(spec(HEADING, ReplayPolicy::PlayReversePlay), &mut h)
        .unwrap();
    let mut s = Scroller { at: 0.0 };

    s.to(&mut c, &mut h, 0.0);
    s.to(&mut c, &mut h, 6000.0);
    let log = c.take_transitions();
    assert_eq!(
        log.iter().map(|t| t.crossing).collect::<Vec<_>>(),
        [Crossing::Enter, Crossing::Leave]
    );
    assert_eq!(c.state(id), Some(TriggerState::Reversed));

    s.to(&mut c, &mut h, 0.0);
    let log = c.take_transitions();
    assert_eq!(
        log.iter().map(|t| t.crossing).collect::<Vec<_>>(),
        [Crossing::EnterBack, Crossing::LeaveBack]
    );
    assert_eq!(
        log.iter().map(|t| t.action).collect::<Vec<_>>(),
        [TriggerAction::Play, TriggerAction::Reverse]
    );
    c.detach_listeners(&mut h);
}

#[test]
fn same_tick_crossings_follow_registration_order() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    let card = c.register(spec(CARD, ReplayPolicy::PlayOnce), &mut h).unwrap();
    let heading = c.register(spec(HEADING, ReplayPolicy::PlayOnce), &mut h).unwrap();
    let mut s = Scroller { at: 0.0 };

    s.to(&mut c, &mut h, 0.0);
    s.to(&mut c, &mut h, 2000.0);
    let ids: Vec<_> = c.take_transitions().iter().map(|t| t.id).collect();
    assert_eq!(ids, [card, heading]);
    c.detach_listeners(&mut h);
}

#[test]
fn layout_failure_defers_crossing_to_next_tick() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    let id = c.register(spec(HEADING, ReplayPolicy::PlayOnce), &mut h).unwrap();
    let mut s = Scroller { at: 0.0 };

    s.to(&mut c, &mut h, 0.0);
    h.set_measurable(HEADING, false);
    s.to(&mut c, &mut h, 1500.0);
    assert_eq!(c.state(id), Some(TriggerState::Idle));

    h.set_measurable(HEADING, true);
    s.to(&mut c, &mut h, 1500.0);
    assert_eq!(c.state(id), Some(TriggerState::Played));
    c.detach_listeners(&mut h);
}

#[test]
fn missing_targets_are_dropped_silently() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    let heading = c.register(spec(HEADING, ReplayPolicy::PlayOnce), &mut h).unwrap();
    let card = c.register(spec(CARD, ReplayPolicy::PlayOnce), &mut h).unwrap();
    let mut s = Scroller { at: 0.0 };

    s.to(&mut c, &mut h, 1500.0);
    h.remove_element(HEADING);
    s.to(&mut c, &mut h, 1600.0);
    assert_eq!(c.state(heading), None);
    assert_eq!(c.state(card), Some(TriggerState::Played));

    // A target removed mid-animation is dropped on the next tick.
    h.remove_element(CARD);
    let tick = Tick {
        frame: 1,
        now: Duration::from_millis(16),
        dt: Duration::from_millis(16),
        raw_dt: Duration::from_millis(16),
    };
    c.tick(&tick, &mut h).unwrap();
    assert!(c.is_empty());
    c.detach_listeners(&mut h);
}

#[test]
fn staged_removals_apply_on_next_update() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    let id = c.register(spec(HEADING, ReplayPolicy::PlayOnce), &mut h).unwrap();
    c.stage_removed(&[HEADING]);
    assert_eq!(c.len(), 1);
    Scroller { at: 0.0 }.to(&mut c, &mut h, 0.0);
    assert_eq!(c.state(id), None);
    assert!(!c.unregister(id));
    c.detach_listeners(&mut h);
}

#[test]
fn register_writes_initial_style_and_tick_animates() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    c.register(spec(HEADING, ReplayPolicy::PlayOnce), &mut h).unwrap();
    assert_eq!(h.style(HEADING).and_then(|s| s.opacity), Some(0.0));

    Scroller { at: 0.0 }.to(&mut c, &mut h, 1500.0);
    let step = Duration::from_millis(100);
    for frame in 0..10 {
        let tick = Tick {
            frame,
            now: step * frame as u32,
            dt: step,
            raw_dt: step,
        };
        c.tick(&tick, &mut h).unwrap();
    }
    assert_eq!(h.style(HEADING).and_then(|s| s.opacity), Some(1.0));
    c.detach_listeners(&mut h);
}

#[test]
fn install_listens_for_mutations_only() {
    let mut h = host();
    let mut c = TriggerController::install(&mut h);
    assert!(h.has_listener(ListenerTarget::Document, EventKind::Mutation));
    assert_eq!(c.detach_listeners(&mut h), 1);
    assert_eq!(h.active_listeners(), 0);
}
