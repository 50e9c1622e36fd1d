use super::*;
use crate::foundation::core::{Rect, Viewport};
use crate::config::RevealConfig;
use crate::host::mock::{HostWrite, MockHost};

const LINK: ElementId = ElementId(1);
const PARA: ElementId = ElementId(2);
const TABBABLE: ElementId = ElementId(3);
const ROLE_BUTTON: ElementId = ElementId(4);
const NAME: ElementId = ElementId(5);
const IMAGE: ElementId = ElementId(6);

fn rect() -> Rect {
    Rect::new(0.0, 0.0, 100.0, 20.0)
}

fn host() -> MockHost {
    MockHost::new(Viewport::new(1280.0, 800.0).unwrap(), 4000.0)
        .with_element(LINK, rect(), ElementInfo::tag("a"))
        .with_element(PARA, rect(), ElementInfo::tag("p"))
        .with_element(
            TABBABLE,
            rect(),
            ElementInfo {
                tag: "div".into(),
                role: None,
                tabindex: Some(0),
            },
        )
        .with_element(
            ROLE_BUTTON,
            rect(),
            ElementInfo {
                tag: "span".into(),
                role: Some("button".into()),
                tabindex: None,
            },
        )
        .with_element(NAME, rect(), ElementInfo::tag("h1"))
        .with_element(IMAGE, rect(), ElementInfo::tag("div"))
}

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

fn reveal_of(h: &MockHost) -> (Option<f64>, Option<f64>) {
    let s = h.style(IMAGE).copied().unwrap_or_default();
    (s.opacity, s.clip_inset)
}

fn revealing(h: &mut MockHost) -> HoverRegistry {
    let mut r = HoverRegistry::new();
    r.scan(h);
    r.add_reveal(LINK, IMAGE, &RevealConfig::default(), h).unwrap();
    r
}

#[test]
fn interactive_predicate() {
    for tag in ["a", "button", "input", "textarea", "select"] {
        assert!(is_interactive(&ElementInfo::tag(tag)), "{tag}");
    }
    assert!(!is_interactive(&ElementInfo::tag("div")));
    assert!(!is_interactive(&ElementInfo {
        tag: "div".into(),
        role: Some("link".into()),
        tabindex: None,
    }));
    assert!(is_interactive(&ElementInfo {
        tag: "div".into(),
        role: None,
        tabindex: Some(-1),
    }));
}

#[test]
fn scan_tracks_interactive_elements_only() {
    let mut h = host();
    let mut r = HoverRegistry::new();
    r.scan(&mut h);
    assert!(r.is_tracked(LINK));
    assert!(r.is_tracked(TABBABLE));
    assert!(r.is_tracked(ROLE_BUTTON));
    assert!(!r.is_tracked(PARA));
    assert_eq!(h.active_listeners(), 6);
    assert!(h.has_listener(ListenerTarget::Element(LINK), EventKind::PointerEnter));
    assert!(h.has_listener(ListenerTarget::Element(LINK), EventKind::PointerLeave));
    r.detach_all(&mut h);
}

#[test]
fn mutations_add_and_remove_tracking() {
    let mut h = host();
    let mut r = HoverRegistry::new();
    r.scan(&mut h);

    let late = ElementId(10);
    h.insert_element(
        late,
        crate::host::mock::MockElement::new(rect(), ElementInfo::tag("button")),
    );
    r.on_mutation(&[late], &[], &mut h);
    assert!(r.is_tracked(late));
    assert_eq!(h.active_listeners(), 8);

    r.pointer_enter(LINK);
    assert!(r.is_hovering());
    h.remove_element(LINK);
    r.on_mutation(&[], &[LINK], &mut h);
    assert!(!r.is_tracked(LINK));
    assert!(!r.is_hovering());
    assert_eq!(h.active_listeners(), 6);
    assert!(!h.has_listener(ListenerTarget::Element(LINK), EventKind::PointerEnter));

    assert_eq!(r.detach_all(&mut h), 6);
    assert_eq!(h.active_listeners(), 0);
}

#[test]
fn hovering_tracks_nested_interactive_elements() {
    let mut h = host();
    let mut r = HoverRegistry::new();
    r.scan(&mut h);
    r.pointer_enter(LINK);
    r.pointer_enter(ROLE_BUTTON);
    r.pointer_leave(LINK);
    assert!(r.is_hovering());
    r.pointer_leave(ROLE_BUTTON);
    assert!(!r.is_hovering());
    // Untracked elements never count.
    r.pointer_enter(PARA);
    assert!(!r.is_hovering());
    r.detach_all(&mut h);
}

#[test]
fn hover_scramble_replays_on_enter_and_restores_on_leave() {
    let mut h = host();
    let mut r = HoverRegistry::new();
    r.add_scramble(NAME, "CLAIRE", &mut h).unwrap();
    assert!(r.is_tracked(NAME));
    assert!(!r.is_hovering(), "scramble targets are not interactive");

    r.pointer_enter(NAME);
    r.advance(0.0, 1, &mut h);
    let first = h.text(NAME).unwrap().to_owned();
    assert_eq!(first.chars().count(), 6);
    assert_ne!(first, "CLAIRE");

    r.advance(0.1, 2, &mut h);
    assert!(h.text(NAME).unwrap().starts_with('C'));

    r.pointer_leave(NAME);
    r.advance(0.0, 3, &mut h);
    assert_eq!(h.text(NAME), Some("CLAIRE"));

    h.clear_writes();
    r.advance(0.016, 4, &mut h);
    assert!(h.writes().is_empty(), "settled scramble must not rewrite");
    r.detach_all(&mut h);
}

#[test]
fn hover_scramble_resolves_over_sixty_ms_per_character() {
    let mut h = host();
    let mut r = HoverRegistry::new();
    r.add_scramble(NAME, "CLAIRE", &mut h).unwrap();
    r.pointer_enter(NAME);
    r.advance(0.35, 1, &mut h);
    assert!(h.text(NAME).unwrap().starts_with("CLAIR"));
    r.advance(0.02, 2, &mut h);
    assert_eq!(h.text(NAME), Some("CLAIRE"));
    r.detach_all(&mut h);
}

#[test]
fn vanished_scramble_target_is_dropped() {
    let mut h = host();
    let mut r = HoverRegistry::new();
    r.add_scramble(NAME, "CLAIRE", &mut h).unwrap();
    r.pointer_enter(NAME);
    h.remove_element(NAME);
    r.advance(0.016, 1, &mut h);
    h.clear_writes();
    r.pointer_enter(NAME);
    r.advance(0.016, 2, &mut h);
    assert!(h.writes().is_empty());
    r.detach_all(&mut h);
}

#[test]
fn pointer_edges_apply_on_the_next_frame() {
    let mut h = host();
    let mut r = revealing(&mut h);
    r.add_scramble(NAME, "CLAIRE", &mut h).unwrap();
    h.clear_writes();

    r.pointer_enter(NAME);
    r.pointer_enter(LINK);
    assert!(h.writes().is_empty());
    assert!(r.is_hovering());

    r.advance(0.0, 1, &mut h);
    let writes = h.writes();
    assert!(writes.iter().any(|w| matches!(w, HostWrite::Text(id, _) if *id == NAME)));
    assert!(writes.iter().any(|w| matches!(w, HostWrite::Style(id, _) if *id == IMAGE)));
    r.detach_all(&mut h);
}

#[test]
fn reveal_starts_hidden_and_wipes_in_on_enter() {
    let mut h = host();
    let mut r = revealing(&mut h);
    let (opacity, clip) = reveal_of(&h);
    assert!(close(opacity, 0.0) && close(clip, 1.0));

    r.pointer_enter(LINK);
    r.advance(0.0, 1, &mut h);
    let (opacity, clip) = reveal_of(&h);
    assert!(close(opacity, 0.0) && close(clip, 1.0));

    // Half of 0.35s, out-quad: 1 - 0.5^2.
    r.advance(0.175, 2, &mut h);
    let (opacity, clip) = reveal_of(&h);
    assert!(close(opacity, 0.75), "{opacity:?}");
    assert!(close(clip, 0.25), "{clip:?}");

    r.advance(0.2, 3, &mut h);
    let (opacity, clip) = reveal_of(&h);
    assert!(close(opacity, 1.0) && close(clip, 0.0));
    assert!(close(r.reveal(LINK).map(|v| v.shown()), 1.0));

    h.clear_writes();
    r.advance(0.016, 4, &mut h);
    assert!(h.writes().is_empty(), "settled reveal must not rewrite");
    r.detach_all(&mut h);
}

#[test]
fn reveal_hides_faster_on_leave() {
    let mut h = host();
    let mut r = revealing(&mut h);
    r.pointer_enter(LINK);
    r.advance(0.0, 1, &mut h);
    r.advance(0.5, 2, &mut h);

    r.pointer_leave(LINK);
    r.advance(0.0, 3, &mut h);
    assert!(close(reveal_of(&h).0, 1.0));

    // Half of 0.25s, in-quad: 0.5^2 of the way down.
    r.advance(0.125, 4, &mut h);
    let (opacity, clip) = reveal_of(&h);
    assert!(close(opacity, 0.75), "{opacity:?}");
    assert!(close(clip, 0.25), "{clip:?}");

    r.advance(0.2, 5, &mut h);
    let (opacity, clip) = reveal_of(&h);
    assert!(close(opacity, 0.0) && close(clip, 1.0));
    r.detach_all(&mut h);
}

#[test]
fn leaving_mid_reveal_eases_out_from_where_it_got_to() {
    let mut h = host();
    let mut r = revealing(&mut h);
    r.pointer_enter(LINK);
    r.advance(0.0, 1, &mut h);
    r.advance(0.175, 2, &mut h);
    assert!(close(reveal_of(&h).0, 0.75));

    r.pointer_leave(LINK);
    r.advance(0.0, 3, &mut h);
    assert!(close(reveal_of(&h).0, 0.75), "leave must not jump");
    r.advance(0.125, 4, &mut h);
    assert!(close(reveal_of(&h).0, 0.75 - 0.75 * 0.25));
    r.advance(1.0, 5, &mut h);
    assert!(close(reveal_of(&h).0, 0.0));

    // Re-entering after a partial leave replays from hidden.
    r.pointer_enter(LINK);
    r.pointer_leave(LINK);
    r.pointer_enter(LINK);
    r.advance(0.0, 6, &mut h);
    let (opacity, clip) = reveal_of(&h);
    assert!(close(opacity, 0.0) && close(clip, 1.0));
    r.detach_all(&mut h);
}

#[test]
fn vanished_reveal_image_is_dropped() {
    let mut h = host();
    let mut r = revealing(&mut h);
    h.remove_element(IMAGE);
    r.pointer_enter(LINK);
    r.advance(0.016, 1, &mut h);
    assert!(r.reveal(LINK).is_none());
    assert!(r.is_tracked(LINK));
    r.detach_all(&mut h);
}
