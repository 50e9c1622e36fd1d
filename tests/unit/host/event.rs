use super::*;

#[test]
fn scroll_requests_share_the_scroll_kind() {
    assert_eq!(HostEvent::NativeScroll { offset: 1.0 }.kind(), EventKind::Scroll);
    assert_eq!(
        HostEvent::ScrollTo {
            position: 10.0,
            immediate: false
        }
        .kind(),
        EventKind::Scroll
    );
    assert_eq!(HostEvent::Wheel { delta: 3.0 }.kind(), EventKind::Wheel);
}

#[test]
fn hover_events_target_their_element() {
    let e = HostEvent::PointerEnter {
        element: ElementId(4),
    };
    assert_eq!(e.target(), ListenerTarget::Element(ElementId(4)));
    assert_eq!(
        HostEvent::Mutation {
            added: vec![],
            removed: vec![]
        }
        .target(),
        ListenerTarget::Document
    );
    assert_eq!(
        HostEvent::PointerMove {
            position: Point::new(1.0, 2.0)
        }
        .target(),
        ListenerTarget::Window
    );
}

#[test]
fn events_parse_from_json() {
    let e: HostEvent = serde_json::from_str(r#"{"Wheel":{"delta":120.0}}"#).unwrap();
    assert_eq!(e, HostEvent::Wheel { delta: 120.0 });
    let m: HostEvent = serde_json::from_str(r#"{"Mutation":{"added":[7]}}"#).unwrap();
    assert_eq!(
        m,
        HostEvent::Mutation {
            added: vec![ElementId(7)],
            removed: vec![]
        }
    );
}
