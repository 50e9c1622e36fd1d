use std::collections::{BTreeMap, BTreeSet};

use crate::animation::style::Style;
use crate::foundation::core::{ElementId, ListenerId, Rect, Vec2, Viewport};
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::{
    ElementInfo, EventKind, GlobalEffect, Host, ListenerTarget, MediaFeature, PinLayout,
};

/// One element in a [`MockHost`] document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MockElement {
    /// Natural (unpinned) rectangle in document coordinates.
    pub rect: Rect,
    #[serde(default)]
    pub info: ElementInfo,
    /// When `false`, measuring the element fails with a layout error.
    #[serde(default = "default_measurable")]
    pub measurable: bool,
}

fn default_measurable() -> bool {
    true
}

impl MockElement {
    pub fn new(rect: Rect, info: ElementInfo) -> Self {
        Self {
            rect,
            info,
            measurable: true,
        }
    }
}

/// A write performed by the engine, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum HostWrite {
    Scroll(f64),
    Style(ElementId, Style),
    Text(ElementId, String),
    Pin(ElementId, PinLayout),
    Global(GlobalEffect, bool),
}

/// In-memory host that records every interaction.
///
/// Layout is static: each element keeps its document rectangle and bounds are reported relative
/// to the last applied scroll position.
#[derive(Debug)]
pub struct MockHost {
    viewport: Viewport,
    document_height: f64,
    native_scroll: f64,
    applied_scroll: f64,
    elements: BTreeMap<ElementId, MockElement>,
    media: BTreeSet<MediaFeature>,

    listeners: BTreeMap<ListenerId, (ListenerTarget, EventKind)>,
    next_listener: u64,
    listeners_added: usize,
    listeners_removed: usize,

    globals: BTreeSet<GlobalEffect>,
    styles: BTreeMap<ElementId, Style>,
    texts: BTreeMap<ElementId, String>,
    pins: BTreeMap<ElementId, PinLayout>,
    writes: Vec<HostWrite>,
}

impl MockHost {
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        Self {
            viewport,
            document_height,
            native_scroll: 0.0,
            applied_scroll: 0.0,
            elements: BTreeMap::new(),
            media: BTreeSet::new(),
            listeners: BTreeMap::new(),
            next_listener: 1,
            listeners_added: 0,
            listeners_removed: 0,
            globals: BTreeSet::new(),
            styles: BTreeMap::new(),
            texts: BTreeMap::new(),
            pins: BTreeMap::new(),
            writes: Vec::new(),
        }
    }

    pub fn with_element(mut self, id: ElementId, rect: Rect, info: ElementInfo) -> Self {
        self.insert_element(id, MockElement::new(rect, info));
        self
    }

    pub fn with_media(mut self, feature: MediaFeature, matches: bool) -> Self {
        self.set_media(feature, matches);
        self
    }

    pub fn with_native_scroll(mut self, offset: f64) -> Self {
        self.native_scroll = offset;
        self.applied_scroll = offset;
        self
    }

    pub fn insert_element(&mut self, id: ElementId, element: MockElement) {
        self.elements.insert(id, element);
    }

    pub fn remove_element(&mut self, id: ElementId) -> Option<MockElement> {
        self.elements.remove(&id)
    }

    pub fn set_measurable(&mut self, id: ElementId, measurable: bool) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.measurable = measurable;
        }
    }

    pub fn set_media(&mut self, feature: MediaFeature, matches: bool) {
        if matches {
            self.media.insert(feature);
        } else {
            self.media.remove(&feature);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_document_height(&mut self, height: f64) {
        self.document_height = height;
    }

    pub fn applied_scroll(&self) -> f64 {
        self.applied_scroll
    }

    /// Listeners currently attached.
    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn active_listeners_of(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|(_, k)| *k == kind).count()
    }

    pub fn has_listener(&self, target: ListenerTarget, kind: EventKind) -> bool {
        self.listeners.values().any(|&(t, k)| t == target && k == kind)
    }

    /// Total `add_listener` calls over the host's lifetime.
    pub fn listeners_added(&self) -> usize {
        self.listeners_added
    }

    pub fn listeners_removed(&self) -> usize {
        self.listeners_removed
    }

    pub fn global_enabled(&self, effect: GlobalEffect) -> bool {
        self.globals.contains(&effect)
    }

    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.styles.get(&id)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    pub fn pin_layout(&self, id: ElementId) -> Option<PinLayout> {
        self.pins.get(&id).copied()
    }

    pub fn writes(&self) -> &[HostWrite] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    fn element(&self, id: ElementId) -> MotionResult<&MockElement> {
        self.elements.get(&id).ok_or(MotionError::MissingTarget(id))
    }
}

impl Host for MockHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn native_scroll_offset(&self) -> f64 {
        self.native_scroll
    }

    fn element_bounds(&self, element: ElementId) -> MotionResult<Rect> {
        let e = self.element(element)?;
        if !e.measurable {
            return Err(MotionError::layout(element, "element is detached from layout"));
        }
        Ok(e.rect - Vec2::new(0.0, self.applied_scroll))
    }

    fn element_info(&self, element: ElementId) -> Option<ElementInfo> {
        self.elements.get(&element).map(|e| e.info.clone())
    }

    fn query_elements(&self) -> Vec<ElementId> {
        self.elements.keys().copied().collect()
    }

    fn matches_media(&self, feature: MediaFeature) -> bool {
        self.media.contains(&feature)
    }

    fn add_listener(&mut self, target: ListenerTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners_added += 1;
        self.listeners.insert(id, (target, kind));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if self.listeners.remove(&id).is_some() {
            self.listeners_removed += 1;
        }
    }

    fn apply_scroll(&mut self, position: f64) {
        self.applied_scroll = position;
        self.native_scroll = position;
        self.writes.push(HostWrite::Scroll(position));
    }

    fn write_style(&mut self, element: ElementId, style: &Style) -> MotionResult<()> {
        self.element(element)?;
        let entry = self.styles.entry(element).or_default();
        *entry = Style::lerp(entry, style, 1.0);
        self.writes.push(HostWrite::Style(element, *style));
        Ok(())
    }

    fn write_text(&mut self, element: ElementId, text: &str) -> MotionResult<()> {
        self.element(element)?;
        self.texts.insert(element, text.to_owned());
        self.writes.push(HostWrite::Text(element, text.to_owned()));
        Ok(())
    }

    fn set_pin_layout(&mut self, element: ElementId, layout: PinLayout) -> MotionResult<()> {
        self.element(element)?;
        self.pins.insert(element, layout);
        self.writes.push(HostWrite::Pin(element, layout));
        Ok(())
    }

    fn set_global_effect(&mut self, effect: GlobalEffect, enabled: bool) {
        if enabled {
            self.globals.insert(effect);
        } else {
            self.globals.remove(&effect);
        }
        self.writes.push(HostWrite::Global(effect, enabled));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/mock.rs"]
mod tests;
