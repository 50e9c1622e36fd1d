use std::collections::{BTreeMap, BTreeSet};

use crate::animation::ease::Ease;
use crate::animation::scramble::{hover_reveal_secs, scramble};
use crate::animation::style::Style;
use crate::animation::tween::Tween;
use crate::config::RevealConfig;
use crate::foundation::core::ElementId;
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::listeners::ListenerSet;
use crate::host::{ElementInfo, EventKind, Host, ListenerTarget};

const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "textarea", "select"];

/// Links, buttons, form controls, `role="button"`, and anything with a `tabindex`.
pub fn is_interactive(info: &ElementInfo) -> bool {
    INTERACTIVE_TAGS.contains(&info.tag.as_str())
        || info.role.as_deref() == Some("button")
        || info.tabindex.is_some()
}

/// A pointer edge staged by the input handler and applied on the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEdge {
    Enter,
    Leave,
}

/// Text that re-scrambles and resolves each time the pointer enters its element.
#[derive(Clone, Debug)]
pub struct HoverScramble {
    text: String,
    seed: u64,
    tween: Tween,
    pending: Option<HoverEdge>,
}

impl HoverScramble {
    pub fn new(text: impl Into<String>, seed: u64) -> MotionResult<Self> {
        let text = text.into();
        let mut tween = Tween::new(hover_reveal_secs(&text), Ease::Linear)?;
        tween.seek(1.0);
        Ok(Self {
            text,
            seed,
            tween,
            pending: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn stage(&mut self, edge: HoverEdge) {
        self.pending = Some(edge);
    }

    fn advance(
        &mut self,
        element: ElementId,
        dt_secs: f64,
        frame: u64,
        host: &mut dyn Host,
    ) -> MotionResult<()> {
        let edge = self.pending.take();
        match edge {
            Some(HoverEdge::Enter) => self.tween.restart(),
            Some(HoverEdge::Leave) => self.tween.seek(1.0),
            None => {}
        }
        let moved = self.tween.advance(dt_secs);
        if moved || edge.is_some() {
            let text = scramble(&self.text, self.tween.linear_progress(), self.seed ^ frame);
            host.write_text(element, &text)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealLeg {
    Show,
    Hide,
}

/// An image that wipes in from the left and fades up while the pointer is over its trigger.
///
/// Entering always replays from fully hidden. Leaving eases out from wherever the reveal got
/// to, so a quick pass over a row never snaps the image.
#[derive(Clone, Debug)]
pub struct HoverReveal {
    image: ElementId,
    show: Tween,
    hide: Tween,
    leg: RevealLeg,
    from: f64,
    shown: f64,
    pending: Option<HoverEdge>,
}

impl HoverReveal {
    pub fn new(image: ElementId, config: &RevealConfig) -> MotionResult<Self> {
        let mut hide = Tween::new(config.hide_secs, config.hide_ease)?;
        hide.seek(1.0);
        Ok(Self {
            image,
            show: Tween::new(config.show_secs, config.show_ease)?,
            hide,
            leg: RevealLeg::Hide,
            from: 0.0,
            shown: 0.0,
            pending: None,
        })
    }

    pub fn image(&self) -> ElementId {
        self.image
    }

    /// How far the image is revealed, `0` hidden to `1` fully shown.
    pub fn shown(&self) -> f64 {
        self.shown
    }

    /// Clip and opacity for a reveal fraction.
    pub fn style_at(shown: f64) -> Style {
        Style::opacity(shown).with_clip_inset(1.0 - shown)
    }

    fn stage(&mut self, edge: HoverEdge) {
        self.pending = Some(edge);
    }

    fn advance(&mut self, dt_secs: f64, host: &mut dyn Host) -> MotionResult<()> {
        let edge = self.pending.take();
        match edge {
            Some(HoverEdge::Enter) => {
                self.leg = RevealLeg::Show;
                self.from = 0.0;
                self.show.restart();
            }
            Some(HoverEdge::Leave) => {
                self.leg = RevealLeg::Hide;
                self.from = self.shown;
                self.hide.restart();
            }
            None => {}
        }
        let (tween, to) = match self.leg {
            RevealLeg::Show => (&mut self.show, 1.0),
            RevealLeg::Hide => (&mut self.hide, 0.0),
        };
        let moved = tween.advance(dt_secs);
        if moved || edge.is_some() {
            self.shown = self.from + (to - self.from) * tween.progress();
            host.write_style(self.image, &Self::style_at(self.shown))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
struct Tracked {
    interactive: bool,
    scramble: Option<HoverScramble>,
    reveal: Option<HoverReveal>,
}

impl Tracked {
    fn stage(&mut self, edge: HoverEdge) {
        if let Some(s) = self.scramble.as_mut() {
            s.stage(edge);
        }
        if let Some(r) = self.reveal.as_mut() {
            r.stage(edge);
        }
    }
}

/// Elements whose pointer enter/leave the engine listens to.
///
/// Interactive elements are discovered by scanning the document at install and on every
/// mutation, so elements added later join without re-registration. Each tracked element holds
/// its own enter/leave listeners, all detached on teardown.
#[derive(Debug, Default)]
pub struct HoverRegistry {
    tracked: BTreeMap<ElementId, Tracked>,
    hovered: BTreeSet<ElementId>,
    listeners: ListenerSet,
}

impl HoverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// Track every interactive element currently in the document.
    pub fn scan(&mut self, host: &mut dyn Host) {
        for element in host.query_elements() {
            self.consider(element, host);
        }
        tracing::debug!(tracked = self.tracked.len(), "hover registry scanned");
    }

    fn consider(&mut self, element: ElementId, host: &mut dyn Host) {
        if self.tracked.contains_key(&element) {
            return;
        }
        let Some(info) = host.element_info(element) else {
            return;
        };
        if is_interactive(&info) {
            self.track(element, host).interactive = true;
        }
    }

    fn track(&mut self, element: ElementId, host: &mut dyn Host) -> &mut Tracked {
        let listeners = &mut self.listeners;
        self.tracked.entry(element).or_insert_with(|| {
            let target = ListenerTarget::Element(element);
            listeners.attach(host, target, EventKind::PointerEnter);
            listeners.attach(host, target, EventKind::PointerLeave);
            Tracked::default()
        })
    }

    /// Attach a hover scramble to `element`, tracking it whether or not it is interactive.
    pub fn add_scramble(
        &mut self,
        element: ElementId,
        text: impl Into<String>,
        host: &mut dyn Host,
    ) -> MotionResult<()> {
        let scramble = HoverScramble::new(text, element.0)?;
        self.track(element, host).scramble = Some(scramble);
        Ok(())
    }

    /// Reveal `image` while the pointer is over `trigger`. The image starts hidden.
    pub fn add_reveal(
        &mut self,
        trigger: ElementId,
        image: ElementId,
        config: &RevealConfig,
        host: &mut dyn Host,
    ) -> MotionResult<()> {
        let reveal = HoverReveal::new(image, config)?;
        host.write_style(image, &HoverReveal::style_at(0.0))?;
        self.track(trigger, host).reveal = Some(reveal);
        Ok(())
    }

    pub fn reveal(&self, trigger: ElementId) -> Option<&HoverReveal> {
        self.tracked.get(&trigger).and_then(|t| t.reveal.as_ref())
    }

    /// Apply a document mutation: removed elements lose their listeners, added ones are
    /// considered for tracking.
    pub fn on_mutation(&mut self, added: &[ElementId], removed: &[ElementId], host: &mut dyn Host) {
        for &element in removed {
            if self.tracked.remove(&element).is_some() {
                self.listeners
                    .detach_target(host, ListenerTarget::Element(element));
            }
            self.hovered.remove(&element);
        }
        for &element in added {
            self.consider(element, host);
        }
    }

    pub fn pointer_enter(&mut self, element: ElementId) {
        let Some(t) = self.tracked.get_mut(&element) else {
            return;
        };
        if t.interactive {
            self.hovered.insert(element);
        }
        t.stage(HoverEdge::Enter);
    }

    pub fn pointer_leave(&mut self, element: ElementId) {
        self.hovered.remove(&element);
        if let Some(t) = self.tracked.get_mut(&element) {
            t.stage(HoverEdge::Leave);
        }
    }

    /// `true` while the pointer is over at least one interactive element.
    pub fn is_hovering(&self) -> bool {
        !self.hovered.is_empty()
    }

    pub fn is_tracked(&self, element: ElementId) -> bool {
        self.tracked.contains_key(&element)
    }

    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    /// Apply staged enter/leave edges and advance scrambles and reveals. One whose element
    /// vanished is dropped.
    pub fn advance(&mut self, dt_secs: f64, frame: u64, host: &mut dyn Host) {
        for (&element, t) in self.tracked.iter_mut() {
            if let Some(s) = t.scramble.as_mut()
                && let Err(e) = s.advance(element, dt_secs, frame, host)
            {
                report_dropped(element, "hover scramble", &e);
                t.scramble = None;
            }
            if let Some(r) = t.reveal.as_mut()
                && let Err(e) = r.advance(dt_secs, host)
            {
                report_dropped(element, "hover reveal", &e);
                t.reveal = None;
            }
        }
    }

    pub fn detach_all(&mut self, host: &mut dyn Host) -> usize {
        self.tracked.clear();
        self.hovered.clear();
        self.listeners.detach_all(host)
    }
}

fn report_dropped(element: ElementId, what: &str, e: &MotionError) {
    if e.is_missing_target() {
        tracing::debug!(%element, "{what} target missing, dropped");
    } else {
        tracing::warn!(%element, "{what} dropped: {e}");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/hover.rs"]
mod tests;
