//! Scripted page simulation against [`MockHost`].
//!
//! A [`Scene`] describes a document (viewport, elements, media features), the motion registered
//! on it, and host input keyed by frame. [`simulate`] mounts a [`Page`] on it, drives the frame
//! clock at a fixed rate, and records a [`Trace`].

use std::collections::BTreeSet;
use std::time::Duration;

use crate::animation::ease::Ease;
use crate::config::MotionConfig;
use crate::foundation::core::{ElementId, Point, Rect, Viewport};
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::mock::{MockElement, MockHost};
use crate::host::{ElementInfo, HostEvent, MediaFeature};
use crate::page::{MotionGate, Page};
use crate::scroll::scrub::{ScrubId, ScrubSpec};
use crate::trigger::controller::{TriggerId, TriggerTransition};
use crate::trigger::element::{ReplayPolicy, TriggerEffect, TriggerSpec, TriggerState};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneElement {
    pub id: ElementId,
    /// Natural rectangle in document coordinates.
    pub rect: Rect,
    #[serde(default)]
    pub info: ElementInfo,
    /// Frame at which the element is added to the document. Present from the start when unset.
    #[serde(default)]
    pub appears_at: Option<u64>,
}

/// A trigger registration; unset fields take the config's trigger defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneTrigger {
    pub target: ElementId,
    pub effect: TriggerEffect,
    #[serde(default)]
    pub enter_threshold: Option<f64>,
    #[serde(default)]
    pub exit_threshold: Option<f64>,
    #[serde(default)]
    pub replay_policy: Option<ReplayPolicy>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub ease: Option<Ease>,
}

impl SceneTrigger {
    fn to_spec(&self, config: &MotionConfig) -> TriggerSpec {
        let mut spec = config.triggers.spec(self.target, self.effect.clone());
        if let Some(v) = self.enter_threshold {
            spec.enter_threshold = v;
        }
        if let Some(v) = self.exit_threshold {
            spec.exit_threshold = v;
        }
        if let Some(v) = self.replay_policy {
            spec.replay_policy = v;
        }
        if let Some(v) = self.duration_secs {
            spec.duration_secs = v;
        }
        if let Some(v) = self.ease {
            spec.ease = v;
        }
        spec
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneHoverScramble {
    pub element: ElementId,
    pub text: String,
}

/// Reveal `image` while the pointer is over `trigger`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneHoverReveal {
    pub trigger: ElementId,
    pub image: ElementId,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneMarquee {
    pub target: ElementId,
    #[serde(default = "default_marquee_period")]
    pub period_secs: f64,
}

fn default_marquee_period() -> f64 {
    20.0
}

/// Host input delivered just before frame `frame` is drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptedEvent {
    pub frame: u64,
    pub event: HostEvent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub document_height: f64,
    #[serde(default)]
    pub media: Vec<MediaFeature>,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    #[serde(default)]
    pub triggers: Vec<SceneTrigger>,
    #[serde(default)]
    pub scrubs: Vec<ScrubSpec>,
    #[serde(default)]
    pub cursor: Option<ElementId>,
    #[serde(default)]
    pub hover_scrambles: Vec<SceneHoverScramble>,
    #[serde(default)]
    pub hover_reveals: Vec<SceneHoverReveal>,
    #[serde(default)]
    pub marquees: Vec<SceneMarquee>,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

impl Scene {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> MotionResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        if !self.document_height.is_finite() || self.document_height < 0.0 {
            return Err(MotionError::validation(format!(
                "document_height must be finite and >= 0, got {}",
                self.document_height
            )));
        }
        let mut seen = BTreeSet::new();
        for e in &self.elements {
            if !seen.insert(e.id) {
                return Err(MotionError::validation(format!(
                    "element {} is declared twice",
                    e.id
                )));
            }
        }
        Ok(())
    }

    fn build_host(&self) -> MockHost {
        let mut host = MockHost::new(self.viewport, self.document_height);
        for &feature in &self.media {
            host.set_media(feature, true);
        }
        for e in self.elements.iter().filter(|e| e.appears_at.is_none()) {
            host.insert_element(e.id, MockElement::new(e.rect, e.info.clone()));
        }
        host
    }
}

/// Everything observable about one simulated frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameTrace {
    pub frame: u64,
    pub virtual_scroll: Option<f64>,
    pub transitions: Vec<TriggerTransition>,
    pub scrub_progress: Vec<(ScrubId, f64)>,
    pub cursor: Option<Point>,
    /// Reveal fraction per hover reveal trigger.
    pub hover_reveals: Vec<(ElementId, f64)>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Trace {
    pub gate: MotionGate,
    pub frames: Vec<FrameTrace>,
    pub final_trigger_states: Vec<(TriggerId, Option<TriggerState>)>,
    /// Native listeners still attached after unmount. Anything but zero is a leak.
    pub leaked_listeners: usize,
}

/// Longest run [`simulate`] accepts; ten minutes at 240 fps.
pub const MAX_SIMULATED_FRAMES: u64 = 144_000;

/// Run `scene` for `frames` frames at `fps`.
#[tracing::instrument(skip(scene, config))]
pub fn simulate(
    scene: &Scene,
    config: MotionConfig,
    frames: u64,
    fps: f64,
) -> MotionResult<Trace> {
    scene.validate()?;
    if !fps.is_finite() || fps <= 0.0 {
        return Err(MotionError::validation(format!(
            "fps must be finite and > 0, got {fps}"
        )));
    }
    if frames > MAX_SIMULATED_FRAMES {
        return Err(MotionError::validation(format!(
            "frames must be <= {MAX_SIMULATED_FRAMES}, got {frames}"
        )));
    }
    let frame_secs = 1.0 / fps;

    let mut page = Page::mount(scene.build_host(), config)?;
    let mut triggers = Vec::new();
    for t in &scene.triggers {
        let spec = t.to_spec(page.config());
        if let Some(id) = page.register_trigger(spec)? {
            triggers.push(id);
        }
    }
    let mut scrubs = Vec::new();
    for s in &scene.scrubs {
        if let Some(id) = page.add_scrub(s.clone())? {
            scrubs.push(id);
        }
    }
    if let Some(cursor) = scene.cursor {
        page.enable_cursor(cursor)?;
    }
    for h in &scene.hover_scrambles {
        page.add_hover_scramble(h.element, h.text.clone())?;
    }
    for r in &scene.hover_reveals {
        page.add_hover_reveal(r.trigger, r.image)?;
    }
    for m in &scene.marquees {
        page.add_marquee(m.target, m.period_secs)?;
    }

    let mut out = Vec::new();
    for frame in 0..frames {
        let appearing: Vec<&SceneElement> = scene
            .elements
            .iter()
            .filter(|e| e.appears_at == Some(frame))
            .collect();
        if !appearing.is_empty() {
            for e in &appearing {
                page.host_mut()
                    .insert_element(e.id, MockElement::new(e.rect, e.info.clone()));
            }
            page.dispatch(HostEvent::Mutation {
                added: appearing.iter().map(|e| e.id).collect(),
                removed: Vec::new(),
            });
        }

        for scripted in scene.events.iter().filter(|e| e.frame == frame) {
            apply_to_host(page.host_mut(), &scripted.event);
            page.dispatch(scripted.event.clone());
        }

        page.frame(Duration::from_secs_f64(frame as f64 * frame_secs));
        out.push(FrameTrace {
            frame,
            virtual_scroll: page.scroll_state().map(|s| s.virtual_position),
            transitions: page.take_transitions(),
            scrub_progress: scrubs
                .iter()
                .filter_map(|&id| page.scrub(id).map(|r| (id, r.progress())))
                .collect(),
            cursor: page.pointer().and_then(|p| p.follower().rendered()),
            hover_reveals: scene
                .hover_reveals
                .iter()
                .filter_map(|r| {
                    let reveal = page.pointer()?.hover().reveal(r.trigger)?;
                    Some((r.trigger, reveal.shown()))
                })
                .collect(),
        });
    }

    let final_trigger_states = triggers
        .iter()
        .map(|&id| (id, page.trigger_state(id)))
        .collect();
    let gate = page.gate();
    let host = page.unmount();
    Ok(Trace {
        gate,
        frames: out,
        final_trigger_states,
        leaked_listeners: host.active_listeners(),
    })
}

/// Mirror host-side consequences of scripted input on the mock document.
fn apply_to_host(host: &mut MockHost, event: &HostEvent) {
    match event {
        HostEvent::Resize { viewport } => host.set_viewport(*viewport),
        HostEvent::Mutation { removed, .. } => {
            for &id in removed {
                host.remove_element(id);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
