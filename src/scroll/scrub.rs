use crate::animation::style::Style;
use crate::foundation::core::{ElementId, Rect, Vec2, check_fraction, to_document_space};
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::{Host, PinLayout};
use crate::scroll::smooth::ScrollFrame;

/// Half-open virtual scroll interval `[start, end)` over which a region scrubs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    pub fn new(start: f64, end: f64) -> MotionResult<Self> {
        if !(start.is_finite() && end.is_finite()) || end < start {
            return Err(MotionError::validation(format!(
                "scroll range end must be >= start, got [{start}, {end})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn len(self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.len() <= 0.0
    }

    /// `clamp((position - start) / (end - start), 0, 1)`. Empty ranges step from 0 to 1 at `start`.
    pub fn progress(self, position: f64) -> f64 {
        if self.is_empty() {
            return if position >= self.start { 1.0 } else { 0.0 };
        }
        ((position - self.start) / self.len()).clamp(0.0, 1.0)
    }

    pub fn phase(self, position: f64) -> ScrubPhase {
        if position < self.start {
            ScrubPhase::Before
        } else if position < self.end {
            ScrubPhase::Active
        } else {
            ScrubPhase::After
        }
    }
}

/// Where the virtual scroll position sits relative to a region's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrubPhase {
    Before,
    Active,
    After,
}

/// A style driven directly (no easing) by scrub progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrubBinding {
    pub target: ElementId,
    pub from: Style,
    pub to: Style,
}

/// Declarative description of a scroll-scrubbed region.
///
/// The range starts when the section's top meets `start_at` (viewport fraction) and ends when
/// its bottom meets `end_at`. `start_at = 0, end_at = 1` pins for the section's whole height
/// ("top top" to "bottom bottom"); `start_at = 0, end_at = 0` is a parallax over the section
/// scrolling out ("top top" to "bottom top").
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrubSpec {
    pub section: ElementId,
    /// Sub-element held fixed in the viewport while the range is active.
    #[serde(default)]
    pub pin: Option<ElementId>,
    #[serde(default)]
    pub start_at: f64,
    #[serde(default = "default_end_at")]
    pub end_at: f64,
    #[serde(default)]
    pub bindings: Vec<ScrubBinding>,
}

fn default_end_at() -> f64 {
    1.0
}

impl ScrubSpec {
    pub fn validate(&self) -> MotionResult<()> {
        check_fraction("start_at", self.start_at)?;
        check_fraction("end_at", self.end_at)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Measured {
    range: ScrollRange,
    /// Viewport rectangle the pin occupies while locked.
    pin_rect: Option<Rect>,
}

/// Runtime state for one scrub region.
#[derive(Clone, Debug)]
pub struct ScrubRegion {
    spec: ScrubSpec,
    measured: Option<Measured>,
    phase: Option<ScrubPhase>,
    progress: f64,
}

impl ScrubRegion {
    pub fn new(spec: ScrubSpec) -> MotionResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            measured: None,
            phase: None,
            progress: 0.0,
        })
    }

    pub fn spec(&self) -> &ScrubSpec {
        &self.spec
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> Option<ScrubPhase> {
        self.phase
    }

    pub fn range(&self) -> Option<ScrollRange> {
        self.measured.map(|m| m.range)
    }

    /// Drop the measured range; it is re-derived from natural layout on the next update.
    pub fn invalidate(&mut self) {
        self.measured = None;
    }

    fn measure(&mut self, frame: &ScrollFrame, host: &mut dyn Host) -> MotionResult<Measured> {
        // Release the pin first so the natural (unpinned) layout is what gets measured.
        if let (Some(pin), Some(ScrubPhase::Active | ScrubPhase::After)) = (self.spec.pin, self.phase)
        {
            host.set_pin_layout(pin, PinLayout::Flow { offset: 0.0 })?;
            self.phase = None;
        }

        let section = to_document_space(host.element_bounds(self.spec.section)?, frame.current);
        let vp = frame.viewport;
        let start = section.y0 - vp.line_at(self.spec.start_at);
        let end = (section.y1 - vp.line_at(self.spec.end_at)).max(start);
        let range = ScrollRange::new(start, end)?;

        let pin_rect = match self.spec.pin {
            Some(pin) => {
                let natural = to_document_space(host.element_bounds(pin)?, frame.current);
                Some(natural - Vec2::new(0.0, range.start))
            }
            None => None,
        };
        tracing::debug!(
            section = %self.spec.section,
            start = range.start,
            end = range.end,
            "scrub range measured"
        );
        Ok(Measured { range, pin_rect })
    }

    /// Apply the region for the scroll position in `frame`.
    ///
    /// Phase and progress are recomputed from the final position alone, so a jump across the
    /// whole range in a single tick still lands on the correct layout and progress.
    pub fn update(&mut self, frame: &ScrollFrame, host: &mut dyn Host) -> MotionResult<()> {
        if frame.resized {
            self.invalidate();
        }
        let measured = match self.measured {
            Some(m) => m,
            None => {
                let m = self.measure(frame, host)?;
                self.measured = Some(m);
                m
            }
        };

        let position = frame.current;
        let phase = measured.range.phase(position);
        let progress = measured.range.progress(position);

        if self.phase != Some(phase) {
            if let Some(pin) = self.spec.pin {
                let layout = match phase {
                    ScrubPhase::Before => PinLayout::Flow { offset: 0.0 },
                    ScrubPhase::Active => PinLayout::Fixed {
                        rect: measured.pin_rect.unwrap_or_default(),
                    },
                    ScrubPhase::After => PinLayout::Flow {
                        offset: measured.range.len(),
                    },
                };
                host.set_pin_layout(pin, layout)?;
            }
            tracing::debug!(section = %self.spec.section, ?phase, progress, "scrub phase");
        }

        let first = self.phase.is_none();
        self.phase = Some(phase);
        if first || progress != self.progress {
            self.progress = progress;
            self.write_bindings(host);
        }
        Ok(())
    }

    /// Write every binding at the current progress. A binding whose target is gone is dropped;
    /// other failures leave it for the next write.
    fn write_bindings(&mut self, host: &mut dyn Host) {
        let section = self.spec.section;
        let progress = self.progress;
        self.spec.bindings.retain(|b| {
            match host.write_style(b.target, &Style::lerp(&b.from, &b.to, progress)) {
                Ok(()) => true,
                Err(MotionError::MissingTarget(target)) => {
                    tracing::debug!(%section, %target, "scrub binding target missing, dropped");
                    false
                }
                Err(e) => {
                    tracing::warn!(%section, target = %b.target, "scrub binding write failed: {e}");
                    true
                }
            }
        });
    }

    fn forget(&mut self, removed: &[ElementId]) {
        self.spec.bindings.retain(|b| !removed.contains(&b.target));
    }

    fn depends_on_any(&self, removed: &[ElementId]) -> bool {
        removed.contains(&self.spec.section) || self.spec.pin.is_some_and(|p| removed.contains(&p))
    }
}

/// Identifies a region added through [`ScrubController::add`]. Ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ScrubId(pub usize);

/// Every scrub region on the page, updated from scroll notifications.
#[derive(Debug, Default)]
pub struct ScrubController {
    regions: Vec<(ScrubId, ScrubRegion)>,
    next_id: usize,
    staged_removals: Vec<ElementId>,
}

impl ScrubController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: ScrubSpec) -> MotionResult<ScrubId> {
        let region = ScrubRegion::new(spec)?;
        let id = ScrubId(self.next_id);
        self.next_id += 1;
        self.regions.push((id, region));
        Ok(id)
    }

    pub fn get(&self, id: ScrubId) -> Option<&ScrubRegion> {
        self.regions
            .iter()
            .find(|(rid, _)| *rid == id)
            .map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Record elements removed from the document. Regions whose section or pin is among them
    /// are dropped, and bindings targeting them forgotten, before the next update.
    pub fn stage_removed(&mut self, removed: &[ElementId]) {
        self.staged_removals.extend_from_slice(removed);
    }

    fn drop_staged(&mut self) {
        if self.staged_removals.is_empty() {
            return;
        }
        let removed = std::mem::take(&mut self.staged_removals);
        self.regions.retain_mut(|(id, region)| {
            if region.depends_on_any(&removed) {
                tracing::debug!(?id, section = %region.spec.section, "scrub region removed");
                return false;
            }
            region.forget(&removed);
            true
        });
    }

    /// Update every region. A region whose section or pin has vanished is dropped; any other
    /// failure is logged and retried on the next notification.
    pub fn on_scroll(&mut self, frame: &ScrollFrame, host: &mut dyn Host) {
        self.drop_staged();
        self.regions
            .retain_mut(|(id, region)| match region.update(frame, host) {
                Ok(()) => true,
                Err(MotionError::MissingTarget(target)) => {
                    tracing::debug!(?id, %target, "scrub element missing, dropped");
                    false
                }
                Err(e) => {
                    tracing::warn!(?id, "scrub update skipped: {e}");
                    true
                }
            });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scrub.rs"]
mod tests;
