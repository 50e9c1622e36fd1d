use crate::animation::marquee::Marquee;
use crate::animation::timeline::Timeline;
use crate::clock::frame_clock::Tick;
use crate::foundation::error::MotionResult;
use crate::host::Host;

#[derive(Clone, Debug)]
struct TimelineRun {
    timeline: Timeline,
    elapsed_secs: f64,
}

/// Time-driven animations: intro timelines that play once and marquees that loop forever.
#[derive(Debug, Default)]
pub struct AnimationRunner {
    timelines: Vec<TimelineRun>,
    marquees: Vec<Marquee>,
}

impl AnimationRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `timeline` from zero, writing its initial state right away.
    pub fn add_timeline(&mut self, timeline: Timeline, host: &mut dyn Host) {
        for (target, style) in timeline.sample(0.0) {
            if let Err(e) = host.write_style(target, &style) {
                tracing::debug!(%target, "timeline initial write skipped: {e}");
            }
        }
        self.timelines.push(TimelineRun {
            timeline,
            elapsed_secs: 0.0,
        });
    }

    /// Loop `marquee` until teardown.
    pub fn add_marquee(&mut self, marquee: Marquee) {
        self.marquees.push(marquee);
    }

    /// Timelines still running.
    pub fn active_timelines(&self) -> usize {
        self.timelines.len()
    }

    pub fn marquee_count(&self) -> usize {
        self.marquees.len()
    }

    pub fn tick(&mut self, tick: &Tick, host: &mut dyn Host) -> MotionResult<()> {
        let dt = tick.dt_secs();
        self.timelines.retain_mut(|run| {
            run.elapsed_secs += dt;
            for (target, style) in run.timeline.sample(run.elapsed_secs) {
                if let Err(e) = host.write_style(target, &style) {
                    tracing::debug!(%target, "timeline write skipped: {e}");
                }
            }
            !run.timeline.is_finished(run.elapsed_secs)
        });
        self.marquees.retain_mut(|m| {
            m.advance(dt);
            match host.write_style(m.target, &m.style()) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(target = %m.target, "marquee dropped: {e}");
                    false
                }
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/runner.rs"]
mod tests;
