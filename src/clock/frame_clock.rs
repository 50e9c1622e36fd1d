use std::time::Duration;

use crate::foundation::error::MotionResult;

/// Handle returned by [`FrameClock::on_tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickId(u64);

/// One frame of the shared clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Frames delivered since the clock was created.
    pub frame: u64,
    /// Host timestamp for this frame.
    pub now: Duration,
    /// Time since the previous frame, capped at the clock's maximum delta.
    pub dt: Duration,
    /// Uncapped time since the previous frame.
    pub raw_dt: Duration,
}

impl Tick {
    /// Clamped delta in seconds.
    pub fn dt_secs(&self) -> f64 {
        self.dt.as_secs_f64()
    }

    /// `true` when the raw delta exceeded the clamp, e.g. after a stalled tab.
    pub fn is_clamped(&self) -> bool {
        self.raw_dt > self.dt
    }
}

type TickCallback<C> = Box<dyn FnMut(&Tick, &mut C) -> MotionResult<()>>;

/// Single per-frame driver shared by every animated subsystem.
///
/// Callbacks run in registration order and receive the frame context `C` mutably. A callback
/// returning `Err` is logged and skipped; the rest of the frame still runs.
pub struct FrameClock<C> {
    callbacks: Vec<(TickId, TickCallback<C>)>,
    next_id: u64,
    running: bool,
    last_now: Option<Duration>,
    frame: u64,
    max_delta: Duration,
}

impl<C> FrameClock<C> {
    /// A stopped clock whose per-frame delta never exceeds `max_delta`.
    pub fn new(max_delta: Duration) -> Self {
        Self {
            callbacks: Vec::new(),
            next_id: 0,
            running: false,
            last_now: None,
            frame: 0,
            max_delta,
        }
    }

    /// Begin delivering frames. Returns `false` if the clock was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_now = None;
        tracing::debug!(callbacks = self.callbacks.len(), "frame clock started");
        true
    }

    /// Stop delivering frames. Registrations are kept for the next [`FrameClock::start`].
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        tracing::debug!(frame = self.frame, "frame clock stopped");
        true
    }

    /// `true` between [`FrameClock::start`] and [`FrameClock::stop`].
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Register a per-frame callback. Callbacks run in registration order.
    pub fn on_tick<F>(&mut self, callback: F) -> TickId
    where
        F: FnMut(&Tick, &mut C) -> MotionResult<()> + 'static,
    {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Unregister a callback. Returns `false` for unknown or already removed ids.
    pub fn off_tick(&mut self, id: TickId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cid, _)| *cid != id);
        self.callbacks.len() != before
    }

    /// Callbacks currently registered.
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    /// Deliver one display frame at host time `now`.
    ///
    /// Returns `None` without invoking anything while the clock is stopped. The first frame after
    /// a start has a zero delta.
    pub fn frame(&mut self, now: Duration, cx: &mut C) -> Option<Tick> {
        if !self.running {
            return None;
        }
        let raw_dt = self
            .last_now
            .map(|prev| now.saturating_sub(prev))
            .unwrap_or(Duration::ZERO);
        self.last_now = Some(now);

        let tick = Tick {
            frame: self.frame,
            now,
            dt: raw_dt.min(self.max_delta),
            raw_dt,
        };
        self.frame += 1;
        if tick.is_clamped() {
            tracing::debug!(
                raw_ms = raw_dt.as_millis() as u64,
                "frame delta clamped to {}ms",
                self.max_delta.as_millis()
            );
        }

        for (id, cb) in self.callbacks.iter_mut() {
            if let Err(e) = cb(&tick, cx) {
                tracing::warn!(tick_id = id.0, frame = tick.frame, "tick callback failed: {e}");
            }
        }
        Some(tick)
    }
}

impl<C> std::fmt::Debug for FrameClock<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("callbacks", &self.callbacks.len())
            .field("running", &self.running)
            .field("frame", &self.frame)
            .field("max_delta", &self.max_delta)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/frame_clock.rs"]
mod tests;
