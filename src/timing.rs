//! Host scheduling seams
//!
//! The engine drives two independently scheduled cadences: a repeating
//! wall-clock timer whose period is the slide dwell duration, and a
//! per-frame callback source for the progress animation. Both are
//! abstracted behind capability traits so the core has no dependency on a
//! specific host event loop; the default [`TokioTimers`] implementation is
//! backed by `tokio::time`, which also supplies the deterministic paused
//! clock used by the test suite.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Frame cadence of the progress animation, roughly 60 fps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Recurring timer driving automatic slide advance.
#[async_trait]
pub trait RepeatingTimer: Send {
    /// Completes when the next period elapses.
    async fn tick(&mut self);
}

/// Display-refresh-cadence callback source driving the progress indicator.
#[async_trait]
pub trait FrameScheduler: Send {
    /// Completes at the next frame boundary.
    async fn next_frame(&mut self);
}

/// Factory handing the engine fresh timer and frame instances.
///
/// A new pair is created on every engine start, so implementations must
/// not assume a previous instance was driven to completion.
pub trait Timers: Send + Sync {
    /// Creates a repeating timer with the given period.
    ///
    /// The first firing must be a full period out, not immediate.
    fn repeating(&self, period: Duration) -> Box<dyn RepeatingTimer>;

    /// Creates a per-frame callback source.
    fn frames(&self) -> Box<dyn FrameScheduler>;
}

/// Tokio-backed scheduling.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimers;

struct TokioInterval(Interval);

#[async_trait]
impl RepeatingTimer for TokioInterval {
    async fn tick(&mut self) {
        self.0.tick().await;
    }
}

#[async_trait]
impl FrameScheduler for TokioInterval {
    async fn next_frame(&mut self) {
        self.0.tick().await;
    }
}

impl Timers for TokioTimers {
    fn repeating(&self, period: Duration) -> Box<dyn RepeatingTimer> {
        let mut interval = interval_at(Instant::now() + period, period);
        // A late firing must not be chased by immediate catch-up firings.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Box::new(TokioInterval(interval))
    }

    fn frames(&self) -> Box<dyn FrameScheduler> {
        let mut interval = interval_at(Instant::now() + FRAME_INTERVAL, FRAME_INTERVAL);
        // Frames have no backlog; skip anything missed.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Box::new(TokioInterval(interval))
    }
}
