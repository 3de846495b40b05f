//! Shared integration-test harness: a recording surface that captures
//! every call the engine makes, and hand-driven timers that let a test
//! fire individual timer and frame callbacks deterministically.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use zoetrope::{FrameScheduler, RepeatingTimer, Surface, Timers};

/// Surface that records every call for later assertions.
#[derive(Debug)]
pub struct RecordingSurface {
    slides: usize,
    shown: Mutex<Vec<usize>>,
    progress: Mutex<Vec<f32>>,
    nav: Mutex<Vec<(bool, bool)>>,
}

impl RecordingSurface {
    pub fn new(slides: usize) -> Arc<Self> {
        Arc::new(Self {
            slides,
            shown: Mutex::new(Vec::new()),
            progress: Mutex::new(Vec::new()),
            nav: Mutex::new(Vec::new()),
        })
    }

    /// The slide most recently marked active.
    pub fn active(&self) -> Option<usize> {
        self.shown.lock().unwrap().last().copied()
    }

    /// Every `show_slide` call, in order.
    pub fn shown(&self) -> Vec<usize> {
        self.shown.lock().unwrap().clone()
    }

    /// The most recently rendered progress fraction.
    pub fn last_progress(&self) -> Option<f32> {
        self.progress.lock().unwrap().last().copied()
    }

    /// Number of `render_progress` calls so far.
    pub fn progress_calls(&self) -> usize {
        self.progress.lock().unwrap().len()
    }

    /// The most recent navigation-enablement state.
    pub fn last_nav(&self) -> Option<(bool, bool)> {
        self.nav.lock().unwrap().last().copied()
    }
}

impl Surface for RecordingSurface {
    fn slide_count(&self) -> usize {
        self.slides
    }

    fn show_slide(&self, index: usize) {
        self.shown.lock().unwrap().push(index);
    }

    fn render_progress(&self, fraction: f32) {
        self.progress.lock().unwrap().push(fraction);
    }

    fn set_nav_enabled(&self, previous: bool, next: bool) {
        self.nav.lock().unwrap().push((previous, next));
    }
}

/// Hand-driven scheduling: each created timer or frame source waits for
/// the test to fire it explicitly.
///
/// The engine creates a fresh pair on every start; firing always targets
/// the most recently created instance, so ticks aimed at an engine
/// incarnation that was since cancelled cannot leak into the next one.
#[derive(Debug, Default)]
pub struct ManualTimers {
    timers: Mutex<Vec<Arc<Notify>>>,
    frames: Mutex<Vec<Arc<Notify>>>,
}

impl ManualTimers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fires one auto-advance timer tick.
    pub fn fire_timer(&self) {
        if let Some(notify) = self.timers.lock().unwrap().last() {
            notify.notify_one();
        }
    }

    /// Fires one animation-frame callback.
    pub fn fire_frame(&self) {
        if let Some(notify) = self.frames.lock().unwrap().last() {
            notify.notify_one();
        }
    }

    /// Number of repeating timers created so far.
    pub fn timers_created(&self) -> usize {
        self.timers.lock().unwrap().len()
    }
}

struct ManualWait(Arc<Notify>);

#[async_trait]
impl RepeatingTimer for ManualWait {
    async fn tick(&mut self) {
        self.0.notified().await;
    }
}

#[async_trait]
impl FrameScheduler for ManualWait {
    async fn next_frame(&mut self) {
        self.0.notified().await;
    }
}

impl Timers for ManualTimers {
    fn repeating(&self, _period: Duration) -> Box<dyn RepeatingTimer> {
        let notify = Arc::new(Notify::new());
        self.timers.lock().unwrap().push(Arc::clone(&notify));
        Box::new(ManualWait(notify))
    }

    fn frames(&self) -> Box<dyn FrameScheduler> {
        let notify = Arc::new(Notify::new());
        self.frames.lock().unwrap().push(Arc::clone(&notify));
        Box::new(ManualWait(notify))
    }
}

/// Lets the engine's spawned tasks process pending firings.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
