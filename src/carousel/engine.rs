//! Carousel engine orchestration
//!
//! The `Carousel` reconciles the repeating auto-advance timer, the
//! continuously animated progress indicator, and externally requested
//! navigation into one consistent notion of "current slide" and "elapsed
//! dwell time", across pause/resume cycles and index wraparound.
//!
//! Coordinates:
//! - Index transitions (auto-advance and explicit navigation)
//! - The repeating timer task and the progress animation task
//! - Cancel-then-restart sequencing so no stale firing survives a phase
//!   change
//! - Transition and progress notification channels for collaborators

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::CarouselConfig;
use crate::error::{ConstructionError, Result};
use crate::surface::Surface;
use crate::timing::{Timers, TokioTimers};

use super::state::{SlideState, SlideTransition, TimerPhase};

/// Handles for the currently scheduled timer and animation tasks.
///
/// At most one of these exists at any time; [`Carousel::stop_all`] takes
/// and cancels it before any new work is scheduled.
struct ScheduledWork {
    cancel: CancellationToken,
    timer: JoinHandle<()>,
    frames: JoinHandle<()>,
}

/// State and channels shared with the scheduled tasks.
struct Shared {
    state: SlideState,
    surface: Arc<dyn Surface>,
    transition_tx: mpsc::UnboundedSender<SlideTransition>,
    progress_tx: watch::Sender<f32>,
}

impl Shared {
    /// Timer-firing path: advance to the adjacent slide, then open a new
    /// dwell cycle whether or not the index moved (in clamp mode the
    /// final slide keeps its progress cycling).
    fn advance_auto(&self) {
        if let Some(transition) = self.state.step(1, false) {
            debug!(
                from = transition.from_index,
                to = transition.to_index,
                "auto-advance"
            );
            self.apply_transition(&transition);
        }
        self.state.begin_cycle();
    }

    /// Pushes an applied transition out to the surface and the
    /// notification channel.
    fn apply_transition(&self, transition: &SlideTransition) {
        self.surface.show_slide(transition.to_index);
        self.refresh_nav();
        let _ = self.transition_tx.send(transition.clone());
    }

    fn refresh_nav(&self) {
        if self.state.loop_enabled() {
            self.surface.set_nav_enabled(true, true);
        } else {
            let index = self.state.current_index();
            self.surface
                .set_nav_enabled(index > 0, index + 1 < self.state.slide_count());
        }
    }

    fn publish_progress(&self, fraction: f32) {
        self.surface.render_progress(fraction);
        // send_replace so the latest value is retained even before any
        // observer has subscribed.
        self.progress_tx.send_replace(fraction);
    }
}

/// Self-contained carousel controller.
///
/// Construction validates the surface and configuration; afterwards every
/// operation is infallible: navigation requests are normalized rather
/// than rejected, and `pause`/`teardown` are idempotent.
///
/// All operations take `&self`; the instance is designed to sit behind an
/// `Arc` shared between the host's input bindings.
pub struct Carousel {
    config: CarouselConfig,
    shared: Arc<Shared>,
    timers: Arc<dyn Timers>,
    /// Exclusively owned set of outstanding scheduled handles
    work: StdMutex<Option<ScheduledWork>>,
    /// Receiver half of the transition channel (single consumer)
    transition_rx: Mutex<mpsc::UnboundedReceiver<SlideTransition>>,
}

impl Carousel {
    /// Creates a carousel over the given surface with tokio-backed
    /// scheduling.
    ///
    /// The initial slide is shown immediately; no work is scheduled until
    /// [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NoSlides`] if the surface reports zero
    /// slides, or a configuration error if validation fails.
    pub fn new(surface: Arc<dyn Surface>, config: CarouselConfig) -> Result<Self> {
        Self::with_timers(surface, config, Arc::new(TokioTimers))
    }

    /// Creates a carousel with a custom scheduling implementation.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_timers(
        surface: Arc<dyn Surface>,
        config: CarouselConfig,
        timers: Arc<dyn Timers>,
    ) -> Result<Self> {
        config.validate()?;
        let slide_count = surface.slide_count();
        if slide_count == 0 {
            return Err(ConstructionError::NoSlides.into());
        }

        let state = SlideState::new(slide_count, config.loop_enabled, config.initial_index);
        let (transition_tx, transition_rx) = mpsc::unbounded_channel();
        let (progress_tx, _) = watch::channel(0.0_f32);

        let shared = Arc::new(Shared {
            state,
            surface,
            transition_tx,
            progress_tx,
        });
        shared.surface.show_slide(shared.state.current_index());
        shared.refresh_nav();

        debug!(
            slide_count,
            loop_enabled = config.loop_enabled,
            initial_index = shared.state.current_index(),
            "carousel constructed"
        );

        Ok(Self {
            config,
            shared,
            timers,
            work: StdMutex::new(None),
            transition_rx: Mutex::new(transition_rx),
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Requests navigation to `raw_index`.
    ///
    /// Any integer is accepted: the index wraps modulo the slide count
    /// when looping, and clamps to the collection edges otherwise. The
    /// request applies when the resolved target differs from the current
    /// slide, or unconditionally when `user_initiated` is set (explicit
    /// requests restart the dwell period even when landing on the same
    /// slide). Anything else is a strict no-op with no signals emitted.
    pub fn request_go_to(&self, raw_index: i64, user_initiated: bool) {
        let Some(transition) = self.shared.state.apply(raw_index, user_initiated) else {
            return;
        };
        info!(
            from = transition.from_index,
            to = transition.to_index,
            user_initiated,
            "slide transition"
        );
        self.shared.apply_transition(&transition);

        // An applied transition restarts the dwell period from zero.
        // Before the engine has ever been started the index change
        // stands alone.
        if self.shared.state.phase() == TimerPhase::Idle {
            return;
        }
        self.start();
    }

    /// Requests navigation to the next slide.
    pub fn request_next(&self, user_initiated: bool) {
        self.request_relative(1, user_initiated);
    }

    /// Requests navigation to the previous slide.
    pub fn request_previous(&self, user_initiated: bool) {
        self.request_relative(-1, user_initiated);
    }

    #[allow(clippy::cast_possible_wrap)]
    fn request_relative(&self, delta: i64, user_initiated: bool) {
        let current = self.shared.state.current_index() as i64;
        self.request_go_to(current + delta, user_initiated);
    }

    // =========================================================================
    // Timing engine
    // =========================================================================

    /// Starts (or restarts) the auto-advance timer and the progress
    /// animation from the beginning of a fresh dwell cycle.
    ///
    /// Idempotent: an already-running engine is stopped cleanly first, so
    /// at most one timer and one animation loop exist afterwards. Resume
    /// from pause always grants a fresh full dwell period rather than the
    /// frozen remainder.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, or if the internal work
    /// mutex is poisoned.
    pub fn start(&self) {
        self.stop_all();
        self.shared.state.set_phase(TimerPhase::Running);
        self.shared.state.begin_cycle();
        self.shared.publish_progress(0.0);

        let cancel = CancellationToken::new();
        let timer = self.spawn_timer_task(&cancel);
        let frames = self.spawn_frame_task(&cancel);
        *self.work.lock().expect("work lock poisoned") = Some(ScheduledWork {
            cancel,
            timer,
            frames,
        });
        debug!("engine started");
    }

    /// Pauses the engine, freezing the progress indicator in place.
    ///
    /// Cancels the timer and animation loop synchronously (no scheduled
    /// firing survives the call) and emits the frozen fraction once as a
    /// final non-animated snapshot. No-op unless currently running, so
    /// rapid pause/start alternation (hover in and out) is safe.
    pub fn pause(&self) {
        if !self
            .shared
            .state
            .transition_phase(TimerPhase::Running, TimerPhase::Paused)
        {
            return;
        }
        self.stop_all();
        let frozen = self.shared.state.freeze(self.config.slide_duration);
        self.shared.publish_progress(frozen);
        debug!(frozen, "engine paused");
    }

    /// Tears the engine down: cancels all scheduled work unconditionally.
    ///
    /// Idempotent and infallible; no callback fires after it returns.
    /// The carousel can be started again afterwards.
    pub fn teardown(&self) {
        self.stop_all();
        self.shared.state.set_phase(TimerPhase::Idle);
        debug!("engine torn down");
    }

    /// Cancels any outstanding scheduled work.
    ///
    /// Every start/pause/teardown path runs this first; combined with the
    /// exclusive `work` slot it guarantees at most one timer task and one
    /// animation task at any time, and that no stale firing can land
    /// after a phase change.
    fn stop_all(&self) {
        if let Some(work) = self.work.lock().expect("work lock poisoned").take() {
            work.cancel.cancel();
            work.timer.abort();
            work.frames.abort();
        }
    }

    fn spawn_timer_task(&self, cancel: &CancellationToken) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let cancel = cancel.clone();
        let mut timer = self.timers.repeating(self.config.slide_duration);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!("auto-advance timer cancelled");
                        break;
                    }
                    () = timer.tick() => {
                        shared.advance_auto();
                    }
                }
            }
        })
    }

    fn spawn_frame_task(&self, cancel: &CancellationToken) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let cancel = cancel.clone();
        let mut frames = self.timers.frames();
        let duration = self.config.slide_duration;
        tokio::spawn(async move {
            // Generation of the cycle whose progress already completed;
            // the loop stays quiet until the timer opens the next cycle.
            let mut completed_cycle = None;
            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!("animation loop cancelled");
                        break;
                    }
                    () = frames.next_frame() => {
                        let cycle = shared.state.cycle_generation();
                        if completed_cycle == Some(cycle) {
                            continue;
                        }
                        let fraction = shared.state.live_fraction(duration);
                        if fraction >= 1.0 {
                            shared.publish_progress(0.0);
                            completed_cycle = Some(cycle);
                        } else {
                            shared.publish_progress(fraction);
                        }
                    }
                }
            }
        })
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Returns the current slide index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.shared.state.current_index()
    }

    /// Returns the total number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.shared.state.slide_count()
    }

    /// Returns the current engine phase.
    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.shared.state.phase()
    }

    /// Returns the progress fraction in `[0, 1]`: live while running,
    /// the frozen snapshot while paused, zero while idle.
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        match self.shared.state.phase() {
            TimerPhase::Idle => 0.0,
            TimerPhase::Paused => self.shared.state.frozen_fraction().unwrap_or(0.0),
            TimerPhase::Running => self.shared.state.live_fraction(self.config.slide_duration),
        }
    }

    /// Returns a watch receiver carrying the latest published progress
    /// fraction.
    #[must_use]
    pub fn progress_updates(&self) -> watch::Receiver<f32> {
        self.shared.progress_tx.subscribe()
    }

    /// Tries to receive an applied transition (non-blocking).
    ///
    /// Returns `None` when no transition is pending.
    pub async fn recv_transition(&self) -> Option<SlideTransition> {
        let mut rx = self.transition_rx.lock().await;
        rx.try_recv().ok()
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        // Scheduled work must not outlive the instance.
        self.stop_all();
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("current_index", &self.current_index())
            .field("slide_count", &self.slide_count())
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
