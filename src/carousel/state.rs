//! Slide state representation
//!
//! Atomic state shared between the engine's scheduled tasks and the
//! navigation entry points. The slide index advances via compare-exchange
//! so a timer firing that races a navigation request applies exactly one
//! transition, and the index is never observable outside its valid range.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// Engine phase.
///
/// `Idle` covers both "never started" and "torn down"; `Running` means a
/// repeating timer and an animation loop are scheduled; `Paused` means
/// neither exists and a frozen progress fraction is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TimerPhase {
    /// No work scheduled, no frozen progress
    Idle = 0,
    /// Timer and animation loop scheduled
    Running = 1,
    /// No work scheduled, frozen progress retained
    Paused = 2,
}

impl TimerPhase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Paused,
            _ => Self::Idle,
        }
    }
}

/// Record of an applied slide transition for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTransition {
    /// Slide index the carousel moved from
    pub from_index: usize,
    /// Slide index the carousel moved to (may equal `from_index` for a
    /// forced user-initiated transition)
    pub to_index: usize,
    /// Whether this originated from explicit navigation rather than the
    /// auto-advance timer
    pub user_initiated: bool,
}

/// Atomic slide state.
///
/// Holds the current index, the loop/clamp policy, the engine phase, and
/// the timing of the current dwell cycle. All mutation goes through the
/// methods below; the slide count and loop policy are fixed at
/// construction.
pub struct SlideState {
    /// Current slide index, advanced via CAS
    current_index: AtomicUsize,
    /// Total number of slides, at least 1
    slide_count: usize,
    /// Wrap at collection edges instead of clamping
    loop_enabled: bool,
    /// Engine phase, stored as `TimerPhase as u8`
    phase: AtomicU8,
    /// Start of the current dwell cycle
    cycle_started_at: Mutex<Instant>,
    /// Bumped on every cycle restart so the animation loop can tell a
    /// completed cycle from a fresh one
    cycle_generation: AtomicU64,
    /// Progress snapshot retained while paused
    frozen_fraction: Mutex<Option<f32>>,
}

impl SlideState {
    /// Creates state positioned at `initial_index` (clamped into range).
    ///
    /// `slide_count` must be at least 1; the engine validates this against
    /// the surface before construction.
    #[must_use]
    pub fn new(slide_count: usize, loop_enabled: bool, initial_index: usize) -> Self {
        debug_assert!(slide_count >= 1, "slide_count must be at least 1");
        Self {
            current_index: AtomicUsize::new(initial_index.min(slide_count - 1)),
            slide_count,
            loop_enabled,
            phase: AtomicU8::new(TimerPhase::Idle as u8),
            cycle_started_at: Mutex::new(Instant::now()),
            cycle_generation: AtomicU64::new(0),
            frozen_fraction: Mutex::new(None),
        }
    }

    /// Returns the current slide index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index.load(Ordering::SeqCst)
    }

    /// Returns the total number of slides.
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Returns whether index arithmetic wraps at collection edges.
    #[must_use]
    pub const fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Returns the current engine phase.
    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        TimerPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Stores the engine phase unconditionally.
    pub fn set_phase(&self, phase: TimerPhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
    }

    /// Atomically moves from `from` to `to` phase.
    ///
    /// Returns `false` if the phase was not `from`, which makes repeated
    /// pause calls a natural no-op.
    pub fn transition_phase(&self, from: TimerPhase, to: TimerPhase) -> bool {
        self.phase
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Resolves a raw requested index into the valid range.
    ///
    /// Wraps modulo the slide count when looping, clamps to the edges
    /// otherwise. Never rejects an input.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resolve_target(&self, raw_index: i64) -> usize {
        let count = self.slide_count as i64;
        let target = if self.loop_enabled {
            raw_index.rem_euclid(count)
        } else {
            raw_index.clamp(0, count - 1)
        };
        target as usize
    }

    /// Applies a navigation request.
    ///
    /// The request is applied when the resolved target differs from the
    /// current index, or unconditionally when `user_initiated` is set
    /// (explicit requests force a timer restart even when landing on the
    /// same slide). Returns `None` for a strict no-op, including the case
    /// where a concurrent transition won the index race.
    pub fn apply(&self, raw_index: i64, user_initiated: bool) -> Option<SlideTransition> {
        let from = self.current_index();
        let to = self.resolve_target(raw_index);
        debug_assert!(to < self.slide_count, "resolved index out of range");

        if to == from && !user_initiated {
            return None;
        }

        // CAS so concurrent appliers settle on exactly one winner.
        if self
            .current_index
            .compare_exchange(from, to, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }

        Some(SlideTransition {
            from_index: from,
            to_index: to,
            user_initiated,
        })
    }

    /// Applies a navigation request relative to the current index.
    #[allow(clippy::cast_possible_wrap)]
    pub fn step(&self, delta: i64, user_initiated: bool) -> Option<SlideTransition> {
        let current = self.current_index() as i64;
        self.apply(current + delta, user_initiated)
    }

    /// Opens a fresh dwell cycle: resets the cycle timestamp to now,
    /// discards any frozen snapshot, and bumps the cycle generation.
    ///
    /// # Panics
    ///
    /// Panics if an internal mutex is poisoned.
    pub fn begin_cycle(&self) {
        *self
            .cycle_started_at
            .lock()
            .expect("cycle_started_at lock poisoned") = Instant::now();
        *self
            .frozen_fraction
            .lock()
            .expect("frozen_fraction lock poisoned") = None;
        self.cycle_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns the current cycle generation.
    #[must_use]
    pub fn cycle_generation(&self) -> u64 {
        self.cycle_generation.load(Ordering::SeqCst)
    }

    /// Computes the live progress fraction for the given dwell duration,
    /// saturating at 1.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn live_fraction(&self, duration: Duration) -> f32 {
        let elapsed = self
            .cycle_started_at
            .lock()
            .expect("cycle_started_at lock poisoned")
            .elapsed();
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }

    /// Freezes the live progress fraction and returns the snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn freeze(&self, duration: Duration) -> f32 {
        let fraction = self.live_fraction(duration);
        *self
            .frozen_fraction
            .lock()
            .expect("frozen_fraction lock poisoned") = Some(fraction);
        fraction
    }

    /// Returns the frozen progress snapshot, if paused with one retained.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn frozen_fraction(&self) -> Option<f32> {
        *self
            .frozen_fraction
            .lock()
            .expect("frozen_fraction lock poisoned")
    }
}

impl std::fmt::Debug for SlideState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideState")
            .field("current_index", &self.current_index())
            .field("slide_count", &self.slide_count)
            .field("loop_enabled", &self.loop_enabled)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
