//! Carousel core
//!
//! Implements the timing and state-machine heart of the controller: a
//! repeating auto-advance timer, a continuously animated progress
//! indicator, and user-triggered navigation reconciled into one
//! consistent, race-free view of the current slide.
//!
//! # Architecture
//!
//! - [`SlideState`]: atomic slide state (current index, loop policy, dwell cycle timing)
//! - [`Carousel`]: orchestrator (timer and animation tasks, navigation, notifications)

pub mod engine;
pub mod state;

pub use engine::Carousel;
pub use state::{SlideState, SlideTransition, TimerPhase};
