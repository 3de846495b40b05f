//! `zoetrope` - timing and state-machine core for auto-advancing slide
//! carousels.
//!
//! Reconciles a repeating auto-advance timer, a continuously animated
//! progress indicator, and user navigation into one race-free notion of
//! "current slide" and "elapsed dwell time", across pause/resume cycles
//! and index wraparound. Rendering and input binding stay outside the
//! crate: the host provides a [`Surface`] and maps its interaction events
//! onto the [`Carousel`] operations.
//!
//! ```no_run
//! use std::sync::Arc;
//! use zoetrope::{Carousel, CarouselConfig, NullSurface};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> zoetrope::Result<()> {
//! let carousel = Arc::new(Carousel::new(
//!     Arc::new(NullSurface::new(5)),
//!     CarouselConfig::default(),
//! )?);
//! carousel.start();
//!
//! // Wire interaction events to the core:
//! carousel.request_next(true); // "next" button
//! carousel.pause();            // pointer entered
//! carousel.start();            // pointer left
//! carousel.teardown();
//! # Ok(())
//! # }
//! ```

pub mod carousel;
pub mod config;
pub mod error;
pub mod observability;
pub mod surface;
pub mod timing;

pub use carousel::{Carousel, SlideState, SlideTransition, TimerPhase};
pub use config::CarouselConfig;
pub use error::{ConfigError, ConstructionError, Result, ZoetropeError};
pub use surface::{NullSurface, Surface};
pub use timing::{FrameScheduler, RepeatingTimer, Timers, TokioTimers};
