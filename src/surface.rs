//! Rendering-collaborator interface
//!
//! The core never touches the host's widgets directly. Whenever the active
//! slide, the progress indicator, or the adjacent-navigation affordances
//! change, it calls into [`Surface`].

/// Interface the rendering collaborator must provide.
///
/// Implementations are called from the engine's scheduled tasks and must be
/// cheap and non-blocking; anything expensive belongs on the host's own
/// render path.
pub trait Surface: Send + Sync {
    /// Number of slides on the surface.
    ///
    /// Read once at construction and fixed for the lifetime of the
    /// carousel. Must be at least 1 for construction to succeed.
    fn slide_count(&self) -> usize;

    /// Marks slide `index` as the active one (and all others inactive).
    ///
    /// `index` is always within `0..slide_count()`.
    fn show_slide(&self, index: usize);

    /// Renders the progress indicator at `fraction` of full width.
    ///
    /// `fraction` is always within `[0, 1]`. Called at display-refresh
    /// cadence while the carousel is running, and once with a frozen
    /// value when it pauses.
    fn render_progress(&self, fraction: f32);

    /// Enables or disables the previous/next navigation controls.
    ///
    /// Receives `false` values only at collection edges when looping is
    /// disabled. The default implementation ignores the call, for hosts
    /// without adjacent-navigation controls.
    fn set_nav_enabled(&self, previous: bool, next: bool) {
        let _ = (previous, next);
    }
}

/// Headless surface that accepts every call and renders nothing.
///
/// Useful for driving the timing core without a host, and as a stand-in
/// in tests that only observe the notification channels.
#[derive(Debug, Clone, Copy)]
pub struct NullSurface {
    slides: usize,
}

impl NullSurface {
    /// Creates a headless surface reporting `slides` slides.
    #[must_use]
    pub const fn new(slides: usize) -> Self {
        Self { slides }
    }
}

impl Surface for NullSurface {
    fn slide_count(&self) -> usize {
        self.slides
    }

    fn show_slide(&self, _index: usize) {}

    fn render_progress(&self, _fraction: f32) {}
}
