// src/pages/page.rs
//! Core page abstraction for the UI page system.
//!
//! The render loop calls these methods in a well-defined order each frame:
//!
//! 1. **`on_activate`**: once, when the page becomes visible.
//! 2. **`on_event`**: zero or more times per frame for state updates.
//! 3. **`update`**: once per frame to advance animations.
//! 4. **`draw_page`**: when `is_dirty()` is true.
//! 5. **`on_deactivate`**: once, when the page goes away.

use embassy_time::Duration;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::PageEvent;

/// Trait that all UI pages must implement.
pub trait Page {
    /// Human-readable title (may appear in headers or debug logs).
    fn title(&self) -> &str;

    /// Called once when this page becomes the active page.
    fn on_activate(&mut self) {}

    /// Called once when this page is no longer the active page.
    fn on_deactivate(&mut self) {}

    /// Handle an incoming [`PageEvent`].
    ///
    /// Returns `true` if the event was consumed and the page needs a redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    /// Advance per-frame state (animations, timers, etc.) by `elapsed`.
    fn update(&mut self, elapsed: Duration);

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page has regions that need redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}
