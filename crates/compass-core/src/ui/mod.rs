//! Compass UI - dial rendering and page events for `embedded-graphics` targets
//!
//! This module provides:
//! - The [`Drawable`] trait with dirty tracking shared by pages and widgets
//! - Display geometry constants
//! - The rotating [`CompassDial`](dial::CompassDial)
//! - [`PageEvent`]s carrying state-cell updates to pages

pub mod dial;
pub mod styling;

pub use dial::{CompassDial, DialGeometry, DialLabel, TickMark};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::app_state::Permission;
use crate::coordinates::Coordinates;
use crate::geocode::PlaceName;
use crate::heading::HeadingReading;

/// Portrait display: a square dial on top, readouts underneath.
pub const DISPLAY_WIDTH_PX: u16 = 240;
pub const DISPLAY_HEIGHT_PX: u16 = 320;

/// Full-screen bounding rectangle.
pub fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Draw the element to the display within its bounds
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);
}

/// State-cell updates delivered to pages
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Heading(HeadingReading),
    Altitude(f64),
    Coordinates(Coordinates),
    PlaceName(PlaceName),
    Permission(Permission),
}

#[cfg(test)]
pub(crate) mod testing {
    use core::convert::Infallible;

    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    /// Draw target that records how many pixels of a given color were drawn
    /// and where they landed.
    pub struct PixelProbe {
        size: Size,
        pub watched: Rgb565,
        pub total: usize,
        pub hits: usize,
        pub min: Point,
        pub max: Point,
    }

    impl PixelProbe {
        pub fn new(size: Size, watched: Rgb565) -> Self {
            Self {
                size,
                watched,
                total: 0,
                hits: 0,
                min: Point::new(i32::MAX, i32::MAX),
                max: Point::new(i32::MIN, i32::MIN),
            }
        }

        /// Center of the bounding box of the watched pixels.
        pub fn hits_center(&self) -> Point {
            Point::new((self.min.x + self.max.x) / 2, (self.min.y + self.max.y) / 2)
        }
    }

    impl OriginDimensions for PixelProbe {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for PixelProbe {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                self.total += 1;
                if color == self.watched {
                    self.hits += 1;
                    self.min = Point::new(self.min.x.min(point.x), self.min.y.min(point.y));
                    self.max = Point::new(self.max.x.max(point.x), self.max.y.max(point.y));
                }
            }
            Ok(())
        }
    }
}
