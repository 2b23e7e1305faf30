//! Colors for the compass face
//!
//! The dial is white on black. Translucent overlays are pre-blended against
//! the black background since RGB565 targets have no alpha channel.
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Screen background
pub const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);

/// Ring, ticks, labels and the lubber line
pub const DIAL_FOREGROUND: Rgb565 = Rgb565::new(31, 63, 31);

/// North indicator - #FF3B30
pub const NORTH_RED: Rgb565 = Rgb565::new(255 >> 3, 59 >> 2, 48 >> 3);

/// Center cross - white at 50% over black
pub const OVERLAY_STRONG: Rgb565 = Rgb565::new(128 >> 3, 128 >> 2, 128 >> 3);

/// Center disc - white at 20% over black
pub const OVERLAY_FAINT: Rgb565 = Rgb565::new(51 >> 3, 51 >> 2, 51 >> 3);

/// Heading readout
pub const TEXT_PRIMARY: Rgb565 = DIAL_FOREGROUND;

/// Altitude, coordinates and place name - white at 70% over black
pub const TEXT_SECONDARY: Rgb565 = Rgb565::new(179 >> 3, 179 >> 2, 179 >> 3);
