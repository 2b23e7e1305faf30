//! Compass page
//!
//! The rotating dial fills the top square of the screen. Underneath it sit
//! the heading readout and, once location permission is granted, altitude,
//! coordinates and the resolved place name.

use core::cell::Cell;

use embassy_time::Duration;
use embedded_graphics::{
    Drawable as EgDrawable,
    mono_font::{
        MonoTextStyle,
        iso_8859_1::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use log::debug;

use crate::animation::HeadingAnimator;
use crate::app_state::Permission;
use crate::coordinates::Coordinates;
use crate::geocode::PlaceName;
use crate::heading::HeadingReading;
use crate::pages::Page;
use crate::readout::{altitude_text, heading_text};
use crate::ui::styling::{BACKGROUND, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::{CompassDial, Drawable, PageEvent};

/// Gap between the dial and the heading readout
const READOUT_TOP_GAP_PX: i32 = 8;

/// Vertical middle of each readout line, relative to the readout area top
const HEADING_LINE_Y_PX: i32 = 10;
const ALTITUDE_LINE_Y_PX: i32 = 32;
const COORDINATES_LINE_Y_PX: i32 = 46;
const PLACE_LINE_Y_PX: i32 = 60;

/// Longest prefix of `text` holding at most `max_chars` characters.
fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub struct CompassPage {
    bounds: Rectangle,
    dial: CompassDial,
    animator: HeadingAnimator,
    reading: HeadingReading,
    permission: Permission,
    altitude: Option<f64>,
    coordinates: Option<Coordinates>,
    place_name: Option<PlaceName>,
    dirty: Cell<bool>,
}

impl CompassPage {
    /// Create a page covering `bounds`. The dial tweens toward each new
    /// heading over `animation`.
    pub fn new(bounds: Rectangle, animation: Duration) -> Self {
        let side = bounds.size.width.min(bounds.size.height);
        let dial_bounds = Rectangle::new(bounds.top_left, Size::new(side, side));

        Self {
            bounds,
            dial: CompassDial::new(dial_bounds),
            animator: HeadingAnimator::new(animation),
            reading: HeadingReading::default(),
            permission: Permission::default(),
            altitude: None,
            coordinates: None,
            place_name: None,
            dirty: Cell::new(true),
        }
    }

    pub fn reading(&self) -> HeadingReading {
        self.reading
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Angle the dial face is currently drawn at.
    pub fn displayed_heading(&self) -> f32 {
        self.dial.heading()
    }

    /// Top edge of the readout area below the dial.
    fn readout_top(&self) -> i32 {
        let dial = Drawable::bounds(&self.dial);
        dial.top_left.y + dial.size.height as i32 + READOUT_TOP_GAP_PX
    }

    /// Clip a secondary line to what fits across the page in `FONT_6X10`.
    fn fit_secondary<'t>(&self, text: &'t str) -> &'t str {
        let advance = FONT_6X10.character_size.width + FONT_6X10.character_spacing;
        clip_chars(text, (self.bounds.size.width / advance) as usize)
    }

    fn draw_line<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        text: &str,
        y: i32,
        style: MonoTextStyle<'_, Rgb565>,
    ) -> Result<(), D::Error> {
        let center_x = self.bounds.top_left.x + self.bounds.size.width as i32 / 2;
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        EgDrawable::draw(
            &Text::with_text_style(text, Point::new(center_x, y), style, text_style),
            display,
        )?;
        Ok(())
    }
}

impl Page for CompassPage {
    fn title(&self) -> &str {
        "Compass"
    }

    fn on_activate(&mut self) {
        self.dirty.set(true);
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::Heading(reading) => {
                self.reading = *reading;
                self.animator.set_target(reading.cumulative);
            }
            PageEvent::Altitude(altitude) => self.altitude = Some(*altitude),
            PageEvent::Coordinates(coordinates) => self.coordinates = Some(*coordinates),
            PageEvent::PlaceName(name) => self.place_name = Some(name.clone()),
            PageEvent::Permission(permission) => {
                debug!("Compass page permission: {:?}", permission);
                self.permission = *permission;
            }
        }
        self.dirty.set(true);
        true
    }

    fn update(&mut self, elapsed: Duration) {
        if self.animator.advance(elapsed) {
            self.dial.set_heading(self.animator.value());
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        Drawable::draw(self, display)?;
        self.dial.mark_clean();
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        Drawable::bounds(self)
    }

    fn is_dirty(&self) -> bool {
        Drawable::is_dirty(self)
    }

    fn mark_clean(&mut self) {
        Drawable::mark_clean(self)
    }

    fn mark_dirty(&mut self) {
        Drawable::mark_dirty(self)
    }
}

impl Drawable for CompassPage {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if !Drawable::is_dirty(self) {
            return Ok(());
        }

        display.fill_solid(&self.bounds, BACKGROUND)?;
        self.dial.draw(display)?;

        let top = self.readout_top();
        let heading = heading_text(self.reading.raw);
        self.draw_line(
            display,
            &heading,
            top + HEADING_LINE_Y_PX,
            MonoTextStyle::new(&FONT_10X20, TEXT_PRIMARY),
        )?;

        // Location readouts exist only while permission is granted.
        if self.permission == Permission::Granted {
            let secondary = MonoTextStyle::new(&FONT_6X10, TEXT_SECONDARY);

            let altitude = altitude_text(self.altitude);
            self.draw_line(display, &altitude, top + ALTITUDE_LINE_Y_PX, secondary)?;

            if let Some(coordinates) = self.coordinates {
                let dms = coordinates.to_dms();
                let dms = self.fit_secondary(&dms);
                self.draw_line(display, dms, top + COORDINATES_LINE_Y_PX, secondary)?;
            }

            if let Some(name) = &self.place_name {
                let name = self.fit_secondary(name);
                self.draw_line(display, name, top + PLACE_LINE_Y_PX, secondary)?;
            }
        }

        self.dirty.set(false);
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty.get() || self.dial.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty.set(false);
        self.dial.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty.set(true);
    }
}
