//! Rotating compass dial
//!
//! Layout is computed by [`DialGeometry::compute`], a pure function of the
//! dial bounds and the heading; [`CompassDial`] then draws that geometry.
//!
//! # Layout
//!
//! All proportions are expressed in "dial units" where the outer radius is
//! 170 units, and scaled to the actual bounds:
//!
//! ```text
//!            ▲  north indicator (tip at 0.90 R, base just outside the ring)
//!        330  0  30          numeric labels at 0.96 R, every 30°
//!      ┌───────────┐
//!      │ ||||||||| │         ring at 0.78 R, 180 ticks every 2°
//!      │     N     │         every 15th tick is major (longer, thicker)
//!      │  W  +  E  │         cardinal labels 40 units inside the ring
//!      │     S     │
//!      └───────────┘
//! ```
//!
//! The whole face is rotated by `-heading`, so the north indicator keeps
//! pointing north while the device turns. Labels are placed on the rotated
//! positions but drawn upright. The center cross, center disc and lubber line
//! are a fixed overlay and never rotate.

use embedded_graphics::{
    Drawable as EgDrawable,
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle},
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};
use heapless::Vec;

use super::Drawable;
use super::styling::{DIAL_FOREGROUND, NORTH_RED, OVERLAY_FAINT, OVERLAY_STRONG};

/// Outer radius in dial units; every other length below is relative to it.
const DIAL_UNITS: f32 = 170.0;

const RING_RATIO: f32 = 0.78;
const RING_STROKE_UNITS: f32 = 1.0;

const TICK_SPACING_DEG: u16 = 2;
const MAJOR_TICK_EVERY_DEG: u16 = 30;
const MAJOR_TICK_LENGTH_UNITS: f32 = 14.0;
const MINOR_TICK_LENGTH_UNITS: f32 = 8.0;
const MAJOR_TICK_WIDTH_UNITS: f32 = 2.0;
const MINOR_TICK_WIDTH_UNITS: f32 = 1.0;

const NUMBER_LABEL_RATIO: f32 = 0.96;
const CARDINAL_INSET_UNITS: f32 = 40.0;

const ARROW_GAP_UNITS: f32 = 3.0;
const ARROW_TIP_RATIO: f32 = 0.90;
const ARROW_HALF_WIDTH_UNITS: f32 = 6.0;

const CROSS_HALF_LENGTH_UNITS: f32 = 40.0;
const CENTER_DISC_RADIUS_UNITS: f32 = 18.0;
const LUBBER_WIDTH_UNITS: f32 = 3.0;

/// Number of ticks around the ring.
pub const TICK_COUNT: usize = (360 / TICK_SPACING_DEG) as usize;

/// Number of numeric labels around the ring.
pub const NUMBER_LABEL_COUNT: usize = 12;

const NUMBER_LABELS: [&str; NUMBER_LABEL_COUNT] = [
    "0", "30", "60", "90", "120", "150", "180", "210", "240", "270", "300", "330",
];

const CARDINALS: [(u16, &str); 4] = [(0, "N"), (90, "E"), (180, "S"), (270, "W")];

/// One tick mark on the ring, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    /// Bearing on the dial face, before rotation.
    pub degrees: u16,
    pub major: bool,
    /// Point on the ring.
    pub outer: Point,
    /// Point toward the center.
    pub inner: Point,
    pub stroke_width: u32,
}

/// A label anchored at its center, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialLabel {
    pub degrees: u16,
    pub text: &'static str,
    pub position: Point,
}

/// Every primitive of the dial for one heading.
#[derive(Debug, Clone, PartialEq)]
pub struct DialGeometry {
    pub center: Point,
    pub outer_radius: f32,
    pub ring_radius: f32,
    pub ring_stroke: u32,
    pub ticks: Vec<TickMark, TICK_COUNT>,
    pub numbers: Vec<DialLabel, NUMBER_LABEL_COUNT>,
    pub cardinals: [DialLabel; 4],
    /// Tip, left base corner, right base corner.
    pub north_indicator: [Point; 3],
    /// Fixed overlay: horizontal and vertical cross lines.
    pub cross: [Line; 2],
    pub cross_stroke: u32,
    /// Fixed overlay: faint disc at the center.
    pub center_disc: Circle,
    /// Fixed overlay: line from the top edge down to the ring.
    pub lubber_line: Line,
    pub lubber_stroke: u32,
}

/// Convert a length in dial units to pixels, never thinner than one pixel.
fn stroke(units: f32, scale: f32) -> u32 {
    let px = libm::roundf(units * scale);
    if px < 1.0 { 1 } else { px as u32 }
}

/// Screen point at `radius` from `center` along a clockwise-from-north bearing.
fn polar(center: Point, radius: f32, bearing_deg: f32) -> Point {
    let angle = bearing_deg.to_radians();
    Point::new(
        center.x + libm::roundf(radius * libm::sinf(angle)) as i32,
        center.y - libm::roundf(radius * libm::cosf(angle)) as i32,
    )
}

impl DialGeometry {
    /// Lay out the dial inside `bounds`, rotated by `-heading`.
    ///
    /// `heading` may be the cumulative (unwrapped) heading; only its residue
    /// matters for placement.
    pub fn compute(bounds: Rectangle, heading: f32) -> Self {
        let center = bounds.center();
        let outer_radius = bounds.size.width.min(bounds.size.height) as f32 / 2.0;
        let scale = outer_radius / DIAL_UNITS;
        let ring_radius = outer_radius * RING_RATIO;

        // Face bearing `b` lands on screen at `b - heading`.
        let rotated = |bearing: f32| bearing - heading;

        let mut ticks = Vec::new();
        for degrees in (0..360).step_by(TICK_SPACING_DEG as usize) {
            let major = degrees % MAJOR_TICK_EVERY_DEG == 0;
            let (length, width) = if major {
                (MAJOR_TICK_LENGTH_UNITS, MAJOR_TICK_WIDTH_UNITS)
            } else {
                (MINOR_TICK_LENGTH_UNITS, MINOR_TICK_WIDTH_UNITS)
            };
            let bearing = rotated(degrees as f32);
            ticks
                .push(TickMark {
                    degrees,
                    major,
                    outer: polar(center, ring_radius, bearing),
                    inner: polar(center, ring_radius - length * scale, bearing),
                    stroke_width: stroke(width, scale),
                })
                .ok();
        }

        let number_radius = outer_radius * NUMBER_LABEL_RATIO;
        let mut numbers = Vec::new();
        for (i, text) in NUMBER_LABELS.into_iter().enumerate() {
            let degrees = i as u16 * MAJOR_TICK_EVERY_DEG;
            numbers
                .push(DialLabel {
                    degrees,
                    text,
                    position: polar(center, number_radius, rotated(degrees as f32)),
                })
                .ok();
        }

        let cardinal_radius = ring_radius - CARDINAL_INSET_UNITS * scale;
        let cardinals = CARDINALS.map(|(degrees, text)| DialLabel {
            degrees,
            text,
            position: polar(center, cardinal_radius, rotated(degrees as f32)),
        });

        let north = rotated(0.0);
        let base_center = polar(center, ring_radius + ARROW_GAP_UNITS * scale, north);
        let half_width = ARROW_HALF_WIDTH_UNITS * scale;
        // Unit vector perpendicular to the radial direction, pointing clockwise.
        let north_rad = north.to_radians();
        let offset = Point::new(
            libm::roundf(half_width * libm::cosf(north_rad)) as i32,
            libm::roundf(half_width * libm::sinf(north_rad)) as i32,
        );
        let north_indicator = [
            polar(center, outer_radius * ARROW_TIP_RATIO, north),
            base_center - offset,
            base_center + offset,
        ];

        let cross_half = libm::roundf(CROSS_HALF_LENGTH_UNITS * scale) as i32;
        let cross = [
            Line::new(
                center - Point::new(cross_half, 0),
                center + Point::new(cross_half, 0),
            ),
            Line::new(
                center - Point::new(0, cross_half),
                center + Point::new(0, cross_half),
            ),
        ];
        let center_disc = Circle::with_center(
            center,
            2 * libm::roundf(CENTER_DISC_RADIUS_UNITS * scale) as u32,
        );
        let lubber_line = Line::new(
            Point::new(center.x, bounds.top_left.y),
            Point::new(center.x, center.y - libm::roundf(ring_radius) as i32),
        );

        Self {
            center,
            outer_radius,
            ring_radius,
            ring_stroke: stroke(RING_STROKE_UNITS, scale),
            ticks,
            numbers,
            cardinals,
            north_indicator,
            cross,
            cross_stroke: stroke(1.0, scale),
            center_disc,
            lubber_line,
            lubber_stroke: stroke(LUBBER_WIDTH_UNITS, scale),
        }
    }

    pub fn major_ticks(&self) -> impl Iterator<Item = &TickMark> {
        self.ticks.iter().filter(|t| t.major)
    }

    pub fn cardinal(&self, text: &str) -> Option<&DialLabel> {
        self.cardinals.iter().find(|c| c.text == text)
    }
}

fn centered_text_style() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

/// The rotating dial widget.
pub struct CompassDial {
    bounds: Rectangle,
    heading: f32,
    dirty: bool,
}

impl CompassDial {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            heading: 0.0,
            dirty: true,
        }
    }

    /// Set the angle the face is rotated by (typically the animated
    /// cumulative heading).
    pub fn set_heading(&mut self, heading: f32) {
        if heading != self.heading {
            self.heading = heading;
            self.dirty = true;
        }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn geometry(&self) -> DialGeometry {
        DialGeometry::compute(self.bounds, self.heading)
    }
}

impl Drawable for CompassDial {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let geometry = self.geometry();

        // Rotating face
        Circle::with_center(
            geometry.center,
            2 * libm::roundf(geometry.ring_radius) as u32,
        )
        .into_styled(PrimitiveStyle::with_stroke(
            DIAL_FOREGROUND,
            geometry.ring_stroke,
        ))
        .draw(display)?;

        for tick in &geometry.ticks {
            Line::new(tick.outer, tick.inner)
                .into_styled(PrimitiveStyle::with_stroke(
                    DIAL_FOREGROUND,
                    tick.stroke_width,
                ))
                .draw(display)?;
        }

        let number_style = MonoTextStyle::new(&FONT_6X10, DIAL_FOREGROUND);
        for label in &geometry.numbers {
            Text::with_text_style(
                label.text,
                label.position,
                number_style,
                centered_text_style(),
            )
            .draw(display)?;
        }

        let cardinal_style = MonoTextStyle::new(&FONT_10X20, DIAL_FOREGROUND);
        for label in &geometry.cardinals {
            Text::with_text_style(
                label.text,
                label.position,
                cardinal_style,
                centered_text_style(),
            )
            .draw(display)?;
        }

        let [tip, left, right] = geometry.north_indicator;
        Triangle::new(tip, left, right)
            .into_styled(PrimitiveStyle::with_fill(NORTH_RED))
            .draw(display)?;

        // Fixed overlay
        for line in &geometry.cross {
            line.into_styled(PrimitiveStyle::with_stroke(
                OVERLAY_STRONG,
                geometry.cross_stroke,
            ))
            .draw(display)?;
        }

        geometry
            .center_disc
            .into_styled(PrimitiveStyle::with_fill(OVERLAY_FAINT))
            .draw(display)?;

        geometry
            .lubber_line
            .into_styled(PrimitiveStyle::with_stroke(
                DIAL_FOREGROUND,
                geometry.lubber_stroke,
            ))
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::PixelProbe;

    fn dial_bounds() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(340, 340))
    }

    #[test]
    fn test_tick_layout() {
        let geometry = DialGeometry::compute(dial_bounds(), 0.0);
        assert_eq!(geometry.ticks.len(), 180);
        assert_eq!(geometry.major_ticks().count(), 12);
        assert!(geometry.major_ticks().all(|t| t.degrees % 30 == 0));
    }

    #[test]
    fn test_major_ticks_are_longer_and_thicker() {
        let geometry = DialGeometry::compute(dial_bounds(), 0.0);
        let length = |t: &TickMark| {
            let d = t.outer - t.inner;
            d.x * d.x + d.y * d.y
        };
        let major = geometry.ticks.iter().find(|t| t.degrees == 0).unwrap();
        let minor = geometry.ticks.iter().find(|t| t.degrees == 2).unwrap();

        assert!(length(major) > length(minor));
        assert!(major.stroke_width > minor.stroke_width);
    }

    #[test]
    fn test_full_size_dial_matches_reference_units() {
        // A 340 px dial has an outer radius of exactly 170 units.
        let geometry = DialGeometry::compute(dial_bounds(), 0.0);
        let center = geometry.center;

        assert_eq!(geometry.outer_radius, 170.0);
        let north_tick = geometry.ticks[0];
        assert_eq!(north_tick.outer, Point::new(center.x, center.y - 133));
        assert_eq!(north_tick.inner, Point::new(center.x, center.y - 119));
        assert_eq!(
            geometry.cardinal("N").unwrap().position,
            Point::new(center.x, center.y - 93)
        );
    }

    #[test]
    fn test_labels() {
        let geometry = DialGeometry::compute(dial_bounds(), 0.0);
        let texts: Vec<&str, 12> = geometry.numbers.iter().map(|l| l.text).collect();
        assert_eq!(texts[0], "0");
        assert_eq!(texts[3], "90");
        assert_eq!(texts[11], "330");

        let cardinals = geometry.cardinals.map(|c| c.text);
        assert_eq!(cardinals, ["N", "E", "S", "W"]);
    }

    #[test]
    fn test_face_rotates_against_heading() {
        let center = dial_bounds().center();

        let facing_north = DialGeometry::compute(dial_bounds(), 0.0);
        let n = facing_north.cardinal("N").unwrap().position;
        assert_eq!(n.x, center.x);
        assert!(n.y < center.y);

        // Facing east, north is to the left.
        let facing_east = DialGeometry::compute(dial_bounds(), 90.0);
        let n = facing_east.cardinal("N").unwrap().position;
        assert!(n.x < center.x);
        assert_eq!(n.y, center.y);
        let e = facing_east.cardinal("E").unwrap().position;
        assert_eq!(e.x, center.x);
        assert!(e.y < center.y);
    }

    #[test]
    fn test_cumulative_heading_places_like_residue() {
        let wrapped = DialGeometry::compute(dial_bounds(), 10.0);
        let unwrapped = DialGeometry::compute(dial_bounds(), 370.0);
        assert_eq!(wrapped.cardinals, unwrapped.cardinals);
        assert_eq!(wrapped.north_indicator, unwrapped.north_indicator);
    }

    #[test]
    fn test_north_indicator_points_at_north() {
        let center = dial_bounds().center();
        let geometry = DialGeometry::compute(dial_bounds(), 0.0);
        let [tip, left, right] = geometry.north_indicator;

        assert_eq!(tip.x, center.x);
        assert!(tip.y < left.y);
        assert_eq!(left.y, right.y);
        assert!(left.x < center.x && right.x > center.x);
    }

    #[test]
    fn test_overlay_does_not_rotate() {
        let a = DialGeometry::compute(dial_bounds(), 0.0);
        let b = DialGeometry::compute(dial_bounds(), 123.0);
        assert_eq!(a.cross, b.cross);
        assert_eq!(a.center_disc, b.center_disc);
        assert_eq!(a.lubber_line, b.lubber_line);
        assert_eq!(a.lubber_line.start.y, 0);
    }

    #[test]
    fn test_drawn_north_indicator_follows_heading() {
        let mut dial = CompassDial::new(dial_bounds());
        let center = dial_bounds().center();

        let mut probe = PixelProbe::new(Size::new(340, 340), NORTH_RED);
        dial.draw(&mut probe).unwrap();
        assert!(probe.hits > 0);
        assert!(probe.hits_center().y < center.y);

        dial.set_heading(180.0);
        let mut probe = PixelProbe::new(Size::new(340, 340), NORTH_RED);
        dial.draw(&mut probe).unwrap();
        assert!(probe.hits_center().y > center.y);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut dial = CompassDial::new(dial_bounds());
        assert!(dial.is_dirty());
        dial.mark_clean();

        dial.set_heading(0.0);
        assert!(!dial.is_dirty());

        dial.set_heading(15.0);
        assert!(dial.is_dirty());
    }
}
