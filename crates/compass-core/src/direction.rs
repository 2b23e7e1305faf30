//! Eight-point compass direction bucketing

use crate::heading::normalize_degrees;

/// Width of one compass sector in degrees.
const SECTOR_DEG: f32 = 45.0;

/// Sectors are centered on their direction, so boundaries sit half a sector off.
const SECTOR_OFFSET_DEG: f32 = SECTOR_DEG / 2.0;

/// One of the eight principal compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    /// Clockwise order starting at north.
    pub const ALL: [CompassPoint; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Bucket a heading into its 45° sector.
    ///
    /// The heading is normalized first, so any finite angle is accepted.
    pub fn from_heading(heading: f32) -> Self {
        let heading = normalize_degrees(heading);
        let sector = libm::floorf((heading + SECTOR_OFFSET_DEG) / SECTOR_DEG) as usize;
        Self::ALL[sector % Self::ALL.len()]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }

    /// Bearing of the sector center.
    pub const fn bearing(self) -> f32 {
        match self {
            Self::North => 0.0,
            Self::NorthEast => 45.0,
            Self::East => 90.0,
            Self::SouthEast => 135.0,
            Self::South => 180.0,
            Self::SouthWest => 225.0,
            Self::West => 270.0,
            Self::NorthWest => 315.0,
        }
    }
}

impl core::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(CompassPoint::from_heading(0.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_heading(44.0), CompassPoint::NorthEast);
        assert_eq!(CompassPoint::from_heading(46.0), CompassPoint::NorthEast);
        assert_eq!(CompassPoint::from_heading(359.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_heading(180.0), CompassPoint::South);
    }

    #[test]
    fn test_sector_edges_belong_to_next_sector() {
        assert_eq!(CompassPoint::from_heading(22.4), CompassPoint::North);
        assert_eq!(CompassPoint::from_heading(22.5), CompassPoint::NorthEast);
        assert_eq!(CompassPoint::from_heading(43.0), CompassPoint::NorthEast);
        assert_eq!(CompassPoint::from_heading(67.4), CompassPoint::NorthEast);
        assert_eq!(CompassPoint::from_heading(67.5), CompassPoint::East);
        assert_eq!(CompassPoint::from_heading(337.4), CompassPoint::NorthWest);
        assert_eq!(CompassPoint::from_heading(337.5), CompassPoint::North);
    }

    #[test]
    fn test_sector_centers_map_to_themselves() {
        for point in CompassPoint::ALL {
            assert_eq!(CompassPoint::from_heading(point.bearing()), point);
        }
    }

    #[test]
    fn test_unnormalized_heading() {
        assert_eq!(CompassPoint::from_heading(-90.0), CompassPoint::West);
        assert_eq!(CompassPoint::from_heading(450.0), CompassPoint::East);
    }

    #[test]
    fn test_labels() {
        let labels: [&str; 8] = CompassPoint::ALL.map(CompassPoint::label);
        assert_eq!(labels, ["N", "NE", "E", "SE", "S", "SW", "W", "NW"]);
    }
}
