//! Coordinates and bounding boxes in decimal degrees.

use serde::{Deserialize, Serialize};

/// Default map centre: VIT Bhopal University, Kothri Kalan.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(23.0774, 76.8513);

/// Pan limits for the map: Madhya Pradesh with a small buffer.
pub const SERVICE_AREA: Bounds = Bounds {
    south_west: Coordinate::new(20.0, 73.0),
    north_east: Coordinate::new(28.0, 84.0),
};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Parse a coordinate from the text form used by place records.
    ///
    /// Returns `None` for blank, non-numeric, or non-finite components so that
    /// callers can skip the record instead of failing.
    #[must_use]
    pub fn parse_pair(lat: &str, lon: &str) -> Option<Self> {
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;
        let coord = Self::new(lat, lon);
        coord.is_finite().then_some(coord)
    }

    /// Text form of the latitude, as stored on a place record.
    #[must_use]
    pub fn lat_text(&self) -> String {
        self.lat.to_string()
    }

    /// Text form of the longitude, as stored on a place record.
    #[must_use]
    pub fn lon_text(&self) -> String {
        self.lon.to_string()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// An axis-aligned box given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&coord.lat)
            && (self.south_west.lon..=self.north_east.lon).contains(&coord.lon)
    }

    /// Pull `coord` onto the nearest point inside the box.
    #[must_use]
    pub fn clamp(&self, coord: Coordinate) -> Coordinate {
        Coordinate::new(
            coord.lat.clamp(self.south_west.lat, self.north_east.lat),
            coord.lon.clamp(self.south_west.lon, self.north_east.lon),
        )
    }
}
