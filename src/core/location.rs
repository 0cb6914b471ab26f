//! # Map Camera
//!
//! The map collaborator gets exactly one instruction: centre on this
//! coordinate at this zoom, and label the marker. Nothing flows back.
//!
//! With no device fix the camera falls back to a fixed point of interest,
//! [`FALLBACK_COORDINATE`]. The marker title tells the two cases apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Camera target used when no device location is available.
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    latitude: 51.145529,
    longitude: 5.740863,
};

pub const DEFAULT_MAP_ZOOM: f32 = 6.0;

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ParseCoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ParseCoordinateError::OutOfRange(format!("latitude {latitude}")));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ParseCoordinateError::OutOfRange(format!("longitude {longitude}")));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordinateError {
    /// Not of the form `lat,lon`.
    Format(String),
    OutOfRange(String),
}

impl fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordinateError::Format(raw) => {
                write!(f, "expected 'latitude,longitude', got '{raw}'")
            }
            ParseCoordinateError::OutOfRange(what) => write!(f, "{what} is out of range"),
        }
    }
}

impl std::error::Error for ParseCoordinateError {}

/// Parses `"51.14,5.74"` (whitespace around either number is allowed).
impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ParseCoordinateError::Format(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(format_err)?;
        let latitude = lat.trim().parse().map_err(|_| format_err())?;
        let longitude = lon.trim().parse().map_err(|_| format_err())?;
        Coordinate::new(latitude, longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Device,
    Fallback,
}

/// One centring instruction for the map collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub coordinate: Coordinate,
    pub zoom: f32,
    pub source: LocationSource,
}

impl CameraTarget {
    pub fn marker_title(&self) -> &'static str {
        match self.source {
            LocationSource::Device => "Your location",
            LocationSource::Fallback => "Static location",
        }
    }
}

pub fn camera_target(device: Option<Coordinate>, fallback: Coordinate, zoom: f32) -> CameraTarget {
    match device {
        Some(coordinate) => CameraTarget {
            coordinate,
            zoom,
            source: LocationSource::Device,
        },
        None => CameraTarget {
            coordinate: fallback,
            zoom,
            source: LocationSource::Fallback,
        },
    }
}

/// Receives centring instructions. Implemented by whatever draws the map.
pub trait MapCollaborator {
    fn center_on(&mut self, target: &CameraTarget);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_location_wins() {
        let here = Coordinate::new(40.4168, -3.7038).unwrap();
        let target = camera_target(Some(here), FALLBACK_COORDINATE, DEFAULT_MAP_ZOOM);
        assert_eq!(target.coordinate, here);
        assert_eq!(target.marker_title(), "Your location");
    }

    #[test]
    fn test_fallback_without_device() {
        let target = camera_target(None, FALLBACK_COORDINATE, DEFAULT_MAP_ZOOM);
        assert_eq!(target.coordinate.latitude, 51.145529);
        assert_eq!(target.coordinate.longitude, 5.740863);
        assert_eq!(target.zoom, 6.0);
        assert_eq!(target.source, LocationSource::Fallback);
        assert_eq!(target.marker_title(), "Static location");
    }

    #[test]
    fn test_parse_coordinate() {
        let c: Coordinate = " 51.5 , -0.12 ".parse().unwrap();
        assert_eq!(c, Coordinate { latitude: 51.5, longitude: -0.12 });
    }

    #[test]
    fn test_parse_coordinate_errors() {
        assert!(matches!(
            "51.5".parse::<Coordinate>(),
            Err(ParseCoordinateError::Format(_))
        ));
        assert!(matches!(
            "north,east".parse::<Coordinate>(),
            Err(ParseCoordinateError::Format(_))
        ));
        assert!(matches!(
            "91,0".parse::<Coordinate>(),
            Err(ParseCoordinateError::OutOfRange(_))
        ));
    }
}
