use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// A WGS84 point. Serialized as `[longitude, latitude]`, the order routing
/// providers expect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct Coordinates {
    lng: f64,
    lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Result<Self, Error> {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(invalid_input_error(format!("longitude {} out of range", lng)));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid_input_error(format!("latitude {} out of range", lat)));
        }

        Ok(Self { lng, lat })
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lng, c.lat]
    }
}

impl TryFrom<[f64; 2]> for Coordinates {
    type Error = Error;

    fn try_from([lng, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        Coordinates::new(lng, lat)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lng, self.lat)
    }
}
