use serde::{Deserialize, Serialize};

use crate::utils::error::Result;
use crate::utils::validation::{validate_latitude, validate_longitude};

/// A validated point on the globe. Constructed only through [`GeoPoint::new`],
/// so a value of this type always carries legal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A rentable item as stored by the candidate source.
///
/// The coordinate pair `(0, 0)` is the store's "no recorded position"
/// sentinel; use [`Item::geo_point`] rather than reading the raw fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub item_id: String,
    pub owner_id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub daily_rate: f64,
    pub available: bool,
    pub condition: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            item_id: String::new(),
            owner_id: String::new(),
            name: String::new(),
            category: String::new(),
            location: String::new(),
            daily_rate: 0.0,
            available: false,
            condition: String::new(),
            description: String::new(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl Item {
    /// The item's position, or `None` when it is unset or illegal.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        if self.latitude == 0.0 && self.longitude == 0.0 {
            return None;
        }
        GeoPoint::new(self.latitude, self.longitude).ok()
    }
}

/// Road distance and travel time reported by the routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl DistanceResult {
    /// The "no road route exists" value. A legitimate answer, not a failure.
    pub const ZERO: Self = Self {
        distance_meters: 0.0,
        duration_seconds: 0.0,
    };

    pub fn is_unreachable(&self) -> bool {
        *self == Self::ZERO
    }
}
