//! Location model for coordinates and AI-provided location summaries

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::TravelBuddyError;

/// Latitude/longitude pair as exchanged with the frontend
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create coordinates after range validation
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(TravelBuddyError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            ))
            .into());
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(TravelBuddyError::validation(format!(
                "Longitude must be between -180 and 180, got: {lng}"
            ))
            .into());
        }

        Ok(Self { lat, lng })
    }

    /// Parse coordinates from string like "46.8182,8.2275" or "46.8182 8.2275"
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(
                TravelBuddyError::validation("Coordinates must be in format 'lat,lng'").into(),
            );
        }

        let lat = parts[0]
            .parse::<f64>()
            .with_context(|| format!("Invalid latitude: {}", parts[0]))?;
        let lng = parts[1]
            .parse::<f64>()
            .with_context(|| format!("Invalid longitude: {}", parts[1]))?;

        Self::new(lat, lng)
    }

    /// The label the client shows for a detected position.
    ///
    /// No reverse geocoding happens here: the raw coordinates are the location.
    #[must_use]
    pub fn detected_label(&self) -> String {
        format!("Location: {:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Summary of a named location as produced by the AI gateway.
///
/// The default value serializes as `{}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LocationInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl LocationInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.coordinates.is_none()
    }
}
