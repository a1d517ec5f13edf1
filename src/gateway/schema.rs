//! Shape-checked decoding of provider output
//!
//! The provider is asked for JSON matching a schema but nothing guarantees it
//! complies. Places are checked element by element; location summaries fall
//! back to the empty default.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Category, Coordinates, LocationInfo, Place};

#[derive(Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    NotJson(String),
    #[error("expected a JSON array of places, got {0}")]
    NotAnArray(&'static str),
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a place list. Blank text is an empty list; elements that miss or
/// mistype a required field are dropped.
pub fn decode_places(text: &str, requested: Category) -> Result<Vec<Place>, DecodeError> {
    if text.trim().is_empty() {
        debug!("Provider returned no text for places, using empty list");
        return Ok(Vec::new());
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::NotJson(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(DecodeError::NotAnArray(kind(&other))),
    };

    let total = items.len();
    let places: Vec<Place> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match place_from_value(item, requested) {
            Ok(place) => Some(place),
            Err(reason) => {
                warn!("Dropping place #{} from provider output: {}", index, reason);
                None
            }
        })
        .collect();

    if places.len() < total {
        warn!("Kept {} of {} places from provider output", places.len(), total);
    }

    Ok(places)
}

fn place_from_value(value: Value, requested: Category) -> Result<Place, String> {
    let fields = match value {
        Value::Object(fields) => fields,
        other => return Err(format!("element is {}", kind(&other))),
    };

    let category = fields
        .get("category")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<Category>().ok())
        .unwrap_or(requested);

    Ok(Place {
        name: required_string(&fields, "name")?,
        category,
        rating: fields
            .get("rating")
            .and_then(Value::as_f64)
            .ok_or("missing numeric field 'rating'")?,
        distance: required_string(&fields, "distance")?,
        price: required_string(&fields, "price")?,
        description: required_string(&fields, "description")?,
        open_now: fields
            .get("openNow")
            .and_then(Value::as_bool)
            .ok_or("missing boolean field 'openNow'")?,
        address: required_string(&fields, "address")?,
        phone: optional_string(&fields, "phone"),
        website: optional_string(&fields, "website"),
        image_url: optional_string(&fields, "imageUrl"),
    })
}

fn required_string(fields: &Map<String, Value>, key: &str) -> Result<String, String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("missing string field '{key}'"))
}

/// Wrong types and blank strings both count as absent.
fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Decode a location summary, never failing: anything unusable yields the
/// empty default.
pub fn decode_location_info(text: &str) -> LocationInfo {
    let fields = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            warn!("Location info is {}, using empty default", kind(&other));
            return LocationInfo::default();
        }
        Err(e) => {
            if !text.trim().is_empty() {
                warn!("Location info is not valid JSON ({}), using empty default", e);
            }
            return LocationInfo::default();
        }
    };

    let coordinates = fields.get("coordinates").and_then(|coords| {
        let lat = coords.get("lat").and_then(Value::as_f64)?;
        let lng = coords.get("lng").and_then(Value::as_f64)?;
        Coordinates::new(lat, lng).ok()
    });

    LocationInfo {
        name: fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: fields
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        coordinates,
    }
}
