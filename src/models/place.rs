//! Place recommendations and their categories

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::TravelBuddyError;

/// The three kinds of place Travel Buddy can recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hotels,
    Restaurants,
    Landmarks,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hotels, Category::Restaurants, Category::Landmarks];

    /// Wire and prompt name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hotels => "hotels",
            Category::Restaurants => "restaurants",
            Category::Landmarks => "landmarks",
        }
    }

    /// Heading shown above a list of places
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Category::Hotels => "Hotels & Accommodations",
            Category::Restaurants => "Restaurants & Dining",
            Category::Landmarks => "Landmarks & Attractions",
        }
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Hotels => "🏨",
            Category::Restaurants => "🍽️",
            Category::Landmarks => "🏛️",
        }
    }

    /// Assistant hint shown under the place list
    #[must_use]
    pub fn tip(&self) -> &'static str {
        match self {
            Category::Hotels => {
                "Looking for something specific? Try asking me about 'pet-friendly hotels' or 'hotels with pools'!"
            }
            Category::Restaurants => {
                "Want personalized recommendations? Tell me your dietary preferences or favorite cuisine type!"
            }
            Category::Landmarks => {
                "Interested in history? Ask me about the stories behind these landmarks!"
            }
        }
    }

    /// Landmark cards never carry a price line
    #[must_use]
    pub fn shows_price(&self) -> bool {
        !matches!(self, Category::Landmarks)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TravelBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hotels" | "hotel" => Ok(Category::Hotels),
            "restaurants" | "restaurant" => Ok(Category::Restaurants),
            "landmarks" | "landmark" => Ok(Category::Landmarks),
            other => Err(TravelBuddyError::validation(format!(
                "Unknown category: {other}"
            ))),
        }
    }
}

/// A single AI-recommended place. Lives for one response cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    pub category: Category,
    pub rating: f64,
    pub distance: String,
    pub price: String,
    pub description: String,
    pub open_now: bool,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Place {
    /// Google Maps search link for this place
    #[must_use]
    pub fn map_url(&self) -> String {
        let query = if self.address.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.address)
        };
        format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&query)
        )
    }

    /// Case-insensitive match against name or description
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
