//! Place cards and list rendering

use std::fmt::{Display, Write};

use crate::models::{Category, Place};

/// What a single place card shows
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCard {
    pub name: String,
    pub icon: &'static str,
    pub rating: f64,
    pub distance: String,
    pub price: Option<String>,
    pub description: String,
    pub status: &'static str,
    pub address: String,
    pub map_url: String,
}

impl From<&Place> for PlaceCard {
    fn from(place: &Place) -> Self {
        let price = Some(place.price.trim())
            .filter(|p| place.category.shows_price() && !p.is_empty())
            .map(str::to_string);

        Self {
            name: place.name.clone(),
            icon: place.category.icon(),
            rating: place.rating,
            distance: place.distance.clone(),
            price,
            description: place.description.clone(),
            status: if place.open_now { "Open now" } else { "Closed" },
            address: place.address.clone(),
            map_url: place.map_url(),
        }
    }
}

impl Display for PlaceCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {}", self.icon, self.name)?;
        write!(f, "   ⭐ {:.1} · 📍 {}", self.rating, self.distance)?;
        if let Some(price) = &self.price {
            write!(f, " · {}", price)?;
        }
        writeln!(f)?;
        writeln!(f, "   {}", self.description)?;
        writeln!(f, "   🕒 {}", self.status)?;
        if !self.address.is_empty() {
            writeln!(f, "   🗺️ {}", self.address)?;
        }
        writeln!(f, "   🔗 {}", self.map_url)
    }
}

/// Heading, cards (or the empty state) and the category tip
#[must_use]
pub fn render_place_list(category: Category, location: &str, places: &[Place]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} near {}", category.icon(), category.title(), location);
    let _ = writeln!(out);

    if places.is_empty() {
        let _ = writeln!(
            out,
            "No places found. Try a different location or search term."
        );
    } else {
        for place in places {
            let _ = writeln!(out, "{}", PlaceCard::from(place));
        }
    }

    let _ = writeln!(out, "💡 {}", category.tip());
    out
}

#[cfg(test)]
mod tests {
    use super::super::testing::place;
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Category::Hotels, Some("€€"))]
    #[case(Category::Restaurants, Some("€€"))]
    #[case(Category::Landmarks, None)]
    fn test_price_line(#[case] category: Category, #[case] expected: Option<&str>) {
        let card = PlaceCard::from(&place("Somewhere", category, "Nice"));
        assert_eq!(card.price.as_deref(), expected);
    }

    #[test]
    fn test_empty_price_is_hidden() {
        let mut hotel = place("Hotel Raphael", Category::Hotels, "Ivy-covered");
        hotel.price = "  ".to_string();
        assert!(PlaceCard::from(&hotel).price.is_none());
    }

    #[test]
    fn test_status_and_map_link() {
        let mut pantheon = place("Pantheon", Category::Landmarks, "Roman temple");
        pantheon.open_now = true;
        let card = PlaceCard::from(&pantheon);

        assert_eq!(card.status, "Open now");
        assert!(card.map_url.starts_with("https://www.google.com/maps/search/?api=1&query="));
        assert!(card.to_string().contains("Open now"));
        assert!(!card.to_string().contains("€€"));
    }

    #[test]
    fn test_render_empty_list() {
        let out = render_place_list(Category::Restaurants, "Rome", &[]);
        assert!(out.contains("Restaurants & Dining near Rome"));
        assert!(out.contains("No places found"));
        assert!(out.contains(Category::Restaurants.tip()));
    }

    #[test]
    fn test_render_cards() {
        let places = vec![place("Pantheon", Category::Landmarks, "Roman temple")];
        let out = render_place_list(Category::Landmarks, "Rome", &places);
        assert!(out.contains("🏛️ Pantheon"));
        assert!(!out.contains("No places found"));
    }
}
