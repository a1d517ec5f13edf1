//! Page state for place discovery: location, category, search box

use anyhow::Result;
use tracing::{debug, info};

use super::TravelApi;
use super::cache::{PLACES_STALE_AFTER, QueryCache};
use crate::models::{Category, Coordinates, Place};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacesKey {
    pub location: String,
    pub category: Category,
    pub query: String,
}

pub struct DiscoverySession {
    location: Option<String>,
    category: Option<Category>,
    search_query: String,
    cache: QueryCache<PlacesKey, Vec<Place>>,
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self {
            location: None,
            category: None,
            search_query: String::new(),
            cache: QueryCache::new(PLACES_STALE_AFTER),
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Manual entry. Blank input leaves the current location untouched.
    pub fn set_manual_location(&mut self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.location = Some(trimmed.to_string());
        true
    }

    /// A detected position is shown as raw coordinates; nothing resolves it to a place name.
    pub fn set_detected_location(&mut self, coordinates: Coordinates) {
        self.location = Some(coordinates.detected_label());
    }

    pub fn select_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    /// Whether the place list is shown at all
    #[must_use]
    pub fn ready(&self) -> bool {
        self.location.is_some() && self.category.is_some()
    }

    /// Places for the current location/category/query, filtered by the search box.
    ///
    /// `Ok(None)` until both location and category are chosen. Fresh cached
    /// results are served without a request; failures are not cached.
    pub async fn places<A: TravelApi + ?Sized>(&mut self, api: &A) -> Result<Option<Vec<Place>>> {
        let (Some(location), Some(category)) = (self.location.clone(), self.category) else {
            return Ok(None);
        };

        let key = PlacesKey {
            location,
            category,
            query: self.search_query.trim().to_string(),
        };

        let places = match self.cache.get(&key) {
            Some(places) => {
                debug!("Serving {} places from cache", places.len());
                places
            }
            None => {
                let query = Some(key.query.as_str()).filter(|q| !q.is_empty());
                let places = api.search_places(&key.location, category, query).await?;
                info!("Fetched {} places for {}", places.len(), key.location);
                self.cache.put(key, places.clone());
                places
            }
        };

        let query = self.search_query.as_str();
        Ok(Some(places.into_iter().filter(|p| p.matches(query)).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{FakeApi, place};
    use super::*;
    use std::time::Duration;

    fn api_with_places() -> FakeApi {
        FakeApi {
            places: vec![
                place("Pantheon", Category::Landmarks, "Ancient Roman temple"),
                place("Colosseum", Category::Landmarks, "Gladiator arena"),
            ],
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn test_no_query_until_location_and_category() {
        let api = api_with_places();
        let mut session = DiscoverySession::new();

        assert!(session.places(&api).await.unwrap().is_none());
        session.select_category(Category::Landmarks);
        assert!(session.places(&api).await.unwrap().is_none());
        assert!(api.place_calls.lock().unwrap().is_empty());

        session.set_manual_location("  Rome ");
        assert!(session.ready());
        let places = session.places(&api).await.unwrap().unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(
            api.place_calls.lock().unwrap()[0],
            ("Rome".to_string(), Category::Landmarks, None)
        );
    }

    #[test]
    fn test_blank_manual_location_is_ignored() {
        let mut session = DiscoverySession::new();
        assert!(session.set_manual_location("Rome"));
        assert!(!session.set_manual_location("   "));
        assert_eq!(session.location(), Some("Rome"));
    }

    #[test]
    fn test_detected_location_is_raw_coordinates() {
        let mut session = DiscoverySession::new();
        session.set_detected_location(Coordinates::new(41.9028, 12.4964).unwrap());
        assert_eq!(session.location(), Some("Location: 41.9028, 12.4964"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_avoids_refetch_within_window() {
        let api = api_with_places();
        let mut session = DiscoverySession::new();
        session.set_manual_location("Rome");
        session.select_category(Category::Landmarks);

        session.places(&api).await.unwrap();
        tokio::time::advance(Duration::from_secs(120)).await;
        session.places(&api).await.unwrap();
        assert_eq!(api.place_calls.lock().unwrap().len(), 1);

        tokio::time::advance(Duration::from_secs(200)).await;
        session.places(&api).await.unwrap();
        assert_eq!(api.place_calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_switching_category_is_a_new_query() {
        let api = api_with_places();
        let mut session = DiscoverySession::new();
        session.set_manual_location("Rome");
        session.select_category(Category::Landmarks);
        session.places(&api).await.unwrap();

        session.select_category(Category::Hotels);
        session.places(&api).await.unwrap();

        let calls = api.place_calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1, Category::Hotels);
    }

    #[tokio::test]
    async fn test_search_query_is_sent_and_filters_locally() {
        let api = api_with_places();
        let mut session = DiscoverySession::new();
        session.set_manual_location("Rome");
        session.select_category(Category::Landmarks);
        session.set_search_query("temple");

        let places = session.places(&api).await.unwrap().unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Pantheon");
        assert_eq!(
            api.place_calls.lock().unwrap()[0].2.as_deref(),
            Some("temple")
        );
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let mut api = api_with_places();
        api.fail = true;
        let mut session = DiscoverySession::new();
        session.set_manual_location("Rome");
        session.select_category(Category::Landmarks);

        assert!(session.places(&api).await.is_err());
        assert!(session.places(&api).await.is_err());
        assert_eq!(api.place_calls.lock().unwrap().len(), 2);
    }
}
