//! HTTP routes end to end, with a stub generative model behind the gateway

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;
use travelbuddy::client::{ApiClient, ChatPanel, DiscoverySession, TravelApi};
use travelbuddy::config::{AiConfig, ServerConfig};
use travelbuddy::gateway::{GenerateRequest, GenerativeModel, ProviderError};
use travelbuddy::models::{Category, Role};
use travelbuddy::storage::MemoryUserStore;
use travelbuddy::{AppState, TravelGateway, web};

/// Replies with fixed text, or fails every call when `reply` is `None`
struct StubModel {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    fn new(reply: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.map(str::to_string),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    fn provider_name(&self) -> &'static str {
        "stub"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(request.prompt);
        self.reply
            .clone()
            .ok_or_else(|| ProviderError::RequestFailed("stub offline".to_string()))
    }
}

fn paris_hotels() -> String {
    let places: Vec<Value> = (1..=6)
        .map(|i| {
            json!({
                "name": format!("Hôtel Paris {i}"),
                "category": "hotels",
                "rating": 4.0 + f64::from(i) / 10.0,
                "distance": format!("{i}00 m"),
                "price": "€€€",
                "description": "Boutique hotel in the Marais",
                "openNow": true,
                "address": format!("{i} Rue de Rivoli, Paris")
            })
        })
        .collect();
    Value::Array(places).to_string()
}

fn paris_restaurants() -> String {
    let places: Vec<Value> = (1..=6)
        .map(|i| {
            json!({
                "name": format!("Bistrot {i}"),
                "category": "restaurants",
                "rating": 4.5,
                "distance": "1.2 km",
                "price": "€€",
                "description": "Seasonal French cooking",
                "openNow": i % 2 == 0,
                "address": format!("{i} Rue Cler, 75007 Paris")
            })
        })
        .collect();
    Value::Array(places).to_string()
}

const PLACE_FIELDS: [&str; 8] = [
    "name",
    "category",
    "rating",
    "distance",
    "price",
    "description",
    "openNow",
    "address",
];

fn app(model: Arc<StubModel>) -> axum::Router {
    let gateway = TravelGateway::new(model, &AiConfig::default());
    let state = AppState::new(gateway, Arc::new(MemoryUserStore::new()));
    web::app(state, &ServerConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case("/api/places")]
#[case("/api/places?location=Paris")]
#[case("/api/places?category=hotels")]
#[case("/api/places?location=&category=hotels")]
#[tokio::test]
async fn test_places_requires_location_and_category(#[case] uri: &str) {
    let model = StubModel::new(Some("[]"));
    let response = app(model.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Location and category are required"})
    );
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_six_hotels_in_paris() {
    let model = StubModel::new(Some(&paris_hotels()));
    let response = app(model.clone())
        .oneshot(
            Request::builder()
                .uri("/api/places?location=Paris&category=hotels")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let places = body_json(response).await;
    let places = places.as_array().unwrap();
    assert_eq!(places.len(), 6);
    assert!(places.iter().all(|p| p["category"] == "hotels"));
    assert!(places.iter().all(|p| p["openNow"] == true));

    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].contains("Paris"));
}

#[tokio::test]
async fn test_six_restaurants_in_paris_carry_every_field() {
    let response = app(StubModel::new(Some(&paris_restaurants())))
        .oneshot(
            Request::builder()
                .uri("/api/places?location=Paris&category=restaurants")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let places = body_json(response).await;
    let places = places.as_array().unwrap();
    assert_eq!(places.len(), 6);
    for place in places {
        for field in PLACE_FIELDS {
            assert!(place.get(field).is_some(), "missing {field} in {place}");
        }
        assert!(!place["name"].as_str().unwrap().is_empty());
        assert_eq!(place["category"], "restaurants");
        assert!(place["rating"].is_number());
        assert!(place["openNow"].is_boolean());
    }
}

#[tokio::test]
async fn test_places_provider_failure_is_500() {
    let response = app(StubModel::new(None))
        .oneshot(
            Request::builder()
                .uri("/api/places?location=Paris&category=restaurants")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "Failed to fetch places"}));
}

#[tokio::test]
async fn test_chat_replies_with_text() {
    let model = StubModel::new(Some("Try Le Comptoir du Panthéon! 🐨"));
    let response = app(model)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"message": "Where should I eat?", "location": "Paris"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(!body["text"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_without_location() {
    let model = StubModel::new(Some("Try a crêperie in Montparnasse!"));
    let response = app(model.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"message": "Where should I eat?"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(!body["text"].as_str().unwrap().trim().is_empty());
    assert_eq!(model.prompts.lock().unwrap().as_slice(), ["Where should I eat?"]);
}

#[tokio::test]
async fn test_chat_without_body_is_400() {
    let model = StubModel::new(Some("unused"));
    let response = app(model.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Message is required"}));
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_without_message_is_400() {
    let response = app(StubModel::new(Some("unused")))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(json!({"location": "Paris"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Message is required"}));
}

#[tokio::test]
async fn test_location_with_garbage_reply_is_empty_object() {
    let response = app(StubModel::new(Some("not json at all")))
        .oneshot(
            Request::builder()
                .uri("/api/location/Atlantis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
}

/// Binds the app on an ephemeral port and returns its origin
async fn spawn_server(model: Arc<StubModel>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app(model);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_client_session_against_server() {
    let origin = spawn_server(StubModel::new(Some(&paris_hotels()))).await;
    let api = ApiClient::new(&origin).unwrap();

    let mut session = DiscoverySession::new();
    session.set_manual_location("Paris");
    session.select_category(Category::Hotels);
    session.set_search_query("Paris 3");

    let places = session.places(&api).await.unwrap().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Hôtel Paris 3");
}

#[tokio::test]
async fn test_client_surfaces_server_error_message() {
    let origin = spawn_server(StubModel::new(None)).await;
    let api = ApiClient::new(&origin).unwrap();

    let err = api
        .search_places("Paris", Category::Landmarks, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to fetch places"));
}

#[tokio::test]
async fn test_chat_panel_against_offline_provider() {
    // The server answers 200 with its own apology when the provider is down.
    let origin = spawn_server(StubModel::new(None)).await;
    let api = ApiClient::new(&origin).unwrap();

    let mut panel = ChatPanel::new();
    assert!(panel.send(&api, "Where should I eat?", Some("Paris")).await);

    let last = panel.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.text.starts_with("Sorry"));
}
