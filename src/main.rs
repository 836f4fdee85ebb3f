mod budget;
mod error;
mod models;
mod planner;
mod provider;

use anyhow::Result;
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use error::PlanError;
use models::{PlanResult, TripRequest};
use planner::Planner;
use provider::GeminiClient;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
    planner: Arc<Planner>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("trip_planner=debug,tower_http=info")
        .init();

    let api_key = std::env::var("GEMINI_API_KEY").ok();
    if api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; plan requests will fail until it is provided");
    }

    let provider = Arc::new(GeminiClient::new(api_key));
    let planner = Arc::new(Planner::new(provider));
    let state = AppState { planner };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Trip planner service running on http://0.0.0.0:{port}");

    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/plan", post(plan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[instrument(skip(state, req), fields(request_id = %Uuid::new_v4(), location = %req.location))]
async fn plan(
    State(state): State<AppState>,
    Json(req): Json<TripRequest>,
) -> Result<Json<PlanResult>, PlanError> {
    let start_time = std::time::Instant::now();
    let result = state.planner.plan(req).await?;
    info!("Plan request served in {:?}", start_time.elapsed());
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state_with_mock(server: &mockito::Server) -> AppState {
        let provider = Arc::new(
            GeminiClient::new(Some("test-key".to_string())).with_base_url(server.url()),
        );
        AppState {
            planner: Arc::new(Planner::new(provider)),
        }
    }

    fn plan_request_body() -> Value {
        json!({
            "budget": 80000,
            "location": "Goa, India",
            "people": 2,
            "days": 4,
            "travelerType": "Budget"
        })
    }

    fn provider_success_body() -> Value {
        let payload = json!({
            "weather": { "temp": 31.0, "condition": "Sunny", "isOutdoorFriendly": true },
            "hotels": [
                {
                    "name": "Seaside Inn",
                    "pricePerNight": 3500.0,
                    "rating": 4.2,
                    "description": "Close to the beach",
                    "address": "Calangute Beach Road, Goa",
                    "amenities": ["wifi"]
                },
                {
                    "name": "Palm Court",
                    "pricePerNight": 4100.0,
                    "rating": 4.5,
                    "description": "Quiet courtyard hotel",
                    "address": "Baga Lane, Goa",
                    "amenities": ["pool"]
                },
                {
                    "name": "City Lodge",
                    "pricePerNight": 2900.0,
                    "rating": 3.9,
                    "description": "Central and simple",
                    "address": "Panaji Market, Goa",
                    "amenities": []
                }
            ],
            "activities": [
                { "name": "Fort walk", "cost": 0.0, "type": "Outdoor", "description": "Aguada fort" },
                { "name": "Spice farm", "cost": 700.0, "type": "Outdoor", "description": "Plantation visit" },
                { "name": "Museum of Goa", "cost": 300.0, "type": "Indoor", "description": "Art space" },
                { "name": "Cooking class", "cost": 1500.0, "type": "Indoor", "description": "Goan curry" }
            ],
            "foodSuggestions": ["Fish thali", "Bebinca", "Prawn balchao", "Poi bread"],
            "totalEstimatedCost": 76500.0
        });

        json!({
            "candidates": [{
                "content": { "parts": [{ "text": payload.to_string() }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "title": "Goa tourism", "uri": "https://example.com/goa" } }
                    ]
                }
            }]
        })
    }

    async fn post_plan(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/plan")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn plan_endpoint_returns_merged_result() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(provider_success_body().to_string())
            .create_async()
            .await;

        let (status, body) = post_plan(app(state_with_mock(&server)), plan_request_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["budgetBreakdown"]["stay"], 44000.0);
        assert_eq!(body["budgetBreakdown"]["perPersonPerDay"], 10000.0);
        assert_eq!(body["hotels"].as_array().unwrap().len(), 3);
        assert_eq!(body["citations"][0]["uri"], "https://example.com/goa");
        assert_eq!(body["weather"]["isOutdoorFriendly"], true);
    }

    #[tokio::test]
    async fn invalid_budget_is_rejected_before_the_provider_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .expect(0)
            .create_async()
            .await;

        let mut body = plan_request_body();
        body["budget"] = json!(-5);
        let (status, response) = post_plan(app(state_with_mock(&server)), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response["error"].as_str().unwrap().contains("budget"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_traveler_type_is_rejected() {
        let server = mockito::Server::new_async().await;
        let mut body = plan_request_body();
        body["travelerType"] = json!("Royalty");

        let (status, _) = post_plan(app(state_with_mock(&server)), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_the_generic_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let (status, body) = post_plan(app(state_with_mock(&server)), plan_request_body()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"],
            "Unable to fetch live travel data. Please try a different location."
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_the_request_not_the_process() {
        let provider = Arc::new(GeminiClient::new(None));
        let state = AppState {
            planner: Arc::new(Planner::new(provider)),
        };

        let (status, body) = post_plan(app(state), plan_request_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let provider = Arc::new(GeminiClient::new(None));
        let state = AppState {
            planner: Arc::new(Planner::new(provider)),
        };

        let response = app(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
