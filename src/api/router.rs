use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{
    logging_middleware, metrics_middleware, security_headers_middleware, MAX_BODY_SIZE,
};
use super::predict;
use super::state::AppState;
use super::types::ApiError;

/// Create the prediction service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/predict", post(predict::predict))
        .route("/model", get(predict::model_info))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Cross-origin requests are accepted from any origin
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::vehicle::fixtures::defender_payload;
    use crate::infrastructure::scoring::{LinearPriceModel, TEST_ARTIFACT};
    use crate::infrastructure::services::PredictionService;

    fn ready_router() -> Router {
        let model = LinearPriceModel::from_json_str(TEST_ARTIFACT).unwrap();
        create_router(AppState::new(PredictionService::new(Arc::new(model))))
    }

    fn unavailable_router() -> Router {
        create_router(AppState::new(PredictionService::unavailable(
            "artifact missing",
        )))
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_acknowledges() {
        let response = ready_router().oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"message": "this is test route"}));
    }

    #[tokio::test]
    async fn test_root_is_up_without_artifact() {
        let response = unavailable_router().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_predict_example_payload() {
        let response = ready_router()
            .oneshot(post_json(&defender_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let price = body["prediction_price"].as_f64().unwrap();
        assert!((price - 9.98).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_predict_is_idempotent() {
        let router = ready_router();
        let first = body_json(
            router
                .clone()
                .oneshot(post_json(&defender_payload()))
                .await
                .unwrap(),
        )
        .await;
        let second = body_json(router.oneshot(post_json(&defender_payload())).await.unwrap()).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_predict_rejects_unknown_fuel_type() {
        let mut payload = defender_payload();
        payload["Fuel_Type"] = json!("Hybrid");

        let response = ready_router().oneshot(post_json(&payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["fields"][0]["field"], "Fuel_Type");
    }

    #[tokio::test]
    async fn test_predict_lists_every_offending_field() {
        let mut payload = defender_payload();
        payload["Owner"] = json!(5);
        payload["Seller_Type"] = json!("Broker");
        payload.as_object_mut().unwrap().remove("Year");

        let response = ready_router().oneshot(post_json(&payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["Year", "Seller_Type", "Owner"]);
    }

    #[tokio::test]
    async fn test_predict_without_artifact_is_unavailable() {
        let response = unavailable_router()
            .oneshot(post_json(&defender_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "service_unavailable_error");
        assert!(!body["error"]["message"].as_str().unwrap().contains("artifact missing"));
    }

    #[tokio::test]
    async fn test_predict_malformed_json() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"Car_Name\": "))
            .unwrap();

        let response = ready_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://dashboard.example")
            .body(Body::empty())
            .unwrap();

        let response = ready_router().oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = ready_router().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_ready_reflects_artifact_state() {
        let ready = ready_router().oneshot(get("/ready")).await.unwrap();
        assert_eq!(ready.status(), StatusCode::OK);

        let not_ready = unavailable_router().oneshot(get("/ready")).await.unwrap();
        assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(not_ready).await;
        assert_eq!(body["checks"][0]["status"], "unhealthy");
        assert_eq!(body["checks"][0]["message"], "scoring artifact not loaded");
        assert!(!body.to_string().contains("artifact missing"));
    }

    #[tokio::test]
    async fn test_predict_extreme_year_is_scored() {
        let mut payload = defender_payload();
        payload["Year"] = json!(i32::MIN);

        let response = ready_router().oneshot(post_json(&payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let price = body_json(response).await["prediction_price"].as_f64().unwrap();
        assert!(price.is_finite());
        assert!(price < 0.0);
    }

    #[tokio::test]
    async fn test_long_non_ascii_path_is_not_found() {
        let uri = format!("/{}", "é".repeat(30));

        let response = ready_router().oneshot(get(&uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_uses_error_envelope() {
        let response = ready_router().oneshot(get("/v2/predict")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_model_info() {
        let response = ready_router().oneshot(get("/model")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "test-linear");

        let missing = unavailable_router().oneshot(get("/model")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
