//! HTTP routes.
//!
//! Handlers always answer 200 with a response envelope; a failed operation is
//! `success: false` in the body. Only malformed request bodies are rejected by
//! axum before reaching the store.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use regionmap_shared::{
    RegionAccessPolicyResponse, RegionMappingsResponse, RegionsResponse, ResolveCityResponse,
    SetRegionMappingsRequest, SetRegionsRequest, WriteResponse,
};

use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/regions", get(get_regions).put(set_regions))
        .route(
            "/api/region-mappings",
            get(get_region_mappings).put(set_region_mappings),
        )
        .route("/api/region-access-policy", get(get_region_access_policy))
        .route(
            "/api/region-mappings/resolve/{city}",
            get(resolve_city_region),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Regions
// =============================================================================

async fn get_regions(State(app): State<Arc<App>>) -> Json<RegionsResponse> {
    Json(app.use_cases.regions.get_regions().await)
}

async fn set_regions(
    State(app): State<Arc<App>>,
    Json(request): Json<SetRegionsRequest>,
) -> Json<WriteResponse> {
    Json(app.use_cases.regions.set_regions(request).await)
}

async fn get_region_access_policy(
    State(app): State<Arc<App>>,
) -> Json<RegionAccessPolicyResponse> {
    Json(app.use_cases.regions.get_region_access_policy().await)
}

// =============================================================================
// Mappings
// =============================================================================

async fn get_region_mappings(State(app): State<Arc<App>>) -> Json<RegionMappingsResponse> {
    Json(app.use_cases.regions.get_region_mappings().await)
}

async fn set_region_mappings(
    State(app): State<Arc<App>>,
    Json(request): Json<SetRegionMappingsRequest>,
) -> Json<WriteResponse> {
    Json(app.use_cases.regions.set_region_mappings(request).await)
}

async fn resolve_city_region(
    State(app): State<Arc<App>>,
    Path(city): Path<String>,
) -> Json<ResolveCityResponse> {
    Json(app.use_cases.regions.resolve_city_region(&city).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryRegionDocuments;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        let app = Arc::new(App::new(Arc::new(InMemoryRegionDocuments::new())));
        routes().with_state(app)
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn regions_default_then_replace() {
        let router = router();

        let (status, body) = send(&router, Method::GET, "/api/regions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "mode": "legacy", "regions": ["Unknown"] }));

        let (_, body) = send(
            &router,
            Method::PUT,
            "/api/regions",
            Some(json!({ "regions": ["GTA", "Unknown"] })),
        )
        .await;
        assert_eq!(body, json!({ "success": true }));

        let (_, body) = send(&router, Method::GET, "/api/regions", None).await;
        assert_eq!(body["regions"], json!(["GTA", "Unknown"]));
    }

    #[tokio::test]
    async fn rejected_write_is_an_envelope_not_a_status() {
        let router = router();
        let (status, body) = send(
            &router,
            Method::PUT,
            "/api/region-mappings",
            Some(json!({ "mappings": { "toronto": "GTA" }, "cities": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("GTA"));
    }

    #[tokio::test]
    async fn mappings_round_trip_and_resolve() {
        let router = router();
        send(
            &router,
            Method::PUT,
            "/api/regions",
            Some(json!({ "regions": ["GTA", "Unknown"] })),
        )
        .await;
        let (_, body) = send(
            &router,
            Method::PUT,
            "/api/region-mappings",
            Some(json!({
                "mappings": { "toronto": "GTA" },
                "cities": [{ "label": "Toronto", "value": "toronto" }]
            })),
        )
        .await;
        assert_eq!(body, json!({ "success": true }));

        let (_, body) = send(&router, Method::GET, "/api/region-mappings", None).await;
        assert_eq!(body["mappings"], json!({ "toronto": "GTA" }));
        assert_eq!(body["cities"], json!([{ "label": "Toronto", "value": "toronto" }]));

        let (_, body) = send(
            &router,
            Method::GET,
            "/api/region-mappings/resolve/Toronto",
            None,
        )
        .await;
        assert_eq!(body, json!({ "success": true, "city": "toronto", "region": "GTA" }));
    }

    #[tokio::test]
    async fn access_policy_reports_mode() {
        let (_, body) = send(&router(), Method::GET, "/api/region-access-policy", None).await;
        assert_eq!(body, json!({ "success": true, "mode": "legacy" }));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_by_extractor() {
        let (status, _) = send(
            &router(),
            Method::PUT,
            "/api/regions",
            Some(json!({ "regions": "GTA" })),
        )
        .await;
        assert!(status.is_client_error());
    }
}
