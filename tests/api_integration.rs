//! API Integration Tests for Flowerbed
//!
//! Drives the full router using axum-test against an in-memory SQLite
//! database.

use axum::http::{header::LOCATION, StatusCode};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_test::TestServer;
use flowerbed::db::{self, DbPool};
use flowerbed::middleware::OWNER_COOKIE_NAME;
use flowerbed::AppState;
use rstest::rstest;
use serde_json::Value;

// ============================================================================
// Test Setup Helpers
// ============================================================================

/// Create a test database with the schema applied
async fn setup_test_db() -> DbPool {
    let pool = db::init_pool(":memory:", 1)
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to initialize schema");
    pool
}

/// Build a test server around the application router
async fn build_test_app() -> (TestServer, DbPool) {
    let pool = setup_test_db().await;
    let state = AppState::with_pool(pool.clone());

    let server = TestServer::new(flowerbed::app(state)).expect("Failed to create test server");

    (server, pool)
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .header(LOCATION)
        .to_str()
        .expect("Location header is not ASCII")
        .to_string()
}

fn flower_id_from_location(location: &str) -> String {
    location
        .strip_prefix("/f/")
        .and_then(|rest| rest.strip_suffix('/'))
        .expect("Redirect does not point at a flower page")
        .to_string()
}

// ============================================================================
// Plant Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_plant_without_cookie_creates_flower() {
    let (server, pool) = build_test_app().await;

    let response = server.post("/plant/").await;

    response.assert_status(StatusCode::FOUND);
    let location = location(&response);
    let flower_id = flower_id_from_location(&location);
    assert!(uuid::Uuid::parse_str(&flower_id).is_ok());

    let cookie = response.cookie(OWNER_COOKIE_NAME);
    assert_eq!(cookie.value().len(), 64);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.max_age(), Some(time::Duration::days(365)));

    let stored = db::get_flower(&pool, &flower_id).await.unwrap();
    assert_eq!(stored.owner_token, cookie.value());
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_plant_via_get_is_supported() {
    let (server, pool) = build_test_app().await;

    let response = server.get("/plant/").await;

    response.assert_status(StatusCode::FOUND);
    assert!(response.maybe_cookie(OWNER_COOKIE_NAME).is_some());
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_plant_with_owner_cookie_returns_existing_flower() {
    let (server, pool) = build_test_app().await;

    let first = server.post("/plant/").await;
    let first_location = location(&first);
    let cookie = first.cookie(OWNER_COOKIE_NAME);

    let second = server
        .post("/plant/")
        .add_cookie(Cookie::new(OWNER_COOKIE_NAME, cookie.value().to_string()))
        .await;

    second.assert_status(StatusCode::FOUND);
    assert_eq!(location(&second), first_location);
    assert!(second.maybe_cookie(OWNER_COOKIE_NAME).is_none());
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_plant_with_unknown_cookie_plants_new_flower() {
    let (server, pool) = build_test_app().await;

    let response = server
        .post("/plant/")
        .add_cookie(Cookie::new(OWNER_COOKIE_NAME, "forged-token"))
        .await;

    response.assert_status(StatusCode::FOUND);
    let cookie = response.cookie(OWNER_COOKIE_NAME);
    assert_ne!(cookie.value(), "forged-token");
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_different_browsers_get_different_flowers() {
    let (server, pool) = build_test_app().await;

    let a = server.post("/plant/").await;
    let b = server.post("/plant/").await;

    assert_ne!(location(&a), location(&b));
    assert_ne!(
        a.cookie(OWNER_COOKIE_NAME).value(),
        b.cookie(OWNER_COOKIE_NAME).value()
    );
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 2);
}

// ============================================================================
// View Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_view_planted_flower() {
    let (server, pool) = build_test_app().await;

    let planted = server.post("/plant/").await;
    let location = location(&planted);
    let flower_id = flower_id_from_location(&location);
    let stored = db::get_flower(&pool, &flower_id).await.unwrap();

    let response = server.get(&location).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(&format!(r#"data-flower-id="{}""#, flower_id)));
    assert!(html.contains(&format!(r#"data-variation="{}""#, stored.variation)));
    assert!(html.contains(&format!(r#"data-seed="{}""#, stored.seed)));
    assert!(!html.contains(&stored.owner_token));
}

#[tokio::test]
async fn test_view_does_not_require_ownership() {
    let (server, _pool) = build_test_app().await;

    let planted = server.post("/plant/").await;
    let location = location(&planted);

    // No cookie attached
    let response = server.get(&location).await;
    response.assert_status_ok();
}

/// Only the canonical hyphenated lowercase id names a flower page.
#[rstest]
#[case::uppercase("uppercase")]
#[case::simple("simple")]
#[case::braced("braced")]
#[case::urn("urn")]
#[tokio::test]
async fn test_view_non_canonical_id_returns_not_found(#[case] form: &str) {
    let (server, _pool) = build_test_app().await;

    let planted = server.post("/plant/").await;
    let flower_id = flower_id_from_location(&location(&planted));

    let respelled = match form {
        "uppercase" => flower_id.to_uppercase(),
        "simple" => flower_id.replace('-', ""),
        "braced" => format!("{{{}}}", flower_id),
        _ => format!("urn:uuid:{}", flower_id),
    };

    server
        .get(&format!("/f/{}/", respelled))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_view_unknown_flower_returns_not_found() {
    let (server, _pool) = build_test_app().await;

    let response = server
        .get(&format!("/f/{}/", uuid::Uuid::new_v4()))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_view_malformed_id_returns_not_found() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/f/not-a-uuid/").await;

    response.assert_status_not_found();
}

// ============================================================================
// Trailing Slash Redirects
// ============================================================================

#[tokio::test]
async fn test_plant_without_trailing_slash_redirects() {
    let (server, pool) = build_test_app().await;

    let response = server.post("/plant").await;

    response.assert_status(StatusCode::PERMANENT_REDIRECT);
    assert_eq!(location(&response), "/plant/");
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 0);

    server
        .get("/plant")
        .await
        .assert_status(StatusCode::PERMANENT_REDIRECT);
}

#[tokio::test]
async fn test_view_without_trailing_slash_redirects() {
    let (server, _pool) = build_test_app().await;

    let planted = server.post("/plant/").await;
    let flower_location = location(&planted);
    let flower_id = flower_id_from_location(&flower_location);

    let response = server.get(&format!("/f/{}", flower_id)).await;

    response.assert_status(StatusCode::PERMANENT_REDIRECT);
    assert_eq!(location(&response), flower_location);
}

#[tokio::test]
async fn test_view_without_trailing_slash_rejects_malformed_id() {
    let (server, _pool) = build_test_app().await;

    server.get("/f/not-a-uuid").await.assert_status_not_found();
}

// ============================================================================
// Health Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_returns_healthy() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_liveness_check_returns_ok() {
    let (server, _pool) = build_test_app().await;

    server.get("/health/live").await.assert_status_ok();
}

#[tokio::test]
async fn test_readiness_check_reports_database() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"][0]["name"], "database");
    assert_eq!(body["checks"][0]["status"], "healthy");
}

// ============================================================================
// End-to-end Scenario
// ============================================================================

#[tokio::test]
async fn test_plant_return_and_miss_scenario() {
    let (server, pool) = build_test_app().await;

    // First visit plants a flower and hands out the ownership cookie
    let first = server.post("/plant/").await;
    first.assert_status(StatusCode::FOUND);
    let flower_location = location(&first);
    let cookie = first.cookie(OWNER_COOKIE_NAME);
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 1);

    // Coming back with the cookie lands on the same flower
    let second = server
        .post("/plant/")
        .add_cookie(Cookie::new(OWNER_COOKIE_NAME, cookie.value().to_string()))
        .await;
    assert_eq!(location(&second), flower_location);
    assert_eq!(db::count_flowers(&pool).await.unwrap(), 1);

    server.get(&flower_location).await.assert_status_ok();

    // Someone else's guess misses
    server
        .get(&format!("/f/{}/", uuid::Uuid::new_v4()))
        .await
        .assert_status_not_found();
}
