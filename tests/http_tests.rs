mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use pinmap::config::Config;
use pinmap::db::pool::DbPool;
use pinmap::http::state::AppState;

const TEST_SECRET: &str = "test-secret";

/// Router over a fresh in-memory database.
fn test_app() -> Router {
    let pool = DbPool::open_in_memory().expect("open db");
    pinmap::db::initialize::init_db(&pool.conn).expect("init db");

    let config = Config {
        database: ":memory:".to_string(),
        bind: "127.0.0.1:0".to_string(),
        token_secret: TEST_SECRET.to_string(),
        token_validity_hours: 8,
    };

    pinmap::http::router(AppState::new(config, pool))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::empty()).expect("request")
}

/// Register the bootstrap admin and return a login token.
async fn bootstrap_admin(app: &Router) -> String {
    let (status, _) = send(
        app,
        post_json(
            "/auth/register",
            json!({"username": "ana", "password": "segura123", "role": "admin"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        post_json(
            "/auth/login",
            json!({"username": "ana", "password": "segura123"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn test_pin_roundtrip_newest_first() {
    let app = test_app();

    let (status, created) = send(
        &app,
        post_json(
            "/pins",
            json!({"title": "A", "longitude": -99.1, "latitude": 19.4}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["title"], json!("A"));

    let (status, _) = send(
        &app,
        post_json(
            "/pins",
            json!({"longitude": -99.2, "latitude": 19.5}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = send(&app, get("/pins", None)).await;
    assert_eq!(status, StatusCode::OK);
    let pins = listed.as_array().expect("array");
    assert_eq!(pins.len(), 2);
    // Newest first.
    assert!(pins[0]["id"].as_i64() > pins[1]["id"].as_i64());
}

#[tokio::test]
async fn test_pin_rejects_bad_coordinates() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_json(
            "/pins",
            json!({"longitude": 200.0, "latitude": 19.4}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or("").contains("longitude"));
}

#[tokio::test]
async fn test_invalid_filter_is_400_naming_the_field() {
    let app = test_app();
    let (status, body) = send(&app, get("/pins?month=2024-3", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or("").contains("month"));
}

#[tokio::test]
async fn test_settings_update_requires_admin_and_applies_nothing_otherwise() {
    let app = test_app();

    let update = json!({"centerLongitude": 2.17, "centerLatitude": 41.38, "zoom": 14});

    // No token: 401.
    let (status, _) = send(&app, post_json("/admin/config", update.clone(), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token: still 401.
    let (status, _) = send(
        &app,
        post_json("/admin/config", update.clone(), Some("not-a-token")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Expired admin token: 401 as well.
    let expired = pinmap::auth::issue_token(
        &pinmap::models::user::User {
            id: 1,
            username: "ana".to_string(),
            password_hash: String::new(),
            role: pinmap::models::user::Role::Admin,
        },
        TEST_SECRET,
        -1,
    )
    .expect("issue");
    let (status, _) = send(
        &app,
        post_json("/admin/config", update.clone(), Some(&expired)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Settings row untouched by the rejected attempts.
    let (status, body) = send(&app, get("/config", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zoom"], json!(12));

    // Admin token: applied.
    let token = bootstrap_admin(&app).await;
    let (status, _) = send(&app, post_json("/admin/config", update, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/config", None)).await;
    assert_eq!(body["zoom"], json!(14));
    assert_eq!(body["centerLatitude"], json!(41.38));
}

#[tokio::test]
async fn test_non_admin_token_is_forbidden() {
    let app = test_app();
    let admin_token = bootstrap_admin(&app).await;

    // Admin registers a plain user.
    let (status, _) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "eva", "password": "segura123", "role": "user"}),
            Some(&admin_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        post_json(
            "/auth/login",
            json!({"username": "eva", "password": "segura123"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user_token = body["token"].as_str().expect("token").to_string();

    // Valid identity, insufficient role: 403, not 401.
    let (status, _) = send(
        &app,
        post_json(
            "/admin/config",
            json!({"centerLongitude": 0.0, "centerLatitude": 0.0, "zoom": 5}),
            Some(&user_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, get("/admin/export/pins.xlsx", Some(&user_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_registration_gate_after_bootstrap() {
    let app = test_app();
    let token = bootstrap_admin(&app).await;

    // Anonymous attempt once an admin exists: 401.
    let (status, _) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "eva", "password": "segura123", "role": "admin"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Same request with the admin token: 201.
    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "eva", "password": "segura123", "role": "admin"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], json!("admin"));
}

#[tokio::test]
async fn test_duplicate_username_is_409() {
    let app = test_app();
    let token = bootstrap_admin(&app).await;

    let (status, _) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "ana", "password": "segura123"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_failure_is_generic_401() {
    let app = test_app();
    bootstrap_admin(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/login",
            json!({"username": "ana", "password": "wrong-password"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status2, body2) = send(
        &app,
        post_json(
            "/auth/login",
            json!({"username": "nobody", "password": "wrong-password"}),
            None,
        ),
    )
    .await;
    assert_eq!(status2, StatusCode::UNAUTHORIZED);
    // Unknown user and bad password are indistinguishable.
    assert_eq!(body, body2);
}

#[tokio::test]
async fn test_export_download_headers() {
    let app = test_app();
    let token = bootstrap_admin(&app).await;

    let (status, _) = send(
        &app,
        post_json(
            "/pins",
            json!({"title": "A", "longitude": -99.1, "latitude": 19.4}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get("/admin/export/pins.xlsx", Some(&token)))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("pines_todo_"));

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    assert_eq!(&bytes[0..4], b"PK\x03\x04");
}

#[tokio::test]
async fn test_export_requires_token() {
    let app = test_app();
    let (status, _) = send(&app, get("/admin/export/pins.xlsx", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_export_unknown_target_is_400() {
    let app = test_app();
    let token = bootstrap_admin(&app).await;

    let (status, _) = send(&app, get("/admin/export/visits.xlsx", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/admin/export/pins.pdf", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
