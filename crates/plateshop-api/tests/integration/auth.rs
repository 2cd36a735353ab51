//! Admin login and the bearer token gate on write routes.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{TOKEN, TestApp};

#[tokio::test]
async fn test_login_with_admin_credentials_returns_token() {
    let app = TestApp::new();
    let body = json!({ "username": "bajaj_elites", "password": "bajaj0987" }).to_string();

    let (status, resp) = app
        .send(Method::POST, "/api/login", None, Some(&body))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "success": true, "token": TOKEN }));
}

#[tokio::test]
async fn test_login_with_other_credentials_is_401() {
    let app = TestApp::new();
    for body in [
        json!({ "username": "bajaj_elites", "password": "nope" }),
        json!({ "username": "admin", "password": "bajaj0987" }),
        json!({ "username": "bajaj_elites" }),
        json!({}),
        json!({ "username": 123, "password": null }),
        json!({ "username": ["bajaj_elites"], "password": { "value": "bajaj0987" } }),
        json!({ "username": "bajaj_elites", "password": 987 }),
    ] {
        let text = body.to_string();
        let (status, resp) = app
            .send(Method::POST, "/api/login", None, Some(&text))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "body {body}");
        assert_eq!(
            resp,
            json!({ "success": false, "message": "Invalid credentials" })
        );
    }
}

#[tokio::test]
async fn test_login_with_malformed_json_is_400() {
    let app = TestApp::new();
    let (status, resp) = app
        .send(Method::POST, "/api/login", None, Some("{not json"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp, json!({ "error": "Invalid JSON body." }));
}

#[tokio::test]
async fn test_writes_reject_bad_authorization_headers() {
    let app = TestApp::new();
    let before = app.file_bytes();
    let product = json!({ "number": "KA01ZZ0001" }).to_string();
    let update = json!({ "rowIndex": 0, "updatedFields": { "cost": "₹1" } }).to_string();

    let headers = [
        None,
        Some(TOKEN.to_string()),
        Some(format!("Basic {TOKEN}")),
        Some(format!("bearer {TOKEN}")),
        Some(format!("Bearer {TOKEN}x")),
        Some(format!("Bearer x{TOKEN}")),
        Some("Bearer ".to_string()),
    ];

    for header in &headers {
        for (method, uri, body) in [
            (Method::POST, "/api/products", &product),
            (Method::POST, "/api/products/add", &product),
            (Method::PUT, "/api/products", &update),
            (Method::PUT, "/api/products/update", &update),
        ] {
            let (status, resp) = app
                .send(method, uri, header.as_deref(), Some(body))
                .await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri} with {header:?}");
            assert_eq!(
                resp["message"],
                "Forbidden: Invalid or missing authentication token"
            );
        }
    }

    assert_eq!(app.file_bytes(), before);
}

#[tokio::test]
async fn test_auth_is_checked_before_body_validation() {
    let app = TestApp::new();
    let (status, _) = app
        .send(Method::POST, "/api/products", None, Some("{}"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
