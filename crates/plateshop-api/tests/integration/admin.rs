//! Token-gated add and update operations.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{TOKEN, TestApp};

// -------------------------------------------------------------------------
// add
// -------------------------------------------------------------------------

#[tokio::test]
async fn test_add_product_appends_fourth_record() {
    let app = TestApp::new();
    let product = json!({
        "number": "KA01ZZ0001",
        "description": "Test",
        "cost": "₹1000",
        "availability": "In Stock",
        "imageurl": "",
    });

    let (status, resp) = app
        .send_authed(Method::POST, "/api/products", TOKEN, &product)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Product added successfully!");
    assert_eq!(resp["newProduct"], product);

    let products = app.products().await;
    assert_eq!(products.len(), 4);
    assert_eq!(products[3], product);
}

#[tokio::test]
async fn test_add_product_via_legacy_path() {
    let app = TestApp::new();
    let (status, _) = app
        .send_authed(
            Method::POST,
            "/api/products/add",
            TOKEN,
            &json!({ "number": "KA02" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let products = app.products().await;
    assert_eq!(products.len(), 4);
    assert_eq!(products[3]["number"], "KA02");
    assert_eq!(products[3]["cost"], "");
}

#[tokio::test]
async fn test_add_product_rejects_empty_body() {
    let app = TestApp::new();
    for body in [json!({}), json!([]), json!("KA03"), json!(null)] {
        let (status, resp) = app
            .send_authed(Method::POST, "/api/products", TOKEN, &body)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(resp["error"], "Missing new product data.");
    }
    assert_eq!(app.products().await.len(), 3);
}

#[tokio::test]
async fn test_add_product_without_body_is_400() {
    let app = TestApp::new();
    let header = format!("Bearer {TOKEN}");
    let (status, resp) = app
        .send(Method::POST, "/api/products", Some(header.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "Invalid JSON body.");
}

#[tokio::test]
async fn test_concurrent_adds_are_all_kept() {
    let app = std::sync::Arc::new(TestApp::new());

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let product = json!({ "number": format!("CONC{i:02}") });
                app.send_authed(Method::POST, "/api/products", TOKEN, &product)
                    .await
                    .0
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(app.products().await.len(), 13);
}

// -------------------------------------------------------------------------
// update
// -------------------------------------------------------------------------

#[tokio::test]
async fn test_update_changes_only_cost_of_first_record() {
    let app = TestApp::new();
    let before = app.products().await;

    let (status, resp) = app
        .send_authed(
            Method::PUT,
            "/api/products",
            TOKEN,
            &json!({ "rowIndex": 0, "updatedFields": { "cost": "₹99999" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Product data updated successfully!");

    let after = app.products().await;
    let mut expected = before[0].clone();
    expected["cost"] = json!("₹99999");
    assert_eq!(after[0], expected);
    assert_eq!(after[1..], before[1..]);
}

#[tokio::test]
async fn test_update_via_legacy_and_indexed_paths() {
    let app = TestApp::new();

    let (status, _) = app
        .send_authed(
            Method::PUT,
            "/api/products/update",
            TOKEN,
            &json!({ "rowIndex": "1", "updatedFields": { "availability": "Sold Out" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send_authed(
            Method::PUT,
            "/api/products/2",
            TOKEN,
            &json!({ "updatedFields": { "Image URL": "https://new" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let products = app.products().await;
    assert_eq!(products[1]["availability"], "Sold Out");
    assert_eq!(products[2]["imageurl"], "https://new");
}

#[tokio::test]
async fn test_update_ignores_unknown_fields() {
    let app = TestApp::new();
    let before = app.products().await;

    let (status, _) = app
        .send_authed(
            Method::PUT,
            "/api/products",
            TOKEN,
            &json!({ "rowIndex": 0, "updatedFields": { "price": "₹1" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.products().await, before);
}

#[tokio::test]
async fn test_update_missing_parameters_is_400() {
    let app = TestApp::new();
    for body in [
        json!({ "updatedFields": { "cost": "₹1" } }),
        json!({ "rowIndex": 0 }),
        json!({ "rowIndex": 0, "updatedFields": {} }),
        json!({ "rowIndex": 0, "updatedFields": "cost" }),
        json!({ "rowIndex": 0.5, "updatedFields": { "cost": "₹1" } }),
    ] {
        let (status, resp) = app
            .send_authed(Method::PUT, "/api/products", TOKEN, &body)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(
            resp["error"],
            "Missing required parameters: rowIndex and updatedFields object."
        );
    }
}

#[tokio::test]
async fn test_update_out_of_range_is_404_and_leaves_file_alone() {
    let app = TestApp::new();
    let before = app.file_bytes();

    for index in [json!(3), json!(-1), json!(1_000_000)] {
        let (status, resp) = app
            .send_authed(
                Method::PUT,
                "/api/products",
                TOKEN,
                &json!({ "rowIndex": index, "updatedFields": { "cost": "₹0" } }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "index {index}");
        assert_eq!(resp["error"], "Row index out of bounds.");
    }

    assert_eq!(app.file_bytes(), before);
}

#[tokio::test]
async fn test_update_accepts_integral_float_index() {
    let app = TestApp::new();

    let (status, _) = app
        .send_authed(
            Method::PUT,
            "/api/products",
            TOKEN,
            &json!({ "rowIndex": 2.0, "updatedFields": { "cost": "₹1" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.products().await[2]["cost"], "₹1");

    let before = app.file_bytes();
    let (status, resp) = app
        .send_authed(
            Method::PUT,
            "/api/products",
            TOKEN,
            &serde_json::from_str(r#"{"rowIndex":1e3,"updatedFields":{"cost":"₹2"}}"#).unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["error"], "Row index out of bounds.");
    assert_eq!(app.file_bytes(), before);
}

#[tokio::test]
async fn test_update_indexed_path_rejects_non_numeric_index() {
    let app = TestApp::new();
    let (status, _) = app
        .send_authed(
            Method::PUT,
            "/api/products/first",
            TOKEN,
            &json!({ "updatedFields": { "cost": "₹1" } }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -------------------------------------------------------------------------
// store failures
// -------------------------------------------------------------------------

/// Occupy the temp-file slot so every rewrite fails after a good read.
fn block_writes(app: &TestApp) {
    std::fs::create_dir(app.state.store.path().with_extension("csv.tmp")).unwrap();
}

#[tokio::test]
async fn test_add_product_write_failure_is_500() {
    let app = TestApp::new();
    block_writes(&app);
    let before = app.file_bytes();

    let (status, resp) = app
        .send_authed(
            Method::POST,
            "/api/products",
            TOKEN,
            &json!({ "number": "KA09" }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp, json!({ "error": "Failed to save new product to CSV file." }));
    assert_eq!(app.file_bytes(), before);
}

#[tokio::test]
async fn test_update_write_failure_is_500() {
    let app = TestApp::new();
    block_writes(&app);
    let before = app.file_bytes();

    let (status, resp) = app
        .send_authed(
            Method::PUT,
            "/api/products",
            TOKEN,
            &json!({ "rowIndex": 0, "updatedFields": { "cost": "₹1" } }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp, json!({ "error": "Failed to save updated CSV file." }));
    assert_eq!(app.file_bytes(), before);
}

#[tokio::test]
async fn test_writes_against_unreadable_store_are_500() {
    let app = TestApp::new();
    let path = app.state.store.path();
    std::fs::remove_file(path).unwrap();
    std::fs::create_dir(path).unwrap();

    let (status, resp) = app
        .send_authed(
            Method::POST,
            "/api/products/add",
            TOKEN,
            &json!({ "number": "KA10" }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp["error"], "Failed to save new product to CSV file.");

    let (status, resp) = app
        .send_authed(
            Method::PUT,
            "/api/products/0",
            TOKEN,
            &json!({ "updatedFields": { "cost": "₹1" } }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp["error"], "Failed to save updated CSV file.");
}
