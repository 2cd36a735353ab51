//! Request handlers.

use axum::Extension;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use plateshop_auth::AuthenticatedUser;
use plateshop_store::{FieldMap, Record};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{error, info, warn};

use crate::{ApiError, AppState};

const MISSING_PRODUCT: &str = "Missing new product data.";
const MISSING_UPDATE: &str = "Missing required parameters: rowIndex and updatedFields object.";
const INVALID_BODY: &str = "Invalid JSON body.";

/// Body of `POST /login`.
///
/// Fields are kept as raw JSON so that non-string credentials are a failed
/// login rather than a malformed request.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Admin username.
    #[serde(default)]
    pub username: Value,
    /// Admin password.
    #[serde(default)]
    pub password: Value,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let store = state.store.clone();
    let products = blocking(move || store.count())
        .await?
        .map_err(|e| store_failure("Failed to read product data from CSV.", e))?;
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "products": products,
    })))
}

/// `GET /products`: public catalog.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let store = state.store.clone();
    let products = blocking(move || store.list_all())
        .await?
        .map_err(|e| store_failure("Failed to read product data from CSV.", e))?;
    info!(count = products.len(), "Fetched products");
    Ok(Json(products))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body.map_err(reject_body)?;
    let (Some(username), Some(password)) = (request.username.as_str(), request.password.as_str())
    else {
        warn!(username = %request.username, "Failed login attempt");
        return Err(ApiError::Unauthorized);
    };

    match state.gate.login(username, password) {
        Ok(token) => {
            info!(username, "Admin login successful");
            Ok(Json(json!({ "success": true, "token": token })))
        }
        Err(e) if e.is_client_error() => {
            warn!(username, "Failed login attempt");
            Err(ApiError::Unauthorized)
        }
        Err(e) => {
            error!("Token issuance failed: {e}");
            Err(ApiError::Internal("Failed to issue token.".to_string()))
        }
    }
}

/// `POST /products`: append a product.
pub async fn add_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(product) = body.map_err(reject_body)?;
    let fields = match product.as_object() {
        Some(object) if !object.is_empty() => field_map(object),
        _ => return Err(ApiError::Validation(MISSING_PRODUCT.to_string())),
    };

    let store = state.store.clone();
    blocking(move || store.append(&fields))
        .await?
        .map_err(|e| store_failure("Failed to save new product to CSV file.", e))?;

    info!(admin = %user.subject, "New product added");
    Ok(Json(json!({
        "message": "Product added successfully!",
        "newProduct": product,
    })))
}

/// `PUT /products`: update by `rowIndex` in the body.
pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body.map_err(reject_body)?;
    let index = request
        .get("rowIndex")
        .and_then(row_index)
        .ok_or_else(|| ApiError::Validation(MISSING_UPDATE.to_string()))?;
    apply_update(state, user, index, &request).await
}

/// `PUT /products/{index}`: update by path index.
pub async fn update_product_at(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(index): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body.map_err(reject_body)?;
    let index = index
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Validation(MISSING_UPDATE.to_string()))?;
    apply_update(state, user, index, &request).await
}

async fn apply_update(
    state: AppState,
    user: AuthenticatedUser,
    index: i64,
    request: &Value,
) -> Result<Json<Value>, ApiError> {
    let fields = match request.get("updatedFields").and_then(Value::as_object) {
        Some(object) if !object.is_empty() => field_map(object),
        _ => return Err(ApiError::Validation(MISSING_UPDATE.to_string())),
    };

    let store = state.store.clone();
    blocking(move || store.update_at(index, &fields))
        .await?
        .map_err(|e| {
            if e.is_not_found() {
                warn!("Update rejected: {e}");
                ApiError::NotFound("Row index out of bounds.".to_string())
            } else {
                store_failure("Failed to save updated CSV file.", e)
            }
        })?;

    info!(admin = %user.subject, row = index, "Product updated");
    Ok(Json(json!({ "message": "Product data updated successfully!" })))
}

/// Run store I/O off the async worker threads.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("Store task failed: {e}");
        ApiError::Internal("Store task failed.".to_string())
    })
}

fn store_failure(message: &str, err: plateshop_store::Error) -> ApiError {
    error!("{message} {err}");
    ApiError::Internal(message.to_string())
}

fn reject_body(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    ApiError::Validation(INVALID_BODY.to_string())
}

/// Accept integral JSON numbers (`2`, `2.0`, `1e3`) or numeric strings.
fn row_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| (i64::MIN as f64..=i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Flatten a JSON object into cell text: strings verbatim, `null` empty,
/// anything else as its JSON text.
fn field_map(object: &Map<String, Value>) -> FieldMap {
    object
        .iter()
        .map(|(key, value)| {
            let cell = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), cell)
        })
        .collect()
}
