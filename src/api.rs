//! REST API router for the inventory service.
//!
//! Used by the binary and by integration tests. Create with [`create_router`].
//! Uses Extension for state so the router is `Router<()>` and works with
//! `into_make_service()`. `/products` and `/movements` sit behind the session
//! middleware; `/api/auth/*` and `/health` are public.

use axum::{
    extract::{Extension, Path, Query, Request},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

use crate::auth::{bearer_token, require_session, Auth, AuthUser};
use crate::catalog::Catalog;
use crate::error::{AuthError, CatalogError};
use crate::history::{self, HistoryFilter};
use crate::types::{NewProduct, ProductId, ProductUpdate};

/// Shared app state: one catalog per process plus the auth tables.
#[derive(Clone)]
pub struct AppState {
    pub(crate) catalog: Arc<Mutex<Catalog>>,
    pub(crate) auth: Auth,
}

/// Handler error: domain errors mapped onto HTTP statuses, body always
/// `{"error": <message>}`.
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    Auth(AuthError),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Catalog(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Catalog(e) => {
                let status = match &e {
                    CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
                    CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                };
                (status, e.to_string())
            }
            ApiError::Auth(e) => {
                let status = match &e {
                    AuthError::Validation(_) | AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
                    AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                        StatusCode::UNAUTHORIZED
                    }
                    AuthError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Builds the REST router with state. Returns `Router<()>` so you can call
/// `.into_make_service()` for `axum::serve`.
pub fn create_router(auth: Auth) -> Router<()> {
    let state = AppState {
        catalog: Arc::new(Mutex::new(Catalog::new())),
        auth: auth.clone(),
    };
    let protected = Router::new()
        .route("/products", get(list_products).post(add_product))
        .route("/products/:id", put(update_product).delete(remove_product))
        .route("/movements", get(list_movements))
        .route_layer(middleware::from_fn(move |req: Request, next: Next| {
            let auth = auth.clone();
            async move { require_session(req, next, auth).await }
        }));
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .merge(protected)
        .layer(Extension(state))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn list_products(Extension(state): Extension<AppState>) -> Response {
    let guard = state.catalog.lock().expect("lock");
    Json(guard.list()).into_response()
}

async fn add_product(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewProduct>,
) -> Result<Response, ApiError> {
    let mut guard = state.catalog.lock().expect("lock");
    let product = guard.add(body, user.username.as_deref())?;
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

async fn update_product(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
    Json(body): Json<ProductUpdate>,
) -> Result<Response, ApiError> {
    let mut guard = state.catalog.lock().expect("lock");
    let product = guard.update(ProductId(id), body, user.username.as_deref())?;
    Ok(Json(product).into_response())
}

async fn remove_product(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let mut guard = state.catalog.lock().expect("lock");
    guard.remove(ProductId(id), user.username.as_deref())?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn list_movements(
    Extension(state): Extension<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> Response {
    let guard = state.catalog.lock().expect("lock");
    Json(history::query(guard.log(), &filter)).into_response()
}

#[derive(serde::Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn register(
    Extension(state): Extension<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Response, ApiError> {
    let session = state.auth.register(&body.username, &body.password)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": session.token,
            "user": { "username": session.username },
        })),
    )
        .into_response())
}

async fn login(
    Extension(state): Extension<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Response, ApiError> {
    let session = state.auth.login(&body.username, &body.password)?;
    Ok(Json(json!({
        "token": session.token,
        "user": { "username": session.username },
    }))
    .into_response())
}

async fn logout(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = bearer_token(&headers) {
        state.auth.logout(&token);
    }
    Json(json!({ "ok": true })).into_response()
}

async fn me(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let username = bearer_token(&headers)
        .and_then(|t| state.auth.username_for(&t))
        .ok_or(AuthError::NotAuthenticated)?;
    Ok(Json(json!({ "user": { "username": username } })).into_response())
}
