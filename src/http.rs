//! HTTP binding of the protocol layer.

use crate::engine::TokenEngine;
use crate::jwks::Jwks;
use crate::metrics;
use crate::error::INVALID_REQUEST;
use crate::oidc::{self, AuthorizationRequest, DiscoveryDocument, ErrorResponse, TokenRequest};
use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    engine: Arc<TokenEngine>,
    discovery: Arc<DiscoveryDocument>,
    jwks: Arc<Jwks>,
    code_ttl_seconds: i64,
    token_ttl_seconds: i64,
}

impl AppState {
    pub fn new(engine: Arc<TokenEngine>, code_ttl_seconds: i64, token_ttl_seconds: i64) -> Self {
        let discovery = DiscoveryDocument::new(engine.issuer(), engine.algorithm());
        let jwks = Jwks::from_key_material(engine.keys());
        Self {
            engine,
            discovery: Arc::new(discovery),
            jwks: Arc::new(jwks),
            code_ttl_seconds,
            token_ttl_seconds,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/.well-known/openid-configuration", get(discovery))
        .route("/auth", get(authorize))
        .route("/token", post(token))
        .route("/certs", get(certs))
        .route("/metrics", get(prometheus_metrics))
        .with_state(state)
}

async fn discovery(State(state): State<AppState>) -> Json<DiscoveryDocument> {
    Json(state.discovery.as_ref().clone())
}

async fn certs(State(state): State<AppState>) -> Json<Jwks> {
    Json(state.jwks.as_ref().clone())
}

async fn authorize(
    State(state): State<AppState>,
    Query(request): Query<AuthorizationRequest>,
) -> Response {
    match oidc::authorize(&state.engine, &request, state.code_ttl_seconds) {
        Ok(redirect) => {
            (StatusCode::FOUND, [(header::LOCATION, redirect.to_string())]).into_response()
        }
        Err(e) => {
            warn!(client_id = %request.client_id, error = %e, "Rejected authorization request");
            (StatusCode::BAD_REQUEST, format!("error: {e}")).into_response()
        }
    }
}

async fn token(
    State(state): State<AppState>,
    request: Result<Form<TokenRequest>, FormRejection>,
) -> Response {
    let Form(request) = match request {
        Ok(form) => form,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected token request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(INVALID_REQUEST)),
            )
                .into_response();
        }
    };

    match oidc::exchange(&state.engine, &request, state.token_ttl_seconds) {
        Ok(response) => (
            [(header::CACHE_CONTROL, "no-store")],
            Json(response),
        )
            .into_response(),
        Err(e) => {
            let status = if e.is_server_error() {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, Json(e)).into_response()
        }
    }
}

async fn prometheus_metrics() -> String {
    metrics::gather()
}
