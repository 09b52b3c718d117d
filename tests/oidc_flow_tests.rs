//! End-to-end authorization code flow over the HTTP router.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{engine, foreign_engine, ISSUER};
use oidc_provider::http::{router, AppState};
use oidc_provider::jwks::Jwks;
use oidc_provider::oidc::{DiscoveryDocument, ErrorResponse, TokenResponse};
use oidc_provider::TokenType;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

const CODE_TTL: i64 = 300;
const TOKEN_TTL: i64 = 604_800;

fn app() -> Router {
    router(AppState::new(Arc::new(engine()), CODE_TTL, TOKEN_TTL))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn token_request(form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn authorize(query: &str) -> HashMap<String, String> {
    let (status, headers, _) = send(app(), get(&format!("/auth?{query}"))).await;
    assert_eq!(status, StatusCode::FOUND);

    let location = headers[header::LOCATION].to_str().unwrap();
    Url::parse(location).unwrap().query_pairs().into_owned().collect()
}

#[tokio::test]
async fn test_discovery_document() {
    let (status, _, body) = send(app(), get("/.well-known/openid-configuration")).await;
    assert_eq!(status, StatusCode::OK);

    let doc: DiscoveryDocument = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc.issuer, ISSUER);
    assert_eq!(doc.token_endpoint, format!("{ISSUER}/token"));
    assert_eq!(doc.id_token_signing_alg_values_supported, vec!["RS512"]);
}

#[tokio::test]
async fn test_jwks_publishes_signing_key() {
    let (status, _, body) = send(app(), get("/certs")).await;
    assert_eq!(status, StatusCode::OK);

    let jwks: Jwks = serde_json::from_slice(&body).unwrap();
    let engine = engine();
    assert_eq!(jwks.keys.len(), 1);
    assert_eq!(jwks.keys[0].kid, engine.keys().key_id());
    assert_eq!(jwks.keys[0].alg, engine.algorithm());
}

#[tokio::test]
async fn test_full_authorization_code_flow() {
    let params = authorize(
        "response_type=code&client_id=client-42&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback&scope=openid&state=abc",
    )
    .await;
    assert_eq!(params["state"], "abc");
    let code = &params["code"];

    let (status, headers, body) = send(
        app(),
        token_request(&format!(
            "grant_type=authorization_code&client_id=client-42&code={code}"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");

    let response: TokenResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, TOKEN_TTL);

    let engine = engine();
    let access = engine
        .validate(&response.access_token, TokenType::AccessToken)
        .unwrap();
    let id = engine
        .validate(&response.id_token, TokenType::AccessToken)
        .unwrap();
    assert_eq!(access.sub, "client-42");
    assert_eq!(id.aud, "client-42");
}

#[tokio::test]
async fn test_authorize_unsupported_scope() {
    let params = authorize(
        "response_type=code&client_id=client-42&redirect_uri=http%3A%2F%2Flocalhost%2Fcb&scope=email",
    )
    .await;

    assert_eq!(params["error"], "unsupported_scope");
    assert!(!params.contains_key("code"));
}

#[tokio::test]
async fn test_authorize_invalid_redirect() {
    let (status, _, _) = send(
        app(),
        get("/auth?response_type=code&client_id=c&redirect_uri=not%20a%20uri&scope=openid"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_token_rejects_foreign_code() {
    let code = foreign_engine().create_code("client-42", CODE_TTL).unwrap();
    let (status, _, body) = send(
        app(),
        token_request(&format!(
            "grant_type=authorization_code&client_id=client-42&code={code}"
        )),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "invalid_grant");
}

#[tokio::test]
async fn test_token_unsupported_grant_type() {
    let (status, _, body) = send(
        app(),
        token_request("grant_type=password&client_id=client-42&code=x"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "unsupported_grant_type");
}

#[tokio::test]
async fn test_token_missing_code_is_invalid_request() {
    let (status, headers, body) = send(
        app(),
        token_request("grant_type=authorization_code&client_id=client-42"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "invalid_request");
}

#[tokio::test]
async fn test_token_without_form_content_type_is_invalid_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/token")
        .body(Body::from("grant_type=authorization_code"))
        .unwrap();
    let (status, _, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "invalid_request");
}

#[tokio::test]
async fn test_discovery_algorithm_matches_token_header() {
    use std::str::FromStr;

    let (_, _, body) = send(app(), get("/.well-known/openid-configuration")).await;
    let doc: DiscoveryDocument = serde_json::from_slice(&body).unwrap();

    let token = engine().create_access_token("client-42", 60).unwrap();
    let header = jsonwebtoken::decode_header(&token).unwrap();
    let advertised =
        jsonwebtoken::Algorithm::from_str(&doc.id_token_signing_alg_values_supported[0]).unwrap();
    assert_eq!(advertised, header.alg);
}
