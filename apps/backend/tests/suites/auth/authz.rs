// Integration tests for the Authz middleware on /api/protected.
//
// Every rejection must stop the request before the handler and answer with
// Problem Details; a valid token must reach the handler with the identity.

use actix_web::{test, web, App, HttpResponse};
use auth_backend::auth::claims::VerifiedIdentity;
use auth_backend::error::AppError;
use auth_backend::middleware::{Authz, RequestTrace, SchemePolicy};
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::auth::{
    mint_expired_token, mint_test_token, mint_token_with_issuer, mint_token_with_secret,
    test_tokens, unsigned_token, FOREIGN_SAMPLE_TOKEN,
};

const EMAIL: &str = "jwt@email.com";

async fn whoami(identity: VerifiedIdentity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "email": identity.email() })))
}

macro_rules! protected_app {
    ($policy:expr) => {
        test::init_service(
            App::new().wrap(RequestTrace).service(
                web::scope("/api/protected")
                    .wrap(Authz::new(std::sync::Arc::new(test_tokens())).with_scheme_policy($policy))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await
    };
}

fn request(authorization: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::get().uri("/api/protected/whoami");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    req.to_request()
}

// ============================================================================
// Happy Path
// ============================================================================

#[actix_web::test]
async fn valid_token_reaches_handler_with_identity() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = mint_test_token(EMAIL);

    let resp = test::call_service(&app, request(Some(&format!("Bearer {token}")))).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], EMAIL);
}

#[actix_web::test]
async fn scheme_is_case_insensitive() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = mint_test_token(EMAIL);

    let resp = test::call_service(&app, request(Some(&format!("bEaReR   {token}")))).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn any_scheme_policy_accepts_other_words() {
    let app = protected_app!(SchemePolicy::Any);
    let token = mint_test_token(EMAIL);

    let resp = test::call_service(&app, request(Some(&format!("Token {token}")))).await;
    assert_eq!(resp.status().as_u16(), 200);
}

// ============================================================================
// Header Rejections
// ============================================================================

#[actix_web::test]
async fn missing_header_is_forbidden() {
    let app = protected_app!(SchemePolicy::Bearer);

    let resp = test::call_service(&app, request(None)).await;
    assert_problem_details_structure(
        resp,
        403,
        "MISSING_AUTHORIZATION",
        "no authorization header provided",
    )
    .await;
}

#[actix_web::test]
async fn blank_header_is_forbidden() {
    let app = protected_app!(SchemePolicy::Bearer);

    let resp = test::call_service(&app, request(Some("   "))).await;
    assert_problem_details_structure(resp, 403, "MISSING_AUTHORIZATION", "no authorization").await;
}

#[actix_web::test]
async fn header_without_space_is_bad_request() {
    let app = protected_app!(SchemePolicy::Bearer);

    let resp = test::call_service(&app, request(Some("garbage-no-space"))).await;
    assert_problem_details_structure(
        resp,
        400,
        "INVALID_AUTHORIZATION_HEADER",
        "invalid authorization header format",
    )
    .await;
}

#[actix_web::test]
async fn header_with_extra_parts_is_bad_request() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = mint_test_token(EMAIL);

    let resp = test::call_service(&app, request(Some(&format!("Bearer {token} extra")))).await;
    assert_problem_details_structure(resp, 400, "INVALID_AUTHORIZATION_HEADER", "invalid").await;
}

#[actix_web::test]
async fn non_bearer_scheme_is_bad_request_by_default() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = mint_test_token(EMAIL);

    let resp = test::call_service(&app, request(Some(&format!("Basic {token}")))).await;
    assert_problem_details_structure(resp, 400, "INVALID_AUTHORIZATION_HEADER", "invalid").await;
}

// ============================================================================
// Token Rejections
// ============================================================================

#[actix_web::test]
async fn token_signed_with_wrong_secret_is_unauthorized() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = mint_token_with_secret(EMAIL, "some-other-secret");

    let resp = test::call_service(&app, request(Some(&format!("Bearer {token}")))).await;
    assert_problem_details_structure(resp, 401, "INVALID_TOKEN_SIGNATURE", "signature").await;
}

#[actix_web::test]
async fn foreign_sample_token_is_unauthorized() {
    let app = protected_app!(SchemePolicy::Bearer);

    let resp = test::call_service(
        &app,
        request(Some(&format!("Bearer {FOREIGN_SAMPLE_TOKEN}"))),
    )
    .await;
    assert_problem_details_structure(resp, 401, "INVALID_TOKEN_SIGNATURE", "signature").await;
}

#[actix_web::test]
async fn expired_token_is_unauthorized() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = mint_expired_token(EMAIL);

    let resp = test::call_service(&app, request(Some(&format!("Bearer {token}")))).await;
    assert_problem_details_structure(resp, 401, "TOKEN_EXPIRED", "expired").await;
}

#[actix_web::test]
async fn foreign_issuer_is_unauthorized() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = mint_token_with_issuer(EMAIL, "SomeoneElse");

    let resp = test::call_service(&app, request(Some(&format!("Bearer {token}")))).await;
    assert_problem_details_structure(resp, 401, "INVALID_TOKEN_ISSUER", "issuer").await;
}

#[actix_web::test]
async fn alg_none_token_is_unauthorized() {
    let app = protected_app!(SchemePolicy::Bearer);
    let token = unsigned_token(EMAIL);

    let resp = test::call_service(&app, request(Some(&format!("Bearer {token}")))).await;
    assert_problem_details_structure(resp, 401, "UNSUPPORTED_TOKEN_ALGORITHM", "algorithm")
        .await;
}

#[actix_web::test]
async fn garbage_token_is_unauthorized() {
    let app = protected_app!(SchemePolicy::Bearer);

    let resp = test::call_service(&app, request(Some("Bearer not.a.jwt"))).await;
    assert_problem_details_structure(resp, 401, "INVALID_TOKEN", "malformed").await;
}
