// Integration tests for signup, login and the protected profile.
//
// Covers the full round trip through the production route table as well as
// the validation, lookup and credential failures of each endpoint.

use actix_web::test;
use auth_backend::extractors::validated_json::MAX_BODY_BYTES;
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::auth::{mint_test_token, test_state, test_tokens};
use crate::support::create_test_app;

fn signup_request(name: &str, email: &str, password: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/public/signup")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request()
}

fn login_request(email: &str, password: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/public/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request()
}

fn profile_request(token: &str) -> actix_http::Request {
    test::TestRequest::get()
        .uri("/api/protected/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request()
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[actix_web::test]
async fn test_signup_login_profile_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state()).await;
    let email = unique_email("flow");

    let resp = test::call_service(&app, signup_request("Test User", &email, "secret")).await;
    assert_eq!(resp.status().as_u16(), 200);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["email"], email.as_str());
    assert_eq!(created["name"], "Test User");
    assert!(created["id"].as_i64().is_some());
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let resp = test::call_service(&app, login_request(&email, "secret")).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().ok_or("token missing")?.to_string();

    let claims = test_tokens().verify(&token)?;
    assert_eq!(claims.email, email);
    assert_eq!(claims.issuer, "AuthService");
    assert_eq!(claims.expires_at - claims.issued_at, 24 * 60 * 60);

    let resp = test::call_service(&app, profile_request(&token)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile, created);

    Ok(())
}

#[actix_web::test]
async fn test_login_email_is_case_insensitive() {
    let app = create_test_app(test_state()).await;
    let email = unique_email("case");

    let resp = test::call_service(&app, signup_request("Test User", &email, "secret")).await;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = test::call_service(&app, login_request(&email.to_uppercase(), "secret")).await;
    assert_eq!(resp.status().as_u16(), 200);
}

// ============================================================================
// Signup Errors
// ============================================================================

#[actix_web::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = create_test_app(test_state()).await;
    let email = unique_email("dup");

    let resp = test::call_service(&app, signup_request("First", &email, "secret")).await;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = test::call_service(&app, signup_request("Second", &email, "other")).await;
    assert_problem_details_structure(resp, 409, "UNIQUE_EMAIL", "already exists").await;
}

#[actix_web::test]
async fn test_signup_empty_fields_rejected() {
    let app = create_test_app(test_state()).await;

    for (name, email, password, detail) in [
        ("", "a@example.test", "secret", "Name"),
        ("Test User", "", "secret", "Email"),
        ("Test User", "a@example.test", "", "Password"),
    ] {
        let resp = test::call_service(&app, signup_request(name, email, password)).await;
        assert_problem_details_structure(resp, 400, "VALIDATION_ERROR", detail).await;
    }
}

#[actix_web::test]
async fn test_signup_malformed_json_rejected() {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/api/public/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "x", "email": "a@example.test",}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Invalid JSON at line 1").await;
}

#[actix_web::test]
async fn test_signup_wrong_content_type_rejected() {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/api/public/signup")
        .insert_header(("content-type", "text/plain"))
        .set_payload("name=x")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Content-Type").await;
}

#[actix_web::test]
async fn test_signup_oversized_body_rejected() {
    let app = create_test_app(test_state()).await;

    let padding = "x".repeat(MAX_BODY_BYTES);
    let req = test::TestRequest::post()
        .uri("/api/public/signup")
        .set_json(json!({ "name": padding, "email": unique_email("big"), "password": "secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 413, "PAYLOAD_TOO_LARGE", "exceeds").await;
}

// ============================================================================
// Login Errors
// ============================================================================

#[actix_web::test]
async fn test_login_unknown_email_not_found() {
    let app = create_test_app(test_state()).await;

    let resp = test::call_service(&app, login_request(&unique_email("ghost"), "secret")).await;
    assert_problem_details_structure(resp, 404, "USER_NOT_FOUND", "User not found").await;
}

#[actix_web::test]
async fn test_login_wrong_password_unauthorized() {
    let app = create_test_app(test_state()).await;
    let email = unique_email("pw");

    let resp = test::call_service(&app, signup_request("Test User", &email, "secret")).await;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = test::call_service(&app, login_request(&email, "not-the-secret")).await;
    assert_problem_details_structure(
        resp,
        401,
        "INVALID_CREDENTIALS",
        "Invalid email or password",
    )
    .await;
}

#[actix_web::test]
async fn test_login_wrong_types_rejected() {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/api/public/login")
        .set_json(json!({ "email": 123, "password": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "wrong types").await;
}

// ============================================================================
// Profile Errors
// ============================================================================

#[actix_web::test]
async fn test_profile_for_unknown_user_not_found() {
    let app = create_test_app(test_state()).await;
    let token = mint_test_token(&unique_email("never-signed-up"));

    let resp = test::call_service(&app, profile_request(&token)).await;
    assert_problem_details_structure(resp, 404, "USER_NOT_FOUND", "User not found").await;
}

#[actix_web::test]
async fn test_profile_without_header_forbidden() {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::get()
        .uri("/api/protected/profile")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "MISSING_AUTHORIZATION", "no authorization").await;
}
