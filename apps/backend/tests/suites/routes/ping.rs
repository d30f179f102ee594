use actix_web::test;

use crate::support::auth::test_state;
use crate::support::create_test_app;

#[actix_web::test]
async fn test_ping_returns_pong() {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::get().uri("/ping").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));

    let body = test::read_body(resp).await;
    assert_eq!(body, "pong");
}

#[actix_web::test]
async fn test_ping_needs_no_credentials() {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::get()
        .uri("/ping")
        .insert_header(("Authorization", "garbage-no-space"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app(test_state()).await;

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}
