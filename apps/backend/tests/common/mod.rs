#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};

// Logging is auto-installed for every test binary that includes `common`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Validate a Problem Details response and return the parsed body.
pub async fn assert_problem_details_structure<B>(
    resp: ServiceResponse<B>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) -> ProblemDetailsLike
where
    B: MessageBody + 'static,
{
    let status = StatusCode::from_u16(expected_status).expect("valid status code");
    assert_problem_details_from_service_response(
        resp,
        expected_code,
        status,
        Some(expected_detail),
    )
    .await
}
