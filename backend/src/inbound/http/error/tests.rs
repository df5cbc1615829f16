//! Tests for HTTP error mapping.

use super::*;
use crate::inbound::http::validation::FieldViolation;
use crate::inbound::http::validation::Location;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(error: &ApiError) -> Value {
    let response = error.error_response();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ApiError::from(error).status_code(), status);
}

#[rstest]
#[actix_web::test]
async fn domain_errors_render_envelopes() {
    let body = body_of(&ApiError::from(Error::not_found("用户不存在 (user not found)"))).await;
    assert_eq!(
        body,
        json!({"code": 404, "data": null, "message": "用户不存在 (user not found)"})
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let body = body_of(&ApiError::from(Error::internal("database password leaked"))).await;
    assert_eq!(body["code"], 500);
    assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn validation_failures_bypass_the_envelope() {
    let failure = ValidationFailure::single(FieldViolation::new(
        Location::Body,
        Some("name"),
        "missing",
        "Field required",
    ));
    let error = ApiError::from(failure);
    assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_of(&error).await;
    assert_eq!(
        body,
        json!({"detail": [{"loc": ["body", "name"], "msg": "Field required", "type": "missing"}]})
    );
}

#[rstest]
#[actix_web::test]
async fn trace_id_in_scope_is_attached() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let response = TraceId::scope(trace_id, async {
        ApiError::from(Error::invalid_request("bad")).error_response()
    })
    .await;
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, TRACE_ID);
}

#[rstest]
fn actix_errors_become_internal_errors() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream detail");
    let error = ApiError::from(actix_error);
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
