use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header},
};
use axum_test::{TestResponse, TestServer};
use dashboard_core::errors::DashboardError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, bearer_token, session_cookie};
use dashboard_api::handlers::availability::{MAX_BODY_BYTES, update_availability};

const PATH: &str = "/api/dashboard/update_availability";

async fn put_with_session(server: &TestServer, body: Value) -> TestResponse {
    let (name, value) = session_cookie();
    server.put(PATH).add_header(name, value).json(&body).await
}

fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    response.assert_status(status);
    assert_eq!(response.json::<Value>(), json!({ "error": message }));
}

#[tokio::test]
async fn test_update_availability_success() {
    let mut ctx = TestContext::with_session("u1");
    let availability = json!({ "monday": ["09:00-12:00"], "friday": [] });
    let expected = availability.clone();
    ctx.availability_service
        .expect_update_availability()
        .withf(move |user_id, availability| {
            user_id.to_string() == "u1" && availability == &expected
        })
        .times(1)
        .returning(|_, _| Ok(json!({ "ok": true })));
    let server = ctx.build_server();

    let response = put_with_session(
        &server,
        json!({ "user_id": "u1", "availability": availability }),
    )
    .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
}

#[tokio::test]
async fn test_update_availability_with_bearer_token() {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service
        .expect_update_availability()
        .times(1)
        .returning(|_, _| Ok(json!({ "ok": true })));
    let server = ctx.build_server();
    let (name, value) = bearer_token();

    let response = server
        .put(PATH)
        .add_header(name, value)
        .json(&json!({ "user_id": "u1", "availability": {} }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_update_availability_passes_dashboard_through() {
    let mut ctx = TestContext::with_session("u1");
    let dashboard = json!({
        "user_id": "u1",
        "availability": { "tuesday": ["10:00-11:00"] },
        "meetings": [{ "id": 7, "title": "standup" }]
    });
    let returned = dashboard.clone();
    ctx.availability_service
        .expect_update_availability()
        .times(1)
        .returning(move |_, _| Ok(returned.clone()));
    let server = ctx.build_server();

    let response = put_with_session(
        &server,
        json!({ "user_id": "u1", "availability": { "tuesday": ["10:00-11:00"] } }),
    )
    .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), dashboard);
}

#[test_log::test(tokio::test)]
async fn test_update_availability_service_failure() {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service
        .expect_update_availability()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("deadlock detected on dashboards")));
    let server = ctx.build_server();

    let response =
        put_with_session(&server, json!({ "user_id": "u1", "availability": {} })).await;

    assert_error(
        &response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Unable to update availability for user with user_id: u1",
    );
    assert!(!response.text().contains("deadlock"));
}

#[tokio::test]
async fn test_missing_session_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.session_store.expect_find_session().never();
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();

    let response = server
        .put(PATH)
        .json(&json!({ "user_id": "u1", "availability": {} }))
        .await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Authorization Required");
}

#[tokio::test]
async fn test_unknown_session_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.session_store
        .expect_find_session()
        .times(1)
        .returning(|_| Ok(None));
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();

    let response =
        put_with_session(&server, json!({ "user_id": "u1", "availability": {} })).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Authorization Required");
}

#[rstest]
#[case::get(Method::GET)]
#[case::post(Method::POST)]
#[case::delete(Method::DELETE)]
#[case::patch(Method::PATCH)]
#[tokio::test]
async fn test_session_check_precedes_method_check(#[case] method: Method) {
    let server = TestContext::new().build_server();

    let response = request(&server, method).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Authorization Required");
}

#[rstest]
#[case::get(Method::GET)]
#[case::post(Method::POST)]
#[case::delete(Method::DELETE)]
#[case::patch(Method::PATCH)]
#[tokio::test]
async fn test_non_put_methods_are_rejected(#[case] method: Method) {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();
    let (name, value) = session_cookie();

    let response = request(&server, method).add_header(name, value).await;

    assert_error(&response, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    assert_eq!(response.header(header::ALLOW), "PUT");
}

// Builds a request carrying a valid body for any method under test
fn request(server: &TestServer, method: Method) -> axum_test::TestRequest {
    let request = match method {
        Method::GET => server.get(PATH),
        Method::POST => server.post(PATH),
        Method::DELETE => server.delete(PATH),
        Method::PATCH => server.patch(PATH),
        _ => server.put(PATH),
    };
    request.json(&json!({ "user_id": "u1", "availability": {} }))
}

#[tokio::test]
async fn test_malformed_body_without_session_is_unauthorized() {
    let server = TestContext::new().build_server();

    let response = server.put(PATH).text("{not json").await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Authorization Required");
}

fn oversized_body() -> String {
    let padding = "x".repeat(MAX_BODY_BYTES);
    json!({ "user_id": "u1", "availability": { "notes": padding } }).to_string()
}

#[tokio::test]
async fn test_oversized_body_without_session_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.session_store.expect_find_session().never();
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();

    let response = server.put(PATH).text(oversized_body()).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Authorization Required");
}

#[tokio::test]
async fn test_oversized_body_is_rejected_after_session_check() {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();
    let (name, value) = session_cookie();

    let response = server
        .put(PATH)
        .add_header(name, value)
        .text(oversized_body())
        .await;

    assert_error(&response, StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
}

#[rstest]
#[case::missing_user_id(json!({ "availability": {} }))]
#[case::missing_availability(json!({ "user_id": "u1" }))]
#[case::null_availability(json!({ "user_id": "u1", "availability": null }))]
#[case::empty_user_id(json!({ "user_id": "", "availability": {} }))]
#[case::numeric_user_id(json!({ "user_id": 1, "availability": {} }))]
#[case::empty_object(json!({}))]
#[tokio::test]
async fn test_invalid_body_is_bad_request(#[case] body: Value) {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();

    let response = put_with_session(&server, body).await;

    assert_error(
        &response,
        StatusCode::BAD_REQUEST,
        "Server did not understand the request due to invalid syntax",
    );
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();
    let (name, value) = session_cookie();

    let response = server
        .put(PATH)
        .add_header(name, value)
        .text("user_id=u1&availability=all")
        .await;

    assert_error(
        &response,
        StatusCode::BAD_REQUEST,
        "Server did not understand the request due to invalid syntax",
    );
}

#[tokio::test]
async fn test_empty_availability_object_is_accepted() {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service
        .expect_update_availability()
        .withf(|_, availability| availability == &json!({}))
        .times(1)
        .returning(|_, _| Ok(json!({ "ok": true })));
    let server = ctx.build_server();

    let response =
        put_with_session(&server, json!({ "user_id": "u1", "availability": {} })).await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_session_id_mismatch() {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service.expect_update_availability().never();
    let server = ctx.build_server();

    let response =
        put_with_session(&server, json!({ "user_id": "u2", "availability": {} })).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Session id mismatch");
}

#[tokio::test]
async fn test_handler_rejects_mismatch_before_delegating() {
    let mut ctx = TestContext::with_session("u1");
    ctx.availability_service.expect_update_availability().never();
    let state = ctx.build_state();
    let (name, value) = session_cookie();
    let mut headers = HeaderMap::new();
    headers.insert(name, value);
    let body = Body::from(json!({ "user_id": "U1", "availability": [] }).to_string());

    let result = update_availability(State(state), Method::PUT, headers, body).await;

    match result.unwrap_err().0 {
        DashboardError::SessionMismatch => {} // Expected
        e => panic!("Expected SessionMismatch error, got: {:?}", e),
    }
}
