use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_database_and_registered_providers(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["status"].as_str(), Some("ready"));
    assert_eq!(body["database"].as_str(), Some("connected"));

    // ElevenLabs has no repository in the test app
    let providers: Vec<&str> = body["providers"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(providers, vec!["Hume AI", "OpenAI"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let first = response.header("x-request-id").cloned();
    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");

    assert_ne!(first.as_ref(), response.header("x-request-id"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_health_checks(ctx: &TestContext) {
    let mut futures = Vec::new();
    for _ in 0..10 {
        let client = ctx.client.clone();
        futures.push(async move { client.get("/health").await });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::OK);
    }
}
