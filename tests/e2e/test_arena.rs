use crate::e2e::helpers;

use helpers::assertions::{assert_round_response, revealed_providers};
use helpers::{valid_description, TestContext, STUB_GENERATED_TEXT};
use hyper::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;
use test_context::test_context;
use tts_arena_backend::domain::synthesis::dto::GenerateTextResponse;

async fn synthesize(ctx: &TestContext, text: &str, generated_text: Option<&str>) -> Value {
    let response = ctx
        .client
        .post(
            "/api/synthesize",
            &json!({
                "character_description": valid_description(),
                "text": text,
                "generated_text": generated_text,
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.body.clone().unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_text_for_a_character(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/text",
            &json!({ "character_description": valid_description() }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let generated: GenerateTextResponse = response.json().unwrap();
    assert_eq!(generated.text, STUB_GENERATED_TEXT);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_short_character_description(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/text", &json!({ "character_description": "  a pirate   " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Character description must be at least 20 characters long. Current length: 8.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_generated_text_with_two_providers(ctx: &TestContext) {
    let round = synthesize(ctx, STUB_GENERATED_TEXT, Some(STUB_GENERATED_TEXT)).await;

    assert_round_response(&round, STUB_GENERATED_TEXT);
    assert_eq!(round["text_modified"].as_bool(), Some(false));
    assert!(!round.to_string().contains("Hume AI"));
    assert!(!round.to_string().contains("OpenAI"));

    assert_eq!(ctx.hume.calls(), 1);
    assert_eq!(ctx.openai.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_hume_twice_for_custom_text(ctx: &TestContext) {
    let custom_text = format!("{} And the kettle is already on.", STUB_GENERATED_TEXT);
    let round = synthesize(ctx, &custom_text, Some(STUB_GENERATED_TEXT)).await;

    assert_round_response(&round, &custom_text);
    assert_eq!(round["text_modified"].as_bool(), Some(true));

    assert_eq!(ctx.hume.calls(), 2);
    assert_eq!(ctx.openai.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_that_is_too_short(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/synthesize",
            &json!({
                "character_description": valid_description(),
                "text": "Too short.",
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text must be at least 100 characters long.");

    assert_eq!(ctx.hume.calls(), 0);
    assert_eq!(ctx.openai.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/synthesize", "{\"character_description\": ")
        .await
        .unwrap();

    assert!(response.status.is_client_error());
}

async fn vote(ctx: &TestContext, round_id: &Value, selected_option: &str) -> Value {
    let response = ctx
        .client
        .post(
            "/api/votes",
            &json!({ "round_id": round_id, "selected_option": selected_option }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.body.clone().unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
#[serial]
async fn it_should_record_a_vote_once(ctx: &TestContext) {
    let round = synthesize(ctx, STUB_GENERATED_TEXT, Some(STUB_GENERATED_TEXT)).await;

    let body = vote(ctx, &round["round_id"], "option_a").await;
    assert_eq!(body["accepted"].as_bool(), Some(true));
    assert_eq!(body["round"]["round_id"], round["round_id"]);
    assert_eq!(body["round"]["vote_submitted"].as_bool(), Some(true));
    assert_eq!(body["result"]["winning_option"].as_str(), Some("option_a"));

    let (winning_provider, losing_provider) = revealed_providers(&body);
    let mut providers = vec![winning_provider.clone(), losing_provider];
    providers.sort();
    assert_eq!(providers, vec!["Hume AI", "OpenAI"]);

    assert_eq!(ctx.fixtures.wait_for_votes(1).await.unwrap(), 1);
    let (comparison_type, stored_winner, winning_option, is_custom_text) =
        ctx.fixtures.latest_vote().await.unwrap().unwrap();
    assert_eq!(comparison_type, "Hume AI - OpenAI");
    assert_eq!(stored_winner, winning_provider);
    assert_eq!(winning_option, "option_a");
    assert!(!is_custom_text);

    // The server remembers the vote even when the client does not
    let replay = vote(ctx, &round["round_id"], "option_b").await;
    assert_eq!(replay["accepted"].as_bool(), Some(false));
    assert_eq!(replay["round"]["vote_submitted"].as_bool(), Some(true));
    assert!(replay.get("result").is_none());

    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert_eq!(ctx.fixtures.vote_count().await.unwrap(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
#[serial]
async fn it_should_not_record_votes_for_rounds_it_never_synthesized(ctx: &TestContext) {
    for selected_option in ["option_a", "option_b"] {
        let response = ctx
            .client
            .post(
                "/api/votes",
                &json!({ "round_id": uuid::Uuid::new_v4(), "selected_option": selected_option }),
            )
            .await
            .unwrap();

        response
            .assert_status(StatusCode::NOT_FOUND)
            .assert_error_message("This round has expired.");
    }

    // Client-supplied provider assignments are not part of the vote contract
    let forged = ctx
        .client
        .post(
            "/api/votes",
            &json!({
                "round": {
                    "option_a": { "provider": "ElevenLabs", "audio_ref": "/static/audio/a.mp3" },
                    "option_b": { "provider": "OpenAI", "audio_ref": "/static/audio/b.mp3" },
                },
                "selected_option": "option_a",
            }),
        )
        .await
        .unwrap();
    assert!(forged.status.is_client_error());

    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert_eq!(ctx.fixtures.vote_count().await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_flag_custom_text_votes(ctx: &TestContext) {
    let custom_text = format!("{} The tea had better be strong.", STUB_GENERATED_TEXT);
    let round = synthesize(ctx, &custom_text, None).await;

    let body = vote(ctx, &round["round_id"], "option_b").await;
    assert_eq!(
        revealed_providers(&body),
        ("Hume AI".to_string(), "Hume AI".to_string())
    );

    assert_eq!(ctx.fixtures.wait_for_votes(1).await.unwrap(), 1);
    let (comparison_type, winning_provider, winning_option, is_custom_text) =
        ctx.fixtures.latest_vote().await.unwrap().unwrap();
    assert_eq!(comparison_type, "Hume AI - Hume AI");
    assert_eq!(winning_provider, "Hume AI");
    assert_eq!(winning_option, "option_b");
    assert!(is_custom_text);
}
