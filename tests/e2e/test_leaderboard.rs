use crate::e2e::helpers;

use helpers::assertions::assert_leaderboard_shape;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serial_test::serial;
use test_context::test_context;
use tts_arena_backend::domain::provider::ProviderIdentity::{ElevenLabs, HumeAi, OpenAi};

async fn leaderboard(ctx: &TestContext, path: &str) -> Value {
    let response = ctx.client.get(path).await.unwrap();
    response.assert_status(StatusCode::OK);
    let body = response.body.clone().unwrap();
    assert_leaderboard_shape(&body);
    body
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_show_placeholder_without_votes(ctx: &TestContext) {
    let body = leaderboard(ctx, "/api/leaderboard").await;

    assert_eq!(body["updated"].as_bool(), Some(true));

    let rows = body["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row["provider"].is_null()));

    let counts: Vec<i64> = body["battle_counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![0, 0, 0]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_rank_providers_by_head_to_head_win_rate(ctx: &TestContext) {
    ctx.fixtures.record_wins(HumeAi, OpenAi, 2).await.unwrap();
    ctx.fixtures.record_wins(OpenAi, HumeAi, 1).await.unwrap();
    // Self-comparisons count as battles nowhere
    ctx.fixtures.record_wins(HumeAi, HumeAi, 5).await.unwrap();

    let body = leaderboard(ctx, "/api/leaderboard?force=true").await;

    let rows = body["leaderboard"].as_array().unwrap();
    let summary: Vec<(Option<&str>, f64, i64, i64)> = rows
        .iter()
        .map(|row| {
            (
                row["provider"].as_str(),
                row["win_rate"].as_f64().unwrap(),
                row["total_wins"].as_i64().unwrap(),
                row["total_comparisons"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some("Hume AI"), 66.67, 2, 3),
            (Some("OpenAI"), 33.33, 1, 3),
            (Some("ElevenLabs"), 0.0, 0, 0),
        ]
    );

    let battle_counts: Vec<(&str, i64)> = body["battle_counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| (row["comparison_type"].as_str().unwrap(), row["count"].as_i64().unwrap()))
        .collect();
    assert_eq!(
        battle_counts,
        vec![
            ("Hume AI - ElevenLabs", 0),
            ("Hume AI - OpenAI", 3),
            ("OpenAI - ElevenLabs", 0),
        ]
    );

    let hume_vs_openai = &body["win_rates"][1];
    assert_eq!(hume_vs_openai["first_provider"].as_str(), Some("Hume AI"));
    assert_eq!(hume_vs_openai["first_win_rate"].as_f64(), Some(66.67));
    assert_eq!(hume_vs_openai["second_win_rate"].as_f64(), Some(33.33));
    assert_eq!(hume_vs_openai["total"].as_i64(), Some(3));
}

#[test_context(TestContext)]
#[tokio::test]
#[serial]
async fn it_should_serve_cached_statistics_between_refreshes(ctx: &TestContext) {
    let first = leaderboard(ctx, "/api/leaderboard").await;
    assert_eq!(first["updated"].as_bool(), Some(true));

    ctx.fixtures.record_wins(ElevenLabs, OpenAi, 1).await.unwrap();

    // Within the refresh interval the cached snapshot is served as-is
    let cached = leaderboard(ctx, "/api/leaderboard").await;
    assert_eq!(cached["updated"].as_bool(), Some(false));
    assert_eq!(cached["battle_counts"], first["battle_counts"]);

    let forced = leaderboard(ctx, "/api/leaderboard?force=true").await;
    assert_eq!(forced["updated"].as_bool(), Some(true));
    assert_eq!(forced["battle_counts"][2]["comparison_type"].as_str(), Some("OpenAI - ElevenLabs"));
    assert_eq!(forced["battle_counts"][2]["count"].as_i64(), Some(1));
    assert_eq!(forced["leaderboard"][0]["provider"].as_str(), Some("ElevenLabs"));
}
