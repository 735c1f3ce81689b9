use serde_json::Value;

/// Options carry audio only; the provider stays hidden until the vote
pub fn assert_option_response(option: &Value) {
    assert!(
        option.get("audio_ref").and_then(|v| v.as_str()).is_some(),
        "Missing audio_ref"
    );
    assert!(option.get("provider").is_none(), "Provider revealed before voting");
    assert!(
        option.get("generation_id").is_none(),
        "Generation id revealed before voting"
    );
}

/// Shape of a freshly synthesized round
pub fn assert_round_response(round: &Value, expected_text: &str) {
    assert!(
        round.get("round_id").and_then(|v| v.as_str()).is_some(),
        "Missing round_id"
    );
    assert_option_response(round.get("option_a").expect("Missing option_a"));
    assert_option_response(round.get("option_b").expect("Missing option_b"));

    assert_eq!(
        round.get("text").and_then(|v| v.as_str()),
        Some(expected_text)
    );
    assert!(round.get("character_description").is_some());
    assert!(round.get("text_modified").and_then(|v| v.as_bool()).is_some());
    assert_eq!(
        round.get("vote_submitted").and_then(|v| v.as_bool()),
        Some(false)
    );
}

/// Winning and losing providers revealed by an accepted vote
pub fn revealed_providers(vote: &Value) -> (String, String) {
    let provider = |field: &str| {
        vote["result"][field]
            .as_str()
            .unwrap_or_else(|| panic!("Missing result.{}", field))
            .to_string()
    };
    (provider("winning_provider"), provider("losing_provider"))
}

pub fn assert_leaderboard_shape(body: &Value) {
    let leaderboard = body["leaderboard"].as_array().expect("Missing leaderboard");
    assert!(!leaderboard.is_empty());
    for (i, row) in leaderboard.iter().enumerate() {
        assert_eq!(row["rank"].as_u64(), Some(i as u64 + 1), "Ranks must be 1-based and dense");
        assert!(row.get("win_rate").is_some());
    }

    assert_eq!(
        body["battle_counts"].as_array().map(Vec::len),
        Some(3),
        "One battle count per head-to-head pair"
    );
    assert_eq!(
        body["win_rates"].as_array().map(Vec::len),
        Some(3),
        "One win rate row per head-to-head pair"
    );
    assert!(body["updated"].as_bool().is_some());
}
