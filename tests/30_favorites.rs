mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn favorite_player_add_remove_lifecycle() -> Result<()> {
    if !common::database_available() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let pool = common::pool().await?;

    let username = common::unique("fan");
    let (user_id, token) = common::register_and_login(
        server,
        &username,
        &format!("{}@example.com", &username),
        "hunter2",
    )
    .await?;
    let player_id = common::seed_player(&pool, &common::unique("Player"), None).await?;

    let url = format!("{}/users/{}/favorites/players", server.base_url, user_id);

    // First add succeeds
    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "playerId": player_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["message"], "Player added to favorites");

    // Second add conflicts; add is not idempotent
    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "playerId": player_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Player is already in favorites");

    // The favorite shows up on the profile
    let res = client
        .get(format!("{}/users/{}", server.base_url, user_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let favorites = body["data"]["favorite_players"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["player_id"], player_id.to_string());

    // First remove succeeds
    let res = client
        .delete(&url)
        .bearer_auth(&token)
        .json(&json!({ "playerId": player_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["message"], "Player removed from favorites");

    // Second remove is not found; remove is not idempotent either
    let res = client
        .delete(&url)
        .bearer_auth(&token)
        .json(&json!({ "playerId": player_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Player is not in favorites");

    Ok(())
}

#[tokio::test]
async fn favorite_team_add_remove_lifecycle() -> Result<()> {
    if !common::database_available() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let pool = common::pool().await?;

    let username = common::unique("fan");
    let (user_id, token) = common::register_and_login(
        server,
        &username,
        &format!("{}@example.com", &username),
        "hunter2",
    )
    .await?;
    let team_id = common::seed_team(&pool, &common::unique("Team"), None).await?;

    let url = format!("{}/users/{}/favorites/teams", server.base_url, user_id);

    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "teamId": team_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["message"], "Team added to favorites");

    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "teamId": team_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Team is already in favorites");

    let res = client
        .delete(&url)
        .bearer_auth(&token)
        .json(&json!({ "teamId": team_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(&url)
        .bearer_auth(&token)
        .json(&json!({ "teamId": team_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Team is not in favorites");

    Ok(())
}

#[tokio::test]
async fn favorite_error_precedence() -> Result<()> {
    if !common::database_available() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let username = common::unique("fan");
    let (user_id, token) = common::register_and_login(
        server,
        &username,
        &format!("{}@example.com", &username),
        "hunter2",
    )
    .await?;

    let url = format!("{}/users/{}/favorites/players", server.base_url, user_id);

    // Missing playerId comes before any existence check
    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Player ID is required");

    // Unknown player
    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "playerId": Uuid::new_v4() }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Player does not exist");

    // Another user's list is off limits even with a valid token
    let other = common::unique("fan");
    let (other_id, _) = common::register_and_login(
        server,
        &other,
        &format!("{}@example.com", &other),
        "hunter2",
    )
    .await?;
    let res = client
        .post(format!(
            "{}/users/{}/favorites/players",
            server.base_url, other_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "playerId": Uuid::new_v4() }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Unauthorized access");

    Ok(())
}
