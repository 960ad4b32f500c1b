//! Tests driving the HTTP transport in-process.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use backgammon_server::{SessionManager, router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    router(SessionManager::new())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request builds"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    };

    let response = app.clone().oneshot(request).await.expect("request served");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is json")
    };
    (status, value)
}

#[tokio::test]
async fn test_status_and_health_report_active_games() {
    let app = app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Backgammon Server Running");
    assert_eq!(body["activeGames"], 0);

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["games"], 0);
}

#[tokio::test]
async fn test_create_join_roll_end_turn_round_trip() {
    let app = app();

    let (status, created) = send(&app, "POST", "/games", Some(json!({"playerId": "p1"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let game_id = created["gameId"].as_str().expect("id present").to_string();
    assert_eq!(created["whitePlayer"], "p1");
    assert_eq!(created["turn"], "white");
    assert_eq!(created["phase"], "awaiting_roll");
    assert_eq!(created["board"].as_array().expect("board array").len(), 24);

    let (status, joined) = send(
        &app,
        "POST",
        &format!("/games/{game_id}/join"),
        Some(json!({"playerId": "p2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(joined["blackPlayer"], "p2");

    // Black cannot open the match.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/games/{game_id}/roll"),
        Some(json!({"playerId": "p2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "not_your_turn");

    let (status, rolled) = send(
        &app,
        "POST",
        &format!("/games/{game_id}/roll"),
        Some(json!({"playerId": "p1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rolled["turn"], "white");
    let dice = rolled["dice"].as_array().expect("dice array");
    assert_eq!(dice.len(), 2);
    for face in dice {
        let face = face.as_u64().expect("face is a number");
        assert!((1..=6).contains(&face));
    }

    let (status, ended) = send(
        &app,
        "POST",
        &format!("/games/{game_id}/end-turn"),
        Some(json!({"playerId": "p1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ended["turn"], "black");

    // The poll endpoint reflects the handover.
    let (status, state) = send(&app, "GET", &format!("/games/{game_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["turn"], "black");
    assert_eq!(state["phase"], "awaiting_roll");
    assert_eq!(state["dice"], Value::Null);
}

#[tokio::test]
async fn test_moving_before_rolling_is_refused() {
    let app = app();

    let (_, created) = send(&app, "POST", "/games", Some(json!({"playerId": "p1"}))).await;
    let game_id = created["gameId"].as_str().expect("id present").to_string();
    send(
        &app,
        "POST",
        &format!("/games/{game_id}/join"),
        Some(json!({"playerId": "p2"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/games/{game_id}/move"),
        Some(json!({"playerId": "p1", "from": 0, "to": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "no_dice_available");
}

#[tokio::test]
async fn test_missing_fields_map_to_missing_parameter() {
    let app = app();

    let (status, body) = send(&app, "POST", "/games", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_parameter");
}

#[tokio::test]
async fn test_unknown_games_are_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/games/XXX-YYY-ZZZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "game_not_found");

    let (status, body) = send(
        &app,
        "POST",
        "/games/XXX-YYY-ZZZ/roll",
        Some(json!({"playerId": "p1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "game_not_found");
}

#[tokio::test]
async fn test_joining_a_full_game_conflicts() {
    let app = app();

    let (_, created) = send(&app, "POST", "/games", Some(json!({"playerId": "p1"}))).await;
    let game_id = created["gameId"].as_str().expect("id present").to_string();
    send(
        &app,
        "POST",
        &format!("/games/{game_id}/join"),
        Some(json!({"playerId": "p2"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/games/{game_id}/join"),
        Some(json!({"playerId": "p3"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "game_full");
}

#[tokio::test]
async fn test_leaving_destroys_the_session() {
    let app = app();

    let (_, created) = send(&app, "POST", "/games", Some(json!({"playerId": "p1"}))).await;
    let game_id = created["gameId"].as_str().expect("id present").to_string();

    // A stranger cannot tear the table down.
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/games/{game_id}"),
        Some(json!({"playerId": "stranger"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/games/{game_id}"),
        Some(json!({"playerId": "p1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/games/{game_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
