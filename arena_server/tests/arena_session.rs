mod support;

use serde_json::json;
use support::{connect, find_player, next_json, send_json, wait_for};

#[tokio::test]
async fn test_first_frame_assigns_identity() {
    let mut client = connect().await;

    let first = next_json(&mut client).await;
    assert_eq!(first["type"], "assignId");
    let id = first["payload"]["id"].as_str().expect("id is a string");
    assert!(id.starts_with("plr"));

    let state = wait_for(&mut client, "gameState", |p| find_player(p, id).is_some()).await;
    let me = find_player(&state["payload"], id).expect("own actor in snapshot");
    // Other tests share the arena, so a stray shot may already have landed.
    assert!(me["lives"].as_i64().expect("lives") <= 15);
    assert_eq!(me["score"], 0);
    assert_eq!(me["nickname"], format!("Player {id}"));
    let x = me["x"].as_f64().expect("x");
    let y = me["y"].as_f64().expect("y");
    assert!((15.0..=785.0).contains(&x));
    assert!((15.0..=585.0).contains(&y));
}

#[tokio::test]
async fn test_nickname_shows_up_in_broadcast() {
    let mut client = connect().await;
    let id = next_json(&mut client).await["payload"]["id"]
        .as_str()
        .expect("id")
        .to_string();
    let nickname = format!("pilot-{}", uuid::Uuid::new_v4());

    send_json(
        &mut client,
        json!({"action": "setNickname", "payload": {"nickname": nickname}}),
    )
    .await;

    wait_for(&mut client, "gameState", |p| {
        find_player(p, &id).is_some_and(|me| me["nickname"] == nickname.as_str())
    })
    .await;
}

#[tokio::test]
async fn test_bad_frames_are_reported_and_connection_survives() {
    let mut client = connect().await;
    let id = next_json(&mut client).await["payload"]["id"]
        .as_str()
        .expect("id")
        .to_string();

    send_json(&mut client, json!({"action": "dance", "payload": {}})).await;
    let err = wait_for(&mut client, "error", |_| true).await;
    assert!(
        err["payload"]["message"]
            .as_str()
            .expect("message")
            .contains("dance")
    );

    // Still connected and still controllable.
    let nickname = format!("survivor-{}", uuid::Uuid::new_v4());
    send_json(
        &mut client,
        json!({"action": "setNickname", "payload": {"nickname": nickname}}),
    )
    .await;
    wait_for(&mut client, "gameState", |p| {
        find_player(p, &id).is_some_and(|me| me["nickname"] == nickname.as_str())
    })
    .await;
}

#[tokio::test]
async fn test_shoot_spawns_projectile_owned_by_shooter() {
    let mut client = connect().await;
    let id = next_json(&mut client).await["payload"]["id"]
        .as_str()
        .expect("id")
        .to_string();

    let state = wait_for(&mut client, "gameState", |p| find_player(p, &id).is_some()).await;
    let x = find_player(&state["payload"], &id).expect("own actor")["x"]
        .as_f64()
        .expect("x");
    // Aim at the far side so the projectile stays in the arena for a few broadcasts.
    let direction_x = if x < 400.0 { 1.0 } else { -1.0 };

    send_json(
        &mut client,
        json!({"action": "shoot", "payload": {"directionX": direction_x, "directionY": 0.0}}),
    )
    .await;

    wait_for(&mut client, "gameState", |p| {
        p["projectiles"]
            .as_array()
            .is_some_and(|list| list.iter().any(|proj| proj["ownerId"] == id.as_str()))
    })
    .await;
}

#[tokio::test]
async fn test_disconnect_removes_actor_for_other_clients() {
    let mut leaving = connect().await;
    let leaving_id = next_json(&mut leaving).await["payload"]["id"]
        .as_str()
        .expect("id")
        .to_string();

    let mut watcher = connect().await;
    let _ = next_json(&mut watcher).await;
    wait_for(&mut watcher, "gameState", |p| {
        find_player(p, &leaving_id).is_some()
    })
    .await;

    leaving.close(None).await.expect("close handshake");
    drop(leaving);

    wait_for(&mut watcher, "gameState", |p| {
        find_player(p, &leaving_id).is_none()
    })
    .await;
}

#[tokio::test]
async fn test_malformed_shoot_is_rejected_without_firing() {
    let mut client = connect().await;
    let id = next_json(&mut client).await["payload"]["id"]
        .as_str()
        .expect("id")
        .to_string();

    send_json(
        &mut client,
        json!({"action": "shoot", "payload": {"angle": "x"}}),
    )
    .await;

    let err = wait_for(&mut client, "error", |_| true).await;
    assert!(
        err["payload"]["message"]
            .as_str()
            .expect("message")
            .contains("shoot")
    );

    // A fired projectile would be visible from the very next tick on.
    for _ in 0..10 {
        let state = wait_for(&mut client, "gameState", |_| true).await;
        let fired = state["payload"]["projectiles"]
            .as_array()
            .expect("projectiles")
            .iter()
            .any(|proj| proj["ownerId"] == id.as_str());
        assert!(!fired, "malformed shoot must not fire");
    }
}
