//! Integration tests driving a real server over WebSocket and HTTP.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use ignition_server::{
    infrastructure::{
        connection_registry::ConnectionRegistry, message_pusher::WebSocketMessagePusher,
        repository::InMemoryLaunchStateRepository,
    },
    ui::{Server, ServerConfig},
    usecase::{
        ApplyEventUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetLaunchStateUseCase,
        new_dispatch_lock,
    },
};
use ignition_shared::time::SystemClock;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(3);
const SILENCE: Duration = Duration::from_millis(200);

/// Start a server on an ephemeral port and return its address
async fn start_server() -> SocketAddr {
    let repository = Arc::new(InMemoryLaunchStateRepository::default());
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(
        ConnectionRegistry::new(),
    )));
    let dispatch_lock = new_dispatch_lock();

    let server = Server::new(
        Arc::new(ConnectClientUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            dispatch_lock.clone(),
        )),
        Arc::new(DisconnectClientUseCase::new(message_pusher.clone())),
        Arc::new(ApplyEventUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            Arc::new(SystemClock),
            dispatch_lock,
        )),
        Arc::new(GetLaunchStateUseCase::new(repository, message_pusher)),
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            status_interval: Duration::ZERO,
            send_timeout: Duration::from_secs(1),
        },
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(server.serve(listener, std::future::pending()));
    addr
}

/// Connect a client and consume the initial snapshot
async fn connect(addr: SocketAddr) -> (Client, Value) {
    let (mut client, _response) = connect_async(format!("ws://{}/", addr))
        .await
        .expect("Failed to connect");
    let snapshot = recv_json(&mut client).await;
    (client, snapshot)
}

async fn recv_json(client: &mut Client) -> Value {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Connection closed")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("Snapshot should be JSON");
        }
    }
}

async fn assert_silent(client: &mut Client) {
    if let Ok(Some(Ok(Message::Text(text)))) = tokio::time::timeout(SILENCE, client.next()).await
    {
        panic!("Expected no message, got {}", text.as_str());
    }
}

async fn send(client: &mut Client, payload: &str) {
    client
        .send(Message::text(payload.to_string()))
        .await
        .expect("Failed to send");
}

fn click(user_id: &str) -> String {
    serde_json::json!({"type": "launch_click", "userId": user_id}).to_string()
}

#[tokio::test]
async fn test_new_client_receives_single_initial_snapshot() {
    // テスト項目: 接続直後に現在の状態が一度だけ届く
    // given (前提条件):
    let addr = start_server().await;

    // when (操作):
    let (mut client, snapshot) = connect(addr).await;

    // then (期待する結果):
    assert_eq!(
        snapshot,
        serde_json::json!({
            "clickCount": 0,
            "isLaunched": false,
            "participants": [],
            "launchTime": null,
            "revealComplete": false
        })
    );
    assert_silent(&mut client).await;
}

#[tokio::test]
async fn test_click_is_broadcast_to_every_client_including_sender() {
    // テスト項目: クリックは送信者を含む全クライアントにブロードキャストされる
    // given (前提条件):
    let addr = start_server().await;
    let (mut alice, _) = connect(addr).await;
    let (mut bob, _) = connect(addr).await;

    // when (操作):
    send(&mut alice, &click("alice-token")).await;

    // then (期待する結果):
    for client in [&mut alice, &mut bob] {
        let snapshot = recv_json(client).await;
        assert_eq!(snapshot["clickCount"], 1);
        assert_eq!(snapshot["participants"], serde_json::json!(["alice-token"]));
    }
}

#[tokio::test]
async fn test_duplicate_click_is_not_broadcast() {
    // テスト項目: 同じトークンの再クリックはブロードキャストされない
    // given (前提条件):
    let addr = start_server().await;
    let (mut alice, _) = connect(addr).await;
    send(&mut alice, &click("alice-token")).await;
    recv_json(&mut alice).await;

    // when (操作):
    send(&mut alice, &click("alice-token")).await;

    // then (期待する結果):
    assert_silent(&mut alice).await;
}

#[tokio::test]
async fn test_malformed_payload_is_ignored_and_connection_stays_open() {
    // テスト項目: 不正な JSON は無視され、接続は維持される
    // given (前提条件):
    let addr = start_server().await;
    let (mut client, _) = connect(addr).await;

    // when (操作):
    send(&mut client, "{not json").await;
    send(&mut client, r#"{"type":"launch_click"}"#).await;
    send(&mut client, r#"{"type":"self_destruct"}"#).await;

    // then (期待する結果):
    assert_silent(&mut client).await;
    send(&mut client, r#"{"type":"reveal_now"}"#).await;
    let snapshot = recv_json(&mut client).await;
    assert_eq!(snapshot["revealComplete"], true);
    assert_eq!(snapshot["clickCount"], 0);
}

#[tokio::test]
async fn test_binary_frame_carrying_event_is_applied() {
    // テスト項目: JSON を含むバイナリフレームもテキストと同様に処理される
    // given (前提条件):
    let addr = start_server().await;
    let (mut client, _) = connect(addr).await;

    // when (操作):
    client
        .send(Message::binary(
            br#"{"type":"launch_click","userId":"bin-user"}"#.to_vec(),
        ))
        .await
        .expect("Failed to send");

    // then (期待する結果):
    let snapshot = recv_json(&mut client).await;
    assert_eq!(snapshot["clickCount"], 1);
    assert_eq!(snapshot["participants"], serde_json::json!(["bin-user"]));
}

#[tokio::test]
async fn test_non_utf8_binary_frame_is_ignored() {
    // テスト項目: UTF-8 でないバイナリフレームは無視され、接続は維持される
    // given (前提条件):
    let addr = start_server().await;
    let (mut client, _) = connect(addr).await;

    // when (操作):
    client
        .send(Message::binary(vec![0xff, 0xfe, 0xfd]))
        .await
        .expect("Failed to send");

    // then (期待する結果):
    assert_silent(&mut client).await;
    send(&mut client, &click("alice-token")).await;
    assert_eq!(recv_json(&mut client).await["clickCount"], 1);
}

#[tokio::test]
async fn test_empty_user_id_is_counted_once() {
    // テスト項目: 空の userId も参加者として一度だけカウントされる
    // given (前提条件):
    let addr = start_server().await;
    let (mut client, _) = connect(addr).await;

    // when (操作):
    send(&mut client, &click("")).await;
    let snapshot = recv_json(&mut client).await;
    send(&mut client, &click("")).await;

    // then (期待する結果):
    assert_eq!(snapshot["clickCount"], 1);
    assert_eq!(snapshot["participants"], serde_json::json!([""]));
    assert_silent(&mut client).await;
}

#[tokio::test]
async fn test_reveal_after_launch_keeps_launch_time() {
    // テスト項目: launch 後の reveal もブロードキャストされ、launchTime は変わらない
    // given (前提条件):
    let addr = start_server().await;
    let (mut client, _) = connect(addr).await;
    let mut launched = Value::Null;
    for i in 0..20 {
        send(&mut client, &click(&format!("user-{i}"))).await;
        launched = recv_json(&mut client).await;
    }

    // when (操作):
    send(&mut client, r#"{"type":"reveal_now"}"#).await;

    // then (期待する結果):
    let snapshot = recv_json(&mut client).await;
    assert_eq!(snapshot["isLaunched"], true);
    assert_eq!(snapshot["revealComplete"], true);
    assert!(snapshot["launchTime"].is_string());
    assert_eq!(snapshot["launchTime"], launched["launchTime"]);
}

#[tokio::test]
async fn test_twenty_concurrent_clicks_launch_for_everyone() {
    // テスト項目: 20 人が同時にクリックすると全員に launch 済みの状態が届く
    // given (前提条件):
    let addr = start_server().await;
    let mut clients = Vec::new();
    for _ in 0..20 {
        clients.push(connect(addr).await.0);
    }

    // when (操作):
    let mut handles = Vec::new();
    for (i, mut client) in clients.into_iter().enumerate() {
        handles.push(tokio::spawn(async move {
            send(&mut client, &click(&format!("user-{i}"))).await;
            loop {
                let snapshot = recv_json(&mut client).await;
                if snapshot["isLaunched"] == true {
                    return snapshot;
                }
            }
        }));
    }

    // then (期待する結果):
    for handle in handles {
        let snapshot = handle.await.expect("client task panicked");
        assert_eq!(snapshot["clickCount"], 20);
        assert_eq!(snapshot["participants"].as_array().map(Vec::len), Some(20));
        assert!(snapshot["launchTime"].is_string());
    }
}

#[tokio::test]
async fn test_late_client_sees_launched_state_and_clicks_are_ignored() {
    // テスト項目: launch 後に接続したクライアントは launch 済みの状態を受け取り、クリックは無視される
    // given (前提条件):
    let addr = start_server().await;
    let (mut clicker, _) = connect(addr).await;
    for i in 0..20 {
        send(&mut clicker, &click(&format!("user-{i}"))).await;
        recv_json(&mut clicker).await;
    }
    drop(clicker);

    // when (操作):
    let (mut late, snapshot) = connect(addr).await;
    send(&mut late, &click("latecomer")).await;

    // then (期待する結果):
    assert_eq!(snapshot["isLaunched"], true);
    assert_eq!(snapshot["clickCount"], 20);
    assert_silent(&mut late).await;
}

#[tokio::test]
async fn test_reset_broadcasts_defaults() {
    // テスト項目: reset は初期状態をブロードキャストする
    // given (前提条件):
    let addr = start_server().await;
    let (mut client, _) = connect(addr).await;
    send(&mut client, &click("alice-token")).await;
    recv_json(&mut client).await;
    send(&mut client, r#"{"type":"reveal_now"}"#).await;
    recv_json(&mut client).await;

    // when (操作):
    send(&mut client, r#"{"type":"reset"}"#).await;

    // then (期待する結果):
    let snapshot = recv_json(&mut client).await;
    assert_eq!(snapshot["clickCount"], 0);
    assert_eq!(snapshot["isLaunched"], false);
    assert_eq!(snapshot["participants"], serde_json::json!([]));
    assert_eq!(snapshot["launchTime"], Value::Null);
    assert_eq!(snapshot["revealComplete"], false);
}

#[tokio::test]
async fn test_participants_survive_disconnect() {
    // テスト項目: 切断しても参加者トークンは状態に残る
    // given (前提条件):
    let addr = start_server().await;
    let (mut alice, _) = connect(addr).await;
    send(&mut alice, &click("alice-token")).await;
    recv_json(&mut alice).await;

    // when (操作):
    alice.close(None).await.expect("Failed to close");
    let (_bob, snapshot) = connect(addr).await;

    // then (期待する結果):
    assert_eq!(snapshot["participants"], serde_json::json!(["alice-token"]));
}

#[tokio::test]
async fn test_http_endpoints() {
    // テスト項目: health / status / debug エンドポイントが応答する
    // given (前提条件):
    let addr = start_server().await;
    let (mut client, _) = connect(addr).await;
    send(&mut client, &click("alice-token")).await;
    recv_json(&mut client).await;

    // when (操作):
    let health: Value = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let status: Value = reqwest::get(format!("http://{}/api/status", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let state: Value = reqwest::get(format!("http://{}/debug/state", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(health, serde_json::json!({"status": "ok"}));
    assert_eq!(status["connectedClients"], 1);
    assert_eq!(status["clickCount"], 1);
    assert_eq!(status["launchThreshold"], 20);
    assert_eq!(state["participants"], serde_json::json!(["alice-token"]));
}
