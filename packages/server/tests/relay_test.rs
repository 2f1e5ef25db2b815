//! Integration tests driving a real relay server over WebSocket.
//!
//! Each test binds its own server to an ephemeral port and talks to it with
//! `tokio-tungstenite` clients. Registry state is observed through `/api/rooms`.

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use relay_server::{
    infrastructure::dto::{http::RoomSummaryDto, websocket::ChatBroadcastMessage},
    ui::Server,
};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Start a relay server on an ephemeral port
async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        Server::in_memory()
            .serve(listener, std::future::pending())
            .await
            .expect("Server failed");
    });

    addr
}

async fn connect(addr: SocketAddr) -> WsClient {
    let (stream, _response) = connect_async(format!("ws://{}/ws", addr))
        .await
        .expect("Failed to connect");
    stream
}

async fn send_text(client: &mut WsClient, text: &str) {
    client
        .send(Message::text(text.to_string()))
        .await
        .expect("Failed to send frame");
}

async fn join(client: &mut WsClient, room: &str, name: &str) {
    let frame = format!(
        r#"{{"type":"join","payload":{{"roomId":"{}","name":"{}"}}}}"#,
        room, name
    );
    send_text(client, &frame).await;
}

async fn chat(client: &mut WsClient, message: &str) {
    let frame = format!(r#"{{"type":"chat","payload":{{"message":"{}"}}}}"#, message);
    send_text(client, &frame).await;
}

/// Wait for the next chat frame, failing after `RECV_TIMEOUT`
async fn expect_chat(client: &mut WsClient) -> ChatBroadcastMessage {
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        let msg = timeout(remaining, client.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Connection ended")
            .expect("WebSocket error");
        match msg {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("Unexpected frame shape");
            }
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected frame: {:?}", other),
        }
    }
}

/// Assert that no data frame arrives within `SILENCE_WINDOW`
async fn expect_silence(client: &mut WsClient) {
    if let Ok(Some(Ok(Message::Text(text)))) = timeout(SILENCE_WINDOW, client.next()).await {
        panic!("Expected no frame, got: {}", text.as_str());
    }
}

async fn rooms(addr: SocketAddr) -> Vec<RoomSummaryDto> {
    reqwest::get(format!("http://{}/api/rooms", addr))
        .await
        .expect("Failed to request rooms")
        .json()
        .await
        .expect("Failed to decode rooms")
}

/// Poll `/api/rooms` until the registry holds `expected` participants
async fn wait_for_participants(addr: SocketAddr, expected: usize) {
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        let count: usize = rooms(addr).await.iter().map(|r| r.participant_count).sum();
        if count == expected {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "Registry holds {} participants, expected {}",
            count,
            expected
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[tokio::test]
async fn test_chat_reaches_room_peer_without_echo() {
    // テスト項目: 同じルームのピアに届き、送信者には届かない
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    let mut bob = connect(addr).await;
    join(&mut ann, "r1", "Ann").await;
    join(&mut bob, "r1", "Bob").await;
    wait_for_participants(addr, 2).await;

    // when (操作):
    chat(&mut ann, "hi").await;

    // then (期待する結果):
    assert_eq!(
        expect_chat(&mut bob).await,
        ChatBroadcastMessage {
            text: "hi".to_string(),
            name: "Ann".to_string(),
        }
    );
    expect_silence(&mut ann).await;
}

#[tokio::test]
async fn test_chat_does_not_cross_rooms() {
    // テスト項目: 別のルームの参加者には届かない
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    let mut bob = connect(addr).await;
    join(&mut ann, "r1", "Ann").await;
    join(&mut bob, "r2", "Bob").await;
    wait_for_participants(addr, 2).await;

    // when (操作):
    chat(&mut ann, "hi").await;

    // then (期待する結果):
    expect_silence(&mut bob).await;
}

#[tokio::test]
async fn test_chat_fans_out_to_every_peer() {
    // テスト項目: 同じルームの送信者以外の全員に届く
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    let mut bob = connect(addr).await;
    let mut cid = connect(addr).await;
    let mut dan = connect(addr).await;
    join(&mut ann, "r1", "Ann").await;
    join(&mut bob, "r1", "Bob").await;
    join(&mut cid, "r1", "Cid").await;
    join(&mut dan, "r2", "Dan").await;
    wait_for_participants(addr, 4).await;

    // when (操作):
    chat(&mut ann, "hello room").await;

    // then (期待する結果):
    for peer in [&mut bob, &mut cid] {
        let received = expect_chat(peer).await;
        assert_eq!(received.text, "hello room");
        assert_eq!(received.name, "Ann");
    }
    expect_silence(&mut ann).await;
    expect_silence(&mut dan).await;
}

#[tokio::test]
async fn test_chat_before_join_is_silent() {
    // テスト項目: join 前の chat は誰にも届かず、接続も切れない
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    let mut bob = connect(addr).await;
    join(&mut bob, "r1", "Bob").await;
    wait_for_participants(addr, 1).await;

    // when (操作):
    chat(&mut ann, "anyone?").await;

    // then (期待する結果):
    expect_silence(&mut bob).await;

    // join 後は通常どおり中継される
    join(&mut ann, "r1", "Ann").await;
    wait_for_participants(addr, 2).await;
    chat(&mut ann, "now joined").await;
    assert_eq!(expect_chat(&mut bob).await.text, "now joined");
}

#[tokio::test]
async fn test_closed_connection_is_removed() {
    // テスト項目: 切断された接続はレジストリから消え、以後の配信対象にならない
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    join(&mut ann, "r1", "Ann").await;
    wait_for_participants(addr, 1).await;

    // when (操作):
    ann.close(None).await.expect("Failed to close");
    wait_for_participants(addr, 0).await;

    // then (期待する結果):
    let mut bob = connect(addr).await;
    let mut cid = connect(addr).await;
    join(&mut bob, "r1", "Bob").await;
    join(&mut cid, "r1", "Cid").await;
    wait_for_participants(addr, 2).await;
    chat(&mut bob, "who is here?").await;
    assert_eq!(expect_chat(&mut cid).await.name, "Bob");

    let rooms = rooms(addr).await;
    assert_eq!(rooms.len(), 1);
    let mut participants = rooms[0].participants.clone();
    participants.sort();
    assert_eq!(participants, vec!["Bob", "Cid"]);
}

#[tokio::test]
async fn test_dropped_connection_is_removed() {
    // テスト項目: close フレームなしで切れた接続もレジストリから消える
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    join(&mut ann, "r1", "Ann").await;
    wait_for_participants(addr, 1).await;

    // when (操作):
    drop(ann);

    // then (期待する結果):
    wait_for_participants(addr, 0).await;
}

#[tokio::test]
async fn test_malformed_frames_keep_connection_usable() {
    // テスト項目: 不正なフレームは破棄され、接続はその後も使える
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    let mut bob = connect(addr).await;
    join(&mut bob, "r1", "Bob").await;

    // when (操作):
    send_text(&mut ann, "not json").await;
    send_text(&mut ann, r#"{"type":"join","payload":{"roomId":"r1"}}"#).await;
    send_text(&mut ann, r#"{"type":"chat","payload":"hi"}"#).await;
    send_text(&mut ann, r#"{"type":"typing","payload":{}}"#).await;
    join(&mut ann, "r1", "Ann").await;
    wait_for_participants(addr, 2).await;
    chat(&mut ann, "still here").await;

    // then (期待する結果):
    assert_eq!(
        expect_chat(&mut bob).await,
        ChatBroadcastMessage {
            text: "still here".to_string(),
            name: "Ann".to_string(),
        }
    );
}

#[tokio::test]
async fn test_binary_frames_are_decoded() {
    // テスト項目: バイナリフレームも JSON としてデコードされる
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    let mut bob = connect(addr).await;
    join(&mut bob, "r1", "Bob").await;

    // when (操作):
    ann.send(Message::binary(
        br#"{"type":"join","payload":{"roomId":"r1","name":"Ann"}}"#.to_vec(),
    ))
    .await
    .expect("Failed to send binary frame");
    wait_for_participants(addr, 2).await;
    ann.send(Message::binary(
        br#"{"type":"chat","payload":{"message":"bytes"}}"#.to_vec(),
    ))
    .await
    .expect("Failed to send binary frame");

    // then (期待する結果):
    assert_eq!(expect_chat(&mut bob).await.text, "bytes");
}

#[tokio::test]
async fn test_second_join_moves_participant() {
    // テスト項目: 2 回目の join でルームと名前が後勝ちで変わる
    // given (前提条件):
    let addr = start_server().await;
    let mut ann = connect(addr).await;
    let mut bob = connect(addr).await;
    let mut cid = connect(addr).await;
    join(&mut ann, "r1", "Ann").await;
    join(&mut bob, "r1", "Bob").await;
    join(&mut cid, "r2", "Cid").await;
    wait_for_participants(addr, 3).await;

    // when (操作):
    join(&mut ann, "r2", "Annie").await;
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    while rooms(addr).await.iter().all(|r| r.id != "r2" || r.participant_count != 2) {
        assert!(tokio::time::Instant::now() < deadline, "Rejoin not applied");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    chat(&mut ann, "moved").await;

    // then (期待する結果):
    let received = expect_chat(&mut cid).await;
    assert_eq!(received.name, "Annie");
    expect_silence(&mut bob).await;
}

#[tokio::test]
async fn test_http_endpoints() {
    // テスト項目: ヘルスチェックと未定義パスのフォールバック
    // given (前提条件):
    let addr = start_server().await;

    // when (操作):
    let health = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .expect("Failed to request health");
    let missing = reqwest::get(format!("http://{}/nowhere", addr))
        .await
        .expect("Failed to request missing path");

    // then (期待する結果):
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = health.json().await.expect("Invalid health body");
    assert_eq!(body, serde_json::json!({"status": "ok"}));
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_root_path_accepts_websocket() {
    // テスト項目: ルートパスでも WebSocket 接続を受け付ける
    // given (前提条件):
    let addr = start_server().await;
    let (mut ann, _) = connect_async(format!("ws://{}/", addr))
        .await
        .expect("Failed to connect on root path");
    let mut bob = connect(addr).await;
    join(&mut ann, "r1", "Ann").await;
    join(&mut bob, "r1", "Bob").await;
    wait_for_participants(addr, 2).await;

    // when (操作):
    chat(&mut bob, "hey").await;

    // then (期待する結果):
    assert_eq!(expect_chat(&mut ann).await.name, "Bob");
}
