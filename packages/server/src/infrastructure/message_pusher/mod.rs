//! メッセージ送信（通知）の実装
//!
//! - `websocket`: 接続ごとの WebSocket 送信チャネルを使った実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
