use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::models::PadMessage;
use crate::ws::connection::ConnectionHandle;
use crate::AppState;

/// WebSocket upgrade endpoint for a pad
pub async fn pad_ws_handler(
    Path(pad_name): Path<String>,
    ws: WebSocketUpgrade,
    app_state: axum::extract::State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt for pad '{}'", pad_name);
    ws.on_upgrade(move |socket| handle_socket(socket, pad_name, app_state.0))
}

/// Drive one client connection: a writer task drains the outbox into the
/// socket while the read loop feeds inbound frames to the hub.
async fn handle_socket(socket: WebSocket, pad_name: String, app_state: Arc<AppState>) {
    let conn_id = Uuid::new_v4();
    info!(
        "WebSocket connection established for pad '{}' with connection_id: {}",
        pad_name, conn_id
    );

    let (mut sink, mut stream) = socket.split();

    // Every frame for this client goes through the outbox, so queueing a
    // broadcast never waits on the socket
    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<Message>();

    let mut write_task = tokio::spawn(async move {
        while let Some(frame) = outbox_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let handle = ConnectionHandle::new(conn_id, outbox_tx.clone());
    let content = app_state.sessions.on_connect(&pad_name, handle).await;

    // First frame after registration is always INIT with the current content
    let init = PadMessage::init(content);
    let _ = outbox_tx.send(Message::Text(serde_json::to_string(&init).unwrap()));

    let hub = app_state.sessions.clone();
    let read_pad = pad_name.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = stream.next().await {
            match frame {
                Message::Text(raw) => hub.on_message(&read_pad, conn_id, &raw).await,
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Whichever side finishes first takes the other down with it
    tokio::select! {
        _ = (&mut write_task) => read_task.abort(),
        _ = (&mut read_task) => write_task.abort(),
    };

    app_state.sessions.on_disconnect(&pad_name, conn_id).await;
    info!(
        "WebSocket connection closed for pad '{}' ({})",
        pad_name, conn_id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{ErrorResponse, PadHistoryResponse, PadInfoResponse, StatsResponse};
    use crate::store::PadStore;
    use crate::ws::hub::SessionHub;
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    type WsClient = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    async fn spawn_app() -> SocketAddr {
        let config = Config::default();
        let store = Arc::new(PadStore::new());
        let sessions = Arc::new(SessionHub::new(store.clone(), config.snapshot_interval()));
        let state = Arc::new(AppState { store, sessions });
        let app = crate::app(state, &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn connect(addr: SocketAddr, pad: &str) -> WsClient {
        let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws/{}", addr, pad))
            .await
            .unwrap();
        ws
    }

    async fn recv_text(ws: &mut WsClient) -> String {
        loop {
            let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
                .await
                .expect("timed out waiting for a frame")
                .expect("socket closed")
                .unwrap();
            if let WsMessage::Text(raw) = frame {
                return raw.as_str().to_string();
            }
        }
    }

    async fn recv_json(ws: &mut WsClient) -> Value {
        serde_json::from_str(&recv_text(ws).await).unwrap()
    }

    async fn wait_for_content(addr: SocketAddr, pad: &str, expected: &str) {
        for _ in 0..50 {
            let info: PadInfoResponse = reqwest::get(format!("http://{}/pad/{}", addr, pad))
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            if info.content == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("pad '{}' never reached expected content", pad);
    }

    async fn wait_for_sessions(addr: SocketAddr, expected: usize) {
        for _ in 0..50 {
            let stats: StatsResponse = reqwest::get(format!("http://{}/api/stats", addr))
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            if stats.active_sessions == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("never reached {} active sessions", expected);
    }

    #[tokio::test]
    async fn init_comes_first_and_updates_reach_other_clients_only() {
        let addr = spawn_app().await;

        let mut alice = connect(addr, "alpha").await;
        let init = recv_json(&mut alice).await;
        assert_eq!(init["type"], "INIT");
        assert_eq!(init["content"], "");

        let mut bob = connect(addr, "alpha").await;
        let init = recv_json(&mut bob).await;
        assert_eq!(init["type"], "INIT");

        // extra client fields must survive the relay byte-for-byte
        let raw = r#"{"type":"CONTENT_UPDATE","content":"hello","timestamp":1,"origin":"bob-client"}"#;
        bob.send(WsMessage::text(raw)).await.unwrap();

        assert_eq!(recv_text(&mut alice).await, raw);

        // the sender gets no echo
        assert!(
            tokio::time::timeout(Duration::from_millis(200), bob.next())
                .await
                .is_err()
        );

        let info: PadInfoResponse = reqwest::get(format!("http://{}/pad/alpha", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(info.name, "alpha");
        assert_eq!(info.content, "hello");
    }

    #[tokio::test]
    async fn content_survives_session_teardown() {
        let addr = spawn_app().await;

        let mut alice = connect(addr, "beta").await;
        recv_json(&mut alice).await;
        alice
            .send(WsMessage::text(
                r#"{"type":"CONTENT_UPDATE","content":"hello","timestamp":1}"#,
            ))
            .await
            .unwrap();
        wait_for_content(addr, "beta", "hello").await;

        let mut bob = connect(addr, "beta").await;
        let init = recv_json(&mut bob).await;
        assert_eq!(init["content"], "hello");

        alice.close(None).await.unwrap();
        bob.close(None).await.unwrap();
        wait_for_sessions(addr, 0).await;

        // teardown appended a final snapshot
        let history: PadHistoryResponse =
            reqwest::get(format!("http://{}/api/pads/beta/history", addr))
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
        assert!(history.count >= 1);
        assert_eq!(history.snapshots.last().unwrap().content, "hello");

        // a late client gets a fresh session over the same content
        let mut carol = connect(addr, "beta").await;
        let init = recv_json(&mut carol).await;
        assert_eq!(init["content"], "hello");

        let stats: StatsResponse = reqwest::get(format!("http://{}/api/stats", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(stats.active_sessions, 1);
        assert!(stats.total_pads >= 1);
    }

    #[tokio::test]
    async fn rest_surface_reports_service_state() {
        let addr = spawn_app().await;

        let resp = reqwest::get(format!("http://{}/api/health", addr)).await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);

        let resp = reqwest::get(format!("http://{}/api/ready", addr)).await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);

        let resp = reqwest::get(format!("http://{}/api/diagnostics", addr))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);

        let resp = reqwest::get(format!("http://{}/api/pads/ghost/history", addr))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 404);
        let body: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(body.code, 404);

        // the read endpoint creates the pad it reads
        let info: PadInfoResponse = reqwest::get(format!("http://{}/pad/brand-new", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(info.name, "brand-new");
        assert_eq!(info.content, "");

        let stats: StatsResponse = reqwest::get(format!("http://{}/api/stats", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(stats.total_pads >= 1);
        assert_eq!(stats.active_sessions, 0);
    }
}
