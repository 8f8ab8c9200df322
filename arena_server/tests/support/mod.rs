// Shared primitives for one-time server bootstrapping across integration tests.
#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::{
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, OnceLock},
    // Sleep durations are used in readiness polling loops.
    time::Duration,
};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

// Global address used by all tests after the server publishes its bound address.
static SERVER_ADDR: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running and return its `host:port`.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_addr = Arc::new(OnceLock::<String>::new());
        let published_addr_thread = Arc::clone(&published_addr);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_addr_thread.set(addr.to_string());
                arena_server::run(listener).await.expect("server failed");
            });
        });
        wait_for_server_addr_and_readiness(published_addr);
    });

    SERVER_ADDR
        .get()
        .expect("server addr should be initialized")
        .as_str()
}

fn wait_for_server_addr_and_readiness(published_addr: Arc<OnceLock<String>>) {
    let addr = loop {
        if let Some(addr) = published_addr.get() {
            break addr.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_ADDR.set(addr.clone());

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

pub async fn connect() -> Client {
    let url = format!("ws://{}/ws", ensure_server());
    let (client, _response) = connect_async(url).await.expect("websocket handshake");
    client
}

/// Next JSON text frame, failing the test if nothing arrives in time.
pub async fn next_json(client: &mut Client) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("frame before timeout")
            .expect("stream still open")
            .expect("valid frame");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).expect("server sends json");
        }
    }
}

/// Skips frames until one of type `kind` satisfies `pred`.
pub async fn wait_for(client: &mut Client, kind: &str, pred: impl Fn(&Value) -> bool) -> Value {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        assert!(
            tokio::time::Instant::now() < deadline,
            "no matching {kind} message"
        );
        let msg = next_json(client).await;
        if msg["type"] == kind && pred(&msg["payload"]) {
            return msg;
        }
    }
}

pub async fn send_json(client: &mut Client, value: Value) {
    client
        .send(Message::Text(value.to_string().into()))
        .await
        .expect("send frame");
}

pub fn find_player<'a>(state: &'a Value, id: &str) -> Option<&'a Value> {
    state["players"]
        .as_array()?
        .iter()
        .find(|player| player["id"] == id)
}
