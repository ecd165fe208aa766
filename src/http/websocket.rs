//! Overlay frame stream over WebSocket.
//!
//! # Data Flow
//! ```text
//! AlertDisplay ── watch<AlertFrame> ──▶ one task per socket ──▶ browser source
//! ```
//!
//! The current frame is sent on connect, then one message per change.
//! Frames skipped while a client is slow are not replayed; the client always
//! ends up on the latest frame.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::watch;

use crate::alerts::AlertFrame;
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn overlay_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let frames = state.display.subscribe();
    ws.on_upgrade(move |socket| stream_frames(socket, frames))
}

async fn stream_frames(socket: WebSocket, mut frames: watch::Receiver<AlertFrame>) {
    let (mut sender, mut receiver) = socket.split();
    metrics::overlay_subscriber_connected();
    tracing::debug!("Overlay subscriber connected");

    'outer: loop {
        let text = {
            let frame = frames.borrow_and_update();
            match serde_json::to_string(&*frame) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode overlay frame");
                    break;
                }
            }
        };

        if sender.send(Message::Text(text.into())).await.is_err() {
            break;
        }

        loop {
            tokio::select! {
                changed = frames.changed() => {
                    if changed.is_err() {
                        // Display stopped.
                        let _ = sender.send(Message::Close(None)).await;
                        break 'outer;
                    }
                    continue 'outer;
                }
                incoming = receiver.next() => match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break 'outer,
                    Some(Ok(_)) => {}
                },
            }
        }
    }

    metrics::overlay_subscriber_disconnected();
    tracing::debug!("Overlay subscriber disconnected");
}
