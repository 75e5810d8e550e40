//! Real-time WebSocket endpoint and connection status.
//!
//! Each connection owns one broadcast subscription and runs a single
//! dispatcher loop. Socket reads and hub deliveries are turned into
//! [`ConnectionEvent`]s and handled in one place, so a connection never
//! writes to its socket from two tasks.

use std::ops::ControlFlow;

use axum::{
    Json,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use chrono::Utc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::api::dto::realtime::WebSocketStatsResponse;
use crate::domain::events::Notifier;
use crate::infrastructure::realtime::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// Upgrades the request to a WebSocket observer connection.
///
/// # Endpoint
///
/// `GET /ws`
///
/// # Frames
///
/// On connect the client receives `welcome`, then every `newUrl`,
/// `clickUpdate` and `statsUpdate` broadcast. The client may send
/// `{"event":"ping"}` (answered with `pong`) or `{"event":"getStats"}`
/// (answered with `statsUpdate` to that client only).
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Reports the number of connected observers.
///
/// # Endpoint
///
/// `GET /api/stats/websocket`
///
/// # Response
///
/// ```json
/// { "connectedClients": 3, "status": "OK", "timestamp": "2026-10-18T12:00:00Z" }
/// ```
pub async fn websocket_stats_handler(State(state): State<AppState>) -> Json<WebSocketStatsResponse> {
    Json(WebSocketStatsResponse {
        connected_clients: state.hub.observer_count(),
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}

/// Everything that can happen on one observer connection.
#[derive(Debug)]
enum ConnectionEvent {
    Connect,
    Inbound(Result<ClientMessage, serde_json::Error>),
    Outbound(String),
    Lagged(u64),
    Disconnect,
}

struct Connection {
    socket: WebSocket,
    events: broadcast::Receiver<String>,
    state: AppState,
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let events = state.hub.subscribe();
    info!(
        "Observer connected ({} total)",
        state.hub.observer_count()
    );

    let mut connection = Connection {
        socket,
        events,
        state,
    };

    let mut event = ConnectionEvent::Connect;
    loop {
        if connection.dispatch(event).await.is_break() {
            break;
        }
        event = connection.next_event().await;
    }

    let hub = connection.state.hub.clone();
    drop(connection);
    info!("Observer disconnected ({} remaining)", hub.observer_count());
}

impl Connection {
    /// Waits for the next socket frame or hub delivery.
    async fn next_event(&mut self) -> ConnectionEvent {
        loop {
            tokio::select! {
                inbound = self.socket.recv() => match inbound {
                    Some(Ok(Message::Text(text))) => {
                        return ConnectionEvent::Inbound(serde_json::from_str(text.as_str()));
                    }
                    Some(Ok(Message::Close(_))) | None => return ConnectionEvent::Disconnect,
                    Some(Err(e)) => {
                        debug!("WebSocket receive error: {}", e);
                        return ConnectionEvent::Disconnect;
                    }
                    // Ping/pong are answered by the protocol layer; binary is ignored.
                    Some(Ok(_)) => continue,
                },
                outbound = self.events.recv() => match outbound {
                    Ok(frame) => return ConnectionEvent::Outbound(frame),
                    Err(RecvError::Lagged(skipped)) => return ConnectionEvent::Lagged(skipped),
                    Err(RecvError::Closed) => return ConnectionEvent::Disconnect,
                },
            }
        }
    }

    async fn dispatch(&mut self, event: ConnectionEvent) -> ControlFlow<()> {
        match event {
            ConnectionEvent::Connect => self.send(&ServerMessage::welcome()).await,
            ConnectionEvent::Inbound(Ok(ClientMessage::Ping)) => {
                self.send(&ServerMessage::Pong {
                    timestamp: Utc::now(),
                })
                .await
            }
            ConnectionEvent::Inbound(Ok(ClientMessage::GetStats)) => {
                let reply = match self.state.redirect_service.snapshot().await {
                    Ok(snapshot) => ServerMessage::stats(snapshot),
                    Err(e) => {
                        warn!("Failed to collect stats for observer: {}", e);
                        ServerMessage::Error {
                            message: "Statistics unavailable".to_string(),
                        }
                    }
                };
                self.send(&reply).await
            }
            ConnectionEvent::Inbound(Err(e)) => {
                debug!("Unrecognized observer frame: {}", e);
                self.send(&ServerMessage::Error {
                    message: "Unrecognized message".to_string(),
                })
                .await
            }
            ConnectionEvent::Outbound(frame) => self.send_text(frame).await,
            ConnectionEvent::Lagged(skipped) => {
                warn!("Observer lagging, skipped {} frame(s)", skipped);
                ControlFlow::Continue(())
            }
            ConnectionEvent::Disconnect => ControlFlow::Break(()),
        }
    }

    async fn send(&mut self, message: &ServerMessage) -> ControlFlow<()> {
        match message.to_json() {
            Ok(frame) => self.send_text(frame).await,
            Err(e) => {
                warn!("Failed to serialize frame: {}", e);
                ControlFlow::Continue(())
            }
        }
    }

    async fn send_text(&mut self, frame: String) -> ControlFlow<()> {
        if self.socket.send(Message::Text(frame.into())).await.is_err() {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}
