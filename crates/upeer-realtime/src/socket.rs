use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use upeer_types::events::{ChatCommand, ChatEvent};

#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("websocket: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("chat socket is closed")]
    Closed,
}

/// One persistent duplex connection to a group's chat channel,
/// authenticated via a token query parameter.
///
/// Incoming frames fan out to every subscriber. A socket that closes or
/// errors stays dead — the caller reconnects explicitly (e.g. on
/// re-selecting the group); there is no automatic retry.
pub struct ChatSocket {
    outbound: mpsc::Sender<String>,
    events: broadcast::Sender<ChatEvent>,
    shutdown: CancellationToken,
}

impl ChatSocket {
    pub async fn connect(
        ws_url: &str,
        group_id: i64,
        token: &str,
    ) -> Result<Self, RealtimeError> {
        let url = format!(
            "{}/ws/chat/{}/?token={}",
            ws_url.trim_end_matches('/'),
            group_id,
            token
        );
        let (stream, _) = connect_async(url.as_str()).await?;
        info!("chat socket connected for group {}", group_id);

        let (mut sink, mut source) = stream.split();
        let (out_tx, mut out_rx) = mpsc::channel::<String>(32);
        let (event_tx, _) = broadcast::channel(64);
        let shutdown = CancellationToken::new();

        // Outbound half: wrap message content in the command envelope.
        let send_shutdown = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = send_shutdown.cancelled() => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                    content = out_rx.recv() => {
                        let Some(content) = content else { break };
                        let frame =
                            serde_json::to_string(&ChatCommand { message: content }).unwrap();
                        if sink.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        // Inbound half: parse frames and fan out to subscribers. Exiting
        // cancels the token so the outbound half winds down too.
        let recv_events = event_tx.clone();
        let recv_shutdown = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = recv_shutdown.cancelled() => break,
                    msg = source.next() => match msg {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<ChatEvent>(text.as_str()) {
                                Ok(event) => {
                                    let _ = recv_events.send(event);
                                }
                                Err(e) => warn!("bad chat frame ({} bytes): {}", text.len(), e),
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!("chat socket error: {}", e);
                            break;
                        }
                    },
                }
            }
            info!("chat socket closed for group {}", group_id);
            recv_shutdown.cancel();
        });

        Ok(Self {
            outbound: out_tx,
            events: event_tx,
            shutdown,
        })
    }

    /// Register a listener for incoming messages.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    pub async fn send(&self, content: &str) -> Result<(), RealtimeError> {
        self.outbound
            .send(content.to_string())
            .await
            .map_err(|_| RealtimeError::Closed)
    }

    pub fn is_open(&self) -> bool {
        !self.shutdown.is_cancelled() && !self.outbound.is_closed()
    }

    /// Resolves once the connection is gone, whatever side ended it.
    pub async fn closed(&self) {
        self.shutdown.cancelled().await;
    }

    pub fn close(&self) {
        self.shutdown.cancel();
    }
}
