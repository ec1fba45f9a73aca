// src/services/live_feed.rs

//! Per-subject live update channel ⇢ typed `candle` / `decision` stream
//!
//! * Connects to the bot backend's WebSocket (`/ws/{bot_id}?token=…`)
//! * Parses `{type, data}` envelopes coming from the server
//! * Sends each decoded message through the supplied mpsc::Sender
//!
//! The caller decides what to do with the messages (the session engine seeds
//! first, then drains the queue in arrival order). The channel is receive-only
//! and does not reconnect on its own; after a drop the stores keep their
//! last-known-good state and reconnection is an explicit caller action.

use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc::Sender, watch};
use tokio_tungstenite::connect_async;
use tungstenite::Message;

use crate::store::DecisionMarker;
use crate::utils::errors::ApiError;
use crate::utils::types::CandleRow;

/// `CONNECTING → OPEN → (CLOSED | ERRORED)`; `Errored` settles to `Closed`
/// once teardown is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
    Errored,
}

#[derive(Debug, Clone)]
pub enum LiveMessage {
    Candle(CandleRow),
    Decision(DecisionMarker),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    data: Value,
}

pub fn feed_url(ws_base: &str, bot_id: &str, token: &str) -> String {
    format!("{ws_base}/ws/{bot_id}?token={token}")
}

/// Decode one text frame. Malformed envelopes and unrecognized `type` values
/// yield `None` and are dropped silently (forward tolerance).
fn decode_frame(text: &str) -> Option<LiveMessage> {
    let env: Envelope = serde_json::from_str(text).ok()?;
    match env.kind.as_str() {
        "candle" => serde_json::from_value(env.data)
            .ok()
            .map(LiveMessage::Candle),
        "decision" => serde_json::from_value(env.data)
            .ok()
            .map(LiveMessage::Decision),
        other => {
            log::debug!("live feed: ignoring message type {other:?}");
            None
        }
    }
}

/// Run the channel until the server closes, an error occurs, or `shutdown`
/// fires. Decoded messages go out through `out`; the current connection state
/// is published on `status` for the rendering side.
pub async fn run(
    url: String,
    out: Sender<LiveMessage>,
    status: Arc<watch::Sender<ChannelState>>,
    shutdown: watch::Receiver<bool>,
) {
    match run_channel(&url, &out, &status, shutdown).await {
        Ok(()) => {
            status.send_replace(ChannelState::Closed);
        }
        Err(e) => {
            log::error!("live feed: {e}");
            status.send_replace(ChannelState::Errored);
        }
    }
}

async fn run_channel(
    url: &str,
    out: &Sender<LiveMessage>,
    status: &watch::Sender<ChannelState>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ApiError> {
    status.send_replace(ChannelState::Connecting);

    let (ws, _) = connect_async(url).await?;
    status.send_replace(ChannelState::Open);

    let (_write, mut read) = ws.split();

    loop {
        tokio::select! {
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    if let Some(decoded) = decode_frame(&text) {
                        // receiver gone means the session is being torn down
                        if out.send(decoded).await.is_err() {
                            return Ok(());
                        }
                    }
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {} // binary frames are not part of the protocol
                Some(Err(e)) => return Err(e.into()),
            },
            _ = shutdown.changed() => return Ok(()),
        }
    }
}
