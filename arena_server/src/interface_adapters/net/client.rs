use crate::domain::{Actor, ActorId, DeliveryError, OutboundQueue};
use crate::frameworks::config;
use crate::interface_adapters::protocol::{ServerMessage, decode_client_action, encode};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::{rand_id, random_color, spawn_point};
use crate::use_cases::{SharedWorld, connection, input};

use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use futures_util::stream::{SplitSink, SplitStream};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{Instrument, Span, debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

type WsSink = SplitSink<WebSocket, Message>;
type WsStream = SplitStream<WebSocket>;

const LOG_THROTTLE: Duration = Duration::from_secs(2);

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

#[derive(Debug, Default)]
struct InboundStats {
    msgs_in: u64,
    bytes_in: u64,
    invalid: u32,
}

#[derive(Debug, Default)]
struct OutboundStats {
    msgs_out: u64,
    bytes_out: u64,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.max_message_size(config::MAX_MESSAGE_BYTES)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Separate connection id for correlating logs before/after an actor_id exists.
    let conn_id = rand_id();
    let span = info_span!("conn", conn_id, actor_id = tracing::field::Empty);
    run_connection(socket, state).instrument(span).await;
}

async fn run_connection(socket: WebSocket, state: Arc<AppState>) {
    let (actor, outbound_rx) = match spawn_actor(&state) {
        Ok(spawned) => spawned,
        Err(e) => {
            // Dropping the socket closes the connection.
            error!(error = ?e, "failed to bootstrap connection");
            return;
        }
    };
    let actor_id = actor.id;
    Span::current().record("actor_id", tracing::field::display(actor_id));

    let actors = connection::join(&state.world, actor).await;
    info!(actors, "client connected");

    let (sink, stream) = socket.split();
    let mut writer = tokio::spawn(outbound_pump(sink, outbound_rx).instrument(Span::current()));

    let inbound = inbound_pump(stream, &state.world, actor_id).await;

    // Teardown is driven from here: removing the actor closes its queue, which ends the
    // outbound pump and hands the sink back for a clean close.
    let last_state = connection::leave(&state.world, actor_id).await;
    let outbound = match timeout(config::CLOSE_TIMEOUT, &mut writer).await {
        Ok(Ok((mut sink, stats))) => {
            if let Err(err) = sink.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            stats
        }
        Ok(Err(e)) => {
            error!(error = %e, "outbound pump failed");
            OutboundStats::default()
        }
        Err(_) => {
            warn!("outbound pump did not finish in time; aborting");
            writer.abort();
            OutboundStats::default()
        }
    };

    debug!(
        msgs_in = inbound.msgs_in,
        bytes_in = inbound.bytes_in,
        invalid = inbound.invalid,
        msgs_out = outbound.msgs_out,
        bytes_out = outbound.bytes_out,
        "connection stats"
    );
    match last_state {
        Some(last) => info!(score = last.score, lives = last.lives, "client disconnected"),
        None => warn!("client disconnected but actor was already gone"),
    }
}

/// Builds the actor for a new connection with its identity already queued.
fn spawn_actor(state: &AppState) -> Result<(Actor, mpsc::Receiver<Utf8Bytes>), NetError> {
    let actor_id = ActorId(state.actor_ids.next());
    let (outbound, outbound_rx) = OutboundQueue::bounded(state.outbound_capacity);

    // Queued before the actor is visible to the broadcaster, so it is always the first frame.
    let identity = encode(&ServerMessage::AssignId {
        id: actor_id.to_string(),
    })
    .map_err(NetError::Serialization)?;
    if let Err(e) = outbound.offer(identity) {
        warn!(actor_id = %actor_id, error = ?e, "failed to queue identity");
    }

    let tuning = &state.tuning;
    let actor = Actor::new(
        actor_id,
        spawn_point(tuning.arena, tuning.player.radius),
        random_color(),
        tuning.player.initial_lives,
        outbound,
    );
    Ok((actor, outbound_rx))
}

/// Reads frames until the connection fails or closes, applying each decoded action.
async fn inbound_pump(mut stream: WsStream, world: &SharedWorld, actor_id: ActorId) -> InboundStats {
    let mut stats = InboundStats::default();
    let mut last_invalid_log = Instant::now() - LOG_THROTTLE;

    loop {
        let msg = match stream.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                warn!(error = %e, "websocket recv error");
                break;
            }
            None => {
                info!("websocket closed");
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                stats.msgs_in += 1;
                stats.bytes_in += text.len() as u64;

                match decode_client_action(&text) {
                    Ok(action) => {
                        if !input::apply(world, actor_id, action).await {
                            break;
                        }
                    }
                    Err(e) => {
                        stats.invalid += 1;
                        if should_log(&mut last_invalid_log) {
                            warn!(bytes = text.len(), error = %e, "failed to decode client message");
                        }
                        report_fault(world, actor_id, e.to_string()).await;
                    }
                }
            }
            Message::Binary(bytes) => {
                stats.msgs_in += 1;
                stats.bytes_in += bytes.len() as u64;
                stats.invalid += 1;
                if should_log(&mut last_invalid_log) {
                    warn!(bytes = bytes.len(), "binary message ignored");
                }
                report_fault(world, actor_id, "binary messages not supported".to_string()).await;
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(frame) => {
                debug!(?frame, "close frame received");
                break;
            }
        }
    }

    stats
}

/// Drains the outbound queue into the socket until the queue closes or a write fails.
///
/// Never touches the world; the inbound pump owns teardown.
async fn outbound_pump(
    mut sink: WsSink,
    mut outbound_rx: mpsc::Receiver<Utf8Bytes>,
) -> (WsSink, OutboundStats) {
    let mut stats = OutboundStats::default();

    while let Some(bytes) = outbound_rx.recv().await {
        let bytes_len = bytes.len();
        if let Err(err) = sink.send(Message::Text(bytes)).await.map_err(NetError::from) {
            // Log unexpected send failures; the reader notices the dead socket and cleans up.
            warn!(error = ?err, "failed to send message");
            break;
        }
        stats.msgs_out += 1;
        stats.bytes_out += bytes_len as u64;
    }

    (sink, stats)
}

/// Tells the client about a fault in something it sent, without blocking.
async fn report_fault(world: &SharedWorld, actor_id: ActorId, message: String) {
    let bytes = match encode(&ServerMessage::Error { message }) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = ?e, "failed to serialize error message");
            return;
        }
    };

    let world = world.read().await;
    let Some(actor) = world.actor(actor_id) else {
        return;
    };
    match actor.outbound.offer(bytes) {
        Ok(()) => {}
        Err(DeliveryError::Full) => warn!("outbound queue full; dropping error report"),
        Err(DeliveryError::Closed) => debug!("error report dropped; outbound queue closed"),
    }
}
