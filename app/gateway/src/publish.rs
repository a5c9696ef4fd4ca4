//! Event-to-wire publishing.
//!
//! Maps each [`DialogueEvent`] to one SSE frame, flushed as produced —
//! never batched, so the client observes fragments as they are
//! generated. The terminal `[DONE]` sentinel is sent exactly once on
//! every stream, even when the event sequence ends without its own
//! `Done`.

use async_stream::stream;
use axum::response::sse::Event;
use dialogue::DialogueEvent;
use futures_core::Stream;
use futures_util::StreamExt;
use std::convert::Infallible;

/// Terminal sentinel payload, sent as the last frame of every stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Render the wire payload for one event.
///
/// JSON-tagged records for the regular events, the raw sentinel for
/// `Done`. `None` means the event could not be encoded; it is logged
/// and dropped rather than breaking the stream.
pub fn encode(event: &DialogueEvent) -> Option<String> {
    match event {
        DialogueEvent::Done => Some(DONE_SENTINEL.to_owned()),
        other => match serde_json::to_string(other) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("failed to encode event: {e}");
                None
            }
        },
    }
}

/// Adapt an event sequence into SSE frames.
///
/// One frame per event; the sentinel is appended if the sequence
/// terminates without a `Done` of its own, so the wire contract holds
/// regardless of how the producer ended.
pub fn publish(
    events: impl Stream<Item = DialogueEvent> + Send + 'static,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    stream! {
        let mut events = std::pin::pin!(events);
        let mut finished = false;
        while let Some(event) = events.next().await {
            let Some(payload) = encode(&event) else {
                continue;
            };
            finished = matches!(event, DialogueEvent::Done);
            yield Ok(Event::default().data(payload));
            if finished {
                break;
            }
        }
        if !finished {
            yield Ok(Event::default().data(DONE_SENTINEL));
        }
    }
}
