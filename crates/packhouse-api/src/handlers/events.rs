use crate::constants::SSE_KEEP_ALIVE_SECS;
use crate::state::EventState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Server-Sent Events stream of packer changes", body = String, content_type = "text/event-stream")
    )
)]
pub async fn stream_events(
    State(EventState(events)): State<EventState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = events.subscribe();
    tracing::debug!(listeners = events.listener_count(), "Realtime listener connected");

    let stream = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => match Event::default().event(event.kind.as_str()).json_data(&event) {
                    Ok(sse_event) => return Some((Ok(sse_event), receiver)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to encode realtime event");
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Realtime listener lagged, skipping missed events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(SSE_KEEP_ALIVE_SECS)))
}
