//! Server-Sent Events (SSE) stream for real-time updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use homeguard_app::ports::{Clock, Notifier, Store};

use crate::state::AppState;

/// `GET /api/stream`: SSE stream of hub events.
///
/// Each frame carries the event name (`actuators_changed`, `log_recorded`,
/// `notified`) and the JSON-encoded event as data. The stream continues
/// until the client disconnects or the event bus is closed.
pub async fn stream<S, C, N>(
    State(state): State<AppState<S, C, N>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let event_rx = state.event_bus.subscribe();
    let event_stream = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().event(event.name()).data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize hub event for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
