use std::convert::Infallible;

use axum::response::sse::Event;
use serde::Serialize;

use crate::error::RecipesServiceError;

/// Render one live snapshot as a server-sent event.
///
/// Snapshots are sent as `snapshot` events carrying the full JSON body; a
/// failed re-read becomes an `error` event with the error kind and the
/// stream stays open for the next change.
pub fn snapshot_event<T: Serialize>(
    snapshot: Result<T, RecipesServiceError>,
) -> Result<Event, Infallible> {
    let event = match snapshot {
        Ok(body) => Event::default()
            .event("snapshot")
            .json_data(body)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to encode live snapshot");
                Event::default().event("error").data("INTERNAL")
            }),
        Err(e) => {
            tracing::warn!(error = %e, kind = e.kind(), "live snapshot failed");
            Event::default().event("error").data(e.kind())
        }
    };
    Ok(event)
}
