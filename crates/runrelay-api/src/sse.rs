//! Server-sent event framing.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::{future, Stream, StreamExt};
use tracing::warn;

use runrelay_protocols::RelayEvent;

/// Encode one event as a `data: <json>\n\n` frame.
pub fn frame_event(event: &RelayEvent) -> Option<Bytes> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Bytes::from(format!("data: {json}\n\n"))),
        Err(e) => {
            warn!(error = %e, kind = event.kind(), "failed to serialize relay event");
            None
        }
    }
}

/// Turn an event stream into an HTTP body stream.
///
/// Dropping the body (client disconnect) drops `events`, which cancels the
/// relay feeding it.
pub fn sse_body_stream<S>(events: S) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static
where
    S: Stream<Item = RelayEvent> + Send + 'static,
{
    events.filter_map(|event| future::ready(frame_event(&event).map(Ok::<Bytes, Infallible>)))
}

pub fn sse_response<S>(stream: S) -> Response
where
    S: Stream<Item = Result<Bytes, Infallible>> + Send + 'static,
{
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("x-accel-buffering", HeaderValue::from_static("no"));
    (headers, Body::from_stream(stream)).into_response()
}
