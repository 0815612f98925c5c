//! Event sink carrying relay events to the client transport.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use thiserror::Error;
use tokio::sync::mpsc;

use runrelay_protocols::RelayEvent;

/// The receiving side has gone away (client disconnected or stream torn down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Create a connected sink / stream pair with the given capacity.
pub fn event_channel(capacity: usize) -> (EventSink, RelayEventStream) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSink { tx }, RelayEventStream { receiver: rx })
}

/// Sending half used by the relay loop.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<RelayEvent>,
}

impl EventSink {
    /// Push one event, waiting for capacity.
    pub async fn send(&self, event: RelayEvent) -> Result<(), SinkClosed> {
        self.tx.send(event).await.map_err(|_| SinkClosed)
    }

    /// Resolves once the receiving side has been dropped.
    pub async fn closed(&self) {
        self.tx.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Stream of relay events for one run.
///
/// Dropping the stream cancels the relay feeding it.
pub struct RelayEventStream {
    receiver: mpsc::Receiver<RelayEvent>,
}

impl Stream for RelayEventStream {
    type Item = RelayEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}
