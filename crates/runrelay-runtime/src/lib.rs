//! # runrelay Runtime
//!
//! Turns a polled remote run into an ordered push stream of [`RelayEvent`]s.
//!
//! One [`RunRelay`] instance can serve any number of streams; every call to
//! [`RunRelay::spawn`] starts an independent poll loop on its own task that
//! owns its run id, credential and last observed status.
//!
//! [`RelayEvent`]: runrelay_protocols::RelayEvent

mod config;
mod relay;
mod sink;

pub use config::RelayConfig;
pub use relay::{RelayState, RunRelay};
pub use sink::{event_channel, EventSink, RelayEventStream, SinkClosed};
