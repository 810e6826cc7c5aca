use std::future::Future;

#[cfg(feature = "tracing")]
use tracing::{Instrument, Level};

/// Attaches a debug span to a future when the `tracing` feature is enabled.
///
/// Used for the per-stream reader tasks so their log lines carry the
/// channel they belong to.
pub trait MaybeInstrument: Future + Sized {
    #[cfg(feature = "tracing")]
    fn maybe_instrument(
        self,
        name: &'static str,
        channel: &'static str,
    ) -> impl Future<Output = Self::Output> {
        let span = tracing::span!(Level::DEBUG, "line_reader", name = name, channel = channel);
        self.instrument(span)
    }

    #[cfg(not(feature = "tracing"))]
    fn maybe_instrument(self, _name: &'static str, _channel: &'static str) -> Self {
        self
    }
}

impl<F: Future> MaybeInstrument for F {}
