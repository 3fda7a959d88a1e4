// self
use crate::{_prelude::*, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by client flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("homecare_client.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a stored credential entry that was discarded as unusable.
pub(crate) fn credential_entry_discarded(store: &'static str, reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	tracing::warn!(store, %reason, "Discarding unusable credential entry.");

	#[cfg(not(feature = "tracing"))]
	let _ = (store, reason);
}

/// Logs a refresh that reused credentials rotated by a concurrent caller.
pub(crate) fn refresh_coalesced() {
	#[cfg(feature = "tracing")]
	tracing::debug!("Reusing credentials rotated by a concurrent refresh.");
}

/// Logs a refresh that gave up because a queued-ahead refresh of the same session failed.
pub(crate) fn refresh_failure_shared() {
	#[cfg(feature = "tracing")]
	tracing::debug!("Reusing the failure of a concurrent refresh.");
}

/// Logs a terminal session expiry.
pub(crate) fn session_expired(reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%reason, "Session expired; re-authentication required.");

	#[cfg(not(feature = "tracing"))]
	let _ = reason;
}
