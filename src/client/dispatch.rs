//! Request dispatch: attach, send, and the single refresh-and-retry on `401 Unauthorized`.

// self
use crate::{
	_prelude::*,
	client::{AuthHttpClient, envelope::RequestEnvelope},
	error::{ConfigError, SessionExpired, TransportError},
	http::{ApiRequest, ApiResponse, ApiTransport},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> AuthHttpClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Sends `request` with the stored access token, refreshing the session once on
	/// `401 Unauthorized`.
	///
	/// Responses with any other status are returned unchanged. Transport failures propagate
	/// without retry. A missing refresh token, a failed refresh, or a second 401 after
	/// refreshing surface as [`Error::SessionExpired`].
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		const KIND: FlowKind = FlowKind::Send;

		let span = FlowSpan::new(KIND, "send");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.send_enveloped(RequestEnvelope::new(request))).await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		if let Err(Error::SessionExpired(reason)) = &result {
			obs::session_expired(reason);
		}

		result
	}

	async fn send_enveloped(&self, mut envelope: RequestEnvelope) -> Result<ApiResponse> {
		let mut presented = self.store.load().await?;

		envelope.attach(presented.as_ref()).map_err(ConfigError::from)?;

		loop {
			let response = self.dispatch(&envelope).await?;

			if !response.is_unauthorized() {
				return Ok(response);
			}
			if !envelope.mark_retried() {
				return Err(SessionExpired::UnauthorizedAfterRetry.into());
			}

			let refreshed = self.refresh_session(presented.as_ref()).await?;

			envelope.attach(Some(&refreshed)).map_err(ConfigError::from)?;
			presented = Some(refreshed);
		}
	}

	async fn dispatch(&self, envelope: &RequestEnvelope) -> Result<ApiResponse> {
		self.transport
			.execute(envelope.request())
			.await
			.map_err(|err| TransportError::network(err).into())
	}
}
