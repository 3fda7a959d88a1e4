//! Session refresh with a single-flight guard.
//!
//! Callers that hit a 401 queue on one guard per client. The first caller in line trades the
//! stored refresh token for a new pair and persists it; callers that wake up afterwards notice
//! the stored access token no longer matches the one their request presented and reuse the
//! rotated pair instead of calling the refresh endpoint again. A failed refresh is shared the
//! same way: callers queued behind it give up without another round trip, and a refresh token
//! the endpoint rejected is never sent again.

// crates.io
use ::http::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	client::AuthHttpClient,
	error::{ConfigError, SessionExpired, TransportError},
	http::{ApiRequest, ApiTransport},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Wire payload returned by the refresh endpoint.
#[derive(Debug, Deserialize)]
struct RefreshPayload {
	access_token: Option<String>,
	refresh_token: Option<String>,
}

/// Outcome of the most recent refresh call, read by callers queued behind it.
#[derive(Debug, Default)]
pub(crate) struct RefreshLedger {
	generation: u64,
	failed: Option<FailedRefresh>,
}
impl RefreshLedger {
	fn shares_failure(&self, current: &CredentialPair, observed: u64) -> bool {
		self.failed.as_ref().is_some_and(|failed| {
			&failed.access_token == current.access_token()
				&& (failed.rejected || failed.generation > observed)
		})
	}

	fn record(&mut self, current: &CredentialPair, result: &Result<CredentialPair>) {
		self.generation += 1;
		self.failed = result.as_ref().err().map(|err| FailedRefresh {
			access_token: current.access_token().clone(),
			generation: self.generation,
			rejected: matches!(err, Error::SessionExpired(SessionExpired::RefreshRejected { .. })),
		});
	}
}

#[derive(Debug)]
struct FailedRefresh {
	access_token: TokenSecret,
	generation: u64,
	// The endpoint refused this refresh token outright.
	rejected: bool,
}

impl<C> AuthHttpClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Refreshes the session whose access token `stale` was rejected.
	pub(crate) async fn refresh_session(
		&self,
		stale: Option<&CredentialPair>,
	) -> Result<CredentialPair> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_session");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let observed = self.refresh_ledger.lock().generation;
				let _singleflight = self.refresh_guard.lock().await;

				self.refresh_locked(stale, observed).await
			})
			.await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	async fn refresh_locked(
		&self,
		stale: Option<&CredentialPair>,
		observed: u64,
	) -> Result<CredentialPair> {
		let current = self.store.load().await?;

		if let Some(rotated) = current.as_ref().filter(|pair| rotated_since(pair, stale)) {
			self.refresh_metrics.record_coalesced();
			obs::refresh_coalesced();

			return Ok(rotated.clone());
		}

		let current = current.ok_or(SessionExpired::MissingRefreshToken)?;

		if self.refresh_ledger.lock().shares_failure(&current, observed) {
			self.refresh_metrics.record_coalesced();
			obs::refresh_failure_shared();

			return Err(SessionExpired::RefreshAlreadyFailed.into());
		}

		self.refresh_metrics.record_attempt();

		let result = self.request_refresh(&current).await;

		self.refresh_ledger.lock().record(&current, &result);

		match result {
			Ok(issued) => {
				self.refresh_metrics.record_success();
				self.store.save(issued.clone()).await?;

				Ok(issued)
			},
			Err(err) => {
				self.refresh_metrics.record_failure();

				Err(err)
			},
		}
	}

	async fn request_refresh(&self, current: &CredentialPair) -> Result<CredentialPair> {
		let authorization = current.refresh_authorization().map_err(ConfigError::from)?;
		let request = ApiRequest::new(
			self.config.refresh_method.as_method(),
			self.config.refresh_endpoint.clone(),
		)
		.header(AUTHORIZATION, authorization);
		let response = self.transport.execute(&request).await.map_err(|err| {
			SessionExpired::RefreshUnreachable { source: TransportError::network(err) }
		})?;

		if !response.is_success() {
			return Err(SessionExpired::RefreshRejected { status: response.status.as_u16() }.into());
		}

		let payload = response
			.json::<RefreshPayload>()
			.map_err(|source| SessionExpired::MalformedRefreshResponse { source })?;
		let access_token = non_blank(payload.access_token)
			.ok_or(SessionExpired::IncompleteRefreshResponse { field: "access_token" })?;
		let refresh_token = non_blank(payload.refresh_token)
			.ok_or(SessionExpired::IncompleteRefreshResponse { field: "refresh_token" })?;

		CredentialPair::issued(&self.config.token_scheme, &access_token, &refresh_token)
			.map_err(|source| SessionExpired::InvalidRefreshResponse { source }.into())
	}
}

/// Whether `current` was stored after the request that presented `stale` went out.
fn rotated_since(current: &CredentialPair, stale: Option<&CredentialPair>) -> bool {
	stale.is_none_or(|stale| current.access_token() != stale.access_token())
}

fn non_blank(token: Option<String>) -> Option<String> {
	token.filter(|value| !value.trim().is_empty())
}
