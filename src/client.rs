//! Authenticated HTTP client with single-flight session refresh.
//!
//! [`AuthHttpClient::send`] attaches the stored access token to each request and recovers from
//! one expired-token rejection per call by refreshing the session and retrying once. The retry
//! marker lives in a call-scoped envelope, and refreshes are serialized behind one guard so
//! concurrent 401s share a single round trip to the refresh endpoint.

mod dispatch;
mod envelope;
mod metrics;
mod refresh;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::CredentialPair,
	client::refresh::RefreshLedger,
	config::ClientConfig,
	error::ConfigError,
	http::ApiTransport,
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestAuthClient = AuthHttpClient<ReqwestTransport>;

/// Wraps a transport with bearer-token injection and the refresh-and-retry protocol.
#[derive(Clone)]
pub struct AuthHttpClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Transport used for protected calls and the refresh endpoint.
	pub transport: Arc<C>,
	/// Store holding the session credential pair.
	pub store: Arc<dyn TokenStore>,
	/// Refresh endpoint and token formatting.
	pub config: ClientConfig,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
	refresh_ledger: Arc<Mutex<RefreshLedger>>,
}
impl<C> AuthHttpClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		store: Arc<dyn TokenStore>,
		config: ClientConfig,
		transport: impl Into<Arc<C>>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			config,
			refresh_metrics: Default::default(),
			refresh_guard: Default::default(),
			refresh_ledger: Default::default(),
		}
	}

	/// Stores tokens returned by a sign-in call, prefixed with the configured scheme.
	pub async fn sign_in(&self, access_token: &str, refresh_token: &str) -> Result<CredentialPair> {
		let pair = CredentialPair::issued(&self.config.token_scheme, access_token, refresh_token)
			.map_err(ConfigError::from)?;

		self.store.save(pair.clone()).await?;

		Ok(pair)
	}

	/// Drops the stored session.
	pub async fn sign_out(&self) -> Result<()> {
		self.store.clear().await?;

		Ok(())
	}

	/// Returns the stored credential pair, if a usable one exists.
	pub async fn credentials(&self) -> Result<Option<CredentialPair>> {
		Ok(self.store.load().await?)
	}
}
#[cfg(feature = "reqwest")]
impl AuthHttpClient<ReqwestTransport> {
	/// Creates a new client backed by a default reqwest transport.
	pub fn new(store: Arc<dyn TokenStore>, config: ClientConfig) -> Self {
		Self::with_transport(store, config, ReqwestTransport::default())
	}
}
impl<C> Debug for AuthHttpClient<C>
where
	C: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthHttpClient")
			.field("config", &self.config)
			.field("refresh_metrics", &self.refresh_metrics)
			.finish()
	}
}
