//! Client-level error types shared across dispatch, refresh, stores, and pricing.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS); no response reached the caller.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Terminal authentication failure; the caller must sign the user out and re-authenticate.
	#[error("Session expired: {0}")]
	SessionExpired(#[from] SessionExpired),
	/// Booking price could not be composed.
	#[error(transparent)]
	Pricing(#[from] crate::pricing::PricingError),
}
impl Error {
	/// Returns `true` when the error demands a forced sign-out.
	pub fn is_session_expired(&self) -> bool {
		matches!(self, Self::SessionExpired(_))
	}
}

/// Reasons the refresh protocol gave up on the current session.
#[derive(Debug, ThisError)]
pub enum SessionExpired {
	/// The token store holds no usable refresh token.
	#[error("no refresh token is available.")]
	MissingRefreshToken,
	/// The refresh endpoint could not be reached.
	#[error("the refresh endpoint is unreachable.")]
	RefreshUnreachable {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// The refresh endpoint answered with a non-success status.
	#[error("the refresh endpoint rejected the refresh token with HTTP {status}.")]
	RefreshRejected {
		/// HTTP status returned by the refresh endpoint.
		status: u16,
	},
	/// The refresh endpoint answered with a body that is not the expected JSON payload.
	#[error("the refresh endpoint returned malformed JSON.")]
	MalformedRefreshResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The refresh payload omitted one of the two tokens.
	#[error("the refresh response is missing `{field}`.")]
	IncompleteRefreshResponse {
		/// Missing wire field name.
		field: &'static str,
	},
	/// The refresh payload carried tokens that cannot be used as header values.
	#[error("the refresh response carried an unusable token.")]
	InvalidRefreshResponse {
		/// Credential validation failure.
		#[source]
		source: crate::auth::CredentialError,
	},
	/// An earlier refresh of the same session failed, either while this caller was queued behind
	/// it or because the endpoint rejected the refresh token.
	#[error("an earlier refresh of this session already failed.")]
	RefreshAlreadyFailed,
	/// The request was rejected again after a successful refresh.
	#[error("the request was rejected again after refreshing the session.")]
	UnauthorizedAfterRetry,
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A credential could not be encoded as a header value.
	#[error("Credential is not a valid header value.")]
	InvalidHeaderValue(#[from] ::http::header::InvalidHeaderValue),
	/// Credential pair failed validation.
	#[error("Credential pair is invalid.")]
	Credential(#[from] crate::auth::CredentialError),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
	/// Client configuration failed validation.
	#[error(transparent)]
	Client(#[from] crate::config::ClientConfigError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
