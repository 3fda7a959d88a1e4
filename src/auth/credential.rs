//! Access/refresh credential pair persisted by token stores.
//!
//! The pair travels as a single JSON document, `{"accessToken": "...", "refreshToken": "..."}`,
//! whose values already carry the scheme prefix the API expects. Decoding enforces the pair
//! invariant: an entry with only one token (or an unusable one) never becomes a
//! [`CredentialPair`].

// crates.io
use ::http::{HeaderValue, header::InvalidHeaderValue};
// self
use crate::{_prelude::*, auth::TokenSecret};

const ACCESS_TOKEN: &str = "access token";
const REFRESH_TOKEN: &str = "refresh token";

/// Validation failures raised while assembling a [`CredentialPair`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CredentialError {
	/// One half of the pair is absent or blank.
	#[error("The {field} is missing.")]
	Missing {
		/// Which token was missing.
		field: &'static str,
	},
	/// A token contains characters that cannot travel in an HTTP header.
	#[error("The {field} is not a valid header value.")]
	InvalidHeader {
		/// Which token failed validation.
		field: &'static str,
	},
}

/// Access and refresh tokens that are always present together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredEntry")]
pub struct CredentialPair {
	access_token: TokenSecret,
	refresh_token: TokenSecret,
}
impl CredentialPair {
	/// Builds a pair from header-ready token values (scheme prefix included).
	pub fn new(
		access_token: impl Into<String>,
		refresh_token: impl Into<String>,
	) -> Result<Self, CredentialError> {
		Ok(Self {
			access_token: validate(ACCESS_TOKEN, access_token.into())?,
			refresh_token: validate(REFRESH_TOKEN, refresh_token.into())?,
		})
	}

	/// Builds a pair from raw tokens issued by the API, prefixing both with `scheme`.
	///
	/// An empty scheme keeps the tokens verbatim.
	pub fn issued(
		scheme: &str,
		access_token: &str,
		refresh_token: &str,
	) -> Result<Self, CredentialError> {
		if access_token.trim().is_empty() {
			return Err(CredentialError::Missing { field: ACCESS_TOKEN });
		}
		if refresh_token.trim().is_empty() {
			return Err(CredentialError::Missing { field: REFRESH_TOKEN });
		}

		Self::new(with_scheme(scheme, access_token), with_scheme(scheme, refresh_token))
	}

	/// Decodes a stored JSON entry.
	pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
		serde_json::from_slice(bytes)
	}

	/// Encodes the pair as the stored JSON entry.
	pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
		serde_json::to_vec(self)
	}

	/// Header-ready access token.
	pub fn access_token(&self) -> &TokenSecret {
		&self.access_token
	}

	/// Header-ready refresh token.
	pub fn refresh_token(&self) -> &TokenSecret {
		&self.refresh_token
	}

	/// `Authorization` value for protected API calls, marked sensitive.
	pub fn authorization(&self) -> Result<HeaderValue, InvalidHeaderValue> {
		sensitive_header(self.access_token.expose())
	}

	/// `Authorization` value for the refresh endpoint, marked sensitive.
	pub fn refresh_authorization(&self) -> Result<HeaderValue, InvalidHeaderValue> {
		sensitive_header(self.refresh_token.expose())
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
	access_token: Option<String>,
	refresh_token: Option<String>,
}
impl TryFrom<StoredEntry> for CredentialPair {
	type Error = CredentialError;

	fn try_from(entry: StoredEntry) -> Result<Self, Self::Error> {
		let access = entry.access_token.ok_or(CredentialError::Missing { field: ACCESS_TOKEN })?;
		let refresh =
			entry.refresh_token.ok_or(CredentialError::Missing { field: REFRESH_TOKEN })?;

		Self::new(access, refresh)
	}
}

fn validate(field: &'static str, value: String) -> Result<TokenSecret, CredentialError> {
	if value.trim().is_empty() {
		return Err(CredentialError::Missing { field });
	}

	HeaderValue::from_str(&value).map_err(|_| CredentialError::InvalidHeader { field })?;

	Ok(TokenSecret::new(value))
}

fn with_scheme(scheme: &str, token: &str) -> String {
	if scheme.is_empty() { token.to_owned() } else { format!("{scheme} {token}") }
}

fn sensitive_header(value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
	let mut header = HeaderValue::from_str(value)?;

	header.set_sensitive(true);

	Ok(header)
}
