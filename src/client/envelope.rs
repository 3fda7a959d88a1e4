//! Call-scoped request envelope carrying the retry marker.

// crates.io
use ::http::header::{AUTHORIZATION, InvalidHeaderValue};
// self
use crate::{auth::CredentialPair, http::ApiRequest};

/// In-flight representation of one [`send`](crate::client::AuthHttpClient::send) call.
///
/// The marker is owned by the envelope and never shared, so concurrent calls cannot consume
/// each other's retry.
#[derive(Debug)]
pub(crate) struct RequestEnvelope {
	request: ApiRequest,
	retried: bool,
}
impl RequestEnvelope {
	pub(crate) fn new(request: ApiRequest) -> Self {
		Self { request, retried: false }
	}

	pub(crate) fn request(&self) -> &ApiRequest {
		&self.request
	}

	/// Sets `Authorization` from `credentials`; without credentials the request is left as-is.
	pub(crate) fn attach(
		&mut self,
		credentials: Option<&CredentialPair>,
	) -> Result<(), InvalidHeaderValue> {
		if let Some(pair) = credentials {
			self.request.headers.insert(AUTHORIZATION, pair.authorization()?);
		}

		Ok(())
	}

	/// Sets the retry marker, returning `false` when it was already set.
	pub(crate) fn mark_retried(&mut self) -> bool {
		if self.retried {
			return false;
		}

		self.retried = true;

		true
	}
}
