//! Client configuration: where sessions are refreshed and how tokens are formatted.
//!
//! [`ClientConfig`] is assembled through [`ClientConfigBuilder`] or deserialized from any serde
//! format; both paths end in the same validation so a config that reaches the client is usable.

/// Builder API and validation for client configurations.
pub mod builder;

pub use builder::*;

// crates.io
use ::http::Method;
// self
use crate::_prelude::*;

/// Scheme prefixed to tokens issued by the refresh endpoint.
pub const DEFAULT_TOKEN_SCHEME: &str = "Bearer";

/// HTTP method used to call the refresh endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMethod {
	#[default]
	/// `POST` with an empty body.
	Post,
	/// `GET`.
	Get,
}
impl RefreshMethod {
	/// Returns the matching [`Method`].
	pub fn as_method(self) -> Method {
		match self {
			Self::Post => Method::POST,
			Self::Get => Method::GET,
		}
	}
}

/// Validated configuration consumed by [`AuthHttpClient`](crate::client::AuthHttpClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Endpoint that trades a refresh token for a new credential pair.
	pub refresh_endpoint: Url,
	/// Method used against the refresh endpoint.
	#[serde(default)]
	pub refresh_method: RefreshMethod,
	/// Scheme prefixed to issued tokens; empty keeps tokens verbatim.
	#[serde(default = "default_token_scheme")]
	pub token_scheme: String,
	/// Permits a plain `http` refresh endpoint (local development and tests).
	#[serde(default)]
	pub allow_insecure_http: bool,
}
impl ClientConfig {
	/// Creates a new builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Parses and validates a JSON document.
	pub fn from_json(raw: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(raw).map_err(crate::error::ConfigError::from)?;

		config.validate().map_err(crate::error::ConfigError::from)?;

		Ok(config)
	}
}

fn default_token_scheme() -> String {
	DEFAULT_TOKEN_SCHEME.into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn json_config_applies_defaults() {
		let config =
			ClientConfig::from_json("{\"refresh_endpoint\":\"https://api.homecare.la/auth/refresh\"}")
				.expect("Minimal JSON config should validate.");

		assert_eq!(config.refresh_method, RefreshMethod::Post);
		assert_eq!(config.token_scheme, "Bearer");
		assert!(!config.allow_insecure_http);
	}

	#[test]
	fn json_config_is_validated() {
		let err =
			ClientConfig::from_json("{\"refresh_endpoint\":\"http://api.homecare.la/auth/refresh\"}")
				.expect_err("Insecure JSON config should be rejected.");

		assert!(matches!(
			err,
			Error::Config(crate::error::ConfigError::Client(
				ClientConfigError::InsecureEndpoint { .. }
			))
		));
	}

	#[test]
	fn refresh_method_maps_to_http_method() {
		assert_eq!(RefreshMethod::Post.as_method(), Method::POST);
		assert_eq!(RefreshMethod::Get.as_method(), Method::GET);
	}
}
