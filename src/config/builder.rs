// self
use crate::{
	_prelude::*,
	config::{ClientConfig, DEFAULT_TOKEN_SCHEME, RefreshMethod},
};

/// Errors raised while constructing or validating client configurations.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ClientConfigError {
	/// The refresh endpoint is mandatory.
	#[error("Missing refresh endpoint.")]
	MissingRefreshEndpoint,
	/// The refresh endpoint must use HTTPS unless explicitly relaxed.
	#[error("The refresh endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Only `http` and `https` endpoints can be called.
	#[error("The refresh endpoint uses an unsupported scheme: {url}.")]
	UnsupportedEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Token schemes are a single header token.
	#[error("Token scheme `{scheme}` must not contain whitespace or control characters.")]
	InvalidTokenScheme {
		/// Scheme that failed validation.
		scheme: String,
	},
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Refresh endpoint (required).
	pub refresh_endpoint: Option<Url>,
	/// Method used against the refresh endpoint.
	pub refresh_method: RefreshMethod,
	/// Scheme prefixed to issued tokens.
	pub token_scheme: String,
	/// Permits a plain `http` refresh endpoint.
	pub allow_insecure_http: bool,
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			refresh_endpoint: None,
			refresh_method: RefreshMethod::default(),
			token_scheme: DEFAULT_TOKEN_SCHEME.into(),
			allow_insecure_http: false,
		}
	}
}
impl ClientConfigBuilder {
	/// Sets the refresh endpoint.
	pub fn refresh_endpoint(mut self, url: Url) -> Self {
		self.refresh_endpoint = Some(url);

		self
	}

	/// Overrides the refresh method.
	pub fn refresh_method(mut self, method: RefreshMethod) -> Self {
		self.refresh_method = method;

		self
	}

	/// Overrides the token scheme.
	pub fn token_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.token_scheme = scheme.into();

		self
	}

	/// Allows or forbids a plain `http` refresh endpoint.
	pub fn allow_insecure_http(mut self, allow: bool) -> Self {
		self.allow_insecure_http = allow;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let refresh_endpoint =
			self.refresh_endpoint.ok_or(ClientConfigError::MissingRefreshEndpoint)?;
		let config = ClientConfig {
			refresh_endpoint,
			refresh_method: self.refresh_method,
			token_scheme: self.token_scheme,
			allow_insecure_http: self.allow_insecure_http,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ClientConfig {
	/// Validates invariants for the configuration.
	pub fn validate(&self) -> Result<(), ClientConfigError> {
		validate_endpoint(&self.refresh_endpoint, self.allow_insecure_http)?;
		validate_token_scheme(&self.token_scheme)
	}
}

fn validate_endpoint(url: &Url, allow_insecure_http: bool) -> Result<(), ClientConfigError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if allow_insecure_http => Ok(()),
		"http" => Err(ClientConfigError::InsecureEndpoint { url: url.to_string() }),
		_ => Err(ClientConfigError::UnsupportedEndpoint { url: url.to_string() }),
	}
}

fn validate_token_scheme(scheme: &str) -> Result<(), ClientConfigError> {
	if scheme.chars().any(|c| c.is_whitespace() || c.is_control()) {
		Err(ClientConfigError::InvalidTokenScheme { scheme: scheme.to_owned() })
	} else {
		Ok(())
	}
}
