//! Client-level error types shared across auth, transport, request execution, and models.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// JSON mapping or validation failure for a data model.
	#[error(transparent)]
	Model(#[from] crate::models::ModelError),
	/// API returned a non-retryable (or no longer retryable) HTTP failure.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Credentials were rejected or the auth endpoint could not be reached.
	#[error("Unable to obtain token.")]
	TokenUnavailable {
		/// HTTP status returned by the auth endpoint, when one was received.
		status: Option<u16>,
		/// Underlying failure, when one was raised.
		#[source]
		source: Option<BoxError>,
	},
}
impl Error {
	pub(crate) fn token_unavailable(status: Option<u16>) -> Self {
		Self::TokenUnavailable { status, source: None }
	}

	pub(crate) fn token_unavailable_with(
		status: Option<u16>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::TokenUnavailable { status, source: Some(Box::new(src)) }
	}

	/// Returns the HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(err) => Some(err.status),
			Self::TokenUnavailable { status, .. } => *status,
			_ => None,
		}
	}
}

/// Configuration and request-construction failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// A required configuration value is missing or blank.
	#[error("Configuration is missing the `{field}` field.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// An endpoint (or an endpoint joined with a path) is not a valid URL.
	#[error("The {endpoint} endpoint is not a valid URL: {value}.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// The rejected value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A caller-supplied or configured header cannot be encoded.
	#[error("Header `{name}` is not a valid HTTP header.")]
	InvalidHeader {
		/// Header name as supplied.
		name: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Which side of the exchange the failing status code blames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSide {
	/// Status codes below 500.
	Client,
	/// Status codes 500 and above.
	Server,
}
impl ErrorSide {
	/// Classifies an HTTP status code.
	pub const fn of(status: u16) -> Self {
		if status < 500 { Self::Client } else { Self::Server }
	}

	/// Returns the label used in error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Client => "Client",
			Self::Server => "Server",
		}
	}
}
impl Display for ErrorSide {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Structured failure for a non-2xx API response.
///
/// The `Display` output follows the vendor SDK convention,
/// `"{status} {Client|Server} Error (Trade-Id: {trace-id})"`; the parenthetical is omitted when the
/// response carried no `trace-id` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Client/Server classification derived from `status`.
	pub side: ErrorSide,
	/// Value of the `trace-id` response header, if present.
	pub trace_id: Option<String>,
	/// Server-requested wait for 429 responses that exceeded the configured ceiling.
	pub retry_after: Option<Duration>,
	/// Truncated response body for diagnostics.
	pub body_preview: String,
}
impl ApiError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Creates an error for the given status with no trace id or body.
	pub fn new(status: u16) -> Self {
		Self {
			status,
			side: ErrorSide::of(status),
			trace_id: None,
			retry_after: None,
			body_preview: String::new(),
		}
	}

	/// Attaches the trace identifier.
	pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
		self.trace_id = Some(trace_id.into());

		self
	}

	/// Attaches the server-requested wait.
	pub fn with_retry_after(mut self, wait: Duration) -> Self {
		self.retry_after = Some(wait);

		self
	}

	/// Attaches a truncated copy of the response body.
	pub fn with_body_preview(mut self, body: &str) -> Self {
		self.body_preview = truncate_preview(body);

		self
	}

	/// Returns `true` for 5xx statuses.
	pub fn is_server_error(&self) -> bool {
		matches!(self.side, ErrorSide::Server)
	}
}
impl Display for ApiError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {} Error", self.status, self.side)?;

		if let Some(trace_id) = &self.trace_id {
			write!(f, " (Trade-Id: {trace_id})")?;
		}

		Ok(())
	}
}
impl StdError for ApiError {}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= ApiError::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(ApiError::BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}
