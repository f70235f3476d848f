//! Request descriptors accepted by [`ApiClient::execute`](crate::client::ApiClient::execute).

// crates.io
use http::Method;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	models::{self, ModelError},
};

/// One API call relative to the configured API endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path joined onto the API endpoint, e.g. `"reports/search"`.
	pub path: String,
	/// Extra headers merged over the client defaults; later entries win.
	pub headers: Vec<(String, String)>,
	/// Query parameters appended in order.
	pub query: Vec<(String, String)>,
	/// Optional JSON body.
	pub body: Option<Value>,
}
impl ApiRequest {
	/// Creates a request with no headers, query, or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), headers: Vec::new(), query: Vec::new(), body: None }
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Adds a header that overrides any client default with the same name.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Appends a query parameter.
	pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((name.into(), value.into()));

		self
	}

	/// Attaches a JSON body after stripping null entries.
	pub fn with_body(mut self, mut body: Value) -> Self {
		models::remove_nulls(&mut body);

		self.body = Some(body);

		self
	}

	/// Serializes `body` and attaches it via [`ApiRequest::with_body`].
	pub fn with_json<T>(self, body: &T) -> Result<Self, ModelError>
	where
		T: ?Sized + Serialize,
	{
		let value = serde_json::to_value(body)
			.map_err(|source| ModelError::Serialize { model: "ApiRequest", source })?;

		Ok(self.with_body(value))
	}

	/// Whether the request is sent with `Content-Type: application/json`.
	pub fn is_json(&self) -> bool {
		self.method == Method::POST || self.method == Method::PUT
	}

	pub(crate) fn encoded_body(&self) -> Result<Vec<u8>, ModelError> {
		match &self.body {
			Some(body) => serde_json::to_vec(body)
				.map_err(|source| ModelError::Serialize { model: "ApiRequest", source }),
			None => Ok(Vec::new()),
		}
	}
}
