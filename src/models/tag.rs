//! Tags attached to reports and indicators.

// self
use crate::{_prelude::*, models::JsonModel};

/// Label applied to reports or indicators within an enclave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
	/// Tag name, e.g. `"malicious"`.
	pub name: String,
	/// Tag identifier.
	pub id: Option<String>,
	/// Enclave the tag belongs to.
	pub enclave_id: Option<String>,
}
impl Tag {
	/// Creates a tag with only a name.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), id: None, enclave_id: None }
	}

	/// Sets the tag identifier.
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());

		self
	}

	/// Sets the owning enclave.
	pub fn with_enclave_id(mut self, enclave_id: impl Into<String>) -> Self {
		self.enclave_id = Some(enclave_id.into());

		self
	}
}
impl JsonModel for Tag {
	const NAME: &'static str = "Tag";
}
