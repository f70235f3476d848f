//! Enclaves and the caller's permissions on them.

// self
use crate::{
	_prelude::*,
	models::{EnclaveType, JsonModel},
};

/// A sharing group that reports and indicators are distributed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclave {
	/// Unique enclave identifier.
	pub id: String,
	/// Display name.
	pub name: Option<String>,
	/// Enclave category as sent by the API; see [`Enclave::kind`].
	#[serde(rename = "type")]
	pub enclave_type: Option<String>,
}
impl Enclave {
	/// Creates an enclave reference from its identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), name: None, enclave_type: None }
	}

	/// Sets the display name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the enclave category.
	pub fn with_type(mut self, kind: EnclaveType) -> Self {
		self.enclave_type = Some(kind.as_str().into());

		self
	}

	/// Returns the category when it is one of the known [`EnclaveType`] values.
	pub fn kind(&self) -> Option<EnclaveType> {
		self.enclave_type.as_deref().and_then(|value| value.parse().ok())
	}
}
impl JsonModel for Enclave {
	const NAME: &'static str = "Enclave";
}

/// An enclave together with the access the current user or company holds on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclavePermissions {
	/// The enclave itself.
	#[serde(flatten)]
	pub enclave: Enclave,
	/// Read access.
	pub read: Option<bool>,
	/// Create access.
	pub create: Option<bool>,
	/// Update access.
	pub update: Option<bool>,
}
impl EnclavePermissions {
	/// Creates a permission record with no access flags set.
	pub fn new(enclave: Enclave) -> Self {
		Self { enclave, read: None, create: None, update: None }
	}

	/// Sets all three access flags.
	pub fn with_access(mut self, read: bool, create: bool, update: bool) -> Self {
		self.read = Some(read);
		self.create = Some(create);
		self.update = Some(update);

		self
	}

	/// Returns `true` only when read access is explicitly granted.
	pub fn can_read(&self) -> bool {
		self.read == Some(true)
	}

	/// Returns `true` only when create access is explicitly granted.
	pub fn can_create(&self) -> bool {
		self.create == Some(true)
	}

	/// Returns `true` only when update access is explicitly granted.
	pub fn can_update(&self) -> bool {
		self.update == Some(true)
	}
}
impl JsonModel for EnclavePermissions {
	const NAME: &'static str = "EnclavePermissions";
}
