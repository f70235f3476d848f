//! Third-party intelligence sources referenced by indicator summaries.

// self
use crate::{_prelude::*, models::JsonModel};

/// A source of enrichment data, e.g. `virustotal` / `VirusTotal`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelligenceSource {
	/// Machine identifier of the source.
	pub key: Option<String>,
	/// Human-readable source name.
	pub name: Option<String>,
}
impl IntelligenceSource {
	/// Creates a source with both identifiers set.
	pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
		Self { key: Some(key.into()), name: Some(name.into()) }
	}
}
impl JsonModel for IntelligenceSource {
	const NAME: &'static str = "IntelligenceSource";
}
