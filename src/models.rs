//! Plain data-transfer records exchanged with the API.
//!
//! Every record implements [`JsonModel`], which parses text with path-aware errors, runs
//! field-level validation, and serializes through [`remove_nulls`] so absent fields are never
//! emitted. Classification fields the API sends as strings stay strings on the record and expose
//! typed getters backed by the enums in [`kind`].

pub mod enclave;
pub mod indicator;
pub mod indicator_summary;
pub mod intelligence_source;
pub mod json;
pub mod kind;
pub mod page;
pub mod report;
pub mod request_quota;
pub mod tag;

pub use enclave::*;
pub use indicator::*;
pub use indicator_summary::*;
pub use intelligence_source::*;
pub use json::*;
pub use kind::*;
pub use page::*;
pub use report::*;
pub use request_quota::*;
pub use tag::*;
