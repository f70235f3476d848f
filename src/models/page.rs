//! Numbered pagination envelope.

// self
use crate::{
	_prelude::*,
	models::{JsonModel, ModelError},
};

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedPage<T> {
	/// Items on this page.
	pub items: Option<Vec<T>>,
	/// Zero-based page index.
	pub page_number: Option<u64>,
	/// Maximum items per page.
	pub page_size: Option<u64>,
	/// Items across all pages.
	pub total_elements: Option<u64>,
	/// Explicit continuation flag, when the server sends one.
	pub has_next: Option<bool>,
}
impl<T> NumberedPage<T> {
	/// Creates a page holding `items`.
	pub fn new(items: Vec<T>) -> Self {
		Self { items: Some(items), page_number: None, page_size: None, total_elements: None, has_next: None }
	}

	/// Sets the page position and totals.
	pub fn with_position(mut self, page_number: u64, page_size: u64, total_elements: u64) -> Self {
		self.page_number = Some(page_number);
		self.page_size = Some(page_size);
		self.total_elements = Some(total_elements);

		self
	}

	/// Sets the explicit continuation flag.
	pub fn with_has_next(mut self, has_next: bool) -> Self {
		self.has_next = Some(has_next);

		self
	}

	/// Number of pages, when both totals are known and the page size is non-zero.
	pub fn total_pages(&self) -> Option<u64> {
		match (self.total_elements, self.page_size) {
			(Some(total), Some(size)) if size != 0 => Some(total.div_ceil(size)),
			_ => None,
		}
	}

	/// Whether another page follows; `hasNext` wins over the derived answer.
	pub fn has_more_pages(&self) -> Option<bool> {
		if let Some(has_next) = self.has_next {
			return Some(has_next);
		}

		let total_pages = self.total_pages()?;

		self.page_number.map(|page| page.saturating_add(1) < total_pages)
	}

	/// Borrows the items, empty when none were sent.
	pub fn items(&self) -> &[T] {
		self.items.as_deref().unwrap_or_default()
	}
}
impl<T> JsonModel for NumberedPage<T>
where
	T: JsonModel,
{
	const NAME: &'static str = "NumberedPage";

	fn validate(&self) -> Result<(), ModelError> {
		self.items().iter().try_for_each(T::validate)
	}
}
