//! Pagination parameters shared by list endpoints.

// self
use crate::_prelude::*;

/// Optional page selection; unset fields are omitted from the query string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	/// One-based page number.
	pub page: Option<u32>,
	/// Items per page.
	pub page_size: Option<u32>,
}
impl Pagination {
	/// Selects a page and page size.
	pub fn new(page: u32, page_size: u32) -> Self {
		Self { page: Some(page), page_size: Some(page_size) }
	}

	pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();

		if let Some(page) = self.page {
			pairs.push(("page".into(), page.to_string()));
		}
		if let Some(page_size) = self.page_size {
			pairs.push(("page_size".into(), page_size.to_string()));
		}

		pairs
	}
}
