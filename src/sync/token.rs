//! Encoding of upstream page cursors into host-facing [`PageToken`]s.
//!
//! A token is URL-safe base64 (no padding) over `"{resource_type}:{cursor}"`. Resource
//! type ids never contain `:`, so the first colon always splits the two parts.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{auth::ResourceTypeId, resource::PageToken};

/// Wraps `next_page` for `resource_type`; `None` or an empty cursor yields the end-of-data
/// token.
pub fn encode(resource_type: &ResourceTypeId, next_page: Option<String>) -> PageToken {
	match next_page.filter(|page| !page.is_empty()) {
		Some(page) => URL_SAFE_NO_PAD.encode(format!("{resource_type}:{page}")).into(),
		None => PageToken::start(),
	}
}

/// Recovers the upstream cursor issued for `resource_type`.
///
/// Returns `None` for the start token and for any token this resource type did not
/// issue (stale, foreign, or garbage); callers list from the first page in that case.
pub fn decode(resource_type: &ResourceTypeId, token: &PageToken) -> Option<String> {
	if token.is_empty() {
		return None;
	}

	let bytes = URL_SAFE_NO_PAD.decode(token.as_str()).ok()?;
	let text = String::from_utf8(bytes).ok()?;
	let (issuer, page) = text.split_once(':')?;

	(issuer == &**resource_type && !page.is_empty()).then(|| page.to_owned())
}
