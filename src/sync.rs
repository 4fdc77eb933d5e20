//! Pull-based synchronization contract implemented once per resource type.
//!
//! The host calls [`ResourceSyncer::list`] with the empty [`PageToken`], then keeps
//! passing back whatever token the previous call returned until it gets the empty token
//! again. Entitlements and grants follow the same contract per resource.

pub mod token;
pub mod user;

pub use user::*;

// self
use crate::{
	_prelude::*,
	resource::{Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceType},
};

/// Boxed future returned by [`ResourceSyncer`] operations.
pub type SyncFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Capability set every resource type exposes to the host.
pub trait ResourceSyncer
where
	Self: Send + Sync,
{
	/// Shape of the resources this syncer produces.
	fn resource_type(&self) -> &ResourceType;

	/// Lists one page of resources, optionally scoped to `parent`.
	fn list<'a>(
		&'a self,
		parent: Option<&'a ResourceId>,
		token: &'a PageToken,
	) -> SyncFuture<'a, Page<Resource>>;

	/// Lists one page of entitlements offered by `resource`.
	fn entitlements<'a>(
		&'a self,
		resource: &'a Resource,
		token: &'a PageToken,
	) -> SyncFuture<'a, Page<Entitlement>>;

	/// Lists one page of grants on `resource`.
	fn grants<'a>(
		&'a self,
		resource: &'a Resource,
		token: &'a PageToken,
	) -> SyncFuture<'a, Page<Grant>>;
}

/// Drives [`ResourceSyncer::list`] from the start token until the end-of-data token,
/// the way a host pagination loop does.
pub async fn list_all(
	syncer: &dyn ResourceSyncer,
	parent: Option<&ResourceId>,
) -> Result<Vec<Resource>> {
	let mut resources = Vec::new();
	let mut token = PageToken::start();

	loop {
		let page = syncer.list(parent, &token).await?;

		resources.extend(page.items);

		if page.next_page_token.is_empty() {
			return Ok(resources);
		}

		token = page.next_page_token;
	}
}
