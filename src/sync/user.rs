//! Admin users: mapping into normalized user resources and the syncer that lists them.
//!
//! Users carry a [`UserTrait`] because they are the shape of a standard identity. They
//! expose no entitlements or grants of their own.

// self
use crate::{
	_prelude::*,
	auth::{ResourceTypeId, Session},
	client::{AdminUserSummary, FusionClient, ListAdminUsersRequest},
	obs::{self, CallSpan, Operation},
	resource::{
		Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceTrait, ResourceType,
		UserStatus, UserTrait,
	},
	sync::{ResourceSyncer, SyncFuture, token},
};

/// Identifier of the user resource type.
pub const USER_RESOURCE_TYPE: &str = "user";

const LIST_ADMIN_USERS: &str = "list_admin_users";

/// Errors raised while converting an [`AdminUserSummary`] into a [`Resource`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum MappingError {
	/// The upstream record omitted a field the normalized shape requires.
	#[error("Admin user record is missing `{field}`.")]
	MissingField {
		/// Wire name of the missing field.
		field: &'static str,
	},
}

/// Resource type registered for admin users.
pub fn user_resource_type() -> ResourceType {
	ResourceType {
		id: ResourceTypeId::from_static(USER_RESOURCE_TYPE),
		display_name: "User".into(),
		traits: vec![ResourceTrait::User],
	}
}

/// Maps one admin user into a user resource.
///
/// The display name is `"{first} {last}"`, the resource id is the username, the profile
/// carries `first_name`/`last_name`, the email is recorded as primary, and the status is
/// always [`UserStatus::Enabled`] because the service only lists active admins.
pub fn user_resource(user: &AdminUserSummary) -> Result<Resource, MappingError> {
	let first_name = require(&user.first_name, "firstName")?;
	let last_name = require(&user.last_name, "lastName")?;
	let username = require(&user.username, "username")?;
	let email = require(&user.email_address, "emailAddress")?;
	let profile = BTreeMap::from([
		("first_name".to_owned(), first_name.into()),
		("last_name".to_owned(), last_name.into()),
	]);
	let user_trait = UserTrait::builder()
		.profile(profile)
		.email(email, true)
		.status(UserStatus::Enabled)
		.build();

	Ok(Resource::user(
		format!("{first_name} {last_name}"),
		&user_resource_type(),
		username,
		user_trait,
	))
}

fn require<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, MappingError> {
	value.as_deref().ok_or(MappingError::MissingField { field })
}

/// Lists the admin users of the session's environment.
pub struct UserSyncer<C>
where
	C: ?Sized + FusionClient,
{
	client: Arc<C>,
	session: Arc<Session>,
	resource_type: ResourceType,
}
impl<C> UserSyncer<C>
where
	C: ?Sized + FusionClient,
{
	/// Creates a syncer bound to `session`.
	pub fn new(client: Arc<C>, session: Arc<Session>) -> Self {
		Self { client, session, resource_type: user_resource_type() }
	}

	async fn list_page(&self, token: &PageToken) -> Result<Page<Resource>> {
		let cursor = token::decode(&self.resource_type.id, token);

		#[cfg(feature = "tracing")]
		if cursor.is_none() && !token.is_empty() {
			tracing::debug!("page token was not issued by this syncer; listing from the start");
		}

		let mut request = ListAdminUsersRequest::new(self.session.environment().clone());

		if let Some(page) = cursor {
			request = request.with_page(page);
		}

		let page = self
			.client
			.list_admin_users(request)
			.await
			.map_err(|e| Error::remote(LIST_ADMIN_USERS, e))?;
		let resources =
			page.items.iter().map(user_resource).collect::<Result<Vec<_>, MappingError>>()?;

		#[cfg(feature = "tracing")]
		tracing::debug!(
			count = resources.len(),
			has_next = page.next_page.is_some(),
			"listed admin users"
		);

		Ok(Page::new(resources, token::encode(&self.resource_type.id, page.next_page)))
	}
}
impl<C> Debug for UserSyncer<C>
where
	C: ?Sized + FusionClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UserSyncer")
			.field("resource_type", &self.resource_type.id)
			.field("session", &self.session)
			.finish()
	}
}
impl<C> ResourceSyncer for UserSyncer<C>
where
	C: ?Sized + FusionClient,
{
	fn resource_type(&self) -> &ResourceType {
		&self.resource_type
	}

	fn list<'a>(
		&'a self,
		_parent: Option<&'a ResourceId>,
		token: &'a PageToken,
	) -> SyncFuture<'a, Page<Resource>> {
		let span = CallSpan::syncer(Operation::List, &self.resource_type.id);

		Box::pin(obs::observe(span, self.list_page(token)))
	}

	fn entitlements<'a>(
		&'a self,
		_resource: &'a Resource,
		_token: &'a PageToken,
	) -> SyncFuture<'a, Page<Entitlement>> {
		let span = CallSpan::syncer(Operation::Entitlements, &self.resource_type.id);

		Box::pin(obs::observe(span, async { Ok(Page::empty()) }))
	}

	fn grants<'a>(
		&'a self,
		_resource: &'a Resource,
		_token: &'a PageToken,
	) -> SyncFuture<'a, Page<Grant>> {
		let span = CallSpan::syncer(Operation::Grants, &self.resource_type.id);

		Box::pin(obs::observe(span, async { Ok(Page::empty()) }))
	}
}
