//! Normalized directory model emitted to the governance host: resource types, resources
//! with typed traits, entitlements, grants, and pagination envelopes.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::ResourceTypeId};

/// Trait tags a resource type can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
	/// Identity shaped like a human or service user.
	User,
}

/// Shape descriptor registered with the host for every syncer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
	/// Stable identifier (e.g. `user`).
	pub id: ResourceTypeId,
	/// Human-readable name.
	pub display_name: String,
	/// Traits every resource of this type carries.
	pub traits: Vec<ResourceTrait>,
}

/// Globally unique reference to one resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
	/// Resource type the id belongs to.
	pub resource_type: ResourceTypeId,
	/// Identifier unique within the resource type.
	pub resource: String,
}
impl ResourceId {
	/// Creates a reference to `resource` within `resource_type`.
	pub fn new(resource_type: ResourceTypeId, resource: impl Into<String>) -> Self {
		Self { resource_type, resource: resource.into() }
	}
}
impl Display for ResourceId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}", self.resource_type, self.resource)
	}
}

/// Lifecycle status reported in a [`UserTrait`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
	#[default]
	/// Status not reported by the source.
	Unspecified,
	/// Account can sign in.
	Enabled,
}

/// One email address attached to a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
	/// Address as reported by the source.
	pub address: String,
	/// Marks the primary contact address.
	pub is_primary: bool,
}

/// Attributes describing a user-shaped resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTrait {
	/// Free-form profile attributes.
	pub profile: BTreeMap<String, Value>,
	/// Known email addresses.
	pub emails: Vec<UserEmail>,
	/// Account status.
	pub status: UserStatus,
}
impl UserTrait {
	/// Returns a builder for assembling a trait option by option.
	pub fn builder() -> UserTraitBuilder {
		UserTraitBuilder::default()
	}

	/// Primary email address, if one was recorded.
	pub fn primary_email(&self) -> Option<&str> {
		self.emails.iter().find(|email| email.is_primary).map(|email| email.address.as_str())
	}
}

/// Builder for [`UserTrait`] values.
#[derive(Debug, Default)]
pub struct UserTraitBuilder {
	inner: UserTrait,
}
impl UserTraitBuilder {
	/// Replaces the profile map.
	pub fn profile(mut self, profile: BTreeMap<String, Value>) -> Self {
		self.inner.profile = profile;

		self
	}

	/// Appends an email address.
	pub fn email(mut self, address: impl Into<String>, is_primary: bool) -> Self {
		self.inner.emails.push(UserEmail { address: address.into(), is_primary });

		self
	}

	/// Sets the account status.
	pub fn status(mut self, status: UserStatus) -> Self {
		self.inner.status = status;

		self
	}

	/// Finishes the trait.
	pub fn build(self) -> UserTrait {
		self.inner
	}
}

/// Normalized directory entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
	/// Unique reference.
	pub id: ResourceId,
	/// Human-readable name.
	pub display_name: String,
	/// Parent resource, for hierarchical types.
	pub parent: Option<ResourceId>,
	/// User trait, present on user-shaped resources.
	pub user_trait: Option<UserTrait>,
}
impl Resource {
	/// Creates a top-level user resource.
	pub fn user(
		display_name: impl Into<String>,
		resource_type: &ResourceType,
		id: impl Into<String>,
		user_trait: UserTrait,
	) -> Self {
		Self {
			id: ResourceId::new(resource_type.id.clone(), id),
			display_name: display_name.into(),
			parent: None,
			user_trait: Some(user_trait),
		}
	}
}

/// Access right a resource can grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
	/// Stable identifier.
	pub id: String,
	/// Resource offering the entitlement.
	pub resource: ResourceId,
	/// Human-readable name.
	pub display_name: String,
	/// Resource types that can receive the entitlement.
	pub grantable_to: Vec<ResourceTypeId>,
}

/// Edge recording that `principal` holds `entitlement`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
	/// Stable identifier.
	pub id: String,
	/// Entitlement being held.
	pub entitlement: String,
	/// Holder of the entitlement.
	pub principal: ResourceId,
}

/// Opaque pagination cursor. The empty token starts a listing on input and marks the end
/// of data on output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);
impl PageToken {
	/// Token that starts from the first page.
	pub fn start() -> Self {
		Self::default()
	}

	/// Returns true for the start/end-of-data token.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Raw token text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl From<String> for PageToken {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for PageToken {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Display for PageToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// One page of results plus the token for the next page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
	/// Items on this page.
	pub items: Vec<T>,
	/// Token for the next page; empty when no further pages exist.
	pub next_page_token: PageToken,
}
impl<T> Page<T> {
	/// Page with no items and no continuation.
	pub fn empty() -> Self {
		Self { items: Vec::new(), next_page_token: PageToken::start() }
	}

	/// Page carrying `items` followed by `next_page_token`.
	pub fn new(items: Vec<T>, next_page_token: PageToken) -> Self {
		Self { items, next_page_token }
	}

	/// Returns true when no further pages exist.
	pub fn is_last(&self) -> bool {
		self.next_page_token.is_empty()
	}
}

/// Reference to a binary asset the host may request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
	/// Asset identifier.
	pub id: String,
}

/// Binary asset payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
	/// MIME type of `data`.
	pub content_type: String,
	/// Raw bytes.
	pub data: Vec<u8>,
}

/// Static connector description shown by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
	/// Display name.
	pub display_name: String,
	/// One-line description.
	pub description: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn user_type() -> ResourceType {
		ResourceType {
			id: ResourceTypeId::new("user").expect("Resource type fixture should be valid."),
			display_name: "User".into(),
			traits: vec![ResourceTrait::User],
		}
	}

	#[test]
	fn user_trait_builder_collects_options() {
		let user_trait = UserTrait::builder()
			.email("secondary@x.io", false)
			.email("ada@x.io", true)
			.status(UserStatus::Enabled)
			.build();

		assert_eq!(user_trait.primary_email(), Some("ada@x.io"));
		assert_eq!(user_trait.status, UserStatus::Enabled);
		assert!(user_trait.profile.is_empty());
	}

	#[test]
	fn user_resource_is_top_level() {
		let resource = Resource::user("Ada Lovelace", &user_type(), "ada", UserTrait::default());

		assert_eq!(resource.id.to_string(), "user:ada");
		assert!(resource.parent.is_none());
		assert!(resource.user_trait.is_some());
	}

	#[test]
	fn empty_page_is_last() {
		let page = Page::<Grant>::empty();

		assert!(page.items.is_empty());
		assert!(page.is_last());
		assert!(!Page::new(vec![1], PageToken::from("next")).is_last());
	}

	#[test]
	fn statuses_serialize_as_snake_case() {
		let payload =
			serde_json::to_string(&UserStatus::Enabled).expect("UserStatus should serialize.");

		assert_eq!(payload, "\"enabled\"");
	}

	#[test]
	fn only_emitted_tags_deserialize() {
		assert_eq!(
			serde_json::from_str::<ResourceTrait>("\"user\"").expect("User trait should parse."),
			ResourceTrait::User
		);
		assert!(serde_json::from_str::<ResourceTrait>("\"group\"").is_err());
		assert!(serde_json::from_str::<UserStatus>("\"disabled\"").is_err());
		assert!(serde_json::from_str::<UserStatus>("\"deleted\"").is_err());
	}
}
