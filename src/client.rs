//! Remote API boundary for the Fusion Applications "list admin users" operation.
//!
//! [`FusionClient`] is the crate's only dependency on a transport. Implementations own
//! request signing (see [`crate::auth::SigningIdentity`]), HTTP, and retries; the
//! connector only sees decoded [`AdminUserPage`] values or an [`ApiError`]. The in-process
//! [`MemoryFusionClient`] backs tests and demos.

pub mod memory;

pub use memory::MemoryFusionClient;

// crates.io
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, auth::EnvironmentId};

/// Boxed future returned by [`FusionClient`] operations.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + 'a + Send>>;

/// Transport-agnostic client for the Fusion Applications API.
pub trait FusionClient
where
	Self: Send + Sync,
{
	/// Lists admin users of one Fusion environment.
	///
	/// Returns one page; `next_page` is set when the service reports more results.
	fn list_admin_users(&self, request: ListAdminUsersRequest) -> ClientFuture<'_, AdminUserPage>;
}

/// Parameters of a `ListAdminUsers` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListAdminUsersRequest {
	/// Environment whose admin users are listed.
	pub fusion_environment_id: EnvironmentId,
	/// Upstream page cursor (`opc-next-page`) from a previous response.
	pub page: Option<String>,
}
impl ListAdminUsersRequest {
	/// Requests the first page for `environment`.
	pub fn new(environment: EnvironmentId) -> Self {
		Self { fusion_environment_id: environment, page: None }
	}

	/// Resumes after the page that returned `page`.
	pub fn with_page(mut self, page: impl Into<String>) -> Self {
		self.page = Some(page.into());

		self
	}
}

/// Admin user record as returned by the service. Every field may be absent on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserSummary {
	/// Given name.
	pub first_name: Option<String>,
	/// Family name.
	pub last_name: Option<String>,
	/// Sign-in name; unique within the environment.
	pub username: Option<String>,
	/// Contact address.
	pub email_address: Option<String>,
}

/// Response body of `ListAdminUsers`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserCollection {
	/// Records on this page.
	#[serde(default)]
	pub items: Vec<AdminUserSummary>,
}

/// Decoded page plus the upstream continuation cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminUserPage {
	/// Records on this page.
	pub items: Vec<AdminUserSummary>,
	/// Value of the `opc-next-page` response header, if any.
	pub next_page: Option<String>,
}
impl AdminUserPage {
	/// Decodes a JSON response body, reporting the failing path on malformed payloads.
	pub fn from_json(body: &[u8], next_page: Option<String>) -> Result<Self, ApiError> {
		let mut de = serde_json::Deserializer::from_slice(body);
		let collection: AdminUserCollection = serde_path_to_error::deserialize(&mut de)
			.map_err(|e| {
				ApiError::new(format!("malformed admin user payload at `{}`: {}", e.path(), e.inner()))
			})?;

		Ok(Self { items: collection.items, next_page: next_page.filter(|page| !page.is_empty()) })
	}
}

/// Failure categories used to route [`ApiError`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
	/// Credentials were rejected.
	Unauthenticated,
	/// Request was throttled.
	Throttled,
	/// Temporary network or server failure.
	Transient,
	/// Request rejected for any other reason.
	Rejected,
}
impl ApiErrorKind {
	/// Returns true for [`ApiErrorKind::Unauthenticated`].
	pub fn is_unauthenticated(self) -> bool {
		matches!(self, ApiErrorKind::Unauthenticated)
	}
}

/// Failure reported by a [`FusionClient`].
///
/// Construct values with [`ApiError::new`] and the `with_*` helpers so additional fields
/// can be added without breaking transports.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Fusion Applications API error: {message}")]
pub struct ApiError {
	/// HTTP status, when a response was received.
	pub status: Option<u16>,
	/// Service error code (e.g. `NotAuthenticated`).
	pub code: Option<String>,
	/// Human-readable message.
	pub message: String,
	/// Retry-After hint, when the service supplied one.
	pub retry_after: Option<Duration>,
	/// Indicates the request never produced a response.
	pub network: bool,
}
impl ApiError {
	/// Creates an error carrying only a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { status: None, code: None, message: message.into(), retry_after: None, network: false }
	}

	/// Convenience constructor for transport-level failures.
	pub fn network(message: impl Into<String>) -> Self {
		let mut err = Self::new(message);

		err.network = true;

		err
	}

	/// Adds the HTTP status code.
	pub fn with_status(mut self, status: u16) -> Self {
		self.status = Some(status);

		self
	}

	/// Adds the service error code.
	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());

		self
	}

	/// Parses a raw `Retry-After` header (delta seconds or an RFC 2822 date).
	pub fn with_retry_after_header(mut self, raw: &str) -> Self {
		self.retry_after = parse_retry_after(raw, OffsetDateTime::now_utc());

		self
	}

	/// Classifies the failure: network flag first, then the service code, then the status.
	pub fn kind(&self) -> ApiErrorKind {
		if self.network {
			return ApiErrorKind::Transient;
		}

		self.code.as_deref().and_then(classify_code).unwrap_or_else(|| classify_status(self.status))
	}
}

fn classify_code(code: &str) -> Option<ApiErrorKind> {
	if code.eq_ignore_ascii_case("NotAuthenticated") {
		Some(ApiErrorKind::Unauthenticated)
	} else if code.eq_ignore_ascii_case("TooManyRequests") {
		Some(ApiErrorKind::Throttled)
	} else if code.eq_ignore_ascii_case("InternalServerError")
		|| code.eq_ignore_ascii_case("ServiceUnavailable")
	{
		Some(ApiErrorKind::Transient)
	} else {
		None
	}
}

fn classify_status(status: Option<u16>) -> ApiErrorKind {
	match status {
		Some(401) => ApiErrorKind::Unauthenticated,
		Some(429) => ApiErrorKind::Throttled,
		Some(code) if code >= 500 => ApiErrorKind::Transient,
		None => ApiErrorKind::Transient,
		_ => ApiErrorKind::Rejected,
	}
}

fn parse_retry_after(raw: &str, now: OffsetDateTime) -> Option<Duration> {
	let raw = raw.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - now;

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
