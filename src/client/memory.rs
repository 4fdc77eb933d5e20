//! Thread-safe in-memory [`FusionClient`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::EnvironmentId,
	client::{AdminUserPage, AdminUserSummary, ApiError, ClientFuture, FusionClient, ListAdminUsersRequest},
};

type PageMap = Arc<RwLock<HashMap<EnvironmentId, Vec<Vec<AdminUserSummary>>>>>;

/// In-process client serving seeded admin users page by page.
///
/// Cursors are page indexes rendered as strings. Unknown environments answer with a
/// `404 NotAuthorizedOrNotFound`, mirroring the service. Failures queued with
/// [`fail_next`](Self::fail_next) are returned (in order) before any data is served.
#[derive(Clone, Debug, Default)]
pub struct MemoryFusionClient {
	pages: PageMap,
	failures: Arc<Mutex<Vec<ApiError>>>,
	requests: Arc<Mutex<Vec<ListAdminUsersRequest>>>,
}
impl MemoryFusionClient {
	/// Replaces the data for `environment` with a single page.
	pub fn seed(&self, environment: EnvironmentId, users: Vec<AdminUserSummary>) {
		self.seed_pages(environment, vec![users]);
	}

	/// Replaces the data for `environment` with the provided pages.
	pub fn seed_pages(&self, environment: EnvironmentId, pages: Vec<Vec<AdminUserSummary>>) {
		self.pages.write().insert(environment, pages);
	}

	/// Queues a failure for the next call.
	pub fn fail_next(&self, error: ApiError) {
		self.failures.lock().push(error);
	}

	/// Requests received so far, oldest first.
	pub fn requests(&self) -> Vec<ListAdminUsersRequest> {
		self.requests.lock().clone()
	}

	/// Number of calls received so far.
	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}

	fn list_now(
		pages: PageMap,
		failures: Arc<Mutex<Vec<ApiError>>>,
		request: ListAdminUsersRequest,
	) -> Result<AdminUserPage, ApiError> {
		{
			let mut queued = failures.lock();

			if !queued.is_empty() {
				return Err(queued.remove(0));
			}
		}

		let guard = pages.read();
		let env_pages = guard.get(&request.fusion_environment_id).ok_or_else(|| {
			ApiError::new(format!(
				"environment {} not found",
				request.fusion_environment_id
			))
			.with_status(404)
			.with_code("NotAuthorizedOrNotFound")
		})?;
		let index = match request.page.as_deref() {
			None => 0,
			Some(raw) => raw.parse::<usize>().map_err(|_| {
				ApiError::new(format!("invalid page `{raw}`"))
					.with_status(400)
					.with_code("InvalidParameter")
			})?,
		};
		let items = env_pages.get(index).cloned().unwrap_or_default();
		let next_page = (index + 1 < env_pages.len()).then(|| (index + 1).to_string());

		Ok(AdminUserPage { items, next_page })
	}
}
impl FusionClient for MemoryFusionClient {
	fn list_admin_users(&self, request: ListAdminUsersRequest) -> ClientFuture<'_, AdminUserPage> {
		let pages = self.pages.clone();
		let failures = self.failures.clone();

		self.requests.lock().push(request.clone());

		Box::pin(async move { Self::list_now(pages, failures, request) })
	}
}
