#![cfg(feature = "test")]

// self
use fusion_cloud_connector::{
	_preludet::*,
	auth::ResourceTypeId,
	client::{AdminUserSummary, ApiError},
	resource::{PageToken, ResourceTrait, UserStatus},
	sync::{self, ResourceSyncer},
};

fn users(prefix: &str, count: usize) -> Vec<AdminUserSummary> {
	(0..count)
		.map(|i| {
			let username = format!("{prefix}{i}");

			admin_user("First", &format!("Last{i}"), &username, &format!("{username}@x.io"))
		})
		.collect()
}

#[tokio::test]
async fn lists_single_page_and_terminates() {
	let (connector, client) =
		build_memory_test_connector(vec![admin_user("Ada", "Lovelace", "ada", "ada@x.io")]);
	let syncer = &connector.resource_syncers()[0];
	let page = syncer.list(None, &PageToken::start()).await.expect("First page should list.");

	assert_eq!(page.items.len(), 1);
	assert!(page.is_last());

	let resource = &page.items[0];
	let user_trait = resource.user_trait.as_ref().expect("Users should carry a user trait.");

	assert_eq!(resource.display_name, "Ada Lovelace");
	assert_eq!(resource.id.resource, "ada");
	assert_eq!(user_trait.primary_email(), Some("ada@x.io"));
	assert_eq!(user_trait.status, UserStatus::Enabled);
	assert_eq!(client.requests()[0].fusion_environment_id, test_environment());
	assert!(client.requests()[0].page.is_none());
}

#[tokio::test]
async fn multi_page_listing_has_no_duplicates_or_gaps() {
	let (connector, client) = build_memory_test_connector(Vec::new());

	client.seed_pages(test_environment(), vec![users("a", 3), users("b", 2), users("c", 1)]);

	let syncer = &connector.resource_syncers()[0];
	let all = sync::list_all(&**syncer, None).await.expect("Pagination should complete.");
	let mut ids = all.iter().map(|r| r.id.resource.clone()).collect::<Vec<_>>();

	assert_eq!(ids.len(), 6);

	ids.sort();
	ids.dedup();

	assert_eq!(ids.len(), 6);
	assert_eq!(client.calls(), 3);
	assert_eq!(client.requests()[1].page.as_deref(), Some("1"));
	assert_eq!(client.requests()[2].page.as_deref(), Some("2"));
}

#[tokio::test]
async fn empty_environment_yields_empty_last_page() {
	let (connector, _) = build_memory_test_connector(Vec::new());
	let page = connector.resource_syncers()[0]
		.list(None, &PageToken::start())
		.await
		.expect("Empty environments should list.");

	assert!(page.items.is_empty());
	assert!(page.is_last());
}

#[tokio::test]
async fn entitlements_and_grants_are_always_empty() {
	let (connector, _) =
		build_memory_test_connector(vec![admin_user("Ada", "Lovelace", "ada", "ada@x.io")]);
	let syncer = &connector.resource_syncers()[0];
	let resource = sync::list_all(&**syncer, None)
		.await
		.expect("Listing should succeed.")
		.remove(0);

	for token in [PageToken::start(), PageToken::from("anything")] {
		let entitlements =
			syncer.entitlements(&resource, &token).await.expect("Entitlements never fail.");
		let grants = syncer.grants(&resource, &token).await.expect("Grants never fail.");

		assert!(entitlements.items.is_empty() && entitlements.is_last());
		assert!(grants.items.is_empty() && grants.is_last());
	}
}

#[tokio::test]
async fn one_bad_record_fails_the_whole_page() {
	let mut broken = admin_user("Grace", "Hopper", "grace", "grace@x.io");

	broken.username = None;

	let (connector, _) = build_memory_test_connector(vec![
		admin_user("Ada", "Lovelace", "ada", "ada@x.io"),
		broken,
	]);
	let err = connector.resource_syncers()[0]
		.list(None, &PageToken::start())
		.await
		.expect_err("Partial pages must not be emitted.");

	assert!(matches!(err, Error::Mapping(_)));
	assert_eq!(err.to_string(), "Failed to create user resource.");
}

#[tokio::test]
async fn remote_failures_are_wrapped() {
	let (connector, client) = build_memory_test_connector(Vec::new());

	client.fail_next(ApiError::new("boom").with_status(500));

	let err = connector.resource_syncers()[0]
		.list(None, &PageToken::start())
		.await
		.expect_err("Remote failures must propagate.");

	assert!(matches!(err, Error::RemoteCall { operation: "list_admin_users", .. }));

	client.fail_next(ApiError::new("denied").with_code("NotAuthenticated").with_status(401));

	let err = connector.resource_syncers()[0]
		.list(None, &PageToken::start())
		.await
		.expect_err("Credential rejections must propagate.");

	assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn any_token_yields_a_valid_page() {
	let (connector, client) =
		build_memory_test_connector(vec![admin_user("Ada", "Lovelace", "ada", "ada@x.io")]);
	let syncer = &connector.resource_syncers()[0];
	let group = ResourceTypeId::new("group").expect("Resource type fixture should be valid.");
	let foreign = sync::token::encode(&group, Some("2".into()));

	for token in [PageToken::from("not-a-connector-token"), foreign] {
		let page = syncer.list(None, &token).await.expect("Unknown tokens list from the start.");

		assert_eq!(page.items.len(), 1);
		assert!(page.is_last());
	}

	assert_eq!(client.calls(), 2);
	assert!(client.requests().iter().all(|request| request.page.is_none()));
}

#[test]
fn user_syncer_declares_user_type() {
	let (connector, _) = build_memory_test_connector(Vec::new());
	let resource_type = connector.resource_syncers()[0].resource_type();

	assert_eq!(resource_type.id.as_ref(), "user");
	assert_eq!(resource_type.display_name, "User");
	assert_eq!(resource_type.traits, vec![ResourceTrait::User]);
}
