//! Connector orchestrator exposed to the governance host.

// self
use crate::{
	_prelude::*,
	auth::{self, Session},
	client::{FusionClient, ListAdminUsersRequest},
	config::ConnectorConfig,
	obs::{self, CallSpan, Operation},
	resource::{Asset, AssetRef, ConnectorMetadata, ResourceType},
	sync::{ResourceSyncer, UserSyncer},
};

/// Name shown by the host for this connector.
pub const DISPLAY_NAME: &str = "OracleFusionCloud";
/// One-line description shown by the host.
pub const DESCRIPTION: &str = "Connector syncing Oracle Fusion Cloud admin users to Baton";

/// Owns the resolved [`Session`] and the syncers registered with the host.
///
/// Every syncer shares the same session and client; the connector never builds a second
/// credential strategy after construction.
pub struct FusionConnector<C>
where
	C: ?Sized + FusionClient,
{
	client: Arc<C>,
	session: Arc<Session>,
	syncers: Vec<Arc<dyn ResourceSyncer>>,
}
impl<C> FusionConnector<C>
where
	C: 'static + ?Sized + FusionClient,
{
	/// Creates a connector over an already resolved session.
	pub fn new(session: Arc<Session>, client: impl Into<Arc<C>>) -> Self {
		let client = client.into();
		let syncers: Vec<Arc<dyn ResourceSyncer>> =
			vec![Arc::new(UserSyncer::new(client.clone(), session.clone()))];

		Self { client, session, syncers }
	}

	/// Resolves `config` and creates a connector over `client`.
	///
	/// Configuration problems surface here, before any remote call is attempted.
	pub fn from_config(config: &ConnectorConfig, client: impl Into<Arc<C>>) -> Result<Self> {
		let session = auth::resolve(config)?;

		Ok(Self::new(Arc::new(session), client))
	}

	/// Session shared by every syncer.
	pub fn session(&self) -> &Arc<Session> {
		&self.session
	}

	/// Static description of the connector.
	pub fn metadata(&self) -> ConnectorMetadata {
		ConnectorMetadata { display_name: DISPLAY_NAME.into(), description: DESCRIPTION.into() }
	}

	/// Probes the API with the resolved credentials.
	///
	/// Deferred credential discovery runs first so missing default credentials surface
	/// as [`Error::Config`]. Any failure of the probe itself is reported as
	/// [`Error::Authentication`].
	pub async fn validate(&self) -> Result<()> {
		obs::observe(CallSpan::connector(Operation::Validate), async {
			self.session.signing_identity()?;

			let request = ListAdminUsersRequest::new(self.session.environment().clone());

			match self.client.list_admin_users(request).await {
				Ok(_) => Ok(()),
				Err(e) => {
					#[cfg(feature = "tracing")]
					tracing::warn!(error = %e, "validation probe failed");

					Err(Error::Authentication { reason: e.to_string() })
				},
			}
		})
		.await
	}

	/// Syncers registered with the host, users first.
	pub fn resource_syncers(&self) -> &[Arc<dyn ResourceSyncer>] {
		&self.syncers
	}

	/// Resource types of every registered syncer, in registration order.
	pub fn resource_types(&self) -> Vec<ResourceType> {
		self.syncers.iter().map(|syncer| syncer.resource_type().clone()).collect()
	}

	/// Fetches a binary asset. No asset kinds are served.
	pub async fn asset(&self, asset: &AssetRef) -> Result<Asset> {
		obs::observe(CallSpan::connector(Operation::Asset), async {
			#[cfg(feature = "tracing")]
			tracing::debug!(asset = %asset.id, "asset requested");
			#[cfg(not(feature = "tracing"))]
			let _ = asset;

			Err(Error::Unsupported { capability: "asset" })
		})
		.await
	}
}
impl<C> Debug for FusionConnector<C>
where
	C: ?Sized + FusionClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FusionConnector")
			.field("session", &self.session)
			.field("syncers", &self.syncers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, client::MemoryFusionClient};

	#[test]
	fn metadata_is_static() {
		let (connector, _) = build_memory_test_connector(Vec::new());
		let metadata = connector.metadata();

		assert_eq!(metadata.display_name, "OracleFusionCloud");
		assert_eq!(metadata.description, DESCRIPTION);
	}

	#[test]
	fn from_config_rejects_missing_environment() {
		let config = ConnectorConfig { fusion_environment_id: String::new(), ..raw_test_config() };
		let err = FusionConnector::<MemoryFusionClient>::from_config(
			&config,
			MemoryFusionClient::default(),
		)
		.expect_err("Missing environment ids must fail before any call.");

		assert!(matches!(err, Error::Config(crate::error::ConfigError::MissingEnvironmentId)));
	}

	#[tokio::test]
	async fn validate_succeeds_for_seeded_environment() {
		let (connector, client) =
			build_memory_test_connector(vec![admin_user("Ada", "Lovelace", "ada", "ada@x.io")]);

		connector.validate().await.expect("Seeded environments should validate.");

		assert_eq!(client.calls(), 1);
	}
}
