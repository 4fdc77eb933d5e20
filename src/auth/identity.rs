//! Signing material handed to transports once a strategy has been resolved.

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Location of the API signing key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrivateKey {
	/// PEM supplied inline through configuration.
	Inline(Secret),
	/// PEM stored on disk (`key_file` in an OCI config profile).
	File(PathBuf),
}

/// Everything a transport needs to sign Fusion Applications requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningIdentity {
	/// Tenancy OCID.
	pub tenancy: String,
	/// User OCID.
	pub user: String,
	/// Fingerprint of the API signing key.
	pub fingerprint: String,
	/// Region identifier (e.g. `us-ashburn-1`).
	pub region: String,
	/// Signing key.
	pub private_key: PrivateKey,
	/// Passphrase protecting the signing key, if any.
	pub passphrase: Option<Secret>,
}
impl SigningIdentity {
	/// Returns the `keyId` used in OCI request signatures.
	pub fn key_id(&self) -> String {
		format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
	}

	/// Regional Fusion Applications endpoint.
	pub fn endpoint(&self) -> Result<Url, ConfigError> {
		Url::parse(&format!("https://fusionapps.{}.oci.oraclecloud.com", self.region))
			.map_err(|source| ConfigError::InvalidRegion { region: self.region.clone(), source })
	}

	/// Replaces the passphrase when `passphrase` is non-empty.
	pub(crate) fn with_passphrase_override(mut self, passphrase: &Secret) -> Self {
		if !passphrase.is_empty() {
			self.passphrase = Some(passphrase.clone());
		}

		self
	}
}
