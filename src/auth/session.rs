//! Validated handle to one Fusion environment.

// std
use std::sync::OnceLock;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::{AuthProvider, AuthProviderKind, EnvironmentId, SigningIdentity},
	error::ConfigError,
};

/// Environment binding plus the single credential strategy chosen for it.
///
/// Sessions are immutable after [`crate::auth::resolve`] and are shared by reference
/// across every syncer the connector registers.
pub struct Session {
	environment: EnvironmentId,
	provider: AuthProvider,
	fingerprint_cache: OnceLock<String>,
}
impl Session {
	/// Binds `provider` to `environment`.
	pub fn new(environment: EnvironmentId, provider: AuthProvider) -> Self {
		Self { environment, provider, fingerprint_cache: OnceLock::new() }
	}

	/// Environment every call is scoped to.
	pub fn environment(&self) -> &EnvironmentId {
		&self.environment
	}

	/// Credential strategy backing the session.
	pub fn provider(&self) -> &AuthProvider {
		&self.provider
	}

	/// Shorthand for `self.provider().kind()`.
	pub fn provider_kind(&self) -> AuthProviderKind {
		self.provider.kind()
	}

	/// Signing material for transports; runs deferred discovery on first use.
	pub fn signing_identity(&self) -> Result<SigningIdentity, ConfigError> {
		self.provider.signing_identity()
	}

	/// Stable, secret-free digest identifying this session in logs.
	///
	/// Base64 (no padding) SHA-256 over the strategy label, environment, and the non-secret
	/// identity fields when they were loaded eagerly. Deferred discovery is never triggered.
	pub fn fingerprint(&self) -> &str {
		self.fingerprint_cache.get_or_init(|| {
			let mut hasher = Sha256::new();

			hasher.update(self.provider.kind().as_str());
			hasher.update([0_u8]);
			hasher.update(self.environment.as_bytes());

			if let Some(identity) = self.provider.loaded_identity() {
				for part in [&identity.tenancy, &identity.user, &identity.fingerprint, &identity.region]
				{
					hasher.update([0_u8]);
					hasher.update(part.as_bytes());
				}
			}

			STANDARD_NO_PAD.encode(hasher.finalize())
		})
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("environment", &self.environment)
			.field("provider", &self.provider.kind())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::{DefaultDiscovery, PrivateKey};

	fn raw(user: &str) -> AuthProvider {
		AuthProvider::Raw(SigningIdentity {
			tenancy: "t".into(),
			user: user.into(),
			fingerprint: "f".into(),
			region: "r".into(),
			private_key: PrivateKey::Inline("k".into()),
			passphrase: Some("p".into()),
		})
	}

	fn env(id: &str) -> EnvironmentId {
		EnvironmentId::new(id).expect("Environment fixture should be valid.")
	}

	#[test]
	fn fingerprint_is_stable_and_identity_sensitive() {
		let a = Session::new(env("ocid1.fusionenvironment.oc1..one"), raw("u1"));
		let b = Session::new(env("ocid1.fusionenvironment.oc1..one"), raw("u1"));
		let c = Session::new(env("ocid1.fusionenvironment.oc1..one"), raw("u2"));

		assert_eq!(a.fingerprint(), b.fingerprint());
		assert_ne!(a.fingerprint(), c.fingerprint());
		assert!(!a.fingerprint().contains('='));
	}

	#[test]
	fn fingerprint_does_not_trigger_default_discovery() {
		let session =
			Session::new(env("ocid1.fusionenvironment.oc1..one"), AuthProvider::EnvironmentDefault(DefaultDiscovery::default()));

		assert!(!session.fingerprint().is_empty());
		assert_eq!(session.provider_kind(), AuthProviderKind::EnvironmentDefault);
	}

	#[test]
	fn debug_output_hides_identity() {
		let rendered = format!("{:?}", Session::new(env("ocid1.fusionenvironment.oc1..one"), raw("secret-user")));

		assert!(rendered.contains("Raw"));
		assert!(!rendered.contains("secret-user"));
	}
}
