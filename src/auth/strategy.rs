//! Credential strategy selection.
//!
//! [`resolve`] turns a [`ConnectorConfig`] into exactly one [`AuthProvider`]. The rule
//! order is externally observable (it decides which credentials sign every request), so
//! the cascade below must stay in this exact shape: the file rules are an if/else-if
//! chain, and complete raw credentials then replace whatever the chain produced.

// std
use std::path::{Path, PathBuf};
// self
use crate::{
	_prelude::*,
	auth::{
		EnvironmentId, PrivateKey, SigningIdentity,
		file::{self, DEFAULT_PROFILE, OciConfigFile},
		session::Session,
	},
	config::ConnectorConfig,
	error::ConfigError,
	obs::{CallSpan, Operation},
};

/// Environment variables consulted by [`DefaultDiscovery`], in signing-identity order.
const ENV_TENANCY: &str = "OCI_CLI_TENANCY";
const ENV_USER: &str = "OCI_CLI_USER";
const ENV_FINGERPRINT: &str = "OCI_CLI_FINGERPRINT";
const ENV_KEY_FILE: &str = "OCI_CLI_KEY_FILE";
const ENV_REGION: &str = "OCI_CLI_REGION";
const ENV_PASSPHRASE: &str = "OCI_CLI_PASSPHRASE";
const ENV_CONFIG_FILE: &str = "OCI_CONFIG_FILE";

/// Stable label for each credential strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthProviderKind {
	/// Config file, explicit profile, explicit passphrase.
	FileWithProfileAndPassphrase,
	/// Config file (`DEFAULT` profile) with an explicit passphrase.
	FileWithPassphrase,
	/// Config file with an explicit profile and no passphrase.
	FileWithProfile,
	/// Config file alone (`DEFAULT` profile, no passphrase).
	File,
	/// Inline tenancy/user/region/fingerprint/key/passphrase.
	Raw,
	/// Platform default discovery, deferred until first use.
	EnvironmentDefault,
}
impl AuthProviderKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthProviderKind::FileWithProfileAndPassphrase => "file_with_profile_and_passphrase",
			AuthProviderKind::FileWithPassphrase => "file_with_passphrase",
			AuthProviderKind::FileWithProfile => "file_with_profile",
			AuthProviderKind::File => "file",
			AuthProviderKind::Raw => "raw",
			AuthProviderKind::EnvironmentDefault => "environment_default",
		}
	}
}
impl Display for AuthProviderKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// The one credential strategy bound to a [`Session`].
#[derive(Clone, Debug)]
pub enum AuthProvider {
	/// Profile-aware file strategy with an explicit passphrase.
	FileWithProfileAndPassphrase {
		/// Config file path.
		path: PathBuf,
		/// Profile read from the file.
		profile: String,
		/// Identity loaded from the profile.
		identity: SigningIdentity,
	},
	/// Plain file strategy (`DEFAULT` profile) with an explicit passphrase.
	FileWithPassphrase {
		/// Config file path.
		path: PathBuf,
		/// Identity loaded from the profile.
		identity: SigningIdentity,
	},
	/// Profile-aware file strategy without a passphrase.
	FileWithProfile {
		/// Config file path.
		path: PathBuf,
		/// Profile read from the file.
		profile: String,
		/// Identity loaded from the profile.
		identity: SigningIdentity,
	},
	/// Plain file strategy (`DEFAULT` profile) without a passphrase.
	File {
		/// Config file path.
		path: PathBuf,
		/// Identity loaded from the profile.
		identity: SigningIdentity,
	},
	/// Inline credentials.
	Raw(SigningIdentity),
	/// Credentials discovered from the environment on first use.
	EnvironmentDefault(DefaultDiscovery),
}
impl AuthProvider {
	/// Returns the strategy label.
	pub fn kind(&self) -> AuthProviderKind {
		match self {
			Self::FileWithProfileAndPassphrase { .. } =>
				AuthProviderKind::FileWithProfileAndPassphrase,
			Self::FileWithPassphrase { .. } => AuthProviderKind::FileWithPassphrase,
			Self::FileWithProfile { .. } => AuthProviderKind::FileWithProfile,
			Self::File { .. } => AuthProviderKind::File,
			Self::Raw(_) => AuthProviderKind::Raw,
			Self::EnvironmentDefault(_) => AuthProviderKind::EnvironmentDefault,
		}
	}

	/// Returns the identity when it was loaded eagerly; `None` for deferred discovery.
	pub fn loaded_identity(&self) -> Option<&SigningIdentity> {
		match self {
			Self::FileWithProfileAndPassphrase { identity, .. }
			| Self::FileWithPassphrase { identity, .. }
			| Self::FileWithProfile { identity, .. }
			| Self::File { identity, .. }
			| Self::Raw(identity) => Some(identity),
			Self::EnvironmentDefault(_) => None,
		}
	}

	/// Returns the signing identity, running default discovery if necessary.
	pub fn signing_identity(&self) -> Result<SigningIdentity, ConfigError> {
		match self {
			Self::FileWithProfileAndPassphrase { identity, .. }
			| Self::FileWithPassphrase { identity, .. }
			| Self::FileWithProfile { identity, .. }
			| Self::File { identity, .. }
			| Self::Raw(identity) => Ok(identity.clone()),
			Self::EnvironmentDefault(discovery) => discovery.identity(),
		}
	}
}

/// Environment variable reader used by [`DefaultDiscovery`].
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lazily discovers credentials from `OCI_CLI_*` variables or the default config file.
///
/// Resolution never fails for this strategy; problems surface from
/// [`AuthProvider::signing_identity`] on first use. Successful discoveries are cached.
#[derive(Clone)]
pub struct DefaultDiscovery {
	lookup: EnvLookup,
	cache: Arc<Mutex<Option<SigningIdentity>>>,
}
impl DefaultDiscovery {
	/// Discovery that reads variables through `lookup` instead of the process environment.
	pub fn with_lookup<F>(lookup: F) -> Self
	where
		F: 'static + Fn(&str) -> Option<String> + Send + Sync,
	{
		Self { lookup: Arc::new(lookup), cache: Default::default() }
	}

	/// Returns the cached identity or runs discovery.
	pub fn identity(&self) -> Result<SigningIdentity, ConfigError> {
		let mut cache = self.cache.lock();

		if let Some(identity) = cache.as_ref() {
			return Ok(identity.clone());
		}

		let identity = discover(&*self.lookup)?;

		*cache = Some(identity.clone());

		Ok(identity)
	}
}
impl Default for DefaultDiscovery {
	fn default() -> Self {
		Self::with_lookup(|key| std::env::var(key).ok())
	}
}
impl Debug for DefaultDiscovery {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DefaultDiscovery").field("cached", &self.cache.lock().is_some()).finish()
	}
}

/// Resolves `config` into a [`Session`].
///
/// Fails with [`ConfigError::MissingEnvironmentId`] before reading any file when the
/// environment id is absent.
pub fn resolve(config: &ConnectorConfig) -> Result<Session> {
	CallSpan::connector(Operation::Resolve).in_scope(|| -> Result<Session> {
		let environment_id = config.fusion_environment_id.trim();

		if environment_id.is_empty() {
			return Err(ConfigError::MissingEnvironmentId.into());
		}

		let environment = EnvironmentId::new(environment_id).map_err(ConfigError::from)?;
		let provider = select_provider(config)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(strategy = provider.kind().as_str(), "resolved credential strategy");

		Ok(Session::new(environment, provider))
	})
}

/// Applies the credential precedence rules to `config`.
pub fn select_provider(config: &ConnectorConfig) -> Result<AuthProvider, ConfigError> {
	let mut provider = AuthProvider::EnvironmentDefault(DefaultDiscovery::default());

	if !config.path_to_config_file.is_empty() {
		let path = PathBuf::from(&config.path_to_config_file);
		let profile = config.profile.as_str();
		let passphrase = &config.private_key_passphrase;

		provider = if !profile.is_empty() && !passphrase.is_empty() {
			let identity = load_identity(&path, profile)?.with_passphrase_override(passphrase);

			AuthProvider::FileWithProfileAndPassphrase { path, profile: profile.to_owned(), identity }
		} else if !passphrase.is_empty() {
			let identity =
				load_identity(&path, DEFAULT_PROFILE)?.with_passphrase_override(passphrase);

			AuthProvider::FileWithPassphrase { path, identity }
		} else if !profile.is_empty() {
			let identity = load_identity(&path, profile)?;

			AuthProvider::FileWithProfile { path, profile: profile.to_owned(), identity }
		} else {
			let identity = load_identity(&path, DEFAULT_PROFILE)?;

			AuthProvider::File { path, identity }
		};
	}

	if config.has_raw_credentials() {
		provider = AuthProvider::Raw(SigningIdentity {
			tenancy: config.tenancy.clone(),
			user: config.user.clone(),
			fingerprint: config.fingerprint.clone(),
			region: config.region.clone(),
			private_key: PrivateKey::Inline(config.private_key.clone()),
			passphrase: Some(config.private_key_passphrase.clone()),
		});
	}

	Ok(provider)
}

fn load_identity(path: &Path, profile: &str) -> Result<SigningIdentity, ConfigError> {
	OciConfigFile::load(path)?.identity(profile)
}

fn discover(lookup: &dyn Fn(&str) -> Option<String>) -> Result<SigningIdentity, ConfigError> {
	let get = |key: &str| lookup(key).map(|value| value.trim().to_owned()).filter(|v| !v.is_empty());

	if let (Some(tenancy), Some(user), Some(fingerprint), Some(key_file), Some(region)) =
		(get(ENV_TENANCY), get(ENV_USER), get(ENV_FINGERPRINT), get(ENV_KEY_FILE), get(ENV_REGION))
	{
		return Ok(SigningIdentity {
			tenancy,
			user,
			fingerprint,
			region,
			private_key: PrivateKey::File(file::expand_home(Path::new(&key_file))),
			passphrase: get(ENV_PASSPHRASE).map(Into::into),
		});
	}

	let path = get(ENV_CONFIG_FILE)
		.map(PathBuf::from)
		.or_else(|| dirs::home_dir().map(|home| home.join(".oci").join("config")))
		.ok_or_else(|| ConfigError::DefaultDiscovery {
			reason: "no OCI_CLI_* credentials and no home directory to locate ~/.oci/config".into(),
		})?;

	OciConfigFile::load(path)
		.and_then(|file| file.identity(DEFAULT_PROFILE))
		.map_err(|e| ConfigError::DefaultDiscovery { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
	// crates.io
	use tempfile::TempDir;
	// self
	use super::*;

	fn discovery_from(vars: &[(&str, &str)]) -> DefaultDiscovery {
		let map: HashMap<String, String> =
			vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();

		DefaultDiscovery::with_lookup(move |key| map.get(key).cloned())
	}

	#[test]
	fn kind_labels_are_stable() {
		assert_eq!(AuthProviderKind::Raw.to_string(), "raw");
		assert_eq!(
			AuthProviderKind::FileWithProfileAndPassphrase.as_str(),
			"file_with_profile_and_passphrase"
		);
	}

	#[test]
	fn default_discovery_prefers_cli_variables_and_caches() {
		let discovery = discovery_from(&[
			(ENV_TENANCY, "t"),
			(ENV_USER, "u"),
			(ENV_FINGERPRINT, "f"),
			(ENV_KEY_FILE, "/keys/k.pem"),
			(ENV_REGION, "us-phoenix-1"),
		]);
		let identity =
			discovery.identity().expect("Complete OCI_CLI_* variables should be enough.");

		assert_eq!(identity.region, "us-phoenix-1");
		assert_eq!(identity.private_key, PrivateKey::File("/keys/k.pem".into()));
		assert!(identity.passphrase.is_none());
		assert_eq!(
			discovery.identity().expect("Second call should be served from the cache."),
			identity
		);
		assert!(format!("{discovery:?}").contains("cached: true"));
	}

	#[test]
	fn default_discovery_reads_the_configured_file() {
		let dir = TempDir::new().expect("Failed to create temporary directory.");
		let path = dir.path().join("config");

		std::fs::write(
			&path,
			"[DEFAULT]\nuser=u\nfingerprint=f\nkey_file=/k.pem\ntenancy=t\nregion=r\n",
		)
		.expect("Failed to write OCI config fixture.");

		let discovery = discovery_from(&[(ENV_CONFIG_FILE, path.to_str().unwrap_or_default())]);

		assert_eq!(discovery.identity().expect("Config file should be discovered.").user, "u");
	}

	#[test]
	fn default_discovery_failures_are_not_cached() {
		let dir = TempDir::new().expect("Failed to create temporary directory.");
		let missing = dir.path().join("config");
		let discovery = discovery_from(&[(ENV_CONFIG_FILE, missing.to_str().unwrap_or_default())]);

		for _ in 0..2 {
			assert!(matches!(discovery.identity(), Err(ConfigError::DefaultDiscovery { .. })));
		}
		assert!(format!("{discovery:?}").contains("cached: false"));
	}
}
