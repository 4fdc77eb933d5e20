//! Connector-level error types shared across credential resolution, syncers, and the
//! orchestrator.

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, client::ApiError, sync::user::MappingError};

/// Connector-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical connector error exposed by public APIs.
///
/// Configuration problems are reported before any remote call and are distinct from
/// credential rejections, so operators can tell bad input from bad credentials.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; not retryable.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The remote API rejected the resolved credentials.
	#[error("Failed to authenticate with Fusion Cloud: {reason}.")]
	Authentication {
		/// Upstream- or connector-supplied reason string.
		reason: String,
	},
	/// Any other failure reported by a remote operation.
	#[error("Remote call `{operation}` failed.")]
	RemoteCall {
		/// Remote operation that failed.
		operation: &'static str,
		/// Underlying API failure.
		#[source]
		source: ApiError,
	},
	/// A retrieved record could not be converted into a normalized resource.
	#[error("Failed to create user resource.")]
	Mapping(#[from] MappingError),
	/// Host requested a capability this connector does not provide.
	#[error("The {capability} capability is not supported by this connector.")]
	Unsupported {
		/// Capability label.
		capability: &'static str,
	},
}
impl Error {
	/// Wraps an API failure for `operation`, promoting credential rejections to
	/// [`Error::Authentication`].
	pub fn remote(operation: &'static str, source: ApiError) -> Self {
		if source.kind().is_unauthenticated() {
			Self::Authentication { reason: source.to_string() }
		} else {
			Self::RemoteCall { operation, source }
		}
	}
}

/// Configuration and validation failures raised before any remote call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The Fusion environment identifier was not supplied.
	#[error(
		"Environment ID of the Fusion Cloud environment must be provided, use --help for more information."
	)]
	MissingEnvironmentId,
	/// The Fusion environment identifier failed validation.
	#[error("Environment ID is invalid.")]
	InvalidEnvironmentId(#[from] crate::auth::IdentifierError),
	/// The referenced OCI config file could not be read.
	#[error("Failed to read OCI config file {}.", path.display())]
	ConfigFileRead {
		/// Path that was requested.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// The referenced OCI config file is not valid INI.
	#[error("Failed to parse OCI config file {} at line {line}: {message}.", path.display())]
	ConfigFileParse {
		/// Path that was parsed.
		path: PathBuf,
		/// One-based line number of the offending entry.
		line: usize,
		/// Parser diagnostic.
		message: String,
	},
	/// The OCI config file has no section for the requested profile.
	#[error("OCI config file {} does not contain profile `{profile}`.", path.display())]
	MissingProfile {
		/// Path that was parsed.
		path: PathBuf,
		/// Requested profile name.
		profile: String,
	},
	/// The requested profile lacks a required key.
	#[error("Profile `{profile}` is missing the `{key}` key.")]
	MissingProfileKey {
		/// Profile name.
		profile: String,
		/// Missing key.
		key: &'static str,
	},
	/// Credentials could not be discovered from the environment or the default file.
	#[error("Default credential discovery failed: {reason}.")]
	DefaultDiscovery {
		/// Human-readable explanation.
		reason: String,
	},
	/// The configured region does not produce a valid endpoint.
	#[error("Region `{region}` does not produce a valid endpoint.")]
	InvalidRegion {
		/// Region as configured.
		region: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
