//! Loader for OCI SDK config files (`~/.oci/config` style INI).
//!
//! Profiles other than `DEFAULT` inherit any key they do not set from the `DEFAULT`
//! section. Files are read and parsed eagerly so a bad path or malformed file fails
//! credential resolution instead of the first remote call.

// std
use std::{
	fs,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{PrivateKey, Secret, SigningIdentity},
	error::ConfigError,
};

/// Profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "DEFAULT";

type Section = BTreeMap<String, String>;

/// Parsed OCI config file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OciConfigFile {
	path: PathBuf,
	sections: BTreeMap<String, Section>,
}
impl OciConfigFile {
	/// Reads and parses the file at `path`.
	pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
		let path = expand_home(&path.into());
		let contents = fs::read_to_string(&path)
			.map_err(|source| ConfigError::ConfigFileRead { path: path.clone(), source })?;

		Self::parse(path, &contents)
	}

	/// Parses `contents` as if it had been read from `path`.
	pub fn parse(path: impl Into<PathBuf>, contents: &str) -> Result<Self, ConfigError> {
		let path = path.into();
		let mut sections = BTreeMap::<String, Section>::new();
		let mut current: Option<String> = None;

		for (idx, raw) in contents.lines().enumerate() {
			let line = raw.trim();
			let parse_error = |message: &str| ConfigError::ConfigFileParse {
				path: path.clone(),
				line: idx + 1,
				message: message.to_owned(),
			};

			if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
				continue;
			}
			if let Some(rest) = line.strip_prefix('[') {
				let name = rest
					.strip_suffix(']')
					.map(str::trim)
					.filter(|name| !name.is_empty())
					.ok_or_else(|| parse_error("malformed section header"))?;

				sections.entry(name.to_owned()).or_default();
				current = Some(name.to_owned());

				continue;
			}

			let (key, value) = line.split_once('=').ok_or_else(|| parse_error("expected key=value"))?;
			let key = key.trim();

			if key.is_empty() {
				return Err(parse_error("empty key"));
			}

			let section = current
				.as_ref()
				.and_then(|name| sections.get_mut(name))
				.ok_or_else(|| parse_error("entry appears before any profile header"))?;

			section.insert(key.to_owned(), value.trim().to_owned());
		}

		Ok(Self { path, sections })
	}

	/// Builds the signing identity described by `profile`.
	pub fn identity(&self, profile: &str) -> Result<SigningIdentity, ConfigError> {
		let section = self.sections.get(profile).ok_or_else(|| ConfigError::MissingProfile {
			path: self.path.clone(),
			profile: profile.to_owned(),
		})?;
		let fallback = self.sections.get(DEFAULT_PROFILE);
		let lookup = |key: &'static str| {
			section
				.get(key)
				.or_else(|| fallback.and_then(|default| default.get(key)))
				.filter(|value| !value.is_empty())
		};
		let require = |key: &'static str| {
			lookup(key)
				.cloned()
				.ok_or_else(|| ConfigError::MissingProfileKey { profile: profile.to_owned(), key })
		};

		Ok(SigningIdentity {
			user: require("user")?,
			fingerprint: require("fingerprint")?,
			private_key: PrivateKey::File(expand_home(Path::new(&require("key_file")?))),
			tenancy: require("tenancy")?,
			region: require("region")?,
			passphrase: lookup("pass_phrase").map(|value| Secret::new(value.as_str())),
		})
	}
}

/// Expands a leading `~` to the user's home directory.
pub(crate) fn expand_home(path: &Path) -> PathBuf {
	match (path.strip_prefix("~"), dirs::home_dir()) {
		(Ok(rest), Some(home)) => home.join(rest),
		_ => path.to_path_buf(),
	}
}
