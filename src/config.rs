//! Connector configuration: shared host options plus the OCI credential inputs.
//!
//! Every field is optional except `fusion-environment-id`; which credential strategy is
//! used depends on the combination of non-empty fields (see [`crate::auth::resolve`]).
//! Values deserialize from kebab-case keys. With the `cli` feature the same names are
//! command-line flags backed by `BATON_*` environment variables.

// self
use crate::{_prelude::*, auth::Secret};

/// Output encoding for the host's log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
	#[default]
	/// Structured JSON lines.
	Json,
	/// Human-readable console output.
	Console,
}

/// Options shared by every connector hosted on the platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(default, rename_all = "kebab-case")]
pub struct BaseConfig {
	/// Log filter directive (e.g. `info`, `fusion_cloud_connector=debug`).
	#[cfg_attr(feature = "cli", arg(long, env = "BATON_LOG_LEVEL", default_value = "info"))]
	pub log_level: String,
	/// Log output encoding.
	#[cfg_attr(
		feature = "cli",
		arg(long, env = "BATON_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)
	)]
	pub log_format: LogFormat,
}
impl Default for BaseConfig {
	fn default() -> Self {
		Self { log_level: "info".into(), log_format: LogFormat::default() }
	}
}

/// Complete configuration bag handed to the credential resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(default, rename_all = "kebab-case")]
pub struct ConnectorConfig {
	/// Shared host options.
	#[serde(flatten)]
	#[cfg_attr(feature = "cli", command(flatten))]
	pub base: BaseConfig,
	/// OCID of the Fusion environment (required).
	#[cfg_attr(
		feature = "cli",
		arg(
			long,
			env = "BATON_FUSION_ENVIRONMENT_ID",
			default_value = "",
			help = "The environment ID for the Fusion Cloud environment. For example: 'ocid1.test.oc1..<unique_ID>EXAMPLE-fusionEnvironmentId-Value'."
		)
	)]
	pub fusion_environment_id: String,
	/// Path to an OCI config file.
	#[cfg_attr(
		feature = "cli",
		arg(
			long,
			env = "BATON_PATH_TO_CONFIG_FILE",
			default_value = "",
			help = "The path to the OCI config file."
		)
	)]
	pub path_to_config_file: String,
	/// Profile inside the OCI config file.
	#[cfg_attr(
		feature = "cli",
		arg(long, env = "BATON_PROFILE", default_value = "", help = "The profile in the OCI config file.")
	)]
	pub profile: String,
	/// Tenancy OCID for raw credentials.
	#[cfg_attr(
		feature = "cli",
		arg(long, env = "BATON_TENANCY", default_value = "", help = "The tenancy of the OCI config file.")
	)]
	pub tenancy: String,
	/// User OCID for raw credentials.
	#[cfg_attr(
		feature = "cli",
		arg(long, env = "BATON_USER", default_value = "", help = "The user of the OCI config file.")
	)]
	pub user: String,
	/// Region identifier for raw credentials (e.g. `us-ashburn-1`).
	#[cfg_attr(
		feature = "cli",
		arg(long, env = "BATON_REGION", default_value = "", help = "The region of the OCI config file.")
	)]
	pub region: String,
	/// API signing key fingerprint for raw credentials.
	#[cfg_attr(
		feature = "cli",
		arg(
			long,
			env = "BATON_FINGERPRINT",
			default_value = "",
			help = "The fingerprint of the OCI config file."
		)
	)]
	pub fingerprint: String,
	/// Inline PEM private key for raw credentials.
	#[cfg_attr(
		feature = "cli",
		arg(
			long,
			env = "BATON_PRIVATE_KEY",
			default_value = "",
			hide_env_values = true,
			help = "The private key in the OCI config file."
		)
	)]
	pub private_key: Secret,
	/// Passphrase protecting the private key.
	#[cfg_attr(
		feature = "cli",
		arg(
			long,
			env = "BATON_PRIVATE_KEY_PASSPHRASE",
			default_value = "",
			hide_env_values = true,
			help = "The passphrase for the private key in the OCI config file."
		)
	)]
	pub private_key_passphrase: Secret,
}
impl ConnectorConfig {
	/// Returns true when every input required for inline (raw) credentials is present.
	pub fn has_raw_credentials(&self) -> bool {
		!self.tenancy.is_empty()
			&& !self.user.is_empty()
			&& !self.region.is_empty()
			&& !self.fingerprint.is_empty()
			&& !self.private_key.is_empty()
			&& !self.private_key_passphrase.is_empty()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn deserializes_kebab_case_keys_with_flattened_base() {
		let config: ConnectorConfig = serde_json::from_value(serde_json::json!({
			"fusion-environment-id": "ocid1.fusionenvironment.oc1..a",
			"profile": "P",
			"log-level": "debug",
		}))
		.expect("Config should deserialize from kebab-case keys.");

		assert_eq!(config.fusion_environment_id, "ocid1.fusionenvironment.oc1..a");
		assert_eq!(config.profile, "P");
		assert_eq!(config.base.log_level, "debug");
		assert_eq!(config.base.log_format, LogFormat::Json);
		assert!(config.private_key.is_empty());
	}

	#[test]
	fn raw_credentials_require_all_six_fields() {
		let mut config = ConnectorConfig {
			tenancy: "t".into(),
			user: "u".into(),
			region: "r".into(),
			fingerprint: "f".into(),
			private_key: "k".into(),
			..Default::default()
		};

		assert!(!config.has_raw_credentials());

		config.private_key_passphrase = "p".into();

		assert!(config.has_raw_credentials());
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let config = ConnectorConfig {
			private_key: "very-secret-key".into(),
			private_key_passphrase: "very-secret-pass".into(),
			..Default::default()
		};
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("very-secret"));
	}

	#[cfg(feature = "cli")]
	mod cli {
		// std
		use std::ffi::OsStr;
		// crates.io
		use clap::{CommandFactory, Parser};
		// self
		use super::*;

		#[derive(Debug, Parser)]
		struct Flags {
			#[command(flatten)]
			config: ConnectorConfig,
		}

		#[test]
		fn flags_map_onto_the_config() {
			let flags = Flags::try_parse_from([
				"connector",
				"--fusion-environment-id",
				"ocid1.fusionenvironment.oc1..x",
				"--path-to-config-file",
				"/cfg",
				"--private-key-passphrase",
				"pw",
				"--log-format",
				"console",
			])
			.expect("Known flags should parse.");

			assert_eq!(flags.config.fusion_environment_id, "ocid1.fusionenvironment.oc1..x");
			assert_eq!(flags.config.path_to_config_file, "/cfg");
			assert_eq!(flags.config.private_key_passphrase.expose(), "pw");
			assert!(flags.config.profile.is_empty());
			assert_eq!(flags.config.base.log_level, "info");
			assert_eq!(flags.config.base.log_format, LogFormat::Console);
		}

		#[test]
		fn unknown_log_format_is_rejected() {
			let err = Flags::try_parse_from(["connector", "--log-format", "xml"])
				.expect_err("Unknown log formats must not fall back to a default.");

			assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
		}

		#[test]
		fn every_flag_is_backed_by_a_baton_variable() {
			let command = Flags::command();

			for arg in command.get_arguments().filter(|arg| arg.get_id().as_str() != "help") {
				let expected = format!("BATON_{}", arg.get_id().as_str().to_ascii_uppercase());

				assert_eq!(arg.get_env(), Some(OsStr::new(&expected)), "{}", arg.get_id());
			}

			let secrets = command
				.get_arguments()
				.filter(|arg| arg.is_hide_env_values_set())
				.map(|arg| arg.get_id().as_str())
				.collect::<Vec<_>>();

			assert_eq!(secrets, ["private_key", "private_key_passphrase"]);
		}
	}
}
