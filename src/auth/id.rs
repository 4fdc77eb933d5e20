//! Fusion environment OCIDs and resource type identifiers.

// std
use std::{borrow::Cow, ops::Deref};
// self
use crate::_prelude::*;

const OCID_PREFIX: &str = "ocid1.";
const OCID_MAX_LEN: usize = 255;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The value does not follow `ocid1.<type>.<realm>.[region].<unique id>`.
	#[error("`{value}` is not an OCID.")]
	NotAnOcid {
		/// Rejected value.
		value: String,
	},
	/// The OCID exceeded the allowed length.
	#[error("OCID exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted length.
		max: usize,
	},
	/// Resource type ids are non-empty lowercase ASCII words.
	#[error("`{value}` is not a valid resource type identifier.")]
	InvalidResourceType {
		/// Rejected value.
		value: String,
	},
}

/// OCID of the Fusion environment every call is bound to.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentId(String);
impl EnvironmentId {
	/// Validates `value` as an OCID.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let value = value.as_ref();

		if value.len() > OCID_MAX_LEN {
			return Err(IdentifierError::TooLong { max: OCID_MAX_LEN });
		}

		let not_ocid = || IdentifierError::NotAnOcid { value: value.to_owned() };

		if value.chars().any(char::is_whitespace) {
			return Err(not_ocid());
		}

		let segments =
			value.strip_prefix(OCID_PREFIX).ok_or_else(not_ocid)?.split('.').collect::<Vec<_>>();

		// Region may be empty; type, realm, and the unique id may not.
		match segments.as_slice() {
			[kind, realm, _region, .., unique]
				if !kind.is_empty() && !realm.is_empty() && !unique.is_empty() =>
				Ok(Self(value.to_owned())),
			_ => Err(not_ocid()),
		}
	}
}
impl Deref for EnvironmentId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for EnvironmentId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for EnvironmentId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "EnvironmentId({})", self.0)
	}
}
impl Display for EnvironmentId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Stable identifier of a normalized resource shape (e.g. `user`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceTypeId(Cow<'static, str>);
impl ResourceTypeId {
	/// Validates `value` as a resource type id.
	pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
		let value = value.into();
		let valid = !value.is_empty()
			&& value.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');

		if valid {
			Ok(Self(Cow::Owned(value)))
		} else {
			Err(IdentifierError::InvalidResourceType { value })
		}
	}

	pub(crate) const fn from_static(value: &'static str) -> Self {
		Self(Cow::Borrowed(value))
	}
}
impl Deref for ResourceTypeId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ResourceTypeId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for ResourceTypeId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl TryFrom<String> for ResourceTypeId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<ResourceTypeId> for String {
	fn from(value: ResourceTypeId) -> Self {
		value.0.into_owned()
	}
}
