//! Optional observability helpers for connector operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to wrap every call in a `fusion_connector.call` span with
//!   the `operation` field and, for syncer calls, the `resource_type` field.
//! - Enable `metrics` to increment the `fusion_connector_call_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Connector and syncer operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Credential resolution.
	Resolve,
	/// Connector validation probe.
	Validate,
	/// Syncer resource listing.
	List,
	/// Syncer entitlement enumeration.
	Entitlements,
	/// Syncer grant enumeration.
	Grants,
	/// Asset retrieval.
	Asset,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Resolve => "resolve",
			Operation::Validate => "validate",
			Operation::List => "list",
			Operation::Entitlements => "entitlements",
			Operation::Grants => "grants",
			Operation::Asset => "asset",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}

	/// Maps a result onto [`CallOutcome::Success`] or [`CallOutcome::Failure`].
	pub fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure }
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside `span`, recording the attempt and its outcome.
pub(crate) async fn observe<T, Fut>(span: CallSpan, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let operation = span.operation();

	record_call_outcome(operation, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	record_call_outcome(operation, CallOutcome::of(&result));

	result
}
