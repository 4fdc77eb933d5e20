// self
use crate::obs::{CallOutcome, Operation};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(operation: Operation, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"fusion_connector_call_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}
