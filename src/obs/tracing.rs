// self
use crate::{_prelude::*, auth::ResourceTypeId, obs::Operation};

/// `fusion_connector.call` span tagged with the operation and, for syncer calls, the
/// resource type. Inert without the `tracing` feature.
#[derive(Clone, Debug)]
pub struct CallSpan {
	operation: Operation,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Span for a connector-level operation.
	pub fn connector(operation: Operation) -> Self {
		Self {
			operation,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!("fusion_connector.call", operation = operation.as_str()),
		}
	}

	/// Span for a syncer operation on `resource_type`.
	pub fn syncer(operation: Operation, resource_type: &ResourceTypeId) -> Self {
		#[cfg(not(feature = "tracing"))]
		let _ = resource_type;

		Self {
			operation,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!(
				"fusion_connector.call",
				operation = operation.as_str(),
				resource_type = %resource_type
			),
		}
	}

	/// Operation the span covers.
	pub fn operation(&self) -> Operation {
		self.operation
	}

	/// Runs a synchronous section inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to `fut` without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> impl Future<Output = Fut::Output>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(fut, self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn in_scope_returns_the_closure_value() {
		let span = CallSpan::connector(Operation::Resolve);

		assert_eq!(span.in_scope(|| 7), 7);
		assert_eq!(span.operation(), Operation::Resolve);
	}

	#[tokio::test]
	async fn syncer_span_wraps_future() {
		let span = CallSpan::syncer(Operation::List, &ResourceTypeId::from_static("user"));

		assert_eq!(span.instrument(async { 42 }).await, 42);
	}
}
