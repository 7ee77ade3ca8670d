// self
use crate::{_prelude::*, obs::OperationKind};

/// Future returned by [`OperationSpan::instrument`]; the bare future when `tracing` is off.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`OperationSpan::instrument`]; the bare future when `tracing` is off.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// `tokenkeeper.operation` span for one refresh or search call.
///
/// The operation and stage labels are kept even without the `tracing` feature so callers can
/// inspect which span they are about to enter.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	kind: OperationKind,
	stage: &'static str,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span for `kind` at the named call site.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		Self {
			kind,
			stage,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!(
				"tokenkeeper.operation",
				operation = kind.as_str(),
				stage
			),
		}
	}

	/// Operation the span was opened for.
	pub fn kind(&self) -> OperationKind {
		self.kind
	}

	/// Call site label.
	pub fn stage(&self) -> &'static str {
		self.stage
	}

	/// Attaches the span to `fut`; nothing is entered across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
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
