use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Lookup;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    Fetch,
    Extract,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Fetch => "fetch",
            Phase::Extract => "extract",
        }
    }
    fn span(&self) -> Span {
        match self {
            Phase::Fetch => info_span!("fetch"),
            Phase::Extract => info_span!("extract"),
        }
    }
}

impl OpMarker for Lookup {
    const NAME: &'static str = "lookup";
    type Phase = Phase;
    fn root_span() -> Span {
        info_span!("lookup")
    }
}
