use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Check;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    Product,
    Fetch,
    Extract,
    Record,
    Notify,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Product => "product",
            Phase::Fetch => "fetch",
            Phase::Extract => "extract",
            Phase::Record => "record",
            Phase::Notify => "notify",
        }
    }
    fn span(&self) -> Span {
        match self {
            Phase::Product => info_span!("product"),
            Phase::Fetch => info_span!("fetch"),
            Phase::Extract => info_span!("extract"),
            Phase::Record => info_span!("record"),
            Phase::Notify => info_span!("notify"),
        }
    }
}

impl OpMarker for Check {
    const NAME: &'static str = "check";
    type Phase = Phase;
    fn root_span() -> Span {
        info_span!("check")
    }
}
