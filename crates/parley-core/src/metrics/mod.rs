//! Metrics domain module.
//!
//! Four bounded percentages track how the conversation is going from the
//! persona's point of view. A `Metrics` value is always a snapshot of the
//! state right after one message; it is never mutated in place.
//!
//! # Module Structure
//!
//! - `model`: `Metrics`, `MetricDeltas`, `MetricKind`, `MetricsReading`

mod model;

pub use model::{MetricDeltas, MetricKind, Metrics, MetricsReading};
