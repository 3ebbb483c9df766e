//! Metrics snapshot and delta types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::{ParleyError, Result};

/// Upper bound of every metric dimension (inclusive).
pub const METRIC_MAX: u8 = 100;

/// One of the four tracked dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Persuasion,
    Agreement,
    Engagement,
    Agitation,
}

impl MetricKind {
    /// Human-facing label used by front ends.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Persuasion => "Persuasion",
            MetricKind::Agreement => "Agreement",
            MetricKind::Engagement => "Engagement",
            MetricKind::Agitation => "Agitation",
        }
    }
}

/// Signed per-dimension change between two snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDeltas {
    pub persuasion: i16,
    pub agreement: i16,
    pub engagement: i16,
    pub agitation: i16,
}

impl MetricDeltas {
    /// Computes `next - previous` for every dimension.
    pub fn between(previous: &Metrics, next: &Metrics) -> Self {
        let diff = |kind| i16::from(next.get(kind)) - i16::from(previous.get(kind));
        Self {
            persuasion: diff(MetricKind::Persuasion),
            agreement: diff(MetricKind::Agreement),
            engagement: diff(MetricKind::Engagement),
            agitation: diff(MetricKind::Agitation),
        }
    }

    pub fn get(&self, kind: MetricKind) -> i16 {
        match kind {
            MetricKind::Persuasion => self.persuasion,
            MetricKind::Agreement => self.agreement,
            MetricKind::Engagement => self.engagement,
            MetricKind::Agitation => self.agitation,
        }
    }

    pub fn is_zero(&self) -> bool {
        MetricKind::iter().all(|kind| self.get(kind) == 0)
    }
}

/// Raw post-message values reported by the analysis call.
///
/// Values are kept wide here so that out-of-range answers can be detected
/// and rejected instead of silently truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReading {
    pub persuasion: i64,
    pub agreement: i64,
    pub engagement: i64,
    pub agitation: i64,
    pub change_reason: String,
}

/// The state of the four metrics immediately after a given message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub persuasion: u8,
    pub agreement: u8,
    pub engagement: u8,
    pub agitation: u8,
    /// Change relative to the previous snapshot; absent for seeds and fallbacks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deltas: Option<MetricDeltas>,
    /// Short justification for the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_reason: Option<String>,
}

impl Metrics {
    /// Creates a seed snapshot, validating every value against 0..=100.
    pub fn new(persuasion: u8, agreement: u8, engagement: u8, agitation: u8) -> Result<Self> {
        let metrics = Self {
            persuasion,
            agreement,
            engagement,
            agitation,
            deltas: None,
            change_reason: None,
        };
        for kind in MetricKind::iter() {
            let value = metrics.get(kind);
            if value > METRIC_MAX {
                return Err(ParleyError::MetricOutOfRange {
                    metric: kind.to_string(),
                    value: i64::from(value),
                });
            }
        }
        Ok(metrics)
    }

    /// Builds the snapshot that follows `previous` given an analysis reading.
    ///
    /// Deltas are exactly `reading - previous` per dimension.
    pub fn after(previous: &Metrics, reading: &MetricsReading) -> Result<Self> {
        let mut next = Self::new(
            bounded(MetricKind::Persuasion, reading.persuasion)?,
            bounded(MetricKind::Agreement, reading.agreement)?,
            bounded(MetricKind::Engagement, reading.engagement)?,
            bounded(MetricKind::Agitation, reading.agitation)?,
        )?;
        next.deltas = Some(MetricDeltas::between(previous, &next));
        next.change_reason = Some(reading.change_reason.clone());
        Ok(next)
    }

    /// Reuses `previous` values unchanged, with no deltas and the given reason.
    pub fn unchanged(previous: &Metrics, reason: impl Into<String>) -> Self {
        Self {
            deltas: None,
            change_reason: Some(reason.into()),
            ..previous.clone()
        }
    }

    pub fn get(&self, kind: MetricKind) -> u8 {
        match kind {
            MetricKind::Persuasion => self.persuasion,
            MetricKind::Agreement => self.agreement,
            MetricKind::Engagement => self.engagement,
            MetricKind::Agitation => self.agitation,
        }
    }

    /// Deltas for display: absent deltas count as zero.
    pub fn deltas_or_zero(&self) -> MetricDeltas {
        self.deltas.unwrap_or_default()
    }

    /// True when both snapshots carry the same four values.
    pub fn same_values(&self, other: &Metrics) -> bool {
        MetricKind::iter().all(|kind| self.get(kind) == other.get(kind))
    }
}

fn bounded(kind: MetricKind, value: i64) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= METRIC_MAX)
        .ok_or_else(|| ParleyError::MetricOutOfRange {
            metric: kind.to_string(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(p: i64, a: i64, e: i64, g: i64) -> MetricsReading {
        MetricsReading {
            persuasion: p,
            agreement: a,
            engagement: e,
            agitation: g,
            change_reason: "User asked firmly".to_string(),
        }
    }

    #[test]
    fn test_deltas_are_exact_differences() {
        let previous = Metrics::new(20, 40, 60, 50).unwrap();
        let next = Metrics::after(&previous, &reading(30, 35, 65, 45)).unwrap();

        assert_eq!(
            next.deltas,
            Some(MetricDeltas {
                persuasion: 10,
                agreement: -5,
                engagement: 5,
                agitation: -5,
            })
        );
        assert_eq!(next.change_reason.as_deref(), Some("User asked firmly"));
        assert_eq!((next.persuasion, next.agitation), (30, 45));
    }

    #[test]
    fn test_out_of_range_reading_is_rejected() {
        let previous = Metrics::new(20, 40, 60, 50).unwrap();
        let err = Metrics::after(&previous, &reading(101, 35, 65, 45)).unwrap_err();
        assert!(matches!(err, ParleyError::MetricOutOfRange { value: 101, .. }));

        let err = Metrics::after(&previous, &reading(30, -1, 65, 45)).unwrap_err();
        assert!(matches!(err, ParleyError::MetricOutOfRange { ref metric, .. } if metric == "agreement"));
    }

    #[test]
    fn test_new_rejects_values_above_hundred() {
        assert!(Metrics::new(0, 100, 50, 50).is_ok());
        assert!(Metrics::new(0, 101, 50, 50).is_err());
    }

    #[test]
    fn test_unchanged_keeps_values_and_drops_deltas() {
        let mut previous = Metrics::new(20, 40, 60, 50).unwrap();
        previous.deltas = Some(MetricDeltas {
            persuasion: 3,
            ..Default::default()
        });

        let fallback = Metrics::unchanged(&previous, "Analysis failed.");
        assert!(fallback.same_values(&previous));
        assert_eq!(fallback.deltas, None);
        assert!(fallback.deltas_or_zero().is_zero());
        assert_eq!(fallback.change_reason.as_deref(), Some("Analysis failed."));
    }
}
