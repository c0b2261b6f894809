//! Web-vitals records
//!
//! [`WebVitals`] is the complete five-field metrics record delivered to the
//! consumer callback. [`PartialVitals`] is its incremental form, mutated as
//! observation events arrive and frozen once every field has a value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Complete web-vitals record for one observation session
///
/// All fields are non-negative millisecond durations except `cls`, which is
/// a dimensionless accumulated shift magnitude. A complete record is
/// immutable and delivered at most once per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WebVitals {
    /// First contentful paint (ms)
    pub fcp_ms: f64,
    /// Largest contentful paint (ms)
    pub lcp_ms: f64,
    /// First input delay (ms)
    pub fid_ms: f64,
    /// Cumulative layout shift score (dimensionless)
    pub cls: f64,
    /// Time to first byte (ms)
    pub ttfb_ms: f64,
}

/// Incrementally populated vitals record
///
/// Created when observation begins and discarded when the session ends or
/// the completed record is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialVitals {
    /// First contentful paint (ms), once a paint entry arrives
    pub fcp_ms: Option<f64>,
    /// Largest contentful paint (ms), latest candidate
    pub lcp_ms: Option<f64>,
    /// First input delay (ms), once an input arrives
    pub fid_ms: Option<f64>,
    /// Layout shift score, latest batch sum
    pub cls: Option<f64>,
    /// Time to first byte (ms), from navigation timing
    pub ttfb_ms: Option<f64>,
}

impl PartialVitals {
    /// Create an empty partial record
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated fields (0..=5)
    pub fn populated_count(&self) -> usize {
        [
            self.fcp_ms.is_some(),
            self.lcp_ms.is_some(),
            self.fid_ms.is_some(),
            self.cls.is_some(),
            self.ttfb_ms.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count()
    }

    /// Whether every field has a value
    pub fn is_complete(&self) -> bool {
        self.populated_count() == 5
    }

    /// Promote to a complete record, if every field is populated
    pub fn freeze(&self) -> Option<WebVitals> {
        Some(WebVitals {
            fcp_ms: self.fcp_ms?,
            lcp_ms: self.lcp_ms?,
            fid_ms: self.fid_ms?,
            cls: self.cls?,
            ttfb_ms: self.ttfb_ms?,
        })
    }
}

/// Session-stamped completed vitals record
///
/// Produced when a collector delivers a complete record; suitable for
/// logging or handing off to a persistence layer owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// Observation session identifier
    pub session_id: Uuid,
    /// When the record completed
    pub captured_at: DateTime<Utc>,
    /// The completed record
    pub vitals: WebVitals,
}

impl VitalsSnapshot {
    /// Stamp a completed record with its session id and the current time
    pub fn new(session_id: Uuid, vitals: WebVitals) -> Self {
        Self {
            session_id,
            captured_at: Utc::now(),
            vitals,
        }
    }

    /// Serialize the snapshot to JSON
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_completion() {
        let mut partial = PartialVitals::new();
        assert!(!partial.is_complete());
        assert_eq!(partial.populated_count(), 0);
        assert!(partial.freeze().is_none());

        partial.fcp_ms = Some(1500.0);
        partial.lcp_ms = Some(2000.0);
        partial.fid_ms = Some(50.0);
        partial.cls = Some(0.05);
        assert_eq!(partial.populated_count(), 4);
        assert!(partial.freeze().is_none());

        partial.ttfb_ms = Some(400.0);
        assert!(partial.is_complete());

        let vitals = partial.freeze().unwrap();
        assert_eq!(vitals.fcp_ms, 1500.0);
        assert_eq!(vitals.ttfb_ms, 400.0);
    }

    #[test]
    fn test_snapshot_json() {
        let session_id = Uuid::new_v4();
        let snapshot = VitalsSnapshot::new(
            session_id,
            WebVitals {
                fcp_ms: 1500.0,
                lcp_ms: 2000.0,
                fid_ms: 50.0,
                cls: 0.05,
                ttfb_ms: 400.0,
            },
        );

        let json = snapshot.to_json().unwrap();
        assert_eq!(json["session_id"], session_id.to_string());
        assert_eq!(json["vitals"]["fcp_ms"], 1500.0);
    }

    #[test]
    fn test_vitals_roundtrip() {
        let vitals = WebVitals {
            fcp_ms: 1200.5,
            lcp_ms: 1800.0,
            fid_ms: 12.0,
            cls: 0.01,
            ttfb_ms: 220.0,
        };
        let json = serde_json::to_string(&vitals).unwrap();
        let back: WebVitals = serde_json::from_str(&json).unwrap();
        assert_eq!(vitals, back);
    }
}
