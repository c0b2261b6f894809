//! Threshold assessment of completed vitals records
//!
//! Two pure operations over a complete [`WebVitals`] record: a boolean
//! verdict ([`is_acceptable`]) and a human-readable report of threshold
//! violations ([`performance_report`]). Both use the standard thresholds in
//! [`Thresholds::default`]; custom limits go through [`Thresholds`]
//! directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vitals::WebVitals;

/// Threshold-limit validation errors
#[derive(Debug, Clone, Error)]
pub enum ThresholdError {
    #[error("Threshold for {metric} must be positive, got {value}")]
    NonPositive { metric: &'static str, value: f64 },

    #[error("Threshold for {metric} must be finite")]
    NotFinite { metric: &'static str },
}

/// Upper limits for the five vitals metrics
///
/// A record is acceptable iff every field is strictly below its limit;
/// the reporter flags fields at or above (`>=`) the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// First contentful paint limit (ms)
    pub fcp_ms: f64,
    /// Largest contentful paint limit (ms)
    pub lcp_ms: f64,
    /// First input delay limit (ms)
    pub fid_ms: f64,
    /// Cumulative layout shift limit (dimensionless)
    pub cls: f64,
    /// Time to first byte limit (ms)
    pub ttfb_ms: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fcp_ms: 2000.0,
            lcp_ms: 2500.0,
            fid_ms: 100.0,
            cls: 0.1,
            ttfb_ms: 600.0,
        }
    }
}

impl Thresholds {
    /// Validate that every limit is finite and positive
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (metric, value) in [
            ("fcp_ms", self.fcp_ms),
            ("lcp_ms", self.lcp_ms),
            ("fid_ms", self.fid_ms),
            ("cls", self.cls),
            ("ttfb_ms", self.ttfb_ms),
        ] {
            if !value.is_finite() {
                return Err(ThresholdError::NotFinite { metric });
            }
            if value <= 0.0 {
                return Err(ThresholdError::NonPositive { metric, value });
            }
        }
        Ok(())
    }

    /// True iff every metric is strictly below its limit
    pub fn is_acceptable(&self, vitals: &WebVitals) -> bool {
        vitals.fcp_ms < self.fcp_ms
            && vitals.lcp_ms < self.lcp_ms
            && vitals.fid_ms < self.fid_ms
            && vitals.cls < self.cls
            && vitals.ttfb_ms < self.ttfb_ms
    }

    /// Metrics at or above their limit, in fixed order (fcp, lcp, fid, cls, ttfb)
    pub fn violations(&self, vitals: &WebVitals) -> Vec<Violation> {
        let mut violations = Vec::new();
        if vitals.fcp_ms >= self.fcp_ms {
            violations.push(Violation::SlowFirstContentfulPaint);
        }
        if vitals.lcp_ms >= self.lcp_ms {
            violations.push(Violation::SlowLargestContentfulPaint);
        }
        if vitals.fid_ms >= self.fid_ms {
            violations.push(Violation::HighFirstInputDelay);
        }
        if vitals.cls >= self.cls {
            violations.push(Violation::ExcessiveLayoutShift);
        }
        if vitals.ttfb_ms >= self.ttfb_ms {
            violations.push(Violation::SlowServerResponse);
        }
        violations
    }

    /// Human-readable report of the record against these limits
    pub fn report(&self, vitals: &WebVitals) -> String {
        let violations = self.violations(vitals);
        if violations.is_empty() {
            return ACCEPTABLE_MESSAGE.to_string();
        }

        let mut lines = Vec::with_capacity(violations.len() + 1);
        lines.push(REPORT_HEADER.to_string());
        lines.extend(violations.iter().map(Violation::to_string));
        lines.join("\n")
    }
}

/// A metric at or above its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// First contentful paint at or above its limit
    SlowFirstContentfulPaint,
    /// Largest contentful paint at or above its limit
    SlowLargestContentfulPaint,
    /// First input delay at or above its limit
    HighFirstInputDelay,
    /// Layout shift score at or above its limit
    ExcessiveLayoutShift,
    /// Time to first byte at or above its limit
    SlowServerResponse,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Violation::SlowFirstContentfulPaint => "First Contentful Paint is too slow",
            Violation::SlowLargestContentfulPaint => "Largest Contentful Paint needs improvement",
            Violation::HighFirstInputDelay => "First Input Delay is high",
            Violation::ExcessiveLayoutShift => "Layout shifts are affecting user experience",
            Violation::SlowServerResponse => "Server response time is high",
        };
        write!(f, "{}", message)
    }
}

/// Report text when every metric is within its limit
pub const ACCEPTABLE_MESSAGE: &str = "Performance metrics are within acceptable ranges";

/// First line of a report with at least one violation
pub const REPORT_HEADER: &str = "Performance issues found:";

/// Whether the record meets the standard thresholds
pub fn is_acceptable(vitals: &WebVitals) -> bool {
    Thresholds::default().is_acceptable(vitals)
}

/// Report the record against the standard thresholds
pub fn performance_report(vitals: &WebVitals) -> String {
    Thresholds::default().report(vitals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_vitals() -> WebVitals {
        WebVitals {
            fcp_ms: 1500.0,
            lcp_ms: 2000.0,
            fid_ms: 50.0,
            cls: 0.05,
            ttfb_ms: 400.0,
        }
    }

    #[test]
    fn test_acceptable_record() {
        let vitals = good_vitals();
        assert!(is_acceptable(&vitals));
        assert_eq!(performance_report(&vitals), ACCEPTABLE_MESSAGE);
    }

    #[test]
    fn test_single_violation() {
        let vitals = WebVitals {
            fcp_ms: 2500.0,
            ..good_vitals()
        };
        assert!(!is_acceptable(&vitals));
        assert_eq!(
            performance_report(&vitals),
            "Performance issues found:\nFirst Contentful Paint is too slow"
        );
    }

    #[test]
    fn test_all_violations_in_fixed_order() {
        let vitals = WebVitals {
            fcp_ms: 2500.0,
            lcp_ms: 3000.0,
            fid_ms: 150.0,
            cls: 0.2,
            ttfb_ms: 700.0,
        };
        assert!(!is_acceptable(&vitals));

        let thresholds = Thresholds::default();
        assert_eq!(
            thresholds.violations(&vitals),
            vec![
                Violation::SlowFirstContentfulPaint,
                Violation::SlowLargestContentfulPaint,
                Violation::HighFirstInputDelay,
                Violation::ExcessiveLayoutShift,
                Violation::SlowServerResponse,
            ]
        );
        assert_eq!(
            performance_report(&vitals),
            "Performance issues found:\n\
             First Contentful Paint is too slow\n\
             Largest Contentful Paint needs improvement\n\
             First Input Delay is high\n\
             Layout shifts are affecting user experience\n\
             Server response time is high"
        );
    }

    #[test]
    fn test_threshold_boundary_is_violation() {
        // Exactly at the limit fails the strict-< acceptance check and is
        // flagged by the >= reporter check.
        let vitals = WebVitals {
            fid_ms: 100.0,
            ..good_vitals()
        };
        assert!(!is_acceptable(&vitals));
        assert_eq!(
            Thresholds::default().violations(&vitals),
            vec![Violation::HighFirstInputDelay]
        );
    }

    #[test]
    fn test_report_matches_verdict() {
        let records = [
            good_vitals(),
            WebVitals { cls: 0.1, ..good_vitals() },
            WebVitals { ttfb_ms: 600.0, ..good_vitals() },
            WebVitals { lcp_ms: 2499.9, ..good_vitals() },
        ];
        for vitals in records {
            let acceptable = is_acceptable(&vitals);
            let report = performance_report(&vitals);
            assert_eq!(acceptable, report == ACCEPTABLE_MESSAGE);
        }
    }

    #[test]
    fn test_threshold_validation() {
        assert!(Thresholds::default().validate().is_ok());

        let zero = Thresholds {
            cls: 0.0,
            ..Thresholds::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ThresholdError::NonPositive { metric: "cls", .. })
        ));

        let nan = Thresholds {
            fcp_ms: f64::NAN,
            ..Thresholds::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ThresholdError::NotFinite { metric: "fcp_ms" })
        ));
    }

    #[test]
    fn test_thresholds_serialization() {
        let thresholds = Thresholds::default();
        let json = serde_json::to_string(&thresholds).unwrap();
        let deserialized: Thresholds = serde_json::from_str(&json).unwrap();
        assert_eq!(thresholds, deserialized);
    }
}
