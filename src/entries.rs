//! Performance entry data model
//!
//! Typed entries delivered by a [`PerformanceSource`](crate::source::PerformanceSource)
//! in batches, plus the one-shot navigation timing lookup. These define the
//! contract between the observation source and the collector.

use serde::{Deserialize, Serialize};

/// Observable entry categories
///
/// Navigation timing is not a category: it is a one-shot lookup performed
/// when observation starts, not a subscription stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryCategory {
    /// Paint timing entries (first contentful paint)
    Paint,
    /// Largest contentful paint candidates
    LargestContentfulPaint,
    /// First user input
    FirstInput,
    /// Layout shift events
    LayoutShift,
}

impl EntryCategory {
    /// All subscribable categories, in registration order
    pub const ALL: [EntryCategory; 4] = [
        EntryCategory::Paint,
        EntryCategory::LargestContentfulPaint,
        EntryCategory::FirstInput,
        EntryCategory::LayoutShift,
    ];
}

impl std::fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryCategory::Paint => write!(f, "paint"),
            EntryCategory::LargestContentfulPaint => write!(f, "largest_contentful_paint"),
            EntryCategory::FirstInput => write!(f, "first_input"),
            EntryCategory::LayoutShift => write!(f, "layout_shift"),
        }
    }
}

/// A single performance observation entry
///
/// All times are milliseconds relative to the observation origin. Layout
/// shift values are dimensionless magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PerformanceEntry {
    /// A paint timing entry
    Paint {
        /// When the paint occurred
        start_time_ms: f64,
    },
    /// A largest-contentful-paint candidate
    LargestContentfulPaint {
        /// When the candidate rendered
        start_time_ms: f64,
    },
    /// A first-input event
    FirstInput {
        /// When the input occurred
        start_time_ms: f64,
        /// When the handler started processing it
        processing_start_ms: f64,
    },
    /// A layout shift event
    LayoutShift {
        /// Shift magnitude
        value: f64,
        /// Whether the shift followed recent user input
        had_recent_input: bool,
    },
}

impl PerformanceEntry {
    /// Category this entry belongs to
    pub fn category(&self) -> EntryCategory {
        match self {
            PerformanceEntry::Paint { .. } => EntryCategory::Paint,
            PerformanceEntry::LargestContentfulPaint { .. } => {
                EntryCategory::LargestContentfulPaint
            }
            PerformanceEntry::FirstInput { .. } => EntryCategory::FirstInput,
            PerformanceEntry::LayoutShift { .. } => EntryCategory::LayoutShift,
        }
    }

    /// Start time for time-based entries, if any
    pub fn start_time_ms(&self) -> Option<f64> {
        match self {
            PerformanceEntry::Paint { start_time_ms }
            | PerformanceEntry::LargestContentfulPaint { start_time_ms }
            | PerformanceEntry::FirstInput { start_time_ms, .. } => Some(*start_time_ms),
            PerformanceEntry::LayoutShift { .. } => None,
        }
    }
}

/// Navigation timing for the observed session
///
/// Read once when observation begins. Sources that have no navigation entry
/// return `None` from the lookup, in which case time-to-first-byte is never
/// populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationTiming {
    /// When the request was issued
    pub request_start_ms: f64,
    /// When the first response byte arrived
    pub response_start_ms: f64,
}

impl NavigationTiming {
    /// Create a navigation timing record
    pub fn new(request_start_ms: f64, response_start_ms: f64) -> Self {
        Self {
            request_start_ms,
            response_start_ms,
        }
    }

    /// Time to first byte in milliseconds
    pub fn time_to_first_byte_ms(&self) -> f64 {
        self.response_start_ms - self.request_start_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_category_mapping() {
        let entry = PerformanceEntry::FirstInput {
            start_time_ms: 320.0,
            processing_start_ms: 365.0,
        };
        assert_eq!(entry.category(), EntryCategory::FirstInput);

        let shift = PerformanceEntry::LayoutShift {
            value: 0.02,
            had_recent_input: false,
        };
        assert_eq!(shift.category(), EntryCategory::LayoutShift);
        assert_eq!(shift.start_time_ms(), None);
    }

    #[test]
    fn test_navigation_timing_ttfb() {
        let nav = NavigationTiming::new(10.0, 410.0);
        assert_eq!(nav.time_to_first_byte_ms(), 400.0);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = PerformanceEntry::Paint { start_time_ms: 1500.0 };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"paint\""));

        let deserialized: PerformanceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
