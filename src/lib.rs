//! web-vitals-lens
//!
//! Collects the five standard web-vitals metrics — first contentful paint,
//! largest contentful paint, first input delay, cumulative layout shift, and
//! time to first byte — from an abstract performance-observation source, and
//! assesses completed records against fixed thresholds.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  PerformanceSource (host)                │
//! │     subscribe(category, handler) / navigation_timing     │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ entry batches
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                      VitalsCollector                     │
//! │   PartialVitals accumulator + completion check + latch   │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ WebVitals (exactly once)
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │            caller callback / Thresholds verdict          │
//! │        is_acceptable()  /  performance_report()          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The collector never creates threads or schedules work: all dispatch is
//! owned by the host's event loop. If a category never reports (no user
//! input, no navigation timing entry) the callback never fires; that is an
//! accepted terminal state, not an error.
//!
//! # Example
//!
//! ```no_run
//! use web_vitals_lens::{is_acceptable, performance_report, VitalsCollector};
//! # fn demo(source: &mut impl web_vitals_lens::PerformanceSource) {
//! let collector = VitalsCollector::start(source, |vitals| {
//!     if !is_acceptable(&vitals) {
//!         eprintln!("{}", performance_report(&vitals));
//!     }
//! });
//! // ... later, when the observing session ends:
//! collector.stop(source);
//! # }
//! ```

pub mod assessment;
pub mod collector;
pub mod entries;
pub mod source;
pub mod telemetry;
pub mod vitals;

pub use assessment::{
    is_acceptable, performance_report, ThresholdError, Thresholds, Violation, ACCEPTABLE_MESSAGE,
    REPORT_HEADER,
};
pub use collector::{VitalsCallback, VitalsCollector};
pub use entries::{EntryCategory, NavigationTiming, PerformanceEntry};
pub use source::{EntryHandler, PerformanceSource, SubscriptionHandle};
pub use telemetry::VitalsTelemetry;
pub use vitals::{PartialVitals, VitalsSnapshot, WebVitals};
