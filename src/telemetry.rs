//! Telemetry emission for completed vitals records
//!
//! Structured log emission only; there is no network transport of metrics.

use tracing::{debug, info};

use crate::assessment::Thresholds;
use crate::vitals::VitalsSnapshot;

/// Emits completed vitals snapshots as structured log events
pub struct VitalsTelemetry {
    /// Target name for emitted events
    target: String,
    /// Whether emission is enabled
    enabled: bool,
}

impl VitalsTelemetry {
    /// Create a new emitter
    pub fn new(target: impl Into<String>, enabled: bool) -> Self {
        Self {
            target: target.into(),
            enabled,
        }
    }

    /// Check if emission is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit a completed snapshot together with its threshold verdict
    pub fn emit_snapshot(&self, snapshot: &VitalsSnapshot, thresholds: &Thresholds) {
        if !self.enabled {
            return;
        }

        let acceptable = thresholds.is_acceptable(&snapshot.vitals);
        info!(
            target: "web_vitals",
            emitter = %self.target,
            session_id = %snapshot.session_id,
            captured_at = %snapshot.captured_at,
            fcp_ms = snapshot.vitals.fcp_ms,
            lcp_ms = snapshot.vitals.lcp_ms,
            fid_ms = snapshot.vitals.fid_ms,
            cls = snapshot.vitals.cls,
            ttfb_ms = snapshot.vitals.ttfb_ms,
            acceptable,
            "Web vitals snapshot"
        );

        if !acceptable {
            for violation in thresholds.violations(&snapshot.vitals) {
                debug!(
                    target: "web_vitals",
                    emitter = %self.target,
                    session_id = %snapshot.session_id,
                    violation = %violation,
                    "Threshold violation"
                );
            }
        }
    }
}

impl Default for VitalsTelemetry {
    fn default() -> Self {
        Self::new("vitals-collector", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::WebVitals;
    use uuid::Uuid;

    #[test]
    fn test_disabled_emitter() {
        let telemetry = VitalsTelemetry::new("test", false);
        assert!(!telemetry.is_enabled());

        let snapshot = VitalsSnapshot::new(
            Uuid::new_v4(),
            WebVitals {
                fcp_ms: 1500.0,
                lcp_ms: 2000.0,
                fid_ms: 50.0,
                cls: 0.05,
                ttfb_ms: 400.0,
            },
        );
        // Emission on a disabled emitter is a no-op.
        telemetry.emit_snapshot(&snapshot, &Thresholds::default());
    }

    #[test]
    fn test_default_emitter_enabled() {
        assert!(VitalsTelemetry::default().is_enabled());
    }
}
