//! Configuration parameters for the visualizer.
use crate::hashing::HashMethod;
use slotviz_core::{SlotVizError, SlotVizResult};
use std::time::Duration;

/// Durations of the visual phases of an operation.
///
/// The defaults are the timing the visualizer animations are designed around. Change them only
/// for accessibility (e.g. reduced motion) or tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseTimings {
    /// Time between issuing an insert/delete and the slot mutation.
    ///
    /// Default: 800
    pub commit_delay_ms: u32,

    /// Time between the commit and the highlight being cleared.
    ///
    /// Default: 500
    pub settle_delay_ms: u32,

    /// How long a search keeps its slot highlighted.
    ///
    /// Default: 1500
    pub search_hold_ms: u32,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            commit_delay_ms: 800,
            settle_delay_ms: 500,
            search_hold_ms: 1500,
        }
    }
}

impl PhaseTimings {
    pub(crate) fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms as u64)
    }

    pub(crate) fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms as u64)
    }

    pub(crate) fn search_hold(&self) -> Duration {
        Duration::from_millis(self.search_hold_ms as u64)
    }
}

/// Configuration of a visualizer instance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualizerConfig {
    /// Number of slots in the table.
    ///
    /// Default: 10
    pub capacity: usize,

    /// Hash method selected on start.
    ///
    /// Default: division
    pub method: HashMethod,

    /// Durations of the visual phases.
    pub timings: PhaseTimings,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            method: HashMethod::default(),
            timings: PhaseTimings::default(),
        }
    }
}

impl VisualizerConfig {
    /// Check the configuration can back a table.
    pub fn validate(&self) -> SlotVizResult<()> {
        if self.capacity == 0 {
            return Err(SlotVizError::InvalidCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference() {
        let config = VisualizerConfig::default();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.method, HashMethod::Division);
        assert_eq!(config.timings.commit_delay(), Duration::from_millis(800));
        assert_eq!(config.timings.settle_delay(), Duration::from_millis(500));
        assert_eq!(config.timings.search_hold(), Duration::from_millis(1500));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_parse_partial_json() {
        let config: VisualizerConfig = serde_json::from_str(
            r#"{"method": "multiplication", "timings": {"searchHoldMs": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.method, HashMethod::Multiplication);
        assert_eq!(config.timings.commit_delay_ms, 800);
        assert_eq!(config.timings.search_hold_ms, 10);
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let config: VisualizerConfig = serde_json::from_str(r#"{"capacity": 0}"#).unwrap();
        assert_eq!(config.validate(), Err(SlotVizError::InvalidCapacity));
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        assert!(serde_json::from_str::<VisualizerConfig>(r#"{"method": "modulo"}"#).is_err());
    }
}
