//! Planner configuration.

use std::time::Duration;

use crate::graph::TransferCostPolicy;

/// Configuration parameters for route planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// How transfer edges are priced in the static graph.
    pub transfer_policy: TransferCostPolicy,

    /// Maximum number of DFS expansions for the longest-path search.
    /// `None` means unbounded.
    pub longest_path_max_expansions: Option<u64>,

    /// Wall-clock limit for the longest-path search (milliseconds).
    /// `None` means unbounded.
    pub longest_path_time_limit_ms: Option<u64>,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transfer_policy: TransferCostPolicy,
        longest_path_max_expansions: Option<u64>,
        longest_path_time_limit_ms: Option<u64>,
    ) -> Self {
        Self {
            transfer_policy,
            longest_path_max_expansions,
            longest_path_time_limit_ms,
        }
    }

    /// Returns the longest-path time limit as a Duration.
    pub fn longest_path_time_limit(&self) -> Option<Duration> {
        self.longest_path_time_limit_ms.map(Duration::from_millis)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transfer_policy: TransferCostPolicy::default(),
            longest_path_max_expansions: Some(50_000_000),
            longest_path_time_limit_ms: Some(10_000), // 10 seconds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfers::Period;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.transfer_policy, TransferCostPolicy::default());
        assert_eq!(config.longest_path_max_expansions, Some(50_000_000));
        assert_eq!(config.longest_path_time_limit_ms, Some(10_000));
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();
        assert_eq!(
            config.longest_path_time_limit(),
            Some(Duration::from_secs(10))
        );

        let config = PlannerConfig::new(TransferCostPolicy::default(), None, None);
        assert_eq!(config.longest_path_time_limit(), None);
    }

    #[test]
    fn custom_config() {
        let policy = TransferCostPolicy::new(Period::Peak, None);
        let config = PlannerConfig::new(policy, Some(1_000), Some(250));

        assert_eq!(config.transfer_policy, policy);
        assert_eq!(config.longest_path_max_expansions, Some(1_000));
        assert_eq!(config.longest_path_time_limit_ms, Some(250));
        assert_eq!(
            config.longest_path_time_limit(),
            Some(Duration::from_millis(250))
        );
    }
}
