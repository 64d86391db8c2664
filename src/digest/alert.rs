//! Threshold alert policy.

use crate::config::{AlertConfig, AlertDirection};

/// Stateless per-window decision on the availability rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertPolicy {
    threshold: f64,
    direction: AlertDirection,
}

impl AlertPolicy {
    pub fn new(threshold: f64, direction: AlertDirection) -> Self {
        Self {
            threshold,
            direction,
        }
    }

    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new(config.threshold_percent, config.direction)
    }

    /// Whether a window with this availability rate should notify.
    /// Comparisons are strict; a rate equal to the threshold never alerts.
    pub fn should_alert(&self, available_rate: f64) -> bool {
        match self.direction {
            AlertDirection::Below => available_rate < self.threshold,
            AlertDirection::Above => available_rate > self.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn direction(&self) -> AlertDirection {
        self.direction
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::from_config(&AlertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alerts_below_seventy() {
        let policy = AlertPolicy::default();
        assert_eq!(policy.threshold(), 70.0);
        assert!(policy.should_alert(69.99));
        assert!(!policy.should_alert(70.0));
        assert!(!policy.should_alert(75.0));
    }

    // Both directions stay supported until the intended one is settled.
    #[test]
    fn test_direction_decides_seventy_five_percent_window() {
        let below = AlertPolicy::new(70.0, AlertDirection::Below);
        let above = AlertPolicy::new(70.0, AlertDirection::Above);
        assert!(!below.should_alert(75.0));
        assert!(above.should_alert(75.0));
        assert!(!above.should_alert(70.0));
    }
}
