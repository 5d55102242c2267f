//! Driver and task configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TickError};

/// Settings for a host tick driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Host heartbeat rate. Hosts with a fixed clock use this to size their timestep.
    pub tick_rate_hz: f64,
    /// A warning is logged once the live subscription count grows past this.
    pub subscription_warn_threshold: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 20.0,
            subscription_warn_threshold: 4096,
        }
    }
}

impl DriverConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(TickError::invalid(
                "tick_rate_hz",
                format!("expected a positive rate, got {}", self.tick_rate_hz),
            ));
        }
        Ok(())
    }
}

/// Scheduling parameters of a single task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Counter value restored on start and reset.
    pub start_at: u64,
    /// Counter value at which the task ends. `None` runs until stopped.
    pub limit: Option<u64>,
    /// Heartbeats to wait before the first one is delivered.
    pub delay: u64,
    /// Heartbeats per logical tick. Always at least 1.
    pub every: u64,
    /// Ask the driver for its worker lane.
    pub run_on_worker: bool,
    /// Stop automatically once the limit is reached.
    pub auto_stop: bool,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            start_at: 0,
            limit: None,
            delay: 0,
            every: 1,
            run_on_worker: false,
            auto_stop: true,
        }
    }
}

impl TaskConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let mut cfg: Self = serde_json::from_str(text)?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Clamp values the scheduler cannot honour as given.
    pub fn normalize(&mut self) {
        if self.every == 0 {
            log::warn!("task rate divisor 0 normalized to 1");
            self.every = 1;
        }
        if self.limit == Some(0) {
            self.limit = None;
        }
    }

    #[inline]
    pub fn limit_reached(&self, current: u64) -> bool {
        matches!(self.limit, Some(limit) if current >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_config_rejects_zero_rate() {
        let err = DriverConfig::from_json(r#"{ "tick_rate_hz": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TickError::InvalidConfig { field: "tick_rate_hz", .. }));
    }

    #[test]
    fn task_config_fills_defaults_and_normalizes() {
        let cfg = TaskConfig::from_json(r#"{ "every": 0, "limit": 0, "delay": 3 }"#).unwrap();
        assert_eq!(cfg.every, 1);
        assert_eq!(cfg.limit, None);
        assert_eq!(cfg.delay, 3);
        assert!(cfg.auto_stop);
    }

    #[test]
    fn limit_reached_only_for_bounded_tasks() {
        let mut cfg = TaskConfig::default();
        assert!(!cfg.limit_reached(u64::MAX));
        cfg.limit = Some(3);
        assert!(!cfg.limit_reached(2));
        assert!(cfg.limit_reached(3));
    }
}
