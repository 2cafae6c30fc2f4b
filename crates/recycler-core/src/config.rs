use web_time::Duration;

use crate::ConfigError;

/// Tuning knobs for a recycler list.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Extra px kept alive beyond each edge of the view before items are evicted.
    pub keep_alive_margin: f32,
    /// Scroll distance of one navigation tick, px.
    pub nav_step: f32,
    /// Period between navigation ticks, ms.
    pub nav_interval_ms: u64,
    /// Upper bound on items materialized by a single scroll delta.
    pub max_scroll_materializations: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            keep_alive_margin: 60.0,
            nav_step: 24.0,
            nav_interval_ms: 16,
            max_scroll_materializations: 256,
        }
    }
}

impl ListConfig {
    pub fn with_keep_alive_margin(mut self, px: f32) -> Self {
        self.keep_alive_margin = px;
        self
    }

    pub fn with_nav_step(mut self, px: f32) -> Self {
        self.nav_step = px;
        self
    }

    pub fn with_nav_interval(mut self, interval: Duration) -> Self {
        self.nav_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_max_scroll_materializations(mut self, n: usize) -> Self {
        self.max_scroll_materializations = n;
        self
    }

    pub fn nav_interval(&self) -> Duration {
        Duration::from_millis(self.nav_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.keep_alive_margin.is_finite() || self.keep_alive_margin < 0.0 {
            return Err(ConfigError::InvalidKeepAlive(self.keep_alive_margin));
        }
        if !self.nav_step.is_finite() || self.nav_step <= 0.0 {
            return Err(ConfigError::InvalidStep(self.nav_step));
        }
        if self.nav_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.max_scroll_materializations == 0 {
            return Err(ConfigError::InvalidBudget);
        }
        Ok(())
    }
}
