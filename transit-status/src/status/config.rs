//! Classification thresholds.

/// Error returned when thresholds cannot be used for classification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    /// A threshold is NaN or infinite
    #[error("{name} threshold must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// A threshold is outside 0.0..=1.0
    #[error("{name} threshold must be between 0 and 1, got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    /// Degraded threshold above the fucked threshold
    #[error("degraded threshold ({degraded}) must not exceed fucked threshold ({fucked})")]
    Inverted { degraded: f64, fucked: f64 },

    /// Negative delay threshold
    #[error("delay threshold must not be negative, got {0}s")]
    NegativeDelay(i64),
}

/// Configuration parameters for status classification.
///
/// Disruption thresholds are fractions (0.25 = 25%) and compared strictly:
/// a network at exactly the threshold stays in the lower state.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusConfig {
    /// Fraction of disrupted services above which the network is degraded.
    pub degraded_threshold: f64,

    /// Fraction of disrupted services above which the network is fucked.
    pub fucked_threshold: f64,

    /// Delay (seconds) a departure must exceed to count as delayed.
    pub delay_threshold_secs: i64,
}

impl StatusConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(degraded_threshold: f64, fucked_threshold: f64, delay_threshold_secs: i64) -> Self {
        Self {
            degraded_threshold,
            fucked_threshold,
            delay_threshold_secs,
        }
    }

    /// Check that the thresholds describe a usable classification.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (name, value) in [
            ("degraded", self.degraded_threshold),
            ("fucked", self.fucked_threshold),
        ] {
            if !value.is_finite() {
                return Err(ThresholdError::NotFinite { name, value });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ThresholdError::OutOfRange { name, value });
            }
        }

        if self.degraded_threshold > self.fucked_threshold {
            return Err(ThresholdError::Inverted {
                degraded: self.degraded_threshold,
                fucked: self.fucked_threshold,
            });
        }

        if self.delay_threshold_secs < 0 {
            return Err(ThresholdError::NegativeDelay(self.delay_threshold_secs));
        }

        Ok(())
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            degraded_threshold: 0.25,
            fucked_threshold: 0.50,
            delay_threshold_secs: 300, // 5 minutes
        }
    }
}
