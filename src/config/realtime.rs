//! Realtime (WebSocket) configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Realtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Broadcast channel capacity per subscriber.
    ///
    /// Slow consumers lag and skip once they fall this far behind; the
    /// channel never applies backpressure to publishers.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl RealtimeConfig {
    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_config_defaults() {
        let config = RealtimeConfig::default();
        assert_eq!(config.channel_capacity, 128);
    }

    #[test]
    fn test_validation_zero_capacity() {
        let config = RealtimeConfig {
            channel_capacity: 0,
        };
        assert!(config.validate().is_err());
    }
}
