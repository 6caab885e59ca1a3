//! Core types for keyer configuration.

use crate::{LIGHT_THRESHOLD, SERVO_DUTY_MAX, SERVO_DUTY_MIN, STEP_DELAY_MS};

/// The logical position of the actuated key.
///
/// The state is implicit in the commanded duty value: `Pressed` when the duty
/// sits at the pressed extreme, `Released` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Servo arm holds the key down (duty at the pressed extreme).
    Pressed,

    /// Servo arm is off the key (duty at the released extreme).
    Released,
}

/// Configuration for a [`LightKeyer`](crate::LightKeyer).
///
/// All values are fixed for the lifetime of the keyer. The defaults reproduce
/// the original firmware constants; see the crate root for the individual
/// constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyerConfig {
    /// Duty value commanded when the key is fully pressed (the low extreme).
    pub pressed_duty: u16,

    /// Duty value commanded when the key is fully released (the high extreme).
    /// Also the position commanded at construction.
    pub released_duty: u16,

    /// Raw sample value at or above which the key is pressed.
    pub threshold: u16,

    /// Pause between ramp steps, in milliseconds. Zero skips the pause.
    pub step_delay_ms: u32,

    /// Consecutive empty polls tolerated before the sensor is reported
    /// stalled. `None` disables the watchdog, preserving the original
    /// behavior of hanging silently if the converter stops producing.
    pub stall_poll_limit: Option<u32>,
}

impl Default for KeyerConfig {
    fn default() -> Self {
        Self {
            pressed_duty: SERVO_DUTY_MIN,
            released_duty: SERVO_DUTY_MAX,
            threshold: LIGHT_THRESHOLD,
            step_delay_ms: STEP_DELAY_MS,
            stall_poll_limit: None,
        }
    }
}

impl KeyerConfig {
    /// Creates a new configuration builder seeded with the defaults.
    pub fn builder() -> KeyerConfigBuilder {
        KeyerConfigBuilder::new()
    }

    /// Checks the configuration invariants.
    ///
    /// # Errors
    /// * `InvertedDutyRange` - `pressed_duty` is not below `released_duty`
    /// * `ZeroStallLimit` - the stall watchdog is enabled with a limit of zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pressed_duty >= self.released_duty {
            return Err(ConfigError::InvertedDutyRange {
                pressed: self.pressed_duty,
                released: self.released_duty,
            });
        }

        if self.stall_poll_limit == Some(0) {
            return Err(ConfigError::ZeroStallLimit);
        }

        Ok(())
    }
}

/// Builder for constructing validated keyer configurations.
#[derive(Debug)]
pub struct KeyerConfigBuilder {
    config: KeyerConfig,
}

impl KeyerConfigBuilder {
    /// Creates a builder seeded with the default configuration.
    pub fn new() -> Self {
        Self {
            config: KeyerConfig::default(),
        }
    }

    /// Sets the pressed (low) duty extreme.
    pub fn pressed_duty(mut self, duty: u16) -> Self {
        self.config.pressed_duty = duty;
        self
    }

    /// Sets the released (high) duty extreme.
    pub fn released_duty(mut self, duty: u16) -> Self {
        self.config.released_duty = duty;
        self
    }

    /// Sets the detection threshold in raw sensor units.
    pub fn threshold(mut self, threshold: u16) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Sets the per-step ramp pause in milliseconds.
    pub fn step_delay_ms(mut self, millis: u32) -> Self {
        self.config.step_delay_ms = millis;
        self
    }

    /// Enables the sensor stall watchdog with the given poll limit.
    pub fn stall_poll_limit(mut self, polls: u32) -> Self {
        self.config.stall_poll_limit = Some(polls);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// See [`KeyerConfig::validate`].
    pub fn build(self) -> Result<KeyerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for KeyerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The pressed duty extreme is not below the released duty extreme.
    InvertedDutyRange {
        /// Configured pressed (low) extreme.
        pressed: u16,
        /// Configured released (high) extreme.
        released: u16,
    },

    /// The stall watchdog was enabled with a limit of zero polls.
    ZeroStallLimit,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvertedDutyRange { pressed, released } => {
                write!(
                    f,
                    "pressed duty {:#06x} must be below released duty {:#06x}",
                    pressed, released
                )
            }
            ConfigError::ZeroStallLimit => {
                write!(f, "stall poll limit must be at least one poll")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
