#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LightKeyer`**: Polls the sensor, compares against the threshold and drives the servo
//! - **`KeyerConfig`**: Validated configuration (duty extremes, threshold, ramp pacing, watchdog)
//! - **`ServiceOutcome`**: What one service iteration did (`Idle`, `Held`, `Moved`)
//! - **`KeyState`**: The two logical key positions, implicit in the duty value
//! - **`DutyRamp`**: Bounded one-unit-per-step ramp between the duty extremes
//! - **`LightSensor`**: Trait to implement for your ADC
//! - **`ServoDrive`**: Trait to implement for your PWM output
//! - **`DelaySource`**: Trait to implement for your blocking delay
//! - **`SampleCell`**: Lock-free cell for publishing conversion results from an interrupt
//!
//! Duty values are raw `u16` timer compare values; converting them to a pulse
//! width is the job of the [`ServoDrive`] implementation and its PWM setup.

pub mod keyer;
pub mod sensor;
pub mod servo;
pub mod time;
pub mod types;

pub use keyer::{KeyerError, LightKeyer, ServiceOutcome};
pub use sensor::{CellSensor, LightSensor, SampleCell};
pub use servo::{DutyRamp, ServoDrive};
pub use time::DelaySource;
pub use types::{ConfigError, KeyState, KeyerConfig, KeyerConfigBuilder};

/// Default PWM period compare value: a 20 ms servo frame at the original
/// firmware's timer clocking. Board code programs this into the PWM timer;
/// the library never writes it.
pub const SERVO_PWM_PERIOD: u16 = 0x1046;

/// Default released (neutral) duty extreme.
pub const SERVO_DUTY_MAX: u16 = 0x0138;

/// Default pressed duty extreme.
pub const SERVO_DUTY_MIN: u16 = 0x00DC;

/// Default detection threshold in raw sensor units.
pub const LIGHT_THRESHOLD: u16 = 0x0208;

/// Default pause between ramp steps, in milliseconds.
pub const STEP_DELAY_MS: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    // Basic compilation tests - actual functionality tests live in the
    // module test mods and the integration tests.
    #[test]
    fn defaults_are_consistent() {
        let config = KeyerConfig::default();
        assert_eq!(config.pressed_duty, SERVO_DUTY_MIN);
        assert_eq!(config.released_duty, SERVO_DUTY_MAX);
        assert!(config.validate().is_ok());
        assert!(SERVO_DUTY_MAX <= SERVO_PWM_PERIOD);
    }
}
