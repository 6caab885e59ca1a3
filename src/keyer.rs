//! Light-driven keyer with threshold decision and ramp actuation.
//!
//! Provides [`LightKeyer`] which polls a light sensor, compares each fresh
//! sample against a fixed threshold and drives a servo toward the matching
//! key extreme. Also defines the [`ServiceOutcome`] reported per iteration
//! and the [`KeyerError`] raised by the optional stall watchdog.

use core::convert::Infallible;

use crate::sensor::LightSensor;
use crate::servo::{DutyRamp, ServoDrive};
use crate::time::DelaySource;
use crate::types::{ConfigError, KeyState, KeyerConfig};

/// What a single [`service`](LightKeyer::service) iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceOutcome {
    /// No conversion has completed since the previous poll. Poll again.
    Idle,

    /// A fresh sample arrived but the servo was already at the extreme the
    /// sample calls for, so nothing was commanded.
    Held(KeyState),

    /// A fresh sample arrived and the servo was ramped to the extreme the
    /// sample calls for, one duty unit per step.
    Moved {
        /// The extreme the servo now holds.
        state: KeyState,
        /// Number of one-unit duty steps the ramp took.
        steps: u16,
    },
}

/// Errors reported by the keyer's service loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyerError {
    /// The stall watchdog saw too many consecutive polls without a fresh
    /// conversion result. The converter has likely stopped free-running.
    SensorStall {
        /// Consecutive empty polls observed when the watchdog tripped.
        polls: u32,
    },
}

impl core::fmt::Display for KeyerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KeyerError::SensorStall { polls } => {
                write!(f, "no conversion result after {} consecutive polls", polls)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KeyerError {}

/// Drives a servo-actuated key from an ambient-light sensor.
///
/// The keyer owns its three hardware seams ([`LightSensor`], [`ServoDrive`],
/// [`DelaySource`]) and a validated [`KeyerConfig`]. Each service iteration
/// re-evaluates the sensor and re-drives the servo toward the corresponding
/// extreme, so the system is self-correcting: once at the target, further
/// iterations with an unchanged reading do no work.
///
/// The two logical key states are implicit in the duty value rather than
/// tracked explicitly; [`state`](Self::state) reads them back.
///
/// # Type Parameters
/// * `S` - Light sensor implementation type
/// * `V` - Servo drive implementation type
/// * `D` - Delay source implementation type
pub struct LightKeyer<S: LightSensor, V: ServoDrive, D: DelaySource> {
    sensor: S,
    servo: V,
    delay: D,
    config: KeyerConfig,
    ramp: DutyRamp,
    empty_polls: u32,
}

impl<S: LightSensor, V: ServoDrive, D: DelaySource> LightKeyer<S, V, D> {
    /// Creates a keyer and commands the released extreme.
    ///
    /// The servo is sent to `released_duty` immediately, mirroring the
    /// original firmware's neutral starting position.
    ///
    /// # Errors
    /// See [`KeyerConfig::validate`].
    pub fn new(sensor: S, mut servo: V, delay: D, config: KeyerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ramp = DutyRamp::new(config.pressed_duty, config.released_duty)?;

        servo.set_duty(ramp.duty());

        Ok(Self {
            sensor,
            servo,
            delay,
            config,
            ramp,
            empty_polls: 0,
        })
    }

    /// Runs one decision-loop iteration.
    ///
    /// Polls the sensor once. Without a fresh sample this returns
    /// [`ServiceOutcome::Idle`] (and advances the stall watchdog, if one is
    /// configured). With a fresh sample at or above the threshold the key is
    /// pressed; below it, released. Any fresh sample resets the watchdog.
    ///
    /// A ramp blocks this call for its full duration - one delay per duty
    /// unit of travel. Samples converted during that window are not observed
    /// until the next iteration, and only the latest survives; this mirrors
    /// the original firmware, which ignores sensor freshness while a ramp is
    /// in progress. A non-blocking stepped variant would keep the loop
    /// responsive mid-ramp but is a deliberate behavior change, not offered
    /// here.
    ///
    /// # Errors
    /// * `SensorStall` - the watchdog limit was reached. The error repeats on
    ///   every further empty poll until a fresh sample arrives.
    pub fn service(&mut self) -> Result<ServiceOutcome, KeyerError> {
        let Some(raw) = self.sensor.try_sample() else {
            if let Some(limit) = self.config.stall_poll_limit {
                self.empty_polls = self.empty_polls.saturating_add(1);
                if self.empty_polls >= limit {
                    return Err(KeyerError::SensorStall {
                        polls: self.empty_polls,
                    });
                }
            }
            return Ok(ServiceOutcome::Idle);
        };

        self.empty_polls = 0;

        let steps = if raw >= self.config.threshold {
            self.ramp
                .ramp_to_min(&mut self.servo, &mut self.delay, self.config.step_delay_ms)
        } else {
            self.ramp
                .ramp_to_max(&mut self.servo, &mut self.delay, self.config.step_delay_ms)
        };

        let state = self.state();
        if steps == 0 {
            Ok(ServiceOutcome::Held(state))
        } else {
            Ok(ServiceOutcome::Moved { state, steps })
        }
    }

    /// Runs the control loop forever.
    ///
    /// A tight busy poll, preserving the original firmware's timing behavior;
    /// no blocking wait primitive is used. If the target platform can block
    /// on the conversion event, do so inside [`LightSensor::try_sample`]
    /// instead - the loop itself stays a poll.
    ///
    /// # Errors
    /// Returns only if the stall watchdog trips; with the watchdog disabled
    /// a stalled converter makes this loop spin forever, exactly like the
    /// original.
    pub fn run(&mut self) -> Result<Infallible, KeyerError> {
        loop {
            self.service()?;
        }
    }

    /// Returns the current key state, read back from the duty value.
    pub fn state(&self) -> KeyState {
        if self.ramp.duty() == self.config.pressed_duty {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }

    /// Returns the present commanded duty value.
    pub fn duty(&self) -> u16 {
        self.ramp.duty()
    }

    /// Returns the keyer's configuration.
    pub fn config(&self) -> &KeyerConfig {
        &self.config
    }

    /// Returns the number of consecutive empty polls seen so far.
    ///
    /// Zero whenever the most recent poll produced a fresh sample. Counts
    /// only while the stall watchdog is enabled.
    pub fn empty_polls(&self) -> u32 {
        self.empty_polls
    }
}
