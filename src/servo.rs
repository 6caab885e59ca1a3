//! Servo drive abstraction and the bounded duty ramp.

use crate::time::DelaySource;
use crate::types::ConfigError;

/// Trait for abstracting the servo PWM output.
///
/// `duty` is the commanded pulse width expressed as a timer compare value.
/// Implementations should write it to a buffered compare register (or the
/// HAL equivalent) so the new width takes effect at the next PWM frame
/// boundary without glitching the frame in progress. Handle any hardware
/// errors internally - this method cannot fail.
pub trait ServoDrive {
    /// Commands a new duty value.
    fn set_duty(&mut self, duty: u16);
}

/// Bounded one-unit-per-step duty ramp between two extremes.
///
/// Holds the servo's present commanded position and moves it toward either
/// extreme one unit at a time, writing each intermediate value to the drive
/// and pausing between steps, so the visible motion is a smooth monotonic
/// sweep instead of a single jump.
///
/// The duty value never leaves the closed interval `[min, max]`. A ramp call
/// always terminates: each step moves strictly toward the bound, and a call
/// with the duty already at its target does nothing at all.
///
/// Ramps block the caller for their full duration. See
/// [`LightKeyer::service`](crate::LightKeyer::service) for what that means
/// for sensor freshness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyRamp {
    min: u16,
    max: u16,
    duty: u16,
}

impl DutyRamp {
    /// Creates a ramp over `[min, max]` with the duty at the `max` extreme,
    /// matching the neutral position the original firmware starts from.
    ///
    /// # Errors
    /// * `InvertedDutyRange` - `min` is not below `max`
    pub fn new(min: u16, max: u16) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::InvertedDutyRange {
                pressed: min,
                released: max,
            });
        }

        Ok(Self {
            min,
            max,
            duty: max,
        })
    }

    /// Returns the present commanded duty value.
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Returns the low extreme.
    pub fn min(&self) -> u16 {
        self.min
    }

    /// Returns the high extreme.
    pub fn max(&self) -> u16 {
        self.max
    }

    /// Ramps the duty down to the `min` extreme.
    ///
    /// Each step decrements the duty by one unit, writes it to the drive and
    /// pauses for `step_delay_ms` (a zero delay skips the pause entirely).
    /// Returns the number of steps taken; zero means the duty was already at
    /// the extreme and nothing was written.
    pub fn ramp_to_min<V: ServoDrive, D: DelaySource>(
        &mut self,
        drive: &mut V,
        delay: &mut D,
        step_delay_ms: u32,
    ) -> u16 {
        let mut steps = 0;
        while self.duty > self.min {
            self.duty -= 1;
            drive.set_duty(self.duty);
            steps += 1;
            if step_delay_ms > 0 {
                delay.delay_ms(step_delay_ms);
            }
        }
        steps
    }

    /// Ramps the duty up to the `max` extreme.
    ///
    /// Symmetric to [`ramp_to_min`](Self::ramp_to_min).
    pub fn ramp_to_max<V: ServoDrive, D: DelaySource>(
        &mut self,
        drive: &mut V,
        delay: &mut D,
        step_delay_ms: u32,
    ) -> u16 {
        let mut steps = 0;
        while self.duty < self.max {
            self.duty += 1;
            drive.set_duty(self.duty);
            steps += 1;
            if step_delay_ms > 0 {
                delay.delay_ms(step_delay_ms);
            }
        }
        steps
    }
}
