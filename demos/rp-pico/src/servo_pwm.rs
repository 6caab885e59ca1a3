use embedded_hal::pwm::SetDutyCycle;
use servo_keyer::ServoDrive;

/// Servo drive over a PWM channel.
///
/// Expects the slice to be programmed for a 20 ms frame with 1 µs ticks
/// (top 19999, divider 125 at the stock 125 MHz system clock), so duty
/// values are pulse widths in microseconds. The RP2040 compare registers
/// are double-buffered; writes land at the next frame boundary.
pub struct PwmServo<C: SetDutyCycle> {
    channel: C,
}

impl<C: SetDutyCycle> PwmServo<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }
}

impl<C: SetDutyCycle> ServoDrive for PwmServo<C> {
    fn set_duty(&mut self, duty: u16) {
        let _ = self.channel.set_duty_cycle(duty);
    }
}
