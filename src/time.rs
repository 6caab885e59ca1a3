//! Time abstraction trait for platform-agnostic ramp pacing.

/// Trait for abstracting blocking delay sources.
///
/// The keyer uses this for the fixed per-step pause inside an actuation ramp.
/// Implement it over your platform's blocking delay (e.g. a SysTick delay or
/// an `embedded-hal` `DelayNs` wrapper).
pub trait DelaySource {
    /// Blocks for at least the given number of milliseconds.
    fn delay_ms(&mut self, millis: u32);
}
