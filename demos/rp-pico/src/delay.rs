use servo_keyer::DelaySource;

/// Delay source over the Cortex-M SysTick delay.
pub struct SysDelay {
    inner: cortex_m::delay::Delay,
}

impl SysDelay {
    pub fn new(inner: cortex_m::delay::Delay) -> Self {
        Self { inner }
    }
}

impl DelaySource for SysDelay {
    fn delay_ms(&mut self, millis: u32) {
        self.inner.delay_ms(millis);
    }
}
