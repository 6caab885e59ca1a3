use rp2040_hal::adc::AdcFifo;
use servo_keyer::LightSensor;

/// Light sensor over the RP2040 ADC free-running FIFO.
///
/// The ADC samples continuously on its own; each `try_sample` poll drains
/// whatever conversions have accumulated and keeps only the newest, the same
/// last-write-wins behavior as an interrupt publishing into a `SampleCell`.
pub struct FifoLightSensor<'a> {
    fifo: AdcFifo<'a, u16>,
}

impl<'a> FifoLightSensor<'a> {
    /// Wrap a started free-running FIFO.
    pub fn new(fifo: AdcFifo<'a, u16>) -> Self {
        Self { fifo }
    }
}

impl LightSensor for FifoLightSensor<'_> {
    fn try_sample(&mut self) -> Option<u16> {
        if self.fifo.len() == 0 {
            return None;
        }

        let mut raw = 0;
        while self.fifo.len() > 0 {
            raw = self.fifo.read();
        }

        // The RP2040 ADC is 12-bit; the keyer's default threshold is on the
        // original 10-bit scale.
        Some(raw >> 2)
    }
}
