//! Light sensor abstraction and the interrupt-to-loop sample cell.
//!
//! Defines the [`LightSensor`] trait the keyer polls, plus [`SampleCell`],
//! a single-producer/single-consumer cell for publishing conversion results
//! out of an interrupt handler without a lock.

use portable_atomic::{AtomicBool, AtomicU16, Ordering};

/// Trait for abstracting the ambient-light sensor.
///
/// Implement this over your ADC. `try_sample` is the "conversion ready" poll:
/// it returns `Some(raw)` exactly when a conversion has completed since the
/// previous call, and `None` otherwise. Acknowledging the hardware ready flag
/// is the implementation's responsibility; a result must never be handed out
/// twice. Handle any hardware errors internally - this method cannot fail.
pub trait LightSensor {
    /// Returns the latest conversion result, if one is newly available.
    fn try_sample(&mut self) -> Option<u16>;
}

/// Single-producer/single-consumer cell for the latest conversion result.
///
/// Re-expresses the classic ISR-shared `volatile` variable as an explicit
/// cell: the conversion-complete interrupt calls [`publish`](Self::publish),
/// the control loop calls [`take`](Self::take). All accesses are relaxed
/// atomics - last write wins, and there is no ordering guarantee between the
/// value and the freshness flag with respect to the reader. In particular, a
/// conversion completing between the reader observing freshness and loading
/// the value may overwrite the sample; this race is benign and accepted
/// because only the latest value ever matters.
///
/// `new` is `const`, so the cell can live in a `static` shared between the
/// interrupt vector and `main`:
///
/// ```
/// use servo_keyer::SampleCell;
///
/// static LIGHT: SampleCell = SampleCell::new();
///
/// // interrupt context
/// LIGHT.publish(0x0300);
///
/// // control loop
/// assert_eq!(LIGHT.take(), Some(0x0300));
/// assert_eq!(LIGHT.take(), None); // consumed until the next publish
/// ```
#[derive(Debug)]
pub struct SampleCell {
    value: AtomicU16,
    fresh: AtomicBool,
}

impl SampleCell {
    /// Creates an empty cell with no sample published yet.
    pub const fn new() -> Self {
        Self {
            value: AtomicU16::new(0),
            fresh: AtomicBool::new(false),
        }
    }

    /// Publishes a conversion result. Producer (interrupt) side.
    ///
    /// Overwrites any unconsumed previous result and marks the cell fresh.
    pub fn publish(&self, raw: u16) {
        self.value.store(raw, Ordering::Relaxed);
        self.fresh.store(true, Ordering::Relaxed);
    }

    /// Takes the result if one was published since the last take.
    /// Consumer (loop) side.
    ///
    /// Clearing the freshness flag is a swap, so a published result is
    /// consumed at most once.
    pub fn take(&self) -> Option<u16> {
        if self.fresh.swap(false, Ordering::Relaxed) {
            Some(self.value.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    /// Returns the most recently published value without consuming it.
    ///
    /// Returns zero if nothing has ever been published.
    pub fn latest(&self) -> u16 {
        self.value.load(Ordering::Relaxed)
    }

    /// Returns true if an unconsumed result is available.
    pub fn is_fresh(&self) -> bool {
        self.fresh.load(Ordering::Relaxed)
    }
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new()
    }
}

/// [`LightSensor`] adapter over a shared [`SampleCell`].
///
/// Use this to hand a `static` cell fed by an interrupt handler to a
/// [`LightKeyer`](crate::LightKeyer).
#[derive(Debug)]
pub struct CellSensor<'c> {
    cell: &'c SampleCell,
}

impl<'c> CellSensor<'c> {
    /// Creates a sensor reading from the given cell.
    pub fn new(cell: &'c SampleCell) -> Self {
        Self { cell }
    }
}

impl LightSensor for CellSensor<'_> {
    fn try_sample(&mut self) -> Option<u16> {
        self.cell.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_yields_nothing() {
        let cell = SampleCell::new();
        assert!(!cell.is_fresh());
        assert_eq!(cell.take(), None);
        assert_eq!(cell.latest(), 0);
    }

    #[test]
    fn published_sample_is_taken_at_most_once() {
        let cell = SampleCell::new();
        cell.publish(0x0208);

        assert!(cell.is_fresh());
        assert_eq!(cell.take(), Some(0x0208));
        assert_eq!(cell.take(), None);
        assert!(!cell.is_fresh());
    }

    #[test]
    fn last_write_wins() {
        let cell = SampleCell::new();
        cell.publish(0x0100);
        cell.publish(0x0300);

        assert_eq!(cell.take(), Some(0x0300));
        assert_eq!(cell.take(), None);
    }

    #[test]
    fn latest_does_not_consume() {
        let cell = SampleCell::new();
        cell.publish(0x0042);

        assert_eq!(cell.latest(), 0x0042);
        assert!(cell.is_fresh());
        assert_eq!(cell.take(), Some(0x0042));
        assert_eq!(cell.latest(), 0x0042);
    }

    #[test]
    fn cell_sensor_forwards_take_semantics() {
        let cell = SampleCell::new();
        let mut sensor = CellSensor::new(&cell);

        assert_eq!(sensor.try_sample(), None);
        cell.publish(7);
        assert_eq!(sensor.try_sample(), Some(7));
        assert_eq!(sensor.try_sample(), None);
    }
}
