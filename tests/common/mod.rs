//! Shared test infrastructure for servo-keyer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use servo_keyer::{DelaySource, LightSensor, ServoDrive};

// ============================================================================
// Mock Sensor
// ============================================================================

/// Mock sensor that plays back a fixed script of poll results, then `None`.
pub struct ScriptedSensor {
    script: Vec<Option<u16>>,
    index: usize,
}

impl ScriptedSensor {
    pub fn new(script: impl IntoIterator<Item = Option<u16>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            index: 0,
        }
    }

    /// A sensor with a fresh result on every poll.
    pub fn constant(raw: u16, polls: usize) -> Self {
        Self::new(std::iter::repeat(Some(raw)).take(polls))
    }
}

impl LightSensor for ScriptedSensor {
    fn try_sample(&mut self) -> Option<u16> {
        let sample = self.script.get(self.index).copied().flatten();
        self.index += 1;
        sample
    }
}

// ============================================================================
// Mock Servo
// ============================================================================

/// Every duty value a mock servo was commanded, in order.
pub type DutyTrace = Rc<RefCell<heapless::Vec<u16, 512>>>;

/// Mock servo that records all commanded duty values for testing.
///
/// The trace handle stays with the test while the servo itself moves into
/// the keyer.
pub struct RecordingServo {
    trace: DutyTrace,
}

impl RecordingServo {
    pub fn new() -> (Self, DutyTrace) {
        let trace: DutyTrace = Rc::new(RefCell::new(heapless::Vec::new()));
        (
            Self {
                trace: Rc::clone(&trace),
            },
            trace,
        )
    }
}

impl ServoDrive for RecordingServo {
    fn set_duty(&mut self, duty: u16) {
        self.trace
            .borrow_mut()
            .push(duty)
            .expect("duty trace capacity exceeded");
    }
}

/// Asserts that a slice of commanded duties moves by exactly one unit per
/// write in the given direction.
pub fn assert_unit_monotonic(trace: &[u16], descending: bool) {
    for pair in trace.windows(2) {
        if descending {
            assert_eq!(pair[1], pair[0] - 1, "not a one-unit descending step");
        } else {
            assert_eq!(pair[1], pair[0] + 1, "not a one-unit ascending step");
        }
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Mock delay that counts calls and accumulates requested milliseconds.
#[derive(Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ms: u64,
}

impl CountingDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelaySource for CountingDelay {
    fn delay_ms(&mut self, millis: u32) {
        self.calls += 1;
        self.total_ms += u64::from(millis);
    }
}

/// Mock delay that does nothing, for tests that only care about duty values.
pub struct NoopDelay;

impl DelaySource for NoopDelay {
    fn delay_ms(&mut self, _millis: u32) {}
}
