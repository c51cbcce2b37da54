//! Testing utilities and mock implementations
//!
//! Mock register windows, delays, and clock handles for exercising the
//! driver on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::collections::BTreeMap;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::hal::clock::LinkClock;
use crate::hal::window::RegisterWindow;

// =============================================================================
// Mock Register Window
// =============================================================================

/// Simulated register window backed by a sparse register map.
///
/// Unwritten registers read as zero, which matches a freshly reset wrapper
/// block closely enough for sequence testing. Every write is also recorded
/// in order so tests can assert on write ordering, not just final state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MockWindow {
    registers: BTreeMap<u32, u32>,
    write_log: Vec<(u32, u32)>,
}

impl MockWindow {
    /// Create an all-zeros window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current register map, for before/after comparisons.
    pub fn snapshot(&self) -> BTreeMap<u32, u32> {
        self.registers.clone()
    }

    /// Ordered `(offset, value)` record of every write so far.
    pub fn write_log(&self) -> &[(u32, u32)] {
        &self.write_log
    }

    /// Forget the write history (the register map is untouched).
    pub fn clear_write_log(&mut self) {
        self.write_log.clear();
    }
}

impl RegisterWindow for MockWindow {
    fn read(&self, offset: u32) -> u32 {
        self.registers.get(&offset).copied().unwrap_or(0)
    }

    fn write(&mut self, value: u32, offset: u32) {
        self.registers.insert(offset, value);
        self.write_log.push((offset, value));
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Delay provider that only counts the time it was asked to spend.
#[derive(Debug, Default)]
pub struct MockDelay {
    elapsed_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in microseconds.
    pub fn total_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

// =============================================================================
// Mock Link Clock
// =============================================================================

/// Link clock handle that records every requested rate.
#[derive(Debug, Default)]
pub struct MockLinkClock {
    rates: Vec<u64>,
}

impl MockLinkClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently requested rate, if any.
    pub fn last_rate(&self) -> Option<u64> {
        self.rates.last().copied()
    }

    /// All requested rates, in order.
    pub fn rates(&self) -> &[u64] {
        &self.rates
    }
}

impl LinkClock for MockLinkClock {
    fn set_rate(&mut self, rate_hz: u64) {
        self.rates.push(rate_hz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_window_reads_zero_when_unwritten() {
        let win = MockWindow::new();
        assert_eq!(win.read(0x70), 0);
    }

    #[test]
    fn mock_window_records_writes_in_order() {
        let mut win = MockWindow::new();
        win.write(0xAA, 0x00);
        win.write(0xBB, 0x04);
        win.write(0xCC, 0x00);
        assert_eq!(win.write_log(), &[(0x00, 0xAA), (0x04, 0xBB), (0x00, 0xCC)]);
        assert_eq!(win.read(0x00), 0xCC);
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_us(52);
        delay.delay_ms(1);
        assert_eq!(delay.total_us(), 1_052);
    }

    #[test]
    fn mock_clock_tracks_rates() {
        let mut clk = MockLinkClock::new();
        assert_eq!(clk.last_rate(), None);
        clk.set_rate(5_000_000);
        clk.set_rate(250_000_000);
        assert_eq!(clk.last_rate(), Some(250_000_000));
        assert_eq!(clk.rates(), &[5_000_000, 250_000_000]);
    }
}
