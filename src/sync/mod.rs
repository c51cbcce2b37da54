//! Synchronization support
//!
//! Two concerns live here:
//!
//! - [`ClockGate`]: a lock-free flag tracking whether the wrapper clocks are
//!   running. The platform suspend path gates them off; register access from
//!   other contexts checks (or waits on) the gate instead of touching a dead
//!   bus.
//! - [`SharedLink`] (feature `critical-section`): an ISR-safe wrapper for a
//!   static [`EthQosLink`](crate::driver::EthQosLink) instance.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

/// Lock-free availability flag for the wrapper clocks.
///
/// Suitable for static initialization. Registers must only be touched while
/// the gate reports available; the suspend/resume transitions belong to the
/// platform power path.
pub struct ClockGate {
    available: AtomicBool,
}

impl ClockGate {
    /// Create a gate with the clocks reported as running.
    pub const fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
        }
    }

    /// Mark the clocks as gated off.
    pub fn suspend(&self) {
        self.available.store(false, Ordering::Release);
    }

    /// Mark the clocks as running again.
    pub fn resume(&self) {
        self.available.store(true, Ordering::Release);
    }

    /// Whether the clocks are currently running.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Wait for the clocks to come back, sampling once per millisecond.
    ///
    /// The wait is bounded: after `timeout_ms` samples the call gives up and
    /// returns `false`, meaning the gate is still closed and registers must
    /// not be touched. Callers must check the return value.
    pub fn wait_available<D: DelayNs>(&self, delay: &mut D, timeout_ms: u32) -> bool {
        for _ in 0..timeout_ms {
            if self.is_available() {
                return true;
            }
            delay.delay_ms(1);
        }
        self.is_available()
    }
}

impl Default for ClockGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "critical-section")]
mod shared {
    use core::cell::RefCell;

    use critical_section::Mutex;

    use crate::driver::EthQosLink;

    /// ISR-safe wrapper for a link instance.
    ///
    /// All access goes through `critical_section::with()`, disabling
    /// interrupts for the duration of the closure.
    ///
    /// # Example
    ///
    /// ```ignore
    /// static LINK: SharedLink<MmioWindow, MmioWindow, PlatformClk> = ...;
    ///
    /// LINK.with(|link| {
    ///     link.as_mut().map(|l| l.resume_clocks(false));
    /// });
    /// ```
    pub struct SharedLink<R, M, C> {
        inner: Mutex<RefCell<Option<EthQosLink<R, M, C>>>>,
    }

    impl<R, M, C> SharedLink<R, M, C> {
        /// Create an empty slot (const, suitable for static initialization).
        pub const fn new() -> Self {
            Self {
                inner: Mutex::new(RefCell::new(None)),
            }
        }

        /// Store an attached link instance in the slot, returning the
        /// previous occupant if any.
        pub fn put(&self, link: EthQosLink<R, M, C>) -> Option<EthQosLink<R, M, C>> {
            critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(link))
        }

        /// Take the link instance back out of the slot.
        pub fn take(&self) -> Option<EthQosLink<R, M, C>> {
            critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
        }

        /// Execute a closure with exclusive access to the slot.
        ///
        /// Interrupts are disabled for the duration of the closure.
        #[inline]
        pub fn with<T, F>(&self, f: F) -> T
        where
            F: FnOnce(&mut Option<EthQosLink<R, M, C>>) -> T,
        {
            critical_section::with(|cs| {
                let mut slot = self.inner.borrow_ref_mut(cs);
                f(&mut slot)
            })
        }
    }

    impl<R, M, C> Default for SharedLink<R, M, C> {
        fn default() -> Self {
            Self::new()
        }
    }

    // SAFETY: all access to the slot happens inside a critical section.
    unsafe impl<R: Send, M: Send, C: Send> Sync for SharedLink<R, M, C> {}
}

#[cfg(feature = "critical-section")]
pub use shared::SharedLink;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockDelay;

    #[test]
    fn gate_starts_available() {
        let gate = ClockGate::new();
        assert!(gate.is_available());
    }

    #[test]
    fn suspend_and_resume_toggle_the_gate() {
        let gate = ClockGate::new();
        gate.suspend();
        assert!(!gate.is_available());
        gate.resume();
        assert!(gate.is_available());
    }

    #[test]
    fn wait_returns_immediately_when_available() {
        let gate = ClockGate::new();
        let mut delay = MockDelay::new();
        assert!(gate.wait_available(&mut delay, 10));
        assert_eq!(delay.total_us(), 0);
    }

    #[test]
    fn wait_times_out_on_a_closed_gate() {
        let gate = ClockGate::new();
        gate.suspend();
        let mut delay = MockDelay::new();
        assert!(!gate.wait_available(&mut delay, 5));
        assert_eq!(delay.total_us(), 5_000);
    }

    #[cfg(feature = "critical-section")]
    mod shared_link {
        use crate::driver::{EmacRevision, EthQosLink, PhyInterface};
        use crate::sync::SharedLink;
        use crate::test_utils::{MockLinkClock, MockWindow};

        type TestLink = EthQosLink<MockWindow, MockWindow, MockLinkClock>;

        fn attach() -> TestLink {
            EthQosLink::attach(
                MockWindow::new(),
                MockWindow::new(),
                MockLinkClock::new(),
                EmacRevision::V2_3_0,
                PhyInterface::Rgmii,
            )
            .unwrap()
        }

        #[test]
        fn slot_round_trip() {
            let slot: SharedLink<MockWindow, MockWindow, MockLinkClock> = SharedLink::new();
            assert!(slot.take().is_none());
            assert!(slot.put(attach()).is_none());
            slot.with(|link| {
                assert!(link.is_some());
            });
            assert!(slot.take().is_some());
            assert!(slot.take().is_none());
        }
    }
}
