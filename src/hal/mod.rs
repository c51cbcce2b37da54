//! Hardware abstraction layer
//!
//! Register window access and link clock control. Everything else the
//! original platform provides (regulators, GPIO, interrupts, serdes) stays
//! outside this crate.

pub mod clock;
pub mod window;

pub use clock::{LinkClock, link_clock_rate};
pub use window::{MmioWindow, RegisterWindow};
