//! Qualcomm EthQoS link bring-up driver
//!
//! A `no_std`, `no_alloc` Rust driver for the MAC-PHY interface hardware of
//! the Qualcomm EthQoS Ethernet controller: the RGMII I/O macro, the SDCC
//! delay-locked loop (DLL) that generates its phase-shifted receive clock,
//! and the SGMII speed plumbing in the MAC control register.
//!
//! The controller embeds a Synopsys DWMAC core behind a Qualcomm wrapper.
//! The wrapper's analog timing blocks must be recalibrated on every
//! negotiated speed change, with sequences and constants that vary by
//! silicon revision. This crate owns exactly that job; DMA, descriptor
//! rings, and the network stack live elsewhere.
//!
//! # Architecture
//!
//! 1. **Driver Layer** ([`driver`]): revision profiles, DLL calibration,
//!    RGMII/SGMII programming, and the [`EthQosLink`] orchestrator
//! 2. **HAL Layer** ([`hal`]): register window access and the link
//!    reference clock handle
//! 3. **Register Layer** ([`register`]): wrapper register offsets and bit
//!    fields, with every value calibrated against physical silicon
//!
//! # Revision handling
//!
//! Each supported silicon revision resolves to a [`RevisionProfile`]:
//! power-on-reset register images, receive-clock delay taps, and quirk
//! flags. The profile is resolved once at attach, either from the hardware
//! version register ([`EmacRevision::from_hw_version`]) or from the
//! platform compatible string, and drives every later decision.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for driver types
//! - `critical-section`: Enable the ISR-safe [`SharedLink`] wrapper
//!
//! # Example
//!
//! ```ignore
//! use qcom_ethqos_link::{EmacRevision, EthQosLink, PhyInterface, Speed};
//! use qcom_ethqos_link::hal::MmioWindow;
//!
//! let rgmii = unsafe { MmioWindow::new(RGMII_BASE as *mut u32) };
//! let mac = unsafe { MmioWindow::new(MAC_BASE as *mut u32) };
//!
//! let revision = EthQosLink::<_, MmioWindow, _>::detect_revision(&rgmii);
//! let mut link = EthQosLink::attach(
//!     rgmii,
//!     mac,
//!     platform_link_clk,
//!     revision,
//!     PhyInterface::RgmiiId,
//! )?;
//!
//! // On every PHY autonegotiation result:
//! link.set_speed(Speed::Mbps1000, &mut delay)?;
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod register;
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{LinkContext, LinkStats, PhyInterface, Speed};
pub use driver::dll::{DllReport, DllState};
pub use driver::error::{ConfigError, Result};
pub use driver::link::{EthQosLink, RegisterDump};
pub use driver::profile::{Dwmac4Addrs, EmacRevision, PorEntry, RevisionProfile};
pub use hal::clock::{link_clock_rate, LinkClock};
pub use hal::window::{MmioWindow, RegisterWindow};
pub use sync::ClockGate;

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedLink;
