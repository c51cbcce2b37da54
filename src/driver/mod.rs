//! EthQoS link driver
//!
//! The driver proper: revision profiles, DLL calibration, RGMII/SGMII
//! programming, and the [`EthQosLink`] orchestrator that ties them to the
//! register windows and the link clock.

pub mod config;
pub mod dll;
pub mod error;
pub mod link;
pub mod profile;
pub mod rgmii;
pub mod sgmii;

pub use config::{LinkContext, LinkStats, PhyInterface, Speed};
pub use dll::{DllReport, DllState};
pub use error::{ConfigError, Result};
pub use link::{EthQosLink, RegisterDump};
pub use profile::{EmacRevision, RevisionProfile};
