//! Configuration types for the EthQoS link driver

use crate::driver::profile::RevisionProfile;

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    #[default]
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1000 Mbps
    Mbps1000,
    /// 2500 Mbps (serdes-only; not configurable through this driver)
    Mbps2500,
}

impl Speed {
    /// Speed in Mb/s, for logging.
    pub const fn mbps(self) -> u32 {
        match self {
            Speed::Mbps10 => 10,
            Speed::Mbps100 => 100,
            Speed::Mbps1000 => 1000,
            Speed::Mbps2500 => 2500,
        }
    }
}

/// MAC-PHY interface mode, fixed at attach for the instance's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyInterface {
    /// RGMII with delays added by PCB traces or the MAC
    #[default]
    Rgmii,
    /// RGMII with RX and TX delays provided by the PHY
    RgmiiId,
    /// RGMII with RX delay provided by the PHY
    RgmiiRxId,
    /// RGMII with TX delay provided by the PHY
    RgmiiTxId,
    /// Serial GMII
    Sgmii,
}

impl PhyInterface {
    /// True for the serialized (SGMII) interface.
    pub const fn is_serialized(self) -> bool {
        matches!(self, PhyInterface::Sgmii)
    }

    /// True when the PHY already compensates the TX clock delay, so the
    /// I/O macro must not add a phase shift on top.
    pub const fn phy_provides_tx_delay(self) -> bool {
        matches!(self, PhyInterface::RgmiiId | PhyInterface::RgmiiTxId)
    }
}

/// Per-event link context.
///
/// Rebuilt in full on every speed-change event; never patched incrementally.
#[derive(Clone, Copy)]
pub struct LinkContext<'a> {
    /// Negotiated speed for this event
    pub speed: Speed,
    /// Interface mode (fixed at attach)
    pub interface: PhyInterface,
    /// Resolved revision profile
    pub profile: &'a RevisionProfile,
    /// Link reference clock rate derived from the speed, in Hz
    pub link_clk_rate: u64,
}

impl LinkContext<'_> {
    /// Loopback policy after macro programming: the profile default, forced
    /// off on the revisions whose macro loopback is broken.
    pub const fn loopback_enabled(&self) -> bool {
        self.profile.loopback_default && !self.profile.loopback_forced_off
    }
}

/// Soft-timeout counters.
///
/// Calibration timeouts never abort configuration; they are logged and
/// tallied here so the platform can surface degraded timing margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// DLL lock polls that ran out of retries
    pub dll_lock_timeouts: u32,
    /// CK_OUT_EN set/clear polls that ran out of retries
    pub ck_out_timeouts: u32,
}
