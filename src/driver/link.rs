//! Link bring-up orchestration
//!
//! [`EthQosLink`] owns the two register windows and the link reference
//! clock, resolves the revision profile once at attach, and turns speed
//! negotiation events into the full reconfiguration cycle: POR replay, DLL
//! calibration, macro (or MAC) programming, and clock retargeting.
//!
//! The configuration strategy is fixed at attach from the interface mode and
//! the profile; a speed change never changes which procedure runs, only its
//! per-speed branch.

use embedded_hal::delay::DelayNs;

use crate::driver::config::{LinkContext, LinkStats, PhyInterface, Speed};
use crate::driver::dll;
use crate::driver::error::{ConfigError, Result};
use crate::driver::profile::{EmacRevision, RevisionProfile};
use crate::driver::{rgmii, sgmii};
use crate::hal::clock::{link_clock_rate, LinkClock};
use crate::hal::window::RegisterWindow;
use crate::sync::ClockGate;
use crate::register::{
    EMAC_SYSTEM_LOW_POWER_DEBUG, EMAC_WRAPPER_SGMII_PHY_CNTRL1, RGMII_CONFIG_FUNC_CLK_EN,
    RGMII_IO_MACRO_CONFIG, RGMII_IO_MACRO_CONFIG2, RGMII_IO_MACRO_DEBUG1, SDC4_STATUS,
    SDCC_HC_REG_DDR_CONFIG, SDCC_HC_REG_DLL_CONFIG, SDCC_HC_REG_DLL_CONFIG2, SDCC_USR_CTL,
    SGMII_PHY_CNTRL1_SGMII_TX_TO_RX_LOOPBACK_EN,
};

/// Which configuration procedure a link instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Configurator {
    /// Legacy RGMII: parameterized calibration and macro sequences
    Rgmii,
    /// GE3 RGMII: fixed pre-characterized images
    RgmiiGe3,
    /// SGMII: MAC control register only
    Sgmii,
}

/// Snapshot of the wrapper registers, for bring-up debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDump {
    /// RGMII_IO_MACRO_CONFIG
    pub config: u32,
    /// SDCC_HC_REG_DLL_CONFIG
    pub dll_config: u32,
    /// SDCC_HC_REG_DDR_CONFIG
    pub ddr_config: u32,
    /// SDCC_HC_REG_DLL_CONFIG2
    pub dll_config2: u32,
    /// SDC4_STATUS
    pub sdc4_status: u32,
    /// SDCC_USR_CTL
    pub usr_ctl: u32,
    /// RGMII_IO_MACRO_CONFIG2
    pub config2: u32,
    /// RGMII_IO_MACRO_DEBUG1
    pub debug1: u32,
    /// EMAC_SYSTEM_LOW_POWER_DEBUG
    pub low_power_debug: u32,
}

/// EthQoS MAC-PHY link instance.
///
/// Owns the rgmii wrapper window, the mac window, and the link reference
/// clock handle. One instance per controller; the caller serializes access.
pub struct EthQosLink<R, M, C> {
    rgmii: R,
    mac: M,
    link_clk: C,
    profile: &'static RevisionProfile,
    interface: PhyInterface,
    configurator: Configurator,
    speed: Speed,
    stats: LinkStats,
}

impl<R, M, C> EthQosLink<R, M, C>
where
    R: RegisterWindow,
    M: RegisterWindow,
    C: LinkClock,
{
    /// Attach to a controller.
    ///
    /// Resolves the revision profile, fixes the configuration strategy, and
    /// brings the functional clock up at the 10 Mb/s safe default. No DLL
    /// or macro programming happens until the first [`set_speed`] call.
    ///
    /// Returns [`ConfigError::UnsupportedInterface`] (with no register
    /// writes) when SGMII is requested on silicon without an integrated PCS.
    ///
    /// [`set_speed`]: EthQosLink::set_speed
    pub fn attach(
        rgmii: R,
        mac: M,
        link_clk: C,
        revision: EmacRevision,
        interface: PhyInterface,
    ) -> Result<Self> {
        let profile = RevisionProfile::resolve(revision);

        if interface.is_serialized() && !profile.has_integrated_pcs {
            #[cfg(feature = "defmt")]
            defmt::error!("SGMII requested without an integrated PCS");
            return Err(ConfigError::UnsupportedInterface);
        }

        let configurator = if interface.is_serialized() {
            Configurator::Sgmii
        } else if profile.has_ge3 {
            Configurator::RgmiiGe3
        } else {
            Configurator::Rgmii
        };

        let mut link = Self {
            rgmii,
            mac,
            link_clk,
            profile,
            interface,
            configurator,
            speed: Speed::Mbps10,
            stats: LinkStats::default(),
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "attached: revision {}, interface {}, {}",
            revision,
            interface,
            link.configurator
        );

        link.set_func_clk_en();
        if let Some(rate) = link_clock_rate(link.speed) {
            link.link_clk.set_rate(rate);
        }

        Ok(link)
    }

    /// Read and decode the hardware version register.
    ///
    /// Call before [`attach`](EthQosLink::attach) on platforms that do not
    /// know their revision from the compatible string alone.
    pub fn detect_revision(rgmii: &R) -> EmacRevision {
        EmacRevision::read_from(rgmii)
    }

    /// Reconfigure the link for a newly negotiated speed.
    ///
    /// Runs the full cycle: POR replay, DLL calibration, macro (or MAC)
    /// programming, link clock retarget. Calibration timeouts are soft and
    /// only show up in [`stats`](EthQosLink::stats); an unsupported speed
    /// fails before the first register write.
    pub fn set_speed<D: DelayNs>(&mut self, speed: Speed, delay: &mut D) -> Result<()> {
        let rate = link_clock_rate(speed).ok_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::error!("invalid speed {} Mb/s", speed.mbps());
            ConfigError::InvalidSpeed
        })?;

        // The loopback workaround must be off while the MAC reconfigures.
        self.set_sgmii_loopback(false);

        self.speed = speed;
        self.link_clk.set_rate(rate);

        let ctx = LinkContext {
            speed,
            interface: self.interface,
            profile: self.profile,
            link_clk_rate: rate,
        };

        match self.configurator {
            Configurator::Sgmii => {
                sgmii::configure(&mut self.rgmii, &mut self.mac, &ctx)?;
            }
            Configurator::RgmiiGe3 => {
                self.replay_por();
                self.set_func_clk_en();
                let report = dll::calibrate_ge3(&mut self.rgmii, delay, &ctx);
                self.absorb(report);
                rgmii::macro_init_ge3(&mut self.rgmii, &ctx)?;
            }
            Configurator::Rgmii => {
                self.replay_por();
                self.set_func_clk_en();
                let report = dll::calibrate(&mut self.rgmii, delay, &ctx);
                self.absorb(report);
                rgmii::macro_init(&mut self.rgmii, &ctx)?;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("link configured for {} Mb/s", speed.mbps());

        Ok(())
    }

    /// Rerun the full configuration cycle at the current speed.
    pub fn configure<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.set_speed(self.speed, delay)
    }

    /// Note the wrapper clocks going down, ahead of the platform gating
    /// them. Register access must stop until [`resume_clocks`] runs.
    ///
    /// [`resume_clocks`]: EthQosLink::resume_clocks
    pub fn suspend_clocks(&mut self, gate: &ClockGate) {
        gate.suspend();
    }

    /// Retarget the link clock after the platform re-enables it, and reopen
    /// the gate.
    ///
    /// Without an established link the negotiated speed is meaningless, so
    /// the rate falls back to the 10 Mb/s corner until the next speed event.
    pub fn resume_clocks(&mut self, gate: &ClockGate, link_up: bool) {
        if !link_up {
            self.speed = Speed::Mbps10;
        }
        if let Some(rate) = link_clock_rate(self.speed) {
            self.link_clk.set_rate(rate);
        }
        gate.resume();
    }

    /// Drive the SGMII TX-to-RX loopback workaround.
    ///
    /// A no-op unless the profile needs the workaround and the interface is
    /// serialized.
    pub fn set_sgmii_loopback(&mut self, enable: bool) {
        if !self.profile.needs_sgmii_loopback || !self.interface.is_serialized() {
            return;
        }
        let value = if enable {
            SGMII_PHY_CNTRL1_SGMII_TX_TO_RX_LOOPBACK_EN
        } else {
            0
        };
        self.rgmii.update_bits(
            SGMII_PHY_CNTRL1_SGMII_TX_TO_RX_LOOPBACK_EN,
            value,
            EMAC_WRAPPER_SGMII_PHY_CNTRL1,
        );
    }

    /// Enable the I/O macro functional clock (re-arming the SGMII loopback
    /// workaround first where it applies).
    pub fn set_func_clk_en(&mut self) {
        if self.profile.needs_sgmii_loopback {
            self.set_sgmii_loopback(true);
        }
        self.rgmii.update_bits(
            RGMII_CONFIG_FUNC_CLK_EN,
            RGMII_CONFIG_FUNC_CLK_EN,
            RGMII_IO_MACRO_CONFIG,
        );
    }

    /// Snapshot the wrapper registers.
    pub fn dump_registers(&self) -> RegisterDump {
        let dump = RegisterDump {
            config: self.rgmii.read(RGMII_IO_MACRO_CONFIG),
            dll_config: self.rgmii.read(SDCC_HC_REG_DLL_CONFIG),
            ddr_config: self.rgmii.read(SDCC_HC_REG_DDR_CONFIG),
            dll_config2: self.rgmii.read(SDCC_HC_REG_DLL_CONFIG2),
            sdc4_status: self.rgmii.read(SDC4_STATUS),
            usr_ctl: self.rgmii.read(SDCC_USR_CTL),
            config2: self.rgmii.read(RGMII_IO_MACRO_CONFIG2),
            debug1: self.rgmii.read(RGMII_IO_MACRO_DEBUG1),
            low_power_debug: self.rgmii.read(EMAC_SYSTEM_LOW_POWER_DEBUG),
        };
        #[cfg(feature = "defmt")]
        defmt::debug!("register dump: {}", dump);
        dump
    }

    /// Currently programmed speed.
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// Interface mode fixed at attach.
    pub const fn interface(&self) -> PhyInterface {
        self.interface
    }

    /// Revision profile resolved at attach.
    pub const fn profile(&self) -> &'static RevisionProfile {
        self.profile
    }

    /// Accumulated soft-timeout counters.
    pub const fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Release the windows and the clock handle.
    pub fn free(self) -> (R, M, C) {
        (self.rgmii, self.mac, self.link_clk)
    }

    fn replay_por(&mut self) {
        for entry in self.profile.por {
            self.rgmii.write(entry.value, entry.offset);
        }
    }

    // The terminal DllState stays scoped to the calibration call; only the
    // timeout counters outlive it.
    fn absorb(&mut self, report: dll::DllReport) {
        self.stats.dll_lock_timeouts += report.dll_lock_timeouts;
        self.stats.ck_out_timeouts += report.ck_out_timeouts;
    }
}
