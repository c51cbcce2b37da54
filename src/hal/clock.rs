//! Link reference clock control
//!
//! The RGMII/phyaux link clock is acquired and enabled by the platform layer;
//! this driver only retargets its rate on speed changes. The per-speed rates
//! are specific low-power frequency corners, not simple bitrate scaling.

use crate::driver::config::Speed;

/// Nominal link clock rate for 1000 Mb/s
pub const RGMII_1000_NOM_CLK_FREQ: u64 = 250 * 1000 * 1000;
/// Low-SVS link clock rate for 100 Mb/s
pub const RGMII_ID_MODE_100_LOW_SVS_CLK_FREQ: u64 = 50 * 1000 * 1000;
/// Low-SVS link clock rate for 10 Mb/s
pub const RGMII_ID_MODE_10_LOW_SVS_CLK_FREQ: u64 = 5 * 1000 * 1000;

/// Platform-provided handle to the link reference clock.
///
/// Rate programming is infallible from the driver's point of view; clock
/// acquisition and enable/disable belong to the platform layer.
pub trait LinkClock {
    /// Set the clock rate in Hz.
    fn set_rate(&mut self, rate_hz: u64);
}

/// Link clock rate for a negotiated speed.
pub const fn link_clock_rate(speed: Speed) -> Option<u64> {
    match speed {
        Speed::Mbps1000 => Some(RGMII_1000_NOM_CLK_FREQ),
        Speed::Mbps100 => Some(RGMII_ID_MODE_100_LOW_SVS_CLK_FREQ),
        Speed::Mbps10 => Some(RGMII_ID_MODE_10_LOW_SVS_CLK_FREQ),
        Speed::Mbps2500 => None,
    }
}
