//! SGMII MAC configuration
//!
//! In SGMII mode the I/O macro plays almost no part; the speed lives in the
//! MAC control register, which gets reset on every interface toggle and must
//! be reprogrammed on link-up. Only 10/100/1000 Mb/s are configurable here;
//! 2500 Mb/s is owned by the serdes and rejected before any write.

use crate::driver::config::{LinkContext, Speed};
use crate::driver::error::{ConfigError, Result};
use crate::hal::window::RegisterWindow;
use crate::register::{
    MAC_CTRL_PORT_SEL, MAC_CTRL_REG, MAC_CTRL_SPEED_MODE, RGMII_CONFIG2_RGMII_CLK_SEL_CFG,
    RGMII_CONFIG_SGMII_CLK_DVDR, RGMII_IO_MACRO_CONFIG, RGMII_IO_MACRO_CONFIG2,
    SGMII_10M_RX_CLK_DVDR,
};

/// Program the MAC control register (and the macro's clock selects) for the
/// context's speed.
pub fn configure<R, M>(rgmii: &mut R, mac: &mut M, ctx: &LinkContext<'_>) -> Result<()>
where
    R: RegisterWindow,
    M: RegisterWindow,
{
    let mut ctrl = mac.read(MAC_CTRL_REG);

    match ctx.speed {
        Speed::Mbps1000 => {
            ctrl &= !MAC_CTRL_PORT_SEL;
            rgmii.update_bits(
                RGMII_CONFIG2_RGMII_CLK_SEL_CFG,
                RGMII_CONFIG2_RGMII_CLK_SEL_CFG,
                RGMII_IO_MACRO_CONFIG2,
            );
        }
        Speed::Mbps100 => {
            ctrl |= MAC_CTRL_PORT_SEL | MAC_CTRL_SPEED_MODE;
        }
        Speed::Mbps10 => {
            ctrl |= MAC_CTRL_PORT_SEL;
            ctrl &= !MAC_CTRL_SPEED_MODE;
            rgmii.update_bits(
                RGMII_CONFIG_SGMII_CLK_DVDR,
                SGMII_10M_RX_CLK_DVDR << 10,
                RGMII_IO_MACRO_CONFIG,
            );
        }
        Speed::Mbps2500 => {
            #[cfg(feature = "defmt")]
            defmt::error!("invalid SGMII speed {} Mb/s", ctx.speed.mbps());
            return Err(ConfigError::InvalidSpeed);
        }
    }

    mac.write(ctrl, MAC_CTRL_REG);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::PhyInterface;
    use crate::driver::profile::{EmacRevision, RevisionProfile};
    use crate::hal::clock::link_clock_rate;
    use crate::test_utils::MockWindow;

    fn ctx(speed: Speed) -> LinkContext<'static> {
        LinkContext {
            speed,
            interface: PhyInterface::Sgmii,
            profile: RevisionProfile::resolve(EmacRevision::V4_0_0),
            link_clk_rate: link_clock_rate(speed).unwrap_or(0),
        }
    }

    #[test]
    fn gigabit_clears_port_select() {
        let mut rgmii = MockWindow::new();
        let mut mac = MockWindow::new();
        mac.write(MAC_CTRL_PORT_SEL | MAC_CTRL_SPEED_MODE, MAC_CTRL_REG);

        configure(&mut rgmii, &mut mac, &ctx(Speed::Mbps1000)).unwrap();

        assert_eq!(mac.read(MAC_CTRL_REG) & MAC_CTRL_PORT_SEL, 0);
        assert_ne!(
            rgmii.read(RGMII_IO_MACRO_CONFIG2) & RGMII_CONFIG2_RGMII_CLK_SEL_CFG,
            0
        );
    }

    #[test]
    fn hundred_selects_mii_fast() {
        let mut rgmii = MockWindow::new();
        let mut mac = MockWindow::new();

        configure(&mut rgmii, &mut mac, &ctx(Speed::Mbps100)).unwrap();

        let ctrl = mac.read(MAC_CTRL_REG);
        assert_ne!(ctrl & MAC_CTRL_PORT_SEL, 0);
        assert_ne!(ctrl & MAC_CTRL_SPEED_MODE, 0);
    }

    #[test]
    fn ten_selects_mii_slow_and_divides_rx_clock() {
        let mut rgmii = MockWindow::new();
        let mut mac = MockWindow::new();
        mac.write(MAC_CTRL_SPEED_MODE, MAC_CTRL_REG);

        configure(&mut rgmii, &mut mac, &ctx(Speed::Mbps10)).unwrap();

        let ctrl = mac.read(MAC_CTRL_REG);
        assert_ne!(ctrl & MAC_CTRL_PORT_SEL, 0);
        assert_eq!(ctrl & MAC_CTRL_SPEED_MODE, 0);
        assert_eq!(
            rgmii.read(RGMII_IO_MACRO_CONFIG) & RGMII_CONFIG_SGMII_CLK_DVDR,
            SGMII_10M_RX_CLK_DVDR << 10
        );
    }

    #[test]
    fn serdes_speed_is_rejected_without_writes() {
        let mut rgmii = MockWindow::new();
        let mut mac = MockWindow::new();
        mac.write(0xAAAA_5555, MAC_CTRL_REG);
        let rgmii_before = rgmii.snapshot();
        let mac_before = mac.snapshot();

        let err = configure(&mut rgmii, &mut mac, &ctx(Speed::Mbps2500)).unwrap_err();

        assert_eq!(err, ConfigError::InvalidSpeed);
        assert_eq!(rgmii.snapshot(), rgmii_before);
        assert_eq!(mac.snapshot(), mac_before);
    }
}
