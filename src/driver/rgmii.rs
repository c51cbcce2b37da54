//! RGMII I/O macro programming
//!
//! After DLL calibration the I/O macro itself is programmed for the
//! negotiated speed: sampling mode, TX delay compensation, receive-clock
//! delay taps, and the optional TX-to-RX loopback. Speed validation happens
//! before the first register write, so an unsupported speed leaves the
//! window untouched.
//!
//! Legacy silicon takes the parameterized sequence in [`macro_init`]; GE3
//! silicon takes the fixed per-speed procedures in [`macro_init_ge3`].

use crate::driver::config::{LinkContext, Speed};
use crate::driver::error::{ConfigError, Result};
use crate::hal::window::RegisterWindow;
use crate::register::{
    RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, RGMII_CONFIG2_RSVD_CONFIG15, RGMII_CONFIG2_RX_PROG_SWAP,
    RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN, RGMII_CONFIG2_TX_TO_RX_LOOPBACK_EN,
    RGMII_CONFIG_BYPASS_TX_ID_EN, RGMII_CONFIG_DDR_MODE, RGMII_CONFIG_INTF_SEL,
    RGMII_CONFIG_LOOPBACK_EN, RGMII_CONFIG_MAX_SPD_PRG_2, RGMII_CONFIG_MAX_SPD_PRG_2_100M,
    RGMII_CONFIG_MAX_SPD_PRG_9, RGMII_CONFIG_MAX_SPD_PRG_9_10M, RGMII_CONFIG_POS_NEG_DATA_SEL,
    RGMII_CONFIG_PROG_SWAP, RGMII_IO_MACRO_CONFIG, RGMII_IO_MACRO_CONFIG2,
    SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY, SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE,
    SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE_5, SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
    SDCC_DDR_CONFIG_PRG_DLY_EN, SDCC_DDR_CONFIG_PRG_RCLK_DLY, SDCC_HC_REG_DDR_CONFIG,
    HSR_DDR_CONFIG_PRG_RCLK_DLY,
};

/// Program the I/O macro for the context's speed (legacy silicon).
pub fn macro_init<W: RegisterWindow>(regs: &mut W, ctx: &LinkContext<'_>) -> Result<()> {
    if !matches!(ctx.speed, Speed::Mbps10 | Speed::Mbps100 | Speed::Mbps1000) {
        #[cfg(feature = "defmt")]
        defmt::error!("invalid RGMII speed {} Mb/s", ctx.speed.mbps());
        return Err(ConfigError::InvalidSpeed);
    }

    // When the PHY already adds the 2 ns TX delay the macro must not shift
    // the TX clock a second time.
    let mut phase_shift = if ctx.interface.phy_provides_tx_delay() {
        0
    } else {
        RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN
    };
    let loopback = if ctx.loopback_enabled() {
        RGMII_CONFIG_LOOPBACK_EN
    } else {
        0
    };
    let rx_prog_swap = if ctx.profile.has_ge3 || ctx.profile.rx_prog_swap_low_speed {
        RGMII_CONFIG2_RX_PROG_SWAP
    } else {
        0
    };

    regs.update_bits(RGMII_CONFIG2_TX_TO_RX_LOOPBACK_EN, 0, RGMII_IO_MACRO_CONFIG2);
    // Interface select zero is RGMII.
    regs.update_bits(RGMII_CONFIG_INTF_SEL, 0, RGMII_IO_MACRO_CONFIG);

    match ctx.speed {
        Speed::Mbps1000 => {
            regs.update_bits(
                RGMII_CONFIG_DDR_MODE,
                RGMII_CONFIG_DDR_MODE,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG_BYPASS_TX_ID_EN, 0, RGMII_IO_MACRO_CONFIG);
            regs.update_bits(
                RGMII_CONFIG_POS_NEG_DATA_SEL,
                RGMII_CONFIG_POS_NEG_DATA_SEL,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(
                RGMII_CONFIG_PROG_SWAP,
                RGMII_CONFIG_PROG_SWAP,
                RGMII_IO_MACRO_CONFIG,
            );
            if ctx.profile.clear_data_divide_clk_sel {
                regs.update_bits(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, 0, RGMII_IO_MACRO_CONFIG2);
            }
            regs.update_bits(
                RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
                phase_shift,
                RGMII_IO_MACRO_CONFIG2,
            );
            regs.update_bits(RGMII_CONFIG2_RSVD_CONFIG15, 0, RGMII_IO_MACRO_CONFIG2);
            regs.update_bits(
                RGMII_CONFIG2_RX_PROG_SWAP,
                RGMII_CONFIG2_RX_PROG_SWAP,
                RGMII_IO_MACRO_CONFIG2,
            );

            // Receive-clock delay tap, characterized per revision.
            regs.update_bits(
                SDCC_DDR_CONFIG_PRG_RCLK_DLY,
                ctx.profile.prg_rclk_dly_1000,
                SDCC_HC_REG_DDR_CONFIG,
            );
            regs.update_bits(
                SDCC_DDR_CONFIG_PRG_DLY_EN,
                SDCC_DDR_CONFIG_PRG_DLY_EN,
                SDCC_HC_REG_DDR_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG_LOOPBACK_EN, loopback, RGMII_IO_MACRO_CONFIG);
        }
        Speed::Mbps100 => {
            regs.update_bits(
                RGMII_CONFIG_DDR_MODE,
                RGMII_CONFIG_DDR_MODE,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(
                RGMII_CONFIG_BYPASS_TX_ID_EN,
                RGMII_CONFIG_BYPASS_TX_ID_EN,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG_POS_NEG_DATA_SEL, 0, RGMII_IO_MACRO_CONFIG);
            regs.update_bits(RGMII_CONFIG_PROG_SWAP, 0, RGMII_IO_MACRO_CONFIG);
            if ctx.profile.clear_data_divide_clk_sel {
                regs.update_bits(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, 0, RGMII_IO_MACRO_CONFIG2);
            }
            regs.update_bits(
                RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
                phase_shift,
                RGMII_IO_MACRO_CONFIG2,
            );
            regs.update_bits(
                RGMII_CONFIG_MAX_SPD_PRG_2,
                RGMII_CONFIG_MAX_SPD_PRG_2_100M,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG2_RSVD_CONFIG15, 0, RGMII_IO_MACRO_CONFIG2);
            regs.update_bits(
                RGMII_CONFIG2_RX_PROG_SWAP,
                rx_prog_swap,
                RGMII_IO_MACRO_CONFIG2,
            );

            write_ext_rclk_delay(regs);
            regs.update_bits(
                SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
                SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
                SDCC_HC_REG_DDR_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG_LOOPBACK_EN, loopback, RGMII_IO_MACRO_CONFIG);
        }
        Speed::Mbps10 => {
            // Some revisions only sample reliably at 10 Mb/s with the TX
            // phase shift on, regardless of who owns the delay.
            if ctx.profile.force_phase_shift_10m {
                phase_shift = RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN;
            }

            regs.update_bits(
                RGMII_CONFIG_DDR_MODE,
                RGMII_CONFIG_DDR_MODE,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(
                RGMII_CONFIG_BYPASS_TX_ID_EN,
                RGMII_CONFIG_BYPASS_TX_ID_EN,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG_POS_NEG_DATA_SEL, 0, RGMII_IO_MACRO_CONFIG);
            regs.update_bits(RGMII_CONFIG_PROG_SWAP, 0, RGMII_IO_MACRO_CONFIG);
            if ctx.profile.clear_data_divide_clk_sel {
                regs.update_bits(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, 0, RGMII_IO_MACRO_CONFIG2);
            }
            regs.update_bits(
                RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
                phase_shift,
                RGMII_IO_MACRO_CONFIG2,
            );
            regs.update_bits(
                RGMII_CONFIG_MAX_SPD_PRG_9,
                RGMII_CONFIG_MAX_SPD_PRG_9_10M,
                RGMII_IO_MACRO_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG2_RSVD_CONFIG15, 0, RGMII_IO_MACRO_CONFIG2);
            regs.update_bits(
                RGMII_CONFIG2_RX_PROG_SWAP,
                rx_prog_swap,
                RGMII_IO_MACRO_CONFIG2,
            );

            write_ext_rclk_delay(regs);
            regs.update_bits(
                SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
                SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
                SDCC_HC_REG_DDR_CONFIG,
            );
            regs.update_bits(RGMII_CONFIG_LOOPBACK_EN, loopback, RGMII_IO_MACRO_CONFIG);
        }
        Speed::Mbps2500 => unreachable!("validated above"),
    }

    Ok(())
}

/// Low-speed extended receive-clock delay: code 0x5 with the delay field
/// saturated.
fn write_ext_rclk_delay<W: RegisterWindow>(regs: &mut W) {
    regs.update_bits(
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE,
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE_5,
        SDCC_HC_REG_DDR_CONFIG,
    );
    regs.update_bits(
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY,
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY,
        SDCC_HC_REG_DDR_CONFIG,
    );
}

// =============================================================================
// GE3 fixed procedures
// =============================================================================

/// Program the I/O macro for the context's speed (GE3 silicon).
///
/// The GE3 procedures are fixed per speed: no loopback policy, no phase
/// shift negotiation, delay tap always 115 cycles at gigabit.
pub fn macro_init_ge3<W: RegisterWindow>(regs: &mut W, ctx: &LinkContext<'_>) -> Result<()> {
    if !matches!(ctx.speed, Speed::Mbps10 | Speed::Mbps100 | Speed::Mbps1000) {
        #[cfg(feature = "defmt")]
        defmt::error!("invalid RGMII speed {} Mb/s", ctx.speed.mbps());
        return Err(ConfigError::InvalidSpeed);
    }

    regs.update_bits(RGMII_CONFIG2_TX_TO_RX_LOOPBACK_EN, 0, RGMII_IO_MACRO_CONFIG2);
    regs.update_bits(RGMII_CONFIG_INTF_SEL, 0, RGMII_IO_MACRO_CONFIG);

    match ctx.speed {
        Speed::Mbps1000 => ge3_config_1000(regs),
        Speed::Mbps100 => ge3_config_100(regs),
        Speed::Mbps10 => ge3_config_10(regs),
        Speed::Mbps2500 => unreachable!("validated above"),
    }

    Ok(())
}

fn ge3_config_1000<W: RegisterWindow>(regs: &mut W) {
    regs.update_bits(
        RGMII_CONFIG_DDR_MODE,
        RGMII_CONFIG_DDR_MODE,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG_BYPASS_TX_ID_EN, 0, RGMII_IO_MACRO_CONFIG);
    regs.update_bits(
        RGMII_CONFIG_POS_NEG_DATA_SEL,
        RGMII_CONFIG_POS_NEG_DATA_SEL,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(
        RGMII_CONFIG_PROG_SWAP,
        RGMII_CONFIG_PROG_SWAP,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, 0, RGMII_IO_MACRO_CONFIG2);
    regs.update_bits(
        RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
        RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
        RGMII_IO_MACRO_CONFIG2,
    );
    regs.update_bits(RGMII_CONFIG2_RSVD_CONFIG15, 0, RGMII_IO_MACRO_CONFIG2);
    regs.update_bits(
        RGMII_CONFIG2_RX_PROG_SWAP,
        RGMII_CONFIG2_RX_PROG_SWAP,
        RGMII_IO_MACRO_CONFIG2,
    );

    regs.update_bits(
        SDCC_DDR_CONFIG_PRG_RCLK_DLY,
        HSR_DDR_CONFIG_PRG_RCLK_DLY,
        SDCC_HC_REG_DDR_CONFIG,
    );
    regs.update_bits(
        SDCC_DDR_CONFIG_PRG_DLY_EN,
        SDCC_DDR_CONFIG_PRG_DLY_EN,
        SDCC_HC_REG_DDR_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG_LOOPBACK_EN, 0, RGMII_IO_MACRO_CONFIG);
}

fn ge3_config_100<W: RegisterWindow>(regs: &mut W) {
    regs.update_bits(
        RGMII_CONFIG_DDR_MODE,
        RGMII_CONFIG_DDR_MODE,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(
        RGMII_CONFIG_BYPASS_TX_ID_EN,
        RGMII_CONFIG_BYPASS_TX_ID_EN,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG_POS_NEG_DATA_SEL, 0, RGMII_IO_MACRO_CONFIG);
    regs.update_bits(RGMII_CONFIG_PROG_SWAP, 0, RGMII_IO_MACRO_CONFIG);
    regs.update_bits(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, 0, RGMII_IO_MACRO_CONFIG2);
    regs.update_bits(
        RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
        RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
        RGMII_IO_MACRO_CONFIG2,
    );
    regs.update_bits(
        RGMII_CONFIG_MAX_SPD_PRG_2,
        RGMII_CONFIG_MAX_SPD_PRG_2_100M,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG2_RSVD_CONFIG15, 0, RGMII_IO_MACRO_CONFIG2);
    regs.update_bits(
        RGMII_CONFIG2_RX_PROG_SWAP,
        RGMII_CONFIG2_RX_PROG_SWAP,
        RGMII_IO_MACRO_CONFIG2,
    );

    write_ext_rclk_delay(regs);
    regs.update_bits(
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
        SDCC_HC_REG_DDR_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG_LOOPBACK_EN, 0, RGMII_IO_MACRO_CONFIG);
}

fn ge3_config_10<W: RegisterWindow>(regs: &mut W) {
    regs.update_bits(
        RGMII_CONFIG_DDR_MODE,
        RGMII_CONFIG_DDR_MODE,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(
        RGMII_CONFIG_BYPASS_TX_ID_EN,
        RGMII_CONFIG_BYPASS_TX_ID_EN,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG_POS_NEG_DATA_SEL, 0, RGMII_IO_MACRO_CONFIG);
    regs.update_bits(RGMII_CONFIG_PROG_SWAP, 0, RGMII_IO_MACRO_CONFIG);
    regs.update_bits(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, 0, RGMII_IO_MACRO_CONFIG2);
    regs.update_bits(
        RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
        RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
        RGMII_IO_MACRO_CONFIG2,
    );
    regs.update_bits(
        RGMII_CONFIG_MAX_SPD_PRG_9,
        RGMII_CONFIG_MAX_SPD_PRG_9_10M,
        RGMII_IO_MACRO_CONFIG,
    );
    regs.update_bits(RGMII_CONFIG2_RSVD_CONFIG15, 0, RGMII_IO_MACRO_CONFIG2);
    regs.update_bits(
        RGMII_CONFIG2_RX_PROG_SWAP,
        RGMII_CONFIG2_RX_PROG_SWAP,
        RGMII_IO_MACRO_CONFIG2,
    );

    // Only the delay code is written at 10 Mb/s; the extended delay path
    // stays as calibration left it.
    regs.update_bits(
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE,
        SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE_5,
        SDCC_HC_REG_DDR_CONFIG,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::PhyInterface;
    use crate::driver::profile::{EmacRevision, RevisionProfile};
    use crate::hal::clock::link_clock_rate;
    use crate::test_utils::MockWindow;

    fn ctx(
        speed: Speed,
        interface: PhyInterface,
        revision: EmacRevision,
    ) -> LinkContext<'static> {
        LinkContext {
            speed,
            interface,
            profile: RevisionProfile::resolve(revision),
            link_clk_rate: link_clock_rate(speed).unwrap_or(0),
        }
    }

    #[test]
    fn invalid_speed_leaves_window_untouched() {
        let mut regs = MockWindow::new();
        regs.write(0x1234_5678, RGMII_IO_MACRO_CONFIG);
        let before = regs.snapshot();

        let err = macro_init(
            &mut regs,
            &ctx(Speed::Mbps2500, PhyInterface::Rgmii, EmacRevision::V2_3_0),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidSpeed);
        assert_eq!(regs.snapshot(), before, "no register may change");

        let err = macro_init_ge3(
            &mut regs,
            &ctx(Speed::Mbps2500, PhyInterface::Rgmii, EmacRevision::V4_0_0),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidSpeed);
        assert_eq!(regs.snapshot(), before, "no register may change");
    }

    #[test]
    fn gigabit_uses_the_revision_delay_tap() {
        for (revision, dly) in [
            (EmacRevision::V2_3_0, 57),
            (EmacRevision::V2_1_2, 52),
            (EmacRevision::V2_3_2, 69),
            (EmacRevision::V2_3_1, 104),
        ] {
            let mut regs = MockWindow::new();
            macro_init(&mut regs, &ctx(Speed::Mbps1000, PhyInterface::Rgmii, revision)).unwrap();
            let ddr = regs.read(SDCC_HC_REG_DDR_CONFIG);
            assert_eq!(ddr & SDCC_DDR_CONFIG_PRG_RCLK_DLY, dly, "{revision:?}");
            assert_ne!(ddr & SDCC_DDR_CONFIG_PRG_DLY_EN, 0, "{revision:?}");
        }
    }

    #[test]
    fn phase_shift_respects_phy_owned_tx_delay() {
        for (interface, expect_shift) in [
            (PhyInterface::Rgmii, true),
            (PhyInterface::RgmiiRxId, true),
            (PhyInterface::RgmiiId, false),
            (PhyInterface::RgmiiTxId, false),
        ] {
            let mut regs = MockWindow::new();
            macro_init(
                &mut regs,
                &ctx(Speed::Mbps1000, interface, EmacRevision::V2_3_0),
            )
            .unwrap();
            let shifted =
                regs.read(RGMII_IO_MACRO_CONFIG2) & RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN != 0;
            assert_eq!(shifted, expect_shift, "{interface:?}");
        }
    }

    #[test]
    fn phase_shift_forced_on_quirk_revisions_at_10m() {
        // PHY owns the delay, but the quirk overrides that at 10 Mb/s.
        let mut regs = MockWindow::new();
        macro_init(
            &mut regs,
            &ctx(Speed::Mbps10, PhyInterface::RgmiiId, EmacRevision::V2_3_1),
        )
        .unwrap();
        assert_ne!(
            regs.read(RGMII_IO_MACRO_CONFIG2) & RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
            0
        );

        // On a non-quirk revision the same setup keeps the shift off.
        let mut regs = MockWindow::new();
        macro_init(
            &mut regs,
            &ctx(Speed::Mbps10, PhyInterface::RgmiiId, EmacRevision::V2_3_0),
        )
        .unwrap();
        assert_eq!(
            regs.read(RGMII_IO_MACRO_CONFIG2) & RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN,
            0
        );
    }

    #[test]
    fn loopback_follows_policy_and_forced_off() {
        let lb = |revision| {
            let mut regs = MockWindow::new();
            macro_init(&mut regs, &ctx(Speed::Mbps1000, PhyInterface::Rgmii, revision)).unwrap();
            regs.read(RGMII_IO_MACRO_CONFIG) & RGMII_CONFIG_LOOPBACK_EN != 0
        };
        assert!(lb(EmacRevision::V2_3_0), "platform default on");
        assert!(!lb(EmacRevision::V2_3_2), "broken loopback forced off");
        assert!(!lb(EmacRevision::V2_1_0), "platform default off");
    }

    #[test]
    fn data_divide_clear_skipped_on_v2_1_2() {
        let mut regs = MockWindow::new();
        regs.write(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, RGMII_IO_MACRO_CONFIG2);
        macro_init(
            &mut regs,
            &ctx(Speed::Mbps100, PhyInterface::Rgmii, EmacRevision::V2_1_2),
        )
        .unwrap();
        assert_ne!(
            regs.read(RGMII_IO_MACRO_CONFIG2) & RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL,
            0,
            "v2.1.2 must not clear the divide select"
        );

        let mut regs = MockWindow::new();
        regs.write(RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL, RGMII_IO_MACRO_CONFIG2);
        macro_init(
            &mut regs,
            &ctx(Speed::Mbps100, PhyInterface::Rgmii, EmacRevision::V2_3_0),
        )
        .unwrap();
        assert_eq!(
            regs.read(RGMII_IO_MACRO_CONFIG2) & RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL,
            0
        );
    }

    #[test]
    fn low_speed_rx_prog_swap_is_per_revision() {
        let swap = |revision| {
            let mut regs = MockWindow::new();
            macro_init(&mut regs, &ctx(Speed::Mbps100, PhyInterface::Rgmii, revision)).unwrap();
            regs.read(RGMII_IO_MACRO_CONFIG2) & RGMII_CONFIG2_RX_PROG_SWAP != 0
        };
        assert!(swap(EmacRevision::V2_3_1));
        assert!(swap(EmacRevision::V2_1_1));
        assert!(!swap(EmacRevision::V2_3_0));
        assert!(!swap(EmacRevision::Unknown));
    }

    #[test]
    fn low_speed_programs_ext_delay_code_5() {
        for speed in [Speed::Mbps10, Speed::Mbps100] {
            let mut regs = MockWindow::new();
            macro_init(&mut regs, &ctx(speed, PhyInterface::Rgmii, EmacRevision::V2_3_0)).unwrap();
            let ddr = regs.read(SDCC_HC_REG_DDR_CONFIG);
            assert_eq!(
                ddr & SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE,
                SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE_5
            );
            assert_eq!(
                ddr & SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY,
                SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY
            );
            assert_ne!(ddr & SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN, 0);
        }
    }

    #[test]
    fn ge3_gigabit_is_fixed() {
        let mut regs = MockWindow::new();
        macro_init_ge3(
            &mut regs,
            &ctx(Speed::Mbps1000, PhyInterface::RgmiiId, EmacRevision::V4_0_0),
        )
        .unwrap();
        let cfg = regs.read(RGMII_IO_MACRO_CONFIG);
        let cfg2 = regs.read(RGMII_IO_MACRO_CONFIG2);
        assert_ne!(cfg & RGMII_CONFIG_DDR_MODE, 0);
        assert_eq!(cfg & RGMII_CONFIG_LOOPBACK_EN, 0, "no loopback on GE3");
        // Fixed procedure: phase shift on even though the PHY owns the delay.
        assert_ne!(cfg2 & RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN, 0);
        assert_eq!(
            regs.read(SDCC_HC_REG_DDR_CONFIG) & SDCC_DDR_CONFIG_PRG_RCLK_DLY,
            HSR_DDR_CONFIG_PRG_RCLK_DLY
        );
    }

    #[test]
    fn ge3_10m_stops_at_the_delay_code() {
        let mut regs = MockWindow::new();
        macro_init_ge3(
            &mut regs,
            &ctx(Speed::Mbps10, PhyInterface::Rgmii, EmacRevision::V3_0_0),
        )
        .unwrap();
        let ddr = regs.read(SDCC_HC_REG_DDR_CONFIG);
        assert_eq!(
            ddr & SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE,
            SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE_5
        );
        assert_eq!(
            ddr & SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN,
            0,
            "extended delay stays disarmed at 10 Mb/s"
        );
        assert_ne!(
            regs.read(RGMII_IO_MACRO_CONFIG) & RGMII_CONFIG_MAX_SPD_PRG_9,
            0
        );
    }
}
