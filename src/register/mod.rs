//! EthQoS RGMII I/O macro and SDCC DLL register definitions
//!
//! Offsets are relative to the "rgmii" wrapper window unless noted otherwise.
//! Every value here is calibrated against physical silicon; do not derive or
//! round them.

// =============================================================================
// Register Offsets (rgmii window)
// =============================================================================

/// RGMII I/O macro configuration register offset
pub const RGMII_IO_MACRO_CONFIG: u32 = 0x00;
/// SDCC host-controller DLL configuration register offset
pub const SDCC_HC_REG_DLL_CONFIG: u32 = 0x04;
/// SDCC test control register offset
pub const SDCC_TEST_CTL: u32 = 0x08;
/// SDCC host-controller DDR configuration register offset
pub const SDCC_HC_REG_DDR_CONFIG: u32 = 0x0C;
/// SDCC host-controller DLL configuration 2 register offset
pub const SDCC_HC_REG_DLL_CONFIG2: u32 = 0x10;
/// SDC4 status register offset (read-only)
pub const SDC4_STATUS: u32 = 0x14;
/// SDCC user control register offset
pub const SDCC_USR_CTL: u32 = 0x18;
/// RGMII I/O macro configuration 2 register offset
pub const RGMII_IO_MACRO_CONFIG2: u32 = 0x1C;
/// RGMII I/O macro debug register offset
pub const RGMII_IO_MACRO_DEBUG1: u32 = 0x20;
/// EMAC system low-power debug register offset
pub const EMAC_SYSTEM_LOW_POWER_DEBUG: u32 = 0x28;
/// EMAC core hardware version register offset
pub const EMAC_HW_VERSION: u32 = 0x70;
/// EMAC wrapper SGMII PHY control 1 register offset
pub const EMAC_WRAPPER_SGMII_PHY_CNTRL1: u32 = 0xF4;

// =============================================================================
// Register Offsets (mac window)
// =============================================================================

/// MAC control register offset (GMAC configuration, mac window)
pub const MAC_CTRL_REG: u32 = 0x00;

// =============================================================================
// RGMII_IO_MACRO_CONFIG fields
// =============================================================================

/// Functional clock enable
pub const RGMII_CONFIG_FUNC_CLK_EN: u32 = 1 << 30;
/// Positive/negative data edge select
pub const RGMII_CONFIG_POS_NEG_DATA_SEL: u32 = 1 << 23;
/// GPIO RX interrupt configuration (bits 21:20)
pub const RGMII_CONFIG_GPIO_CFG_RX_INT: u32 = 0x3 << 20;
/// GPIO TX interrupt configuration (bits 19:17)
pub const RGMII_CONFIG_GPIO_CFG_TX_INT: u32 = 0x7 << 17;
/// Max speed program field 9 (bits 16:8)
pub const RGMII_CONFIG_MAX_SPD_PRG_9: u32 = 0x1FF << 8;
/// Max speed program field 2 (bits 7:6)
pub const RGMII_CONFIG_MAX_SPD_PRG_2: u32 = 0x3 << 6;
/// Interface select (bits 5:4), 0 = RGMII
pub const RGMII_CONFIG_INTF_SEL: u32 = 0x3 << 4;
/// Bypass the TX internal-delay path
pub const RGMII_CONFIG_BYPASS_TX_ID_EN: u32 = 1 << 3;
/// TX-to-RX loopback enable
pub const RGMII_CONFIG_LOOPBACK_EN: u32 = 1 << 2;
/// Program swap enable
pub const RGMII_CONFIG_PROG_SWAP: u32 = 1 << 1;
/// DDR mode enable
pub const RGMII_CONFIG_DDR_MODE: u32 = 1 << 0;
/// SGMII receive clock divider (bits 18:10)
pub const RGMII_CONFIG_SGMII_CLK_DVDR: u32 = 0x1FF << 10;

/// Max-speed program 9 value for 10 Mb/s
pub const RGMII_CONFIG_MAX_SPD_PRG_9_10M: u32 = (1 << 12) | (0x3 << 8);
/// Max-speed program 2 value for 100 Mb/s
pub const RGMII_CONFIG_MAX_SPD_PRG_2_100M: u32 = 1 << 6;

// =============================================================================
// SDCC_HC_REG_DLL_CONFIG fields
// =============================================================================

/// DLL reset
pub const SDCC_DLL_CONFIG_DLL_RST: u32 = 1 << 30;
/// DLL power down
pub const SDCC_DLL_CONFIG_PDN: u32 = 1 << 29;
/// MCLK frequency select (bits 26:24)
pub const SDCC_DLL_CONFIG_MCLK_FREQ: u32 = 0x7 << 24;
/// CDR external select (bits 23:20)
pub const SDCC_DLL_CONFIG_CDR_SELEXT: u32 = 0xF << 20;
/// CDR extension enable
pub const SDCC_DLL_CONFIG_CDR_EXT_EN: u32 = 1 << 19;
/// Output clock enable
pub const SDCC_DLL_CONFIG_CK_OUT_EN: u32 = 1 << 18;
/// Clock-data-recovery enable
pub const SDCC_DLL_CONFIG_CDR_EN: u32 = 1 << 17;
/// DLL enable
pub const SDCC_DLL_CONFIG_DLL_EN: u32 = 1 << 16;
/// MCLK gating enable
pub const SDCC_DLL_MCLK_GATING_EN: u32 = 1 << 5;
/// CDR fine phase (bits 3:2)
pub const SDCC_DLL_CDR_FINE_PHASE: u32 = 0x3 << 2;

// =============================================================================
// SDCC_HC_REG_DDR_CONFIG fields
// =============================================================================

/// Programmed delay enable
pub const SDCC_DDR_CONFIG_PRG_DLY_EN: u32 = 1 << 31;
/// Extended programmed receive-clock delay (bits 26:21)
pub const SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY: u32 = 0x3F << 21;
/// Extended programmed receive-clock delay code (bits 29:27)
pub const SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE: u32 = 0x7 << 27;
/// Extended programmed receive-clock delay enable
pub const SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_EN: u32 = 1 << 30;
/// TCXO cycles count (bits 11:9)
pub const SDCC_DDR_CONFIG_TCXO_CYCLES_CNT: u32 = 0x7 << 9;
/// Programmed receive-clock delay in cycles (bits 8:0)
pub const SDCC_DDR_CONFIG_PRG_RCLK_DLY: u32 = 0x1FF;

/// EXT_PRG_RCLK_DLY_CODE value 0x5 ("delay code 5")
pub const SDCC_DDR_CONFIG_EXT_PRG_RCLK_DLY_CODE_5: u32 = (1 << 29) | (1 << 27);

// =============================================================================
// SDCC_HC_REG_DLL_CONFIG2 fields
// =============================================================================

/// DLL clock disable
pub const SDCC_DLL_CONFIG2_DLL_CLOCK_DIS: u32 = 1 << 21;
/// MCLK frequency calculation field (bits 17:10)
pub const SDCC_DLL_CONFIG2_MCLK_FREQ_CALC: u32 = 0xFF << 10;
/// DDR traffic init select (bits 3:2)
pub const SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SEL: u32 = 0x3 << 2;
/// DDR traffic init via software
pub const SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SW: u32 = 1 << 1;
/// DDR calibration enable
pub const SDCC_DLL_CONFIG2_DDR_CAL_EN: u32 = 1 << 0;

/// MCLK_FREQ_CALC value programmed during legacy fine tuning (0x1A)
pub const SDCC_DLL_CONFIG2_MCLK_FREQ_CALC_VAL: u32 = 0x1A << 10;
/// DDR_TRAFFIC_INIT_SEL value programmed during legacy fine tuning
pub const SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SEL_VAL: u32 = 1 << 2;

// =============================================================================
// SDC4_STATUS bits
// =============================================================================

/// DLL lock status
pub const SDC4_STATUS_DLL_LOCK: u32 = 1 << 7;

// =============================================================================
// SDCC_USR_CTL fields
// =============================================================================

/// DLL bypass (10/100 Mb/s on GE3 silicon)
pub const SDCC_USR_CTL_DLL_BYPASS: u32 = 1 << 30;
/// Tuning field (bits 26:24) programmed before the legacy lock wait
pub const SDCC_USR_CTL_TUNE: u32 = 0x7 << 24;
/// Tuning value: bit 26 set within the three-bit field
pub const SDCC_USR_CTL_TUNE_VAL: u32 = 1 << 26;

// =============================================================================
// RGMII_IO_MACRO_CONFIG2 fields
// =============================================================================

/// Reserved configuration field (bits 31:17)
pub const RGMII_CONFIG2_RSVD_CONFIG15: u32 = 0x7FFF << 17;
/// RGMII clock select configuration
pub const RGMII_CONFIG2_RGMII_CLK_SEL_CFG: u32 = 1 << 16;
/// TX-to-RX loopback enable
pub const RGMII_CONFIG2_TX_TO_RX_LOOPBACK_EN: u32 = 1 << 13;
/// Clock divide select
pub const RGMII_CONFIG2_CLK_DIVIDE_SEL: u32 = 1 << 12;
/// RX program swap
pub const RGMII_CONFIG2_RX_PROG_SWAP: u32 = 1 << 7;
/// Data divide clock select
pub const RGMII_CONFIG2_DATA_DIVIDE_CLK_SEL: u32 = 1 << 6;
/// TX clock phase-shift enable
pub const RGMII_CONFIG2_TX_CLK_PHASE_SHIFT_EN: u32 = 1 << 5;

// =============================================================================
// MAC_CTRL_REG bits
// =============================================================================

/// Speed mode: 0 = 10 Mb/s, 1 = 100 Mb/s (when port select is set)
pub const MAC_CTRL_SPEED_MODE: u32 = 1 << 14;
/// Port select: 0 = GMII (1000 Mb/s), 1 = MII
pub const MAC_CTRL_PORT_SEL: u32 = 1 << 15;

// =============================================================================
// EMAC_WRAPPER_SGMII_PHY_CNTRL1 bits
// =============================================================================

/// SGMII TX-to-RX loopback enable
pub const SGMII_PHY_CNTRL1_SGMII_TX_TO_RX_LOOPBACK_EN: u32 = 1 << 3;

/// SGMII receive clock divider constant for 10 Mb/s
pub const SGMII_10M_RX_CLK_DVDR: u32 = 0x31;

// =============================================================================
// GE3 ("HSR") fixed configuration constants
// =============================================================================

/// GE3 DLL configuration constant
pub const HSR_DLL_CONFIG: u32 = 0x000B_642C;
/// GE3 DLL configuration 2 constant
pub const HSR_DLL_CONFIG_2: u32 = 0xA001;
/// GE3 DDR configuration constant
pub const HSR_DDR_CONFIG: u32 = 0x8004_0868;
/// GE3 SDCC test-control constant (1000 Mb/s)
pub const HSR_SDCC_DLL_TEST_CTRL: u32 = 0x0180_0000;
/// GE3 SDCC user-control constant (1000 Mb/s)
pub const HSR_SDCC_USR_CTRL: u32 = 0x2C01_0800;
/// GE3 SDCC user-control constant (10/100 Mb/s)
pub const HSR_SDCC_USR_CTRL_LOW_SPEED: u32 = 0x4001_0800;
/// GE3 receive-clock delay in cycles (0.9 ns)
pub const HSR_DDR_CONFIG_PRG_RCLK_DLY: u32 = 115;
