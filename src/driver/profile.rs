//! Revision profiles
//!
//! The EMAC core and its I/O macro went through several silicon revisions
//! with different power-on-reset values, timing constants, and quirks. All
//! of that is collected here into one immutable table keyed by
//! [`EmacRevision`], so the calibration and macro code can stay free of
//! per-revision `if` chains.
//!
//! Every numeric value in this module is calibrated against physical
//! hardware and must be reproduced verbatim.

use crate::hal::window::RegisterWindow;
use crate::register::{
    EMAC_HW_VERSION, RGMII_IO_MACRO_CONFIG, RGMII_IO_MACRO_CONFIG2, SDCC_HC_REG_DDR_CONFIG,
    SDCC_HC_REG_DLL_CONFIG, SDCC_HC_REG_DLL_CONFIG2, SDCC_USR_CTL,
};

// =============================================================================
// Hardware version codes (EMAC_HW_VERSION register)
// =============================================================================

/// Core hardware version code for v2.1.1
pub const EMAC_HW_V2_1_1: u32 = 0x2001_0001;
/// Core hardware version code for v2.1.2
pub const EMAC_HW_V2_1_2: u32 = 0x2001_0002;
/// Core hardware version code for v2.3.0
pub const EMAC_HW_V2_3_0: u32 = 0x2003_0000;
/// Core hardware version code for v2.3.1
pub const EMAC_HW_V2_3_1: u32 = 0x2003_0001;
/// Core hardware version code for v2.3.2
pub const EMAC_HW_V2_3_2: u32 = 0x2003_0002;
/// Core hardware version code for v3.0.0
pub const EMAC_HW_V3_0_0: u32 = 0x3000_0000;
/// Core hardware version code for v4.0.0
pub const EMAC_HW_V4_0_0: u32 = 0x4000_0000;

// =============================================================================
// Revision tag
// =============================================================================

/// EMAC silicon revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(non_camel_case_types)]
pub enum EmacRevision {
    /// v2.1.0 (sm8150 class)
    V2_1_0,
    /// v2.1.1
    V2_1_1,
    /// v2.1.2
    V2_1_2,
    /// v2.3.0 (qcs404 class)
    V2_3_0,
    /// v2.3.1
    V2_3_1,
    /// v2.3.2
    V2_3_2,
    /// v3.0.0 (sc8280xp class, GE3 silicon)
    V3_0_0,
    /// v4.0.0 (sa8775p class, GE3 silicon with integrated PCS)
    V4_0_0,
    /// Unrecognized revision; runs the generic paths with a baseline profile
    #[default]
    Unknown,
}

impl EmacRevision {
    /// Decode a core hardware version register value.
    ///
    /// Unrecognized codes map to [`EmacRevision::Unknown`]; the driver stays
    /// functional on such parts, just without revision-specific tuning.
    pub const fn from_hw_version(code: u32) -> Self {
        match code {
            EMAC_HW_V2_1_1 => EmacRevision::V2_1_1,
            EMAC_HW_V2_1_2 => EmacRevision::V2_1_2,
            EMAC_HW_V2_3_0 => EmacRevision::V2_3_0,
            EMAC_HW_V2_3_1 => EmacRevision::V2_3_1,
            EMAC_HW_V2_3_2 => EmacRevision::V2_3_2,
            EMAC_HW_V3_0_0 => EmacRevision::V3_0_0,
            EMAC_HW_V4_0_0 => EmacRevision::V4_0_0,
            _ => EmacRevision::Unknown,
        }
    }

    /// Resolve the revision from a platform compatibility string.
    pub fn from_compatible(compatible: &str) -> Option<Self> {
        match compatible {
            "qcom,sm8150-ethqos" => Some(EmacRevision::V2_1_0),
            "qcom,qcs404-ethqos" => Some(EmacRevision::V2_3_0),
            "qcom,sc8280xp-ethqos" => Some(EmacRevision::V3_0_0),
            "qcom,sa8775p-ethqos" => Some(EmacRevision::V4_0_0),
            _ => None,
        }
    }

    /// Read and decode the hardware version register from the rgmii window.
    pub fn read_from<W: RegisterWindow>(regs: &W) -> Self {
        Self::from_hw_version(regs.read(EMAC_HW_VERSION))
    }
}

// =============================================================================
// Profile data
// =============================================================================

/// One power-on-reset register/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PorEntry {
    /// Byte offset in the rgmii window
    pub offset: u32,
    /// Power-on-reset value
    pub value: u32,
}

/// DWMAC4 per-block DMA/MTL channel address table (GE3 silicon only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dwmac4Addrs {
    /// DMA channel base
    pub dma_chan: u32,
    /// DMA channel stride
    pub dma_chan_offset: u32,
    /// MTL channel base
    pub mtl_chan: u32,
    /// MTL channel stride
    pub mtl_chan_offset: u32,
    /// MTL ETS control base
    pub mtl_ets_ctrl: u32,
    /// MTL ETS control stride
    pub mtl_ets_ctrl_offset: u32,
    /// MTL TX queue weight base
    pub mtl_txq_weight: u32,
    /// MTL TX queue weight stride
    pub mtl_txq_weight_offset: u32,
    /// MTL send slope credit base
    pub mtl_send_slp_cred: u32,
    /// MTL send slope credit stride
    pub mtl_send_slp_cred_offset: u32,
    /// MTL high credit base
    pub mtl_high_cred: u32,
    /// MTL high credit stride
    pub mtl_high_cred_offset: u32,
    /// MTL low credit base
    pub mtl_low_cred: u32,
    /// MTL low credit stride
    pub mtl_low_cred_offset: u32,
}

/// Immutable per-revision configuration profile.
///
/// Resolved once per attached instance. The strategy fields at the bottom
/// replace the per-revision conditionals the calibration and macro code
/// would otherwise need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionProfile {
    /// Revision this profile describes
    pub revision: EmacRevision,
    /// Ordered power-on-reset list, replayed in full before any DLL or
    /// macro write of a reconfiguration cycle
    pub por: &'static [PorEntry],
    /// Platform wants macro loopback enabled after programming
    pub loopback_default: bool,
    /// GE3 silicon: structurally different calibration and macro sequences
    pub has_ge3: bool,
    /// SGMII loopback workaround needed around speed changes
    pub needs_sgmii_loopback: bool,
    /// MAC has an integrated PCS
    pub has_integrated_pcs: bool,
    /// Host DMA address width, when it deviates from the default
    pub dma_addr_width: Option<u8>,
    /// DWMAC4 channel address table for GE3 parts
    pub dwmac4_addrs: Option<&'static Dwmac4Addrs>,
    /// Platform name of the link reference clock
    pub link_clk_name: &'static str,

    // Per-revision strategy fields (legacy calibration and macro paths).
    /// Receive-clock delay in cycles at 1000 Mb/s
    pub prg_rclk_dly_1000: u32,
    /// Enable clock-data recovery during calibration
    pub cdr_en: bool,
    /// Apply the MCLK-gating / fine-phase / traffic-init tuning writes
    pub dll_fine_tune: bool,
    /// Assert RX program swap at 10/100 Mb/s
    pub rx_prog_swap_low_speed: bool,
    /// Force the TX clock phase shift on at 10 Mb/s regardless of submode
    pub force_phase_shift_10m: bool,
    /// Macro loopback is broken on this revision; keep it off
    pub loopback_forced_off: bool,
    /// Clear DATA_DIVIDE_CLK_SEL while programming the macro
    pub clear_data_divide_clk_sel: bool,
}

// =============================================================================
// Power-on-reset tables
// =============================================================================

const EMAC_V2_1_0_POR: [PorEntry; 6] = [
    PorEntry { offset: RGMII_IO_MACRO_CONFIG, value: 0x40C0_1343 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG, value: 0x2004_642C },
    PorEntry { offset: SDCC_HC_REG_DDR_CONFIG, value: 0x0000_0000 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG2, value: 0x0020_0000 },
    PorEntry { offset: SDCC_USR_CTL, value: 0x0001_0800 },
    PorEntry { offset: RGMII_IO_MACRO_CONFIG2, value: 0x0000_2060 },
];

const EMAC_V2_3_0_POR: [PorEntry; 6] = [
    PorEntry { offset: RGMII_IO_MACRO_CONFIG, value: 0x00C0_1343 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG, value: 0x2004_642C },
    PorEntry { offset: SDCC_HC_REG_DDR_CONFIG, value: 0x0000_0000 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG2, value: 0x0020_0000 },
    PorEntry { offset: SDCC_USR_CTL, value: 0x0001_0800 },
    PorEntry { offset: RGMII_IO_MACRO_CONFIG2, value: 0x0000_2060 },
];

const EMAC_V3_0_0_POR: [PorEntry; 6] = [
    PorEntry { offset: RGMII_IO_MACRO_CONFIG, value: 0x40C0_1343 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG, value: 0x2004_642C },
    PorEntry { offset: SDCC_HC_REG_DDR_CONFIG, value: 0x8004_0800 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG2, value: 0x0020_0000 },
    PorEntry { offset: SDCC_USR_CTL, value: 0x0001_0800 },
    PorEntry { offset: RGMII_IO_MACRO_CONFIG2, value: 0x0000_2060 },
];

const EMAC_V4_0_0_POR: [PorEntry; 6] = [
    PorEntry { offset: RGMII_IO_MACRO_CONFIG, value: 0x40C0_1343 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG, value: 0x2004_642C },
    PorEntry { offset: SDCC_HC_REG_DDR_CONFIG, value: 0x8004_0800 },
    PorEntry { offset: SDCC_HC_REG_DLL_CONFIG2, value: 0x0020_0000 },
    PorEntry { offset: SDCC_USR_CTL, value: 0x0001_0800 },
    PorEntry { offset: RGMII_IO_MACRO_CONFIG2, value: 0x0000_2060 },
];

const GE3_DWMAC4_ADDRS: Dwmac4Addrs = Dwmac4Addrs {
    dma_chan: 0x0000_8100,
    dma_chan_offset: 0x1000,
    mtl_chan: 0x0000_8000,
    mtl_chan_offset: 0x1000,
    mtl_ets_ctrl: 0x0000_8010,
    mtl_ets_ctrl_offset: 0x1000,
    mtl_txq_weight: 0x0000_8018,
    mtl_txq_weight_offset: 0x1000,
    mtl_send_slp_cred: 0x0000_801C,
    mtl_send_slp_cred_offset: 0x1000,
    mtl_high_cred: 0x0000_8020,
    mtl_high_cred_offset: 0x1000,
    mtl_low_cred: 0x0000_8024,
    mtl_low_cred_offset: 0x1000,
};

// =============================================================================
// Profiles
// =============================================================================

/// Baseline used by the legacy (pre-GE3) revisions; individual profiles
/// override the fields that differ.
const LEGACY_BASE: RevisionProfile = RevisionProfile {
    revision: EmacRevision::Unknown,
    por: &[],
    loopback_default: false,
    has_ge3: false,
    needs_sgmii_loopback: false,
    has_integrated_pcs: false,
    dma_addr_width: None,
    dwmac4_addrs: None,
    link_clk_name: "rgmii",
    prg_rclk_dly_1000: 57,
    cdr_en: true,
    dll_fine_tune: true,
    rx_prog_swap_low_speed: false,
    force_phase_shift_10m: false,
    loopback_forced_off: false,
    clear_data_divide_clk_sel: true,
};

const PROFILE_V2_1_0: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V2_1_0,
    por: &EMAC_V2_1_0_POR,
    ..LEGACY_BASE
};

const PROFILE_V2_1_1: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V2_1_1,
    por: &EMAC_V2_1_0_POR,
    rx_prog_swap_low_speed: true,
    force_phase_shift_10m: true,
    ..LEGACY_BASE
};

const PROFILE_V2_1_2: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V2_1_2,
    por: &EMAC_V2_1_0_POR,
    prg_rclk_dly_1000: 52,
    cdr_en: false,
    dll_fine_tune: false,
    rx_prog_swap_low_speed: true,
    force_phase_shift_10m: true,
    loopback_forced_off: true,
    clear_data_divide_clk_sel: false,
    ..LEGACY_BASE
};

const PROFILE_V2_3_0: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V2_3_0,
    por: &EMAC_V2_3_0_POR,
    loopback_default: true,
    ..LEGACY_BASE
};

const PROFILE_V2_3_1: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V2_3_1,
    por: &EMAC_V2_3_0_POR,
    loopback_default: true,
    prg_rclk_dly_1000: 104,
    rx_prog_swap_low_speed: true,
    force_phase_shift_10m: true,
    ..LEGACY_BASE
};

const PROFILE_V2_3_2: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V2_3_2,
    por: &EMAC_V2_3_0_POR,
    loopback_default: true,
    prg_rclk_dly_1000: 69,
    cdr_en: false,
    dll_fine_tune: false,
    rx_prog_swap_low_speed: true,
    force_phase_shift_10m: true,
    loopback_forced_off: true,
    ..LEGACY_BASE
};

const PROFILE_V3_0_0: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V3_0_0,
    por: &EMAC_V3_0_0_POR,
    has_ge3: true,
    dwmac4_addrs: Some(&GE3_DWMAC4_ADDRS),
    prg_rclk_dly_1000: 115,
    dll_fine_tune: false,
    rx_prog_swap_low_speed: true,
    ..LEGACY_BASE
};

const PROFILE_V4_0_0: RevisionProfile = RevisionProfile {
    revision: EmacRevision::V4_0_0,
    por: &EMAC_V4_0_0_POR,
    has_ge3: true,
    needs_sgmii_loopback: true,
    has_integrated_pcs: true,
    dma_addr_width: Some(36),
    dwmac4_addrs: Some(&GE3_DWMAC4_ADDRS),
    link_clk_name: "phyaux",
    prg_rclk_dly_1000: 115,
    dll_fine_tune: false,
    rx_prog_swap_low_speed: true,
    ..LEGACY_BASE
};

const PROFILE_UNKNOWN: RevisionProfile = LEGACY_BASE;

impl RevisionProfile {
    /// Resolve the profile for a revision.
    ///
    /// [`EmacRevision::Unknown`] resolves to a baseline profile with an
    /// empty POR list and all feature flags cleared; the generic
    /// calibration and macro paths still run to completion with it.
    pub const fn resolve(revision: EmacRevision) -> &'static RevisionProfile {
        match revision {
            EmacRevision::V2_1_0 => &PROFILE_V2_1_0,
            EmacRevision::V2_1_1 => &PROFILE_V2_1_1,
            EmacRevision::V2_1_2 => &PROFILE_V2_1_2,
            EmacRevision::V2_3_0 => &PROFILE_V2_3_0,
            EmacRevision::V2_3_1 => &PROFILE_V2_3_1,
            EmacRevision::V2_3_2 => &PROFILE_V2_3_2,
            EmacRevision::V3_0_0 => &PROFILE_V3_0_0,
            EmacRevision::V4_0_0 => &PROFILE_V4_0_0,
            EmacRevision::Unknown => &PROFILE_UNKNOWN,
        }
    }

    /// All enumerated revisions, for exhaustive test sweeps.
    pub const ALL_REVISIONS: [EmacRevision; 9] = [
        EmacRevision::V2_1_0,
        EmacRevision::V2_1_1,
        EmacRevision::V2_1_2,
        EmacRevision::V2_3_0,
        EmacRevision::V2_3_1,
        EmacRevision::V2_3_2,
        EmacRevision::V3_0_0,
        EmacRevision::V4_0_0,
        EmacRevision::Unknown,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hw_version_decoding() {
        assert_eq!(
            EmacRevision::from_hw_version(EMAC_HW_V2_3_2),
            EmacRevision::V2_3_2
        );
        assert_eq!(
            EmacRevision::from_hw_version(EMAC_HW_V3_0_0),
            EmacRevision::V3_0_0
        );
        assert_eq!(
            EmacRevision::from_hw_version(0xDEAD_BEEF),
            EmacRevision::Unknown
        );
    }

    #[test]
    fn compatible_decoding() {
        assert_eq!(
            EmacRevision::from_compatible("qcom,qcs404-ethqos"),
            Some(EmacRevision::V2_3_0)
        );
        assert_eq!(
            EmacRevision::from_compatible("qcom,sa8775p-ethqos"),
            Some(EmacRevision::V4_0_0)
        );
        assert_eq!(EmacRevision::from_compatible("qcom,stmmac-ethqos"), None);
    }

    #[test]
    fn unknown_profile_is_baseline() {
        let profile = RevisionProfile::resolve(EmacRevision::Unknown);
        assert!(profile.por.is_empty());
        assert!(!profile.has_ge3);
        assert!(!profile.loopback_default);
        assert!(!profile.needs_sgmii_loopback);
        assert_eq!(profile.prg_rclk_dly_1000, 57);
    }

    #[test]
    fn rclk_delay_constants_are_the_calibrated_set() {
        for revision in RevisionProfile::ALL_REVISIONS {
            let dly = RevisionProfile::resolve(revision).prg_rclk_dly_1000;
            assert!(
                matches!(dly, 57 | 52 | 69 | 104 | 115),
                "{revision:?} has uncalibrated delay {dly}"
            );
        }
    }

    #[test]
    fn rclk_delay_selection_by_revision() {
        let dly = |r| RevisionProfile::resolve(r).prg_rclk_dly_1000;
        assert_eq!(dly(EmacRevision::V2_1_2), 52);
        assert_eq!(dly(EmacRevision::V2_3_1), 104);
        assert_eq!(dly(EmacRevision::V2_3_2), 69);
        assert_eq!(dly(EmacRevision::V3_0_0), 115);
        assert_eq!(dly(EmacRevision::V4_0_0), 115);
        assert_eq!(dly(EmacRevision::V2_1_0), 57);
        assert_eq!(dly(EmacRevision::Unknown), 57);
    }

    #[test]
    fn cdr_disabled_only_on_the_two_legacy_revisions() {
        for revision in RevisionProfile::ALL_REVISIONS {
            let profile = RevisionProfile::resolve(revision);
            let expect_clear =
                matches!(revision, EmacRevision::V2_1_2 | EmacRevision::V2_3_2);
            assert_eq!(profile.cdr_en, !expect_clear, "{revision:?}");
        }
    }

    #[test]
    fn por_lists_are_ordered_and_verbatim() {
        let profile = RevisionProfile::resolve(EmacRevision::V2_3_0);
        assert_eq!(profile.por.len(), 6);
        assert_eq!(profile.por[0].offset, RGMII_IO_MACRO_CONFIG);
        assert_eq!(profile.por[0].value, 0x00C0_1343);
        assert_eq!(profile.por[1].value, 0x2004_642C);
        assert_eq!(profile.por[5].value, 0x0000_2060);

        let v3 = RevisionProfile::resolve(EmacRevision::V3_0_0);
        assert_eq!(v3.por[2].value, 0x8004_0800);
    }

    #[test]
    fn ge3_profiles_carry_dwmac4_addrs() {
        for revision in [EmacRevision::V3_0_0, EmacRevision::V4_0_0] {
            let profile = RevisionProfile::resolve(revision);
            assert!(profile.has_ge3);
            let addrs = profile.dwmac4_addrs.expect("GE3 needs a channel table");
            assert_eq!(addrs.dma_chan, 0x8100);
            assert_eq!(addrs.mtl_chan_offset, 0x1000);
        }
    }

    #[test]
    fn v4_is_the_sgmii_loopback_part() {
        let profile = RevisionProfile::resolve(EmacRevision::V4_0_0);
        assert!(profile.needs_sgmii_loopback);
        assert!(profile.has_integrated_pcs);
        assert_eq!(profile.dma_addr_width, Some(36));
        assert_eq!(profile.link_clk_name, "phyaux");
    }
}
