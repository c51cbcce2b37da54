//! SDCC DLL calibration
//!
//! The delay-locked loop inside the SDCC block supplies the phase-shifted
//! receive clock the RGMII I/O macro samples with. It has to be recalibrated
//! from scratch on every speed change, before the macro itself is programmed.
//!
//! Two structurally different procedures exist. Legacy silicon runs a
//! reset/enable/tap-adjust sequence with millisecond-granularity lock polls;
//! GE3 silicon loads fixed pre-characterized register images and uses
//! microsecond settle windows instead. Lock-poll timeouts are soft: they are
//! logged and counted but never abort configuration, and the macro is still
//! programmed afterwards so the link comes up with degraded timing margins
//! rather than not at all.

use embedded_hal::delay::DelayNs;

use crate::driver::config::{LinkContext, Speed};
use crate::hal::window::RegisterWindow;
use crate::register::{
    HSR_DDR_CONFIG, HSR_DDR_CONFIG_PRG_RCLK_DLY, HSR_DLL_CONFIG, HSR_DLL_CONFIG_2,
    HSR_SDCC_DLL_TEST_CTRL, HSR_SDCC_USR_CTRL, HSR_SDCC_USR_CTRL_LOW_SPEED, SDC4_STATUS,
    SDC4_STATUS_DLL_LOCK, SDCC_DDR_CONFIG_PRG_DLY_EN, SDCC_DDR_CONFIG_PRG_RCLK_DLY,
    SDCC_DLL_CDR_FINE_PHASE, SDCC_DLL_CONFIG2_DDR_CAL_EN, SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SEL,
    SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SEL_VAL, SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SW,
    SDCC_DLL_CONFIG2_DLL_CLOCK_DIS, SDCC_DLL_CONFIG2_MCLK_FREQ_CALC,
    SDCC_DLL_CONFIG2_MCLK_FREQ_CALC_VAL, SDCC_DLL_CONFIG_CDR_EN, SDCC_DLL_CONFIG_CDR_EXT_EN,
    SDCC_DLL_CONFIG_CK_OUT_EN, SDCC_DLL_CONFIG_DLL_EN, SDCC_DLL_CONFIG_DLL_RST,
    SDCC_DLL_CONFIG_PDN, SDCC_DLL_MCLK_GATING_EN, SDCC_HC_REG_DDR_CONFIG, SDCC_HC_REG_DLL_CONFIG,
    SDCC_HC_REG_DLL_CONFIG2, SDCC_TEST_CTL, SDCC_USR_CTL, SDCC_USR_CTL_DLL_BYPASS,
    SDCC_USR_CTL_TUNE, SDCC_USR_CTL_TUNE_VAL,
};

/// Retry budget for every DLL poll loop
pub const DLL_POLL_RETRIES: u32 = 1000;

/// Settle window after asserting reset and power-down on GE3 silicon, in µs
const GE3_RESET_ASSERT_SETTLE_US: u32 = 52;
/// Settle window after releasing reset and power-down on GE3 silicon, in µs
const GE3_RESET_RELEASE_SETTLE_US: u32 = 80;

// =============================================================================
// Calibration outcome
// =============================================================================

/// DLL state at the end of a calibration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DllState {
    /// Reset cycle completed; DLL left disabled (10/100 Mb/s on legacy parts)
    Reset,
    /// DLL powered down and bypassed (10/100 Mb/s on GE3 parts)
    PoweredDown,
    /// Calibration started but no terminal observation yet
    Calibrating,
    /// Lock confirmed within the retry budget
    Locked,
    /// Retry budget exhausted without lock; configuration continued anyway
    TimedOut,
}

/// Result of one calibration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DllReport {
    /// Terminal state of the pass
    pub state: DllState,
    /// Lock polls that exhausted their retries during this pass
    pub dll_lock_timeouts: u32,
    /// Output-clock-enable polls that exhausted their retries during this pass
    pub ck_out_timeouts: u32,
}

impl DllReport {
    const fn new() -> Self {
        Self {
            state: DllState::Calibrating,
            dll_lock_timeouts: 0,
            ck_out_timeouts: 0,
        }
    }
}

// =============================================================================
// Legacy calibration
// =============================================================================

/// Run the legacy calibration sequence.
///
/// Below 1000 Mb/s only the reset cycle runs; the DLL plays no part in
/// low-speed sampling on legacy silicon.
pub fn calibrate<W, D>(regs: &mut W, delay: &mut D, ctx: &LinkContext<'_>) -> DllReport
where
    W: RegisterWindow,
    D: DelayNs,
{
    let mut report = DllReport::new();

    // Full reset cycle: assert reset and power-down, then release both.
    regs.update_bits(
        SDCC_DLL_CONFIG_DLL_RST,
        SDCC_DLL_CONFIG_DLL_RST,
        SDCC_HC_REG_DLL_CONFIG,
    );
    regs.update_bits(SDCC_DLL_CONFIG_PDN, SDCC_DLL_CONFIG_PDN, SDCC_HC_REG_DLL_CONFIG);
    regs.update_bits(SDCC_DLL_CONFIG_DLL_RST, 0, SDCC_HC_REG_DLL_CONFIG);
    regs.update_bits(SDCC_DLL_CONFIG_PDN, 0, SDCC_HC_REG_DLL_CONFIG);

    if ctx.speed != Speed::Mbps1000 {
        report.state = DllState::Reset;
        return report;
    }

    regs.update_bits(
        SDCC_DLL_CONFIG_DLL_EN,
        SDCC_DLL_CONFIG_DLL_EN,
        SDCC_HC_REG_DLL_CONFIG,
    );
    regs.update_bits(
        SDCC_DLL_CONFIG_CK_OUT_EN,
        SDCC_DLL_CONFIG_CK_OUT_EN,
        SDCC_HC_REG_DLL_CONFIG,
    );
    if !ctx.profile.has_ge3 {
        regs.update_bits(SDCC_USR_CTL_TUNE, SDCC_USR_CTL_TUNE_VAL, SDCC_USR_CTL);
    }

    // Lock needs time to develop; settle before the first sample.
    let mut locked = false;
    for _ in 0..DLL_POLL_RETRIES {
        delay.delay_ms(1);
        if regs.read(SDC4_STATUS) & SDC4_STATUS_DLL_LOCK != 0 {
            locked = true;
            break;
        }
    }
    if locked {
        report.state = DllState::Locked;
    } else {
        #[cfg(feature = "defmt")]
        defmt::warn!("timeout waiting for DLL lock");
        report.dll_lock_timeouts += 1;
        report.state = DllState::TimedOut;
    }

    // Tap adjustment runs even after a lock timeout.
    configure_taps(regs, delay, ctx, &mut report);

    report
}

/// Legacy tap-adjust pass: bounce the output clock through the
/// clock-data-recovery path and arm DDR calibration.
fn configure_taps<W, D>(regs: &mut W, delay: &mut D, ctx: &LinkContext<'_>, report: &mut DllReport)
where
    W: RegisterWindow,
    D: DelayNs,
{
    let cdr = if ctx.profile.cdr_en {
        SDCC_DLL_CONFIG_CDR_EN
    } else {
        0
    };
    regs.update_bits(SDCC_DLL_CONFIG_CDR_EN, cdr, SDCC_HC_REG_DLL_CONFIG);
    regs.update_bits(
        SDCC_DLL_CONFIG_CDR_EXT_EN,
        SDCC_DLL_CONFIG_CDR_EXT_EN,
        SDCC_HC_REG_DLL_CONFIG,
    );
    regs.update_bits(SDCC_DLL_CONFIG_CK_OUT_EN, 0, SDCC_HC_REG_DLL_CONFIG);
    regs.update_bits(
        SDCC_DLL_CONFIG_DLL_EN,
        SDCC_DLL_CONFIG_DLL_EN,
        SDCC_HC_REG_DLL_CONFIG,
    );

    if ctx.profile.dll_fine_tune {
        regs.update_bits(SDCC_DLL_MCLK_GATING_EN, 0, SDCC_HC_REG_DLL_CONFIG);
        regs.update_bits(SDCC_DLL_CDR_FINE_PHASE, 0, SDCC_HC_REG_DLL_CONFIG);
    }

    wait_ck_out(regs, delay, false, report);

    regs.update_bits(
        SDCC_DLL_CONFIG_CK_OUT_EN,
        SDCC_DLL_CONFIG_CK_OUT_EN,
        SDCC_HC_REG_DLL_CONFIG,
    );

    wait_ck_out(regs, delay, true, report);

    regs.update_bits(
        SDCC_DLL_CONFIG2_DDR_CAL_EN,
        SDCC_DLL_CONFIG2_DDR_CAL_EN,
        SDCC_HC_REG_DLL_CONFIG2,
    );

    if ctx.profile.dll_fine_tune {
        regs.update_bits(SDCC_DLL_CONFIG2_DLL_CLOCK_DIS, 0, SDCC_HC_REG_DLL_CONFIG2);
        regs.update_bits(
            SDCC_DLL_CONFIG2_MCLK_FREQ_CALC,
            SDCC_DLL_CONFIG2_MCLK_FREQ_CALC_VAL,
            SDCC_HC_REG_DLL_CONFIG2,
        );
        regs.update_bits(
            SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SEL,
            SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SEL_VAL,
            SDCC_HC_REG_DLL_CONFIG2,
        );
        regs.update_bits(
            SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SW,
            SDCC_DLL_CONFIG2_DDR_TRAFFIC_INIT_SW,
            SDCC_HC_REG_DLL_CONFIG2,
        );
    }
}

/// Poll until CK_OUT_EN matches `want_set`. Sample first, then settle, so a
/// state that is already correct costs no delay.
fn wait_ck_out<W, D>(regs: &mut W, delay: &mut D, want_set: bool, report: &mut DllReport)
where
    W: RegisterWindow,
    D: DelayNs,
{
    for _ in 0..DLL_POLL_RETRIES {
        let set = regs.read(SDCC_HC_REG_DLL_CONFIG) & SDCC_DLL_CONFIG_CK_OUT_EN != 0;
        if set == want_set {
            return;
        }
        delay.delay_ms(1);
    }
    #[cfg(feature = "defmt")]
    defmt::warn!(
        "timeout waiting for CK_OUT_EN to become {}",
        if want_set { "set" } else { "clear" }
    );
    report.ck_out_timeouts += 1;
}

// =============================================================================
// GE3 calibration
// =============================================================================

/// Run the GE3 calibration sequence.
///
/// GE3 silicon takes fixed pre-characterized register images per speed. At
/// 1000 Mb/s the DLL is re-reset around the image load with microsecond
/// settle windows and then polled for lock; at 10/100 Mb/s the DLL is
/// powered down and bypassed outright.
pub fn calibrate_ge3<W, D>(regs: &mut W, delay: &mut D, ctx: &LinkContext<'_>) -> DllReport
where
    W: RegisterWindow,
    D: DelayNs,
{
    let mut report = DllReport::new();

    regs.update_bits(
        SDCC_DLL_CONFIG_DLL_RST,
        SDCC_DLL_CONFIG_DLL_RST,
        SDCC_HC_REG_DLL_CONFIG,
    );
    regs.update_bits(SDCC_DLL_CONFIG_PDN, SDCC_DLL_CONFIG_PDN, SDCC_HC_REG_DLL_CONFIG);

    if ctx.speed == Speed::Mbps1000 {
        regs.write(HSR_SDCC_DLL_TEST_CTRL, SDCC_TEST_CTL);
        regs.write(HSR_SDCC_USR_CTRL, SDCC_USR_CTL);
        regs.write(HSR_DLL_CONFIG_2, SDCC_HC_REG_DLL_CONFIG2);
    } else {
        regs.write(HSR_SDCC_USR_CTRL_LOW_SPEED, SDCC_USR_CTL);
        regs.write(HSR_DLL_CONFIG_2, SDCC_HC_REG_DLL_CONFIG2);
    }

    regs.update_bits(SDCC_DLL_CONFIG_DLL_RST, 0, SDCC_HC_REG_DLL_CONFIG);
    regs.update_bits(SDCC_DLL_CONFIG_PDN, 0, SDCC_HC_REG_DLL_CONFIG);

    if ctx.speed != Speed::Mbps1000 {
        // No phase-shifted sampling below gigabit; bypass the DLL entirely.
        regs.update_bits(SDCC_DLL_CONFIG_PDN, SDCC_DLL_CONFIG_PDN, SDCC_HC_REG_DLL_CONFIG);
        regs.update_bits(
            SDCC_USR_CTL_DLL_BYPASS,
            SDCC_USR_CTL_DLL_BYPASS,
            SDCC_USR_CTL,
        );
        report.state = DllState::PoweredDown;
        return report;
    }

    regs.update_bits(SDCC_DLL_CONFIG_CK_OUT_EN, 0, SDCC_HC_REG_DLL_CONFIG);

    regs.write(HSR_SDCC_DLL_TEST_CTRL, SDCC_TEST_CTL);
    regs.write(HSR_SDCC_USR_CTRL, SDCC_USR_CTL);
    regs.write(HSR_DDR_CONFIG, SDCC_HC_REG_DDR_CONFIG);
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
    regs.write(HSR_DLL_CONFIG, SDCC_HC_REG_DLL_CONFIG);
    regs.write(HSR_DLL_CONFIG_2, SDCC_HC_REG_DLL_CONFIG2);

    // Bounce reset around the loaded image with the characterized settle
    // windows.
    regs.update_bits(
        SDCC_DLL_CONFIG_DLL_RST,
        SDCC_DLL_CONFIG_DLL_RST,
        SDCC_HC_REG_DLL_CONFIG,
    );
    regs.update_bits(SDCC_DLL_CONFIG_PDN, SDCC_DLL_CONFIG_PDN, SDCC_HC_REG_DLL_CONFIG);
    delay.delay_us(GE3_RESET_ASSERT_SETTLE_US);

    regs.update_bits(SDCC_DLL_CONFIG_DLL_RST, 0, SDCC_HC_REG_DLL_CONFIG);
    regs.update_bits(SDCC_DLL_CONFIG_PDN, 0, SDCC_HC_REG_DLL_CONFIG);
    delay.delay_us(GE3_RESET_RELEASE_SETTLE_US);

    regs.update_bits(
        SDCC_DLL_CONFIG_CK_OUT_EN,
        SDCC_DLL_CONFIG_CK_OUT_EN,
        SDCC_HC_REG_DLL_CONFIG,
    );

    let mut locked = false;
    for _ in 0..DLL_POLL_RETRIES {
        delay.delay_us(1);
        if regs.read(SDC4_STATUS) & SDC4_STATUS_DLL_LOCK != 0 {
            locked = true;
            break;
        }
    }
    if locked {
        report.state = DllState::Locked;
    } else {
        #[cfg(feature = "defmt")]
        defmt::warn!("timeout waiting for DLL lock");
        report.dll_lock_timeouts += 1;
        report.state = DllState::TimedOut;
    }

    report
}
