//! Register window access
//!
//! The wrapper registers live in a fixed, pre-mapped MMIO window. The
//! [`RegisterWindow`] trait abstracts the three access primitives the driver
//! uses so that host tests can substitute a simulated window.
//!
//! Access is not internally synchronized; each window has exactly one owner
//! and the caller serializes every configuration sequence per instance.

/// Read/write/read-modify-write access to a register window.
///
/// Offsets are byte offsets from the window base. The window must already be
/// validated and mapped by the platform layer; a bad mapping is a fatal
/// precondition violation, not an error this trait reports.
pub trait RegisterWindow {
    /// Read a 32-bit register at the given byte offset.
    fn read(&self, offset: u32) -> u32;

    /// Write a 32-bit value at the given byte offset.
    fn write(&mut self, value: u32, offset: u32);

    /// Read-modify-write: clear `mask`, then OR in `value`.
    #[inline]
    fn update_bits(&mut self, mask: u32, value: u32, offset: u32) {
        let temp = self.read(offset);
        self.write((temp & !mask) | value, offset);
    }
}

/// Volatile MMIO implementation of [`RegisterWindow`].
pub struct MmioWindow {
    base: *mut u32,
}

impl MmioWindow {
    /// Create a window over a pre-mapped base address.
    ///
    /// # Safety
    ///
    /// `base` must point to the start of a mapped, 4-byte-aligned register
    /// block that stays valid for the lifetime of the window, and no other
    /// context may access the same block concurrently.
    pub const unsafe fn new(base: *mut u32) -> Self {
        Self { base }
    }

    #[inline(always)]
    fn reg(&self, offset: u32) -> *mut u32 {
        // Offsets are byte offsets; registers are 32 bits wide.
        self.base.wrapping_byte_add(offset as usize)
    }
}

impl RegisterWindow for MmioWindow {
    #[inline(always)]
    fn read(&self, offset: u32) -> u32 {
        unsafe { core::ptr::read_volatile(self.reg(offset)) }
    }

    #[inline(always)]
    fn write(&mut self, value: u32, offset: u32) {
        unsafe { core::ptr::write_volatile(self.reg(offset), value) }
    }
}

// SAFETY: the window is an exclusive handle to its register block; moving it
// to another execution context moves the exclusivity with it.
unsafe impl Send for MmioWindow {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockWindow;

    #[test]
    fn update_bits_clears_mask_then_ors_value() {
        let mut win = MockWindow::new();
        win.write(0xFFFF_FFFF, 0x10);
        win.update_bits(0x0000_00F0, 0x0000_0050, 0x10);
        assert_eq!(win.read(0x10), 0xFFFF_FF5F);
    }

    #[test]
    fn update_bits_with_zero_value_clears_field() {
        let mut win = MockWindow::new();
        win.write(0x0004_0000, 0x04);
        win.update_bits(0x0004_0000, 0, 0x04);
        assert_eq!(win.read(0x04), 0);
    }

    #[test]
    fn mmio_window_round_trip() {
        let mut backing = [0u32; 16];
        let mut win = unsafe { MmioWindow::new(backing.as_mut_ptr()) };
        win.write(0xDEAD_BEEF, 0x08);
        assert_eq!(win.read(0x08), 0xDEAD_BEEF);
        assert_eq!(backing[2], 0xDEAD_BEEF);
    }
}
