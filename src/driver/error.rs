//! Error types for the EthQoS link driver
//!
//! Only hard configuration errors surface here. Soft timing errors (DLL and
//! clock-gate polling timeouts) are logged and counted in
//! [`LinkStats`](crate::driver::config::LinkStats) but never fail a call, and
//! resource-acquisition failures (clocks, regulators, interrupts) belong to
//! the platform layer entirely.

/// Hard configuration errors
///
/// When one of these is returned, no register write has been performed by
/// the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Speed not supported by the attached interface mode
    InvalidSpeed,
    /// Interface mode not supported by this driver
    UnsupportedInterface,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidSpeed => "invalid speed",
            ConfigError::UnsupportedInterface => "unsupported interface mode",
        }
    }
}

/// Result type alias for link configuration operations
pub type Result<T> = core::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn error_as_str_non_empty() {
        let variants = [ConfigError::InvalidSpeed, ConfigError::UnsupportedInterface];
        for variant in variants {
            assert!(!variant.as_str().is_empty(), "{variant:?} has empty string");
        }
    }

    #[test]
    fn error_display() {
        let display = format!("{}", ConfigError::InvalidSpeed);
        assert_eq!(display, "invalid speed");
    }

    #[test]
    fn error_equality() {
        assert_eq!(ConfigError::InvalidSpeed, ConfigError::InvalidSpeed);
        assert_ne!(ConfigError::InvalidSpeed, ConfigError::UnsupportedInterface);
    }
}
