//! Errors reported by collaborator implementations

/// Failure reported by a hardware collaborator
///
/// The board layer does not interpret these beyond reporting which
/// bring-up step they interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HalError {
    /// Pin does not exist on this package or cannot take the requested mode
    InvalidPin,
    /// Operation not supported by this implementation
    Unsupported,
    /// Hardware did not respond in time
    Timeout,
    /// Peripheral bus error
    Bus,
    /// Device reported a failure (flash program/erase, RTC init)
    Device,
    /// Address or length outside the device
    OutOfRange,
}
