//! Flash devices

use crate::resource::SpiId;

/// How a flash device is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FlashKind {
    /// On-chip flash, memory mapped
    Embedded,
    /// External NOR behind an SPI bus
    ExternalSpi(SpiId),
}

/// Address space a device's base/length are expressed in
///
/// Devices in different spaces never overlap even when their numeric
/// ranges do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AddressSpace {
    SystemBus,
    SpiBus(SpiId),
}

/// Physical medium identity
///
/// Two descriptors carrying the same medium describe windows onto the
/// same chip and are allowed to overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediumId(pub u8);

/// A flash device: a contiguous addressable range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlashDevice {
    pub kind: FlashKind,
    pub base: u32,
    pub length: u32,
    pub space: AddressSpace,
    pub medium: MediumId,
}

impl FlashDevice {
    /// On-chip flash mapped at `base`
    pub const fn embedded(base: u32, length: u32) -> Self {
        Self {
            kind: FlashKind::Embedded,
            base,
            length,
            space: AddressSpace::SystemBus,
            medium: MediumId(0),
        }
    }

    /// External SPI flash addressed from `base` on its bus
    pub const fn external_spi(bus: SpiId, base: u32, length: u32) -> Self {
        Self {
            kind: FlashKind::ExternalSpi(bus),
            base,
            length,
            space: AddressSpace::SpiBus(bus),
            medium: MediumId(1 + bus as u8),
        }
    }

    /// Exclusive end address, widened so it cannot wrap
    pub const fn end(&self) -> u64 {
        self.base as u64 + self.length as u64
    }

    /// Whether `base + length` stays inside the 32-bit address space
    pub const fn fits_address_space(&self) -> bool {
        self.end() <= 1 << 32
    }

    /// Whether `[start, start + length)` lies inside this device
    pub const fn contains_range(&self, start: u32, length: u32) -> bool {
        start >= self.base && start as u64 + length as u64 <= self.end()
    }

    /// Whether two devices claim some of the same addresses
    pub fn overlaps(&self, other: &FlashDevice) -> bool {
        if self.space != other.space || self.medium == other.medium {
            return false;
        }
        (self.base as u64) < other.end() && (other.base as u64) < self.end()
    }
}
