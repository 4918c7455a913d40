//! Partition entries

use crate::resource::{FlashId, PartitionId};

/// Partition access flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionOptions(u8);

impl PartitionOptions {
    pub const READ_ENABLED: Self = Self(1 << 0);
    pub const WRITE_ENABLED: Self = Self(1 << 1);

    pub const NONE: Self = Self(0);
    pub const READ_ONLY: Self = Self::READ_ENABLED;
    pub const READ_WRITE: Self = Self(Self::READ_ENABLED.0 | Self::WRITE_ENABLED.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn readable(self) -> bool {
        self.contains(Self::READ_ENABLED)
    }

    pub const fn writable(self) -> bool {
        self.contains(Self::WRITE_ENABLED)
    }
}

/// One named region of a flash device
///
/// `start_addr` is in the owning device's address space, so an embedded
/// partition starts at or above the device base (e.g. 0x0800_8000) while an
/// external SPI partition usually starts near zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Partition {
    pub id: PartitionId,
    /// `None` marks a partition the board does not implement
    pub owner: Option<FlashId>,
    pub label: &'static str,
    pub start_addr: u32,
    pub length: u32,
    pub options: PartitionOptions,
}

impl Partition {
    pub const fn new(
        id: PartitionId,
        owner: FlashId,
        label: &'static str,
        start_addr: u32,
        length: u32,
        options: PartitionOptions,
    ) -> Self {
        Self {
            id,
            owner: Some(owner),
            label,
            start_addr,
            length,
            options,
        }
    }

    /// Declared but not implemented on this board
    pub const fn unavailable(id: PartitionId, label: &'static str) -> Self {
        Self {
            id,
            owner: None,
            label,
            start_addr: 0,
            length: 0,
            options: PartitionOptions::NONE,
        }
    }

    pub const fn is_available(&self) -> bool {
        self.owner.is_some()
    }

    /// Exclusive end, widened so it cannot wrap
    pub const fn end(&self) -> u64 {
        self.start_addr as u64 + self.length as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        assert!(PartitionOptions::READ_WRITE.readable());
        assert!(PartitionOptions::READ_WRITE.writable());
        assert!(!PartitionOptions::READ_ONLY.writable());
        assert_eq!(PartitionOptions::READ_WRITE.bits(), 0b11);
        assert!(!PartitionOptions::NONE.readable());
    }

    #[test]
    fn test_unavailable() {
        let p = Partition::unavailable(PartitionId::Ate, "ATE");
        assert!(!p.is_available());
        assert_eq!(p.options, PartitionOptions::NONE);
    }
}
