//! Partition table
//!
//! Maps logical partitions onto flash devices and checks the layout once
//! at board construction.

use core::ops::Deref;

use crate::error::{LayoutViolation, LookupError};
use crate::resource::{FlashId, PartitionId, ResourceClass, ResourceId};

use super::{FlashDevice, Partition};

/// Flash devices and the partitions carved out of them
#[derive(Debug, Clone, Copy)]
pub struct PartitionTable<'a> {
    devices: &'a [(FlashId, FlashDevice)],
    partitions: &'a [Partition],
}

impl<'a> PartitionTable<'a> {
    pub const fn new(devices: &'a [(FlashId, FlashDevice)], partitions: &'a [Partition]) -> Self {
        Self {
            devices,
            partitions,
        }
    }

    /// Declared partitions, in table order
    pub fn iter(&self) -> impl Iterator<Item = &'a Partition> {
        self.partitions.iter()
    }

    /// Partitions with an owning device
    pub fn available(&self) -> impl Iterator<Item = &'a Partition> {
        self.partitions.iter().filter(|p| p.is_available())
    }

    pub fn devices(&self) -> impl Iterator<Item = &'a (FlashId, FlashDevice)> {
        self.devices.iter()
    }

    fn device(&self, id: FlashId) -> Option<&'a FlashDevice> {
        self.devices
            .iter()
            .find(|(dev_id, _)| *dev_id == id)
            .map(|(_, dev)| dev)
    }

    /// Look up an implemented partition
    pub fn resolve(&self, id: PartitionId) -> Result<&'a Partition, LookupError> {
        let partition = self
            .partitions
            .iter()
            .find(|p| p.id == id)
            .ok_or(LookupError::UnknownPartition)?;

        if partition.is_available() {
            Ok(partition)
        } else {
            Err(LookupError::PartitionUnavailable(id))
        }
    }

    /// Look up by raw partition index
    pub fn resolve_index(&self, index: u8) -> Result<&'a Partition, LookupError> {
        let id = PartitionId::from_index(index).ok_or(LookupError::UnknownPartition)?;
        self.resolve(id)
    }

    /// Device holding an implemented partition
    pub fn device_of(&self, id: PartitionId) -> Result<&'a FlashDevice, LookupError> {
        let partition = self.resolve(id)?;
        partition
            .owner
            .and_then(|owner| self.device(owner))
            .ok_or(LookupError::UnknownResource {
                class: ResourceClass::Flash,
            })
    }

    /// Start of a partition in its device's address space
    pub fn device_address_of(&self, id: PartitionId) -> Result<u32, LookupError> {
        let base = self.device_of(id)?.base;
        self.offset_of(id)?
            .checked_add(base)
            .ok_or(LookupError::OutsideDevice(id))
    }

    /// Start of a partition relative to its device's base
    ///
    /// Fails for a partition that does not fit its device, so a table that
    /// skipped validation still never yields an address outside the device.
    pub fn offset_of(&self, id: PartitionId) -> Result<u32, LookupError> {
        let device = self.device_of(id)?;
        let partition = self.resolve(id)?;
        if !device.contains_range(partition.start_addr, partition.length) {
            return Err(LookupError::OutsideDevice(id));
        }
        partition
            .start_addr
            .checked_sub(device.base)
            .ok_or(LookupError::OutsideDevice(id))
    }

    /// Validate and keep the proof
    pub fn validated(self) -> Result<ValidatedPartitionTable<'a>, LayoutViolation> {
        self.validate()?;
        Ok(ValidatedPartitionTable { table: self })
    }

    /// Check device ranges and the partition layout
    pub fn validate(&self) -> Result<(), LayoutViolation> {
        self.validate_devices()
            .and_then(|()| self.validate_partitions())
            .map_err(|violation| {
                error!("partition table rejected: {}", violation);
                violation
            })
    }

    fn validate_devices(&self) -> Result<(), LayoutViolation> {
        for (i, (id, device)) in self.devices.iter().enumerate() {
            if !device.fits_address_space() {
                return Err(LayoutViolation::DeviceAddressOverflow(*id));
            }

            for (other_id, other) in &self.devices[i + 1..] {
                if other_id == id {
                    return Err(LayoutViolation::DuplicateResource(ResourceId::Flash(*id)));
                }
                if device.overlaps(other) {
                    return Err(LayoutViolation::DeviceOverlap {
                        first: *id,
                        second: *other_id,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_partitions(&self) -> Result<(), LayoutViolation> {
        for (i, partition) in self.partitions.iter().enumerate() {
            if self.partitions[i + 1..].iter().any(|p| p.id == partition.id) {
                return Err(LayoutViolation::DuplicatePartition(partition.id));
            }

            // Unowned entries are placeholders and take no space
            let Some(owner) = partition.owner else {
                continue;
            };

            let device = self.device(owner).ok_or(LayoutViolation::UnknownOwner {
                partition: partition.id,
                device: owner,
            })?;

            if partition.length == 0 {
                return Err(LayoutViolation::EmptyPartition(partition.id));
            }

            if !device.contains_range(partition.start_addr, partition.length) {
                return Err(LayoutViolation::PartitionOutOfBounds {
                    partition: partition.id,
                    device: owner,
                });
            }

            let clash = self.partitions[i + 1..].iter().find(|other| {
                other.owner == Some(owner)
                    && (partition.start_addr as u64) < other.end()
                    && (other.start_addr as u64) < partition.end()
            });
            if let Some(other) = clash {
                return Err(LayoutViolation::PartitionOverlap {
                    first: partition.id,
                    second: other.id,
                });
            }
        }
        Ok(())
    }
}

/// A [`PartitionTable`] that passed [`PartitionTable::validate`]
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPartitionTable<'a> {
    table: PartitionTable<'a>,
}

impl<'a> ValidatedPartitionTable<'a> {
    /// Wrap a table already checked as part of a board
    pub(crate) const fn checked(table: PartitionTable<'a>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> PartitionTable<'a> {
        self.table
    }
}

impl<'a> Deref for ValidatedPartitionTable<'a> {
    type Target = PartitionTable<'a>;

    fn deref(&self) -> &PartitionTable<'a> {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{MediumId, PartitionOptions};
    use crate::resource::SpiId;
    use proptest::prelude::*;

    const DEVICES: &[(FlashId, FlashDevice)] = &[
        (FlashId::Embedded, FlashDevice::embedded(0x0800_0000, 0x10_0000)),
        (
            FlashId::Spi,
            FlashDevice::external_spi(SpiId::Flash, 0, 0x20_0000),
        ),
    ];

    const PARTITIONS: &[Partition] = &[
        Partition::new(
            PartitionId::Bootloader,
            FlashId::Embedded,
            "Bootloader",
            0x0800_0000,
            0x8000,
            PartitionOptions::READ_ONLY,
        ),
        Partition::new(
            PartitionId::Application,
            FlashId::Embedded,
            "Application",
            0x0800_8000,
            0x8_0000,
            PartitionOptions::READ_ONLY,
        ),
        Partition::unavailable(PartitionId::Ate, "ATE"),
        Partition::new(
            PartitionId::Parameter1,
            FlashId::Spi,
            "PARAMETER1",
            0x0,
            0x1000,
            PartitionOptions::READ_WRITE,
        ),
    ];

    fn table() -> PartitionTable<'static> {
        PartitionTable::new(DEVICES, PARTITIONS)
    }

    fn app(start_addr: u32, length: u32) -> Partition {
        Partition::new(
            PartitionId::Application,
            FlashId::Embedded,
            "Application",
            start_addr,
            length,
            PartitionOptions::READ_ONLY,
        )
    }

    fn boot(start_addr: u32, length: u32) -> Partition {
        Partition::new(
            PartitionId::Bootloader,
            FlashId::Embedded,
            "Bootloader",
            start_addr,
            length,
            PartitionOptions::READ_ONLY,
        )
    }

    #[test]
    fn test_valid_layout() {
        assert_eq!(table().validate(), Ok(()));
    }

    #[test]
    fn test_resolve_application() {
        let table = table();
        let partition = table.resolve(PartitionId::Application).unwrap();
        assert_eq!(partition.label, "Application");
        assert_eq!(table.device_address_of(PartitionId::Application), Ok(0x0800_8000));
        assert_eq!(table.offset_of(PartitionId::Application), Ok(0x8000));

        let device = table.device_of(PartitionId::Application).unwrap();
        let offset = table.offset_of(PartitionId::Application).unwrap();
        assert!(offset + partition.length <= device.length);
    }

    #[test]
    fn test_resolve_unowned() {
        assert_eq!(
            table().resolve(PartitionId::Ate),
            Err(LookupError::PartitionUnavailable(PartitionId::Ate))
        );
        assert_eq!(
            table().device_address_of(PartitionId::Ate),
            Err(LookupError::PartitionUnavailable(PartitionId::Ate))
        );
    }

    #[test]
    fn test_resolve_undeclared() {
        assert_eq!(
            table().resolve(PartitionId::Filesystem),
            Err(LookupError::UnknownPartition)
        );
        assert_eq!(table().resolve_index(200), Err(LookupError::UnknownPartition));
        assert_eq!(
            table().resolve_index(PartitionId::Parameter1 as u8).map(|p| p.id),
            Ok(PartitionId::Parameter1)
        );
    }

    #[test]
    fn test_iteration_order() {
        let table = table();
        let ids: Vec<_> = table.iter().map(|p| p.id).collect();
        assert_eq!(ids[0], PartitionId::Bootloader);
        assert_eq!(ids.len(), 4);
        assert_eq!(table.available().count(), 3);
    }

    #[test]
    fn test_one_byte_overlap_rejected() {
        let partitions = [boot(0x0800_0000, 0x8001), app(0x0800_8000, 0x8_0000)];
        let table = PartitionTable::new(DEVICES, &partitions);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::PartitionOverlap {
                first: PartitionId::Bootloader,
                second: PartitionId::Application,
            })
        );
    }

    #[test]
    fn test_partition_past_device_end() {
        let partitions = [app(0x080F_F000, 0x1001)];
        let table = PartitionTable::new(DEVICES, &partitions);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::PartitionOutOfBounds {
                partition: PartitionId::Application,
                device: FlashId::Embedded,
            })
        );
    }

    #[test]
    fn test_partition_below_device_base() {
        let partitions = [app(0x07FF_F000, 0x2000)];
        let table = PartitionTable::new(DEVICES, &partitions);
        assert!(matches!(
            table.validate(),
            Err(LayoutViolation::PartitionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_empty_partition() {
        let partitions = [app(0x0800_8000, 0)];
        let table = PartitionTable::new(DEVICES, &partitions);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::EmptyPartition(PartitionId::Application))
        );
    }

    #[test]
    fn test_unknown_owner() {
        let devices = [DEVICES[0]];
        let table = PartitionTable::new(&devices, PARTITIONS);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::UnknownOwner {
                partition: PartitionId::Parameter1,
                device: FlashId::Spi,
            })
        );
    }

    #[test]
    fn test_duplicate_partition() {
        let partitions = [app(0x0800_8000, 0x1000), app(0x0801_0000, 0x1000)];
        let table = PartitionTable::new(DEVICES, &partitions);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::DuplicatePartition(PartitionId::Application))
        );
    }

    #[test]
    fn test_device_overflow() {
        let devices = [(FlashId::Embedded, FlashDevice::embedded(0xFFF0_0000, 0x20_0000))];
        let table = PartitionTable::new(&devices, &[]);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::DeviceAddressOverflow(FlashId::Embedded))
        );
    }

    #[test]
    fn test_address_of_partition_below_base() {
        let partitions = [app(0x1000, 0x1000)];
        let table = PartitionTable::new(DEVICES, &partitions);
        assert!(table.validated().is_err());
        assert_eq!(
            table.offset_of(PartitionId::Application),
            Err(LookupError::OutsideDevice(PartitionId::Application))
        );
        assert_eq!(
            table.device_address_of(PartitionId::Application),
            Err(LookupError::OutsideDevice(PartitionId::Application))
        );
    }

    #[test]
    fn test_device_overlap() {
        // A separate chip mapped over the end of the on-chip flash
        let other_chip = FlashDevice {
            medium: MediumId(7),
            ..FlashDevice::embedded(0x080F_0000, 0x2_0000)
        };
        let devices = [
            (FlashId::Embedded, FlashDevice::embedded(0x0800_0000, 0x10_0000)),
            (FlashId::Spi, other_chip),
        ];
        let table = PartitionTable::new(&devices, &[]);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::DeviceOverlap {
                first: FlashId::Embedded,
                second: FlashId::Spi,
            })
        );
    }

    #[test]
    fn test_same_medium_may_overlap() {
        // Two windows onto the same on-chip flash
        let devices = [
            (FlashId::Embedded, FlashDevice::embedded(0x0800_0000, 0x10_0000)),
            (FlashId::Spi, FlashDevice::embedded(0x0808_0000, 0x8_0000)),
        ];
        let table = PartitionTable::new(&devices, &[]);
        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_device_id() {
        let devices = [
            (FlashId::Spi, FlashDevice::external_spi(SpiId::Flash, 0, 0x10_0000)),
            (FlashId::Spi, FlashDevice::external_spi(SpiId::Flash, 0, 0x10_0000)),
        ];
        let table = PartitionTable::new(&devices, &[]);
        assert_eq!(
            table.validate(),
            Err(LayoutViolation::DuplicateResource(ResourceId::Flash(
                FlashId::Spi
            )))
        );
    }

    #[test]
    fn test_validated_table() {
        let table = table().validated().unwrap();
        assert_eq!(table.device_address_of(PartitionId::Parameter1), Ok(0));
    }

    #[test]
    fn test_unowned_partitions_are_not_checked() {
        // Same id space as a real partition, zero length, no owner
        let partitions = [
            app(0x0800_8000, 0x1000),
            Partition::unavailable(PartitionId::Ate, "ATE"),
            Partition::unavailable(PartitionId::LinkKey, "LINK_KEY"),
        ];
        let table = PartitionTable::new(DEVICES, &partitions);
        assert_eq!(table.validate(), Ok(()));
    }

    proptest! {
        #[test]
        fn test_two_partitions_accepted_iff_disjoint(
            a_off in 0u32..0x10_0000,
            a_len in 1u32..0x2_0000,
            b_off in 0u32..0x10_0000,
            b_len in 1u32..0x2_0000,
        ) {
            let base = 0x0800_0000;
            let partitions = [boot(base + a_off, a_len), app(base + b_off, b_len)];
            let table = PartitionTable::new(DEVICES, &partitions);

            let fits = |off: u32, len: u32| off as u64 + len as u64 <= 0x10_0000;
            let disjoint = a_off as u64 + a_len as u64 <= b_off as u64
                || b_off as u64 + b_len as u64 <= a_off as u64;

            prop_assert_eq!(
                table.validate().is_ok(),
                fits(a_off, a_len) && fits(b_off, b_len) && disjoint
            );
        }

        #[test]
        fn test_validated_partitions_stay_inside_device(
            off in 0u32..0x10_0000,
            len in 1u32..0x10_0000,
        ) {
            let partitions = [app(0x0800_0000 + off, len)];
            let table = PartitionTable::new(DEVICES, &partitions);
            if table.validate().is_ok() {
                let device = table.device_of(PartitionId::Application).unwrap();
                let offset = table.offset_of(PartitionId::Application).unwrap();
                prop_assert!(offset as u64 + len as u64 <= device.length as u64);
            }
        }
    }
}
