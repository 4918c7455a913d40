//! Bounded partition access
//!
//! Offsets passed to [`PartitionIo`] are relative to the partition start.
//! An access is rejected before reaching the driver when it leaves the
//! partition or the partition's options forbid it.

use plinth_hal::{FlashDriver, HalError};
use thiserror_no_std::Error;

use crate::error::LookupError;
use crate::resource::{FlashId, PartitionId};

use super::{Partition, ValidatedPartitionTable};

/// Partition access failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PartitionAccessError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Partition options do not permit the operation
    #[error("partition {0:?} does not permit this access")]
    AccessDenied(PartitionId),
    /// Range leaves the partition
    #[error("access outside partition {0:?}")]
    OutOfRange(PartitionId),
    #[error("flash driver error: {0:?}")]
    Driver(HalError),
}

impl From<HalError> for PartitionAccessError {
    fn from(e: HalError) -> Self {
        PartitionAccessError::Driver(e)
    }
}

#[derive(Clone, Copy)]
enum Access {
    Read,
    Write,
}

/// Flash driver restricted to the partitions of one table
///
/// Only a validated table is accepted: an unchecked layout could place a
/// partition over another one.
pub struct PartitionIo<'a, F> {
    table: ValidatedPartitionTable<'a>,
    driver: F,
}

impl<'a, F: FlashDriver<FlashId>> PartitionIo<'a, F> {
    pub fn new(table: ValidatedPartitionTable<'a>, driver: F) -> Self {
        Self { table, driver }
    }

    /// Release the underlying driver
    pub fn free(self) -> F {
        self.driver
    }

    /// Translate a partition-relative range into `(device, address)`
    fn locate(
        &self,
        id: PartitionId,
        offset: u32,
        length: u32,
        access: Access,
    ) -> Result<(FlashId, u32), PartitionAccessError> {
        let partition: &Partition = self.table.resolve(id)?;
        let owner = partition
            .owner
            .ok_or(LookupError::PartitionUnavailable(id))?;

        let permitted = match access {
            Access::Read => partition.options.readable(),
            Access::Write => partition.options.writable(),
        };
        if !permitted {
            warn!("partition {} denies access", id);
            return Err(PartitionAccessError::AccessDenied(id));
        }

        if offset as u64 + length as u64 > partition.length as u64 {
            return Err(PartitionAccessError::OutOfRange(id));
        }

        let address = self
            .table
            .device_address_of(id)?
            .checked_add(offset)
            .ok_or(PartitionAccessError::OutOfRange(id))?;
        Ok((owner, address))
    }

    pub fn read(
        &mut self,
        id: PartitionId,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<(), PartitionAccessError> {
        let length = u32::try_from(buf.len()).map_err(|_| PartitionAccessError::OutOfRange(id))?;
        let (device, address) = self.locate(id, offset, length, Access::Read)?;
        self.driver.read(device, address, buf)?;
        Ok(())
    }

    pub fn write(
        &mut self,
        id: PartitionId,
        offset: u32,
        data: &[u8],
    ) -> Result<(), PartitionAccessError> {
        let length = u32::try_from(data.len()).map_err(|_| PartitionAccessError::OutOfRange(id))?;
        let (device, address) = self.locate(id, offset, length, Access::Write)?;
        self.driver.write(device, address, data)?;
        Ok(())
    }

    /// Erase `[offset, offset + length)`; needs write permission
    pub fn erase(
        &mut self,
        id: PartitionId,
        offset: u32,
        length: u32,
    ) -> Result<(), PartitionAccessError> {
        let (device, address) = self.locate(id, offset, length, Access::Write)?;
        debug!("erase {} at {=u32:#x}+{=u32}", device, address, length);
        self.driver.erase(device, address, length)?;
        Ok(())
    }
}
