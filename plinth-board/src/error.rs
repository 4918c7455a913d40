//! Error taxonomy
//!
//! Lookup errors are ordinary and recoverable: drivers decide whether a
//! missing optional resource matters. Layout violations and bring-up
//! failures are fatal; the board must not continue from them.

use plinth_hal::{HalError, McuPin};
use thiserror_no_std::Error;

use crate::board::BoardRole;
use crate::bringup::BringUpStep;
use crate::resource::{FlashId, GpioId, PartitionId, ResourceClass, ResourceId, SpiId};

/// Recoverable lookup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LookupError {
    /// The board declares no such resource in this class
    #[error("no {class:?} resource with this id on this board")]
    UnknownResource { class: ResourceClass },
    /// Partition id outside the declared table
    #[error("partition is not declared on this board")]
    UnknownPartition,
    /// Partition is declared but has no owning device on this board
    #[error("partition {0:?} is not implemented on this board")]
    PartitionUnavailable(PartitionId),
    /// Partition does not lie inside its owning device
    #[error("partition {0:?} lies outside its device")]
    OutsideDevice(PartitionId),
}

/// Inconsistent board description, detected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutViolation {
    #[error("{0:?} is declared more than once")]
    DuplicateResource(ResourceId),
    #[error("partition {0:?} is declared more than once")]
    DuplicatePartition(PartitionId),
    #[error("{resource:?} uses pin {pin:?} which does not exist on this package")]
    InvalidPin { resource: ResourceId, pin: McuPin },
    #[error("pin {pin:?} backs both {first:?} and {second:?}")]
    PinAliased {
        pin: McuPin,
        first: GpioId,
        second: GpioId,
    },
    #[error("bus pin {pin:?} of {resource:?} is already claimed")]
    BusPinConflict { pin: McuPin, resource: ResourceId },
    #[error("chip select {chip_select:?} of SPI {bus:?} does not resolve")]
    UnresolvedChipSelect { bus: SpiId, chip_select: GpioId },
    #[error("SPI bus {0:?} is referenced but not declared")]
    UndeclaredBus(SpiId),
    #[error("board role {role:?} references undeclared {gpio:?}")]
    UnresolvedRole { role: BoardRole, gpio: GpioId },
    #[error("board policy needs role {0:?} but it is unbound")]
    MissingRole(BoardRole),
    #[error("flash device {0:?} extends past the end of the address space")]
    DeviceAddressOverflow(FlashId),
    #[error("flash devices {first:?} and {second:?} overlap")]
    DeviceOverlap { first: FlashId, second: FlashId },
    #[error("partition {partition:?} names undeclared device {device:?}")]
    UnknownOwner {
        partition: PartitionId,
        device: FlashId,
    },
    #[error("partition {0:?} is empty")]
    EmptyPartition(PartitionId),
    #[error("partition {partition:?} does not fit in device {device:?}")]
    PartitionOutOfBounds {
        partition: PartitionId,
        device: FlashId,
    },
    #[error("partitions {first:?} and {second:?} overlap")]
    PartitionOverlap {
        first: PartitionId,
        second: PartitionId,
    },
}

/// Fatal failure during board bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("bring-up failed during {step:?}: {cause:?}")]
pub struct BringUpFailed {
    /// Step that was executing
    pub step: BringUpStep,
    /// Collaborator failure
    pub cause: HalError,
}

/// Bring-up did not produce a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpError {
    /// Bring-up already ran (or started) during this boot
    #[error("bring-up already ran this boot")]
    AlreadyRan,
    #[error(transparent)]
    Failed(#[from] BringUpFailed),
}

/// Any board-layer error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Layout(#[from] LayoutViolation),
    #[error(transparent)]
    BringUp(#[from] BringUpError),
}

impl From<BringUpFailed> for Error {
    fn from(failure: BringUpFailed) -> Self {
        Error::BringUp(failure.into())
    }
}
