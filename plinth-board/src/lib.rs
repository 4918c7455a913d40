//! Board descriptor layer
//!
//! Static description of a board and the one-time code that brings it up:
//!
//! - Resource table (logical GPIO/SPI/UART/flash ids to physical pins)
//! - Partition table (named flash regions, layout validation)
//! - Bring-up sequencer (radio reset, RTC check, LEDs, boot straps)
//! - Interrupt priority plan
//! - Shipped board variants
//!
//! Hardware is reached only through the `plinth-hal` traits.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod board;
pub mod boards;
pub mod bringup;
pub mod error;
pub mod irq;
pub mod partition;
pub mod peripherals;
pub mod resource;

#[cfg(test)]
mod testing;

pub use board::{Board, BoardRoles, IndicatorRole, ValidatedBoard};
pub use bringup::{
    run_bring_up, run_bring_up_with, set_indicator, BootModeLatch, BootModeSignal, BringUpReport,
    BOOT_MODE,
};
pub use error::{BringUpError, BringUpFailed, Error, LayoutViolation, LookupError};
pub use irq::{apply_priority_plan, priority_of, tier_of, PriorityTier};
pub use partition::{PartitionIo, PartitionTable, ValidatedPartitionTable};
pub use peripherals::configure_buses;
pub use resource::{PartitionId, ResourceTable};
