//! Flash devices and partition layout

mod device;
mod entry;
mod io;
mod table;

pub use device::{AddressSpace, FlashDevice, FlashKind, MediumId};
pub use entry::{Partition, PartitionOptions};
pub use io::{PartitionAccessError, PartitionIo};
pub use table::{PartitionTable, ValidatedPartitionTable};
