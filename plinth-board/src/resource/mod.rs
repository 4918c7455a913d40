//! Logical resources and their physical bindings

mod descriptor;
mod ids;
mod table;

pub use descriptor::{
    PhysicalDescriptor, PinRef, SpiBusDescriptor, SpiDeviceDescriptor, SpiModeFlags,
    UartDescriptor, WifiBus,
};
pub use ids::{FlashId, GpioId, PartitionId, ResourceClass, ResourceId, SpiId, UartId};
pub use table::ResourceTable;
