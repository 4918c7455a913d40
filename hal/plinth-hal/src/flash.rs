//! Flash driver abstraction
//!
//! Raw access to a flash device at device addresses. Bounds and access
//! rights are enforced by the caller (the partition layer); the driver
//! only reports what the medium itself rejects.

use crate::error::HalError;

/// Flash driver
///
/// `D` identifies the flash device (embedded, external SPI, ...) in the
/// caller's own terms.
pub trait FlashDriver<D> {
    /// Read `buf.len()` bytes starting at `address`
    fn read(&mut self, device: D, address: u32, buf: &mut [u8]) -> Result<(), HalError>;

    /// Program `data` starting at `address`
    ///
    /// The target range must have been erased.
    fn write(&mut self, device: D, address: u32, data: &[u8]) -> Result<(), HalError>;

    /// Erase every sector touching `[address, address + length)`
    fn erase(&mut self, device: D, address: u32, length: u32) -> Result<(), HalError>;
}
