//! Real-time clock and backup-domain abstraction

use crate::error::HalError;

/// Backup-domain register index
///
/// Backup registers survive warm resets as long as the backup domain
/// stays powered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BackupRegister(pub u8);

/// Real-time clock
pub trait RealTimeClock {
    /// Enable write access to the backup domain
    fn enable_backup_access(&mut self) -> Result<(), HalError>;

    /// Initialize the RTC peripheral (clock source, prescalers)
    fn init(&mut self) -> Result<(), HalError>;

    /// Set the current time in seconds since the epoch
    fn set_time(&mut self, epoch_seconds: u32) -> Result<(), HalError>;

    /// Read a backup register
    fn read_marker(&mut self, register: BackupRegister) -> Result<u32, HalError>;

    /// Write a backup register
    fn write_marker(&mut self, register: BackupRegister, value: u32) -> Result<(), HalError>;
}
