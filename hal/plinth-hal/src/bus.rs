//! Bus controller abstraction

use crate::error::HalError;
use crate::spi::{SpiConfig, SpiPins};
use crate::uart::{UartConfig, UartPins};

/// SPI/UART controller setup
///
/// Called once per declared bus after bring-up. The `instance` index is the
/// board's logical bus index; mapping it to a controller peripheral is the
/// implementation's business.
pub trait BusController {
    /// Configure an SPI controller
    fn configure_spi(
        &mut self,
        instance: u8,
        pins: SpiPins,
        config: &SpiConfig,
    ) -> Result<(), HalError>;

    /// Configure a UART
    fn configure_uart(
        &mut self,
        instance: u8,
        pins: UartPins,
        config: &UartConfig,
    ) -> Result<(), HalError>;
}
