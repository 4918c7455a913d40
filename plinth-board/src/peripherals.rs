//! Bus configuration pass
//!
//! Hands the declared SPI and UART descriptors to the bus controller after
//! bring-up. An SPI bus is clocked for the first device on it.

use plinth_hal::{BusController, HalError, UartConfig};

use crate::board::ValidatedBoard;

pub fn configure_buses<B: BusController>(
    board: &ValidatedBoard<'_>,
    bus: &mut B,
) -> Result<(), HalError> {
    for (id, descriptor) in board.resources.spi {
        let config = board
            .resources
            .spi_device_on(*id)
            .map(|device| device.config())
            .unwrap_or_default();
        debug!("spi {} at {=u32} Hz", id, config.frequency);
        bus.configure_spi(id.index() as u8, descriptor.pins(), &config)?;
    }

    for (id, descriptor) in board.resources.uart {
        let pins = descriptor.pins();
        let config = UartConfig {
            flow_control: pins.has_flow_control(),
            ..UartConfig::default()
        };
        bus.configure_uart(id.index() as u8, pins, &config)?;
    }

    Ok(())
}
