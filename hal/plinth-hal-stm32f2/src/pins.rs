//! STM32F2 pin map
//!
//! Pin   | Alias          | Function
//! ------+----------------+------------------------------
//! PC12  | SDIO_CLK       | SDIO clock
//! PD2   | SDIO_CMD       | SDIO command
//! PC8   | SDIO_D0        | SDIO data 0
//! PC9   | SDIO_D1        | SDIO data 1 / 1-bit IRQ
//! PC10  | SDIO_D2        | SDIO data 2
//! PC11  | SDIO_D3        | SDIO data 3
//! PB13  | SDIO_OOB_IRQ   | Wi-Fi out-of-band interrupt
//! PD8   | STDIO_UART_TX  | USART3 TX (console)
//! PD9   | STDIO_UART_RX  | USART3 RX (console)

use plinth_hal::gpio::{McuPin, PinSpace, Port};

/// Ports A..I, 16 pins each (LQFP176 / UFBGA176)
pub const PIN_SPACE: PinSpace = PinSpace {
    last_port: Port::I,
    pins_per_port: 16,
};

// ----- SDIO -----
pub const SDIO_CLK: McuPin = McuPin::new(Port::C, 12);
pub const SDIO_CMD: McuPin = McuPin::new(Port::D, 2);
pub const SDIO_D0: McuPin = McuPin::new(Port::C, 8);
pub const SDIO_D1: McuPin = McuPin::new(Port::C, 9);
pub const SDIO_D2: McuPin = McuPin::new(Port::C, 10);
pub const SDIO_D3: McuPin = McuPin::new(Port::C, 11);
pub const SDIO_OOB_IRQ: McuPin = McuPin::new(Port::B, 13);

// ----- Console UART -----
pub const STDIO_UART_TX: McuPin = McuPin::new(Port::D, 8);
pub const STDIO_UART_RX: McuPin = McuPin::new(Port::D, 9);

/// Shorthand for a port/pin pair
pub const fn p(port: Port, pin: u8) -> McuPin {
    McuPin::new(port, pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_exist_on_package() {
        for pin in [
            SDIO_CLK,
            SDIO_CMD,
            SDIO_D0,
            SDIO_D1,
            SDIO_D2,
            SDIO_D3,
            SDIO_OOB_IRQ,
            STDIO_UART_TX,
            STDIO_UART_RX,
        ] {
            assert!(PIN_SPACE.contains(pin));
        }
    }

    #[test]
    fn test_aliases_match_names() {
        assert_eq!(McuPin::parse("PD2"), Some(SDIO_CMD));
        assert_eq!(McuPin::parse("PC12"), Some(SDIO_CLK));
    }
}
