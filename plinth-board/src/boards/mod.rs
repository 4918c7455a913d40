//! Shipped boards
//!
//! [`ACTIVE`] is the board this build targets, picked by Cargo feature:
//!
//! - `wifi-sdio` (default) - [`scx1701::SDIO_4BIT`]
//! - `wifi-sdio-1bit` - [`scx1701::SDIO_1BIT`]
//! - `wifi-gspi` - [`scx1701::GSPI`]
//! - `bootloader` - any of the above without the clock-domain step
//!
//! When several Wi-Fi features are enabled, gSPI wins over 1-bit SDIO,
//! which wins over 4-bit SDIO.

use crate::board::Board;

pub mod scx1701;

#[cfg(feature = "wifi-gspi")]
const VARIANT: Board = scx1701::GSPI;

#[cfg(all(feature = "wifi-sdio-1bit", not(feature = "wifi-gspi")))]
const VARIANT: Board = scx1701::SDIO_1BIT;

#[cfg(not(any(feature = "wifi-sdio-1bit", feature = "wifi-gspi")))]
const VARIANT: Board = scx1701::SDIO_4BIT;

/// Board targeted by this build
#[cfg(not(feature = "bootloader"))]
pub static ACTIVE: Board = VARIANT;

/// Board targeted by this build
#[cfg(feature = "bootloader")]
pub static ACTIVE: Board = VARIANT.without_clock_domain();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_board_validates() {
        let board = ACTIVE.validate().unwrap();
        assert!(board.name.starts_with("SCX1701"));
        assert_eq!(
            board.clock_domain.is_none(),
            cfg!(feature = "bootloader")
        );
    }
}
