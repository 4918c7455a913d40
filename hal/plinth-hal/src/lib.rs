//! Plinth Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits that the board descriptor
//! layer drives during bring-up. Chip-specific crates implement them on top
//! of their register-level drivers; the board layer never touches a
//! register itself.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  plinth-board (tables, bring-up, irqs)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  plinth-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  plinth-hal-stm32f2 / MCU driver layer  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioController`] - Pin configuration and digital I/O
//! - [`bus::BusController`] - SPI and UART controller setup
//! - [`flash::FlashDriver`] - Raw flash reads, writes and erases
//! - [`rtc::RealTimeClock`] - RTC init and backup-domain marker
//! - [`interrupt::InterruptController`] - Interrupt priority assignment

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod error;
pub mod flash;
pub mod gpio;
pub mod interrupt;
pub mod rtc;
pub mod spi;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use bus::BusController;
pub use error::HalError;
pub use flash::FlashDriver;
pub use gpio::{GpioController, Level, McuPin, PinMode, PinSpace, Port, Pull};
pub use interrupt::{InterruptController, InterruptSource, PriorityLevel};
pub use rtc::{BackupRegister, RealTimeClock};
pub use spi::{SpiConfig, SpiPins};
pub use uart::{UartConfig, UartPins};
