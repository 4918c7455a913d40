//! STM32F2-specific HAL for the Plinth board layer
//!
//! This crate provides STM32F2 constants and wiring used by board
//! definitions built on `plinth-hal`:
//!
//! - Package pin space and named pin aliases (SDIO, STDIO UART)
//! - Vector numbers for every [`plinth_hal::InterruptSource`]
//! - An NVIC-backed [`plinth_hal::InterruptController`] (`nvic` feature)
//!
//! # Features
//!
//! - `nvic` - Enable the cortex-m NVIC implementation
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod irq;
#[cfg(feature = "nvic")]
pub mod nvic;
pub mod pins;

pub use irq::{Stm32f2Irq, NVIC_PRIO_BITS};
pub use pins::PIN_SPACE;
