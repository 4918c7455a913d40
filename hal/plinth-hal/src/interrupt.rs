//! Interrupt controller abstraction
//!
//! Interrupt sources are named by their board function. Chip crates map
//! each one to a vector number.

use crate::error::HalError;

/// Interrupt sources the board assigns priorities to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InterruptSource {
    /// RTC wake-up event
    RtcWakeup,
    /// Wi-Fi SDIO data path
    WlanSdio,
    /// Wi-Fi gSPI DMA stream
    WlanSpiDma,
    /// Primary UART
    Uart1,
    /// Secondary UART
    Uart2,
    Uart1TxDma,
    Uart1RxDma,
    Uart2TxDma,
    Uart2RxDma,
    Exti0,
    Exti1,
    Exti2,
    Exti3,
    Exti4,
    /// EXTI lines 5..9
    Exti9To5,
    /// EXTI lines 10..15
    Exti15To10,
}

impl InterruptSource {
    /// Every source, in declaration order
    pub const ALL: [InterruptSource; 16] = [
        InterruptSource::RtcWakeup,
        InterruptSource::WlanSdio,
        InterruptSource::WlanSpiDma,
        InterruptSource::Uart1,
        InterruptSource::Uart2,
        InterruptSource::Uart1TxDma,
        InterruptSource::Uart1RxDma,
        InterruptSource::Uart2TxDma,
        InterruptSource::Uart2RxDma,
        InterruptSource::Exti0,
        InterruptSource::Exti1,
        InterruptSource::Exti2,
        InterruptSource::Exti3,
        InterruptSource::Exti4,
        InterruptSource::Exti9To5,
        InterruptSource::Exti15To10,
    ];
}

/// Interrupt priority level
///
/// Lower value = more urgent. Levels are 4 bits wide (0..=15); chip crates
/// shift them into the controller's implemented priority bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriorityLevel(u8);

impl PriorityLevel {
    /// Most urgent level
    pub const HIGHEST: Self = Self(0);
    /// Least urgent level
    pub const LOWEST: Self = Self(15);

    /// Create a level, rejecting values above [`Self::LOWEST`]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::LOWEST.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Create a level, clamping to [`Self::LOWEST`]
    pub const fn clamped(level: u8) -> Self {
        if level <= Self::LOWEST.0 {
            Self(level)
        } else {
            Self::LOWEST
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check if this level preempts `other`
    pub const fn is_more_urgent_than(self, other: Self) -> bool {
        self.0 < other.0
    }
}

/// Interrupt controller
pub trait InterruptController {
    /// Assign a priority to an interrupt source
    fn set_priority(&mut self, source: InterruptSource, level: PriorityLevel)
        -> Result<(), HalError>;
}
