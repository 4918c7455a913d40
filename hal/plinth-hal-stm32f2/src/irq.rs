//! STM32F2 interrupt vector numbers

use plinth_hal::interrupt::InterruptSource;

/// Priority bits implemented by the STM32F2 NVIC
pub const NVIC_PRIO_BITS: u8 = 4;

/// STM32F2 interrupt vectors used by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Stm32f2Irq {
    RtcWkup = 3,
    Exti0 = 6,
    Exti1 = 7,
    Exti2 = 8,
    Exti3 = 9,
    Exti4 = 10,
    Dma1Stream1 = 12,
    Dma1Stream4 = 15,
    Exti9_5 = 23,
    Usart3 = 39,
    Exti15_10 = 40,
    Sdio = 49,
    Dma2Stream1 = 57,
    Dma2Stream2 = 58,
    Dma2Stream7 = 70,
    Usart6 = 71,
}

impl Stm32f2Irq {
    /// Vector number
    pub const fn number(self) -> u16 {
        self as u16
    }

    /// Priority byte as written to the NVIC IPR register
    pub const fn hardware_priority(level: plinth_hal::PriorityLevel) -> u8 {
        level.value() << (8 - NVIC_PRIO_BITS)
    }
}

impl From<InterruptSource> for Stm32f2Irq {
    fn from(source: InterruptSource) -> Self {
        match source {
            InterruptSource::RtcWakeup => Stm32f2Irq::RtcWkup,
            InterruptSource::WlanSdio => Stm32f2Irq::Sdio,
            InterruptSource::WlanSpiDma => Stm32f2Irq::Dma2Stream2,
            InterruptSource::Uart1 => Stm32f2Irq::Usart3,
            InterruptSource::Uart2 => Stm32f2Irq::Usart6,
            InterruptSource::Uart1TxDma => Stm32f2Irq::Dma1Stream4,
            InterruptSource::Uart1RxDma => Stm32f2Irq::Dma1Stream1,
            InterruptSource::Uart2TxDma => Stm32f2Irq::Dma2Stream7,
            InterruptSource::Uart2RxDma => Stm32f2Irq::Dma2Stream1,
            InterruptSource::Exti0 => Stm32f2Irq::Exti0,
            InterruptSource::Exti1 => Stm32f2Irq::Exti1,
            InterruptSource::Exti2 => Stm32f2Irq::Exti2,
            InterruptSource::Exti3 => Stm32f2Irq::Exti3,
            InterruptSource::Exti4 => Stm32f2Irq::Exti4,
            InterruptSource::Exti9To5 => Stm32f2Irq::Exti9_5,
            InterruptSource::Exti15To10 => Stm32f2Irq::Exti15_10,
        }
    }
}
