//! NVIC-backed interrupt controller

use cortex_m::peripheral::NVIC;
use plinth_hal::{HalError, InterruptController, InterruptSource, PriorityLevel};

use crate::irq::Stm32f2Irq;

// SAFETY: discriminants are valid STM32F2 vector numbers.
#[allow(unsafe_code)]
unsafe impl cortex_m::interrupt::InterruptNumber for Stm32f2Irq {
    fn number(self) -> u16 {
        self as u16
    }
}

/// Interrupt controller over the core NVIC
pub struct Nvic {
    nvic: NVIC,
}

impl Nvic {
    /// Take ownership of the NVIC peripheral
    pub fn new(nvic: NVIC) -> Self {
        Self { nvic }
    }

    /// Release the NVIC peripheral
    pub fn free(self) -> NVIC {
        self.nvic
    }
}

impl InterruptController for Nvic {
    fn set_priority(
        &mut self,
        source: InterruptSource,
        level: PriorityLevel,
    ) -> Result<(), HalError> {
        let irq = Stm32f2Irq::from(source);
        // SAFETY: called during bring-up with interrupts masked, so no
        // priority-based critical section can be broken.
        #[allow(unsafe_code)]
        unsafe {
            self.nvic
                .set_priority(irq, Stm32f2Irq::hardware_priority(level));
        }
        Ok(())
    }
}
