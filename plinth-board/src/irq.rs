//! Interrupt priority plan
//!
//! Lower value = more urgent. Sources are grouped into tiers, each tier
//! owning a disjoint band of levels:
//!
//! | Tier            | Band    | Sources                      |
//! |-----------------|---------|------------------------------|
//! | `RealtimeEvent` | 0..=1   | RTC wake-up                  |
//! | `BusDma`        | 2..=5   | Wi-Fi SDIO, Wi-Fi SPI DMA    |
//! | `Uart`          | 6..=9   | UARTs and their DMA streams  |
//! | `GpioEdge`      | 10..=15 | EXTI lines                   |

use core::ops::RangeInclusive;

use plinth_hal::{HalError, InterruptController, InterruptSource, PriorityLevel};

/// Priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PriorityTier {
    RealtimeEvent,
    BusDma,
    Uart,
    GpioEdge,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 4] = [
        PriorityTier::RealtimeEvent,
        PriorityTier::BusDma,
        PriorityTier::Uart,
        PriorityTier::GpioEdge,
    ];

    /// Levels reserved for this tier
    pub const fn band(self) -> RangeInclusive<u8> {
        match self {
            PriorityTier::RealtimeEvent => 0..=1,
            PriorityTier::BusDma => 2..=5,
            PriorityTier::Uart => 6..=9,
            PriorityTier::GpioEdge => 10..=15,
        }
    }
}

pub const fn tier_of(source: InterruptSource) -> PriorityTier {
    use InterruptSource::*;
    match source {
        RtcWakeup => PriorityTier::RealtimeEvent,
        WlanSdio | WlanSpiDma => PriorityTier::BusDma,
        Uart1 | Uart2 | Uart1TxDma | Uart1RxDma | Uart2TxDma | Uart2RxDma => PriorityTier::Uart,
        Exti0 | Exti1 | Exti2 | Exti3 | Exti4 | Exti9To5 | Exti15To10 => PriorityTier::GpioEdge,
    }
}

pub const fn priority_of(source: InterruptSource) -> PriorityLevel {
    use InterruptSource::*;
    let level = match source {
        RtcWakeup => 1,
        WlanSdio => 2,
        WlanSpiDma => 3,
        Uart1 | Uart2 => 6,
        Uart1TxDma | Uart1RxDma | Uart2TxDma | Uart2RxDma => 7,
        Exti0 | Exti1 | Exti2 | Exti3 | Exti4 | Exti9To5 | Exti15To10 => 14,
    };
    PriorityLevel::clamped(level)
}

/// Program every source's priority, once each
pub fn apply_priority_plan<C: InterruptController>(controller: &mut C) -> Result<(), HalError> {
    for source in InterruptSource::ALL {
        let level = priority_of(source);
        trace!("irq {} -> {}", source, level.value());
        controller.set_priority(source, level)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockIrq;
    use proptest::prelude::*;

    #[test]
    fn test_board_levels() {
        assert_eq!(priority_of(InterruptSource::RtcWakeup).value(), 1);
        assert_eq!(priority_of(InterruptSource::WlanSdio).value(), 2);
        assert_eq!(priority_of(InterruptSource::WlanSpiDma).value(), 3);
        assert_eq!(priority_of(InterruptSource::Uart2).value(), 6);
        assert_eq!(priority_of(InterruptSource::Uart1RxDma).value(), 7);
        assert_eq!(priority_of(InterruptSource::Exti15To10).value(), 14);
    }

    #[test]
    fn test_bands_are_disjoint() {
        for (i, a) in PriorityTier::ALL.iter().enumerate() {
            for b in &PriorityTier::ALL[i + 1..] {
                assert!(a.band().end() < b.band().start());
            }
        }
        assert_eq!(*PriorityTier::GpioEdge.band().end(), PriorityLevel::LOWEST.value());
    }

    #[test]
    fn test_radio_more_urgent_than_uart() {
        let radio = priority_of(InterruptSource::WlanSdio);
        for uart in [InterruptSource::Uart1, InterruptSource::Uart2TxDma] {
            assert!(radio.is_more_urgent_than(priority_of(uart)));
        }
    }

    #[test]
    fn test_apply_sets_each_source_once() {
        let mut irq = MockIrq::default();
        apply_priority_plan(&mut irq).unwrap();
        assert_eq!(irq.assigned.len(), InterruptSource::ALL.len());
        for source in InterruptSource::ALL {
            let count = irq.assigned.iter().filter(|(s, _)| *s == source).count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_apply_stops_on_error() {
        let mut irq = MockIrq {
            fail_after: Some(2),
            ..MockIrq::default()
        };
        assert_eq!(apply_priority_plan(&mut irq), Err(HalError::Unsupported));
        assert_eq!(irq.assigned.len(), 2);
    }

    proptest! {
        #[test]
        fn test_level_inside_tier_band(index in 0usize..InterruptSource::ALL.len()) {
            let source = InterruptSource::ALL[index];
            let level = priority_of(source).value();
            prop_assert!(tier_of(source).band().contains(&level));
        }
    }
}
