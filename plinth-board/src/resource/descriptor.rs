//! Physical descriptors bound to logical resources

use heapless::Vec;
use plinth_hal::spi::{BitOrder, Mode, Phase, Polarity, SpiConfig, SpiPins};
use plinth_hal::uart::UartPins;
use plinth_hal::McuPin;

use super::ids::{GpioId, SpiId};
use crate::partition::FlashDevice;

/// A bus pin role: a physical pin or the "not connected" sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PinRef {
    Pin(McuPin),
    NotConnected,
}

impl PinRef {
    pub const fn pin(self) -> Option<McuPin> {
        match self {
            PinRef::Pin(pin) => Some(pin),
            PinRef::NotConnected => None,
        }
    }
}

/// SPI controller pin set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpiBusDescriptor {
    pub sclk: PinRef,
    pub mosi: PinRef,
    pub miso: PinRef,
}

impl SpiBusDescriptor {
    pub const fn new(sclk: McuPin, mosi: McuPin, miso: McuPin) -> Self {
        Self {
            sclk: PinRef::Pin(sclk),
            mosi: PinRef::Pin(mosi),
            miso: PinRef::Pin(miso),
        }
    }

    /// Pin roles in declaration order
    pub const fn roles(&self) -> [PinRef; 3] {
        [self.sclk, self.mosi, self.miso]
    }

    pub const fn pins(&self) -> SpiPins {
        SpiPins {
            sclk: self.sclk.pin(),
            mosi: self.mosi.pin(),
            miso: self.miso.pin(),
        }
    }
}

/// UART pin set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UartDescriptor {
    pub tx: PinRef,
    pub rx: PinRef,
    pub rts: PinRef,
    pub cts: PinRef,
}

impl UartDescriptor {
    /// TX/RX only, flow control not connected
    pub const fn without_flow_control(tx: McuPin, rx: McuPin) -> Self {
        Self {
            tx: PinRef::Pin(tx),
            rx: PinRef::Pin(rx),
            rts: PinRef::NotConnected,
            cts: PinRef::NotConnected,
        }
    }

    pub const fn roles(&self) -> [PinRef; 4] {
        [self.tx, self.rx, self.rts, self.cts]
    }

    pub const fn pins(&self) -> UartPins {
        UartPins {
            tx: self.tx.pin(),
            rx: self.rx.pin(),
            rts: self.rts.pin(),
            cts: self.cts.pin(),
        }
    }
}

/// SPI device mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpiModeFlags(u8);

impl SpiModeFlags {
    /// Sample on the rising clock edge (clear = falling)
    pub const CLOCK_RISING_EDGE: Self = Self(1 << 0);
    /// Clock idles high (clear = idles low)
    pub const CLOCK_IDLE_HIGH: Self = Self(1 << 1);
    pub const USE_DMA: Self = Self(1 << 2);
    /// MSB first (clear = LSB first)
    pub const MSB_FIRST: Self = Self(1 << 3);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A device on an SPI bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpiDeviceDescriptor {
    pub bus: SpiId,
    /// Must resolve through the board's GPIO table
    pub chip_select: GpioId,
    pub speed_hz: u32,
    pub mode: SpiModeFlags,
    pub bits: u8,
}

impl SpiDeviceDescriptor {
    /// Clock mode implied by the edge and idle flags
    ///
    /// Sampling on the edge leaving the idle level is CPHA=0, so the second
    /// transition is used exactly when idle-high and rising-edge agree.
    pub fn spi_mode(&self) -> Mode {
        let idle_high = self.mode.contains(SpiModeFlags::CLOCK_IDLE_HIGH);
        let rising = self.mode.contains(SpiModeFlags::CLOCK_RISING_EDGE);
        match (idle_high, idle_high == rising) {
            (false, false) => Mode::Mode0,
            (false, true) => Mode::Mode1,
            (true, false) => Mode::Mode2,
            (true, true) => Mode::Mode3,
        }
    }

    /// Controller configuration for talking to this device
    pub fn config(&self) -> SpiConfig {
        let (polarity, phase): (Polarity, Phase) = self.spi_mode().into();
        SpiConfig {
            frequency: self.speed_hz,
            polarity,
            phase,
            bit_order: if self.mode.contains(SpiModeFlags::MSB_FIRST) {
                BitOrder::MsbFirst
            } else {
                BitOrder::LsbFirst
            },
            bits: self.bits,
            dma: self.mode.contains(SpiModeFlags::USE_DMA),
        }
    }
}

/// Wi-Fi module data path, chosen at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WifiBus {
    /// 4-bit SDIO with out-of-band interrupt
    Sdio4Bit {
        clk: McuPin,
        cmd: McuPin,
        d0: McuPin,
        d1: McuPin,
        d2: McuPin,
        d3: McuPin,
        oob_irq: McuPin,
    },
    /// 1-bit SDIO, D1 doubles as the interrupt line
    Sdio1Bit {
        clk: McuPin,
        cmd: McuPin,
        d0: McuPin,
        irq: McuPin,
    },
    /// gSPI over the board's `SpiId::Wifi` bus
    Gspi { irq: McuPin },
}

impl WifiBus {
    /// Pins claimed directly by the Wi-Fi data path
    ///
    /// For gSPI the bus pins belong to the SPI table and are not repeated.
    pub fn pins(&self) -> Vec<McuPin, 7> {
        fn collect(list: &[McuPin]) -> Vec<McuPin, 7> {
            // At most 7 entries, matching the capacity
            Vec::from_slice(list).unwrap_or_default()
        }

        match *self {
            WifiBus::Sdio4Bit {
                clk,
                cmd,
                d0,
                d1,
                d2,
                d3,
                oob_irq,
            } => collect(&[clk, cmd, d0, d1, d2, d3, oob_irq]),
            WifiBus::Sdio1Bit { clk, cmd, d0, irq } => collect(&[clk, cmd, d0, irq]),
            WifiBus::Gspi { irq } => collect(&[irq]),
        }
    }

    pub const fn is_spi(&self) -> bool {
        matches!(self, WifiBus::Gspi { .. })
    }
}

/// Physical descriptor returned by a class-generic lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PhysicalDescriptor {
    Pin(McuPin),
    Spi(SpiBusDescriptor),
    Uart(UartDescriptor),
    Flash(FlashDevice),
}
