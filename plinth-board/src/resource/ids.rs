//! Logical resource identifiers
//!
//! Identifiers are dense and zero-based within their class. They are stable
//! lookup keys only; whether a board provides a given id is decided by that
//! board's tables.

/// Declares a dense logical id enum with `ALL`, `COUNT`, `index` and
/// `from_index`.
macro_rules! logical_ids {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every id, in ordinal order
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Number of ids in this class
            pub const COUNT: usize = Self::ALL.len();

            /// Zero-based ordinal
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Id for a raw ordinal, `None` outside the declared range
            pub fn from_index(index: u8) -> Option<Self> {
                Self::ALL.get(index as usize).copied()
            }
        }
    };
}

logical_ids! {
    /// Logical GPIO resources
    GpioId {
        Sw2Button,
        Sw3Button,
        /// External SPI flash chip select
        FlashChipSelect,
        /// Wi-Fi gSPI chip select
        WifiChipSelect,
        /// Wi-Fi module reset line
        WifiReset,
        /// Wi-Fi 32.768 kHz sleep clock
        Wifi32kClock,
        /// Wi-Fi module power switch
        WifiPower,
        /// System status LED net
        SysLed,
        /// RF activity LED net
        RfLed,
    }
}

logical_ids! {
    /// Logical SPI buses
    SpiId {
        Flash,
        Wifi,
    }
}

logical_ids! {
    /// Logical UARTs
    UartId {
        Uart1,
        Uart2,
    }
}

logical_ids! {
    /// Flash devices
    FlashId {
        /// On-chip flash
        Embedded,
        /// External SPI NOR
        Spi,
    }
}

logical_ids! {
    /// Logical flash partitions
    PartitionId {
        Bootloader,
        Application,
        /// Automated test equipment image
        Ate,
        /// OTA staging area
        OtaTemp,
        RfFirmware,
        Parameter1,
        Parameter2,
        Parameter3,
        Parameter4,
        LinkKey,
        BtFirmware,
        Filesystem,
    }
}

/// Resource class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResourceClass {
    Gpio,
    Spi,
    Uart,
    Flash,
}

/// A logical resource of any class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResourceId {
    Gpio(GpioId),
    Spi(SpiId),
    Uart(UartId),
    Flash(FlashId),
}

impl ResourceId {
    pub const fn class(self) -> ResourceClass {
        match self {
            ResourceId::Gpio(_) => ResourceClass::Gpio,
            ResourceId::Spi(_) => ResourceClass::Spi,
            ResourceId::Uart(_) => ResourceClass::Uart,
            ResourceId::Flash(_) => ResourceClass::Flash,
        }
    }
}
