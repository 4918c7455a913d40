//! GPIO abstractions
//!
//! Physical pin identity plus the controller trait used to configure and
//! drive pins by identity rather than by owned pin objects.

use crate::error::HalError;

/// GPIO port letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Port {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl Port {
    /// Port letter as a character
    pub const fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Parse a port letter
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Port::A),
            'B' => Some(Port::B),
            'C' => Some(Port::C),
            'D' => Some(Port::D),
            'E' => Some(Port::E),
            'F' => Some(Port::F),
            'G' => Some(Port::G),
            'H' => Some(Port::H),
            'I' => Some(Port::I),
            _ => None,
        }
    }
}

/// Physical MCU pin (port/pin pair)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct McuPin {
    pub port: Port,
    pub pin: u8,
}

impl McuPin {
    /// Create a pin identity
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Parse a pin name
    ///
    /// Supports "PA4", "PE11" and the underscore form "PD_15".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let rest = s.strip_prefix('P')?;

        let mut chars = rest.chars();
        let port = Port::from_char(chars.next()?)?;
        let pin_str = chars.as_str();
        let pin_str = pin_str.strip_prefix('_').unwrap_or(pin_str);
        if pin_str.is_empty() || pin_str.len() > 2 {
            return None;
        }

        let pin: u8 = pin_str.parse().ok()?;
        Some(Self::new(port, pin))
    }

    /// Parse a pin name with optional `!` inversion prefix
    ///
    /// Returns the pin and whether it is active-low.
    pub fn parse_with_inversion(s: &str) -> Option<(Self, bool)> {
        let s = s.trim();
        match s.strip_prefix('!') {
            Some(rest) => Self::parse(rest).map(|p| (p, true)),
            None => Self::parse(s).map(|p| (p, false)),
        }
    }
}

/// Set of pins that physically exist on a package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinSpace {
    /// Highest port letter bonded out
    pub last_port: Port,
    /// Pins per port
    pub pins_per_port: u8,
}

impl PinSpace {
    /// Check whether the pin exists on this package
    pub const fn contains(&self, pin: McuPin) -> bool {
        (pin.port as u8) <= (self.last_port as u8) && pin.pin < self.pins_per_port
    }
}

/// Logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level from a boolean (true = high)
    pub const fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// The opposite level
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        self.inverted()
    }
}

/// Internal pull resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Pin mode requested from the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PinMode {
    /// Digital input with the given pull
    Input(Pull),
    /// Push-pull output
    OutputPushPull,
    /// Open-drain output, no internal pull
    OutputOpenDrain,
}

/// GPIO controller
///
/// Drives pins by physical identity. Implementations own the port
/// registers for every pin they are asked about.
pub trait GpioController {
    /// Configure a pin's mode
    fn configure(&mut self, pin: McuPin, mode: PinMode) -> Result<(), HalError>;

    /// Drive an output pin
    fn set(&mut self, pin: McuPin, level: Level) -> Result<(), HalError>;

    /// Read a pin's input level
    ///
    /// Takes `&mut self` because reads go through port registers owned by
    /// the controller.
    fn get(&mut self, pin: McuPin) -> Level;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        assert_eq!(McuPin::parse("PA4"), Some(McuPin::new(Port::A, 4)));
        assert_eq!(McuPin::parse("PE11"), Some(McuPin::new(Port::E, 11)));
        assert_eq!(McuPin::parse("PD_15"), Some(McuPin::new(Port::D, 15)));
        assert_eq!(McuPin::parse("PZ1"), None);
        assert_eq!(McuPin::parse("A4"), None);
        assert_eq!(McuPin::parse("PA"), None);
        assert_eq!(McuPin::parse("PA123"), None);
    }

    #[test]
    fn test_parse_inverted() {
        assert_eq!(
            McuPin::parse_with_inversion("!PB1"),
            Some((McuPin::new(Port::B, 1), true))
        );
        assert_eq!(
            McuPin::parse_with_inversion("PB1"),
            Some((McuPin::new(Port::B, 1), false))
        );
    }

    #[test]
    fn test_pin_space() {
        let space = PinSpace {
            last_port: Port::E,
            pins_per_port: 16,
        };
        assert!(space.contains(McuPin::new(Port::E, 15)));
        assert!(!space.contains(McuPin::new(Port::E, 16)));
        assert!(!space.contains(McuPin::new(Port::F, 0)));
    }

    #[test]
    fn test_level_inversion() {
        assert_eq!(!Level::High, Level::Low);
        assert_eq!(Level::from_bool(true), Level::High);
        assert!(!Level::Low.is_high());
    }
}
