//! Resource table
//!
//! Per-board mapping from logical resources to physical descriptors. The
//! table is plain `'static` data; every lookup is a linear scan over a
//! handful of entries and has no side effects.

use plinth_hal::{McuPin, PinSpace};

use super::descriptor::{
    PhysicalDescriptor, PinRef, SpiBusDescriptor, SpiDeviceDescriptor, UartDescriptor, WifiBus,
};
use super::ids::{FlashId, GpioId, ResourceClass, ResourceId, SpiId, UartId};
use crate::error::{LayoutViolation, LookupError};
use crate::partition::{FlashDevice, FlashKind};

/// Logical to physical resource bindings for one board
#[derive(Debug, Clone, Copy)]
pub struct ResourceTable {
    pub gpio: &'static [(GpioId, McuPin)],
    pub spi: &'static [(SpiId, SpiBusDescriptor)],
    pub uart: &'static [(UartId, UartDescriptor)],
    pub flash: &'static [(FlashId, FlashDevice)],
    /// Devices attached to the SPI buses
    pub spi_devices: &'static [SpiDeviceDescriptor],
    /// Wi-Fi data path, if the board carries a radio
    pub wifi: Option<WifiBus>,
}

fn find<K: PartialEq + Copy, V: Copy>(entries: &[(K, V)], key: K) -> Option<V> {
    entries
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, value)| *value)
}

fn has_duplicate_key<K: PartialEq + Copy, V>(entries: &[(K, V)]) -> Option<K> {
    entries.iter().enumerate().find_map(|(i, (key, _))| {
        entries[i + 1..]
            .iter()
            .any(|(other, _)| other == key)
            .then_some(*key)
    })
}

impl ResourceTable {
    pub fn lookup_gpio(&self, id: GpioId) -> Result<McuPin, LookupError> {
        find(self.gpio, id).ok_or(LookupError::UnknownResource {
            class: ResourceClass::Gpio,
        })
    }

    pub fn lookup_spi(&self, id: SpiId) -> Result<SpiBusDescriptor, LookupError> {
        find(self.spi, id).ok_or(LookupError::UnknownResource {
            class: ResourceClass::Spi,
        })
    }

    pub fn lookup_uart(&self, id: UartId) -> Result<UartDescriptor, LookupError> {
        find(self.uart, id).ok_or(LookupError::UnknownResource {
            class: ResourceClass::Uart,
        })
    }

    pub fn lookup_flash(&self, id: FlashId) -> Result<FlashDevice, LookupError> {
        find(self.flash, id).ok_or(LookupError::UnknownResource {
            class: ResourceClass::Flash,
        })
    }

    /// Class-generic lookup
    pub fn lookup(&self, id: ResourceId) -> Result<PhysicalDescriptor, LookupError> {
        match id {
            ResourceId::Gpio(id) => self.lookup_gpio(id).map(PhysicalDescriptor::Pin),
            ResourceId::Spi(id) => self.lookup_spi(id).map(PhysicalDescriptor::Spi),
            ResourceId::Uart(id) => self.lookup_uart(id).map(PhysicalDescriptor::Uart),
            ResourceId::Flash(id) => self.lookup_flash(id).map(PhysicalDescriptor::Flash),
        }
    }

    /// First device attached to `bus`
    pub fn spi_device_on(&self, bus: SpiId) -> Option<&'static SpiDeviceDescriptor> {
        self.spi_devices.iter().find(|dev| dev.bus == bus)
    }

    /// Pins claimed by buses, tagged with the claiming resource
    ///
    /// The Wi-Fi data path reports as `SpiId::Wifi` whatever its transport.
    fn bus_pins(&self) -> impl Iterator<Item = (ResourceId, McuPin)> + '_ {
        let spi = self.spi.iter().flat_map(|(id, bus)| {
            bus.roles()
                .into_iter()
                .filter_map(PinRef::pin)
                .map(move |pin| (ResourceId::Spi(*id), pin))
        });
        let uart = self.uart.iter().flat_map(|(id, uart)| {
            uart.roles()
                .into_iter()
                .filter_map(PinRef::pin)
                .map(move |pin| (ResourceId::Uart(*id), pin))
        });
        let wifi = self.wifi.iter().flat_map(|wifi| {
            wifi.pins()
                .into_iter()
                .map(|pin| (ResourceId::Spi(SpiId::Wifi), pin))
        });
        spi.chain(uart).chain(wifi)
    }

    /// Check the table for internal consistency against a package
    pub fn validate(&self, pin_space: &PinSpace) -> Result<(), LayoutViolation> {
        self.check(pin_space).map_err(|violation| {
            error!("resource table rejected: {}", violation);
            violation
        })
    }

    fn check(&self, pin_space: &PinSpace) -> Result<(), LayoutViolation> {
        if let Some(id) = has_duplicate_key(self.gpio) {
            return Err(LayoutViolation::DuplicateResource(ResourceId::Gpio(id)));
        }
        if let Some(id) = has_duplicate_key(self.spi) {
            return Err(LayoutViolation::DuplicateResource(ResourceId::Spi(id)));
        }
        if let Some(id) = has_duplicate_key(self.uart) {
            return Err(LayoutViolation::DuplicateResource(ResourceId::Uart(id)));
        }
        if let Some(id) = has_duplicate_key(self.flash) {
            return Err(LayoutViolation::DuplicateResource(ResourceId::Flash(id)));
        }

        for (i, (id, pin)) in self.gpio.iter().enumerate() {
            if !pin_space.contains(*pin) {
                return Err(LayoutViolation::InvalidPin {
                    resource: ResourceId::Gpio(*id),
                    pin: *pin,
                });
            }
            if let Some((other, _)) = self.gpio[i + 1..].iter().find(|(_, p)| p == pin) {
                return Err(LayoutViolation::PinAliased {
                    pin: *pin,
                    first: *id,
                    second: *other,
                });
            }
        }

        for (i, (resource, pin)) in self.bus_pins().enumerate() {
            if !pin_space.contains(pin) {
                return Err(LayoutViolation::InvalidPin { resource, pin });
            }
            let taken_by_gpio = self.gpio.iter().any(|(_, p)| *p == pin);
            let taken_by_bus = self.bus_pins().take(i).any(|(_, p)| p == pin);
            if taken_by_gpio || taken_by_bus {
                return Err(LayoutViolation::BusPinConflict { pin, resource });
            }
        }

        for device in self.spi_devices {
            if find(self.spi, device.bus).is_none() {
                return Err(LayoutViolation::UndeclaredBus(device.bus));
            }
            if find(self.gpio, device.chip_select).is_none() {
                return Err(LayoutViolation::UnresolvedChipSelect {
                    bus: device.bus,
                    chip_select: device.chip_select,
                });
            }
        }

        for (_, device) in self.flash {
            if let FlashKind::ExternalSpi(bus) = device.kind {
                if find(self.spi, bus).is_none() {
                    return Err(LayoutViolation::UndeclaredBus(bus));
                }
            }
        }

        if let Some(WifiBus::Gspi { .. }) = self.wifi {
            if self.spi_device_on(SpiId::Wifi).is_none() {
                return Err(LayoutViolation::UndeclaredBus(SpiId::Wifi));
            }
        }

        Ok(())
    }
}
