//! Recording mocks and a fixture board for unit tests

use std::vec::Vec;

use plinth_hal::{
    BackupRegister, BusController, FlashDriver, GpioController, HalError, InterruptController,
    InterruptSource, Level, McuPin, PinMode, PriorityLevel, RealTimeClock, SpiConfig, SpiPins,
    UartConfig, UartPins,
};

use crate::resource::FlashId;

/// One call into [`MockHal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalOp {
    Configure(McuPin, PinMode),
    Set(McuPin, Level),
    Get(McuPin),
    EnableBackup,
    RtcInit,
    SetTime(u32),
    ReadMarker(BackupRegister),
    WriteMarker(BackupRegister, u32),
}

/// GPIO and RTC mock
///
/// Unlisted inputs read high, like an idle pulled-up strap. The backup
/// registers start cleared, like a board with a fresh backup battery.
pub struct MockHal {
    pub ops: Vec<HalOp>,
    pub inputs: Vec<(McuPin, Level)>,
    pub backup: [u32; 20],
    pub rtc_inits: usize,
    /// Fail this call, after recording it
    pub fail_on: Option<(HalOp, HalError)>,
}

impl MockHal {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            inputs: Vec::new(),
            backup: [0; 20],
            rtc_inits: 0,
            fail_on: None,
        }
    }

    pub fn position(&self, op: HalOp) -> Option<usize> {
        self.ops.iter().position(|o| *o == op)
    }

    fn record(&mut self, op: HalOp) -> Result<(), HalError> {
        self.ops.push(op);
        match self.fail_on {
            Some((failing, err)) if failing == op => Err(err),
            _ => Ok(()),
        }
    }
}

impl GpioController for MockHal {
    fn configure(&mut self, pin: McuPin, mode: PinMode) -> Result<(), HalError> {
        self.record(HalOp::Configure(pin, mode))
    }

    fn set(&mut self, pin: McuPin, level: Level) -> Result<(), HalError> {
        self.record(HalOp::Set(pin, level))
    }

    fn get(&mut self, pin: McuPin) -> Level {
        self.ops.push(HalOp::Get(pin));
        self.inputs
            .iter()
            .find(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .unwrap_or(Level::High)
    }
}

impl RealTimeClock for MockHal {
    fn enable_backup_access(&mut self) -> Result<(), HalError> {
        self.record(HalOp::EnableBackup)
    }

    fn init(&mut self) -> Result<(), HalError> {
        self.record(HalOp::RtcInit)?;
        self.rtc_inits += 1;
        Ok(())
    }

    fn set_time(&mut self, epoch_seconds: u32) -> Result<(), HalError> {
        self.record(HalOp::SetTime(epoch_seconds))
    }

    fn read_marker(&mut self, register: BackupRegister) -> Result<u32, HalError> {
        self.record(HalOp::ReadMarker(register))?;
        self.backup
            .get(register.0 as usize)
            .copied()
            .ok_or(HalError::OutOfRange)
    }

    fn write_marker(&mut self, register: BackupRegister, value: u32) -> Result<(), HalError> {
        self.record(HalOp::WriteMarker(register, value))?;
        let slot = self
            .backup
            .get_mut(register.0 as usize)
            .ok_or(HalError::OutOfRange)?;
        *slot = value;
        Ok(())
    }
}

/// Interrupt controller mock
#[derive(Default)]
pub struct MockIrq {
    pub assigned: Vec<(InterruptSource, PriorityLevel)>,
    /// Reject the call after this many successful assignments
    pub fail_after: Option<usize>,
}

impl InterruptController for MockIrq {
    fn set_priority(
        &mut self,
        source: InterruptSource,
        level: PriorityLevel,
    ) -> Result<(), HalError> {
        if self.fail_after == Some(self.assigned.len()) {
            return Err(HalError::Unsupported);
        }
        self.assigned.push((source, level));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BusOp {
    Spi(u8, SpiPins, SpiConfig),
    Uart(u8, UartPins, UartConfig),
}

/// Bus controller mock
#[derive(Default)]
pub struct MockBus {
    pub ops: Vec<BusOp>,
    pub fail: Option<HalError>,
}

impl BusController for MockBus {
    fn configure_spi(
        &mut self,
        instance: u8,
        pins: SpiPins,
        config: &SpiConfig,
    ) -> Result<(), HalError> {
        if let Some(err) = self.fail {
            return Err(err);
        }
        self.ops.push(BusOp::Spi(instance, pins, *config));
        Ok(())
    }

    fn configure_uart(
        &mut self,
        instance: u8,
        pins: UartPins,
        config: &UartConfig,
    ) -> Result<(), HalError> {
        if let Some(err) = self.fail {
            return Err(err);
        }
        self.ops.push(BusOp::Uart(instance, pins, *config));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashOp {
    Read(FlashId, u32, usize),
    Write(FlashId, u32, usize),
    Erase(FlashId, u32, u32),
}

/// Flash driver mock, records device addresses
#[derive(Default)]
pub struct MockFlash {
    pub ops: Vec<FlashOp>,
    pub fail_with: Option<HalError>,
}

impl MockFlash {
    fn check(&self) -> Result<(), HalError> {
        match self.fail_with {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl FlashDriver<FlashId> for MockFlash {
    fn read(&mut self, device: FlashId, address: u32, buf: &mut [u8]) -> Result<(), HalError> {
        self.check()?;
        buf.fill(0xFF);
        self.ops.push(FlashOp::Read(device, address, buf.len()));
        Ok(())
    }

    fn write(&mut self, device: FlashId, address: u32, data: &[u8]) -> Result<(), HalError> {
        self.check()?;
        self.ops.push(FlashOp::Write(device, address, data.len()));
        Ok(())
    }

    fn erase(&mut self, device: FlashId, address: u32, length: u32) -> Result<(), HalError> {
        self.check()?;
        self.ops.push(FlashOp::Erase(device, address, length));
        Ok(())
    }
}

/// A board with every role bound
///
/// Unlike the shipped boards it has both LEDs, a manufacturing strap and
/// the sensing policy enabled.
pub mod fixture {
    use plinth_hal::Port::{A, B, C, D, E};
    use plinth_hal::{Level, McuPin};
    use plinth_hal_stm32f2::pins::p;
    use plinth_hal_stm32f2::PIN_SPACE;

    use crate::board::{
        Board, BoardRoles, ClockDomainPlan, Indicator, MfgModePolicy, RadioControl, SenseInput,
    };
    use crate::partition::{FlashDevice, Partition, PartitionOptions};
    use crate::resource::{
        FlashId, GpioId, PartitionId, ResourceTable, SpiBusDescriptor, SpiDeviceDescriptor,
        SpiId, SpiModeFlags, UartDescriptor, UartId, WifiBus,
    };

    pub const SYS_LED: GpioId = GpioId::SysLed;
    pub const BOOT_SEL: GpioId = GpioId::Sw2Button;
    pub const MFG_SEL: GpioId = GpioId::Sw3Button;

    const GPIO: &[(GpioId, McuPin)] = &[
        (GpioId::Sw2Button, p(E, 11)),
        (GpioId::Sw3Button, p(E, 10)),
        (GpioId::FlashChipSelect, p(A, 4)),
        (GpioId::WifiReset, p(D, 15)),
        (GpioId::Wifi32kClock, p(A, 8)),
        (GpioId::WifiPower, p(E, 2)),
        (GpioId::SysLed, p(B, 0)),
        (GpioId::RfLed, p(B, 1)),
    ];

    const SPI: &[(SpiId, SpiBusDescriptor)] = &[(
        SpiId::Flash,
        SpiBusDescriptor::new(p(A, 5), p(B, 5), p(B, 4)),
    )];

    const UART: &[(UartId, UartDescriptor)] = &[
        (
            UartId::Uart1,
            UartDescriptor::without_flow_control(p(D, 8), p(D, 9)),
        ),
        (
            UartId::Uart2,
            UartDescriptor::without_flow_control(p(D, 5), p(D, 6)),
        ),
    ];

    const FLASH: &[(FlashId, FlashDevice)] = &[
        (FlashId::Embedded, FlashDevice::embedded(0x0800_0000, 0x10_0000)),
        (
            FlashId::Spi,
            FlashDevice::external_spi(SpiId::Flash, 0, 0x20_0000),
        ),
    ];

    const SPI_DEVICES: &[SpiDeviceDescriptor] = &[SpiDeviceDescriptor {
        bus: SpiId::Flash,
        chip_select: GpioId::FlashChipSelect,
        speed_hz: 40_000_000,
        mode: SpiModeFlags::CLOCK_RISING_EDGE
            .union(SpiModeFlags::CLOCK_IDLE_HIGH)
            .union(SpiModeFlags::USE_DMA)
            .union(SpiModeFlags::MSB_FIRST),
        bits: 8,
    }];

    const PARTITIONS: &[Partition] = &[
        Partition::new(
            PartitionId::Bootloader,
            FlashId::Embedded,
            "Bootloader",
            0x0800_0000,
            0x8000,
            PartitionOptions::READ_ONLY,
        ),
        Partition::new(
            PartitionId::Application,
            FlashId::Embedded,
            "Application",
            0x0800_8000,
            0x8_0000,
            PartitionOptions::READ_ONLY,
        ),
        Partition::unavailable(PartitionId::Ate, "ATE"),
        Partition::new(
            PartitionId::Parameter1,
            FlashId::Spi,
            "PARAMETER1",
            0x0,
            0x1000,
            PartitionOptions::READ_WRITE,
        ),
    ];

    pub const BOARD: Board = Board {
        name: "fixture",
        pin_space: PIN_SPACE,
        resources: ResourceTable {
            gpio: GPIO,
            spi: SPI,
            uart: UART,
            flash: FLASH,
            spi_devices: SPI_DEVICES,
            wifi: Some(WifiBus::Sdio1Bit {
                clk: p(C, 12),
                cmd: p(D, 2),
                d0: p(C, 8),
                irq: p(C, 9),
            }),
        },
        partitions: PARTITIONS,
        radio: RadioControl {
            reset: GpioId::WifiReset,
            reset_asserted: Level::Low,
            power: Some(GpioId::WifiPower),
            power_off: Level::High,
            clock_32k: Some(GpioId::Wifi32kClock),
        },
        roles: BoardRoles {
            sys_led: Some(Indicator::active_high(SYS_LED)),
            rf_led: Some(Indicator::active_low(GpioId::RfLed)),
            boot_sel: Some(SenseInput::pulled_up(BOOT_SEL)),
            mfg_sel: Some(SenseInput::pulled_up(MFG_SEL)),
            easylink_button: None,
        },
        mfg_policy: MfgModePolicy::SensePin,
        clock_domain: Some(ClockDomainPlan::BACKUP_DR0),
    };
}
