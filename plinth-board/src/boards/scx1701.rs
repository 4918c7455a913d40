//! SCX1701: STM32F2 module with an EMW1062 Wi-Fi radio
//!
//! The radio is strapped for SDIO (4-bit or 1-bit) or gSPI at assembly
//! time. The gSPI strap reuses SDIO_CMD as chip select and three SDIO lines
//! as the SPI bus, so the Wi-Fi chip select and the Wi-Fi SPI bus only
//! exist on [`GSPI`].
//!
//! Pin   | Logical         | Function
//! ------+-----------------+---------------------------
//! PE11  | Sw2Button       | Boot select strap
//! PE10  | Sw3Button       | EasyLink button
//! PA4   | FlashChipSelect | SPI flash CS
//! PD15  | WifiReset       | Radio reset, active low
//! PA8   | Wifi32kClock    | Radio sleep clock
//! PE2   | WifiPower       | Radio power switch, active low
//! PD2   | WifiChipSelect  | gSPI CS (SDIO_CMD), gSPI only
//! PD8/9 | Uart1           | Console (USART3)
//! PD5/6 | Uart2           | USART6
//! PA5   | SpiId::Flash    | SCLK, MOSI PB5, MISO PB4

use plinth_hal::Port::{A, B, D, E};
use plinth_hal::{Level, McuPin};
use plinth_hal_stm32f2::pins::{
    p, SDIO_CLK, SDIO_CMD, SDIO_D0, SDIO_D1, SDIO_D2, SDIO_D3, SDIO_OOB_IRQ, STDIO_UART_RX,
    STDIO_UART_TX,
};
use plinth_hal_stm32f2::PIN_SPACE;

use crate::board::{Board, BoardRoles, ClockDomainPlan, MfgModePolicy, RadioControl, SenseInput};
use crate::partition::{FlashDevice, Partition, PartitionOptions};
use crate::resource::{
    FlashId, GpioId, PartitionId, ResourceTable, SpiBusDescriptor, SpiDeviceDescriptor,
    SpiId, SpiModeFlags, UartDescriptor, UartId, WifiBus,
};

const GPIO_SDIO: &[(GpioId, McuPin)] = &[
    (GpioId::Sw2Button, p(E, 11)),
    (GpioId::Sw3Button, p(E, 10)),
    (GpioId::FlashChipSelect, p(A, 4)),
    (GpioId::WifiReset, p(D, 15)),
    (GpioId::Wifi32kClock, p(A, 8)),
    (GpioId::WifiPower, p(E, 2)),
];

const GPIO_GSPI: &[(GpioId, McuPin)] = &[
    (GpioId::Sw2Button, p(E, 11)),
    (GpioId::Sw3Button, p(E, 10)),
    (GpioId::FlashChipSelect, p(A, 4)),
    (GpioId::WifiChipSelect, SDIO_CMD),
    (GpioId::WifiReset, p(D, 15)),
    (GpioId::Wifi32kClock, p(A, 8)),
    (GpioId::WifiPower, p(E, 2)),
];

const UART: &[(UartId, UartDescriptor)] = &[
    (
        UartId::Uart1,
        UartDescriptor::without_flow_control(STDIO_UART_TX, STDIO_UART_RX),
    ),
    (
        UartId::Uart2,
        UartDescriptor::without_flow_control(p(D, 5), p(D, 6)),
    ),
];

const SPI_FLASH_BUS: (SpiId, SpiBusDescriptor) = (
    SpiId::Flash,
    SpiBusDescriptor::new(p(A, 5), p(B, 5), p(B, 4)),
);

const SPI_SDIO: &[(SpiId, SpiBusDescriptor)] = &[SPI_FLASH_BUS];

const SPI_GSPI: &[(SpiId, SpiBusDescriptor)] = &[
    SPI_FLASH_BUS,
    (SpiId::Wifi, SpiBusDescriptor::new(SDIO_D2, SDIO_CLK, SDIO_D3)),
];

/// 40 MHz, mode 3, DMA, MSB first
const SPI_MODE: SpiModeFlags = SpiModeFlags::CLOCK_RISING_EDGE
    .union(SpiModeFlags::CLOCK_IDLE_HIGH)
    .union(SpiModeFlags::USE_DMA)
    .union(SpiModeFlags::MSB_FIRST);

const SPI_FLASH_DEVICE: SpiDeviceDescriptor = SpiDeviceDescriptor {
    bus: SpiId::Flash,
    chip_select: GpioId::FlashChipSelect,
    speed_hz: 40_000_000,
    mode: SPI_MODE,
    bits: 8,
};

const WIFI_SPI_DEVICE: SpiDeviceDescriptor = SpiDeviceDescriptor {
    bus: SpiId::Wifi,
    chip_select: GpioId::WifiChipSelect,
    speed_hz: 40_000_000,
    mode: SPI_MODE,
    bits: 8,
};

const FLASH: &[(FlashId, FlashDevice)] = &[
    (FlashId::Embedded, FlashDevice::embedded(0x0800_0000, 0x10_0000)),
    (
        FlashId::Spi,
        FlashDevice::external_spi(SpiId::Flash, 0x0, 0x20_0000),
    ),
];

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
        PartitionId::RfFirmware,
        FlashId::Spi,
        "RF Firmware",
        0x2000,
        0x3_E000,
        PartitionOptions::READ_ONLY,
    ),
    Partition::new(
        PartitionId::OtaTemp,
        FlashId::Spi,
        "OTA Storage",
        0x4_0000,
        0x8_0000,
        PartitionOptions::READ_WRITE,
    ),
    Partition::new(
        PartitionId::Parameter1,
        FlashId::Spi,
        "PARAMETER1",
        0x0,
        0x1000,
        PartitionOptions::READ_WRITE,
    ),
    Partition::new(
        PartitionId::Parameter2,
        FlashId::Spi,
        "PARAMETER2",
        0x1000,
        0x1000,
        PartitionOptions::READ_WRITE,
    ),
    Partition::new(
        PartitionId::Filesystem,
        FlashId::Spi,
        "FILESYS",
        0x10_0000,
        0x10_0000,
        PartitionOptions::READ_WRITE,
    ),
];

const RADIO: RadioControl = RadioControl {
    reset: GpioId::WifiReset,
    reset_asserted: Level::Low,
    power: Some(GpioId::WifiPower),
    power_off: Level::High,
    clock_32k: Some(GpioId::Wifi32kClock),
};

const ROLES: BoardRoles = BoardRoles {
    boot_sel: Some(SenseInput::pulled_up(GpioId::Sw2Button)),
    easylink_button: Some(GpioId::Sw3Button),
    ..BoardRoles::NONE
};

const fn board(name: &'static str, resources: ResourceTable) -> Board {
    Board {
        name,
        pin_space: PIN_SPACE,
        resources,
        partitions: PARTITIONS,
        radio: RADIO,
        roles: ROLES,
        mfg_policy: MfgModePolicy::Disabled,
        clock_domain: Some(ClockDomainPlan::BACKUP_DR0),
    }
}

/// 4-bit SDIO with out-of-band interrupt
pub const SDIO_4BIT: Board = board(
    "SCX1701 (SDIO 4-bit)",
    ResourceTable {
        gpio: GPIO_SDIO,
        spi: SPI_SDIO,
        uart: UART,
        flash: FLASH,
        spi_devices: &[SPI_FLASH_DEVICE],
        wifi: Some(WifiBus::Sdio4Bit {
            clk: SDIO_CLK,
            cmd: SDIO_CMD,
            d0: SDIO_D0,
            d1: SDIO_D1,
            d2: SDIO_D2,
            d3: SDIO_D3,
            oob_irq: SDIO_OOB_IRQ,
        }),
    },
);

/// 1-bit SDIO, D1 as interrupt
pub const SDIO_1BIT: Board = board(
    "SCX1701 (SDIO 1-bit)",
    ResourceTable {
        gpio: GPIO_SDIO,
        spi: SPI_SDIO,
        uart: UART,
        flash: FLASH,
        spi_devices: &[SPI_FLASH_DEVICE],
        wifi: Some(WifiBus::Sdio1Bit {
            clk: SDIO_CLK,
            cmd: SDIO_CMD,
            d0: SDIO_D0,
            irq: SDIO_D1,
        }),
    },
);

/// gSPI over SDIO_D2/CLK/D3, chip select on SDIO_CMD
pub const GSPI: Board = board(
    "SCX1701 (gSPI)",
    ResourceTable {
        gpio: GPIO_GSPI,
        spi: SPI_GSPI,
        uart: UART,
        flash: FLASH,
        spi_devices: &[SPI_FLASH_DEVICE, WIFI_SPI_DEVICE],
        wifi: Some(WifiBus::Gspi { irq: SDIO_D1 }),
    },
);
