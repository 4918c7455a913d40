//! Board description
//!
//! A [`Board`] is plain `const` data: the resource and partition tables,
//! the radio control lines, the board-level roles bound to GPIOs, and the
//! per-board policies bring-up needs. Nothing here touches hardware.
//!
//! A board has to pass [`Board::validate`] before it can be brought up;
//! the returned [`ValidatedBoard`] is the only thing bring-up accepts.

use core::ops::Deref;

use plinth_hal::{BackupRegister, Level, PinMode, PinSpace, Pull};

use crate::error::LayoutViolation;
use crate::partition::{Partition, PartitionTable, ValidatedPartitionTable};
use crate::resource::{GpioId, ResourceTable};

/// Output stage of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Drive {
    PushPull,
    OpenDrain,
}

/// Status LED binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Indicator {
    pub gpio: GpioId,
    /// Level that lights the LED
    pub active: Level,
    pub drive: Drive,
}

impl Indicator {
    /// LED lit by driving high through a push-pull output
    pub const fn active_high(gpio: GpioId) -> Self {
        Self {
            gpio,
            active: Level::High,
            drive: Drive::PushPull,
        }
    }

    /// LED to VCC, lit by pulling low through an open-drain output
    pub const fn active_low(gpio: GpioId) -> Self {
        Self {
            gpio,
            active: Level::Low,
            drive: Drive::OpenDrain,
        }
    }

    pub const fn level(&self, on: bool) -> Level {
        if on {
            self.active
        } else {
            self.active.inverted()
        }
    }

    pub const fn mode(&self) -> PinMode {
        match self.drive {
            Drive::PushPull => PinMode::OutputPushPull,
            Drive::OpenDrain => PinMode::OutputOpenDrain,
        }
    }
}

/// Strap or button sampled at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SenseInput {
    pub gpio: GpioId,
    pub pull: Pull,
    /// Level that means "asserted"
    pub asserted: Level,
}

impl SenseInput {
    /// Pulled up, asserted when shorted to ground
    pub const fn pulled_up(gpio: GpioId) -> Self {
        Self {
            gpio,
            pull: Pull::Up,
            asserted: Level::Low,
        }
    }

    /// Pulled down, asserted when driven high
    pub const fn pulled_down(gpio: GpioId) -> Self {
        Self {
            gpio,
            pull: Pull::Down,
            asserted: Level::High,
        }
    }
}

/// Radio control lines held inert during bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RadioControl {
    pub reset: GpioId,
    /// Level that holds the radio in reset
    pub reset_asserted: Level,
    pub power: Option<GpioId>,
    /// Level that switches radio power off
    pub power_off: Level,
    /// Low-power sleep clock output, parked low
    pub clock_32k: Option<GpioId>,
}

/// Persistent real-time clock domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClockDomainPlan {
    /// Backup register holding the marker
    pub register: BackupRegister,
    /// Marker value meaning "RTC already initialized"
    pub sentinel: u32,
}

impl ClockDomainPlan {
    /// RTC_BKP_DR0 holding 0x00BB32F2
    pub const BACKUP_DR0: Self = Self {
        register: BackupRegister(0),
        sentinel: 0x00BB_32F2,
    };
}

/// How the board decides manufacturing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MfgModePolicy {
    /// Never enter manufacturing mode
    Disabled,
    /// Enter when `mfg_sel` reads asserted
    SensePin,
}

/// Board-level functions bound to GPIOs
///
/// Roles may share a GPIO; a boot strap doubling as the system LED is the
/// usual case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoardRoles {
    pub sys_led: Option<Indicator>,
    pub rf_led: Option<Indicator>,
    pub boot_sel: Option<SenseInput>,
    pub mfg_sel: Option<SenseInput>,
    pub easylink_button: Option<GpioId>,
}

impl BoardRoles {
    pub const NONE: Self = Self {
        sys_led: None,
        rf_led: None,
        boot_sel: None,
        mfg_sel: None,
        easylink_button: None,
    };
}

/// Named board function, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BoardRole {
    SysLed,
    RfLed,
    BootSel,
    MfgSel,
    EasyLinkButton,
    RadioReset,
    RadioPower,
    RadioClock,
}

/// Status indicators that can be driven after bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorRole {
    System,
    Rf,
}

/// Complete description of one board variant
#[derive(Debug, Clone, Copy)]
pub struct Board {
    pub name: &'static str,
    pub pin_space: PinSpace,
    pub resources: ResourceTable,
    /// Carved out of `resources.flash`
    pub partitions: &'static [Partition],
    pub radio: RadioControl,
    pub roles: BoardRoles,
    pub mfg_policy: MfgModePolicy,
    /// `None` skips the clock-domain check
    pub clock_domain: Option<ClockDomainPlan>,
}

impl Board {
    /// Same board, built without the clock-domain step (bootloader builds)
    pub const fn without_clock_domain(self) -> Self {
        Self {
            clock_domain: None,
            ..self
        }
    }

    /// Partitions over the board's flash devices
    pub const fn partition_table(&self) -> PartitionTable<'static> {
        PartitionTable::new(self.resources.flash, self.partitions)
    }

    pub const fn indicator(&self, role: IndicatorRole) -> Option<Indicator> {
        match role {
            IndicatorRole::System => self.roles.sys_led,
            IndicatorRole::Rf => self.roles.rf_led,
        }
    }

    /// Every role binding as `(role, gpio)`
    fn role_bindings(&self) -> [(BoardRole, Option<GpioId>); 8] {
        let roles = &self.roles;
        [
            (BoardRole::RadioReset, Some(self.radio.reset)),
            (BoardRole::RadioPower, self.radio.power),
            (BoardRole::RadioClock, self.radio.clock_32k),
            (BoardRole::SysLed, roles.sys_led.map(|led| led.gpio)),
            (BoardRole::RfLed, roles.rf_led.map(|led| led.gpio)),
            (BoardRole::BootSel, roles.boot_sel.map(|pin| pin.gpio)),
            (BoardRole::MfgSel, roles.mfg_sel.map(|pin| pin.gpio)),
            (BoardRole::EasyLinkButton, roles.easylink_button),
        ]
    }

    /// Check every table and binding
    ///
    /// Runs once at startup (or in a test) before bring-up. A violation
    /// means the board description is unusable.
    pub fn validate(&self) -> Result<ValidatedBoard<'_>, LayoutViolation> {
        self.resources.validate(&self.pin_space)?;
        self.partition_table().validate()?;

        for (role, gpio) in self.role_bindings() {
            let Some(gpio) = gpio else {
                continue;
            };
            if self.resources.lookup_gpio(gpio).is_err() {
                error!("{} bound to undeclared {}", role, gpio);
                return Err(LayoutViolation::UnresolvedRole { role, gpio });
            }
        }

        if self.mfg_policy == MfgModePolicy::SensePin && self.roles.mfg_sel.is_none() {
            return Err(LayoutViolation::MissingRole(BoardRole::MfgSel));
        }

        debug!("board {} validated", self.name);
        Ok(ValidatedBoard { board: self })
    }
}

/// A board that passed [`Board::validate`]
#[derive(Debug, Clone, Copy)]
pub struct ValidatedBoard<'a> {
    board: &'a Board,
}

impl<'a> ValidatedBoard<'a> {
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Partition table, already checked with the rest of the board
    pub fn partition_table(&self) -> ValidatedPartitionTable<'static> {
        ValidatedPartitionTable::checked(self.board.partition_table())
    }
}

impl Deref for ValidatedBoard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}
