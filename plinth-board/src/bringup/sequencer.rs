//! Bring-up sequencer
//!
//! One pass over [`BringUpStep::SEQUENCE`]. Every step either completes or
//! ends the sequence with [`BringUpFailed`]; nothing is retried, since the
//! hardware touched here has no meaningful partial state to recover from.

use heapless::Vec;
use plinth_hal::{GpioController, HalError, Level, McuPin, PinMode, RealTimeClock};

use super::{
    BootModeLatch, BootModeSignal, BringUpReport, BringUpStep, ClockDomainOutcome, BOOT_MODE,
};
use crate::board::{Board, IndicatorRole, MfgModePolicy, SenseInput, ValidatedBoard};
use crate::error::{BringUpError, BringUpFailed};
use crate::resource::GpioId;

struct Sequencer<'a, H> {
    board: &'a Board,
    hal: &'a mut H,
    trace: Vec<BringUpStep, 5>,
}

impl<'a, H: GpioController + RealTimeClock> Sequencer<'a, H> {
    fn pin(&self, gpio: GpioId) -> Result<McuPin, HalError> {
        // Validation guarantees every bound GPIO resolves
        self.board
            .resources
            .lookup_gpio(gpio)
            .map_err(|_| HalError::InvalidPin)
    }

    fn output(&mut self, gpio: GpioId, mode: PinMode, level: Level) -> Result<(), HalError> {
        let pin = self.pin(gpio)?;
        self.hal.configure(pin, mode)?;
        self.hal.set(pin, level)
    }

    fn enter(&mut self, step: BringUpStep) {
        debug!("bring-up: {}", step);
        // Capacity equals the number of steps
        let _ = self.trace.push(step);
    }

    fn radio_reset(&mut self) -> Result<(), HalError> {
        let radio = self.board.radio;

        self.output(radio.reset, PinMode::OutputPushPull, radio.reset_asserted)?;
        if let Some(power) = radio.power {
            self.output(power, PinMode::OutputPushPull, radio.power_off)?;
        }
        if let Some(clock) = radio.clock_32k {
            self.output(clock, PinMode::OutputPushPull, Level::Low)?;
        }
        Ok(())
    }

    fn clock_domain_check(&mut self) -> Result<ClockDomainOutcome, HalError> {
        let Some(plan) = self.board.clock_domain else {
            return Ok(ClockDomainOutcome::Skipped);
        };

        self.enter(BringUpStep::ClockDomainCheck);
        self.hal.enable_backup_access()?;
        let marker = self.hal.read_marker(plan.register)?;
        if marker == plan.sentinel {
            debug!("rtc marker present, keeping time");
            return Ok(ClockDomainOutcome::Preserved);
        }

        info!("rtc marker {=u32:#x} != {=u32:#x}, initializing", marker, plan.sentinel);
        self.hal.init()?;
        self.hal.set_time(0)?;
        self.hal.write_marker(plan.register, plan.sentinel)?;
        Ok(ClockDomainOutcome::Initialized)
    }

    fn indicator_defaults(&mut self) -> Result<(), HalError> {
        for role in [IndicatorRole::System, IndicatorRole::Rf] {
            if let Some(led) = self.board.indicator(role) {
                self.output(led.gpio, led.mode(), led.level(false))?;
            }
        }
        Ok(())
    }

    fn sense_inputs_configure(&mut self) -> Result<(), HalError> {
        let roles = self.board.roles;
        for input in [roles.boot_sel, roles.mfg_sel].into_iter().flatten() {
            let pin = self.pin(input.gpio)?;
            self.hal.configure(pin, PinMode::Input(input.pull))?;
        }
        Ok(())
    }

    fn asserted(&mut self, input: Option<SenseInput>) -> bool {
        let Some(input) = input else {
            return false;
        };
        match self.pin(input.gpio) {
            Ok(pin) => self.hal.get(pin) == input.asserted,
            Err(_) => false,
        }
    }

    fn boot_mode_evaluate(&mut self) -> BootModeSignal {
        let roles = self.board.roles;

        if self.asserted(roles.boot_sel) {
            return BootModeSignal::Bootloader;
        }
        if self.board.mfg_policy == MfgModePolicy::SensePin && self.asserted(roles.mfg_sel) {
            return BootModeSignal::Manufacturing;
        }
        BootModeSignal::Normal
    }

    fn run(mut self) -> Result<BringUpReport, BringUpFailed> {
        let fail = |step| move |cause| BringUpFailed { step, cause };

        self.enter(BringUpStep::RadioReset);
        self.radio_reset().map_err(fail(BringUpStep::RadioReset))?;

        let clock_domain = self
            .clock_domain_check()
            .map_err(fail(BringUpStep::ClockDomainCheck))?;

        self.enter(BringUpStep::IndicatorDefaults);
        self.indicator_defaults()
            .map_err(fail(BringUpStep::IndicatorDefaults))?;

        self.enter(BringUpStep::SenseInputsConfigure);
        self.sense_inputs_configure()
            .map_err(fail(BringUpStep::SenseInputsConfigure))?;

        self.enter(BringUpStep::BootModeEvaluate);
        let boot_mode = self.boot_mode_evaluate();

        info!("{} up, boot mode {}", self.board.name, boot_mode);
        Ok(BringUpReport {
            boot_mode,
            clock_domain,
            trace: self.trace,
        })
    }
}

/// Run the board bring-up sequence, once per boot
///
/// The boot mode is published to [`BOOT_MODE`]. Any later call fails with
/// [`BringUpError::AlreadyRan`] without touching the hardware.
pub fn run_bring_up<H>(
    board: &ValidatedBoard<'_>,
    hal: &mut H,
) -> Result<BringUpReport, BringUpError>
where
    H: GpioController + RealTimeClock,
{
    run_bring_up_with(board, hal, &BOOT_MODE)
}

/// [`run_bring_up`] publishing into a caller-owned latch
pub fn run_bring_up_with<H>(
    board: &ValidatedBoard<'_>,
    hal: &mut H,
    latch: &BootModeLatch,
) -> Result<BringUpReport, BringUpError>
where
    H: GpioController + RealTimeClock,
{
    if !latch.claim() {
        warn!("bring-up already ran");
        return Err(BringUpError::AlreadyRan);
    }

    let report = Sequencer {
        board: board.board(),
        hal,
        trace: Vec::new(),
    }
    .run()
    .map_err(|failure| {
        error!("bring-up failed in {}: {}", failure.step, failure.cause);
        failure
    })?;

    latch
        .publish(report.boot_mode)
        .map_err(|_| BringUpError::AlreadyRan)?;
    Ok(report)
}

/// Switch a status LED after bring-up
///
/// Unbound indicators are ignored, like an LED that is not fitted.
pub fn set_indicator<G: GpioController>(
    board: &ValidatedBoard<'_>,
    gpio: &mut G,
    role: IndicatorRole,
    on: bool,
) -> Result<(), HalError> {
    let Some(led) = board.indicator(role) else {
        return Ok(());
    };
    let pin = board
        .resources
        .lookup_gpio(led.gpio)
        .map_err(|_| HalError::InvalidPin)?;
    gpio.set(pin, led.level(on))
}
