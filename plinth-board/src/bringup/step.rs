//! Bring-up steps and report

use heapless::Vec;

use super::BootModeSignal;

/// Bring-up step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BringUpStep {
    /// Hold the radio in reset with its power and clock parked
    RadioReset,
    /// Initialize the RTC unless the backup marker says it already is
    ClockDomainCheck,
    /// Drive status LEDs to their off level
    IndicatorDefaults,
    /// Configure boot and manufacturing straps as pulled inputs
    SenseInputsConfigure,
    /// Sample the straps
    BootModeEvaluate,
}

impl BringUpStep {
    pub const SEQUENCE: [BringUpStep; 5] = [
        BringUpStep::RadioReset,
        BringUpStep::ClockDomainCheck,
        BringUpStep::IndicatorDefaults,
        BringUpStep::SenseInputsConfigure,
        BringUpStep::BootModeEvaluate,
    ];
}

/// What the clock-domain step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ClockDomainOutcome {
    /// Marker was missing; RTC initialized and marker written
    Initialized,
    /// Marker matched; RTC state left alone
    Preserved,
    /// Board has no clock domain in this build
    Skipped,
}

/// Result of a completed bring-up
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringUpReport {
    pub boot_mode: BootModeSignal,
    pub clock_domain: ClockDomainOutcome,
    /// Steps executed, in order
    pub trace: Vec<BringUpStep, 5>,
}
