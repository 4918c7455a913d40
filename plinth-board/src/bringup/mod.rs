//! Board bring-up
//!
//! ```text
//! RadioReset ─► ClockDomainCheck ─► IndicatorDefaults ─► SenseInputsConfigure ─► BootModeEvaluate
//! ```
//!
//! The sequence runs once per boot, synchronously, before interrupts are
//! enabled. The boot mode it decides is published through [`BOOT_MODE`];
//! a second run is refused. On boards without a clock domain the
//! `ClockDomainCheck` step is left out of the trace entirely.

mod boot_mode;
mod sequencer;
mod step;

pub use boot_mode::{BootModeLatch, BootModeSignal, BOOT_MODE};
pub use sequencer::{run_bring_up, run_bring_up_with, set_indicator};
pub use step::{BringUpReport, BringUpStep, ClockDomainOutcome};
