//! Boot mode signal and its write-once latch

use portable_atomic::{AtomicU8, Ordering};

/// Boot mode decided by the sense straps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum BootModeSignal {
    Normal = 0,
    Bootloader = 1,
    Manufacturing = 2,
}

impl BootModeSignal {
    fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(BootModeSignal::Normal),
            1 => Some(BootModeSignal::Bootloader),
            2 => Some(BootModeSignal::Manufacturing),
            _ => None,
        }
    }
}

const UNSET: u8 = 0xFF;
const CLAIMED: u8 = 0xFE;

/// Write-once holder for the boot mode
///
/// Claimed when bring-up starts, published once at its end, then read by
/// any later task. A claimed latch is never released, so a failed bring-up
/// cannot be retried within the same boot.
pub struct BootModeLatch {
    state: AtomicU8,
}

impl Default for BootModeLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl BootModeLatch {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNSET),
        }
    }

    /// Reserve the latch for a bring-up; `false` if one already started
    pub(crate) fn claim(&self) -> bool {
        self.state
            .compare_exchange(UNSET, CLAIMED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Store the boot mode
    ///
    /// Fails with the already published value on a second call.
    pub fn publish(&self, mode: BootModeSignal) -> Result<(), BootModeSignal> {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            if let Some(published) = BootModeSignal::from_u8(current) {
                warn!("boot mode already published");
                return Err(published);
            }
            match self.state.compare_exchange_weak(
                current,
                mode as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    /// Published boot mode, `None` before bring-up finished
    pub fn get(&self) -> Option<BootModeSignal> {
        BootModeSignal::from_u8(self.state.load(Ordering::Acquire))
    }
}

/// Boot mode of the running image
pub static BOOT_MODE: BootModeLatch = BootModeLatch::new();
