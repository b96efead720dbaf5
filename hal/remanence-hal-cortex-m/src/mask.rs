//! PRIMASK-based critical sections
//!
//! `acquire` records whether interrupts were enabled, then executes
//! `cpsid i`. `release` executes `cpsie i` only if they were enabled at
//! entry, so nested sections restore the true prior state instead of
//! unconditionally unmasking.

use cortex_m::interrupt;
use cortex_m::register::primask;

use remanence_hal::mask::IrqMask;

/// Critical sections via the Cortex-M PRIMASK register
pub struct Primask;

/// Interrupt state captured on entry
///
/// Not `Copy`/`Clone`: a token restores exactly one `acquire`.
pub struct RestoreState {
    was_active: bool,
}

impl IrqMask for Primask {
    type Restore = RestoreState;

    fn acquire() -> RestoreState {
        let was_active = primask::read().is_active();
        interrupt::disable();
        RestoreState { was_active }
    }

    fn release(restore: RestoreState) {
        if restore.was_active {
            // SAFETY: only re-enables interrupts that were enabled when the
            // matching acquire ran.
            unsafe { interrupt::enable() };
        }
    }
}
