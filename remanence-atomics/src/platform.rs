//! Interrupt-mask selection per target
//!
//! Bare-metal ARM builds mask interrupts through PRIMASK. Hosted builds
//! substitute a process-global mutex so the operation bodies can run under
//! an ordinary test harness; it models the same "one access at a time"
//! guarantee without any interrupt state.

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub(crate) use remanence_hal_cortex_m::Primask as Mask;

#[cfg(not(target_os = "none"))]
pub(crate) use host::HostMask as Mask;

#[cfg(all(not(target_arch = "arm"), target_os = "none"))]
compile_error!("no interrupt-mask implementation for this target");

#[cfg(not(target_os = "none"))]
mod host {
    use remanence_hal::mask::IrqMask;
    use std::sync::{Mutex, MutexGuard};

    static LOCK: Mutex<()> = Mutex::new(());

    /// Stand-in mask for hosted targets. Testing only.
    pub struct HostMask;

    impl IrqMask for HostMask {
        type Restore = MutexGuard<'static, ()>;

        fn acquire() -> Self::Restore {
            LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn release(restore: Self::Restore) {
            drop(restore);
        }
    }
}
