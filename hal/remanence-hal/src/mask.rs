//! Global interrupt-mask critical sections
//!
//! Provides the acquire/release pair that platform crates implement on top
//! of their interrupt-mask mechanism. On a single core, masking interrupts
//! is a universal lock: nothing else can run until the mask is restored.
//! This is not a multi-core atomicity model.
//!
//! Sections must stay short. While one is held every interrupt in the
//! system is deferred, including timer ticks, so the body must be O(1)
//! memory accesses and must never block, yield, or touch a bus.

/// Interrupt-mask critical section provider
///
/// `acquire` disables all interrupts and captures the prior enable state in
/// an opaque token; `release` restores exactly that state. Implementations
/// must be nesting-safe: the token carries the true prior state, never a
/// fixed "enabled" state, so an inner release does not unmask an outer
/// section.
pub trait IrqMask {
    /// Opaque token holding the interrupt state captured at entry.
    ///
    /// Consumed exactly once by [`IrqMask::release`]. Implementations should
    /// not make it `Copy` or `Clone`.
    type Restore;

    /// Disable all interrupts and return the prior state
    fn acquire() -> Self::Restore;

    /// Restore the interrupt state captured by the matching `acquire`
    fn release(restore: Self::Restore);

    /// Run `f` with interrupts masked
    ///
    /// The restore happens on every path out of `f`, including unwinding on
    /// hosted test targets.
    fn free<R>(f: impl FnOnce() -> R) -> R
    where
        Self: Sized,
    {
        let guard = MaskGuard::<Self> {
            restore: Some(Self::acquire()),
        };
        let result = f();
        drop(guard);
        result
    }
}

/// Releases the mask on drop so an `acquire` is never left unpaired
struct MaskGuard<M: IrqMask> {
    restore: Option<M::Restore>,
}

impl<M: IrqMask> Drop for MaskGuard<M> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            M::release(restore);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    /// Counts mask depth instead of touching real interrupt state
    struct CountingMask;

    static DEPTH: AtomicUsize = AtomicUsize::new(0);
    static MAX_DEPTH: AtomicUsize = AtomicUsize::new(0);

    struct Token {
        prior_depth: usize,
    }

    impl IrqMask for CountingMask {
        type Restore = Token;

        fn acquire() -> Token {
            let prior_depth = DEPTH.fetch_add(1, Ordering::SeqCst);
            MAX_DEPTH.fetch_max(prior_depth + 1, Ordering::SeqCst);
            Token { prior_depth }
        }

        fn release(restore: Token) {
            let depth = DEPTH.fetch_sub(1, Ordering::SeqCst);
            assert_eq!(depth, restore.prior_depth + 1, "releases out of order");
        }
    }

    #[test]
    fn test_free_pairs_and_nests() {
        let value = CountingMask::free(|| {
            assert_eq!(DEPTH.load(Ordering::SeqCst), 1);
            42
        });
        assert_eq!(value, 42);
        assert_eq!(DEPTH.load(Ordering::SeqCst), 0);

        CountingMask::free(|| {
            CountingMask::free(|| {
                assert_eq!(DEPTH.load(Ordering::SeqCst), 2);
            });
            assert_eq!(DEPTH.load(Ordering::SeqCst), 1);
        });
        assert_eq!(DEPTH.load(Ordering::SeqCst), 0);
        assert!(MAX_DEPTH.load(Ordering::SeqCst) >= 2);
    }
}
