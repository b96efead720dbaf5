//! Compiler-facing `extern "C"` entry points
//!
//! Two naming schemes resolve to the operation bodies in [`ops`](crate::ops):
//!
//! - the modern `__atomic_<op>_<n>` builtins, which carry a trailing
//!   memory-ordering parameter, and
//! - the legacy `__sync_<op>_<n>` intrinsics, which do not.
//!
//! Ordering parameters and the compare-exchange weak flag are accepted and
//! ignored; the global interrupt mask makes every operation sequentially
//! consistent on a single core, so there are no spurious failures and no
//! weaker orderings to honor.
//!
//! The external symbol names are only attached on bare-metal builds. Hosted
//! builds keep these as ordinary mangled functions so the test harness can
//! call them without colliding with the host toolchain's own builtins.
//!
//! Some toolchains refuse a direct definition of the reserved `__sync_*`
//! names. The `sync-alias` feature handles them the way the C runtimes do:
//! the body is exported under a `_builtin`-suffixed name and the reserved
//! name is bound to it with assembler `.global`/`.type`/`.set` directives,
//! so both names resolve to one body.

use core::ffi::c_int;

use crate::ops;

/// Modern builtin surface for one word width
macro_rules! atomic_entry_points {
    (
        $ty:ty,
        $load:ident, $store:ident, $exchange:ident, $compare_exchange:ident,
        $fetch_add:ident, $fetch_sub:ident, $fetch_and:ident, $fetch_or:ident,
        $fetch_xor:ident $(,)?
    ) => {
        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $load(mem: *const $ty, _order: c_int) -> $ty {
            unsafe { ops::load(mem) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $store(mem: *mut $ty, value: $ty, _order: c_int) {
            unsafe { ops::store(mem, value) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $exchange(mem: *mut $ty, value: $ty, _order: c_int) -> $ty {
            unsafe { ops::exchange(mem, value) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $compare_exchange(
            mem: *mut $ty,
            expected: *mut $ty,
            desired: $ty,
            _weak: bool,
            _success: c_int,
            _failure: c_int,
        ) -> bool {
            unsafe { ops::compare_exchange(mem, expected, desired) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $fetch_add(ptr: *mut $ty, value: $ty, _order: c_int) -> $ty {
            unsafe { ops::fetch_add(ptr, value) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $fetch_sub(ptr: *mut $ty, value: $ty, _order: c_int) -> $ty {
            unsafe { ops::fetch_sub(ptr, value) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $fetch_and(ptr: *mut $ty, value: $ty, _order: c_int) -> $ty {
            unsafe { ops::fetch_and(ptr, value) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $fetch_or(ptr: *mut $ty, value: $ty, _order: c_int) -> $ty {
            unsafe { ops::fetch_or(ptr, value) }
        }

        #[cfg_attr(target_os = "none", no_mangle)]
        pub unsafe extern "C" fn $fetch_xor(ptr: *mut $ty, value: $ty, _order: c_int) -> $ty {
            unsafe { ops::fetch_xor(ptr, value) }
        }
    };
}

/// One legacy symbol: defined directly, or through the `_builtin` alias
/// when the `sync-alias` feature is active
macro_rules! sync_symbol {
    (
        $name:ident, $name_builtin:ident,
        fn($($arg:ident: $arg_ty:ty),*) -> $ret:ty { $($body:tt)* }
    ) => {
        #[cfg_attr(all(target_os = "none", not(feature = "sync-alias")), no_mangle)]
        pub unsafe extern "C" fn $name($($arg: $arg_ty),*) -> $ret {
            $($body)*
        }

        #[cfg(all(target_os = "none", feature = "sync-alias"))]
        const _: () = {
            #[no_mangle]
            unsafe extern "C" fn $name_builtin($($arg: $arg_ty),*) -> $ret {
                // SAFETY: forwarded caller contract
                unsafe { $name($($arg),*) }
            }

            core::arch::global_asm!(
                concat!(".type ", stringify!($name), ", %function"),
                concat!(".global ", stringify!($name)),
                concat!(".set ", stringify!($name), ", ", stringify!($name_builtin)),
            );
        };
    };
}

/// Legacy intrinsic surface for one word width
macro_rules! sync_entry_points {
    (
        $ty:ty,
        $fetch_add:ident / $fetch_add_b:ident,
        $fetch_sub:ident / $fetch_sub_b:ident,
        $fetch_and:ident / $fetch_and_b:ident,
        $fetch_or:ident / $fetch_or_b:ident,
        $fetch_xor:ident / $fetch_xor_b:ident,
        $bool_cas:ident / $bool_cas_b:ident,
        $val_cas:ident / $val_cas_b:ident,
        $test_and_set:ident / $test_and_set_b:ident,
        $lock_release:ident / $lock_release_b:ident $(,)?
    ) => {
        sync_symbol!($fetch_add, $fetch_add_b, fn(ptr: *mut $ty, value: $ty) -> $ty {
            unsafe { ops::fetch_add(ptr, value) }
        });

        sync_symbol!($fetch_sub, $fetch_sub_b, fn(ptr: *mut $ty, value: $ty) -> $ty {
            unsafe { ops::fetch_sub(ptr, value) }
        });

        sync_symbol!($fetch_and, $fetch_and_b, fn(ptr: *mut $ty, value: $ty) -> $ty {
            unsafe { ops::fetch_and(ptr, value) }
        });

        sync_symbol!($fetch_or, $fetch_or_b, fn(ptr: *mut $ty, value: $ty) -> $ty {
            unsafe { ops::fetch_or(ptr, value) }
        });

        sync_symbol!($fetch_xor, $fetch_xor_b, fn(ptr: *mut $ty, value: $ty) -> $ty {
            unsafe { ops::fetch_xor(ptr, value) }
        });

        sync_symbol!($bool_cas, $bool_cas_b, fn(ptr: *mut $ty, oldval: $ty, newval: $ty) -> bool {
            unsafe { ops::val_compare_and_swap(ptr, oldval, newval) == oldval }
        });

        sync_symbol!($val_cas, $val_cas_b, fn(ptr: *mut $ty, oldval: $ty, newval: $ty) -> $ty {
            unsafe { ops::val_compare_and_swap(ptr, oldval, newval) }
        });

        sync_symbol!($test_and_set, $test_and_set_b, fn(ptr: *mut $ty, value: $ty) -> $ty {
            unsafe { ops::exchange(ptr, value) }
        });

        sync_symbol!($lock_release, $lock_release_b, fn(ptr: *mut $ty) -> () {
            unsafe { ops::store(ptr, <$ty as crate::Word>::ZERO) }
        });
    };
}

atomic_entry_points!(
    u8,
    __atomic_load_1,
    __atomic_store_1,
    __atomic_exchange_1,
    __atomic_compare_exchange_1,
    __atomic_fetch_add_1,
    __atomic_fetch_sub_1,
    __atomic_fetch_and_1,
    __atomic_fetch_or_1,
    __atomic_fetch_xor_1,
);

atomic_entry_points!(
    u16,
    __atomic_load_2,
    __atomic_store_2,
    __atomic_exchange_2,
    __atomic_compare_exchange_2,
    __atomic_fetch_add_2,
    __atomic_fetch_sub_2,
    __atomic_fetch_and_2,
    __atomic_fetch_or_2,
    __atomic_fetch_xor_2,
);

atomic_entry_points!(
    u32,
    __atomic_load_4,
    __atomic_store_4,
    __atomic_exchange_4,
    __atomic_compare_exchange_4,
    __atomic_fetch_add_4,
    __atomic_fetch_sub_4,
    __atomic_fetch_and_4,
    __atomic_fetch_or_4,
    __atomic_fetch_xor_4,
);

sync_entry_points!(
    u8,
    __sync_fetch_and_add_1 / __sync_fetch_and_add_1_builtin,
    __sync_fetch_and_sub_1 / __sync_fetch_and_sub_1_builtin,
    __sync_fetch_and_and_1 / __sync_fetch_and_and_1_builtin,
    __sync_fetch_and_or_1 / __sync_fetch_and_or_1_builtin,
    __sync_fetch_and_xor_1 / __sync_fetch_and_xor_1_builtin,
    __sync_bool_compare_and_swap_1 / __sync_bool_compare_and_swap_1_builtin,
    __sync_val_compare_and_swap_1 / __sync_val_compare_and_swap_1_builtin,
    __sync_lock_test_and_set_1 / __sync_lock_test_and_set_1_builtin,
    __sync_lock_release_1 / __sync_lock_release_1_builtin,
);

sync_entry_points!(
    u16,
    __sync_fetch_and_add_2 / __sync_fetch_and_add_2_builtin,
    __sync_fetch_and_sub_2 / __sync_fetch_and_sub_2_builtin,
    __sync_fetch_and_and_2 / __sync_fetch_and_and_2_builtin,
    __sync_fetch_and_or_2 / __sync_fetch_and_or_2_builtin,
    __sync_fetch_and_xor_2 / __sync_fetch_and_xor_2_builtin,
    __sync_bool_compare_and_swap_2 / __sync_bool_compare_and_swap_2_builtin,
    __sync_val_compare_and_swap_2 / __sync_val_compare_and_swap_2_builtin,
    __sync_lock_test_and_set_2 / __sync_lock_test_and_set_2_builtin,
    __sync_lock_release_2 / __sync_lock_release_2_builtin,
);

sync_entry_points!(
    u32,
    __sync_fetch_and_add_4 / __sync_fetch_and_add_4_builtin,
    __sync_fetch_and_sub_4 / __sync_fetch_and_sub_4_builtin,
    __sync_fetch_and_and_4 / __sync_fetch_and_and_4_builtin,
    __sync_fetch_and_or_4 / __sync_fetch_and_or_4_builtin,
    __sync_fetch_and_xor_4 / __sync_fetch_and_xor_4_builtin,
    __sync_bool_compare_and_swap_4 / __sync_bool_compare_and_swap_4_builtin,
    __sync_val_compare_and_swap_4 / __sync_val_compare_and_swap_4_builtin,
    __sync_lock_test_and_set_4 / __sync_lock_test_and_set_4_builtin,
    __sync_lock_release_4 / __sync_lock_release_4_builtin,
);

#[cfg(test)]
mod tests {
    use super::*;

    const RELAXED: c_int = 0;
    const SEQ_CST: c_int = 5;

    #[test]
    fn test_exchange_entry_point() {
        let mut word: u32 = 11;
        unsafe {
            assert_eq!(__atomic_exchange_4(&mut word, 22, SEQ_CST), 11);
            assert_eq!(__atomic_load_4(&word, SEQ_CST), 22);
        }
    }

    #[test]
    fn test_orderings_are_ignored() {
        let mut word: u16 = 0;
        unsafe {
            __atomic_store_2(&mut word, 9, RELAXED);
            assert_eq!(__atomic_load_2(&word, RELAXED), 9);
            assert_eq!(__atomic_fetch_add_2(&mut word, 1, RELAXED), 9);
            assert_eq!(__atomic_load_2(&word, SEQ_CST), 10);
        }
    }

    #[test]
    fn test_compare_exchange_entry_point() {
        let mut word: u8 = 5;
        let mut expected: u8 = 5;
        unsafe {
            assert!(__atomic_compare_exchange_1(
                &mut word,
                &mut expected,
                6,
                true,
                SEQ_CST,
                SEQ_CST
            ));
            assert_eq!(word, 6);

            // Stale expectation: fails and reloads `expected`
            expected = 5;
            assert!(!__atomic_compare_exchange_1(
                &mut word,
                &mut expected,
                7,
                false,
                SEQ_CST,
                SEQ_CST
            ));
            assert_eq!(word, 6);
            assert_eq!(expected, 6);
        }
    }

    #[test]
    fn test_legacy_matches_modern() {
        let mut a: u16 = 100;
        let mut b: u16 = 100;
        unsafe {
            assert_eq!(
                __sync_fetch_and_add_2(&mut a, 28),
                __atomic_fetch_add_2(&mut b, 28, SEQ_CST)
            );
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_bool_and_val_compare_and_swap() {
        let mut word: u32 = 1;
        unsafe {
            assert!(__sync_bool_compare_and_swap_4(&mut word, 1, 2));
            assert!(!__sync_bool_compare_and_swap_4(&mut word, 1, 3));
            assert_eq!(word, 2);

            assert_eq!(__sync_val_compare_and_swap_4(&mut word, 2, 9), 2);
            assert_eq!(word, 9);
            assert_eq!(__sync_val_compare_and_swap_4(&mut word, 2, 1), 9);
            assert_eq!(word, 9);
        }
    }

    #[test]
    fn test_lock_test_and_set_then_release() {
        let mut lock: u8 = 0;
        unsafe {
            assert_eq!(__sync_lock_test_and_set_1(&mut lock, 1), 0);
            assert_eq!(__sync_lock_test_and_set_1(&mut lock, 1), 1, "already held");
            __sync_lock_release_1(&mut lock);
            assert_eq!(__atomic_load_1(&lock, SEQ_CST), 0);
        }
    }
}
