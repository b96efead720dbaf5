//! Atomic builtin emulation for cores without native read-modify-write
//!
//! Small cores (ARMv6-M and similar) have no atomic swap, compare-exchange,
//! or fetch-op instructions. When code containing ordinary atomic operations
//! or legacy `__sync_*` intrinsics is compiled for such a target, the
//! compiler lowers them to out-of-line builtin calls and expects the runtime
//! to provide them. This crate is that runtime: every builtin for word
//! widths 1, 2, and 4 bytes, implemented by masking interrupts around a
//! plain memory access.
//!
//! # Single core only
//!
//! Masking interrupts serializes everything that could run on *this* core,
//! which makes every emulated operation effectively sequentially consistent
//! regardless of the ordering the caller requested - all ordering parameters
//! are accepted and ignored. None of this holds on a multi-core part, where
//! another core keeps running with the mask held. This is a deliberate
//! simplification for single-core controllers, not a general SMP memory
//! model.
//!
//! # Layout
//!
//! - [`ops`] - the operation bodies, generic over the word width
//! - [`builtins`] - the `extern "C"` entry points carrying the symbol names
//!   the compiler emits calls to, instantiated for each width
//!
//! On bare-metal ARM builds the interrupt mask is the PRIMASK implementation
//! from `remanence-hal-cortex-m`; on hosted builds a process-global mutex
//! stands in so the bodies can be exercised by ordinary tests.

#![cfg_attr(target_os = "none", no_std)]

mod platform;
mod word;

pub mod builtins;
pub mod ops;

pub use word::Word;
