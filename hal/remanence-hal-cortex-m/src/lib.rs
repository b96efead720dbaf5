//! Cortex-M implementation of the Remanence HAL traits
//!
//! This crate implements [`remanence_hal::mask::IrqMask`] with the PRIMASK
//! register, which masks every maskable interrupt on the core. That is the
//! strongest lock a single Cortex-M core has, and it is what makes the
//! atomic emulation in `remanence-atomics` sound on parts without native
//! read-modify-write instructions (ARMv6-M and friends).
//!
//! # Single-core only
//!
//! PRIMASK is per-core state. On a multi-core part another core keeps
//! running with the mask held, so none of this provides cross-core
//! atomicity.

#![no_std]

pub mod mask;

// Re-export the implementation at crate root for convenience
pub use mask::{Primask, RestoreState};
