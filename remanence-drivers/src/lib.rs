//! Storage device drivers
//!
//! This crate provides concrete implementations of the storage traits
//! defined in remanence-hal:
//!
//! - FRAM drivers (MB85RS4MT serial FRAM)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod fram;
