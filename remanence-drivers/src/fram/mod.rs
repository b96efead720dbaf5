//! FRAM driver implementations

pub mod mb85rs4mt;

pub use mb85rs4mt::Mb85rs4mt;
