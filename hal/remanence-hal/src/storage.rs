//! Persistent storage abstractions
//!
//! Provides the byte-addressed storage interface a persistent-heap runtime
//! drives to save and restore its state across power loss. Implemented by
//! non-volatile memory drivers.

/// Errors from persistent storage operations
///
/// Deliberately coarse: the heap runtime only needs to know whether a
/// transfer completed. There is no transient/permanent distinction and no
/// partial-success reporting; a multi-byte transfer either completes in
/// full or failed as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The device was not ready when the handle was set up; no transfer
    /// was attempted
    NotReady,
    /// A bus transaction failed, or the device did not identify correctly
    Io,
}

/// Byte-addressed persistent storage
///
/// All operations are synchronous and blocking on the calling thread. A
/// handle is not safe to drive from multiple contexts at once; the `&mut`
/// receiver leaves that serialization to the caller. Implementations do
/// not retry and do not verify writes by reading back.
pub trait PersistentStorage {
    /// Read `buffer.len()` bytes starting at `address`
    fn read(&mut self, address: u32, buffer: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` starting at `address`
    fn write(&mut self, address: u32, data: &[u8]) -> Result<(), StorageError>;

    /// Total usable size in bytes
    fn capacity(&self) -> usize;
}
