//! MB85RS4MT serial FRAM driver
//!
//! The MB85RS4MT is a 4 Mbit (512 KiB) ferroelectric RAM on SPI. It is
//! byte-addressable with no page or sector structure: reads and writes run
//! at bus speed with no erase step and no write-completion polling, which
//! is what makes it usable as the backing store for a persistent heap.
//!
//! # Command protocol
//!
//! Single-byte opcodes. The memory commands carry a 3-byte big-endian
//! address regardless of chip capacity; the other commands carry none:
//!
//! - `0x9F` read manufacturer/device ID (4 response bytes)
//! - `0x06` set the write-enable latch
//! - `0x03` read memory
//! - `0x02` write memory
//!
//! The write-enable latch must be set immediately before every write
//! command; the chip clears it again when the write finishes.

use embedded_hal::spi::{Operation, SpiDevice};
use heapless::Vec;

use remanence_hal::spi::{Mode, SpiConfig};
use remanence_hal::storage::{PersistentStorage, StorageError};

/// MB85RS4MT commands
pub mod opcode {
    /// Read manufacturer/device ID
    pub const RDID: u8 = 0x9F;
    /// Set the write-enable latch
    pub const WREN: u8 = 0x06;
    /// Read memory
    pub const READ: u8 = 0x03;
    /// Write memory
    pub const WRITE: u8 = 0x02;
}

/// Usable size in bytes (4 Mbit)
pub const CAPACITY: usize = 512 * 1024;

/// Bus configuration the chip expects: mode 0, 8-bit words, up to 40 MHz
pub const SPI_CONFIG: SpiConfig = SpiConfig::new(40_000_000, Mode::Mode0);

/// Largest command frame: opcode plus 3-byte address
pub const FRAME_SIZE: usize = 4;

/// Expected RDID response
const DEVICE_ID: [u8; 4] = [
    0x04, // manufacturer (Fujitsu)
    0x7F, // continuation code
    0x48, // datasheet lists 0x49 here? parts in hand report 0x48
    0x03,
];

/// Build a command frame: the opcode plus, for memory commands, a 3-byte
/// big-endian address
pub fn command_frame(opcode: u8, address: Option<u32>) -> Vec<u8, FRAME_SIZE> {
    let mut frame = Vec::new();
    // These cannot fail: capacity covers opcode + 3 address bytes
    let _ = frame.push(opcode);
    if let Some(addr) = address {
        let _ = frame.push((addr >> 16) as u8);
        let _ = frame.push((addr >> 8) as u8);
        let _ = frame.push(addr as u8);
    }
    frame
}

/// MB85RS4MT driver
///
/// Owns the bus endpoint (chip select included) and a ready flag. A fresh
/// handle refuses transfers until [`init`](Self::init) has validated the
/// chip identity, so a device that was absent or broken at startup cannot
/// be written to by accident.
pub struct Mb85rs4mt<SPI> {
    spi: SPI,
    ready: bool,
}

impl<SPI: SpiDevice> Mb85rs4mt<SPI> {
    /// Bind a bus endpoint
    ///
    /// The handle starts not-ready; run [`init`](Self::init) before
    /// transferring data.
    pub fn new(spi: SPI) -> Self {
        Self { spi, ready: false }
    }

    /// Validate the chip identity and mark the handle ready
    pub fn init(&mut self) -> Result<(), StorageError> {
        self.validate_id()?;
        self.ready = true;
        Ok(())
    }

    /// Whether [`init`](Self::init) has succeeded on this handle
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Release the bus endpoint
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Check the chip's RDID response against the documented identity
    ///
    /// Reads exactly four bytes and accepts only an exact match; a
    /// transport failure or any single differing byte is an I/O error.
    pub fn validate_id(&mut self) -> Result<(), StorageError> {
        let frame = command_frame(opcode::RDID, None);
        let mut id = [0u8; 4];
        self.spi
            .transaction(&mut [Operation::Write(&frame), Operation::Read(&mut id)])
            .map_err(|_| StorageError::Io)?;

        if id != DEVICE_ID {
            return Err(StorageError::Io);
        }
        Ok(())
    }

    /// Read `buffer.len()` bytes starting at `address`
    ///
    /// The driver does not range-check the address; offsets past
    /// [`CAPACITY`] are the caller's responsibility.
    pub fn read_bytes(&mut self, address: u32, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.require_ready()?;

        let frame = command_frame(opcode::READ, Some(address));
        self.spi
            .transaction(&mut [Operation::Write(&frame), Operation::Read(buffer)])
            .map_err(|_| StorageError::Io)
    }

    /// Write `data` starting at `address`
    ///
    /// Sets the write-enable latch in its own transaction first; if that
    /// fails the write is not attempted. There is no read-back
    /// verification and no retry.
    pub fn write_bytes(&mut self, address: u32, data: &[u8]) -> Result<(), StorageError> {
        self.require_ready()?;

        // disable write protect
        let wren = command_frame(opcode::WREN, None);
        self.spi
            .transaction(&mut [Operation::Write(&wren)])
            .map_err(|_| StorageError::Io)?;

        // write cmd
        let frame = command_frame(opcode::WRITE, Some(address));
        self.spi
            .transaction(&mut [Operation::Write(&frame), Operation::Write(data)])
            .map_err(|_| StorageError::Io)
    }

    /// Read a single byte
    pub fn read_byte(&mut self, address: u32) -> Result<u8, StorageError> {
        let mut data = [0u8; 1];
        self.read_bytes(address, &mut data)?;
        Ok(data[0])
    }

    /// Write a single byte
    pub fn write_byte(&mut self, address: u32, value: u8) -> Result<(), StorageError> {
        self.write_bytes(address, &[value])
    }

    fn require_ready(&self) -> Result<(), StorageError> {
        if self.ready {
            Ok(())
        } else {
            Err(StorageError::NotReady)
        }
    }
}

impl<SPI: SpiDevice> PersistentStorage for Mb85rs4mt<SPI> {
    fn read(&mut self, address: u32, buffer: &mut [u8]) -> Result<(), StorageError> {
        debug_assert!(address as usize + buffer.len() <= self.capacity());
        self.read_bytes(address, buffer)
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<(), StorageError> {
        debug_assert!(address as usize + data.len() <= self.capacity());
        self.write_bytes(address, data)
    }

    fn capacity(&self) -> usize {
        CAPACITY
    }
}
