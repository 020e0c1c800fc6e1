//! A generic driver for the Serial Camera Control Bus on OmniVision image sensors with 16-bit
//! register addresses and 8-bit register values. Works on anything implementing the embedded-hal
//! blocking I2C traits.
//!
//! Reads are two separate transactions (address write, then a one byte read); writes are a single
//! `[addr_hi, addr_lo, value]` transaction.

use core::fmt;
use core::marker::PhantomData;
use embedded_hal::blocking::{delay::DelayMs, i2c};
use heapless::LinearMap;
use log::debug;
use thiserror::Error as ThisError;

/// Statically allocated (size 64) linear map for mapping addresses (`u16`) to values (`u8`).
/// Entries are applied in insertion order.
pub type RegMap = LinearMap<u16, u8, 64>;

/// One entry of an ordered register sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegValue {
    pub addr: u16,
    pub value: u8,
    /// Sleep after the write, in milliseconds.
    pub delay_ms: u32,
}

impl RegValue {
    pub const fn new(addr: u16, value: u8) -> Self {
        RegValue {
            addr,
            value,
            delay_ms: 0,
        }
    }

    pub const fn with_delay(addr: u16, value: u8, delay_ms: u32) -> Self {
        RegValue {
            addr,
            value,
            delay_ms,
        }
    }
}

/// A masked register write: bits outside `mask` are preserved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldWrite {
    pub addr: u16,
    pub mask: u8,
    pub bits: u8,
}

/// SCCB driver.
pub struct Sccb<I2C> {
    /// Marker to ensure the same I2C type is used in all calls.
    i2c: PhantomData<I2C>,
    /// Device I2C address (7-bit).
    address: u8,
}

/// SCCB errors.
#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum SccbError<E: fmt::Debug> {
    /// I2C write error.
    #[error("i2c write to register {addr:#06x} failed: {err:?}")]
    I2cWrite { addr: u16, err: E },
    /// I2C read error.
    #[error("i2c read of register {addr:#06x} failed: {err:?}")]
    I2cRead { addr: u16, err: E },
    /// Register write-readback mismatch.
    #[error("register {addr:#06x} reads back {found:#04x}")]
    RegMismatch { addr: u16, found: u8 },
    /// Register map capacity exceeded while building a configuration.
    #[error("register map is full")]
    MapFull,
    /// Multi-byte field wider than four bytes or running past the register space.
    #[error("invalid {width}-byte field at {addr:#06x}")]
    InvalidField { addr: u16, width: u8 },
}

/// A register sequence stopped at its first failing write.
#[derive(Debug, Eq, PartialEq)]
pub struct SequenceError<E: fmt::Debug> {
    /// Entries written before the failure.
    pub written: usize,
    pub error: SccbError<E>,
}

/// Errors while building a register map.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum MapError {
    #[error("register map is full")]
    Full,
    #[error("invalid {width}-byte field at {addr:#06x}")]
    InvalidField { addr: u16, width: u8 },
}

impl<E: fmt::Debug> From<MapError> for SccbError<E> {
    fn from(err: MapError) -> Self {
        match err {
            MapError::Full => SccbError::MapFull,
            MapError::InvalidField { addr, width } => SccbError::InvalidField { addr, width },
        }
    }
}

/// Fields are 1 to 4 bytes and must end at or before 0xffff.
fn check_field(addr: u16, width: u8) -> Result<(), MapError> {
    if (1..=4).contains(&width) && addr.checked_add(u16::from(width) - 1).is_some() {
        Ok(())
    } else {
        Err(MapError::InvalidField { addr, width })
    }
}

/// Insert a big-endian field of `width` bytes starting at `addr`.
pub fn insert_be(map: &mut RegMap, addr: u16, value: u32, width: u8) -> Result<(), MapError> {
    check_field(addr, width)?;
    for i in 0..u16::from(width) {
        let shift = 8 * (u16::from(width) - 1 - i);
        map.insert(addr + i, (value >> shift) as u8)
            .map_err(|_| MapError::Full)?;
    }

    Ok(())
}

impl<I2C, E> Sccb<I2C>
where
    I2C: i2c::Read<Error = E> + i2c::Write<Error = E>,
    E: fmt::Debug,
{
    /// Creates a new SCCB driver associated with an I2C peripheral.
    pub fn new(_i2c: &I2C, address: u8) -> Self {
        Sccb {
            i2c: PhantomData,
            address,
        }
    }

    /// Device address currently used on the bus.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// I2C read wrapper for mapping `E --> SccbError`.
    fn i2c_read(&self, i2c: &mut I2C, addr: u16, buf: &mut [u8]) -> Result<(), SccbError<E>> {
        match i2c.read(self.address, buf) {
            Ok(()) => Ok(()),
            Err(err) => Err(SccbError::I2cRead { addr, err }),
        }
    }

    /// I2C write wrapper for mapping `E --> SccbError`.
    fn i2c_write(&self, i2c: &mut I2C, addr: u16, buf: &[u8]) -> Result<(), SccbError<E>> {
        match i2c.write(self.address, buf) {
            Ok(()) => Ok(()),
            Err(err) => Err(SccbError::I2cWrite { addr, err }),
        }
    }

    /// Read a register, must be two seperate transactions and we can't use `WriteRead`.
    pub fn read(&self, i2c: &mut I2C, addr: u16) -> Result<u8, SccbError<E>> {
        // Write the address
        let [hi, lo] = addr.to_be_bytes();
        self.i2c_write(i2c, addr, &[hi, lo])?;

        // Read the value
        let mut buf = [0x00];
        self.i2c_read(i2c, addr, &mut buf)?;

        Ok(buf[0])
    }

    /// Write a register.
    pub fn write(&self, i2c: &mut I2C, addr: u16, val: u8) -> Result<(), SccbError<E>> {
        let [hi, lo] = addr.to_be_bytes();
        self.i2c_write(i2c, addr, &[hi, lo, val])
    }

    /// Write a 16-bit value, high byte first.
    pub fn write16(&self, i2c: &mut I2C, addr: u16, val: u16) -> Result<(), SccbError<E>> {
        self.write_be(i2c, addr, val.into(), 2)
    }

    /// Write a big-endian field spanning `width` consecutive registers.
    pub fn write_be(
        &self,
        i2c: &mut I2C,
        addr: u16,
        val: u32,
        width: u8,
    ) -> Result<(), SccbError<E>> {
        check_field(addr, width)?;
        for i in 0..u16::from(width) {
            let shift = 8 * (u16::from(width) - 1 - i);
            self.write(i2c, addr + i, (val >> shift) as u8)?;
        }

        Ok(())
    }

    /// Read a big-endian value spanning `width` consecutive registers.
    pub fn read_be(&self, i2c: &mut I2C, addr: u16, width: u8) -> Result<u32, SccbError<E>> {
        check_field(addr, width)?;
        let mut val = 0;
        for i in 0..u16::from(width) {
            val = (val << 8) | u32::from(self.read(i2c, addr + i)?);
        }

        Ok(val)
    }

    /// Read-modify-write, preserving the bits outside `mask`.
    pub fn update_bits(
        &self,
        i2c: &mut I2C,
        addr: u16,
        mask: u8,
        bits: u8,
    ) -> Result<(), SccbError<E>> {
        let val = self.read(i2c, addr)?;
        self.write(i2c, addr, (val & !mask) | (bits & mask))
    }

    /// Apply a masked field write. Full-byte masks skip the read.
    pub fn write_field(&self, i2c: &mut I2C, field: &FieldWrite) -> Result<(), SccbError<E>> {
        if field.mask == 0xff {
            self.write(i2c, field.addr, field.bits)
        } else {
            self.update_bits(i2c, field.addr, field.mask, field.bits)
        }
    }

    /// Write each entry in order, sleeping after entries that carry a delay. Stops at the first
    /// failing write and reports how many entries made it.
    pub fn write_sequence<D: DelayMs<u32>>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
        sequence: &[RegValue],
    ) -> Result<usize, SequenceError<E>> {
        for (written, entry) in sequence.iter().enumerate() {
            if let Err(error) = self.write(i2c, entry.addr, entry.value) {
                return Err(SequenceError { written, error });
            }

            if entry.delay_ms > 0 {
                delay.delay_ms(entry.delay_ms);
            }
        }

        Ok(sequence.len())
    }

    /// Apply a register configuration specified by the linear map.
    pub fn apply_config(
        &self,
        i2c: &mut I2C,
        map: &RegMap,
        do_readback: bool,
    ) -> Result<(), SccbError<E>> {
        for (reg, val) in map.iter() {
            // Write the register
            self.write(i2c, *reg, *val)?;

            // Readback to check the write register worked
            if do_readback {
                let readback = self.read(i2c, *reg)?;
                if readback != *val {
                    return Err(SccbError::RegMismatch {
                        addr: *reg,
                        found: readback,
                    });
                }
            }
        }

        Ok(())
    }

    /// Move the device to `new_address` by writing it (in 8-bit form) to `reg` at the current
    /// address. Later transactions use the new address.
    pub fn reassign(
        &mut self,
        i2c: &mut I2C,
        reg: u16,
        new_address: u8,
    ) -> Result<(), SccbError<E>> {
        if new_address == self.address {
            return Ok(());
        }

        self.write(i2c, reg, new_address << 1)?;
        debug!(
            "sccb: device moved from {:#04x} to {:#04x}",
            self.address, new_address
        );
        self.address = new_address;

        Ok(())
    }
}
