//! 32-bit memory-mapped register access for the receiver, PHY and ISP blocks.

use core::ptr;
use log::error;

/// A block of 32-bit registers addressed by byte offset.
pub trait RegisterBlock {
    fn read(&mut self, offset: u32) -> u32;
    fn write(&mut self, offset: u32, value: u32);

    /// Read-modify-write, preserving the bits outside `mask`.
    fn update_bits(&mut self, offset: u32, mask: u32, bits: u32) {
        let value = self.read(offset);
        self.write(offset, (value & !mask) | (bits & mask));
    }
}

impl<T: RegisterBlock + ?Sized> RegisterBlock for &mut T {
    fn read(&mut self, offset: u32) -> u32 {
        (**self).read(offset)
    }

    fn write(&mut self, offset: u32, value: u32) {
        (**self).write(offset, value)
    }
}

/// Volatile access to a mapped register window or a DMA-visible buffer.
pub struct Mmio {
    base: *mut u32,
    len: usize,
}

// The window is owned by exactly one handle.
unsafe impl Send for Mmio {}

impl Mmio {
    /// # Safety
    ///
    /// `base` must be 4-byte aligned and point to `len` bytes of registers or memory that stay
    /// mapped for the lifetime of the handle, with no other handle to the same window.
    pub unsafe fn new(base: *mut u32, len: usize) -> Self {
        Mmio { base, len }
    }

    /// Window size in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `None` for unaligned offsets and offsets outside the window.
    fn word(&self, offset: u32) -> Option<*mut u32> {
        let offset = offset as usize;
        let end = offset.checked_add(4)?;
        if offset % 4 != 0 || end > self.len {
            error!(
                "mmio: register offset {:#x} outside {:#x} byte window",
                offset, self.len
            );
            return None;
        }

        // Bounds checked above
        Some(unsafe { self.base.add(offset / 4) })
    }
}

/// Accesses outside the window read as zero and drop writes.
impl RegisterBlock for Mmio {
    fn read(&mut self, offset: u32) -> u32 {
        match self.word(offset) {
            Some(word) => unsafe { ptr::read_volatile(word) },
            None => 0,
        }
    }

    fn write(&mut self, offset: u32, value: u32) {
        if let Some(word) = self.word(offset) {
            unsafe { ptr::write_volatile(word, value) }
        }
    }
}
