//! Memory-mapped IO ports
//!
//! A port is a 32-bit device register. Each write is an observable hardware event, so writes are
//! performed with volatile stores: they are never merged, reordered or elided, and the register is
//! touched again on every write even when the value could be known statically.

use core::marker::PhantomData;
use core::ptr;

use storm_core::memory_map::{self, GPIO_OUT};

/// A marker type that is not Send and not Sync (!Send, !Sync).
type PhantomNotSendNotSync = PhantomData<*const ()>;

// —————————————————————————————— Port Interface ———————————————————————————— //

/// An output port, accepting 32-bit writes.
///
/// The interface is write-only: programs driving an output port never read it back.
pub trait Port {
    fn write(&mut self, value: u32);
}

impl<P: Port + ?Sized> Port for &mut P {
    fn write(&mut self, value: u32) {
        (**self).write(value)
    }
}

// ——————————————————————————————— MMIO Port ———————————————————————————————— //

/// A 32-bit memory-mapped device register.
#[derive(Debug)]
pub struct MmioPort {
    addr: usize,
    _marker: PhantomNotSendNotSync,
}

impl MmioPort {
    /// Creates a handle on the register at the given bus address.
    ///
    /// SAFETY:
    /// The address must point to a 32-bit, 4-byte aligned device register, and no other handle on
    /// the same register may exist.
    pub const unsafe fn new(addr: usize) -> Self {
        MmioPort {
            addr,
            _marker: PhantomData,
        }
    }

    /// Creates a handle on the general purpose output port of the demo SoC.
    ///
    /// SAFETY:
    /// Must only be called when running on the demo SoC, and at most once.
    pub unsafe fn gpio_out() -> Self {
        Self::new(memory_map::bus_address(GPIO_OUT))
    }

    /// Returns the bus address of the register.
    pub fn address(&self) -> usize {
        self.addr
    }
}

impl Port for MmioPort {
    fn write(&mut self, value: u32) {
        // SAFETY: the address was checked to be a valid device register at construction, and we
        // take `self` with a &mut reference to enforce aliasing rules.
        unsafe { ptr::write_volatile(self.addr as *mut u32, value) };
    }
}

// ————————————————————————————— Recording Port ————————————————————————————— //

/// A port living in host memory, which records every write.
///
/// Used to simulate programs on the host architecture.
#[cfg(any(test, feature = "host"))]
#[derive(Debug, Default, Clone)]
pub struct RecordingPort {
    writes: alloc::vec::Vec<u32>,
}

#[cfg(any(test, feature = "host"))]
impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// All the values written so far, oldest first.
    pub fn writes(&self) -> &[u32] {
        &self.writes
    }

    /// Number of writes performed so far.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

#[cfg(any(test, feature = "host"))]
impl Port for RecordingPort {
    fn write(&mut self, value: u32) {
        self.writes.push(value);
    }
}
