/*
 * Port I/O (PIO) Implementation
 *
 * x86 port I/O from userspace. The IN/OUT instructions only succeed once the
 * process owns the matching bits of its I/O permission bitmap (see
 * `grant.rs`); without them the CPU raises #GP and the kernel delivers
 * SIGSEGV.
 *
 * `PortBus` is the narrow seam the rest of the tool talks to: one byte in,
 * one byte out, addressed by port number. Hardware access goes through
 * `PortGrant`, tests use a recording fake.
 */

#[cfg(target_arch = "x86_64")]
use x86_64::instructions::port::Port;

/// Byte-wide access to the I/O address space.
pub trait PortBus {
    /// Reads a byte from `port`.
    fn read_byte(&mut self, port: u16) -> u8;

    /// Writes `value` to `port`.
    fn write_byte(&mut self, port: u16, value: u8);
}

impl<B: PortBus + ?Sized> PortBus for &mut B {
    fn read_byte(&mut self, port: u16) -> u8 {
        (**self).read_byte(port)
    }

    fn write_byte(&mut self, port: u16, value: u8) {
        (**self).write_byte(port, value)
    }
}

/// Single byte-wide I/O port.
#[derive(Copy, Clone, Debug)]
pub struct Pio {
    port: u16,
}

impl Pio {
    /// Create a new PIO instance with the specified port.
    pub const fn new(port: u16) -> Self {
        Pio { port }
    }

    /// Read a byte from the port.
    ///
    /// # Safety
    ///
    /// The calling thread must hold I/O permission for the port.
    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    pub unsafe fn read(&self) -> u8 {
        let mut port = Port::<u8>::new(self.port);
        unsafe { port.read() }
    }

    /// Write a byte to the port.
    ///
    /// # Safety
    ///
    /// The calling thread must hold I/O permission for the port.
    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    pub unsafe fn write(&self, value: u8) {
        let mut port = Port::<u8>::new(self.port);
        unsafe { port.write(value) }
    }

    // No grant can be issued off x86_64, so these are never reached.
    #[cfg(not(target_arch = "x86_64"))]
    pub unsafe fn read(&self) -> u8 {
        unreachable!("port I/O on {:#x} requires x86_64", self.port)
    }

    #[cfg(not(target_arch = "x86_64"))]
    pub unsafe fn write(&self, _value: u8) {
        unreachable!("port I/O on {:#x} requires x86_64", self.port)
    }
}
