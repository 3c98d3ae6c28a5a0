/*
 * Input/Output System
 *
 * Port-mapped I/O for a userspace process. Access to the I/O address space
 * is a capability: a `PortGrant` is only handed out once the kernel has
 * accepted an ioperm(2) request, and every IN/OUT goes through it.
 */

pub mod grant;
pub mod pio;

pub use grant::{Ioperm, PortAccess, PortError, PortRange};
pub use pio::PortBus;
