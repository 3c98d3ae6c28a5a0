/*
 * I/O Permission Grants
 *
 * Linux keeps a per-thread I/O permission bitmap. ioperm(2) flips the bits
 * for a port range, after which IN/OUT on those ports run without trapping.
 * Setting bits requires CAP_SYS_RAWIO.
 *
 * A `PortGrant` is the userspace handle for one such range. It is the only
 * way to reach `Pio`, and dropping it clears the bits again.
 */

use core::fmt;
use std::io;

use super::pio::{Pio, PortBus};

/// Contiguous range of I/O ports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PortRange {
    pub base: u16,
    pub count: u16,
}

impl PortRange {
    pub const fn new(base: u16, count: u16) -> Self {
        PortRange { base, count }
    }

    /// Checks if `port` lies inside the range.
    pub const fn contains(&self, port: u16) -> bool {
        port >= self.base && (port - self.base) < self.count
    }

    /// Last port of the range.
    pub const fn last(&self) -> u16 {
        self.base + self.count.saturating_sub(1)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}-{:#06x}", self.base, self.last())
    }
}

/// Port permission errors
#[derive(Debug)]
pub enum PortError {
    /// The kernel refused the ioperm request (usually EPERM without root)
    PermissionDenied { range: PortRange, source: io::Error },
    /// No ioperm on this target
    Unsupported,
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::PermissionDenied { source, .. } => write!(f, "ioperm: {}", source),
            PortError::Unsupported => {
                write!(f, "ioperm: port I/O is only available on Linux x86_64")
            }
        }
    }
}

impl std::error::Error for PortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortError::PermissionDenied { source, .. } => Some(source),
            PortError::Unsupported => None,
        }
    }
}

/// Something that can hand out access to a port range.
pub trait PortAccess {
    /// Capability returned on success; port I/O happens through it.
    type Grant: PortBus;

    /// Requests access to `range`.
    fn acquire(&mut self, range: PortRange) -> Result<Self::Grant, PortError>;
}

/// Port access backed by ioperm(2).
#[derive(Debug, Default, Copy, Clone)]
pub struct Ioperm;

impl PortAccess for Ioperm {
    type Grant = PortGrant;

    fn acquire(&mut self, range: PortRange) -> Result<PortGrant, PortError> {
        set_permission(range, true).map_err(|source| match source.kind() {
            io::ErrorKind::Unsupported => PortError::Unsupported,
            _ => PortError::PermissionDenied { range, source },
        })?;
        log::info!("I/O permission granted for ports {}", range);
        Ok(PortGrant { range })
    }
}

/// Live ioperm(2) permission for one port range.
///
/// Released when dropped.
#[derive(Debug)]
pub struct PortGrant {
    range: PortRange,
}

impl PortGrant {
    fn pio(&self, port: u16) -> Pio {
        assert!(
            self.range.contains(port),
            "port {:#06x} outside granted range {}",
            port,
            self.range
        );
        Pio::new(port)
    }
}

impl PortBus for PortGrant {
    fn read_byte(&mut self, port: u16) -> u8 {
        let pio = self.pio(port);
        // SAFETY: the port is inside the range ioperm accepted for this grant.
        unsafe { pio.read() }
    }

    fn write_byte(&mut self, port: u16, value: u8) {
        let pio = self.pio(port);
        // SAFETY: the port is inside the range ioperm accepted for this grant.
        unsafe { pio.write(value) }
    }
}

impl Drop for PortGrant {
    fn drop(&mut self) {
        match set_permission(self.range, false) {
            Ok(()) => log::info!("I/O permission released for ports {}", self.range),
            Err(err) => log::error!(
                "Failed to release I/O permission for ports {}: {}",
                self.range,
                err
            ),
        }
    }
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
unsafe extern "C" {
    fn ioperm(from: libc::c_ulong, num: libc::c_ulong, turn_on: libc::c_int) -> libc::c_int;
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
fn set_permission(range: PortRange, enable: bool) -> io::Result<()> {
    // SAFETY: ioperm only touches the calling thread's permission bitmap.
    let status = unsafe {
        ioperm(
            range.base as libc::c_ulong,
            range.count as libc::c_ulong,
            enable as libc::c_int,
        )
    };
    if status != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(all(target_os = "linux", target_arch = "x86_64")))]
fn set_permission(_range: PortRange, _enable: bool) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}
