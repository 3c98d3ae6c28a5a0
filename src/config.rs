/*
 * Poller Configuration
 *
 * Fixed hardware layout of the F71869A index/data pair on the TVS-663 and
 * the polling cadence. Nothing here is read at runtime: the tool takes no
 * flags, environment variables or files.
 */

use core::time::Duration;

use crate::drivers::ButtonLines;
use crate::io::PortRange;

/// Index port of the Super I/O register window.
pub const BASE_PORT: u16 = 0xA05;

/// Index port plus the data port right after it.
pub const PORT_COUNT: u16 = 2;

/// Register holding the COPY button line.
pub const COPY_BUTTON_REGISTER: u8 = 0xE2;

/// Delay between two polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Everything the poll loop needs to know about the hardware.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub range: PortRange,
    pub register: u8,
    /// Button bit inside `register`, high while released.
    pub line: ButtonLines,
    pub interval: Duration,
}

impl PollConfig {
    /// Index port, where the register number is written.
    pub const fn index_port(&self) -> u16 {
        self.range.base
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            range: PortRange::new(BASE_PORT, PORT_COUNT),
            register: COPY_BUTTON_REGISTER,
            line: ButtonLines::COPY,
            interval: POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = PollConfig::default();

        assert_eq!(config.index_port(), 0xA05);
        assert_eq!(config.range.count, 2);
        assert_eq!(config.register, 0xE2);
        assert_eq!(config.line.bits(), 0x04);
        assert_eq!(config.interval, Duration::from_secs(1));
    }
}
