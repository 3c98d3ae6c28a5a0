/*
 * Test Fixtures
 *
 * Stand-ins for the hardware and the clock, shared by the unit tests.
 *
 * - `FakeBus` serves scripted register values and records every port access
 * - `FakeAccess` grants a `FakeBus` or refuses like a non-root ioperm call
 * - `RecordingSleeper` records requested delays and raises a stop flag
 */

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::io::{PortAccess, PortBus, PortError, PortRange};
use crate::utils::timer::Sleeper;

/// One recorded port access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Write(u16, u8),
    Read(u16),
}

pub type BusLog = Rc<RefCell<Vec<BusOp>>>;

/// Port bus that replays scripted reads. The last value repeats once the
/// script runs out.
pub struct FakeBus {
    log: BusLog,
    values: VecDeque<u8>,
    last: u8,
}

impl FakeBus {
    pub fn with_values(values: &[u8]) -> FakeBus {
        FakeBus {
            log: Rc::new(RefCell::new(Vec::new())),
            values: values.iter().copied().collect(),
            last: 0xFF,
        }
    }

    /// Handle on the access log that outlives the bus.
    pub fn log(&self) -> BusLog {
        Rc::clone(&self.log)
    }
}

impl PortBus for FakeBus {
    fn read_byte(&mut self, port: u16) -> u8 {
        self.log.borrow_mut().push(BusOp::Read(port));
        if let Some(value) = self.values.pop_front() {
            self.last = value;
        }
        self.last
    }

    fn write_byte(&mut self, port: u16, value: u8) {
        self.log.borrow_mut().push(BusOp::Write(port, value));
    }
}

/// Port access that either hands out one `FakeBus` or refuses with EPERM.
pub struct FakeAccess {
    bus: Option<FakeBus>,
    pub requested: Vec<PortRange>,
}

impl FakeAccess {
    pub fn granting(bus: FakeBus) -> FakeAccess {
        FakeAccess {
            bus: Some(bus),
            requested: Vec::new(),
        }
    }

    pub fn refusing() -> FakeAccess {
        FakeAccess {
            bus: None,
            requested: Vec::new(),
        }
    }
}

impl PortAccess for FakeAccess {
    type Grant = FakeBus;

    fn acquire(&mut self, range: PortRange) -> Result<FakeBus, PortError> {
        self.requested.push(range);
        self.bus.take().ok_or_else(|| PortError::PermissionDenied {
            range,
            source: io::Error::from_raw_os_error(libc::EPERM),
        })
    }
}

/// Sleeper that returns immediately and stops the loop after `limit` sleeps.
pub struct RecordingSleeper<'a> {
    pub slept: Vec<Duration>,
    limit: usize,
    stop: &'a AtomicBool,
}

impl<'a> RecordingSleeper<'a> {
    pub fn stopping_after(limit: usize, stop: &'a AtomicBool) -> RecordingSleeper<'a> {
        RecordingSleeper {
            slept: Vec::new(),
            limit,
            stop,
        }
    }
}

impl Sleeper for RecordingSleeper<'_> {
    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
        if self.slept.len() >= self.limit {
            self.stop.store(true, Ordering::SeqCst);
        }
    }
}
