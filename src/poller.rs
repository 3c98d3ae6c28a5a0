/*
 * COPY Button Poller
 *
 * Acquires the Super I/O port window, then once per interval selects the
 * button register, reads it back and prints the decoded state. The loop
 * ends only when the shutdown flag is raised or stdout goes away; the grant
 * is dropped on the way out, which gives the ports back.
 */

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::PollConfig;
use crate::drivers::{ButtonState, SuperIo};
use crate::io::{PortAccess, PortBus};
use crate::utils::timer::Sleeper;

/// Exit status when the port window could not be acquired.
pub const EXIT_NO_PERMISSION: u8 = 1;

/// Polls one button line through a Super I/O register window.
pub struct Poller<B: PortBus, S: Sleeper> {
    sio: SuperIo<B>,
    sleeper: S,
    config: PollConfig,
}

impl<B: PortBus, S: Sleeper> Poller<B, S> {
    /// Creates a poller over `bus`, which must cover `config.range`.
    pub fn new(bus: B, sleeper: S, config: PollConfig) -> Poller<B, S> {
        Poller {
            sio: SuperIo::new(bus, config.index_port()),
            sleeper,
            config,
        }
    }

    /// Selects the button register, reads it and decodes the button line.
    pub fn poll_once(&mut self) -> ButtonState {
        let raw = self.sio.read_register(self.config.register);
        log::debug!("Register {:#04x} = {:#04x}", self.config.register, raw);
        ButtonState::from_register(raw, self.config.line)
    }

    /// Polls and reports until `stop` is raised.
    ///
    /// `stop` is checked before every poll, so a flag raised during the sleep
    /// ends the loop without another hardware access.
    ///
    /// # Returns
    ///
    /// Number of completed polls, or the error from writing to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W, stop: &AtomicBool) -> io::Result<u64> {
        let mut polls = 0;

        while !stop.load(Ordering::SeqCst) {
            let state = self.poll_once();
            report(out, state)?;
            polls += 1;

            self.sleeper.sleep(self.config.interval);
        }

        Ok(polls)
    }
}

/// Writes one status line and flushes it.
pub fn report<W: Write>(out: &mut W, state: ButtonState) -> io::Result<()> {
    writeln!(out, "COPY button: {}", state)?;
    out.flush()
}

/// Acquires the port window, polls until `stop` is raised, then releases it.
///
/// A refused permission request is reported on `err` and no port is touched.
///
/// # Returns
///
/// The process exit status.
pub fn run<A, S, W, E>(
    access: &mut A,
    sleeper: S,
    config: PollConfig,
    out: &mut W,
    err: &mut E,
    stop: &AtomicBool,
) -> u8
where
    A: PortAccess,
    S: Sleeper,
    W: Write,
    E: Write,
{
    let grant = match access.acquire(config.range) {
        Ok(grant) => grant,
        Err(error) => {
            // Nothing more can be done if stderr is gone too.
            let _ = writeln!(err, "{}", error);
            return EXIT_NO_PERMISSION;
        }
    };

    let mut poller = Poller::new(grant, sleeper, config);
    match poller.run(out, stop) {
        Ok(polls) => log::info!("Shutdown requested, stopping after {} polls", polls),
        Err(error) => log::warn!("Status output closed, stopping: {}", error),
    }

    0
}
