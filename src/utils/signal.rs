/*
 * Shutdown Signals
 *
 * SIGINT and SIGTERM only raise a flag. The poll loop notices it at the next
 * iteration and returns, which drops the port grant and releases the I/O
 * permission before the process exits.
 */

use std::io;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Set once a shutdown signal has been delivered.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Number of the last shutdown signal, 0 if none.
static LAST_SIGNAL: AtomicI32 = AtomicI32::new(0);

extern "C" fn on_shutdown_signal(signum: libc::c_int) {
    // Only async-signal-safe work in here.
    LAST_SIGNAL.store(signum, Ordering::SeqCst);
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Routes SIGINT and SIGTERM to the shutdown flag.
pub fn install() -> io::Result<()> {
    let handler = on_shutdown_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;

    for signum in [libc::SIGINT, libc::SIGTERM] {
        // SAFETY: the handler only stores into atomics.
        let previous = unsafe { libc::signal(signum, handler) };
        if previous == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Flag the poll loop watches.
pub fn shutdown_flag() -> &'static AtomicBool {
    &SHUTDOWN
}

/// Signal that requested the shutdown, if any.
pub fn last_signal() -> Option<i32> {
    match LAST_SIGNAL.load(Ordering::SeqCst) {
        0 => None,
        signum => Some(signum),
    }
}
