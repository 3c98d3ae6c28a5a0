/*
 * SIO Button Poller Main Entry Point
 *
 * Watches the front-panel COPY button of a QNAP TVS-663. The button is wired
 * to a GPIO line of the Fintek F71869A Super I/O chip, reachable through the
 * index/data port pair at 0xA05/0xA06.
 *
 * Startup order:
 * - logger (stderr)
 * - SIGINT/SIGTERM handlers, so the port grant is released on shutdown
 * - ioperm(2) for the two ports, then the poll loop
 *
 * Exits 1 if the port permission is refused (not root, or no CAP_SYS_RAWIO).
 */

mod config;
mod drivers;
mod io;
mod poller;
#[cfg(test)]
mod tests;
mod utils;

use std::process::ExitCode;

use config::PollConfig;
use io::Ioperm;
use utils::signal;
use utils::timer::ThreadSleeper;

fn main() -> ExitCode {
    if let Err(err) = utils::logger::init() {
        eprintln!("Error with initializing logger: {}", err);
    }

    // Without the handlers a signal still ends the process, the kernel just
    // drops the I/O bitmap instead of us.
    if let Err(err) = signal::install() {
        log::warn!("Could not install shutdown handlers: {}", err);
    }

    let status = poller::run(
        &mut Ioperm,
        ThreadSleeper,
        PollConfig::default(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
        signal::shutdown_flag(),
    );

    if let Some(signum) = signal::last_signal() {
        log::info!("Exited on signal {}", signum);
    }

    ExitCode::from(status)
}
