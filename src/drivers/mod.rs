/*
 * Device Drivers
 *
 * Drivers for the chips behind the I/O ports.
 */

pub mod superio;

pub use superio::{ButtonLines, ButtonState, SuperIo};
