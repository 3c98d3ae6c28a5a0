/*
 * Super I/O Register Window
 *
 * The F71869A exposes its GPIO bank through an index/data port pair: the
 * register number goes to the index port, its value is then read from the
 * data port right after it. On the TVS-663 the window sits at 0xA05/0xA06
 * and register 0xE2 latches the front-panel COPY button.
 */

use core::fmt;

use bitflags::bitflags;

use crate::io::PortBus;

bitflags! {
    /// Input lines of the COPY button register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ButtonLines: u8 {
        // 0 and 1 unknown
        /// COPY button, low while pressed
        const COPY = 1 << 2;
        // 3 to 7 unknown
    }
}

/// Logical state of an active-low button line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Released,
    Pressed,
}

impl ButtonState {
    /// Decodes `line` out of a raw register value.
    ///
    /// The hardware pulls the line low while the button is held, so a set bit
    /// means released and a clear bit means pressed. Bits outside `line` are
    /// ignored.
    pub fn from_register(value: u8, line: ButtonLines) -> ButtonState {
        if ButtonLines::from_bits_retain(value).contains(line) {
            ButtonState::Released
        } else {
            ButtonState::Pressed
        }
    }
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonState::Released => write!(f, "released"),
            ButtonState::Pressed => write!(f, "pressed"),
        }
    }
}

/// Index/data register window of a Super I/O chip.
pub struct SuperIo<B: PortBus> {
    bus: B,
    index: u16,
    data: u16,
}

impl<B: PortBus> SuperIo<B> {
    /// Creates a window whose index port is `base` and data port `base + 1`.
    pub fn new(bus: B, base: u16) -> SuperIo<B> {
        SuperIo {
            bus,
            index: base,
            data: base + 1,
        }
    }

    /// Selects `register` and reads its current value.
    pub fn read_register(&mut self, register: u8) -> u8 {
        self.bus.write_byte(self.index, register);
        self.bus.read_byte(self.data)
    }
}
