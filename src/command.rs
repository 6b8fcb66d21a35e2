//! Controller commands and their wire encoding

/// High-level commands of the controller's instruction set
#[derive(Clone, Copy)]
pub enum CommandSet {
    // these two are not commands from the datasheet's table, they are the
    // raw single-pulse writes of the power-on handshake
    // we name them, to make things tidy
    /// The `0b0011` reset nibble, sent three times after power-on while
    /// the controller's bus width is still unknown
    WakeUp,
    /// The `0b0010` nibble that commits the controller to the 4 bit bus
    /// (4 bit handshake only)
    HalfFunctionSet,
    /// Blank the display and reset the cursor address to zero
    ClearDisplay,
    /// Reset the cursor address to zero, undo any display shift
    ReturnHome,
    /// Cursor move direction and display shift behavior on each write
    EntryModeSet(MoveDirection, ShiftType),
    /// Display / cursor / cursor blink switches
    DisplayOnOff {
        #[allow(missing_docs)]
        display: State,
        #[allow(missing_docs)]
        cursor: State,
        #[allow(missing_docs)]
        cursor_blink: State,
    },
    /// Move the cursor, or the whole display window, one step
    CursorOrDisplayShift(ShiftType, MoveDirection),
    /// Bus width, line count and font selection
    FunctionSet(DataWidth, LineMode, Font),
    /// Set the DDRAM address the next data write lands on
    SetDDRAMAddress(u8),
    /// Write one byte to RAM at the current address
    WriteToRAM(u8),
}

/// Cursor / display window movement direction
#[derive(Clone, Copy, PartialEq, Default)]
pub enum MoveDirection {
    #[allow(missing_docs)]
    RightToLeft = 0,
    #[allow(missing_docs)]
    #[default]
    LeftToRight = 1,
}

/// What a movement applies to
#[derive(Clone, Copy, PartialEq, Default)]
pub enum ShiftType {
    #[allow(missing_docs)]
    #[default]
    CursorOnly = 0,
    #[allow(missing_docs)]
    CursorAndDisplay = 1,
}

/// A switchable feature state
#[derive(Clone, Copy, PartialEq, Default)]
pub enum State {
    #[allow(missing_docs)]
    Off = 0,
    #[allow(missing_docs)]
    #[default]
    On = 1,
}

/// Data bus width
#[derive(Clone, Copy, PartialEq, Default)]
pub enum DataWidth {
    #[allow(missing_docs)]
    #[default]
    Bit4 = 0,
    #[allow(missing_docs)]
    Bit8 = 1,
}

/// Display line count
#[derive(Clone, Copy, PartialEq, Default)]
pub enum LineMode {
    #[allow(missing_docs)]
    OneLine = 0,
    #[allow(missing_docs)]
    #[default]
    TwoLine = 1,
}

/// Character font
#[derive(Clone, Copy, PartialEq, Default)]
pub enum Font {
    #[allow(missing_docs)]
    #[default]
    Font5x8 = 0,
    #[allow(missing_docs)]
    Font5x11 = 1,
}

/// Which controller register a transfer targets
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RegisterSelection {
    /// The instruction register (RS low)
    Instruction,
    /// The data register (RS high)
    Data,
}

/// The bits a transfer presents on the data lines
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bits {
    /// A bare nibble, latched with a single enable pulse and not
    /// synchronized with the busy flag (power-on handshake only)
    Bit4(u8),
    /// A full byte, split into two nibbles on a 4 bit bus
    Bit8(u8),
}

/// A wire-level command: the target register and the bits to present
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Command {
    register: RegisterSelection,
    bits: Bits,
}

impl Command {
    pub(crate) fn raw_nibble(nibble: u8) -> Self {
        assert!(nibble < 1 << 4, "handshake nibble wider than 4 bits");
        Self {
            register: RegisterSelection::Instruction,
            bits: Bits::Bit4(nibble),
        }
    }

    pub(crate) fn instruction(raw_bits: u8) -> Self {
        Self {
            register: RegisterSelection::Instruction,
            bits: Bits::Bit8(raw_bits),
        }
    }

    pub(crate) fn data(raw_bits: u8) -> Self {
        Self {
            register: RegisterSelection::Data,
            bits: Bits::Bit8(raw_bits),
        }
    }

    /// The register this command targets
    pub fn register(&self) -> RegisterSelection {
        self.register
    }

    /// The bits this command presents on the data lines
    pub fn bits(&self) -> Bits {
        self.bits
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::WakeUp => Self::raw_nibble(0b0011),

            CommandSet::HalfFunctionSet => Self::raw_nibble(0b0010),

            CommandSet::ClearDisplay => Self::instruction(0b0000_0001),

            CommandSet::ReturnHome => Self::instruction(0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                Self::instruction(0b0000_0100 | (dir as u8) << 1 | st as u8)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => Self::instruction(
                0b0000_1000 | (display as u8) << 2 | (cursor as u8) << 1 | cursor_blink as u8,
            ),

            CommandSet::CursorOrDisplayShift(st, dir) => {
                Self::instruction(0b0001_0000 | (st as u8) << 3 | (dir as u8) << 2)
            }

            CommandSet::FunctionSet(width, line, font) => {
                Self::instruction(0b0010_0000 | (width as u8) << 4 | (line as u8) << 3 | (font as u8) << 2)
            }

            CommandSet::SetDDRAMAddress(addr) => {
                assert!(addr < 1 << 7, "DDRAM address out of range");
                Self::instruction(0b1000_0000 | addr)
            }

            CommandSet::WriteToRAM(data) => Self::data(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_byte(command: CommandSet) -> u8 {
        match Command::from(command).bits() {
            Bits::Bit8(raw_bits) => raw_bits,
            Bits::Bit4(_) => panic!("expected a full byte"),
        }
    }

    #[test]
    fn handshake_writes_are_bare_nibbles() {
        assert_eq!(Command::from(CommandSet::WakeUp).bits(), Bits::Bit4(0b0011));
        assert_eq!(
            Command::from(CommandSet::HalfFunctionSet).bits(),
            Bits::Bit4(0b0010)
        );
    }

    #[test]
    fn fixed_commands() {
        assert_eq!(raw_byte(CommandSet::ClearDisplay), 0x01);
        assert_eq!(raw_byte(CommandSet::ReturnHome), 0x02);
    }

    #[test]
    fn display_on_off_covers_every_switch_combination() {
        // bit 2 display, bit 1 cursor, bit 0 blink, on a 0x08 base
        for (display, d) in [(State::Off, 0u8), (State::On, 1)] {
            for (cursor, c) in [(State::Off, 0u8), (State::On, 1)] {
                for (cursor_blink, b) in [(State::Off, 0u8), (State::On, 1)] {
                    let raw_bits = raw_byte(CommandSet::DisplayOnOff {
                        display,
                        cursor,
                        cursor_blink,
                    });
                    assert_eq!(raw_bits, 0x08 | d << 2 | c << 1 | b);
                }
            }
        }
        assert_eq!(
            raw_byte(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            0x0C
        );
        assert_eq!(
            raw_byte(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::On,
                cursor_blink: State::On,
            }),
            0x0F
        );
    }

    #[test]
    fn shift_covers_every_combination() {
        for (st, s) in [(ShiftType::CursorOnly, 0u8), (ShiftType::CursorAndDisplay, 1)] {
            for (dir, r) in [(MoveDirection::RightToLeft, 0u8), (MoveDirection::LeftToRight, 1)] {
                let raw_bits = raw_byte(CommandSet::CursorOrDisplayShift(st, dir));
                assert_eq!(raw_bits, 0x10 | s << 3 | r << 2);
            }
        }
        assert_eq!(
            raw_byte(CommandSet::CursorOrDisplayShift(
                ShiftType::CursorAndDisplay,
                MoveDirection::LeftToRight,
            )),
            0x1C
        );
    }

    #[test]
    fn entry_mode_covers_every_combination() {
        for (dir, i) in [(MoveDirection::RightToLeft, 0u8), (MoveDirection::LeftToRight, 1)] {
            for (st, s) in [(ShiftType::CursorOnly, 0u8), (ShiftType::CursorAndDisplay, 1)] {
                let raw_bits = raw_byte(CommandSet::EntryModeSet(dir, st));
                assert_eq!(raw_bits, 0x04 | i << 1 | s);
            }
        }
    }

    #[test]
    fn function_set_encodes_width_lines_and_font() {
        assert_eq!(
            raw_byte(CommandSet::FunctionSet(
                DataWidth::Bit4,
                LineMode::TwoLine,
                Font::Font5x8,
            )),
            0x28
        );
        assert_eq!(
            raw_byte(CommandSet::FunctionSet(
                DataWidth::Bit8,
                LineMode::TwoLine,
                Font::Font5x8,
            )),
            0x38
        );
        assert_eq!(
            raw_byte(CommandSet::FunctionSet(
                DataWidth::Bit8,
                LineMode::OneLine,
                Font::Font5x11,
            )),
            0x34
        );
    }

    #[test]
    fn ddram_address_rides_the_command_base() {
        assert_eq!(raw_byte(CommandSet::SetDDRAMAddress(0x00)), 0x80);
        assert_eq!(raw_byte(CommandSet::SetDDRAMAddress(0x45)), 0xC5);
        assert_eq!(raw_byte(CommandSet::SetDDRAMAddress(0x7F)), 0xFF);
    }

    #[test]
    #[should_panic(expected = "DDRAM address out of range")]
    fn ddram_address_past_the_window_is_refused() {
        let _ = Command::from(CommandSet::SetDDRAMAddress(0x80));
    }

    #[test]
    fn ram_write_targets_the_data_register() {
        let command = Command::from(CommandSet::WriteToRAM(b'A'));
        assert_eq!(command.register(), RegisterSelection::Data);
        assert_eq!(command.bits(), Bits::Bit8(0x41));
    }
}
