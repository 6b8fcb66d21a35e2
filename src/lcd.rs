//! The display handle and its high-level operations

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, MoveDirection, ShiftType, State},
    sender::SendCommand,
    Error,
};

mod init;

pub use init::Config;

// DDRAM base address of each display row; rows 2 and 3 only exist on
// 4-row modules
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// A character LCD handle
///
/// Created with [`Lcd::new()`], which also brings the hardware out of
/// reset. All methods block until the controller acknowledges the
/// transfer; see [`crate::sender::ParallelSender::set_busy_poll_limit`]
/// for bounding that wait.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Blank the display and reset the cursor address to zero
    pub fn clear(&mut self) -> Result<(), Error> {
        self.sender
            .send(CommandSet::ClearDisplay.into(), self.delayer)
    }

    /// Reset the cursor address to zero and undo any display shift
    pub fn return_home(&mut self) -> Result<(), Error> {
        self.sender.send(CommandSet::ReturnHome.into(), self.delayer)
    }

    /// Move the cursor to a (column, row) cell
    ///
    /// The position is not validated against the physical grid; a cell
    /// outside it lands in invisible DDRAM. Rows past 3 fall back to the
    /// row 0 address range.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error> {
        let offset = ROW_OFFSETS.get(row as usize).copied().unwrap_or(0);

        self.sender
            .send(CommandSet::SetDDRAMAddress(offset + col).into(), self.delayer)
    }

    /// Switch the display, the cursor underline and the cursor blinking
    /// on or off
    pub fn display_switch(
        &mut self,
        display: State,
        cursor: State,
        cursor_blink: State,
    ) -> Result<(), Error> {
        self.sender.send(
            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            }
            .into(),
            self.delayer,
        )
    }

    /// Move the cursor, or the whole display window, one step in the
    /// given direction
    pub fn shift_cursor_or_display(
        &mut self,
        shift_type: ShiftType,
        direction: MoveDirection,
    ) -> Result<(), Error> {
        self.sender.send(
            CommandSet::CursorOrDisplayShift(shift_type, direction).into(),
            self.delayer,
        )
    }

    /// Select how the cursor (and optionally the display window) moves
    /// after each data write
    pub fn set_entry_mode(
        &mut self,
        direction: MoveDirection,
        shift_type: ShiftType,
    ) -> Result<(), Error> {
        self.sender.send(
            CommandSet::EntryModeSet(direction, shift_type).into(),
            self.delayer,
        )
    }

    /// Write one character code at the cursor position
    ///
    /// The code is sent as-is; what glyph it shows depends on the
    /// module's CGROM.
    pub fn print_symbol(&mut self, code: u8) -> Result<(), Error> {
        self.sender
            .send(CommandSet::WriteToRAM(code).into(), self.delayer)
    }

    /// Write a string at the cursor position, one symbol per character
    ///
    /// In the stock CGROM only ASCII 0x20 (white space) to ASCII 0x7D
    /// (`}`) map to their glyph; anything else is shown as a full
    /// rectangle. There is no line wrap handling, past the visible grid
    /// the controller's address auto-increment decides where (and
    /// whether) characters appear.
    pub fn print_text(&mut self, text: &str) -> Result<(), Error> {
        for char in text.chars() {
            // map char out side of ASCII 0x20 and 0x7D to full rectangle
            let code = match char.is_ascii() {
                true if (0x20 <= char as u8) && (char as u8 <= 0x7D) => char as u8,
                _ => 0xFF,
            };
            self.print_symbol(code)?;
        }
        Ok(())
    }

    /// Wait for specified milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    /// Wait for specified microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us)
    }
}

impl<'a, 'b, Sender, Delayer> fmt::Write for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print_text(s).map_err(|_| fmt::Error)
    }
}
