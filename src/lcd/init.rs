use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, DataWidth, Font, LineMode, MoveDirection, ShiftType, State},
    lcd::Lcd,
    sender::SendCommand,
    Error,
};

/// [`Config`] is the init config of a [`Lcd`]
pub struct Config {
    data_width: DataWidth,
    line_mode: LineMode,
    font: Font,
    display: State,
    cursor: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_width: DataWidth::default(),
            line_mode: LineMode::default(),
            font: Font::default(),
            display: State::On,
            cursor: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::default(),
            shift_type: ShiftType::default(),
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_data_width(&self) -> DataWidth {
        self.data_width
    }

    pub fn set_data_width(mut self, data_width: DataWidth) -> Self {
        self.data_width = data_width;
        self
    }

    pub fn get_line_mode(&self) -> LineMode {
        self.line_mode
    }

    pub fn set_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    pub fn get_font(&self) -> Font {
        self.font
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn get_display_state(&self) -> State {
        self.display
    }

    pub fn set_display_state(mut self, display: State) -> Self {
        self.display = display;
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.cursor
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.cursor_blink = blink;
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.direction = dir;
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.shift_type = shift;
        self
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and bring the LCD hardware out of reset
    ///
    /// The power-on handshake is raw single-pulse writes paced by fixed
    /// delays, the busy flag cannot be polled before the controller has
    /// seen a function set. Running it again on a live display is safe,
    /// just wasteful.
    pub fn new(
        sender: &'a mut Sender,
        delayer: &'b mut Delayer,
        config: Config,
    ) -> Result<Self, Error> {
        sender.reset_bus();

        // the controller's bus width is unknown after reset, the 8-bit
        // select nibble must go out three times before any mode commit,
        // in 4 bit wiring as well
        sender.delay_and_send(CommandSet::WakeUp.into(), delayer, 20_000)?;
        sender.delay_and_send(CommandSet::WakeUp.into(), delayer, 4_000)?;
        sender.delay_and_send(CommandSet::WakeUp.into(), delayer, 1_000)?;

        if config.get_data_width() == DataWidth::Bit4 {
            sender.delay_and_send(CommandSet::HalfFunctionSet.into(), delayer, 1_000)?;
        }

        delayer.delay_us(1_000);

        // from here on the bus width is committed and every transfer is
        // busy-flag synchronized
        sender.send(
            CommandSet::FunctionSet(
                config.get_data_width(),
                config.get_line_mode(),
                config.get_font(),
            )
            .into(),
            delayer,
        )?;

        sender.send(
            CommandSet::DisplayOnOff {
                display: State::Off,
                cursor: State::Off,
                cursor_blink: State::Off,
            }
            .into(),
            delayer,
        )?;

        sender.send(
            CommandSet::DisplayOnOff {
                display: config.get_display_state(),
                cursor: config.get_cursor_state(),
                cursor_blink: config.get_cursor_blink(),
            }
            .into(),
            delayer,
        )?;

        sender.send(CommandSet::ClearDisplay.into(), delayer)?;

        sender.send(
            CommandSet::EntryModeSet(config.get_direction(), config.get_shift_type()).into(),
            delayer,
        )?;

        delayer.delay_ms(5);

        Ok(Lcd { sender, delayer })
    }
}
