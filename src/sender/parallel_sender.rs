use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::{
    command::{Bits, Command, RegisterSelection},
    sender::SendCommand,
    Error,
};

// datasheet minimum enable pulse high time (PW_EH) is 450 ns
const ENABLE_PULSE_WIDTH_NS: u32 = 450;

/// Direction of the data-line group.
///
/// The lines stay in `Output` except for the busy-flag read window, and
/// only [`ParallelSender`] itself flips them.
#[derive(Clone, Copy, PartialEq)]
enum BusDirection {
    Output,
    Input,
}

/// Bus front-end over direct GPIO: three push-pull control pins and 4 or
/// 8 open-drain data pins
pub struct ParallelSender<ControlPin, DBPin, const PIN_CNT: usize>
where
    ControlPin: OutputPin,
    DBPin: OutputPin + InputPin,
{
    rs_pin: ControlPin,
    rw_pin: ControlPin,
    en_pin: ControlPin,
    db_pins: [DBPin; PIN_CNT],
    direction: BusDirection,
    busy_flag_pin: usize,
    busy_poll_limit: Option<u32>,
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin, 4>
where
    ControlPin: OutputPin,
    DBPin: OutputPin + InputPin,
{
    /// Wire a 4 bit bus, data lines DB4 to DB7
    pub fn new_4pin(
        rs: ControlPin,
        rw: ControlPin,
        en: ControlPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            rw_pin: rw,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
            direction: BusDirection::Output,
            busy_flag_pin: 3,
            busy_poll_limit: None,
        }
    }
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin, 8>
where
    ControlPin: OutputPin,
    DBPin: OutputPin + InputPin,
{
    /// Wire an 8 bit bus, data lines DB0 to DB7
    #[allow(clippy::too_many_arguments)]
    pub fn new_8pin(
        rs: ControlPin,
        rw: ControlPin,
        en: ControlPin,
        db0: DBPin,
        db1: DBPin,
        db2: DBPin,
        db3: DBPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            rw_pin: rw,
            en_pin: en,
            db_pins: [db0, db1, db2, db3, db4, db5, db6, db7],
            direction: BusDirection::Output,
            busy_flag_pin: 7,
            busy_poll_limit: None,
        }
    }
}

impl<ControlPin, DBPin, const PIN_CNT: usize> ParallelSender<ControlPin, DBPin, PIN_CNT>
where
    ControlPin: OutputPin,
    DBPin: OutputPin + InputPin,
{
    /// Pick the data line that carries the busy flag during a status
    /// read
    ///
    /// The index counts into the wired data-line group, and defaults to
    /// the highest line (DB7, the datasheet position). Only override it
    /// when the module is wired with the flag somewhere else.
    pub fn set_busy_flag_pin(&mut self, index: usize) {
        assert!(index < PIN_CNT, "busy flag line out of range");
        self.busy_flag_pin = index;
    }

    /// Bound the busy-flag wait to at most `limit` poll pulses
    ///
    /// `None` (the default) polls until the controller answers, which
    /// hangs forever on a stuck or absent module. With a limit set, an
    /// exhausted wait restores the bus to write state and surfaces
    /// [`Error::BusTimeout`].
    pub fn set_busy_poll_limit(&mut self, limit: Option<u32>) {
        self.busy_poll_limit = limit;
    }

    fn write_bus(&mut self, raw_bits: u8) {
        self.db_pins
            .iter_mut()
            .enumerate()
            .for_each(|(index, pin)| match raw_bits >> index & 1 {
                0 => pin.set_low().ok().unwrap(),
                _ => pin.set_high().ok().unwrap(),
            });
    }

    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) {
        self.en_pin.set_high().ok().unwrap();
        delayer.delay_ns(ENABLE_PULSE_WIDTH_NS);
        self.en_pin.set_low().ok().unwrap();
    }

    fn set_direction(&mut self, direction: BusDirection) {
        if self.direction == direction {
            return;
        }

        // in open drain mode, set pin high to release control, so the
        // controller can drive the line; going back to output needs no
        // pin work, the next write_bus drives the lines again
        if direction == BusDirection::Input {
            self.db_pins
                .iter_mut()
                .for_each(|pin| pin.set_high().ok().unwrap());
        }

        self.direction = direction;
    }

    /// Block until the controller drops its busy flag, then finish the
    /// status read cycle.
    ///
    /// Each poll is one enable pulse with the flag line sampled while
    /// enable is high.
    fn wait_for_idle(&mut self, delayer: &mut impl DelayNs) -> Result<(), Error> {
        self.set_direction(BusDirection::Input);
        self.rw_pin.set_high().ok().unwrap();
        self.rs_pin.set_low().ok().unwrap();

        let mut polls: u32 = 0;
        loop {
            self.en_pin.set_high().ok().unwrap();
            delayer.delay_ns(ENABLE_PULSE_WIDTH_NS);
            let busy = self.db_pins[self.busy_flag_pin].is_high().ok().unwrap();
            self.en_pin.set_low().ok().unwrap();

            if !busy {
                break;
            }

            polls += 1;
            if let Some(limit) = self.busy_poll_limit {
                if polls >= limit {
                    self.rw_pin.set_low().ok().unwrap();
                    self.set_direction(BusDirection::Output);
                    return Err(Error::BusTimeout);
                }
            }
        }

        // the status read cycle is busy flag plus address counter;
        // complete it even though the address goes unused
        self.pulse_enable(delayer);

        self.rw_pin.set_low().ok().unwrap();
        self.set_direction(BusDirection::Output);

        Ok(())
    }
}

impl<ControlPin, DBPin, const PIN_CNT: usize, Delayer> SendCommand<Delayer>
    for ParallelSender<ControlPin, DBPin, PIN_CNT>
where
    ControlPin: OutputPin,
    DBPin: OutputPin + InputPin,
    Delayer: DelayNs,
{
    fn reset_bus(&mut self) {
        self.rs_pin.set_low().ok().unwrap();
        self.rw_pin.set_low().ok().unwrap();
        self.en_pin.set_low().ok().unwrap();
        self.direction = BusDirection::Output;
        self.write_bus(0);
    }

    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Error> {
        assert!(
            PIN_CNT == 4 || PIN_CNT == 8,
            "Pins other than 4 or 8 are not supported"
        );

        self.en_pin.set_low().ok().unwrap();

        match command.register() {
            RegisterSelection::Instruction => {
                self.rs_pin.set_low().ok().unwrap();
            }
            RegisterSelection::Data => {
                self.rs_pin.set_high().ok().unwrap();
            }
        }

        self.rw_pin.set_low().ok().unwrap();

        match command.bits() {
            // handshake write: one pulse, and no busy sync, the flag is
            // not answerable before function set
            Bits::Bit4(raw_bits) => {
                assert!(raw_bits < 1 << 4, "data wider than 4 bits");
                match PIN_CNT {
                    4 => self.write_bus(raw_bits),
                    // the handshake nibbles ride DB7..DB4 on a full bus
                    8 => self.write_bus(raw_bits << 4),
                    _ => unreachable!(),
                }
                self.pulse_enable(delayer);
                Ok(())
            }

            Bits::Bit8(raw_bits) => {
                match PIN_CNT {
                    4 => {
                        self.write_bus(raw_bits >> 4);
                        self.pulse_enable(delayer);
                        self.write_bus(raw_bits & 0b1111);
                        self.pulse_enable(delayer);
                    }
                    8 => {
                        self.write_bus(raw_bits);
                        self.pulse_enable(delayer);
                    }
                    _ => unreachable!(),
                }

                self.wait_for_idle(delayer)
            }
        }
    }
}
