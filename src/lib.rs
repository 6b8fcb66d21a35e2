/*!
# HD44780 GPIO Driver

Drive an HD44780 compatible character LCD module (1602, 2004, ...) over
its parallel bus, in 4 bit or 8 bit data-line mode, with plain
[`embedded-hal`] digital pins.

Basic Usage:

1. Build a sender <br/>
    The built-in bus front-end is [`sender::ParallelSender`], wired from
    the three control pins (RS, RW, EN) and the 4 or 8 data-line pins.

    You can also use any front-end that implements [`sender::SendCommand`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] with a [`lcd::Config`] to run the power-on
    handshake and get a [`lcd::Lcd`] handle
<br/>
<br/>
3. use any methods provided by [`lcd::Lcd`] to control the display

Every transfer is synchronized with the hardware by polling the
controller's busy flag. By default the driver waits for the flag as long
as it takes, so a missing or stuck module hangs the caller; see
[`sender::ParallelSender::set_busy_poll_limit`] for a bounded wait that
surfaces [`Error::BusTimeout`] instead.

[`embedded-hal`]: https://crates.io/crates/embedded-hal
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod lcd;
pub mod sender;

/// Driver failure.
///
/// The controller reports nothing beyond its busy flag, so the only
/// detectable failure is a busy flag that never clears.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The busy flag did not clear within the configured poll budget,
    /// see [`sender::ParallelSender::set_busy_poll_limit`]
    BusTimeout,
}
