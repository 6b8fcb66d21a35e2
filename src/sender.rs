//! Built-in sender
//! If you want to drive the bus through something else than direct GPIO
//! (a port expander, a shift register), implement the [`SendCommand`]
//! trait for it

use embedded_hal::delay::DelayNs;

use crate::{command::Command, Error};

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// [`SendCommand`] is the trait a sender should implement to communicate
/// with the hardware
pub trait SendCommand<Delayer: DelayNs> {
    /// Drive every control and data line low, the state the power-on
    /// handshake starts from
    fn reset_bus(&mut self);

    /// Perform one controller-visible transfer of a [`Command`]
    ///
    /// A full-byte transfer blocks until the controller's busy flag
    /// clears; a bare-nibble handshake write is latched with a single
    /// enable pulse and returns immediately
    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Error>;

    /// Wait a specific duration, then send
    ///
    /// This is the pacing used during the handshake, while the busy flag
    /// cannot be polled yet
    fn delay_and_send(
        &mut self,
        command: Command,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Error> {
        delayer.delay_us(delay_us);
        self.send(command, delayer)
    }
}
