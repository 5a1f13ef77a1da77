//! Driver error type

use embedded_hal::{digital, i2c};

/// Error from an expander operation.
///
/// `E` is the error type of the injected I2C transport.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The transport failed (no acknowledge, arbitration loss, ...)
    #[error("I2C transaction failed: {0:?}")]
    Bus(E),

    /// Pin number above 15 passed to the checked pin API
    #[error("pin {0} does not exist, the expander has pins 0-15")]
    InvalidPin(u8),
}

impl<E: i2c::Error> digital::Error for Error<E> {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl<E: i2c::Error> Error<E> {
    /// Kind of the underlying bus failure, if this is one.
    pub fn bus_kind(&self) -> Option<i2c::ErrorKind> {
        match self {
            Error::Bus(e) => Some(e.kind()),
            Error::InvalidPin(_) => None,
        }
    }
}
