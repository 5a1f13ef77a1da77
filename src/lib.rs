//! Driver for the Microchip MCP23017 16-bit I2C GPIO expander, on top of [`embedded-hal`] traits
//!
//! ```ignore
//! use mcp23017_hal::{Address, Mcp23017, PinMode, PinState};
//!
//! let mut mcp = Mcp23017::new(i2c, Address::from_straps(false, false, false));
//! mcp.init()?;
//! mcp.pin_mode(0, PinMode::Output)?;
//! mcp.digital_write(0, PinState::High)?;
//! mcp.pull_up(8, true)?;
//! let level = mcp.digital_read(8)?;
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal

pub mod regs;
pub use regs::{Address, Port};

pub mod device;
pub use device::{Mcp23017, PinMode};

pub mod error;
pub use error::Error;

pub mod gpio;
pub use gpio::{pins, GpioPin};

pub use embedded_hal::digital::PinState;
