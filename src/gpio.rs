//! Implementation of [`embedded-hal`] digital input/output traits for the expander's pins
//!
//! The driver is shared through a [`RefCell`]; each [`GpioPin`] borrows it for
//! the duration of one operation. Pins are not `Sync`, so all handles of one
//! chip stay on one thread.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal

use core::{cell::RefCell, marker::PhantomData};

use embedded_hal::{
    digital::{self, PinState},
    i2c::I2c,
};

use crate::{
    device::{Mcp23017, PinMode},
    error::Error,
    regs::MAX_PIN,
};

pub struct Unknown;
pub struct Input;
pub struct Output;

pub struct GpioPin<'c, I2C, M> {
    mode: PhantomData<M>,
    chip: &'c RefCell<Mcp23017<I2C>>,
    num: u8,
}

/// Iterator over all sixteen pins of a chip, in pin number order.
pub struct GpioPins<'c, I2C> {
    chip: &'c RefCell<Mcp23017<I2C>>,
    next: u8,
}

const PIN_NAMES: [&str; 16] = [
    "GPA0", "GPA1", "GPA2", "GPA3", "GPA4", "GPA5", "GPA6", "GPA7",
    "GPB0", "GPB1", "GPB2", "GPB3", "GPB4", "GPB5", "GPB6", "GPB7",
];

/// All pins of `chip`, named as in the datasheet.
pub fn pins<I2C>(chip: &RefCell<Mcp23017<I2C>>) -> GpioPins<'_, I2C> {
    GpioPins { chip, next: 0 }
}

impl<'c, I2C> GpioPins<'c, I2C> {
    pub fn total(&self) -> usize {
        1 + MAX_PIN as usize
    }
}

impl<'c, I2C> Iterator for GpioPins<'c, I2C> {
    type Item = (&'static str, GpioPin<'c, I2C, Unknown>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > MAX_PIN {
            return None;
        }
        let num = self.next;
        self.next += 1;
        Some((
            PIN_NAMES[num as usize],
            GpioPin { mode: PhantomData, chip: self.chip, num },
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (MAX_PIN + 1).saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl<'c, I2C: I2c> GpioPin<'c, I2C, Unknown> {
    /// Handle for pin `num`, without touching its configuration.
    pub fn new(chip: &'c RefCell<Mcp23017<I2C>>, num: u8) -> Result<Self, Error<I2C::Error>> {
        if num > MAX_PIN {
            return Err(Error::InvalidPin(num));
        }
        Ok(GpioPin { mode: PhantomData, chip, num })
    }
}

impl<'c, I2C, M> GpioPin<'c, I2C, M> {
    #[inline(always)]
    pub fn number(&self) -> u8 {
        self.num
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        PIN_NAMES[self.num as usize]
    }

    fn into_mode<N>(self) -> GpioPin<'c, I2C, N> {
        GpioPin { mode: PhantomData, chip: self.chip, num: self.num }
    }
}

impl<'c, I2C: I2c, M> GpioPin<'c, I2C, M> {
    #[inline(always)]
    fn with_chip<T>(
        &self,
        f: impl FnOnce(&mut Mcp23017<I2C>, u8) -> Result<T, Error<I2C::Error>>,
    ) -> Result<T, Error<I2C::Error>> {
        let mut chip = self.chip.borrow_mut();
        f(&mut *chip, self.num)
    }

    pub fn into_input_pin(self) -> Result<GpioPin<'c, I2C, Input>, Error<I2C::Error>> {
        self.with_chip(|chip, num| {
            chip.pull_up(num, false)?;
            chip.pin_mode(num, PinMode::Input)
        })?;
        Ok(self.into_mode())
    }

    pub fn into_pull_up_input_pin(self) -> Result<GpioPin<'c, I2C, Input>, Error<I2C::Error>> {
        self.with_chip(|chip, num| {
            chip.pull_up(num, true)?;
            chip.pin_mode(num, PinMode::Input)
        })?;
        Ok(self.into_mode())
    }

    /// Latches `state` first, then turns the driver on, so the pin never
    /// drives the previous latch value.
    pub fn into_output_pin(
        self,
        state: PinState,
    ) -> Result<GpioPin<'c, I2C, Output>, Error<I2C::Error>> {
        self.with_chip(|chip, num| {
            chip.digital_write(num, state)?;
            chip.pin_mode(num, PinMode::Output)
        })?;
        Ok(self.into_mode())
    }
}

impl<'c, I2C: I2c, M> digital::ErrorType for GpioPin<'c, I2C, M> {
    type Error = Error<I2C::Error>;
}

impl<'c, I2C: I2c> digital::InputPin for GpioPin<'c, I2C, Input> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.with_chip(|chip, num| chip.digital_read(num)).map(|bit| bit == 1)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|val| !val)
    }
}

impl<'c, I2C: I2c> digital::OutputPin for GpioPin<'c, I2C, Output> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.with_chip(|chip, num| chip.digital_write(num, PinState::Low))
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.with_chip(|chip, num| chip.digital_write(num, PinState::High))
    }
}

impl<'c, I2C: I2c> digital::StatefulOutputPin for GpioPin<'c, I2C, Output> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.with_chip(|chip, num| chip.output_latch(num)).map(|bit| bit == 1)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|val| !val)
    }
}
