//! MCP23017 driver over any [`embedded-hal`] I2C bus
//!
//! Every pin operation is a read-modify-write of one 8-bit register: read the
//! register for the pin's port, flip the pin's bit, write the byte back.
//! The two transactions are not atomic. Callers sharing one chip must
//! serialise access themselves.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal

use embedded_hal::{digital::PinState, i2c::I2c};

use crate::{
    error::Error,
    regs::{self, locate, Address},
};

/// Direction of a single pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: Address,
}

impl<I2C> Mcp23017<I2C> {
    /// Wraps the bus. Nothing is sent until [`init`](Self::init).
    pub fn new(i2c: I2C, address: Address) -> Self {
        Mcp23017 { i2c, address }
    }

    /// Chip with all address straps tied low.
    pub fn new_default(i2c: I2C) -> Self {
        Self::new(i2c, Address::default())
    }

    /// The 7-bit bus address this driver talks to.
    #[inline(always)]
    pub fn address(&self) -> u8 {
        self.address.get()
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Mcp23017<I2C> {
    /// Puts all sixteen pins into input mode, the chip's reset state.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        tracing::debug!("MCP23017 at 0x{:02x}: setting all pins to input", self.address());
        self.write_register_pair(regs::IODIRA, 0xFFFF)
    }

    /// Reads one register.
    ///
    /// Sends the register address, then reads one byte in a separate
    /// transaction.
    pub fn read_register(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let addr = self.address();
        let mut buf = [0u8; 1];
        self.i2c.write(addr, &[reg]).map_err(Error::Bus)?;
        self.i2c.read(addr, &mut buf).map_err(Error::Bus)?;
        tracing::trace!("0x{:02x}: read 0x{:02x} = 0x{:02x}", addr, reg, buf[0]);
        Ok(buf[0])
    }

    /// Reads a register and its successor, low byte first.
    pub fn read_register_pair(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let addr = self.address();
        let mut buf = [0u8; 2];
        self.i2c.write(addr, &[reg]).map_err(Error::Bus)?;
        self.i2c.read(addr, &mut buf).map_err(Error::Bus)?;
        let value = u16::from_le_bytes(buf);
        tracing::trace!("0x{:02x}: read 0x{:02x} = 0x{:04x}", addr, reg, value);
        Ok(value)
    }

    pub fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let addr = self.address();
        tracing::trace!("0x{:02x}: write 0x{:02x} = 0x{:02x}", addr, reg, value);
        self.i2c.write(addr, &[reg, value]).map_err(Error::Bus)
    }

    /// Writes a register and its successor in one transaction, low byte first.
    pub fn write_register_pair(&mut self, reg: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let addr = self.address();
        let [lo, hi] = value.to_le_bytes();
        tracing::trace!("0x{:02x}: write 0x{:02x} = 0x{:04x}", addr, reg, value);
        self.i2c.write(addr, &[reg, lo, hi]).map_err(Error::Bus)
    }

    /// Levels of all sixteen pins, port A in the low byte.
    pub fn read_gpio_ab(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_register_pair(regs::GPIOA)
    }

    /// Drives all sixteen output latches at once, port A in the low byte.
    pub fn write_gpio_ab(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        self.write_register_pair(regs::GPIOA, value)
    }

    /// Direction of all pins at once. 1 = input.
    pub fn set_direction_ab(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        self.write_register_pair(regs::IODIRA, value)
    }

    pub fn set_pull_up_ab(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        self.write_register_pair(regs::GPPUA, value)
    }

    pub fn read_olat_ab(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_register_pair(regs::OLATA)
    }

    /// Sets the direction of one pin. Pins above 15 are ignored.
    pub fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Error<I2C::Error>> {
        self.update_bit(regs::IODIRA, pin, mode == PinMode::Input)
    }

    /// Sets the output latch of one pin. Pins above 15 are ignored.
    pub fn digital_write(&mut self, pin: u8, state: PinState) -> Result<(), Error<I2C::Error>> {
        self.update_bit(regs::OLATA, pin, state == PinState::High)
    }

    /// Enables or disables the 100k pull-up of one pin. Pins above 15 are ignored.
    pub fn pull_up(&mut self, pin: u8, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.update_bit(regs::GPPUA, pin, enabled)
    }

    /// Level of one pin as 0 or 1. Pins above 15 read as 0 without touching the bus.
    pub fn digital_read(&mut self, pin: u8) -> Result<u8, Error<I2C::Error>> {
        self.read_bit(regs::GPIOA, pin)
    }

    /// Latched output value of one pin as 0 or 1. Pins above 15 read as 0.
    pub fn output_latch(&mut self, pin: u8) -> Result<u8, Error<I2C::Error>> {
        self.read_bit(regs::OLATA, pin)
    }

    fn read_bit(&mut self, reg_a: u8, pin: u8) -> Result<u8, Error<I2C::Error>> {
        let (port, bit) = match locate(pin) {
            Some(loc) => loc,
            None => return Ok(0),
        };
        Ok((self.read_register(port.register(reg_a))? >> bit) & 1)
    }

    fn update_bit(&mut self, reg_a: u8, pin: u8, set: bool) -> Result<(), Error<I2C::Error>> {
        let (port, bit) = match locate(pin) {
            Some(loc) => loc,
            None => return Ok(()),
        };
        let reg = port.register(reg_a);
        let mut value = self.read_register(reg)?;
        if set {
            value |= 1 << bit;
        } else {
            value &= !(1 << bit);
        }
        self.write_register(reg, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use embedded_hal::i2c::ErrorKind;

    const ADDR: u8 = 0x20;

    fn read8(addr: u8, reg: u8, value: u8) -> [Transaction; 2] {
        [Transaction::write(addr, vec![reg]), Transaction::read(addr, vec![value])]
    }

    fn chip(expectations: &[Transaction]) -> Mcp23017<I2cMock> {
        Mcp23017::new_default(I2cMock::new(expectations))
    }

    #[test]
    fn init_sets_all_inputs_in_one_write() {
        let mut dev = chip(&[Transaction::write(ADDR, vec![IODIRA, 0xFF, 0xFF])]);
        dev.init().unwrap();
        dev.release().done();
    }

    #[test]
    fn init_uses_strapped_address() {
        let i2c = I2cMock::new(&[Transaction::write(0x25, vec![IODIRA, 0xFF, 0xFF])]);
        let mut dev = Mcp23017::new(i2c, Address::from_straps(true, false, true));
        assert_eq!(dev.address(), 0x25);
        dev.init().unwrap();
        dev.release().done();
    }

    #[test]
    fn read_register_is_write_then_separate_read() {
        let mut dev = chip(&read8(ADDR, GPPUB, 0x5A));
        assert_eq!(dev.read_register(GPPUB).unwrap(), 0x5A);
        dev.release().done();
    }

    #[test]
    fn pair_access_is_little_endian() {
        let mut dev = chip(&[
            Transaction::write(ADDR, vec![OLATA, 0x34, 0x12]),
            Transaction::write(ADDR, vec![GPIOA]),
            Transaction::read(ADDR, vec![0xCD, 0xAB]),
        ]);
        dev.write_register_pair(OLATA, 0x1234).unwrap();
        assert_eq!(dev.read_gpio_ab().unwrap(), 0xABCD);
        dev.release().done();
    }

    #[test]
    fn gpio_ab_targets_gpioa() {
        let mut dev = chip(&[Transaction::write(ADDR, vec![GPIOA, 0x01, 0x80])]);
        dev.write_gpio_ab(0x8001).unwrap();
        dev.release().done();
    }

    #[test]
    fn whole_port_helpers_write_register_pairs() {
        let mut dev = chip(&[
            Transaction::write(ADDR, vec![IODIRA, 0x0F, 0xF0]),
            Transaction::write(ADDR, vec![GPPUA, 0xFF, 0x00]),
            Transaction::write(ADDR, vec![OLATA]),
            Transaction::read(ADDR, vec![0x02, 0x01]),
        ]);
        dev.set_direction_ab(0xF00F).unwrap();
        dev.set_pull_up_ab(0x00FF).unwrap();
        assert_eq!(dev.read_olat_ab().unwrap(), 0x0102);
        dev.release().done();
    }

    #[test]
    fn pin_mode_output_clears_bit_in_port_a() {
        let mut expectations = read8(ADDR, IODIRA, 0xFF).to_vec();
        expectations.push(Transaction::write(ADDR, vec![IODIRA, 0b1111_1011]));
        let mut dev = chip(&expectations);
        dev.pin_mode(2, PinMode::Output).unwrap();
        dev.release().done();
    }

    #[test]
    fn pin_mode_input_sets_rebased_bit_in_port_b() {
        let mut expectations = read8(ADDR, IODIRB, 0x00).to_vec();
        expectations.push(Transaction::write(ADDR, vec![IODIRB, 0b0010_0000]));
        let mut dev = chip(&expectations);
        dev.pin_mode(13, PinMode::Input).unwrap();
        dev.release().done();
    }

    #[test]
    fn digital_write_goes_through_olat() {
        let mut expectations = read8(ADDR, OLATB, 0b1000_0001).to_vec();
        expectations.push(Transaction::write(ADDR, vec![OLATB, 0b0000_0001]));
        expectations.extend(read8(ADDR, OLATA, 0x00));
        expectations.push(Transaction::write(ADDR, vec![OLATA, 0x01]));
        let mut dev = chip(&expectations);
        dev.digital_write(15, PinState::Low).unwrap();
        dev.digital_write(0, PinState::High).unwrap();
        dev.release().done();
    }

    #[test]
    fn pull_up_goes_through_gppu() {
        let mut expectations = read8(ADDR, GPPUA, 0x00).to_vec();
        expectations.push(Transaction::write(ADDR, vec![GPPUA, 0x80]));
        let mut dev = chip(&expectations);
        dev.pull_up(7, true).unwrap();
        dev.release().done();
    }

    #[test]
    fn digital_read_shifts_and_masks() {
        let mut expectations = read8(ADDR, GPIOB, 0b0000_0100).to_vec();
        expectations.extend(read8(ADDR, GPIOB, 0b1111_1011));
        let mut dev = chip(&expectations);
        assert_eq!(dev.digital_read(10).unwrap(), 1);
        assert_eq!(dev.digital_read(10).unwrap(), 0);
        dev.release().done();
    }

    #[test]
    fn out_of_range_pins_never_touch_the_bus() {
        let mut dev = chip(&[]);
        dev.pin_mode(16, PinMode::Output).unwrap();
        dev.digital_write(16, PinState::High).unwrap();
        dev.pull_up(200, true).unwrap();
        assert_eq!(dev.digital_read(16).unwrap(), 0);
        assert_eq!(dev.output_latch(255).unwrap(), 0);
        dev.release().done();
    }

    #[test]
    fn bus_errors_are_surfaced() {
        let mut dev = chip(&[Transaction::write(ADDR, vec![IODIRA]).with_error(ErrorKind::Other)]);
        match dev.pin_mode(0, PinMode::Output) {
            Err(Error::Bus(ErrorKind::Other)) => {},
            other => panic!("unexpected result: {:?}", other),
        }
        dev.release().done();
    }
}
