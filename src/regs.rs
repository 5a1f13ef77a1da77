//! MCP23017 register map and bus addressing
//!
//! Addresses are for the power-on `IOCON.BANK = 0` layout, where every A/B
//! register pair sits at adjacent addresses and sequential access
//! auto-increments from the A register into the B register.
//!
//! See the [datasheet](https://ww1.microchip.com/downloads/en/DeviceDoc/20001952C.pdf), table 3-1.

/// I/O direction A. 1 = input. Resets to 0xFF.
pub const IODIRA: u8 = 0x00;
/// I/O direction B.
pub const IODIRB: u8 = 0x01;
/// Input polarity A. 1 = GPIO reads inverted.
pub const IPOLA: u8 = 0x02;
pub const IPOLB: u8 = 0x03;
/// Interrupt-on-change enable A.
pub const GPINTENA: u8 = 0x04;
pub const GPINTENB: u8 = 0x05;
/// Default compare value for interrupt-on-change A.
pub const DEFVALA: u8 = 0x06;
pub const DEFVALB: u8 = 0x07;
/// Interrupt control A. 1 = compare against DEFVAL, 0 = against previous value.
pub const INTCONA: u8 = 0x08;
pub const INTCONB: u8 = 0x09;
/// Configuration. Mirrored at 0x0B.
pub const IOCONA: u8 = 0x0A;
pub const IOCONB: u8 = 0x0B;
/// 100k pull-up enable A.
pub const GPPUA: u8 = 0x0C;
pub const GPPUB: u8 = 0x0D;
/// Interrupt flag A (read-only).
pub const INTFA: u8 = 0x0E;
pub const INTFB: u8 = 0x0F;
/// Interrupt capture A (read-only).
pub const INTCAPA: u8 = 0x10;
pub const INTCAPB: u8 = 0x11;
/// Port A pin levels. Writes go to OLATA.
pub const GPIOA: u8 = 0x12;
pub const GPIOB: u8 = 0x13;
/// Output latch A.
pub const OLATA: u8 = 0x14;
pub const OLATB: u8 = 0x15;

/// Number of registers in the BANK=0 layout.
pub const REGISTER_COUNT: usize = 0x16;

/// Fixed upper bits of the 7-bit bus address.
pub const BASE_ADDRESS: u8 = 0x20;
/// Bits selected by the A0..A2 hardware straps.
pub const ADDRESS_MASK: u8 = 0b111;

/// Bus address of one chip: [`BASE_ADDRESS`] with the strap bits OR'ed in.
///
/// Strap bits outside [`ADDRESS_MASK`] are discarded, so both `0x03` and
/// `0x23` name the chip at `0x23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(u8);

impl Address {
    pub const fn from_bits(bits: u8) -> Self {
        Address(bits & ADDRESS_MASK)
    }

    /// Address from the levels of the A0, A1 and A2 pins.
    pub const fn from_straps(a0: bool, a1: bool, a2: bool) -> Self {
        Address((a0 as u8) | (a1 as u8) << 1 | (a2 as u8) << 2)
    }

    /// The strap bits alone.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The full 7-bit bus address.
    #[inline(always)]
    pub const fn get(self) -> u8 {
        BASE_ADDRESS | self.0
    }
}

impl From<u8> for Address {
    fn from(bits: u8) -> Self {
        Address::from_bits(bits)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> u8 {
        addr.get()
    }
}

/// One of the two 8-bit ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
}

impl Port {
    /// Picks the A or B register of an adjacent pair given the A address.
    #[inline(always)]
    pub const fn register(self, reg_a: u8) -> u8 {
        match self {
            Port::A => reg_a,
            Port::B => reg_a + 1,
        }
    }
}

/// Highest valid pin number.
pub const MAX_PIN: u8 = 15;

/// Splits pin 0..=15 into its port and bit index within that port.
///
/// `None` for anything above [`MAX_PIN`].
#[inline]
pub const fn locate(pin: u8) -> Option<(Port, u8)> {
    match pin {
        0..=7 => Some((Port::A, pin)),
        8..=MAX_PIN => Some((Port::B, pin - 8)),
        _ => None,
    }
}
