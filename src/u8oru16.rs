use std::fmt;

/// u8u16 is a helper enum for operand values that may be either a byte or a word.
/// Code that cares only about the value can focus on the value while
/// code that cares about the operand width still gets clear size information.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum u8u16 {
    u8(u8),
    u16(u16),
}
impl fmt::Display for u8u16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            u8u16::u8(val) => format!("{:02X}", val),
            u8u16::u16(val) => format!("{:04X}", val),
        };
        write!(f, "{:width$}", s, width = f.width().unwrap_or(0))
    }
}

impl u8u16 {
    pub fn new(lsb: u8, msb: Option<u8>) -> Self {
        if let Some(hi) = msb {
            u8u16::u16(((hi as u16) << 8) | (lsb as u16))
        } else {
            u8u16::u8(lsb)
        }
    }
    /// Builds an operand from little-endian instruction bytes; None if there are no bytes.
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [] => None,
            [lsb] => Some(u8u16::u8(*lsb)),
            [lsb, msb, ..] => Some(u8u16::new(*lsb, Some(*msb))),
        }
    }
    pub fn u16(&self) -> u16 {
        match self {
            u8u16::u8(val) => *val as u16,
            u8u16::u16(val) => *val,
        }
    }
    pub fn sign_extended(self) -> Self {
        match self {
            u8u16::u16(_) => self,
            u8u16::u8(b) => Self::new(b, Some(if b & 0x80 == 0 { 0u8 } else { 0xffu8 })),
        }
    }
    /// Adds rhs to self as a signed displacement; the result is always a word and wraps at 64K.
    pub fn signed_offset(self, rhs: Self) -> Self { u8u16::u16(self.u16().wrapping_add(rhs.sign_extended().u16())) }
}
