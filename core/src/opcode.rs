use std::fmt;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian in memory. Their behavior is cased on:
/// - `(n, _, _, _)` the class; applies to all opcodes
/// - `(_, _, _, n)` the specific operation within classes 0x0, 0x8 and 0xE
/// - `(_, _, n, n)` the specific operation within class 0xF
///
/// Nibbles not used to determine the operation carry operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` a byte that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx or the range of registers V0..=Vx
/// - `(_, _, n, _)` the register Vy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combines two consecutive memory bytes, high byte first.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from(high) << 8 | u16::from(low))
    }

    /// The Opcode's component nibbles.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.class(), self.x(), self.y(), self.n())
    }

    /// The Opcode's most significant nibble.
    /// `[c___]`
    pub fn class(self) -> u8 {
        ((self.0 & 0xF000) >> 12) as u8
    }

    /// `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// `[_adr]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }

    /// The middle byte, `[_bb_]`; only meaningful for the print-byte debug opcode.
    pub fn middle_byte(self) -> u8 {
        ((self.0 & 0x0FF0) >> 4) as u8
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode(word)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_from_bytes() {
        assert_eq!(Opcode::from_bytes(0xAA, 0xBB), Opcode(0xAABB));
    }

    #[test]
    fn test_nibbles() {
        let op = Opcode(0xABCD);
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        assert_eq!(Opcode(0xABCD).x(), 0xB);
    }

    #[test]
    fn test_y() {
        assert_eq!(Opcode(0xABCD).y(), 0xC);
    }

    #[test]
    fn test_n() {
        assert_eq!(Opcode(0xABCD).n(), 0xD);
    }

    #[test]
    fn test_kk() {
        assert_eq!(Opcode(0xABCD).kk(), 0xCD);
    }

    #[test]
    fn test_addr() {
        assert_eq!(Opcode(0xABCD).addr(), 0x0BCD);
    }

    #[test]
    fn test_middle_byte() {
        assert_eq!(Opcode(0x841A).middle_byte(), 0x41);
    }

    #[test]
    fn test_display_is_zero_padded_hex() {
        assert_eq!(Opcode(0x00E0).to_string(), "00E0");
    }
}
