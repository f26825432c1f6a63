//! Fixed dimensions of the Chip-8 machine.

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 0x10;

/// Register used as the carry/borrow/collision flag.
pub const FLAG_REGISTER: usize = 0xF;

/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 0x1000;

/// Every address is masked into the 12-bit memory space before use.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// 0x000 - 0x1FF is reserved for the interpreter, programs are loaded at 0x200.
pub const PROGRAM_START: u16 = 0x200;

/// The largest program image that fits above `PROGRAM_START`.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Levels of subroutine nesting.
pub const STACK_SIZE: usize = 0x10;

/// Number of keys on the hexadecimal keypad (0x0-0xF).
pub const KEY_COUNT: usize = 0x10;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Address of the first glyph of the font table.
pub const FONT_START: u16 = 0x50;

/// Bytes per font glyph; each glyph is 4 pixels wide and 5 rows tall.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Sprites for the hexadecimal digits 0..F, stored at `FONT_START`.
///
/// Each byte is one row and only the high nibble is drawn, e.g. `0`:
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
