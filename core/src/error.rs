use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Errors surfaced by the interpreter.
///
/// Every error is local to the call that produced it; the machine state stays
/// usable and the caller may keep cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("key {0:#X} is outside the keypad (0x0-0xF)")]
    InvalidKey(u8),

    #[error("stack overflow: call at {pc:#05X} exceeds the call stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },
}
