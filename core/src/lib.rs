//! A Chip-8 interpreter core: machine state, instruction decoding and execution.
//!
//! Rendering, audio, input mapping and timing are left to the caller, which
//! drives a [`Chip8`] session by calling [`Chip8::cycle`] at whatever rate it likes.

pub use crate::chip8::Chip8;
pub use crate::config::{Config, StackPolicy};
pub use crate::debug::{BufferConsole, DebugConsole, LogConsole};
pub use crate::engine::Engine;
pub use crate::error::{Chip8Error, Result};
pub use crate::instruction::{DebugOp, Instruction};
pub use crate::opcode::Opcode;
pub use crate::state::{FrameBuffer, State};

mod chip8;
mod config;
pub mod constants;
mod debug;
mod engine;
mod error;
mod instruction;
mod opcode;
pub mod operations;
pub mod state;
