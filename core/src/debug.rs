//! The debug console: extended opcodes that print machine values while a
//! program runs. They never change machine state.

use log::info;

use crate::constants::ADDRESS_MASK;
use crate::instruction::DebugOp;
use crate::state::State;

const PREFIX: &str = "Chip 8 Debugging Console:";

/// Somewhere to send debug console output.
pub trait DebugConsole {
    fn print(&mut self, line: &str);
}

/// Forwards console lines to the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogConsole;

impl DebugConsole for LogConsole {
    fn print(&mut self, line: &str) {
        info!(target: "chip8::console", "{}", line);
    }
}

/// Collects console lines in memory.
#[derive(Debug, Default)]
pub struct BufferConsole {
    pub lines: Vec<String>,
}

impl DebugConsole for BufferConsole {
    fn print(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Formats the output of a debug opcode and hands it to the console
pub fn execute(op: DebugOp, state: &State, console: &mut dyn DebugConsole) {
    match op {
        DebugOp::PrintIndex => console.print(&format!("{} {:x}", PREFIX, state.i)),
        DebugOp::PrintIndexByte => {
            console.print(&format!("{} {}", PREFIX, printable(state.read(state.i))))
        }
        DebugOp::PrintString => console.print(&format!("{} {}", PREFIX, string_at(state))),
        DebugOp::PrintByte(byte) => console.print(&format!("{} {}", PREFIX, printable(byte))),
        DebugOp::PrintRegister(x) => {
            console.print(&format!("{} {}", PREFIX, state.v[x as usize]))
        }
        DebugOp::PrintRows(rows) => {
            console.print(PREFIX);
            for row in 0..rows as u16 {
                let left = state.read(state.i.wrapping_add(row * 2));
                let right = state.read(state.i.wrapping_add(row * 2 + 1));
                console.print(&format!("{:08b}{:08b}", left, right));
            }
        }
    }
}

/// The zero terminated string at I, stopping at the end of memory
fn string_at(state: &State) -> String {
    state.memory[(state.i & ADDRESS_MASK) as usize..]
        .iter()
        .take_while(|&&byte| byte != 0)
        .map(|&byte| printable(byte))
        .collect()
}

/// ASCII bytes print as themselves, anything above 0x7F as a `\xNN` escape
fn printable(byte: u8) -> String {
    if byte.is_ascii() {
        (byte as char).to_string()
    } else {
        std::ascii::escape_default(byte).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(op: DebugOp, state: &State) -> Vec<String> {
        let mut console = BufferConsole::default();
        execute(op, state, &mut console);
        console.lines
    }

    #[test]
    fn test_print_index() {
        let mut state = State::new();
        state.i = 0x2AB;
        assert_eq!(
            run(DebugOp::PrintIndex, &state),
            vec!["Chip 8 Debugging Console: 2ab"]
        );
    }

    #[test]
    fn test_print_index_byte() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300] = b'Z';
        assert_eq!(
            run(DebugOp::PrintIndexByte, &state),
            vec!["Chip 8 Debugging Console: Z"]
        );
    }

    #[test]
    fn test_print_string_stops_at_zero() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x306].copy_from_slice(b"hello\0");
        state.memory[0x306] = b'!';
        assert_eq!(
            run(DebugOp::PrintString, &state),
            vec!["Chip 8 Debugging Console: hello"]
        );
    }

    #[test]
    fn test_print_string_stops_at_end_of_memory() {
        let mut state = State::new();
        state.i = 0xFFE;
        state.memory[0xFFE..].copy_from_slice(b"ok");
        assert_eq!(
            run(DebugOp::PrintString, &state),
            vec!["Chip 8 Debugging Console: ok"]
        );
    }

    #[test]
    fn test_print_byte_and_register() {
        let mut state = State::new();
        state.v[0x3] = 200;
        assert_eq!(
            run(DebugOp::PrintByte(0x41), &state),
            vec!["Chip 8 Debugging Console: A"]
        );
        assert_eq!(
            run(DebugOp::PrintRegister(0x3), &state),
            vec!["Chip 8 Debugging Console: 200"]
        );
    }

    #[test]
    fn test_non_ascii_bytes_are_escaped() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x304].copy_from_slice(&[b'o', 0xE9, b'k', 0x00]);
        assert_eq!(
            run(DebugOp::PrintString, &state),
            vec!["Chip 8 Debugging Console: o\\xe9k"]
        );
        assert_eq!(
            run(DebugOp::PrintIndexByte, &state),
            vec!["Chip 8 Debugging Console: o"]
        );
        assert_eq!(
            run(DebugOp::PrintByte(0xFF), &state),
            vec!["Chip 8 Debugging Console: \\xff"]
        );
    }

    #[test]
    fn test_print_rows() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x304].copy_from_slice(&[0xF0, 0x0F, 0x81, 0x00]);
        assert_eq!(
            run(DebugOp::PrintRows(0x2), &state),
            vec![
                "Chip 8 Debugging Console:",
                "1111000000001111",
                "1000000100000000",
            ]
        );
    }
}
