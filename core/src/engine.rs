use log::trace;
use rand::RngCore;

use crate::config::Config;
use crate::debug::{self, DebugConsole, LogConsole};
use crate::error::Result;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::operations as ops;
use crate::state::State;

/// # Engine
/// Fetches, decodes and executes Chip-8 instructions against a `State`.
///
/// Holds no machine state of its own, only:
/// - the `config` it executes with
/// - `rng`, the source of bytes for the random instruction
/// - `console`, where the debug opcodes print when enabled
pub struct Engine<R> {
    config: Config,
    rng: R,
    console: Box<dyn DebugConsole>,
}

impl<R: RngCore> Engine<R> {
    pub fn new(config: Config, rng: R) -> Self {
        Engine {
            config,
            rng,
            console: Box::new(LogConsole),
        }
    }

    /// Replaces where the debug opcodes print
    pub fn with_console(self, console: Box<dyn DebugConsole>) -> Self {
        Engine { console, ..self }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a single cycle
    /// - fetches the opcode at pc and moves pc past it
    /// - executes the decoded instruction
    /// - decrements both timers
    ///
    /// An error leaves the timers untouched; the state is otherwise still usable.
    pub fn cycle(&mut self, state: &mut State) -> Result<()> {
        let op = self.fetch(state);
        state.opcode = op.0;
        state.pc = state.pc.wrapping_add(0x2);

        let instruction = Instruction::decode(op);
        if self.config.trace {
            trace!(
                "{:#05x}: {} {}",
                state.pc.wrapping_sub(0x2),
                op,
                instruction
            );
        }
        self.execute(instruction, state)?;

        tick_timers(state);
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    ///
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn fetch(&self, state: &State) -> Opcode {
        Opcode::from_bytes(state.read(state.pc), state.read(state.pc.wrapping_add(1)))
    }

    /// Applies one decoded instruction to the state
    pub fn execute(&mut self, instruction: Instruction, state: &mut State) -> Result<()> {
        use Instruction::*;

        let stack_policy = self.config.stack_policy;
        match instruction {
            Clear => ops::clr(state),
            Return => ops::rts(state, stack_policy)?,
            Jump(addr) => ops::jump(state, addr),
            Call(addr) => ops::call(state, addr, stack_policy)?,
            SkipEq { x, kk } => ops::ske(state, x, kk),
            SkipNe { x, kk } => ops::skne(state, x, kk),
            SkipEqReg { x, y } => ops::skre(state, x, y),
            Load { x, kk } => ops::load(state, x, kk),
            Add { x, kk } => ops::add(state, x, kk),
            Move { x, y } => ops::mv(state, x, y),
            Or { x, y } => ops::or(state, x, y),
            And { x, y } => ops::and(state, x, y),
            Xor { x, y } => ops::xor(state, x, y),
            AddReg { x, y } => ops::addr(state, x, y),
            Sub { x, y } => ops::sub(state, x, y),
            ShiftRight { x } => ops::shr(state, x),
            SubN { x, y } => ops::subn(state, x, y),
            ShiftLeft { x } => ops::shl(state, x),
            SkipNeReg { x, y } => ops::skrne(state, x, y),
            LoadIndex(addr) => ops::loadi(state, addr),
            JumpOffset(addr) => ops::jumpi(state, addr),
            Random { x, kk } => ops::rand(state, x, kk, &mut self.rng),
            Draw { x, y, n } => ops::draw(state, x, y, n),
            SkipKey { x } => ops::skpr(state, x),
            SkipNotKey { x } => ops::skup(state, x),
            LoadDelay { x } => ops::moved(state, x),
            WaitKey { x } => ops::keyd(state, x),
            SetDelay { x } => ops::loads(state, x),
            SetSound { x } => ops::ld(state, x),
            AddIndex { x } => ops::addi(state, x),
            LoadGlyph { x } => ops::ldspr(state, x),
            StoreBcd { x } => ops::bcd(state, x),
            StoreRegs { x } => ops::stor(state, x),
            LoadRegs { x } => ops::read(state, x),
            Debug(op) => {
                if self.config.debug_console {
                    debug::execute(op, state, self.console.as_mut());
                }
            }
            Unknown(_) => {}
        }
        Ok(())
    }
}

/// Both timers count down once per cycle and stop at 0
fn tick_timers(state: &mut State) {
    state.delay_timer = state.delay_timer.saturating_sub(1);
    state.sound_timer = state.sound_timer.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StackPolicy;
    use crate::debug::BufferConsole;
    use crate::error::Chip8Error;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine(config: Config) -> Engine<StdRng> {
        Engine::new(config, StdRng::seed_from_u64(0))
    }

    fn state_with(program: &[u8]) -> State {
        let mut state = State::new();
        state.load_program(program).unwrap();
        state
    }

    /// Shares the printed lines with the test after the engine takes the console
    #[derive(Clone, Default)]
    struct SharedConsole(Rc<RefCell<BufferConsole>>);

    impl DebugConsole for SharedConsole {
        fn print(&mut self, line: &str) {
            self.0.borrow_mut().print(line);
        }
    }

    #[test]
    fn test_cycle_fetches_big_endian_and_advances() {
        let mut state = state_with(&[0x61, 0x2A]);
        engine(Config::default()).cycle(&mut state).unwrap();
        assert_eq!(state.opcode, 0x612A);
        assert_eq!(state.v[0x1], 0x2A);
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_cycle_ticks_timers() {
        let mut state = state_with(&[0x00, 0xE0, 0x00, 0xE0]);
        state.delay_timer = 0x2;
        state.sound_timer = 0x1;
        let mut engine = engine(Config::default());
        engine.cycle(&mut state).unwrap();
        assert_eq!(state.delay_timer, 0x1);
        assert_eq!(state.sound_timer, 0x0);
        engine.cycle(&mut state).unwrap();
        assert_eq!(state.delay_timer, 0x0);
        assert_eq!(state.sound_timer, 0x0);
    }

    #[test]
    fn test_timers_tick_after_the_instruction() {
        // ld DT, V0 then ld V1, DT
        let mut state = state_with(&[0xF0, 0x15, 0xF1, 0x07]);
        state.v[0x0] = 0x5;
        let mut engine = engine(Config::default());
        engine.cycle(&mut state).unwrap();
        assert_eq!(state.delay_timer, 0x4);
        engine.cycle(&mut state).unwrap();
        assert_eq!(state.v[0x1], 0x4);
    }

    #[test]
    fn test_trace_does_not_change_execution() {
        let program = [0x60, 0x2A, 0xA3, 0x00, 0x22, 0x08, 0x00, 0x00, 0x70, 0x01];
        let mut traced = state_with(&program);
        let mut plain = state_with(&program);
        let mut traced_engine = engine(Config::new().with_trace(true));
        let mut plain_engine = engine(Config::default());
        for _ in 0..4 {
            traced_engine.cycle(&mut traced).unwrap();
            plain_engine.cycle(&mut plain).unwrap();
        }
        assert!(traced_engine.config().trace);
        assert_eq!(traced.v, plain.v);
        assert_eq!(traced.i, plain.i);
        assert_eq!(traced.pc, plain.pc);
        assert_eq!(traced.sp, plain.sp);
        assert_eq!(traced.v[0x0], 0x2B);
    }

    #[test]
    fn test_unknown_opcode_is_a_noop() {
        let mut state = state_with(&[0xF1, 0xFF]);
        let before = state.clone();
        engine(Config::default()).cycle(&mut state).unwrap();
        assert_eq!(state.pc, 0x202);
        assert_eq!(state.v, before.v);
        assert_eq!(state.i, before.i);
        assert_eq!(state.memory[..], before.memory[..]);
    }

    #[test]
    fn test_fetch_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.pc = 0xFFF;
        state.memory[0xFFF] = 0x61;
        state.memory[0x000] = 0x07;
        engine(Config::default()).cycle(&mut state).unwrap();
        assert_eq!(state.v[0x1], 0x07);
    }

    #[test]
    fn test_stack_underflow_is_reported_without_ticking() {
        let mut state = state_with(&[0x00, 0xEE]);
        state.delay_timer = 0x3;
        let result = engine(Config::default()).cycle(&mut state);
        assert_eq!(result, Err(Chip8Error::StackUnderflow { pc: 0x200 }));
        assert_eq!(state.delay_timer, 0x3);
    }

    #[test]
    fn test_stack_overflow_is_reported() {
        // call 0x200 forever
        let mut state = state_with(&[0x22, 0x00]);
        let mut engine = engine(Config::default());
        for _ in 0..16 {
            engine.cycle(&mut state).unwrap();
        }
        assert_eq!(state.sp, 16);
        assert_eq!(
            engine.cycle(&mut state),
            Err(Chip8Error::StackOverflow { pc: 0x200 })
        );
    }

    #[test]
    fn test_wrapping_stack_never_fails() {
        let mut state = state_with(&[0x22, 0x00]);
        let mut engine = engine(Config::new().with_stack_policy(StackPolicy::Wrapping));
        for _ in 0..40 {
            engine.cycle(&mut state).unwrap();
            assert!(state.sp as usize <= 16);
        }
    }

    #[test]
    fn test_debug_opcodes_are_silent_by_default() {
        let console = SharedConsole::default();
        let mut state = state_with(&[0xF0, 0x95]);
        let mut engine = engine(Config::default()).with_console(Box::new(console.clone()));
        engine.cycle(&mut state).unwrap();
        assert!(console.0.borrow().lines.is_empty());
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_debug_opcodes_print_when_enabled() {
        let console = SharedConsole::default();
        let mut state = state_with(&[0x60, 0x2A, 0xF0, 0x95]);
        let mut engine = engine(Config::new().with_debug_console(true))
            .with_console(Box::new(console.clone()));
        engine.cycle(&mut state).unwrap();
        engine.cycle(&mut state).unwrap();
        assert_eq!(
            console.0.borrow().lines,
            vec!["Chip 8 Debugging Console: 42"]
        );
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let program = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
        let mut first = state_with(&program);
        let mut second = state_with(&program);
        let mut a = engine(Config::default());
        let mut b = engine(Config::default());
        for _ in 0..3 {
            a.cycle(&mut first).unwrap();
            b.cycle(&mut second).unwrap();
        }
        assert_eq!(first.v, second.v);
    }
}
