use std::io::{self, Read};

use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::Config;
use crate::constants::MAX_PROGRAM_SIZE;
use crate::debug::DebugConsole;
use crate::engine::Engine;
use crate::error::Result;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// A single session: owns the machine `state` and the `engine` that advances it.
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - advancing the CPU one cycle at a time
/// - inspecting its frame buffer for rendering by some display
/// - inspecting the sound timer for driving a tone
///
/// How often `cycle` is called is up to the caller.
pub struct Chip8<R = StdRng> {
    state: State,
    engine: Engine<R>,
    program_size: usize,
}

impl Chip8<StdRng> {
    /// A session with the default config, randomness seeded from the OS
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A session whose random instruction produces the same bytes on every run
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Chip8<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        Chip8 {
            state: State::new(),
            engine: Engine::new(config, rng),
            program_size: 0,
        }
    }

    /// Replaces where the debug opcodes print
    pub fn with_console(self, console: Box<dyn DebugConsole>) -> Self {
        Chip8 {
            engine: self.engine.with_console(console),
            ..self
        }
    }

    /// Returns the machine to its freshly initialized state, dropping the loaded program
    pub fn reset(&mut self) {
        self.state.initialize();
        self.program_size = 0;
        debug!("session reset");
    }

    /// Load a program at 0x200
    ///
    /// # Arguments
    /// * `program` the raw program image, at most 3584 bytes
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.state.load_program(program)?;
        self.program_size = program.len();
        Ok(())
    }

    /// Load a whole memory image at 0x000
    pub fn load_memory(&mut self, image: &[u8]) -> Result<()> {
        self.state.load_memory(image)?;
        self.program_size = image.len();
        Ok(())
    }

    /// Load a program from any reader
    ///
    /// Reads at most one byte past the program capacity, so an oversized or
    /// endless source is rejected without being drained.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a program
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> io::Result<()> {
        let mut program = Vec::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        self.load_program(&program)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Size in bytes of the last loaded image
    pub fn program_size(&self) -> usize {
        self.program_size
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.state.set_key(key, true)
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.state.clear_key(key)
    }

    /// Advances the CPU by a single cycle
    pub fn cycle(&mut self) -> Result<()> {
        self.engine.cycle(&mut self.state)
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns whether the frame changed since the last call and clears the flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.state.draw_flag, false)
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn config(&self) -> &Config {
        self.engine.config()
    }
}

impl Default for Chip8<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Chip8Error;

    #[test]
    fn test_cycles_loaded_program() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        chip8.load_program(&[0x00, 0xE0]).unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state().pc, 0x202);
        assert_eq!(chip8.program_size(), 2);
    }

    #[test]
    fn test_load_rom_reads_to_end() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        let mut rom: &[u8] = &[0x60, 0x0A, 0x61, 0x0B];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.state().memory[0x200..0x204], [0x60, 0x0A, 0x61, 0x0B]);
        assert_eq!(chip8.program_size(), 4);
    }

    #[test]
    fn test_load_rom_rejects_oversized() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        let big = vec![0xFF; 0x1000];
        let mut rom: &[u8] = &big;
        let err = chip8.load_rom(&mut rom).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert_eq!(chip8.program_size(), 0);
    }

    #[test]
    fn test_load_rom_stops_reading_endless_source() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        let mut rom = std::io::repeat(0xFF);
        let err = chip8.load_rom(&mut rom).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert_eq!(chip8.program_size(), 0);
    }

    #[test]
    fn test_load_rom_accepts_full_capacity() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        let full = vec![0xAB; MAX_PROGRAM_SIZE];
        let mut rom: &[u8] = &full;
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.program_size(), MAX_PROGRAM_SIZE);
        assert_eq!(chip8.state().memory[0xFFF], 0xAB);
    }

    #[test]
    fn test_key_press_and_release() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        chip8.key_press(0xE).unwrap();
        assert!(chip8.state().keypad[0xE]);
        chip8.key_release(0xE).unwrap();
        assert!(!chip8.state().keypad[0xE]);
        assert_eq!(chip8.key_press(0x1F), Err(Chip8Error::InvalidKey(0x1F)));
    }

    #[test]
    fn test_take_redraw_clears_flag() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        chip8.load_program(&[0x00, 0xE0, 0x60, 0x01]).unwrap();
        assert!(!chip8.take_redraw());
        chip8.cycle().unwrap();
        assert!(chip8.take_redraw());
        assert!(!chip8.take_redraw());
        chip8.cycle().unwrap();
        assert!(!chip8.take_redraw());
    }

    #[test]
    fn test_sound_active_follows_timer() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        // ld V0, 2; ld ST, V0
        chip8.load_program(&[0x60, 0x02, 0xF0, 0x18, 0x00, 0xE0]).unwrap();
        chip8.cycle().unwrap();
        assert!(!chip8.sound_active());
        chip8.cycle().unwrap();
        assert_eq!(chip8.sound_timer(), 0x1);
        assert!(chip8.sound_active());
        chip8.cycle().unwrap();
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        chip8.load_program(&[0x60, 0x0A]).unwrap();
        chip8.cycle().unwrap();
        chip8.reset();
        assert_eq!(chip8.state().pc, 0x200);
        assert_eq!(chip8.state().v[0x0], 0x0);
        assert_eq!(chip8.state().memory[0x200], 0x0);
        assert_eq!(chip8.program_size(), 0);
    }
}
