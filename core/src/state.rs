use log::debug;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, FONT_SET, FONT_START, KEY_COUNT,
    MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, STACK_SIZE,
};
use crate::error::{Chip8Error, Result};

/// The complete Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, the address of the next opcode to fetch
///
/// Stack
/// - 16 return addresses and (sp) the next free slot
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per cycle while nonzero
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the font
///     - programs start at 0x200
/// - 64x32 frame buffer
///
/// ## Input
/// - the pressed status of keys 0..F
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: [bool; KEY_COUNT],
    pub opcode: u16,
}

impl State {
    pub fn new() -> Self {
        let mut state = State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory: [0; MEMORY_SIZE],
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            keypad: [false; KEY_COUNT],
            opcode: 0,
        };
        state.initialize();
        state
    }

    /// Zeroes everything, copies the font into place and points the pc at the program start.
    pub fn initialize(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = PROGRAM_START;
        self.sp = 0;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.stack = [0; STACK_SIZE];
        self.memory = [0; MEMORY_SIZE];
        self.frame_buffer.clear();
        self.draw_flag = false;
        self.keypad = [false; KEY_COUNT];
        self.opcode = 0;

        let font = FONT_START as usize;
        self.memory[font..font + FONT_SET.len()].copy_from_slice(&FONT_SET);
    }

    /// Copies a program into memory starting at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `program` the raw program image, at most `MAX_PROGRAM_SIZE` bytes
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        debug!("loaded {} byte program at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Copies a memory image verbatim starting at address 0, font region included.
    pub fn load_memory(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > MEMORY_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: image.len(),
                max: MEMORY_SIZE,
            });
        }
        self.memory[..image.len()].copy_from_slice(image);
        debug!("loaded {} byte memory image", image.len());
        Ok(())
    }

    /// Set the pressed status of `key`
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        let slot = self
            .keypad
            .get_mut(key as usize)
            .ok_or(Chip8Error::InvalidKey(key))?;
        *slot = pressed;
        Ok(())
    }

    pub fn clear_key(&mut self, key: u8) -> Result<()> {
        self.set_key(key, false)
    }

    /// Whether the key named by a register value is held; values past 0xF are never pressed.
    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keypad.get(key as usize).copied().unwrap_or(false)
    }

    /// Reads a byte, wrapping the address into the 4K memory space.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes a byte, wrapping the address into the 4K memory space.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDRESS_MASK) as usize] = value;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// # FrameBuffer
/// 64x32 monochrome pixels stored row-major; `true` is on.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer([bool; DISPLAY_SIZE]);

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer([false; DISPLAY_SIZE])
    }

    pub fn clear(&mut self) {
        self.0 = [false; DISPLAY_SIZE];
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && self.0[y * DISPLAY_WIDTH + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            self.0[y * DISPLAY_WIDTH + x] = on;
        }
    }

    /// XORs a lit sprite pixel into the flat row-major `offset`.
    ///
    /// Returns whether a lit pixel was switched off. Offsets past the end of the
    /// frame are dropped.
    pub fn flip(&mut self, offset: usize) -> bool {
        match self.0.get_mut(offset) {
            Some(pixel) => {
                let collided = *pixel;
                *pixel = !*pixel;
                collided
            }
            None => false,
        }
    }

    /// Iterates over the rows of the frame, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.0.chunks(DISPLAY_WIDTH)
    }

    pub fn pixels(&self) -> &[bool] {
        &self.0
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
