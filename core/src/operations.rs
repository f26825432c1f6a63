//! Semantics of every Chip-8 instruction.
//!
//! By the time an operation runs the program counter already points at the
//! following instruction, so a skip is one more `pc += 2` and a jump simply
//! overwrites it.

use log::warn;
use rand::{Rng, RngCore};

use crate::config::StackPolicy;
use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_START, STACK_SIZE,
};
use crate::error::{Chip8Error, Result};
use crate::state::State;

/// Address of the instruction currently executing.
fn current_pc(state: &State) -> u16 {
    state.pc.wrapping_sub(0x2)
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(0x2);
    }
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
/// An empty stack, or a stack pointer past the end of it, is an underflow
pub fn rts(state: &mut State, policy: StackPolicy) -> Result<()> {
    let depth = state.sp as usize;
    if depth == 0 || depth > STACK_SIZE {
        match policy {
            StackPolicy::Checked => {
                return Err(Chip8Error::StackUnderflow {
                    pc: current_pc(state),
                })
            }
            StackPolicy::Wrapping => {
                warn!(
                    "ret at {:#05X} with stack pointer {}",
                    current_pc(state),
                    depth
                );
            }
        }
    }
    let top = (depth + STACK_SIZE - 1) % STACK_SIZE;
    state.sp = top as u8;
    state.pc = state.stack[top];
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16, policy: StackPolicy) -> Result<()> {
    if state.sp as usize >= STACK_SIZE {
        match policy {
            StackPolicy::Checked => {
                return Err(Chip8Error::StackOverflow {
                    pc: current_pc(state),
                })
            }
            StackPolicy::Wrapping => {
                warn!("call at {:#05X} with a full stack", current_pc(state));
                state.sp = (state.sp as usize % STACK_SIZE) as u8;
            }
        }
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 0x1;
    state.pc = addr;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    let condition = state.v[x as usize] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    let condition = state.v[x as usize] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition);
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = kk;
}

/// Vx += kk
/// Overflow is dropped and VF is left alone
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
}

/// Vx += Vy; VF = carry
/// The flag is written first, so with x == F the truncated sum wins
pub fn addr(state: &mut State, x: u8, y: u8) {
    let sum = u16::from(state.v[x as usize]) + u16::from(state.v[y as usize]);
    state.v[FLAG_REGISTER] = if sum > 0xFF { 0x1 } else { 0x0 };
    state.v[x as usize] = (sum & 0xFF) as u8;
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[FLAG_REGISTER] = if vx > vy { 0x1 } else { 0x0 };
    state.v[x as usize] = vx.wrapping_sub(vy);
}

/// Vx = Vy - Vx; VF = Vx < Vy
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[FLAG_REGISTER] = if vx < vy { 0x1 } else { 0x0 };
    state.v[x as usize] = vy.wrapping_sub(vx);
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[FLAG_REGISTER] = vx & 0x1;
    state.v[x as usize] = vx >> 1;
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[FLAG_REGISTER] = (vx >> 7) & 0x1;
    state.v[x as usize] = vx << 1;
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = u16::from(state.v[0x0]) + addr;
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8, rng: &mut dyn RngCore) {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an 8 pixel wide sprite from memory I..I+n onto the FrameBuffer.
/// Sets VF if any lit pixel is erased.
///
/// Only the starting position wraps. Rows are laid out flat, so a sprite hanging
/// off the right edge spills into the next row and anything past the bottom of
/// the frame is dropped.
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) {
    let x_pos = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let y_pos = state.v[y as usize] as usize % DISPLAY_HEIGHT;

    // Reset the flag (used for collision detection)
    state.v[FLAG_REGISTER] = 0x0;

    for row in 0..n as usize {
        let sprite = state.read(state.i.wrapping_add(row as u16));
        for col in 0..8 {
            if sprite & (0x80 >> col) == 0 {
                continue;
            }
            let offset = (y_pos + row) * DISPLAY_WIDTH + (x_pos + col);
            if state.frame_buffer.flip(offset) {
                state.v[FLAG_REGISTER] = 0x1;
            }
        }
    }

    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8) {
    let condition = state.is_key_pressed(state.v[x as usize]);
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8) {
    let condition = !state.is_key_pressed(state.v[x as usize]);
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.delay_timer;
}

/// Vx = the highest pressed key
/// With no key pressed the pc is rewound so the instruction runs again next cycle
pub fn keyd(state: &mut State, x: u8) {
    match (0..state.keypad.len()).rev().find(|&key| state.keypad[key]) {
        Some(key) => state.v[x as usize] = key as u8,
        None => state.pc = current_pc(state),
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.delay_timer = state.v[x as usize];
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.sound_timer = state.v[x as usize];
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
}

/// I = address of the font glyph for Vx
/// Values past 0xF point beyond the font and are not rejected
pub fn ldspr(state: &mut State, x: u8) {
    state.i = FONT_START + FONT_GLYPH_SIZE * u16::from(state.v[x as usize]);
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    let i = state.i;
    state.write(i, vx / 100);
    state.write(i.wrapping_add(1), vx / 10 % 10);
    state.write(i.wrapping_add(2), vx % 10);
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) {
    for reg in 0..=x {
        let value = state.v[reg as usize];
        state.write(state.i.wrapping_add(u16::from(reg)), value);
    }
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) {
    for reg in 0..=x {
        state.v[reg as usize] = state.read(state.i.wrapping_add(u16::from(reg)));
    }
}
