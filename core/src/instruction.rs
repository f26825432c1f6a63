use std::fmt;

use crate::opcode::Opcode;

/// A decoded Chip-8 instruction along with its operands.
///
/// `x` and `y` are register indices (0x0..=0xF), `kk` an immediate byte,
/// `n` a nibble and `addr` a 12-bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// CLS
    Clear,
    /// RET
    Return,
    /// JP addr
    Jump(u16),
    /// CALL addr
    Call(u16),
    /// SE Vx, kk
    SkipEq { x: u8, kk: u8 },
    /// SNE Vx, kk
    SkipNe { x: u8, kk: u8 },
    /// SE Vx, Vy
    SkipEqReg { x: u8, y: u8 },
    /// LD Vx, kk
    Load { x: u8, kk: u8 },
    /// ADD Vx, kk
    Add { x: u8, kk: u8 },
    /// LD Vx, Vy
    Move { x: u8, y: u8 },
    /// OR Vx, Vy
    Or { x: u8, y: u8 },
    /// AND Vx, Vy
    And { x: u8, y: u8 },
    /// XOR Vx, Vy
    Xor { x: u8, y: u8 },
    /// ADD Vx, Vy
    AddReg { x: u8, y: u8 },
    /// SUB Vx, Vy
    Sub { x: u8, y: u8 },
    /// SHR Vx
    ShiftRight { x: u8 },
    /// SUBN Vx, Vy
    SubN { x: u8, y: u8 },
    /// SHL Vx
    ShiftLeft { x: u8 },
    /// SNE Vx, Vy
    SkipNeReg { x: u8, y: u8 },
    /// LD I, addr
    LoadIndex(u16),
    /// JP V0, addr
    JumpOffset(u16),
    /// RND Vx, kk
    Random { x: u8, kk: u8 },
    /// DRW Vx, Vy, n
    Draw { x: u8, y: u8, n: u8 },
    /// SKP Vx
    SkipKey { x: u8 },
    /// SKNP Vx
    SkipNotKey { x: u8 },
    /// LD Vx, DT
    LoadDelay { x: u8 },
    /// LD Vx, K
    WaitKey { x: u8 },
    /// LD DT, Vx
    SetDelay { x: u8 },
    /// LD ST, Vx
    SetSound { x: u8 },
    /// ADD I, Vx
    AddIndex { x: u8 },
    /// LD F, Vx
    LoadGlyph { x: u8 },
    /// LD B, Vx
    StoreBcd { x: u8 },
    /// LD [I], Vx
    StoreRegs { x: u8 },
    /// LD Vx, [I]
    LoadRegs { x: u8 },
    /// One of the extended printing opcodes, see `DebugOp`
    Debug(DebugOp),
    /// Anything else; executes as a no-op
    Unknown(Opcode),
}

/// Extended opcodes that only print to the debug console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugOp {
    /// `0nnA` print I
    PrintIndex,
    /// `0nnB` print mem[I] as a character
    PrintIndexByte,
    /// `0nnC` print the zero terminated string at mem[I]
    PrintString,
    /// `8bbA` print the byte bb as a character
    PrintByte(u8),
    /// `Fx95` print Vx
    PrintRegister(u8),
    /// `Fx97` print x rows of 16 pixels starting at mem[I]
    PrintRows(u8),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode
    pub fn decode(op: Opcode) -> Instruction {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.nibbles() {
            (0x0, .., 0x0) => Clear,
            (0x0, .., 0xE) => Return,
            (0x0, .., 0xA) => Debug(DebugOp::PrintIndex),
            (0x0, .., 0xB) => Debug(DebugOp::PrintIndexByte),
            (0x0, .., 0xC) => Debug(DebugOp::PrintString),
            (0x1, ..) => Jump(addr),
            (0x2, ..) => Call(addr),
            (0x3, ..) => SkipEq { x, kk },
            (0x4, ..) => SkipNe { x, kk },
            (0x5, ..) => SkipEqReg { x, y },
            (0x6, ..) => Load { x, kk },
            (0x7, ..) => Add { x, kk },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xA) => Debug(DebugOp::PrintByte(op.middle_byte())),
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, ..) => SkipNeReg { x, y },
            (0xA, ..) => LoadIndex(addr),
            (0xB, ..) => JumpOffset(addr),
            (0xC, ..) => Random { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, .., 0xE) => SkipKey { x },
            (0xE, .., 0x1) => SkipNotKey { x },
            (0xF, .., 0x0, 0x7) => LoadDelay { x },
            (0xF, .., 0x0, 0xA) => WaitKey { x },
            (0xF, .., 0x1, 0x5) => SetDelay { x },
            (0xF, .., 0x1, 0x8) => SetSound { x },
            (0xF, .., 0x1, 0xE) => AddIndex { x },
            (0xF, .., 0x2, 0x9) => LoadGlyph { x },
            (0xF, .., 0x3, 0x3) => StoreBcd { x },
            (0xF, .., 0x5, 0x5) => StoreRegs { x },
            (0xF, .., 0x6, 0x5) => LoadRegs { x },
            (0xF, .., 0x9, 0x5) => Debug(DebugOp::PrintRegister(x)),
            (0xF, .., 0x9, 0x7) => Debug(DebugOp::PrintRows(x)),
            _ => Unknown(op),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "cls"),
            Return => write!(f, "ret"),
            Jump(addr) => write!(f, "jp {:#05x}", addr),
            Call(addr) => write!(f, "call {:#05x}", addr),
            SkipEq { x, kk } => write!(f, "se V{:X}, {:#04x}", x, kk),
            SkipNe { x, kk } => write!(f, "sne V{:X}, {:#04x}", x, kk),
            SkipEqReg { x, y } => write!(f, "se V{:X}, V{:X}", x, y),
            Load { x, kk } => write!(f, "ld V{:X}, {:#04x}", x, kk),
            Add { x, kk } => write!(f, "add V{:X}, {:#04x}", x, kk),
            Move { x, y } => write!(f, "ld V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "or V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "and V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "xor V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "add V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "sub V{:X}, V{:X}", x, y),
            ShiftRight { x } => write!(f, "shr V{:X}", x),
            SubN { x, y } => write!(f, "subn V{:X}, V{:X}", x, y),
            ShiftLeft { x } => write!(f, "shl V{:X}", x),
            SkipNeReg { x, y } => write!(f, "sne V{:X}, V{:X}", x, y),
            LoadIndex(addr) => write!(f, "ld I, {:#05x}", addr),
            JumpOffset(addr) => write!(f, "jp V0, {:#05x}", addr),
            Random { x, kk } => write!(f, "rnd V{:X}, {:#04x}", x, kk),
            Draw { x, y, n } => write!(f, "drw V{:X}, V{:X}, {}", x, y, n),
            SkipKey { x } => write!(f, "skp V{:X}", x),
            SkipNotKey { x } => write!(f, "sknp V{:X}", x),
            LoadDelay { x } => write!(f, "ld V{:X}, DT", x),
            WaitKey { x } => write!(f, "ld V{:X}, K", x),
            SetDelay { x } => write!(f, "ld DT, V{:X}", x),
            SetSound { x } => write!(f, "ld ST, V{:X}", x),
            AddIndex { x } => write!(f, "add I, V{:X}", x),
            LoadGlyph { x } => write!(f, "ld F, V{:X}", x),
            StoreBcd { x } => write!(f, "ld B, V{:X}", x),
            StoreRegs { x } => write!(f, "ld [I], V{:X}", x),
            LoadRegs { x } => write!(f, "ld V{:X}, [I]", x),
            Debug(DebugOp::PrintIndex) => write!(f, "printdb I"),
            Debug(DebugOp::PrintIndexByte) => write!(f, "printdb [I]"),
            Debug(DebugOp::PrintString) => write!(f, "prints I"),
            Debug(DebugOp::PrintByte(byte)) => write!(f, "printdb {:#04x}", byte),
            Debug(DebugOp::PrintRegister(x)) => write!(f, "printdb V{:X}", x),
            Debug(DebugOp::PrintRows(rows)) => write!(f, "prdrw I, {}", rows),
            Unknown(_) => write!(f, "?? ??"),
        }
    }
}
