/// # instruction set
///
/// Every instruction is two bytes, big-endian. The leading nibble picks the
/// family; families 0x0 and 0x8 then look at the trailing nibble as well.
///
///   X   = bits 11-8, a register
///   Y   = bits 7-4, a register
///   N   = bits 3-0, a count
///   NN  = bits 7-0, an immediate byte
///   NNN = bits 11-0, an address
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1NNN
    Jump { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SkipEqImm { x: u8, nn: u8 },
    /// 4XNN
    SkipNeImm { x: u8, nn: u8 },
    /// 5XY0
    SkipEqReg { x: u8, y: u8 },
    /// 6XNN
    LoadImm { x: u8, nn: u8 },
    /// 7XNN, wraps, VF untouched
    AddImm { x: u8, nn: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4, VF = carry
    AddCarry { x: u8, y: u8 },
    /// 8XY5, VF = 1 when VX > VY
    SubBorrow { x: u8, y: u8 },
    /// 9XY0
    SkipNeReg { x: u8, y: u8 },
    /// ANNN
    LoadIndex { addr: u16 },
    /// BNNN
    JumpOffset { addr: u16 },
    /// CXNN
    Random { x: u8, nn: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// anything without a handler; carries the raw word for diagnostics
    Nop(u16),
}

fn x(word: u16) -> u8 {
    ((word & 0x0f00) >> 8) as u8
}

fn y(word: u16) -> u8 {
    ((word & 0x00f0) >> 4) as u8
}

fn n(word: u16) -> u8 {
    (word & 0x000f) as u8
}

fn nn(word: u16) -> u8 {
    (word & 0x00ff) as u8
}

fn nnn(word: u16) -> u16 {
    word & 0x0fff
}

impl Instruction {
    /// Map an instruction word onto its handler. Never fails: unmapped
    /// words become `Nop`.
    pub fn decode(word: u16) -> Instruction {
        match (word & 0xf000) >> 12 {
            0x0 => Self::decode_0000(word),
            0x1 => Instruction::Jump { addr: nnn(word) },
            0x2 => Instruction::Call { addr: nnn(word) },
            0x3 => Instruction::SkipEqImm {
                x: x(word),
                nn: nn(word),
            },
            0x4 => Instruction::SkipNeImm {
                x: x(word),
                nn: nn(word),
            },
            0x5 => Instruction::SkipEqReg {
                x: x(word),
                y: y(word),
            },
            0x6 => Instruction::LoadImm {
                x: x(word),
                nn: nn(word),
            },
            0x7 => Instruction::AddImm {
                x: x(word),
                nn: nn(word),
            },
            0x8 => Self::decode_8000(word),
            0x9 => Instruction::SkipNeReg {
                x: x(word),
                y: y(word),
            },
            0xa => Instruction::LoadIndex { addr: nnn(word) },
            0xb => Instruction::JumpOffset { addr: nnn(word) },
            0xc => Instruction::Random {
                x: x(word),
                nn: nn(word),
            },
            0xd => Instruction::Draw {
                x: x(word),
                y: y(word),
                n: n(word),
            },
            _ => Instruction::Nop(word),
        }
    }

    // only the trailing nibble is looked at, so e.g. 0x0000 clears the screen
    fn decode_0000(word: u16) -> Instruction {
        match n(word) {
            0x0 => Instruction::Clear,
            0xe => Instruction::Return,
            _ => Instruction::Nop(word),
        }
    }

    fn decode_8000(word: u16) -> Instruction {
        let (x, y) = (x(word), y(word));
        match n(word) {
            0x0 => Instruction::Move { x, y },
            0x1 => Instruction::Or { x, y },
            0x2 => Instruction::And { x, y },
            0x3 => Instruction::Xor { x, y },
            0x4 => Instruction::AddCarry { x, y },
            0x5 => Instruction::SubBorrow { x, y },
            _ => Instruction::Nop(word),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05x}", addr),
            Call { addr } => write!(f, "CALL {:#05x}", addr),
            SkipEqImm { x, nn } => write!(f, "SE V{:X}, {:#04x}", x, nn),
            SkipNeImm { x, nn } => write!(f, "SNE V{:X}, {:#04x}", x, nn),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, nn } => write!(f, "LD V{:X}, {:#04x}", x, nn),
            AddImm { x, nn } => write!(f, "ADD V{:X}, {:#04x}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddCarry { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            SubBorrow { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, {:#05x}", addr),
            JumpOffset { addr } => write!(f, "JP V0, {:#05x}", addr),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04x}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Nop(word) => write!(f, "NOP ; {:04x}", word),
        }
    }
}

/// Listing of a ROM image as if loaded at `origin`, one line per word.
/// A trailing odd byte is shown raw.
pub fn disassemble(rom: &[u8], origin: u16) -> Vec<String> {
    let mut lines = Vec::with_capacity(rom.len() / 2 + 1);
    let mut addr = origin as usize;
    let mut chunks = rom.chunks_exact(2);
    for c in &mut chunks {
        let word = ((c[0] as u16) << 8) | c[1] as u16;
        lines.push(format!(
            "{:03x}: {:04x}  {}",
            addr,
            word,
            Instruction::decode(word)
        ));
        addr += 2;
    }
    if let [b] = chunks.remainder() {
        lines.push(format!("{:03x}: {:02x}", addr, b));
    }
    lines
}
