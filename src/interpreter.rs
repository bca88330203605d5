/// # interpreter
///
/// Machine state is split up the way the hardware describes it:
///  - 4K of memory, program at 0x200
///  - V0-VF, with VF also the carry/borrow/collision flag
///  - I, a 16 bit address register
///  - a 16 level call stack
///  - the program counter
///  - a 64x32 framebuffer
///
/// Each step fetches a word at PC, moves PC on by 2 and only then runs the
/// handler, so skips and calls work relative to the next instruction.
/// Nothing here sleeps or throttles; the caller decides how fast to step.
use crate::config::{Config, SpriteEdge};
use crate::display::Display;
use crate::error::Chip8Error;
use crate::framebuffer::{Framebuffer, CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH};
use crate::instruction::Instruction;
use crate::memory::{Chip8MemoryMap, MemoryMap};
use crate::registers::Registers;
use crate::stack::CallStack;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::Rng;
use std::io;
use std::path::Path;

pub struct Chip8Interpreter<'a> {
    memory: Chip8MemoryMap,
    display: &'a mut dyn Display,
    registers: Registers,
    stack: CallStack,
    program_counter: u16,
    i: u16,
    framebuffer: Framebuffer,
    rng: StdRng,
    sprite_edge: SpriteEdge,
}

impl<'a> Chip8Interpreter<'a> {
    pub fn new(display: &'a mut dyn Display) -> Chip8Interpreter<'a> {
        Self::with_config(display, Config::default())
    }

    pub fn with_config(display: &'a mut dyn Display, config: Config) -> Chip8Interpreter<'a> {
        let memory = Chip8MemoryMap::new();
        let program_counter = memory.program_addr;
        debug!(
            "constructing interpreter (sprite edge: {}, seed: {:?})",
            config.sprite_edge, config.seed
        );
        Chip8Interpreter {
            memory,
            display,
            registers: Registers::new(),
            stack: CallStack::new(),
            program_counter,
            i: 0x0000,
            framebuffer: Framebuffer::new(),
            rng: config.rng(),
            sprite_edge: config.sprite_edge,
        }
    }

    /// load a chip8 program
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize, Chip8Error> {
        let len = self.memory.load_program(reader)?;
        info!("loaded {} byte program at {:#05x}", len, self.memory.program_addr);
        Ok(len)
    }

    /// load a chip8 program from disk
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, Chip8Error> {
        let path = path.as_ref();
        let len = self.memory.load_file(path)?;
        info!("loaded {} bytes from {:?}", len, path);
        Ok(len)
    }

    /// fetch, advance and execute one instruction
    pub fn step(&mut self) -> Result<Instruction, Chip8Error> {
        let pc = self.program_counter;
        let word = self.memory.get_word(pc)?;
        self.program_counter = pc.wrapping_add(2);
        let instruction = Instruction::decode(word);
        trace!("{:03x}: {:04x}  {}", pc, word, instruction);
        self.execute(instruction)?;
        Ok(instruction)
    }

    /// push the framebuffer to the display
    pub fn refresh(&mut self) -> Result<(), Chip8Error> {
        self.display.update(self.framebuffer.pixels(), self.framebuffer.pitch())?;
        Ok(())
    }

    /// step and refresh until `limit` instructions have run, forever if
    /// there's no limit; returns how many ran
    pub fn main_loop(&mut self, limit: Option<u64>) -> Result<u64, Chip8Error> {
        let mut cycles = 0u64;
        while limit.map_or(true, |l| cycles < l) {
            self.step()?;
            self.refresh()?;
            cycles += 1;
        }
        info!("stopped after {} instructions", cycles);
        Ok(cycles)
    }

    /// run a single decoded instruction against the machine state
    pub fn execute(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        use Instruction::*;
        match instruction {
            Clear => self.framebuffer.clear(),
            Return => self.program_counter = self.stack.pop()?,
            Jump { addr } => self.program_counter = addr,
            Call { addr } => {
                self.stack.push(self.program_counter)?;
                self.program_counter = addr;
            }
            SkipEqImm { x, nn } => self.skip_if(self.registers.get(x) == nn),
            SkipNeImm { x, nn } => self.skip_if(self.registers.get(x) != nn),
            SkipEqReg { x, y } => self.skip_if(self.registers.get(x) == self.registers.get(y)),
            LoadImm { x, nn } => self.registers.set(x, nn),
            AddImm { x, nn } => {
                let v = self.registers.get(x).wrapping_add(nn);
                self.registers.set(x, v);
            }
            Move { x, y } => self.registers.set(x, self.registers.get(y)),
            Or { x, y } => self.alu(x, y, |a, b| a | b),
            And { x, y } => self.alu(x, y, |a, b| a & b),
            Xor { x, y } => self.alu(x, y, |a, b| a ^ b),
            AddCarry { x, y } => {
                let sum = self.registers.get(x) as u16 + self.registers.get(y) as u16;
                self.registers.set_flag(sum > 0xff);
                // VF is written first, so 8FY4 keeps the low byte of the sum
                self.registers.set(x, (sum & 0xff) as u8);
            }
            SubBorrow { x, y } => {
                self.registers.set_flag(self.registers.get(x) > self.registers.get(y));
                self.alu(x, y, u8::wrapping_sub);
            }
            SkipNeReg { x, y } => self.skip_if(self.registers.get(x) != self.registers.get(y)),
            LoadIndex { addr } => self.i = addr,
            JumpOffset { addr } => self.program_counter = self.registers.get(0) as u16 + addr,
            Random { x, nn } => {
                let r: u8 = self.rng.gen();
                self.registers.set(x, r & nn);
            }
            Draw { x, y, n } => self.draw(x, y, n)?,
            Nop(word) => debug!("no handler for {:04x}, ignoring", word),
        }
        Ok(())
    }

    fn skip_if(&mut self, cond: bool) {
        if cond {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    fn alu(&mut self, x: u8, y: u8, op: impl Fn(u8, u8) -> u8) {
        let v = op(self.registers.get(x), self.registers.get(y));
        self.registers.set(x, v);
    }

    /// DXYN: XOR an N row sprite from I onto the screen at (VX, VY). VF ends
    /// up 1 if any lit pixel was turned off.
    fn draw(&mut self, x: u8, y: u8, n: u8) -> Result<(), Chip8Error> {
        // only the origin wraps; what happens past the edges is up to
        // sprite_edge
        let x_pos = self.registers.get(x) as usize % CHIP8_DISPLAY_WIDTH;
        let y_pos = self.registers.get(y) as usize % CHIP8_DISPLAY_HEIGHT;

        // read the whole sprite up front so a bad I leaves the screen alone
        let sprite = self.memory.get_ro_slice(self.i, n as usize)?;

        let mut collision = false;
        for (row, &sprite_byte) in sprite.iter().enumerate() {
            for col in 0..8 {
                if sprite_byte & (0x80 >> col) == 0 {
                    continue;
                }
                if let Some(idx) =
                    self.framebuffer
                        .locate(x_pos + col, y_pos + row, self.sprite_edge)
                {
                    collision |= self.framebuffer.toggle(idx);
                }
            }
        }
        self.registers.set_flag(collision);
        Ok(())
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn register(&self, x: u8) -> u8 {
        self.registers.get(x)
    }

    /// VF as a flag
    pub fn flag(&self) -> bool {
        self.registers.flag()
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack.pointer()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }
}
