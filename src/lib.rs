//! ## Design
//!
//! * a plain fetch/decode/execute engine for the CHIP-8 instruction set;
//!   one call to `step()` runs exactly one instruction
//! * no timers, sound or keypad; instructions that need them decode to NOP
//! * run unthrottled; the caller owns the loop and decides what to do between
//!   steps
//! * abstract display so can plug alternatives; starting with TUI in-console
//! * every memory and stack access is checked, and going out of bounds stops
//!   the machine with an error instead of corrupting state
//!
//! Model
//!
//! main
//!  |-- config (sprite edge mode, random seed)
//!  |-- display
//!  |-- interpreter(display, config)
//!  |    |-- memory (4K, program at 0x200)
//!  |    |-- registers V0-VF (VF is the flag), I, PC
//!  |    |-- call stack (16 levels)
//!  |    `-- framebuffer (64x32, u32 per pixel)
//!  `-- main loop
//!       |-- interpreter.step()     fetch, PC += 2, decode, execute
//!       `-- display.update(framebuffer, pitch)
//!
//! Decoding looks at the top nibble to find the family, and for the 0x0 and
//! 0x8 families at the bottom nibble too. Anything without a handler is a
//! NOP, which is logged at debug level and otherwise ignored.
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod registers;
pub mod stack;

pub use config::{Config, SpriteEdge};
pub use error::Chip8Error;
pub use interpreter::Chip8Interpreter;
