use crate::error::Chip8Error;

/// how many return addresses fit on the stack
pub const CHIP8_STACK_LEVELS: usize = 16;

/// Subroutine return addresses. `pointer` is the next free slot, so it is
/// also the current call depth.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: [u16; CHIP8_STACK_LEVELS],
    pointer: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; CHIP8_STACK_LEVELS],
            pointer: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        if self.pointer >= CHIP8_STACK_LEVELS {
            return Err(Chip8Error::StackOverflow { address });
        }
        self.frames[self.pointer] = address;
        self.pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.pointer == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.pointer -= 1;
        Ok(self.frames[self.pointer])
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// saved addresses, oldest first
    pub fn frames(&self) -> &[u16] {
        &self.frames[..self.pointer]
    }
}
