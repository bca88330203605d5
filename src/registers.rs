/// VF doubles as the carry, borrow and collision flag. It is still an
/// ordinary register as far as programs are concerned, so the flag accessors
/// below read and write the same byte as `get(0xf)` / `set(0xf, ..)`.
pub const FLAG_REGISTER: u8 = 0xf;

/// the sixteen 8-bit general purpose registers, V0-VF
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    v: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Registers { v: [0; 16] }
    }

    /// read VX; only the low nibble of `x` is used
    pub fn get(&self, x: u8) -> u8 {
        self.v[(x & 0xf) as usize]
    }

    pub fn set(&mut self, x: u8, value: u8) {
        self.v[(x & 0xf) as usize] = value;
    }

    /// VF as a flag
    pub fn flag(&self) -> bool {
        self.v[FLAG_REGISTER as usize] != 0
    }

    /// set VF to 1 or 0
    pub fn set_flag(&mut self, on: bool) {
        self.v[FLAG_REGISTER as usize] = on as u8;
    }

    pub fn as_slice(&self) -> &[u8; 16] {
        &self.v
    }
}
