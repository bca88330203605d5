use crate::config::SpriteEdge;

pub const CHIP8_DISPLAY_WIDTH: usize = 64;
pub const CHIP8_DISPLAY_HEIGHT: usize = 32;

/// value of a lit pixel; presentation surfaces take 32-bit pixels
pub const PIXEL_ON: u32 = 0xffff_ffff;
pub const PIXEL_OFF: u32 = 0;

/// Row-major 64x32 monochrome screen, one u32 per pixel.
pub struct Framebuffer {
    pixels: Box<[u32]>,
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: vec![PIXEL_OFF; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT].into_boxed_slice(),
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(PIXEL_OFF);
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// bytes in one row
    pub fn pitch(&self) -> usize {
        CHIP8_DISPLAY_WIDTH * std::mem::size_of::<u32>()
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        x < CHIP8_DISPLAY_WIDTH
            && y < CHIP8_DISPLAY_HEIGHT
            && self.pixels[y * CHIP8_DISPLAY_WIDTH + x] == PIXEL_ON
    }

    /// Where a sprite pixel at `x`, `y` lands (these may be past the edge).
    /// None means the pixel isn't drawn at all.
    pub fn locate(&self, x: usize, y: usize, edge: SpriteEdge) -> Option<usize> {
        let idx = match edge {
            SpriteEdge::Spill => y * CHIP8_DISPLAY_WIDTH + x,
            SpriteEdge::Clip => {
                if x >= CHIP8_DISPLAY_WIDTH || y >= CHIP8_DISPLAY_HEIGHT {
                    return None;
                }
                y * CHIP8_DISPLAY_WIDTH + x
            }
            SpriteEdge::Wrap => {
                (y % CHIP8_DISPLAY_HEIGHT) * CHIP8_DISPLAY_WIDTH + (x % CHIP8_DISPLAY_WIDTH)
            }
        };
        (idx < self.pixels.len()).then(|| idx)
    }

    /// flip a pixel between on and off; true if it was on beforehand
    pub fn toggle(&mut self, idx: usize) -> bool {
        let px = &mut self.pixels[idx];
        let was_on = *px == PIXEL_ON;
        *px ^= PIXEL_ON;
        was_on
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
