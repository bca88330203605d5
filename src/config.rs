use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;

/// What DXYN does with sprite pixels that fall off the right or bottom edge.
///
/// Only the sprite origin is ever wrapped to the screen; this decides the
/// fate of the pixels after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEdge {
    /// Address the framebuffer linearly, so pixels past the right edge spill
    /// onto the start of the next row. Anything past the last pixel is
    /// dropped.
    Spill,
    /// Pixels outside the screen are not drawn.
    Clip,
    /// Each pixel wraps around to the opposite edge.
    Wrap,
}

impl Default for SpriteEdge {
    fn default() -> Self {
        SpriteEdge::Spill
    }
}

impl FromStr for SpriteEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spill" => Ok(SpriteEdge::Spill),
            "clip" => Ok(SpriteEdge::Clip),
            "wrap" => Ok(SpriteEdge::Wrap),
            other => Err(format!(
                "unknown sprite edge mode '{}' (expected spill, clip or wrap)",
                other
            )),
        }
    }
}

impl fmt::Display for SpriteEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpriteEdge::Spill => "spill",
            SpriteEdge::Clip => "clip",
            SpriteEdge::Wrap => "wrap",
        };
        f.write_str(name)
    }
}

/// knobs for the interpreter that aren't part of the machine state
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub sprite_edge: SpriteEdge,
    /// seed for the CXNN generator; None seeds from OS entropy
    pub seed: Option<u64>,
}

impl Config {
    /// the generator CXNN draws from
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
