use std::io;
use std::path::PathBuf;

/// everything that can stop the interpreter
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    #[error("unable to read ROM {path:?}: {source}")]
    RomLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read ROM data: {0}")]
    RomRead(#[source] io::Error),

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("memory access out of bounds at address {address:#06x}")]
    AddressOutOfRange { address: usize },

    #[error("stack overflow: no room to save return address {address:#05x}")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("display error: {0}")]
    Display(#[from] io::Error),
}
