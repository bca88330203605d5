use crate::error::Chip8Error;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// Represents the addressable memory of the machine. Every access is bounds
/// checked; running off the end is an error rather than a panic.
pub trait MemoryMap {
    /// write unknown len of data into memory at a particular address,
    /// returning how many bytes were written
    fn write_any(&mut self, reader: &mut impl io::Read, addr: u16) -> Result<usize, Chip8Error> {
        let mut buf = Vec::new();
        let len = reader.read_to_end(&mut buf).map_err(Chip8Error::RomRead)?;
        self.write(&buf, addr)?;
        Ok(len)
    }

    /// write a chunk of bytes into "RAM"
    fn write(&mut self, data: &[u8], addr: u16) -> Result<(), Chip8Error> {
        self.get_rw_slice(addr, data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// get a single byte
    fn get_byte(&self, addr: u16) -> Result<u8, Chip8Error> {
        Ok(self.get_ro_slice(addr, 1)?[0])
    }

    /// get a big-endian two-byte word (instructions)
    fn get_word(&self, addr: u16) -> Result<u16, Chip8Error> {
        let word = self.get_ro_slice(addr, 2)?;
        Ok(((word[0] as u16) << 8) | (word[1] as u16))
    }

    /// get a r/w slice of the underlying memory
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8], Chip8Error>;

    /// get a r/o slice of the underlying memory
    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8], Chip8Error>;
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded; everything below is reserved
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// the largest ROM that fits between the program address and the top of RAM
pub const CHIP8_MAX_PROGRAM_BYTES: usize = CHIP8_RAM_SIZE_BYTES - CHIP8_PROGRAM_ADDR as usize;

/// Flat 4K CHIP-8 memory:
///   0x0000-0x01ff  reserved (left zeroed)
///   0x0200-0x0fff  program
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
    pub program_addr: u16,
}

impl MemoryMap for Chip8MemoryMap {
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8], Chip8Error> {
        let (a, end) = Self::check_range(addr, len)?;
        Ok(&mut self.bytes[a..end])
    }

    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8], Chip8Error> {
        let (a, end) = Self::check_range(addr, len)?;
        Ok(&self.bytes[a..end])
    }
}

impl Chip8MemoryMap {
    /// all-zero memory
    pub fn new() -> Self {
        Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
            program_addr: CHIP8_PROGRAM_ADDR,
        }
    }

    /// load a CHIP-8 program at 0x200; nothing is written if it doesn't fit
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize, Chip8Error> {
        // one byte past the limit is enough to know it doesn't fit
        let mut limited = reader.take(CHIP8_MAX_PROGRAM_BYTES as u64 + 1);
        let mut buf = Vec::new();
        limited.read_to_end(&mut buf).map_err(Chip8Error::RomRead)?;
        if buf.len() > CHIP8_MAX_PROGRAM_BYTES {
            return Err(Chip8Error::RomTooLarge {
                size: buf.len(),
                max_size: CHIP8_MAX_PROGRAM_BYTES,
            });
        }
        let addr = self.program_addr;
        self.write_any(&mut buf.as_slice(), addr)
    }

    /// load a CHIP-8 program from a file on disk
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, Chip8Error> {
        let path = path.as_ref();
        let mut f = File::open(path).map_err(|source| Chip8Error::RomLoad {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_program(&mut f)
    }

    /// the whole address space
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn check_range(addr: u16, len: usize) -> Result<(usize, usize), Chip8Error> {
        let a = addr as usize;
        let end = a + len;
        if end > CHIP8_RAM_SIZE_BYTES {
            // report the first byte that doesn't exist
            return Err(Chip8Error::AddressOutOfRange {
                address: a.max(CHIP8_RAM_SIZE_BYTES),
            });
        }
        Ok((a, end))
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed() {
        let m = Chip8MemoryMap::new();
        assert_eq!(m.as_slice().len(), 4096);
        assert!(m.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_any_data_ok() -> Result<(), Chip8Error> {
        let mut dst = Chip8MemoryMap::new();
        let mut src: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(dst.write_any(&mut src, 8)?, 8);
        assert_eq!(
            dst.as_slice()[..16],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
        Ok(())
    }

    #[test]
    fn test_read_word() -> Result<(), Chip8Error> {
        let mut m = Chip8MemoryMap::new();
        m.write(&[0, 1, 2, 3, 4, 5, 6, 7], 0)?;
        assert_eq!(m.get_word(0x4)?, 0x0405);
        assert_eq!(m.get_byte(0x7)?, 7);
        Ok(())
    }

    #[test]
    fn test_read_last_byte_ok() {
        let m = Chip8MemoryMap::new();
        assert!(m.get_byte(0xfff).is_ok());
    }

    #[test]
    fn test_word_straddling_top_of_ram_fails() {
        let m = Chip8MemoryMap::new();
        assert!(matches!(
            m.get_word(0xfff),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
    }

    #[test]
    fn test_write_too_much_fails() {
        let mut dst = Chip8MemoryMap::new();
        let mut src: &[u8] = &[0xaa; 8];
        assert!(matches!(
            dst.write_any(&mut src, 4089),
            Err(Chip8Error::AddressOutOfRange { .. })
        ));
        // nothing was half-written
        assert_eq!(dst.as_slice()[4089..], [0; 7]);
    }

    #[test]
    fn test_program_load_ok() -> Result<(), Chip8Error> {
        let mut dst = Chip8MemoryMap::new();
        let mut prog: &[u8] = &[0x00, 0xe0, 0x12, 0x00];
        assert_eq!(dst.load_program(&mut prog)?, 4);
        assert_eq!(dst.get_ro_slice(0x200, 4)?, &[0x00, 0xe0, 0x12, 0x00]);
        assert!(dst.as_slice()[..0x200].iter().all(|&b| b == 0));
        assert!(dst.as_slice()[0x204..].iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn test_program_fills_memory_exactly() -> Result<(), Chip8Error> {
        let mut dst = Chip8MemoryMap::new();
        let rom = vec![0x11; CHIP8_MAX_PROGRAM_BYTES];
        assert_eq!(dst.load_program(&mut rom.as_slice())?, 0xe00);
        assert_eq!(dst.get_byte(0xfff)?, 0x11);
        Ok(())
    }

    #[test]
    fn test_program_too_large() {
        let mut dst = Chip8MemoryMap::new();
        let rom = vec![0x11; CHIP8_MAX_PROGRAM_BYTES + 1];
        assert!(matches!(
            dst.load_program(&mut rom.as_slice()),
            Err(Chip8Error::RomTooLarge {
                size: 0xe01,
                max_size: 0xe00
            })
        ));
        assert!(dst.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_endless_program_is_rejected() {
        let mut dst = Chip8MemoryMap::new();
        let mut endless = io::repeat(0x11);
        assert!(matches!(
            dst.load_program(&mut endless),
            Err(Chip8Error::RomTooLarge {
                size: 0xe01,
                max_size: 0xe00
            })
        ));
        assert!(dst.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_missing_file() {
        let mut dst = Chip8MemoryMap::new();
        let res = dst.load_file("/definitely/not/a/rom.ch8");
        assert!(matches!(res, Err(Chip8Error::RomLoad { .. })));
    }
}
