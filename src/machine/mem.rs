// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The [Mem] represents the machine's 4 KiB of memory
//!
//! Contains some handy utils for reading and writing

use crate::error::{Error, Result};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::Range,
};

/// Total size of memory, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// Mask applied to every address before it touches memory
pub const ADDR_MASK: u16 = 0xfff;

/// The built-in hexadecimal font. Glyph `n` lives at `5 * n`.
pub const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// Gets the address range covered by this [Region]
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// assert_eq!(0x000..0x050, Region::Charset.range());
    /// assert_eq!(0x200..0x1000, Region::Program.range());
    /// ```
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => 0x000..0x050,
            Region::Program => 0x200..MEM_SIZE,
        }
    }

    /// Gets the size of this [Region], in bytes
    pub const fn len(self) -> usize {
        let range = self.range();
        range.end - range.start
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Stores memory, addressed by 12-bit addresses
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mem {
    memory: [u8; MEM_SIZE],
}

impl Mem {
    /// Constructs a new mem, with the font already loaded
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mem = Mem::new();
    /// assert_eq!(&ch8r::machine::mem::FONT, mem.get_region(Region::Charset));
    /// ```
    pub fn new() -> Self {
        let mut mem = Mem {
            memory: [0; MEM_SIZE],
        };
        mem.memory[Region::Charset.range()].copy_from_slice(&FONT);
        mem
    }

    /// Zeroes all of memory, then reloads the font
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::new();
        self
    }

    /// Loads data into the start of a named [Region].
    ///
    /// If the data doesn't fit, nothing is written, and [Error::ProgramTooLarge] is returned.
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut mem = Mem::new();
    /// mem.load_region(Region::Program, b"Hello, world!")?;
    /// assert_eq!(b"Hello, world!", &mem.get_region(Region::Program)[..13]);
    /// # Ok::<(), ch8r::Error>(())
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = self.get_region_mut(name);
        if data.len() > region.len() {
            return Err(Error::ProgramTooLarge {
                len: data.len(),
                max: region.len(),
            });
        }
        region[..data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.get_region_mut(name).fill(0);
        self
    }

    /// Gets a slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets a mutable slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region_mut(&mut self, name: Region) -> &mut [u8] {
        &mut self.memory[name.range()]
    }

    /// Gets the whole of memory
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }

    /// Reads the byte at `addr`, after masking it to 12 bits
    #[inline(always)]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDR_MASK) as usize]
    }

    /// Writes the byte at `addr`, after masking it to 12 bits
    #[inline(always)]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDR_MASK) as usize] = value;
    }

    /// Reads a big-endian word starting at `addr`. Each byte's address wraps separately.
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut mem = Mem::new();
    /// mem.write(0xfff, 0x12);
    /// mem.write(0x000, 0x34);
    /// assert_eq!(0x1234, mem.read_word(0xfff));
    /// ```
    #[inline(always)]
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let used = self
            .get_region(Region::Program)
            .iter()
            .rposition(|&byte| byte != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("Mem")
            .field("len", &MEM_SIZE)
            .field("program", &format_args!("{used} bytes"))
            .finish()
    }
}
