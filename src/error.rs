// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for ch8r

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ch8r.
#[derive(Debug, Error)]
pub enum Error {
    /// The program does not fit in program memory. The machine is left freshly reset.
    #[error("program is {len} bytes, but only {max} bytes fit in program memory")]
    ProgramTooLarge {
        /// The length of the rejected program
        len: usize,
        /// The size of program memory
        max: usize,
    },
    /// Represents an unimplemented operation.
    ///
    /// Not fatal: the program counter has already moved past the offending word.
    #[error("opcode {word:04x} at {addr:03x} not recognized")]
    UnknownInstruction {
        /// The offending word
        word: u16,
        /// The address it was fetched from
        addr: u16,
    },
    /// A call was made with every stack slot already in use
    #[error("stack overflow: call at {addr:03x} would exceed {depth} nested calls")]
    StackOverflow {
        /// The address of the call
        addr: u16,
        /// The depth of the stack
        depth: usize,
    },
    /// A return was made with nothing on the stack
    #[error("stack underflow: return at {addr:03x} with an empty stack")]
    StackUnderflow {
        /// The address of the return
        addr: u16,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Returns true if execution can carry on after this error.
    ///
    /// # Examples
    /// ```rust
    /// # use ch8r::error::Error;
    /// assert!(Error::UnknownInstruction { word: 0xffff, addr: 0x200 }.is_recoverable());
    /// assert!(!Error::StackUnderflow { addr: 0x200 }.is_recoverable());
    /// ```
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnknownInstruction { .. })
    }
}
