// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements the core of a Chip-8 interpreter: memory, registers,
//! timers, the keypad and the display, plus the fetch-decode-execute loop that
//! ties them together.
//!
//! Everything outside the machine (windows, host key events, reading ROM files,
//! frame pacing) is the host's business. The host drives the machine like so:
//! ```rust
//! use ch8r::*;
//! let mut machine = Machine::default();
//! machine.load_program(&[0x00, 0xe0, 0x12, 0x00])?;
//! for _ in 0..4 {
//!     machine.set_keys([false; 16]);
//!     machine.step()?;
//!     if machine.redraw_pending() {
//!         let _pixels = machine.screen().as_slice();
//!         machine.clear_redraw();
//!     }
//! }
//! # Ok::<(), ch8r::error::Error>(())
//! ```

pub mod error;
pub mod keymap;
pub mod machine;
pub mod screen;

pub use error::{Error, Result};
pub use machine::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, Region},
    Machine, Step,
};
pub use screen::Screen;

/// Common imports for ch8r
pub mod prelude {
    use super::*;
    pub use error::Result;
    pub use keymap::identify_key;
    pub use machine::{flags::Flags, mem::Region::*, Machine, Step};
    pub use screen::Screen;
}
