// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Adr, Insn, Reg,
    },
    mem::{Mem, Region::*},
};
use crate::{
    error::{Error, Result},
    screen::Screen,
};
use imperative_rs::InstructionSet;
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;

/// Maximum depth of nested subroutine calls
pub const STACK_DEPTH: usize = 16;

/// What happened during a successful [Machine::step]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// The instruction ran to completion
    Executed(Insn),
    /// `Fx0A` found no key held, and will run again next step
    AwaitingKey,
}

/// Represents the entire state of the Chip-8 machine
#[derive(Clone)]
pub struct Machine {
    /// Flags that control how the machine behaves, but which aren't inherent to the
    /// chip-8. Includes debug tracing, timer mode and the random seed.
    pub flags: Flags,
    // memory
    mem: Mem,
    stack: [Adr; STACK_DEPTH],
    sp: usize,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    screen: Screen,
    redraw: bool,
    keys: [bool; 16],
    // Execution data
    cycle: usize,
    rng: StdRng,
    disassembler: Dis,
}

// public interface
impl Machine {
    /// Constructs a new, freshly reset machine
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let machine = Machine::new(Flags {
    ///     seed: Some(8),
    ///     ..Default::default()
    /// });
    /// assert_eq!(0x200, machine.pc());
    /// ```
    pub fn new(flags: Flags) -> Self {
        let mut machine = Machine {
            flags,
            mem: Mem::new(),
            stack: [0; STACK_DEPTH],
            sp: 0,
            pc: 0x200,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            screen: Screen::new(),
            redraw: true,
            keys: [false; 16],
            cycle: 0,
            rng: StdRng::seed_from_u64(0),
            disassembler: Dis::default(),
        };
        machine.reset();
        machine
    }

    /// Resets the machine.
    ///
    /// Clears memory (reloading the font), the stack, registers, timers, screen and keys,
    /// sets pc to 0x200, requests a redraw, and reseeds the random number generator.
    ///
    /// Does not touch [Flags].
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    /// machine.set_v(0x4, 0x41).unwrap();
    /// machine.reset();
    /// assert_eq!([0; 16], machine.v());
    /// assert!(machine.redraw_pending());
    /// ```
    pub fn reset(&mut self) {
        self.mem.reset();
        // clear the stack
        self.stack = [0; STACK_DEPTH];
        self.sp = 0;
        // Reset the program counter
        self.pc = 0x200;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        // I/O
        self.screen.clear();
        self.redraw = true;
        self.keys = [false; 16];
        // Execution data
        self.cycle = 0;
        self.rng = match self.flags.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
    }

    /// Resets the machine, then loads a program into program memory at 0x200.
    ///
    /// Returns [Error::ProgramTooLarge] if the program doesn't fit in the 3584 bytes
    /// of program memory. The machine is left freshly reset in that case.
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    /// machine.load_program(&[0x00, 0xe0])?;
    /// assert_eq!(&[0x00, 0xe0], &machine.memory()[0x200..0x202]);
    ///
    /// machine
    ///     .load_program(&[0; 0xe01])
    ///     .expect_err("0xe01 bytes is one byte too many");
    /// # Ok::<(), ch8r::Error>(())
    /// ```
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.reset();
        self.mem.load_region(Program, rom)?;
        Ok(self)
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    ///
    /// // press key `7`
    /// let did_press = machine.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = machine.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = !*keyref;
        *keyref = true;
        Ok(changed)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    /// // press key `7`
    /// machine.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = machine.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = machine.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref;
        *keyref = false;
        Ok(changed)
    }

    /// Replaces the state of the whole keypad at once
    pub fn set_keys(&mut self, keys: [bool; 16]) {
        self.keys = keys;
    }

    /// Gets the state of the keypad
    pub fn keys(&self) -> &[bool; 16] {
        &self.keys
    }

    /// Sets a general purpose register.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    /// machine.set_v(0x0, 0x41).unwrap();
    /// assert_eq!(
    ///     machine.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// );
    /// assert!(machine.set_v(0x10, 0).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        let gpr = self.v.get_mut(reg).ok_or(Error::InvalidRegister { reg })?;
        *gpr = value;
        Ok(())
    }

    /// Gets the general purpose registers
    pub fn v(&self) -> [u8; 16] {
        self.v
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let machine = Machine::default();
    /// assert_eq!(0x200, machine.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the number of return addresses on the stack
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Gets the return addresses currently on the stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        &self.stack[..self.sp]
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value in the Sound Timer register.
    ///
    /// A tone should play while this is nonzero.
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the number of instructions the machine has attempted since reset
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets all 4096 bytes of memory
    pub fn memory(&self) -> &[u8] {
        self.mem.as_slice()
    }

    /// Gets the screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Returns true if the screen changed since the host last cleared the flag
    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Clears the redraw flag, once the host has drawn the frame
    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    /// Runs one instruction, then ticks the timers once
    /// (unless [Flags::manual_timers] is set).
    ///
    /// Returns [Error::UnknownInstruction] if the word at `pc` isn't an instruction.
    /// This is not fatal; `pc` has moved on, and the next step can go ahead.
    ///
    /// Returns [Error::StackOverflow] or [Error::StackUnderflow] when a call or return
    /// can't be made. `pc` and the stack are left untouched.
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    /// machine.load_program(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ])?;
    /// assert_eq!(Step::Executed(Insn::cls), machine.step()?);
    /// assert_eq!(0x202, machine.pc());
    /// assert_eq!(1, machine.cycle());
    /// # Ok::<(), ch8r::Error>(())
    /// ```
    /// Returns [Error::UnknownInstruction] if the instruction is not implemented.
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    /// machine.load_program(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ])?;
    /// machine.step().expect_err("Should return Error::UnknownInstruction { 0xffff }");
    /// assert_eq!(0x202, machine.pc());
    /// # Ok::<(), ch8r::Error>(())
    /// ```
    pub fn step(&mut self) -> Result<Step> {
        let result = self.execute();
        if !self.flags.manual_timers {
            self.tick_timers();
        }
        result
    }

    /// Fetches, decodes and runs a single instruction, without touching the timers
    pub fn execute(&mut self) -> Result<Step> {
        self.cycle += 1;
        let addr = self.pc;
        // fetch opcode
        let word = self.mem.read_word(addr);

        // Print opcode disassembly:
        if self.flags.debug {
            std::println!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                addr,
                self.disassembler.once(word)
            );
        }

        // decode opcode
        let (inc, insn) = match Insn::decode(&word.to_be_bytes()) {
            Ok(decoded) => decoded,
            Err(_) => {
                self.pc = addr.wrapping_add(2);
                return Err(Error::UnknownInstruction { word, addr });
            }
        };

        self.pc = addr.wrapping_add(inc as Adr);
        match self.dispatch(insn) {
            Ok(true) => Ok(Step::Executed(insn)),
            Ok(false) => Ok(Step::AwaitingKey),
            Err(e) => {
                // Faulting instructions leave pc where it was
                self.pc = addr;
                Err(e)
            }
        }
    }

    /// Decrements each nonzero timer by one
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut machine = Machine::default();
    /// machine.load_program(&[0x60, 0x02, 0xf0, 0x15])?; // DT = 2
    /// machine.flags.manual_timers = true;
    /// machine.step()?;
    /// machine.step()?;
    /// assert_eq!(2, machine.delay());
    /// machine.tick_timers();
    /// assert_eq!(1, machine.delay());
    /// # Ok::<(), ch8r::Error>(())
    /// ```
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Dumps the current state of all registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let machine = Machine::default();
    /// machine.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.sp,
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

impl Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("flags", &self.flags)
            .field("mem", &self.mem)
            .field("stack", &self.stack())
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("screen", &self.screen)
            .field("redraw", &self.redraw)
            .field("keys", &self.keys)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for Machine {
    /// Constructs a new machine with default [Flags]
    /// # Examples
    /// ```rust
    /// use ch8r::*;
    /// let mut machine = Machine::default();
    /// ```
    fn default() -> Self {
        Self::new(Flags::default())
    }
}
