// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! ch8r: A headless chip-8 runner
//!
//! Runs a ROM for a fixed number of steps, then prints the screen

use ch8r::{error::Result, prelude::*};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};


pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let dump = options.dump;
    let mut state = State::new(options)?;
    for result in &mut state {
        if let Err(e) = result {
            eprintln!("{}", e.bold().red());
            break;
        }
    }
    state.machine.screen().print_screen();
    if dump {
        state.machine.dump();
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on ch8r.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Print each instruction as it runs.")]
    pub debug: bool,
    #[options(
        short = "n",
        help = "Number of instructions to run.",
        default = "1000",
        meta = "N"
    )]
    pub steps: usize,
    #[options(short = "s", help = "Seed the random number generator.")]
    pub seed: Option<u64>,
    #[options(
        short = "r",
        help = "Tick the timers once every N instructions. If unspecified or 0, tick every instruction.",
        meta = "N"
    )]
    pub rate: Option<usize>,
    #[options(
        short = "k",
        help = "Hold these keys down (1234/qwer/asdf/zxcv layout).",
        meta = "KEYS"
    )]
    pub keys: String,
    #[options(no_short, help = "Dump the registers after the run.")]
    pub dump: bool,
}

#[derive(Debug)]
struct State {
    pub machine: Machine,
    pub keys: [bool; 16],
    pub steps: usize,
    pub rate: Option<usize>,
}

impl State {
    fn new(options: Arguments) -> Result<Self> {
        let rom = read(&options.file)?;
        Self::with_program(options, &rom)
    }
    fn with_program(options: Arguments, rom: &[u8]) -> Result<Self> {
        let mut keys = [false; 16];
        for c in options.keys.chars() {
            match identify_key(c) {
                Some(key) => keys[key] = true,
                None => eprintln!("{}", format_args!("'{c}' is not a key").yellow()),
            }
        }
        // A rate of 0 falls back to ticking every step
        let rate = options.rate.filter(|&rate| rate > 0);
        let mut machine = Machine::new(Flags {
            debug: options.debug,
            manual_timers: rate.is_some(),
            seed: options.seed,
        });
        machine.load_program(rom)?;
        Ok(State {
            machine,
            keys,
            steps: options.steps,
            rate,
        })
    }
    fn tick(&mut self) -> Result<Step> {
        self.machine.set_keys(self.keys);
        let result = self.machine.step();
        if let Some(rate) = self.rate {
            if self.machine.cycle() % rate == 0 {
                self.machine.tick_timers();
            }
        }
        result
    }
}

impl Iterator for State {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.machine.cycle() < self.steps {
            match self.tick() {
                // Unknown instructions are skipped over
                Err(e) if e.is_recoverable() => eprintln!("{}", e.red()),
                result => return Some(result),
            }
        }
        None
    }
}
