// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! ch8r-disasm: Disassembles a chip-8 ROM, one word at a time

use ch8r::{error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Load address (usually 200)", parse(try_from_str = "parse_hex"))]
    pub loadaddr: Option<u16>,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
    #[options(help = "Don't color the output")]
    pub plain: bool,
}

fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = &read(&options.file)?;
    let loadaddr = options.loadaddr.unwrap_or(0x200) as usize;
    let disassembler = if options.plain {
        Dis::plain()
    } else {
        Dis::default()
    };
    let contents = contents.get(options.offset..).unwrap_or_default();
    for (addr, insn) in contents.chunks_exact(2).enumerate() {
        let insn = u16::from_be_bytes([insn[0], insn[1]]);
        let word = format!("{insn:04x}");
        println!(
            "{:03x}: {} {}",
            2 * addr + loadaddr + options.offset,
            disassembler.once(insn),
            if options.plain {
                word
            } else {
                word.bright_black().to_string()
            },
        );
    }
    Ok(())
}
