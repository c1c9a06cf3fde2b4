mod config;

use clap::Parser;
use config::Config;
use m86_decoder::{Disassembly, Recovery};
use m86_instruction::Instruction;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;
use tracing::{error, info, Level};

struct SegmentAndOffset {
    segment: u16,
    offset: u16,
}

#[inline(always)]
fn segment_and_offset(segment: u16, offset: u16) -> SegmentAndOffset {
    SegmentAndOffset { segment, offset }
}

impl SegmentAndOffset {
    fn relative(&self, position: usize) -> SegmentAndOffset {
        segment_and_offset(self.segment, self.offset.wrapping_add(position as u16))
    }
}

impl Display for SegmentAndOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04X}:{:04X}", self.segment, self.offset)
    }
}

struct Section<'a> {
    addr: SegmentAndOffset,
    data: &'a [u8],
}

impl<'a> Section<'a> {
    fn new(addr: SegmentAndOffset, data: &'a [u8]) -> Self {
        Self { addr, data }
    }
}

fn print_instruction(addr: SegmentAndOffset, bytes: &[u8], instruction: &Instruction) {
    let bytes_to_print = 6;
    let mut b: String = bytes
        .iter()
        .take(bytes_to_print)
        .map(|b| format!("{:02X} ", b))
        .collect();

    for _ in bytes.len()..bytes_to_print {
        b.push_str("   ");
    }

    println!("{}  {}  {}", addr, b, instruction);
}

fn print_data_byte(addr: SegmentAndOffset, byte: u8) {
    println!("{}  {:<18}  db {:#04x}", addr, format!("{:02X}", byte), byte);
}

/// Print every instruction in the section. Returns false if decoding was aborted.
fn print_section(section: &Section, recovery: Recovery, bare: bool) -> bool {
    let mut decoded = 0_usize;
    let mut failed = false;

    if bare {
        println!("bits 16");
    }

    for (position, result) in Disassembly::new(section.data, recovery) {
        match result {
            Ok(instruction) => {
                decoded += 1;
                if bare {
                    println!("{}", instruction);
                } else {
                    let bytes = &section.data[position..position + instruction.bytes_consumed];
                    print_instruction(section.addr.relative(position), bytes, &instruction);
                }
            }

            Err(err) => match recovery {
                Recovery::Abort => {
                    error!("{}", err);
                    failed = true;
                }
                Recovery::Skip => {
                    let byte = section.data[position];
                    if bare {
                        println!("db {:#04x}", byte);
                    } else {
                        print_data_byte(section.addr.relative(position), byte);
                    }
                }
            },
        }
    }

    info!("Decoded {} instructions", decoded);

    !failed
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    let format = config.format();

    info!(
        "Disassembling {} as {:?}",
        config.binary.display(),
        format
    );

    let data = match std::fs::read(&config.binary) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Could not read {}: {}", config.binary.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let section = Section::new(segment_and_offset(0, format.origin()), data.as_slice());

    if print_section(&section, config.on_error, config.bare) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
