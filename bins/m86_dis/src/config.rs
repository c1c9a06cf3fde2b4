use clap::Parser;
use m86_decoder::Recovery;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryFormat {
    /// Flat binary, addresses start at 0000:0000.
    Raw,
    /// DOS .com file, loaded at offset 0x0100.
    Com,
}

impl BinaryFormat {
    /// Offset of the first byte of the file in its segment.
    pub fn origin(&self) -> u16 {
        match self {
            BinaryFormat::Raw => 0x0000,
            BinaryFormat::Com => 0x0100,
        }
    }

    pub fn detect(path: &Path) -> Self {
        match path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(|s| s.to_lowercase())
        {
            Some(ext) if ext == "com" => BinaryFormat::Com,
            _ => BinaryFormat::Raw,
        }
    }
}

impl FromStr for BinaryFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(BinaryFormat::Raw),
            "com" => Ok(BinaryFormat::Com),
            _ => Err("supported binary formats: raw, com"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "m86-dis", version, about = "Disassemble 8086 machine code")]
pub struct Config {
    /// The binary file to disassemble
    pub binary: PathBuf,

    /// The format of the binary file (raw, com); detected from the extension when omitted
    #[arg(short, long)]
    pub format: Option<BinaryFormat>,

    /// What to do when bytes do not decode (abort, skip)
    #[arg(long, default_value = "skip")]
    pub on_error: Recovery,

    /// Print only the instructions, without addresses and bytes
    #[arg(long)]
    pub bare: bool,

    /// Log more details to stderr, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn format(&self) -> BinaryFormat {
        self.format
            .unwrap_or_else(|| BinaryFormat::detect(self.binary.as_path()))
    }
}
