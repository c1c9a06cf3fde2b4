use crate::{decode_instruction, ByteCursor, OpcodeTable, Result};
use m86_instruction::Instruction;
use std::str::FromStr;
use tracing::warn;

/// What to do when an instruction could not be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Stop after reporting the error.
    Abort,
    /// Report the error, step over one byte and try again.
    Skip,
}

impl FromStr for Recovery {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Recovery::Abort),
            "skip" => Ok(Recovery::Skip),
            _ => Err("supported recovery policies: abort, skip"),
        }
    }
}

/// Decodes a buffer instruction by instruction, yielding the offset of each attempt with its
/// result.
pub struct Disassembly<'a> {
    table: &'a OpcodeTable,
    cursor: ByteCursor<'a>,
    recovery: Recovery,
    finished: bool,
}

impl<'a> Disassembly<'a> {
    pub fn new(data: &'a [u8], recovery: Recovery) -> Self {
        Self::with_table(OpcodeTable::standard(), data, recovery)
    }

    pub fn with_table(table: &'a OpcodeTable, data: &'a [u8], recovery: Recovery) -> Self {
        Self {
            table,
            cursor: ByteCursor::new(data),
            recovery,
            finished: false,
        }
    }
}

impl Iterator for Disassembly<'_> {
    type Item = (usize, Result<Instruction>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.cursor.remaining() == 0 {
            return None;
        }

        let offset = self.cursor.position();

        let result = match decode_instruction(self.table, &self.cursor) {
            Ok(instruction) => self
                .cursor
                .advance(instruction.bytes_consumed)
                .map(|_| instruction),
            Err(err) => Err(err),
        };

        if let Err(ref err) = result {
            match self.recovery {
                Recovery::Abort => self.finished = true,
                Recovery::Skip => {
                    warn!("Skipping byte at {:#06x}: {}", offset, err);
                    if self.cursor.advance(1).is_err() {
                        self.finished = true;
                    }
                }
            }
        }

        Some((offset, result))
    }
}
