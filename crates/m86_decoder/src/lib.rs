//! Table driven decoder for 8086 instructions.
//!
//! ```rust
//! use m86_decoder::decode_one;
//!
//! let instruction = decode_one(&[0x8B, 0x06, 0x34, 0x12], 0).unwrap();
//! assert_eq!(instruction.to_string(), "mov AX, [0x1234]");
//! assert_eq!(instruction.bytes_consumed, 4);
//! ```

mod cursor;
mod db;
mod decode;
mod disassembly;
mod errors;
mod mrrm;
mod table;
mod traits;

#[cfg(test)]
mod test;

pub use cursor::ByteCursor;
pub use decode::{decode_instruction, decode_one};
pub use disassembly::{Disassembly, Recovery};
pub use errors::{DecodeError, Result};
pub use mrrm::{resolve, ModRegRM, RegisterOrMemory, Resolved};
pub use table::{Direction, InstructionDescriptor, OpcodeTable, Operands};
pub use traits::{OpCodeExt, ReadExt};
