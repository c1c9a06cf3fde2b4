//! This crate holds the structs and constants used to represent a decoded instruction for the
//! 8086 microprocessor.

mod instruction;
mod operand;
mod register;

pub use instruction::Instruction;
pub use operand::{AddressingMode, Displacement, Immediate, Operand, OperandSize};
pub use register::{name_for, Register, RegisterEncoding};
