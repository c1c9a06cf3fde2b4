use crate::mrrm::{resolve, Resolved};
use crate::table::{Direction, Operands};
use crate::traits::{OpCodeExt, ReadExt};
use crate::{ByteCursor, OpcodeTable, Result};
use m86_instruction::{Instruction, Operand, Register, RegisterEncoding};
use tracing::debug;

/// Decode the instruction at `offset` in `buffer` with the built-in op code table.
pub fn decode_one(buffer: &[u8], offset: usize) -> Result<Instruction> {
    decode_instruction(OpcodeTable::standard(), &ByteCursor::at(buffer, offset)?)
}

/// Decode the instruction at the position of `cursor`.
///
/// The cursor is not moved. On success the caller advances it by
/// [Instruction::bytes_consumed]; on failure nothing was consumed.
pub fn decode_instruction(table: &OpcodeTable, cursor: &ByteCursor) -> Result<Instruction> {
    let descriptor = table.find(cursor)?;

    let mut reader = *cursor;
    let op_code = reader.read_u8()?;
    let operand_size = descriptor.operand_size(op_code);

    let (destination, source) = match descriptor.operands {
        Operands::RegisterMemory(direction) => {
            let mrrm_byte = reader.read_u8()?;
            let Resolved {
                register,
                register_or_memory,
                ..
            } = resolve(mrrm_byte, operand_size, &mut reader)?;

            let register_is_destination = match direction {
                Direction::Bit(position) => op_code.bit(position),
                Direction::RegisterIsDestination => true,
                Direction::RegisterOrMemoryIsDestination => false,
            };

            if register_is_destination {
                (register, register_or_memory)
            } else {
                (register_or_memory, register)
            }
        }

        Operands::ImmediateToRegisterMemory => {
            let mrrm_byte = reader.read_u8()?;
            let resolved = resolve(mrrm_byte, operand_size, &mut reader)?;
            let immediate = if descriptor.sign_extends(op_code) {
                reader.read_sign_extended_immediate()?
            } else {
                reader.read_immediate(operand_size)?
            };

            (resolved.register_or_memory, immediate.into())
        }

        Operands::ImmediateToRegister => (
            Register::from_field(op_code.field(0), operand_size).into(),
            reader.read_immediate(operand_size)?.into(),
        ),

        Operands::ImmediateToAccumulator => (
            Register(RegisterEncoding::AlAx, operand_size).into(),
            reader.read_immediate(operand_size)?.into(),
        ),

        Operands::MemoryToAccumulator => (
            Register(RegisterEncoding::AlAx, operand_size).into(),
            Operand::Direct(reader.read_u16()?, operand_size),
        ),

        Operands::AccumulatorToMemory => (
            Operand::Direct(reader.read_u16()?, operand_size),
            Register(RegisterEncoding::AlAx, operand_size).into(),
        ),
    };

    let instruction = Instruction::new(
        descriptor.mnemonic,
        destination,
        source,
        reader.position() - cursor.position(),
    );

    debug!("{:#06x}: {}", cursor.position(), instruction);

    Ok(instruction)
}
