//! Decoding of the `mod reg r/m` byte and the displacement bytes that follow it.

use crate::errors::Result;
use crate::traits::{OpCodeExt, ReadExt};
use crate::ByteCursor;
use m86_instruction::{
    AddressingMode, Displacement, Operand, OperandSize, Register, RegisterEncoding,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOrMemory {
    /// `mod == 00`, `r/m == 110`: a 16-bit absolute address.
    Direct(u16),
    /// `mod` 00, 01 or 10: a base expression plus a displacement of 0, 1 or 2 bytes.
    Indirect(AddressingMode, Displacement),
    /// `mod == 11`.
    Register(RegisterEncoding),
}

impl RegisterOrMemory {
    /// Decode the `mod` and `r/m` fields of `mrrm_byte`, reading any displacement from `reader`,
    /// which must be positioned just after the mod reg r/m byte.
    pub fn try_from_mrrm(mrrm_byte: u8, reader: &mut impl ReadExt) -> Result<Self> {
        let rm = mrrm_byte.field(0);

        Ok(match mrrm_byte >> 6 {
            0b00 => match rm {
                0b110 => RegisterOrMemory::Direct(reader.read_u16()?),
                _ => RegisterOrMemory::Indirect(
                    AddressingMode::from_bits(rm),
                    Displacement::None,
                ),
            },

            0b01 => RegisterOrMemory::Indirect(
                AddressingMode::from_bits(rm),
                reader.read_displacement(OperandSize::Byte)?,
            ),

            0b10 => RegisterOrMemory::Indirect(
                AddressingMode::from_bits(rm),
                reader.read_displacement(OperandSize::Word)?,
            ),

            0b11 => RegisterOrMemory::Register(RegisterEncoding::from_bits(rm)),

            _ => unreachable!(),
        })
    }

    /// Number of bytes read after the mod reg r/m byte.
    pub fn extra_bytes(&self) -> usize {
        match self {
            RegisterOrMemory::Direct(_) => 2,
            RegisterOrMemory::Indirect(_, displacement) => displacement.byte_size(),
            RegisterOrMemory::Register(_) => 0,
        }
    }

    pub fn into_operand(self, operand_size: OperandSize) -> Operand {
        match self {
            RegisterOrMemory::Direct(address) => Operand::Direct(address, operand_size),
            RegisterOrMemory::Indirect(addressing_mode, displacement) => {
                Operand::Indexed(addressing_mode, displacement, operand_size)
            }
            RegisterOrMemory::Register(encoding) => {
                Operand::Register(Register(encoding, operand_size))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModRegRM {
    /// The raw `reg` field. Depending on the op code it names a register or extends the op code.
    pub register: u8,
    pub register_or_memory: RegisterOrMemory,
}

impl ModRegRM {
    pub fn new(register: u8, register_or_memory: RegisterOrMemory) -> Self {
        debug_assert!(register <= 0b111);

        Self {
            register,
            register_or_memory,
        }
    }

    pub fn try_from_byte(byte: u8, reader: &mut impl ReadExt) -> Result<Self> {
        Ok(Self {
            register: byte.field(3),
            register_or_memory: RegisterOrMemory::try_from_mrrm(byte, reader)?,
        })
    }

    /// Encode the fields back into a mod reg r/m byte. Displacement values are not part of it.
    pub fn as_byte(&self) -> u8 {
        let mode: u8 = match self.register_or_memory {
            RegisterOrMemory::Direct(_) => 0b00,
            RegisterOrMemory::Indirect(_, Displacement::None) => 0b00,
            RegisterOrMemory::Indirect(_, Displacement::Byte(_)) => 0b01,
            RegisterOrMemory::Indirect(_, Displacement::Word(_)) => 0b10,
            RegisterOrMemory::Register(_) => 0b11,
        };

        let rm = match self.register_or_memory {
            RegisterOrMemory::Direct(_) => 0b110,
            RegisterOrMemory::Indirect(addressing_mode, _) => addressing_mode.bits(),
            RegisterOrMemory::Register(encoding) => encoding.bits(),
        };

        mode << 6 | self.register << 3 | rm
    }
}

/// Operands produced from a mod reg r/m byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub register: Operand,
    pub register_or_memory: Operand,
    /// Bytes consumed after the mod reg r/m byte itself (0, 1 or 2).
    pub extra_bytes: usize,
}

/// Resolve both operands of `mrrm_byte` at `operand_size`. `cursor` must be positioned right after
/// the mod reg r/m byte and is moved past any displacement.
pub fn resolve(
    mrrm_byte: u8,
    operand_size: OperandSize,
    cursor: &mut ByteCursor,
) -> Result<Resolved> {
    let mrrm = ModRegRM::try_from_byte(mrrm_byte, cursor)?;

    Ok(Resolved {
        register: Operand::Register(Register::from_field(mrrm.register, operand_size)),
        register_or_memory: mrrm.register_or_memory.into_operand(operand_size),
        extra_bytes: mrrm.register_or_memory.extra_bytes(),
    })
}
