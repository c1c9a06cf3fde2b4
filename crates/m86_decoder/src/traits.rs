use crate::{ByteCursor, Result};
use m86_instruction::{Displacement, Immediate, OperandSize};

pub trait OpCodeExt {
    /// Whether the bit at `position` (0 is the least significant) is set.
    fn bit(self, position: u8) -> bool;

    /// The 3-bit field starting at `position`.
    fn field(self, position: u8) -> u8;
}

impl OpCodeExt for u8 {
    fn bit(self, position: u8) -> bool {
        debug_assert!(position < 8);

        (self >> position) & 1 == 1
    }

    fn field(self, position: u8) -> u8 {
        debug_assert!(position < 6);

        (self >> position) & 0b111
    }
}

pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_u16(&mut self) -> Result<u16>;

    fn read_immediate(&mut self, operand_size: OperandSize) -> Result<Immediate> {
        Ok(match operand_size {
            OperandSize::Byte => Immediate::Byte(self.read_u8()?),
            OperandSize::Word => Immediate::Word(self.read_u16()?),
        })
    }

    /// A single data byte, sign extended to a word.
    fn read_sign_extended_immediate(&mut self) -> Result<Immediate> {
        Ok(Immediate::Word(self.read_u8()? as i8 as i16 as u16))
    }

    fn read_displacement(&mut self, operand_size: OperandSize) -> Result<Displacement> {
        Ok(match operand_size {
            OperandSize::Byte => Displacement::Byte(self.read_u8()? as i8),
            OperandSize::Word => Displacement::Word(self.read_u16()? as i16),
        })
    }
}

impl ReadExt for ByteCursor<'_> {
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }
}
