use crate::OperandSize;

/// Register names, indexed by the 3-bit register field plus 8 when the operand is a word.
const REGISTER_NAMES: [&str; 16] = [
    "AL", "CL", "DL", "BL", "AH", "CH", "DH", "BH", //
    "AX", "CX", "DX", "BX", "SP", "BP", "SI", "DI",
];

/// Return the canonical name for a register index in `0..16`.
///
/// Indices `0..8` are the byte registers, `8..16` the word registers sharing the same encoding.
pub fn name_for(index: u8) -> &'static str {
    debug_assert!(index < 16);

    REGISTER_NAMES[(index & 0b1111) as usize]
}

/// The 3-bit encoding of a general purpose register. Which register it names depends on the
/// operand size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterEncoding {
    AlAx,
    ClCx,
    DlDx,
    BlBx,
    AhSp,
    ChBp,
    DhSi,
    BhDi,
}

impl RegisterEncoding {
    /// Decode the low three bits of `bits`. Higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        use RegisterEncoding::*;

        match bits & 0b111 {
            0b000 => AlAx,
            0b001 => ClCx,
            0b010 => DlDx,
            0b011 => BlBx,
            0b100 => AhSp,
            0b101 => ChBp,
            0b110 => DhSi,
            0b111 => BhDi,

            _ => unreachable!(),
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// A general purpose register: an encoding together with the width it is accessed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Register(pub RegisterEncoding, pub OperandSize);

impl Register {
    /// Build the register selected by a 3-bit `reg` or `r/m` field and the W flag.
    pub fn from_field(field: u8, operand_size: OperandSize) -> Self {
        Self(RegisterEncoding::from_bits(field), operand_size)
    }

    /// Build the register at `index` in the combined 16 entry table.
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < 16);

        let operand_size = if index & 0b1000 == 0 {
            OperandSize::Byte
        } else {
            OperandSize::Word
        };

        Self::from_field(index, operand_size)
    }

    /// The effective index: `field + (W ? 8 : 0)`.
    pub fn index(&self) -> u8 {
        match self.1 {
            OperandSize::Byte => self.0.bits(),
            OperandSize::Word => self.0.bits() + 8,
        }
    }

    pub fn name(&self) -> &'static str {
        name_for(self.index())
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
