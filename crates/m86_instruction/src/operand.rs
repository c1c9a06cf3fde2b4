use crate::Register;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSize {
    Byte,
    Word,
}

impl OperandSize {
    /// The operand size selected by the W bit.
    pub fn from_width_bit(w: bool) -> Self {
        if w {
            OperandSize::Word
        } else {
            OperandSize::Byte
        }
    }
}

/// Base expression of an indexed memory operand, keyed by the `r/m` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

impl AddressingMode {
    /// Decode the low three bits of `bits`. Higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        use AddressingMode::*;

        match bits & 0b111 {
            0b000 => BxSi,
            0b001 => BxDi,
            0b010 => BpSi,
            0b011 => BpDi,
            0b100 => Si,
            0b101 => Di,
            0b110 => Bp,
            0b111 => Bx,

            _ => unreachable!(),
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl Display for AddressingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use AddressingMode::*;

        match self {
            BxSi => write!(f, "BX+SI"),
            BxDi => write!(f, "BX+DI"),
            BpSi => write!(f, "BP+SI"),
            BpDi => write!(f, "BP+DI"),
            Si => write!(f, "SI"),
            Di => write!(f, "DI"),
            Bp => write!(f, "BP"),
            Bx => write!(f, "BX"),
        }
    }
}

/// Signed offset added to an [AddressingMode]. `None` is only produced by `mod == 00`; an explicit
/// zero displacement is kept as `Byte(0)` or `Word(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displacement {
    None,
    Byte(i8),
    Word(i16),
}

impl Displacement {
    /// Number of displacement bytes in the encoding.
    pub fn byte_size(&self) -> usize {
        match self {
            Displacement::None => 0,
            Displacement::Byte(_) => 1,
            Displacement::Word(_) => 2,
        }
    }
}

impl Display for Displacement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Displacement::None => Ok(()),
            Displacement::Byte(offset) => write!(f, "{:+}", offset),
            Displacement::Word(offset) => write!(f, "{:+}", offset),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Immediate {
    Byte(u8),
    Word(u16),
}

impl Display for Immediate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Immediate::Byte(value) => write!(f, "{:#04X}", value),
            Immediate::Word(value) => write!(f, "{:#06X}", value),
        }
    }
}

/// A decoded operand. Memory operands remember the width they are accessed with so that
/// ambiguous forms can be rendered with a size prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Direct(u16, OperandSize),
    Indexed(AddressingMode, Displacement, OperandSize),
    Immediate(Immediate),
}

impl Operand {
    pub fn operand_size(&self) -> OperandSize {
        match self {
            Operand::Register(Register(_, operand_size))
            | Operand::Direct(_, operand_size)
            | Operand::Indexed(_, _, operand_size) => *operand_size,
            Operand::Immediate(Immediate::Byte(_)) => OperandSize::Byte,
            Operand::Immediate(Immediate::Word(_)) => OperandSize::Word,
        }
    }

    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::Direct(..) | Operand::Indexed(..))
    }

    /// Wrap the operand so that memory operands render with a `byte`/`word` prefix.
    pub fn sized(&self) -> SizePrefixed<'_> {
        SizePrefixed(self)
    }
}

impl From<Register> for Operand {
    fn from(register: Register) -> Self {
        Operand::Register(register)
    }
}

impl From<Immediate> for Operand {
    fn from(immediate: Immediate) -> Self {
        Operand::Immediate(immediate)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(register) => register.fmt(f),
            Operand::Direct(address, _) => write!(f, "[{:#06x}]", address),
            Operand::Indexed(addressing_mode, displacement, _) => {
                write!(f, "[{}{}]", addressing_mode, displacement)
            }
            Operand::Immediate(value) => value.fmt(f),
        }
    }
}

pub struct SizePrefixed<'a>(&'a Operand);

impl Display for SizePrefixed<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_memory() {
            match self.0.operand_size() {
                OperandSize::Byte => "byte ".fmt(f)?,
                OperandSize::Word => "word ".fmt(f)?,
            }
        }
        self.0.fmt(f)
    }
}
