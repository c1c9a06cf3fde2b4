use crate::Operand;
use std::fmt::{Display, Formatter};

/// A single decoded 8086 instruction.
///
/// ```rust
/// use m86_instruction::*;
///
/// // mov DX, [BP+0]
/// let i = Instruction::new(
///     "mov",
///     Operand::Register(Register(RegisterEncoding::DlDx, OperandSize::Word)),
///     Operand::Indexed(AddressingMode::Bp, Displacement::Byte(0), OperandSize::Word),
///     3,
/// );
/// assert_eq!(i.to_string(), "mov DX, [BP+0]");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub destination: Operand,
    pub source: Operand,
    /// Length of the whole encoding: op code, mod reg r/m, displacement and data bytes.
    pub bytes_consumed: usize,
}

impl Instruction {
    pub fn new(
        mnemonic: &'static str,
        destination: Operand,
        source: Operand,
        bytes_consumed: usize,
    ) -> Self {
        Self {
            mnemonic,
            destination,
            source,
            bytes_consumed,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Only an immediate leaves the width of a memory operand ambiguous.
        if matches!(self.source, Operand::Immediate(_)) {
            write!(
                f,
                "{} {}, {}",
                self.mnemonic,
                self.destination.sized(),
                self.source
            )
        } else {
            write!(f, "{} {}, {}", self.mnemonic, self.destination, self.source)
        }
    }
}
