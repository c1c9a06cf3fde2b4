use crate::db::INSTRUCTIONS;
use crate::traits::OpCodeExt;
use crate::{ByteCursor, DecodeError, Result};
use m86_instruction::OperandSize;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Which of the two non-immediate operands becomes the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The D bit at this position decides: set means the register operand is the destination.
    Bit(u8),
    RegisterIsDestination,
    RegisterOrMemoryIsDestination,
}

/// Layout of the operands that follow the op code byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operands {
    /// `mod reg r/m`, e.g. `1 0 0 0 1 0 d w`.
    RegisterMemory(Direction),
    /// `mod ext r/m | data | data if w = 1`, e.g. `1 1 0 0 0 1 1 w`.
    ImmediateToRegisterMemory,
    /// Register in the low three op code bits, e.g. `1 0 1 1 w reg | data | data if w = 1`.
    ImmediateToRegister,
    /// `data | data if w = 1` into AL or AX.
    ImmediateToAccumulator,
    /// `addr-low | addr-high`, AL or AX is the destination.
    MemoryToAccumulator,
    /// `addr-low | addr-high`, AL or AX is the source.
    AccumulatorToMemory,
}

/// One recognized op code pattern.
///
/// A byte matches when `byte & opcode_mask == opcode_value`. The variable bits of the pattern
/// (D, W, S, register) are zero in `opcode_value` and clear in `opcode_mask`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionDescriptor {
    pub mnemonic: &'static str,
    pub opcode_mask: u8,
    pub opcode_value: u8,
    /// Required value of the `reg` field of the mod reg r/m byte, for op codes that share their
    /// first byte.
    pub extension: Option<u8>,
    pub width_bit: Option<u8>,
    pub sign_bit: Option<u8>,
    pub operands: Operands,
}

impl InstructionDescriptor {
    pub fn matches(&self, op_code: u8) -> bool {
        op_code & self.opcode_mask == self.opcode_value
    }

    /// Number of fixed bits in the op code byte.
    pub fn specificity(&self) -> u32 {
        self.opcode_mask.count_ones()
    }

    pub fn has_mod_reg_rm(&self) -> bool {
        matches!(
            self.operands,
            Operands::RegisterMemory(_) | Operands::ImmediateToRegisterMemory
        )
    }

    pub fn immediate_follows(&self) -> bool {
        matches!(
            self.operands,
            Operands::ImmediateToRegisterMemory
                | Operands::ImmediateToRegister
                | Operands::ImmediateToAccumulator
        )
    }

    pub fn address_follows(&self) -> bool {
        matches!(
            self.operands,
            Operands::MemoryToAccumulator | Operands::AccumulatorToMemory
        )
    }

    /// Operand size selected by the W bit. Op codes without a W bit operate on words.
    pub fn operand_size(&self, op_code: u8) -> OperandSize {
        match self.width_bit {
            Some(position) => OperandSize::from_width_bit(op_code.bit(position)),
            None => OperandSize::Word,
        }
    }

    /// Whether the data is a single byte that is sign extended to the operand size (S = 1, W = 1).
    pub fn sign_extends(&self, op_code: u8) -> bool {
        match self.sign_bit {
            Some(position) => {
                op_code.bit(position) && self.operand_size(op_code) == OperandSize::Word
            }
            None => false,
        }
    }
}

/// Ordered set of [InstructionDescriptor]s, most specific first.
#[derive(Debug)]
pub struct OpcodeTable {
    descriptors: Vec<InstructionDescriptor>,
}

static STANDARD: OnceLock<OpcodeTable> = OnceLock::new();

impl OpcodeTable {
    /// Build a table from `descriptors`. They are ordered by the number of fixed op code bits,
    /// keeping the given order between descriptors that fix the same number of bits.
    pub fn new(descriptors: impl IntoIterator<Item = InstructionDescriptor>) -> Self {
        let mut descriptors: Vec<InstructionDescriptor> = descriptors.into_iter().collect();
        descriptors.sort_by_key(|d| std::cmp::Reverse(d.specificity()));

        debug!("Built op code table with {} descriptors", descriptors.len());

        Self { descriptors }
    }

    /// The built-in table, built once on first use.
    pub fn standard() -> &'static OpcodeTable {
        STANDARD.get_or_init(|| {
            info!("Initializing standard op code table");
            Self::new(INSTRUCTIONS.iter().copied())
        })
    }

    pub fn descriptors(&self) -> &[InstructionDescriptor] {
        &self.descriptors
    }

    /// Find the descriptor for the instruction at `cursor`. The cursor is not moved; descriptors
    /// with an extension peek at the mod reg r/m byte.
    pub fn find(&self, cursor: &ByteCursor) -> Result<&InstructionDescriptor> {
        let op_code = cursor.peek(1)?[0];

        for descriptor in self.descriptors.iter().filter(|d| d.matches(op_code)) {
            match descriptor.extension {
                None => return Ok(descriptor),
                Some(extension) => {
                    let mrrm_byte = cursor.peek(2)?[1];
                    if mrrm_byte.field(3) == extension {
                        return Ok(descriptor);
                    }
                }
            }
        }

        debug!(
            "No descriptor for op code {:#04x} at {:#06x}",
            op_code,
            cursor.position()
        );

        Err(DecodeError::UnknownOpcode {
            byte: op_code,
            offset: cursor.position(),
        })
    }
}
