use crate::table::{Direction, InstructionDescriptor, Operands};

mod private {
    use super::*;

    // x x x x x x d w | mod reg r/m
    pub const fn rm_reg(mnemonic: &'static str, value: u8) -> InstructionDescriptor {
        InstructionDescriptor {
            mnemonic,
            opcode_mask: 0b1111_1100,
            opcode_value: value,
            extension: None,
            width_bit: Some(0),
            sign_bit: None,
            operands: Operands::RegisterMemory(Direction::Bit(1)),
        }
    }

    // x x x x x x x w | mod reg r/m
    pub const fn rm_with_reg(mnemonic: &'static str, value: u8) -> InstructionDescriptor {
        InstructionDescriptor {
            mnemonic,
            opcode_mask: 0b1111_1110,
            opcode_value: value,
            extension: None,
            width_bit: Some(0),
            sign_bit: None,
            operands: Operands::RegisterMemory(Direction::RegisterOrMemoryIsDestination),
        }
    }

    // 1 0 0 0 0 0 s w | mod ext r/m | data | data if s w = 0 1
    pub const fn group1(mnemonic: &'static str, extension: u8) -> InstructionDescriptor {
        InstructionDescriptor {
            mnemonic,
            opcode_mask: 0b1111_1100,
            opcode_value: 0b1000_0000,
            extension: Some(extension),
            width_bit: Some(0),
            sign_bit: Some(1),
            operands: Operands::ImmediateToRegisterMemory,
        }
    }

    // x x x x x x x w | data | data if w = 1
    pub const fn imm_acc(mnemonic: &'static str, value: u8) -> InstructionDescriptor {
        InstructionDescriptor {
            mnemonic,
            opcode_mask: 0b1111_1110,
            opcode_value: value,
            extension: None,
            width_bit: Some(0),
            sign_bit: None,
            operands: Operands::ImmediateToAccumulator,
        }
    }

    #[rustfmt::skip]
    pub const INSTRUCTIONS: &[InstructionDescriptor] = &[
        // 1 0 0 0 1 0 d w | mod reg r/m
        rm_reg("mov", 0b1000_1000),
        // 1 1 0 0 0 1 1 w | mod 0 0 0 r/m | data | data if w = 1
        InstructionDescriptor {
            mnemonic: "mov",
            opcode_mask: 0b1111_1110,
            opcode_value: 0b1100_0110,
            extension: Some(0b000),
            width_bit: Some(0),
            sign_bit: None,
            operands: Operands::ImmediateToRegisterMemory,
        },
        // 1 0 1 1 w reg | data | data if w = 1
        InstructionDescriptor {
            mnemonic: "mov",
            opcode_mask: 0b1111_0000,
            opcode_value: 0b1011_0000,
            extension: None,
            width_bit: Some(3),
            sign_bit: None,
            operands: Operands::ImmediateToRegister,
        },
        // 1 0 1 0 0 0 0 w | addr-low | addr-high
        InstructionDescriptor {
            mnemonic: "mov",
            opcode_mask: 0b1111_1110,
            opcode_value: 0b1010_0000,
            extension: None,
            width_bit: Some(0),
            sign_bit: None,
            operands: Operands::MemoryToAccumulator,
        },
        // 1 0 1 0 0 0 1 w | addr-low | addr-high
        InstructionDescriptor {
            mnemonic: "mov",
            opcode_mask: 0b1111_1110,
            opcode_value: 0b1010_0010,
            extension: None,
            width_bit: Some(0),
            sign_bit: None,
            operands: Operands::AccumulatorToMemory,
        },

        rm_reg("add", 0b0000_0000),
        rm_reg("or",  0b0000_1000),
        rm_reg("adc", 0b0001_0000),
        rm_reg("sbb", 0b0001_1000),
        rm_reg("and", 0b0010_0000),
        rm_reg("sub", 0b0010_1000),
        rm_reg("xor", 0b0011_0000),
        rm_reg("cmp", 0b0011_1000),

        imm_acc("add", 0b0000_0100),
        imm_acc("or",  0b0000_1100),
        imm_acc("adc", 0b0001_0100),
        imm_acc("sbb", 0b0001_1100),
        imm_acc("and", 0b0010_0100),
        imm_acc("sub", 0b0010_1100),
        imm_acc("xor", 0b0011_0100),
        imm_acc("cmp", 0b0011_1100),

        group1("add", 0b000),
        group1("or",  0b001),
        group1("adc", 0b010),
        group1("sbb", 0b011),
        group1("and", 0b100),
        group1("sub", 0b101),
        group1("xor", 0b110),
        group1("cmp", 0b111),

        // 1 0 0 0 0 1 0 w | mod reg r/m
        rm_with_reg("test", 0b1000_0100),
        // 1 0 1 0 1 0 0 w | data | data if w = 1
        imm_acc("test", 0b1010_1000),
        // 1 0 0 0 0 1 1 w | mod reg r/m
        rm_with_reg("xchg", 0b1000_0110),
    ];
}

pub use private::INSTRUCTIONS;
