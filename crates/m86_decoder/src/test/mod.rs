use crate::{
    decode_instruction, decode_one, ByteCursor, DecodeError, Direction, InstructionDescriptor,
    ModRegRM, OpcodeTable, Operands, RegisterOrMemory,
};
use m86_instruction::{
    AddressingMode, Displacement, Instruction, Operand, OperandSize, Register, RegisterEncoding,
};

fn word(encoding: RegisterEncoding) -> Operand {
    Operand::Register(Register(encoding, OperandSize::Word))
}

fn byte(encoding: RegisterEncoding) -> Operand {
    Operand::Register(Register(encoding, OperandSize::Byte))
}

fn text(bytes: &[u8]) -> String {
    let instruction = decode_one(bytes, 0).unwrap();
    assert_eq!(instruction.bytes_consumed, bytes.len(), "{:02X?}", bytes);
    instruction.to_string()
}

#[test]
fn register_to_register_word() {
    assert_eq!(
        decode_one(&[0x89, 0xD9], 0),
        Ok(Instruction::new(
            "mov",
            word(RegisterEncoding::ClCx),
            word(RegisterEncoding::BlBx),
            2
        ))
    );
    assert_eq!(text(&[0x89, 0xD9]), "mov CX, BX");
}

#[test]
fn register_to_register_byte() {
    assert_eq!(
        decode_one(&[0x88, 0xE0], 0),
        Ok(Instruction::new(
            "mov",
            byte(RegisterEncoding::AlAx),
            byte(RegisterEncoding::AhSp),
            2
        ))
    );
    assert_eq!(text(&[0x88, 0xE0]), "mov AL, AH");
}

#[test]
fn memory_with_zero_byte_displacement() {
    assert_eq!(
        decode_one(&[0x8B, 0x56, 0x00], 0),
        Ok(Instruction::new(
            "mov",
            word(RegisterEncoding::DlDx),
            Operand::Indexed(AddressingMode::Bp, Displacement::Byte(0), OperandSize::Word),
            3
        ))
    );
    assert_eq!(text(&[0x8B, 0x56, 0x00]), "mov DX, [BP+0]");
}

#[test]
fn memory_without_displacement() {
    assert_eq!(
        decode_one(&[0x8A, 0x00], 0),
        Ok(Instruction::new(
            "mov",
            byte(RegisterEncoding::AlAx),
            Operand::Indexed(AddressingMode::BxSi, Displacement::None, OperandSize::Byte),
            2
        ))
    );
    assert_eq!(text(&[0x8A, 0x00]), "mov AL, [BX+SI]");
}

#[test]
fn direct_address() {
    assert_eq!(
        decode_one(&[0x8B, 0x06, 0x34, 0x12], 0),
        Ok(Instruction::new(
            "mov",
            word(RegisterEncoding::AlAx),
            Operand::Direct(0x1234, OperandSize::Word),
            4
        ))
    );
    assert_eq!(text(&[0x8B, 0x06, 0x34, 0x12]), "mov AX, [0x1234]");
}

#[test]
fn register_memory_forms() {
    assert_eq!(text(&[0x8B, 0x57, 0xE0]), "mov DX, [BX-32]");
    assert_eq!(text(&[0x89, 0x8C, 0x14, 0xEF]), "mov [SI-4332], CX");
    assert_eq!(text(&[0x8B, 0x41, 0xDB]), "mov AX, [BX+DI-37]");
    assert_eq!(text(&[0x88, 0x6E, 0x00]), "mov [BP+0], CH");
    assert_eq!(text(&[0x8A, 0x80, 0x87, 0x13]), "mov AL, [BX+SI+4999]");
}

#[test]
fn immediate_forms() {
    assert_eq!(text(&[0xB1, 0x0C]), "mov CL, 0x0C");
    assert_eq!(text(&[0xBA, 0x6C, 0x0F]), "mov DX, 0x0F6C");
    assert_eq!(text(&[0xC6, 0x06, 0x10, 0x00, 0x07]), "mov byte [0x0010], 0x07");
    assert_eq!(
        text(&[0xC7, 0x85, 0xE8, 0x03, 0x5B, 0x01]),
        "mov word [DI+1000], 0x015B"
    );
}

#[test]
fn accumulator_forms() {
    assert_eq!(text(&[0xA1, 0xFB, 0x09]), "mov AX, [0x09fb]");
    assert_eq!(text(&[0xA0, 0x10, 0x00]), "mov AL, [0x0010]");
    assert_eq!(text(&[0xA3, 0x0F, 0x00]), "mov [0x000f], AX");
    assert_eq!(text(&[0x04, 0x09]), "add AL, 0x09");
    assert_eq!(text(&[0x3D, 0xE8, 0x03]), "cmp AX, 0x03E8");
    assert_eq!(text(&[0xA8, 0x01]), "test AL, 0x01");
}

#[test]
fn arithmetic_forms() {
    assert_eq!(text(&[0x01, 0xD8]), "add AX, BX");
    assert_eq!(text(&[0x2B, 0x5E, 0x00]), "sub BX, [BP+0]");
    assert_eq!(text(&[0x30, 0xE4]), "xor AH, AH");
    assert_eq!(text(&[0x3A, 0x07]), "cmp AL, [BX]");
    assert_eq!(text(&[0x84, 0xC3]), "test BL, AL");
    assert_eq!(text(&[0x87, 0xCB]), "xchg BX, CX");
}

#[test]
fn group_immediate_forms() {
    assert_eq!(text(&[0x83, 0xC6, 0x02]), "add SI, 0x0002");
    assert_eq!(text(&[0x83, 0xEB, 0xFE]), "sub BX, 0xFFFE");
    assert_eq!(text(&[0x80, 0x3F, 0x22]), "cmp byte [BX], 0x22");
    assert_eq!(
        text(&[0x81, 0x06, 0x00, 0x10, 0x34, 0x02]),
        "add word [0x1000], 0x0234"
    );
    assert_eq!(text(&[0x82, 0xE1, 0x0F]), "and CL, 0x0F");
}

#[test]
fn decodes_at_offset() {
    let data = [0x89, 0xD9, 0x8B, 0x56, 0x00];

    let first = decode_one(&data, 0).unwrap();
    let second = decode_one(&data, first.bytes_consumed).unwrap();

    assert_eq!(second.to_string(), "mov DX, [BP+0]");
    assert_eq!(second.bytes_consumed, 3);
}

#[test]
fn every_truncation_is_out_of_bounds() {
    let encodings: &[&[u8]] = &[
        &[0x89, 0xD9],
        &[0x8B, 0x56, 0x00],
        &[0x8B, 0x06, 0x34, 0x12],
        &[0x89, 0x8C, 0x14, 0xEF],
        &[0xB1, 0x0C],
        &[0xBA, 0x6C, 0x0F],
        &[0xC6, 0x06, 0x10, 0x00, 0x07],
        &[0xC7, 0x85, 0xE8, 0x03, 0x5B, 0x01],
        &[0xA1, 0xFB, 0x09],
        &[0x3D, 0xE8, 0x03],
        &[0x83, 0xC6, 0x02],
        &[0x81, 0x06, 0x00, 0x10, 0x34, 0x02],
    ];

    for encoding in encodings {
        for len in 0..encoding.len() {
            let truncated = &encoding[..len];
            let cursor = ByteCursor::new(truncated);

            let result = decode_instruction(OpcodeTable::standard(), &cursor);
            assert!(
                matches!(result, Err(DecodeError::OutOfBounds { .. })),
                "{:02X?} gave {:?}",
                truncated,
                result
            );
            assert_eq!(cursor.position(), 0);
        }
    }
}

#[test]
fn out_of_bounds_reports_position_of_failed_read() {
    assert_eq!(
        decode_one(&[0x8B, 0x06, 0x34], 0),
        Err(DecodeError::OutOfBounds {
            offset: 2,
            needed: 2,
            remaining: 1,
        })
    );
    assert_eq!(
        decode_one(&[0x89, 0xD9], 2),
        Err(DecodeError::OutOfBounds {
            offset: 2,
            needed: 1,
            remaining: 0,
        })
    );
    assert!(matches!(
        decode_one(&[0x89, 0xD9], 3),
        Err(DecodeError::OutOfBounds { .. })
    ));
}

#[test]
fn unknown_op_codes() {
    let table = OpcodeTable::standard();

    for op_code in 0..=255_u8 {
        if table.descriptors().iter().any(|d| d.matches(op_code)) {
            continue;
        }

        let data = [0x90, op_code, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            decode_one(&data, 1),
            Err(DecodeError::UnknownOpcode {
                byte: op_code,
                offset: 1,
            })
        );
    }

    // 1 1 0 0 0 1 1 w only exists with a zero reg field.
    assert_eq!(
        decode_one(&[0xC6, 0b00_001_110, 0x00, 0x00, 0x00], 0),
        Err(DecodeError::UnknownOpcode {
            byte: 0xC6,
            offset: 0,
        })
    );
}

#[test]
fn decoding_is_idempotent() {
    let data = [
        0x8B, 0x06, 0x34, 0x12, 0x0F, 0x83, 0xC6, 0x02, 0xC7, 0x85, 0xE8, 0x03,
    ];

    for offset in 0..=data.len() {
        assert_eq!(decode_one(&data, offset), decode_one(&data, offset));
    }
}

#[test]
fn failure_leaves_cursor_unmoved() {
    let data = [0x89, 0xD9, 0x8B, 0x56];
    let mut cursor = ByteCursor::new(&data);

    let instruction = decode_instruction(OpcodeTable::standard(), &cursor).unwrap();
    assert_eq!(cursor.position(), 0);
    cursor.advance(instruction.bytes_consumed).unwrap();

    assert!(decode_instruction(OpcodeTable::standard(), &cursor).is_err());
    assert_eq!(cursor.position(), 2);
}

#[test]
fn mod_rm_grid_byte_counts() {
    for mode in 0..4_u8 {
        for rm in 0..8_u8 {
            let mrrm_byte = mode << 6 | 0b001 << 3 | rm;
            let data = [0x8B, mrrm_byte, 0x10, 0x20];
            let instruction = decode_one(&data, 0).unwrap();

            let displacement_bytes = match (mode, rm) {
                (0b00, 0b110) => 2,
                (0b00, _) | (0b11, _) => 0,
                (0b01, _) => 1,
                _ => 2,
            };
            assert_eq!(instruction.bytes_consumed, 2 + displacement_bytes);
            assert_eq!(instruction.destination, word(RegisterEncoding::ClCx));

            let mut rest = ByteCursor::new(&data[2..]);
            let expected = ModRegRM::try_from_byte(mrrm_byte, &mut rest).unwrap();
            assert_eq!(
                instruction.source,
                expected.register_or_memory.into_operand(OperandSize::Word)
            );
            match expected.register_or_memory {
                RegisterOrMemory::Direct(address) => assert_eq!(address, 0x2010),
                RegisterOrMemory::Indirect(..) => assert!(mode < 0b11),
                RegisterOrMemory::Register(_) => assert_eq!(mode, 0b11),
            }
        }
    }
}

#[test]
fn custom_descriptors_extend_the_table() {
    // 1 0 0 0 1 1 0 1 | mod reg r/m
    let lea = InstructionDescriptor {
        mnemonic: "lea",
        opcode_mask: 0b1111_1111,
        opcode_value: 0b1000_1101,
        extension: None,
        width_bit: None,
        sign_bit: None,
        operands: Operands::RegisterMemory(Direction::RegisterIsDestination),
    };
    let table = OpcodeTable::new(
        OpcodeTable::standard()
            .descriptors()
            .iter()
            .copied()
            .chain(std::iter::once(lea)),
    );

    let data = [0x8D, 0x46, 0xFE];
    let instruction = decode_instruction(&table, &ByteCursor::new(&data)).unwrap();
    assert_eq!(instruction.to_string(), "lea AX, [BP-2]");
    assert_eq!(instruction.bytes_consumed, 3);

    assert_eq!(
        decode_one(&data, 0),
        Err(DecodeError::UnknownOpcode {
            byte: 0x8D,
            offset: 0,
        })
    );
}
