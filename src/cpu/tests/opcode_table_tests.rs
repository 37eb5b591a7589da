use crate::cpu::AddressingMode::*;
use crate::cpu::Instruction::*;
use crate::cpu::{from_opcode, RealizedInstruction};

#[test]
fn test_table_size() {
    let known = (0..=255u8).filter_map(from_opcode).count();
    /* 151 official opcodes, the SBC alias, and seven SLO slots */
    assert_eq!(known, 159);
}

#[test]
fn test_slo_size_and_minimum_cycles() {
    for opcode in 0..=255u8 {
        if let Some(realized) = from_opcode(opcode) {
            if realized.instruction == SLO {
                assert_eq!(realized.size, 0, "opcode {opcode:#04x}");
            }
            assert!(realized.cycles >= 2, "opcode {opcode:#04x}");
        }
    }
}

#[test]
fn test_opcodes() {
    let check = |opcode: u8, expected: RealizedInstruction| {
        assert_eq!(from_opcode(opcode), Some(expected), "opcode {opcode:#04x}");
    };
    check(0x00, RealizedInstruction { instruction: BRK, addr_mode: Implicit, size: 1, cycles: 7 });
    check(0x0a, RealizedInstruction { instruction: ASL, addr_mode: Accumulator, size: 1, cycles: 2 });
    check(0x20, RealizedInstruction { instruction: JSR, addr_mode: Absolute, size: 3, cycles: 6 });
    check(0x6c, RealizedInstruction { instruction: JMP, addr_mode: Indirect, size: 3, cycles: 5 });
    check(0x91, RealizedInstruction { instruction: STA, addr_mode: IndirectY, size: 2, cycles: 6 });
    check(0xa1, RealizedInstruction { instruction: LDA, addr_mode: IndirectX, size: 2, cycles: 6 });
    check(0xb6, RealizedInstruction { instruction: LDX, addr_mode: ZeroPageY, size: 2, cycles: 4 });
    check(0xbe, RealizedInstruction { instruction: LDX, addr_mode: AbsoluteY, size: 3, cycles: 4 });
    check(0xd0, RealizedInstruction { instruction: BNE, addr_mode: Relative, size: 2, cycles: 2 });
    check(0xeb, RealizedInstruction { instruction: SBC, addr_mode: Immediate, size: 2, cycles: 2 });
    check(0xfe, RealizedInstruction { instruction: INC, addr_mode: AbsoluteX, size: 3, cycles: 7 });
    check(0x03, RealizedInstruction { instruction: SLO, addr_mode: IndirectX, size: 0, cycles: 8 });
    check(0x1f, RealizedInstruction { instruction: SLO, addr_mode: AbsoluteX, size: 0, cycles: 7 });
}

#[test]
fn test_unknown_opcodes() {
    /* KIL, unofficial NOPs and the other illegal opcodes */
    for opcode in [0x02, 0x04, 0x0b, 0x0c, 0x1a, 0x3a, 0x5a, 0x7a, 0x80, 0xda, 0xfa, 0xff] {
        assert_eq!(from_opcode(opcode), None, "opcode {opcode:#04x}");
    }
}
