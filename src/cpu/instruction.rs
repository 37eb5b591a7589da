use crate::cpu::{
    AddressingMode, SharedItems, StatusFlag, BREAK_FLAG, CPU, IRQ_HANDLER_LOCATION, UNUSED_FLAG,
};
use crate::error::EmulatorError;

use AddressingMode::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /* load/store opcodes */
    LDA, /* loads fixed value into A; can set zero flag */
    LDX, /* loads value at address into X; can set zero flag */
    LDY, /* loads fixed value into Y; can set zero flag */
    STA, /* store value from A into address */
    STX, /* stores value from X into address */
    STY, /* stores value from Y into address */

    /* transfer opcodes */
    TAX, /* transfer value from A into X; can set zero flag */
    TAY, /* transfer value from A into Y; can set zero flag */
    TSX, /* transfer value from Stack Pointer to X; can set zero flag */
    TXS, /* Transfer X to Stack Pointer */
    TXA, /* transfer value from X into A; can set zero flag */
    TYA, /* transfer value from Y into A; can set zero flag */

    /* comparisons */
    CMP, /* Compare A */
    CPX, /* Compare X */
    CPY, /* Compare Y */

    /* branch codes */
    BCC, /* Branch if Carry Clear */
    BCS, /* Branch if Carry Set */
    BEQ, /* Branch if Equal */
    BMI, /* Branch if Minus */
    BNE, /* Branch if Not Equal */
    BPL, /* Branch if Plus */
    BVC, /* Branch if Overflow Clear */
    BVS, /* Branch if Overflow Set */

    /* increment/decrement locations */
    DEC, /* Decrement Memory */
    DEX, /* Decrement X */
    DEY, /* Decrement Y */
    INC, /* Increment Memory */
    INX, /* Increment X */
    INY, /* Increment Y */

    /* bitwise operators */
    AND, /* Bitwise AND */
    ASL, /* Arithmetic Shift Left */
    BIT, /* Bit Test */
    EOR, /* Bitwise XOR */
    LSR, /* Logical Shift Right */
    ORA, /* Bitwise OR */

    /* arithmetic */
    ADC, /* Add With Carry */
    SBC, /* Subtract With Carry */

    /* rotates */
    ROL, /* Rotate Left */
    ROR, /* Rotate Right */

    /* clear & set flags */
    CLC, /* Clear Carry */
    CLD, /* Clear Decimal */
    CLI, /* Clear Interrupt Disable */
    CLV, /* Clear Overflow */
    SEC, /* Set Carry Flag */
    SED, /* Set Decimal Flag */
    SEI, /* Set Interrupt Disable */

    /* stack operations */
    PHA, /* Push A */
    PHP, /* Push Processor Status */
    PLA, /* Pull A */
    PLP, /* Pull Processor Status */

    /* jumps */
    JMP, /* Jump */
    JSR, /* Jump to Subroutine */
    RTS, /* Return from Subroutine */
    RTI, /* Return from Interrupt */

    /* others */
    BRK, /* Break (software IRQ) */
    NOP, /* No-op */

    /* unofficial; decoded but not executable */
    SLO, /* ASL then ORA */
}

impl Instruction {
    /**
     * Runs the instruction against an address already resolved by `addr_mode`, with the
     * program counter already past the instruction. Returns the cycles spent beyond the
     * opcode's base cost.
     */
    pub fn apply(
        &self,
        cpu: &mut CPU,
        bus: &mut SharedItems,
        addr_mode: &AddressingMode,
        address: u16,
    ) -> Result<u16, EmulatorError> {
        let mut extra_cycles = 0;
        match self {
            Instruction::ADC => {
                let val = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                let carry = StatusFlag::Carry.as_num(cpu);
                add_with_carry_and_update(cpu, val, carry);
            }
            Instruction::AND => {
                let mem_val = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                cpu.accumulator &= mem_val;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::ASL => {
                let old_val = addr_mode.deref(cpu, bus, address);
                let result = old_val << 1;
                cpu.update_flag(StatusFlag::Carry, old_val & 0x80 != 0);
                cpu.update_zero_neg_flags(result);
                addr_mode.write(cpu, bus, address, result);
            }
            Instruction::BCC => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Carry, false, address);
            }
            Instruction::BCS => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Carry, true, address);
            }
            Instruction::BEQ => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Zero, true, address);
            }
            Instruction::BIT => {
                let mem = addr_mode.deref(cpu, bus, address);
                let val = cpu.accumulator & mem;
                cpu.update_flag(StatusFlag::Zero, val == 0);
                cpu.update_flag(StatusFlag::Overflow, mem & 0x40 != 0);
                cpu.update_flag(StatusFlag::Negative, mem & 0x80 != 0);
            }
            Instruction::BMI => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Negative, true, address);
            }
            Instruction::BNE => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Zero, false, address);
            }
            Instruction::BPL => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Negative, false, address);
            }
            Instruction::BRK => {
                /* the byte after BRK is padding, so the return skips it */
                cpu.push16(cpu.program_counter.wrapping_add(1));
                cpu.push(cpu.get_flags() | BREAK_FLAG);
                cpu.update_flag(StatusFlag::InterruptDisable, true);
                cpu.program_counter = cpu.read16(bus, IRQ_HANDLER_LOCATION);
            }
            Instruction::BVC => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Overflow, false, address);
            }
            Instruction::BVS => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Overflow, true, address);
            }
            Instruction::CLC => {
                cpu.update_flag(StatusFlag::Carry, false);
            }
            Instruction::CLD => {
                cpu.update_flag(StatusFlag::Decimal, false);
            }
            Instruction::CLI => {
                cpu.update_flag(StatusFlag::InterruptDisable, false);
            }
            Instruction::CLV => {
                cpu.update_flag(StatusFlag::Overflow, false);
            }
            Instruction::CMP => {
                let register = cpu.accumulator;
                Self::compare(cpu, bus, addr_mode, address, register, &mut extra_cycles);
            }
            Instruction::CPX => {
                let register = cpu.index_x;
                Self::compare(cpu, bus, addr_mode, address, register, &mut extra_cycles);
            }
            Instruction::CPY => {
                let register = cpu.index_y;
                Self::compare(cpu, bus, addr_mode, address, register, &mut extra_cycles);
            }
            Instruction::DEC => {
                let new_val = addr_mode.deref(cpu, bus, address).wrapping_sub(1);
                addr_mode.write(cpu, bus, address, new_val);
                cpu.update_zero_neg_flags(new_val);
            }
            Instruction::DEX => {
                cpu.index_x = cpu.index_x.wrapping_sub(1);
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::DEY => {
                cpu.index_y = cpu.index_y.wrapping_sub(1);
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::EOR => {
                let mem_val = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                cpu.accumulator ^= mem_val;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::INC => {
                let new_val = addr_mode.deref(cpu, bus, address).wrapping_add(1);
                addr_mode.write(cpu, bus, address, new_val);
                cpu.update_zero_neg_flags(new_val);
            }
            Instruction::INX => {
                cpu.index_x = cpu.index_x.wrapping_add(1);
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::INY => {
                cpu.index_y = cpu.index_y.wrapping_add(1);
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::JMP => {
                cpu.program_counter = address;
            }
            Instruction::JSR => {
                /* pushes the address of the last byte of the JSR */
                cpu.push16(cpu.program_counter.wrapping_sub(1));
                cpu.program_counter = address;
            }
            Instruction::LDA => {
                cpu.accumulator = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::LDX => {
                cpu.index_x = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::LDY => {
                cpu.index_y = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::LSR => {
                let val = addr_mode.deref(cpu, bus, address);
                let new_val = val >> 1;
                addr_mode.write(cpu, bus, address, new_val);
                cpu.update_flag(StatusFlag::Carry, (val & 0x1) != 0);
                cpu.update_zero_neg_flags(new_val);
            }
            Instruction::NOP => { /* nothing */ }
            Instruction::ORA => {
                let mem_val = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                cpu.accumulator |= mem_val;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::PHA => {
                cpu.push(cpu.accumulator);
            }
            Instruction::PHP => {
                /* pushes status onto the stack, with the 'B' flag (bit 4) on */
                cpu.push(cpu.get_flags() | BREAK_FLAG);
            }
            Instruction::PLA => {
                cpu.accumulator = cpu.pop();
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::PLP => {
                let val = cpu.pop();
                cpu.set_flags((val & !BREAK_FLAG) | UNUSED_FLAG);
            }
            Instruction::ROL => {
                let val = addr_mode.deref(cpu, bus, address);
                let result = (val << 1) | StatusFlag::Carry.as_num(cpu);
                addr_mode.write(cpu, bus, address, result);
                cpu.update_flag(StatusFlag::Carry, val & 0x80 != 0);
                cpu.update_zero_neg_flags(result);
            }
            Instruction::ROR => {
                let val = addr_mode.deref(cpu, bus, address);
                let result = (StatusFlag::Carry.as_num(cpu) << 7) | (val >> 1);
                addr_mode.write(cpu, bus, address, result);
                cpu.update_flag(StatusFlag::Carry, val & 0x1 != 0);
                cpu.update_zero_neg_flags(result);
            }
            Instruction::RTI => {
                let flags = cpu.pop();
                cpu.set_flags(flags | UNUSED_FLAG);
                cpu.program_counter = cpu.pop16();
            }
            Instruction::RTS => {
                cpu.program_counter = cpu.pop16().wrapping_add(1);
            }
            Instruction::SBC => {
                /* a - m - (1 - c) is a + !m + c in two's complement */
                let val = addr_mode.deref_check_boundary_cross(cpu, bus, address, &mut extra_cycles);
                let carry = StatusFlag::Carry.as_num(cpu);
                add_with_carry_and_update(cpu, !val, carry);
            }
            Instruction::SEC => {
                cpu.update_flag(StatusFlag::Carry, true);
            }
            Instruction::SED => {
                cpu.update_flag(StatusFlag::Decimal, true);
            }
            Instruction::SEI => {
                cpu.update_flag(StatusFlag::InterruptDisable, true);
            }
            Instruction::STA => {
                let value = cpu.accumulator;
                addr_mode.write(cpu, bus, address, value);
            }
            Instruction::STX => {
                let value = cpu.index_x;
                addr_mode.write(cpu, bus, address, value);
            }
            Instruction::STY => {
                let value = cpu.index_y;
                addr_mode.write(cpu, bus, address, value);
            }
            Instruction::TAX => {
                cpu.index_x = cpu.accumulator;
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::TAY => {
                cpu.index_y = cpu.accumulator;
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::TSX => {
                cpu.index_x = cpu.s_register;
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::TXA => {
                cpu.accumulator = cpu.index_x;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::TXS => {
                /* doesn't update flags */
                cpu.s_register = cpu.index_x;
            }
            Instruction::TYA => {
                cpu.accumulator = cpu.index_y;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::SLO => {
                return Err(EmulatorError::UnimplementedOpcode(*self));
            }
        }

        Ok(extra_cycles)
    }

    /* taken branches cost a cycle, two if the target is on another page */
    fn branch_instr(cpu: &mut CPU, flag: StatusFlag, is_positive: bool, target: u16) -> u16 {
        if is_positive == flag.is_set(cpu) {
            let old_pc = cpu.program_counter;
            cpu.program_counter = target;
            if old_pc & 0xff00 != target & 0xff00 {
                2
            } else {
                1
            }
        } else {
            0
        }
    }

    fn compare(
        cpu: &mut CPU,
        bus: &mut SharedItems,
        addr_mode: &AddressingMode,
        address: u16,
        compare_val: u8,
        extra_cycles: &mut u16,
    ) {
        let mem_val = addr_mode.deref_check_boundary_cross(cpu, bus, address, extra_cycles);

        cpu.update_flag(StatusFlag::Carry, compare_val >= mem_val);
        cpu.update_flag(StatusFlag::Zero, compare_val == mem_val);
        cpu.update_flag(
            StatusFlag::Negative,
            compare_val.wrapping_sub(mem_val) & 0x80 != 0,
        );
    }
}

/* an opcode decoded into what it does, how it addresses memory, and what it costs */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealizedInstruction {
    pub instruction: Instruction,
    pub addr_mode: AddressingMode,
    pub size: u16,
    pub cycles: u16,
}

/**
 * Looks up an opcode. Official opcodes are all present; of the unofficial ones only the
 * SBC alias at 0xeb and the SLO slots are known, and SLO refuses to execute. Anything
 * else is None.
 */
pub fn from_opcode(opcode: u8) -> Option<RealizedInstruction> {
    /* instructions marked 'boundary' take longer if crossing a page boundary;
     * branch instructions also take an extra cycle if branch taken */
    let (instruction, addr_mode, cycles) = match opcode {
        0x00 => (Instruction::BRK, Implicit, 7),
        0x01 => (Instruction::ORA, IndirectX, 6),
        0x03 => (Instruction::SLO, IndirectX, 8),
        0x05 => (Instruction::ORA, ZeroPage, 3),
        0x06 => (Instruction::ASL, ZeroPage, 5),
        0x07 => (Instruction::SLO, ZeroPage, 5),
        0x08 => (Instruction::PHP, Implicit, 3),
        0x09 => (Instruction::ORA, Immediate, 2),
        0x0a => (Instruction::ASL, Accumulator, 2),
        0x0d => (Instruction::ORA, Absolute, 4),
        0x0e => (Instruction::ASL, Absolute, 6),
        0x0f => (Instruction::SLO, Absolute, 6),
        0x10 => (Instruction::BPL, Relative, 2),
        0x11 => (Instruction::ORA, IndirectY, 5), /*boundary*/
        0x13 => (Instruction::SLO, IndirectY, 8),
        0x15 => (Instruction::ORA, ZeroPageX, 4),
        0x16 => (Instruction::ASL, ZeroPageX, 6),
        0x17 => (Instruction::SLO, ZeroPageX, 6),
        0x18 => (Instruction::CLC, Implicit, 2),
        0x19 => (Instruction::ORA, AbsoluteY, 4), /*boundary*/
        0x1b => (Instruction::SLO, AbsoluteY, 7),
        0x1d => (Instruction::ORA, AbsoluteX, 4), /*boundary*/
        0x1e => (Instruction::ASL, AbsoluteX, 7),
        0x1f => (Instruction::SLO, AbsoluteX, 7),
        0x20 => (Instruction::JSR, Absolute, 6),
        0x21 => (Instruction::AND, IndirectX, 6),
        0x24 => (Instruction::BIT, ZeroPage, 3),
        0x25 => (Instruction::AND, ZeroPage, 3),
        0x26 => (Instruction::ROL, ZeroPage, 5),
        0x28 => (Instruction::PLP, Implicit, 4),
        0x29 => (Instruction::AND, Immediate, 2),
        0x2a => (Instruction::ROL, Accumulator, 2),
        0x2c => (Instruction::BIT, Absolute, 4),
        0x2d => (Instruction::AND, Absolute, 4),
        0x2e => (Instruction::ROL, Absolute, 6),
        0x30 => (Instruction::BMI, Relative, 2),
        0x31 => (Instruction::AND, IndirectY, 5), /*boundary*/
        0x35 => (Instruction::AND, ZeroPageX, 4),
        0x36 => (Instruction::ROL, ZeroPageX, 6),
        0x38 => (Instruction::SEC, Implicit, 2),
        0x39 => (Instruction::AND, AbsoluteY, 4), /*boundary*/
        0x3d => (Instruction::AND, AbsoluteX, 4), /*boundary*/
        0x3e => (Instruction::ROL, AbsoluteX, 7),
        0x40 => (Instruction::RTI, Implicit, 6),
        0x41 => (Instruction::EOR, IndirectX, 6),
        0x45 => (Instruction::EOR, ZeroPage, 3),
        0x46 => (Instruction::LSR, ZeroPage, 5),
        0x48 => (Instruction::PHA, Implicit, 3),
        0x49 => (Instruction::EOR, Immediate, 2),
        0x4a => (Instruction::LSR, Accumulator, 2),
        0x4c => (Instruction::JMP, Absolute, 3),
        0x4d => (Instruction::EOR, Absolute, 4),
        0x4e => (Instruction::LSR, Absolute, 6),
        0x50 => (Instruction::BVC, Relative, 2),
        0x51 => (Instruction::EOR, IndirectY, 5), /*boundary*/
        0x55 => (Instruction::EOR, ZeroPageX, 4),
        0x56 => (Instruction::LSR, ZeroPageX, 6),
        0x58 => (Instruction::CLI, Implicit, 2),
        0x59 => (Instruction::EOR, AbsoluteY, 4), /*boundary*/
        0x5d => (Instruction::EOR, AbsoluteX, 4), /*boundary*/
        0x5e => (Instruction::LSR, AbsoluteX, 7),
        0x60 => (Instruction::RTS, Implicit, 6),
        0x61 => (Instruction::ADC, IndirectX, 6),
        0x65 => (Instruction::ADC, ZeroPage, 3),
        0x66 => (Instruction::ROR, ZeroPage, 5),
        0x68 => (Instruction::PLA, Implicit, 4),
        0x69 => (Instruction::ADC, Immediate, 2),
        0x6a => (Instruction::ROR, Accumulator, 2),
        0x6c => (Instruction::JMP, Indirect, 5),
        0x6d => (Instruction::ADC, Absolute, 4),
        0x6e => (Instruction::ROR, Absolute, 6),
        0x70 => (Instruction::BVS, Relative, 2),
        0x71 => (Instruction::ADC, IndirectY, 5), /*boundary*/
        0x75 => (Instruction::ADC, ZeroPageX, 4),
        0x76 => (Instruction::ROR, ZeroPageX, 6),
        0x78 => (Instruction::SEI, Implicit, 2),
        0x79 => (Instruction::ADC, AbsoluteY, 4), /*boundary*/
        0x7d => (Instruction::ADC, AbsoluteX, 4), /*boundary*/
        0x7e => (Instruction::ROR, AbsoluteX, 7),
        0x81 => (Instruction::STA, IndirectX, 6),
        0x84 => (Instruction::STY, ZeroPage, 3),
        0x85 => (Instruction::STA, ZeroPage, 3),
        0x86 => (Instruction::STX, ZeroPage, 3),
        0x88 => (Instruction::DEY, Implicit, 2),
        0x8a => (Instruction::TXA, Implicit, 2),
        0x8c => (Instruction::STY, Absolute, 4),
        0x8d => (Instruction::STA, Absolute, 4),
        0x8e => (Instruction::STX, Absolute, 4),
        0x90 => (Instruction::BCC, Relative, 2),
        0x91 => (Instruction::STA, IndirectY, 6),
        0x94 => (Instruction::STY, ZeroPageX, 4),
        0x95 => (Instruction::STA, ZeroPageX, 4),
        0x96 => (Instruction::STX, ZeroPageY, 4),
        0x98 => (Instruction::TYA, Implicit, 2),
        0x99 => (Instruction::STA, AbsoluteY, 5),
        0x9a => (Instruction::TXS, Implicit, 2),
        0x9d => (Instruction::STA, AbsoluteX, 5),
        0xa0 => (Instruction::LDY, Immediate, 2),
        0xa1 => (Instruction::LDA, IndirectX, 6),
        0xa2 => (Instruction::LDX, Immediate, 2),
        0xa4 => (Instruction::LDY, ZeroPage, 3),
        0xa5 => (Instruction::LDA, ZeroPage, 3),
        0xa6 => (Instruction::LDX, ZeroPage, 3),
        0xa8 => (Instruction::TAY, Implicit, 2),
        0xa9 => (Instruction::LDA, Immediate, 2),
        0xaa => (Instruction::TAX, Implicit, 2),
        0xac => (Instruction::LDY, Absolute, 4),
        0xad => (Instruction::LDA, Absolute, 4),
        0xae => (Instruction::LDX, Absolute, 4),
        0xb0 => (Instruction::BCS, Relative, 2),
        0xb1 => (Instruction::LDA, IndirectY, 5), /*boundary*/
        0xb4 => (Instruction::LDY, ZeroPageX, 4),
        0xb5 => (Instruction::LDA, ZeroPageX, 4),
        0xb6 => (Instruction::LDX, ZeroPageY, 4),
        0xb8 => (Instruction::CLV, Implicit, 2),
        0xb9 => (Instruction::LDA, AbsoluteY, 4), /*boundary*/
        0xba => (Instruction::TSX, Implicit, 2),
        0xbc => (Instruction::LDY, AbsoluteX, 4), /*boundary*/
        0xbd => (Instruction::LDA, AbsoluteX, 4), /*boundary*/
        0xbe => (Instruction::LDX, AbsoluteY, 4), /*boundary*/
        0xc0 => (Instruction::CPY, Immediate, 2),
        0xc1 => (Instruction::CMP, IndirectX, 6),
        0xc4 => (Instruction::CPY, ZeroPage, 3),
        0xc5 => (Instruction::CMP, ZeroPage, 3),
        0xc6 => (Instruction::DEC, ZeroPage, 5),
        0xc8 => (Instruction::INY, Implicit, 2),
        0xc9 => (Instruction::CMP, Immediate, 2),
        0xca => (Instruction::DEX, Implicit, 2),
        0xcc => (Instruction::CPY, Absolute, 4),
        0xcd => (Instruction::CMP, Absolute, 4),
        0xce => (Instruction::DEC, Absolute, 6),
        0xd0 => (Instruction::BNE, Relative, 2),
        0xd1 => (Instruction::CMP, IndirectY, 5), /*boundary*/
        0xd5 => (Instruction::CMP, ZeroPageX, 4),
        0xd6 => (Instruction::DEC, ZeroPageX, 6),
        0xd8 => (Instruction::CLD, Implicit, 2),
        0xd9 => (Instruction::CMP, AbsoluteY, 4), /*boundary*/
        0xdd => (Instruction::CMP, AbsoluteX, 4), /*boundary*/
        0xde => (Instruction::DEC, AbsoluteX, 7),
        0xe0 => (Instruction::CPX, Immediate, 2),
        0xe1 => (Instruction::SBC, IndirectX, 6),
        0xe4 => (Instruction::CPX, ZeroPage, 3),
        0xe5 => (Instruction::SBC, ZeroPage, 3),
        0xe6 => (Instruction::INC, ZeroPage, 5),
        0xe8 => (Instruction::INX, Implicit, 2),
        0xe9 => (Instruction::SBC, Immediate, 2),
        0xea => (Instruction::NOP, Implicit, 2),
        0xeb => (Instruction::SBC, Immediate, 2), /* unofficial */
        0xec => (Instruction::CPX, Absolute, 4),
        0xed => (Instruction::SBC, Absolute, 4),
        0xee => (Instruction::INC, Absolute, 6),
        0xf0 => (Instruction::BEQ, Relative, 2),
        0xf1 => (Instruction::SBC, IndirectY, 5), /*boundary*/
        0xf5 => (Instruction::SBC, ZeroPageX, 4),
        0xf6 => (Instruction::INC, ZeroPageX, 6),
        0xf8 => (Instruction::SED, Implicit, 2),
        0xf9 => (Instruction::SBC, AbsoluteY, 4), /*boundary*/
        0xfd => (Instruction::SBC, AbsoluteX, 4), /*boundary*/
        0xfe => (Instruction::INC, AbsoluteX, 7),
        _ => return None,
    };

    /* SLO never advances the program counter: it faults before it could matter */
    let size = match instruction {
        Instruction::SLO => 0,
        _ => addr_mode.get_bytes(),
    };

    Some(RealizedInstruction {
        instruction,
        addr_mode,
        size,
        cycles,
    })
}

fn add_with_carry_and_update(cpu: &mut CPU, mem_val: u8, carry: u8) {
    let old_a = cpu.accumulator;

    let (result, carry) = add_with_carry_impl(old_a, mem_val, carry);

    cpu.accumulator = result;
    cpu.update_zero_neg_flags(result);
    cpu.update_flag(StatusFlag::Carry, carry);
    /* operands agreed on sign and the result does not */
    cpu.update_flag(
        StatusFlag::Overflow,
        (result ^ old_a) & (result ^ mem_val) & 0x80 != 0,
    );
}

fn add_with_carry_impl(a: u8, b: u8, carry: u8) -> (u8, bool) {
    let first_add_result = a.overflowing_add(b);
    let second_add_result = first_add_result.0.overflowing_add(carry);

    (
        second_add_result.0,
        first_add_result.1 || second_add_result.1,
    )
}
