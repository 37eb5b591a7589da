use crate::cpu::{addr, zero_page_addr, SharedItems, CPU};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

fn crosses_page(base: u16, address: u16) -> bool {
    base & 0xff00 != address & 0xff00
}

impl AddressingMode {
    /**
     * Computes the effective address for an instruction whose opcode sits at the program
     * counter, given its operand bytes. Indexed modes that cross a page latch
     * `page_crossed` on the CPU; the instruction decides whether that costs a cycle.
     *
     * behavior based on: https://www.nesdev.org/obelisk-6502-guide/addressing.html
     */
    pub fn resolve_address(&self, cpu: &mut CPU, bus: &mut SharedItems, byte1: u8, byte2: u8) -> u16 {
        match self {
            /* no address; instructions using these never look one up */
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            /* the operand byte itself */
            AddressingMode::Immediate => cpu.program_counter.wrapping_add(1),
            AddressingMode::ZeroPage => zero_page_addr(byte1),
            AddressingMode::ZeroPageX => zero_page_addr(byte1.wrapping_add(cpu.index_x)),
            AddressingMode::ZeroPageY => zero_page_addr(byte1.wrapping_add(cpu.index_y)),
            /* relative to the instruction that follows the branch */
            AddressingMode::Relative => cpu
                .program_counter
                .wrapping_add(2)
                .wrapping_add_signed(byte1 as i8 as i16),
            AddressingMode::Absolute => addr(byte1, byte2),
            AddressingMode::AbsoluteX => {
                let index = cpu.index_x;
                Self::indexed(cpu, addr(byte1, byte2), index)
            }
            AddressingMode::AbsoluteY => {
                let index = cpu.index_y;
                Self::indexed(cpu, addr(byte1, byte2), index)
            }
            /* only used for JMP; the pointer never leaves its page */
            AddressingMode::Indirect => cpu.read16_indirect(bus, addr(byte1, byte2)),
            AddressingMode::IndirectX => {
                let pointer = zero_page_addr(byte1.wrapping_add(cpu.index_x));
                cpu.read16_indirect(bus, pointer)
            }
            AddressingMode::IndirectY => {
                let base = cpu.read16_indirect(bus, zero_page_addr(byte1));
                let index = cpu.index_y;
                Self::indexed(cpu, base, index)
            }
        }
    }

    fn indexed(cpu: &mut CPU, base: u16, index: u8) -> u16 {
        let address = base.wrapping_add(index as u16);
        if crosses_page(base, address) {
            cpu.page_crossed = true;
        }
        address
    }

    pub fn deref(&self, cpu: &mut CPU, bus: &mut SharedItems, address: u16) -> u8 {
        match self {
            AddressingMode::Accumulator => cpu.accumulator,
            _ => cpu.read(bus, address),
        }
    }

    /* as deref, but charges a cycle if resolving the address crossed a page */
    pub fn deref_check_boundary_cross(
        &self,
        cpu: &mut CPU,
        bus: &mut SharedItems,
        address: u16,
        extra_cycles: &mut u16,
    ) -> u8 {
        if cpu.page_crossed {
            *extra_cycles += 1;
        }
        self.deref(cpu, bus, address)
    }

    pub fn write(&self, cpu: &mut CPU, bus: &mut SharedItems, address: u16, new_val: u8) {
        match self {
            AddressingMode::Accumulator => cpu.accumulator = new_val,
            _ => cpu.write(bus, address, new_val),
        }
    }

    /* bytes taken by an instruction in this mode, opcode included */
    pub fn get_bytes(&self) -> u16 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }
}
