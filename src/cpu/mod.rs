/* the 6502 core, its opcode table, and the CPU side of the memory map */
mod addressing_mode;
mod controller;
mod core_memory;
mod cpu;
mod instruction;
mod status_flag;

#[cfg(test)]
mod tests;

pub use addressing_mode::AddressingMode;
pub use controller::{Button, Controller};
pub use core_memory::{CoreMemory, SharedItems, RAM_SIZE, STACK_SIZE, ZERO_PAGE_SIZE};
pub use cpu::CPU;
pub use instruction::{from_opcode, Instruction, RealizedInstruction};
pub use status_flag::StatusFlag;

pub const INITIAL_PC_LOCATION: u16 = 0xfffc;
pub const NMI_HANDLER_LOCATION: u16 = 0xfffa;
pub const IRQ_HANDLER_LOCATION: u16 = 0xfffe;

/* status bits with no flag behind them, visible only on the stack */
pub(crate) const BREAK_FLAG: u8 = 1 << 4;
pub(crate) const UNUSED_FLAG: u8 = 1 << 5;

/* interrupt requests raised by the PPU or the cartridge, serviced by the CPU */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    NMI,
    IRQ,
}

/**
 * Converts a pair of bytes into a u16 to look up an address in memory.
 * The 6502 is little-endian, so this expects the low-order byte first.
 * addr(0xCD, 0xAB) returns 0xABCD.
 */
pub fn addr(lo_byte: u8, hi_byte: u8) -> u16 {
    ((hi_byte as u16) << 8) + (lo_byte as u16)
}

/**
 * Zero-page address operations take a single-byte and result in an
 * address on the first page of memory, which has addresses that begin
 * with 0x00. If this is passed in 0xAB, it returns 0x00AB. In effect this
 * is just a cast, but wrapping it as a function makes the goal clearer.
 */
fn zero_page_addr(b1: u8) -> u16 {
    b1 as u16
}
