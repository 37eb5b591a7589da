use crate::cpu::Instruction;
use thiserror::Error;

/* an unmapped graphics address can't be produced: every PPU access is reduced mod 0x4000 */
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("invalid cartridge image: {0}")]
    InvalidRom(String),

    #[error("unsupported mapper {0}")]
    UnknownMapper(u8),

    #[error("invalid opcode 0x{opcode:02x} at 0x{address:04x}")]
    InvalidOpcode { opcode: u8, address: u16 },

    #[error("no handler for instruction {0:?}")]
    UnimplementedOpcode(Instruction),

    #[error("invalid save state: {0}")]
    InvalidSaveState(String),

    #[error("save state encoding: {0}")]
    SaveStateEncoding(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
