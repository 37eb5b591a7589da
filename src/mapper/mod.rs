mod bank_memory;
mod mapper;
mod mmc1;
mod mmc3;
mod nrom;
mod uxrom;

#[cfg(test)]
mod tests;

pub use bank_memory::{BankMemory, PAGE_SIZE};
pub use mapper::{CartridgeMemory, Mapper, CHR_WINDOW_SIZE, PRG_WINDOW_SIZE, SRAM_SIZE};
pub use mmc1::MMC1;
pub use mmc3::MMC3;
pub use nrom::NROM;
pub use uxrom::UxROM;

use crate::error::EmulatorError;
use crate::rom::Rom;
use log::{error, info};

pub const SIZE_1_KB: usize = 1 << 10;
pub const SIZE_2_KB: usize = 1 << 11;
pub const SIZE_4_KB: usize = 1 << 12;
pub const SIZE_8_KB: usize = 1 << 13;
pub const SIZE_16_KB: usize = 1 << 14;
pub const SIZE_32_KB: usize = 1 << 15;

pub fn load_mapper(rom: &Rom) -> Result<Box<dyn Mapper>, EmulatorError> {
    let mapper: Box<dyn Mapper> = match rom.mapper_id {
        0 => Box::new(NROM::new(rom)),
        1 => Box::new(MMC1::new(rom)),
        2 => Box::new(UxROM::new(rom)),
        4 => Box::new(MMC3::new(rom)),
        mapper_id => {
            error!("Cartridge uses unsupported mapper {mapper_id}");
            return Err(EmulatorError::UnknownMapper(mapper_id));
        }
    };
    info!("Using mapper {} ({})", rom.mapper_id, mapper.name());
    Ok(mapper)
}
