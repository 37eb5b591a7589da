use crate::cpu::{RAM_SIZE, STACK_SIZE, ZERO_PAGE_SIZE};
use crate::error::EmulatorError;
use crate::ppu::{FOUR_SCREEN_NAMETABLE_SIZE, NAMETABLE_SIZE, OAM_SIZE, PALETTE_SIZE};
use serde::{Deserialize, Serialize};

/**
 * The persisted part of a machine: CPU work RAM, split into zero page, stack page and the
 * rest, and the PPU's nametables, palette and OAM. Registers and mapper banking are not
 * included, so a state is only meaningful for the cartridge it was taken from.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub zero_page: Vec<u8>,
    pub stack: Vec<u8>,
    pub ram: Vec<u8>,
    pub nametable: Vec<u8>,
    pub palette: Vec<u8>,
    pub oam: Vec<u8>,
}

impl SaveState {
    pub fn to_bytes(&self) -> Result<Vec<u8>, EmulatorError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<SaveState, EmulatorError> {
        let state: SaveState = bincode::deserialize(bytes)?;
        state.validate()?;
        Ok(state)
    }

    /* the nametable can be either size, depending on the cartridge */
    pub fn validate(&self) -> Result<(), EmulatorError> {
        check_size("zero page", &self.zero_page, &[ZERO_PAGE_SIZE])?;
        check_size("stack", &self.stack, &[STACK_SIZE])?;
        check_size("RAM", &self.ram, &[RAM_SIZE - ZERO_PAGE_SIZE - STACK_SIZE])?;
        check_size(
            "nametable",
            &self.nametable,
            &[NAMETABLE_SIZE, FOUR_SCREEN_NAMETABLE_SIZE],
        )?;
        check_size("palette", &self.palette, &[PALETTE_SIZE])?;
        check_size("OAM", &self.oam, &[OAM_SIZE])
    }
}

fn check_size(name: &str, data: &[u8], sizes: &[usize]) -> Result<(), EmulatorError> {
    if sizes.contains(&data.len()) {
        Ok(())
    } else {
        Err(EmulatorError::InvalidSaveState(format!(
            "{name} is {} bytes, expected {sizes:?}",
            data.len()
        )))
    }
}
