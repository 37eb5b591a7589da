use crate::mapper::{CartridgeMemory, Mapper};
use crate::rom::Rom;
use log::warn;

/* no bank switching: 16kb images are mirrored into 0xc000 by the initial bank layout */
pub struct NROM {
    cartridge: CartridgeMemory,
}

impl NROM {
    pub fn new(rom: &Rom) -> NROM {
        NROM {
            cartridge: CartridgeMemory::new(rom),
        }
    }
}

impl Mapper for NROM {
    fn name(&self) -> &'static str {
        "NROM"
    }

    fn cartridge(&self) -> &CartridgeMemory {
        &self.cartridge
    }

    fn cartridge_mut(&mut self) -> &mut CartridgeMemory {
        &mut self.cartridge
    }

    fn write_register(&mut self, address: u16, value: u8) {
        warn!("NROM: ignoring write to PRG-ROM address 0x{address:04x} value 0x{value:02x}");
    }
}
