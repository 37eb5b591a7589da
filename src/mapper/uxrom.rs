use crate::mapper::{CartridgeMemory, Mapper, SIZE_16_KB};
use crate::rom::Rom;
use log::debug;

pub struct UxROM {
    cartridge: CartridgeMemory,
}

impl UxROM {
    pub fn new(rom: &Rom) -> Self {
        UxROM {
            cartridge: CartridgeMemory::new(rom),
        }
    }
}

impl Mapper for UxROM {
    fn name(&self) -> &'static str {
        "UxROM"
    }

    fn cartridge(&self) -> &CartridgeMemory {
        &self.cartridge
    }

    fn cartridge_mut(&mut self) -> &mut CartridgeMemory {
        &mut self.cartridge
    }

    /* any write selects the 16kb bank at 0x8000; 0xc000 stays on the last bank */
    fn write_register(&mut self, _address: u16, value: u8) {
        let bank = (value & 0xf) as usize % self.cartridge.prg_bank_count(SIZE_16_KB);
        debug!("UxROM: PRG bank {bank} at 0x8000");
        self.cartridge.prg.switch_bank(0, 0x4000, bank);
    }
}
