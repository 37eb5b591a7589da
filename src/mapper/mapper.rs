use crate::mapper::{BankMemory, SIZE_16_KB};
use crate::ppu::NametableMirroring;
use crate::rom::Rom;
use log::trace;

pub const PRG_WINDOW_SIZE: usize = 0x8000;
pub const CHR_WINDOW_SIZE: usize = 0x2000;
pub const SRAM_SIZE: usize = 0x2000;

/**
 * The storage every cartridge board carries: switchable PRG and CHR windows, 8kb of
 * save RAM at 0x6000, and the current nametable mirroring.
 */
pub struct CartridgeMemory {
    pub prg: BankMemory,
    pub chr: BankMemory,
    pub sram: Vec<u8>,
    pub mirroring: NametableMirroring,
    has_battery: bool,
    chr_is_ram: bool,
}

impl CartridgeMemory {
    pub fn new(rom: &Rom) -> CartridgeMemory {
        let mut prg = BankMemory::new(rom.prg_data.clone(), PRG_WINDOW_SIZE, false);
        let chr = BankMemory::new(rom.chr_data.clone(), CHR_WINDOW_SIZE, true);

        /* 0xc000-0xffff starts out on the last 16kb bank */
        let last_bank = prg.bank_count(SIZE_16_KB) - 1;
        prg.switch_bank(0x4000, 0x8000, last_bank);

        CartridgeMemory {
            prg,
            chr,
            sram: vec![0xff; SRAM_SIZE],
            mirroring: rom.mirroring,
            has_battery: rom.has_battery,
            chr_is_ram: rom.chr_is_ram,
        }
    }

    pub fn read(&self, address: u16) -> u8 {
        if address < 0x2000 {
            self.chr.read(address)
        } else if address < 0x6000 {
            trace!("Cartridge read from unmapped address 0x{address:04x}");
            0
        } else if address < 0x8000 {
            self.sram[(address - 0x6000) as usize]
        } else {
            self.prg.read(address - 0x8000)
        }
    }

    /* only covers CHR and save RAM; writes to ROM space are register writes for the board */
    pub fn write(&mut self, address: u16, value: u8) {
        if address < 0x2000 {
            if self.chr_is_ram {
                self.chr.write(address, value);
            } else {
                trace!("Cartridge ignoring CHR-ROM write 0x{address:04x} value 0x{value:02x}");
            }
        } else if address < 0x6000 {
            trace!("Cartridge write to unmapped address 0x{address:04x} value 0x{value:02x}");
        } else if address < 0x8000 {
            self.sram[(address - 0x6000) as usize] = value;
        } else {
            trace!("Cartridge ignoring PRG-ROM write 0x{address:04x} value 0x{value:02x}");
        }
    }

    pub fn has_battery(&self) -> bool {
        self.has_battery
    }

    pub fn chr_is_ram(&self) -> bool {
        self.chr_is_ram
    }

    pub fn prg_bank_count(&self, bank_size: usize) -> usize {
        self.prg.bank_count(bank_size)
    }

    pub fn chr_bank_count(&self, bank_size: usize) -> usize {
        self.chr.bank_count(bank_size)
    }
}

/**
 * A cartridge board. Boards differ only in how they react to writes to 0x8000-0xffff
 * and whether they count scanlines; storage is shared through CartridgeMemory.
 */
pub trait Mapper: Send {
    fn name(&self) -> &'static str;

    fn cartridge(&self) -> &CartridgeMemory;

    fn cartridge_mut(&mut self) -> &mut CartridgeMemory;

    /* a CPU write at or above 0x8000 */
    fn write_register(&mut self, address: u16, value: u8);

    fn read(&self, address: u16) -> u8 {
        self.cartridge().read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        if address < 0x8000 {
            self.cartridge_mut().write(address, value);
        } else {
            self.write_register(address, value);
        }
    }

    /**
     * Clocked by the PPU once per rendered scanline. Returns true to request an IRQ.
     */
    fn tick(&mut self) -> bool {
        false
    }

    fn get_nametable_mirroring(&self) -> NametableMirroring {
        self.cartridge().mirroring
    }

    /**
     * Returns the current value of the data that would be saved in RAM, if it exists,
     * or None if this cartridge has no battery.
     */
    fn get_save_data(&self) -> Option<Vec<u8>> {
        let cartridge = self.cartridge();
        if cartridge.has_battery() {
            Some(cartridge.sram.clone())
        } else {
            None
        }
    }

    /**
     * Sets the current save RAM data. If the cartridge has no battery, this has no effect.
     */
    fn set_save_data(&mut self, data: &[u8]) {
        let cartridge = self.cartridge_mut();
        if cartridge.has_battery() {
            let len = data.len().min(cartridge.sram.len());
            cartridge.sram[..len].copy_from_slice(&data[..len]);
        }
    }
}
