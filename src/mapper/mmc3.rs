use crate::mapper::{CartridgeMemory, Mapper, SIZE_1_KB, SIZE_2_KB, SIZE_8_KB};
use crate::ppu::NametableMirroring;
use crate::rom::Rom;
use log::debug;

/* R0-R5 select CHR banks (R0/R1 2kb, the rest 1kb), R6/R7 select 8kb PRG banks */
const INITIAL_BANK_REGISTERS: [u8; 8] = [0, 2, 4, 5, 6, 7, 0, 1];

/**
 * MMC3 (mapper 4): 8kb PRG and 1kb CHR switching, switchable mirroring and a scanline
 * counter that raises IRQs. The counter is clocked by the PPU once per rendered scanline,
 * so it never sees the sub-scanline A12 pulses real boards have to filter out.
 */
pub struct MMC3 {
    cartridge: CartridgeMemory,
    bank_select: u8, /* bits 0-2 register index, bit 6 PRG mode, bit 7 CHR inversion */
    bank_registers: [u8; 8],
    four_screen: bool,
    irq_latch: u8,
    irq_counter: u8,
    irq_reload: bool,
    irq_enabled: bool,
}

impl MMC3 {
    pub fn new(rom: &Rom) -> MMC3 {
        let cartridge = CartridgeMemory::new(rom);
        let four_screen = cartridge.mirroring == NametableMirroring::FourScreen;

        let mut result = MMC3 {
            cartridge,
            bank_select: 0,
            bank_registers: INITIAL_BANK_REGISTERS,
            four_screen,
            irq_latch: 0,
            irq_counter: 0,
            irq_reload: false,
            irq_enabled: false,
        };
        result.update_prg_banks();
        result.update_chr_banks();

        result
    }

    fn update_prg_banks(&mut self) {
        let bank_count = self.cartridge.prg_bank_count(SIZE_8_KB);
        let last = bank_count - 1;
        let second_last = last.saturating_sub(1);
        let r6 = (self.bank_registers[6] & 0x3f) as usize % bank_count;
        let r7 = (self.bank_registers[7] & 0x3f) as usize % bank_count;

        /* PRG mode 1 swaps the fixed second-to-last bank into 0x8000 and R6 into 0xc000 */
        let (bank_8000, bank_c000) = if self.bank_select & 0x40 == 0 {
            (r6, second_last)
        } else {
            (second_last, r6)
        };

        let prg = &mut self.cartridge.prg;
        prg.switch_bank(0x0000, 0x2000, bank_8000);
        prg.switch_bank(0x2000, 0x4000, r7);
        prg.switch_bank(0x4000, 0x6000, bank_c000);
        prg.switch_bank(0x6000, 0x8000, last);
    }

    fn update_chr_banks(&mut self) {
        let banks_1_kb = self.cartridge.chr_bank_count(SIZE_1_KB);
        let banks_2_kb = self.cartridge.chr_bank_count(SIZE_2_KB);
        let registers = self.bank_registers;
        let bank_1_kb = |register: usize| registers[register] as usize % banks_1_kb;
        /* the low bit of a 2kb register is ignored */
        let bank_2_kb = |register: usize| (registers[register] >> 1) as usize % banks_2_kb;

        /* CHR inversion swaps the 2kb half and the 1kb half */
        let (two_kb_base, one_kb_base) = if self.bank_select & 0x80 == 0 {
            (0x0000, 0x1000)
        } else {
            (0x1000, 0x0000)
        };

        let chr = &mut self.cartridge.chr;
        chr.switch_bank(two_kb_base, two_kb_base + 0x800, bank_2_kb(0));
        chr.switch_bank(two_kb_base + 0x800, two_kb_base + 0x1000, bank_2_kb(1));
        for register in 2..6 {
            let start = one_kb_base + (register - 2) * 0x400;
            chr.switch_bank(start, start + 0x400, bank_1_kb(register));
        }
    }

    fn write_bank_data(&mut self, value: u8) {
        let register = (self.bank_select & 0x7) as usize;
        self.bank_registers[register] = value;
        if register < 6 {
            self.update_chr_banks();
        } else {
            self.update_prg_banks();
        }
    }
}

impl Mapper for MMC3 {
    fn name(&self) -> &'static str {
        "MMC3"
    }

    fn cartridge(&self) -> &CartridgeMemory {
        &self.cartridge
    }

    fn cartridge_mut(&mut self) -> &mut CartridgeMemory {
        &mut self.cartridge
    }

    fn write_register(&mut self, address: u16, value: u8) {
        let even = address & 1 == 0;
        match (address, even) {
            (0x8000..=0x9fff, true) => {
                self.bank_select = value;
                self.update_prg_banks();
                self.update_chr_banks();
            }
            (0x8000..=0x9fff, false) => self.write_bank_data(value),
            (0xa000..=0xbfff, true) => {
                /* four-screen boards have hard-wired nametables */
                if !self.four_screen {
                    self.cartridge.mirroring = if value & 1 == 0 {
                        NametableMirroring::Vertical
                    } else {
                        NametableMirroring::Horizontal
                    };
                }
            }
            (0xa000..=0xbfff, false) => { /* PRG-RAM protect: accepted, not enforced */ }
            (0xc000..=0xdfff, true) => self.irq_latch = value,
            (0xc000..=0xdfff, false) => {
                self.irq_counter = 0;
                self.irq_reload = true;
            }
            (0xe000..=0xffff, true) => self.irq_enabled = false,
            (0xe000..=0xffff, false) => self.irq_enabled = true,
            _ => {}
        }
        debug!("MMC3: write 0x{address:04x} = 0x{value:02x}");
    }

    fn tick(&mut self) -> bool {
        if self.irq_counter == 0 || self.irq_reload {
            self.irq_counter = self.irq_latch;
            self.irq_reload = false;
        } else {
            self.irq_counter -= 1;
        }
        self.irq_counter == 0 && self.irq_enabled
    }
}
