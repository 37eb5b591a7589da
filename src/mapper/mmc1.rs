use crate::mapper::{CartridgeMemory, Mapper, SIZE_16_KB, SIZE_32_KB, SIZE_4_KB, SIZE_8_KB};
use crate::ppu::NametableMirroring;
use crate::rom::Rom;
use log::debug;

const SHIFT_REGISTER_INITIAL_VAL: u8 = 1 << 4;
const INITIAL_CONTROL: u8 = 0x0c;

const MIRRORING_MODES: [NametableMirroring; 4] = [
    NametableMirroring::SingleNametable0,
    NametableMirroring::SingleNametable1,
    NametableMirroring::Vertical,
    NametableMirroring::Horizontal,
];

/* TODO only implements default MMC1 behavior, does not handle SEROM, SHROM, SH1ROM, etc. */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrgRomBankMode {
    Mode32Kb,         /* switch 32kb banks, ignoring low bit of bank number */
    Mode16KbFixLower, /* 16kb banks, 0x8000 fixed to first bank, switch 0xc000 */
    Mode16KbFixUpper, /* 16kb banks, switch 0x8000, 0xc000 fixed to last bank */
}

pub struct MMC1 {
    cartridge: CartridgeMemory,
    shift_register: u8,
    control: u8,
    prg_bank_mode: PrgRomBankMode,
}

impl MMC1 {
    pub fn new(rom: &Rom) -> MMC1 {
        let mut result = MMC1 {
            cartridge: CartridgeMemory::new(rom),
            shift_register: SHIFT_REGISTER_INITIAL_VAL,
            control: INITIAL_CONTROL,
            prg_bank_mode: PrgRomBankMode::Mode16KbFixUpper,
        };
        /* power-on state: 16kb PRG with the last bank fixed; mirroring from the header */
        let mirroring = result.cartridge.mirroring;
        result.write_control(INITIAL_CONTROL);
        result.cartridge.mirroring = mirroring;

        result
    }

    fn listen_for_state_change(&mut self, address: u16, value: u8) {
        /* a write with bit 7 set resets the shift register and locks the upper bank */
        if value & 0x80 != 0 {
            self.shift_register = SHIFT_REGISTER_INITIAL_VAL;
            self.write_control(self.control | 0x0c);
            return;
        }

        /* the shift register is full when the initial 1 has reached the end */
        let shift_register_full = self.shift_register & 1 != 0;

        /* shift it over, putting the lowest order bit from the write on it */
        self.shift_register >>= 1;
        self.shift_register |= (value & 1) << 4;

        /* if we're full, write to the register selected by where the fifth write
         * occurred, then empty the shift register
         */
        if shift_register_full {
            let register_value = self.shift_register;
            if address < 0xa000 {
                self.write_control(register_value);
            } else if address < 0xc000 {
                self.write_chr_bank_0(register_value);
            } else if address < 0xe000 {
                self.write_chr_bank_1(register_value);
            } else {
                /* TODO: bit 4 disables the PRG-RAM chip; we leave it enabled */
                self.write_prg_bank(register_value);
            }
            self.shift_register = SHIFT_REGISTER_INITIAL_VAL;
        }
    }

    /* takes effect on the next bank write, not immediately */
    fn write_control(&mut self, value: u8) {
        self.control = value;
        self.cartridge.mirroring = MIRRORING_MODES[(value & 3) as usize];
        /* bits 2 and 3: PRG-ROM bank mode */
        self.prg_bank_mode = match (value >> 2) & 3 {
            2 => PrgRomBankMode::Mode16KbFixLower,
            3 => PrgRomBankMode::Mode16KbFixUpper,
            _ => PrgRomBankMode::Mode32Kb, /* 0 or 1 */
        };
        self.cartridge.prg.fixed = self.prg_bank_mode == PrgRomBankMode::Mode32Kb;
        /* bit 4: CHR-ROM bank mode: 0 == switch 8kb, 1 == switch two 4kb banks */
        self.cartridge.chr.fixed = value & 0x10 == 0;
        debug!(
            "MMC1: control 0x{value:02x}, {:?}, {:?}, chr 8kb: {}",
            self.cartridge.mirroring, self.prg_bank_mode, self.cartridge.chr.fixed
        );
    }

    fn write_chr_bank_0(&mut self, value: u8) {
        let chr = &mut self.cartridge.chr;
        if chr.fixed {
            /* low bit ignored in 8kb mode */
            let bank = (value >> 1) as usize % chr.bank_count(SIZE_8_KB);
            chr.switch_bank(0, 0x2000, bank);
        } else {
            let bank = value as usize % chr.bank_count(SIZE_4_KB);
            chr.switch_bank(0, 0x1000, bank);
        }
    }

    fn write_chr_bank_1(&mut self, value: u8) {
        let chr = &mut self.cartridge.chr;
        if !chr.fixed {
            let bank = value as usize % chr.bank_count(SIZE_4_KB);
            chr.switch_bank(0x1000, 0x2000, bank);
        }
    }

    fn write_prg_bank(&mut self, value: u8) {
        let value = (value & 0xf) as usize;
        let banks_16_kb = self.cartridge.prg_bank_count(SIZE_16_KB);
        let prg = &mut self.cartridge.prg;
        match self.prg_bank_mode {
            PrgRomBankMode::Mode32Kb => {
                /* first bit ignored in 32kb mode */
                let bank = (value >> 1) % prg.bank_count(SIZE_32_KB);
                prg.switch_bank(0, 0x8000, bank);
            }
            PrgRomBankMode::Mode16KbFixLower => {
                prg.switch_bank(0, 0x4000, 0);
                prg.switch_bank(0x4000, 0x8000, value % banks_16_kb);
            }
            PrgRomBankMode::Mode16KbFixUpper => {
                prg.switch_bank(0, 0x4000, value % banks_16_kb);
                prg.switch_bank(0x4000, 0x8000, banks_16_kb - 1);
            }
        }
    }
}

impl Mapper for MMC1 {
    fn name(&self) -> &'static str {
        "MMC1"
    }

    fn cartridge(&self) -> &CartridgeMemory {
        &self.cartridge
    }

    fn cartridge_mut(&mut self) -> &mut CartridgeMemory {
        &mut self.cartridge
    }

    fn write_register(&mut self, address: u16, value: u8) {
        self.listen_for_state_change(address, value);
    }
}
