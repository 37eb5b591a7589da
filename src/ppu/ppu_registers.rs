#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PPURegister {
    PPUCTRL,
    PPUMASK,
    PPUSTATUS,
    OAMADDR,
    OAMDATA,
    PPUSCROLL,
    PPUADDR,
    PPUDATA,
    OAMDMA,
}

impl PPURegister {
    pub fn from_addr(addr: u16) -> Option<PPURegister> {
        match addr {
            0x2000 => Some(PPURegister::PPUCTRL),
            0x2001 => Some(PPURegister::PPUMASK),
            0x2002 => Some(PPURegister::PPUSTATUS),
            0x2003 => Some(PPURegister::OAMADDR),
            0x2004 => Some(PPURegister::OAMDATA),
            0x2005 => Some(PPURegister::PPUSCROLL),
            0x2006 => Some(PPURegister::PPUADDR),
            0x2007 => Some(PPURegister::PPUDATA),
            0x4014 => Some(PPURegister::OAMDMA),
            _ => None,
        }
    }
}

/* PPUCTRL (0x2000), decoded */
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PPUControl {
    pub nametable: u8,
    pub increment_32: bool,
    pub sprite_table: u16,
    pub background_table: u16,
    pub tall_sprites: bool, /* if true, sprites are 16 pixels tall instead of 8 */
    pub master_slave: bool,
    pub nmi_output: bool,
}

impl From<u8> for PPUControl {
    fn from(value: u8) -> Self {
        PPUControl {
            nametable: value & 3,
            increment_32: value & 0x04 != 0,
            sprite_table: ((value >> 3) & 1) as u16,
            background_table: ((value >> 4) & 1) as u16,
            tall_sprites: value & 0x20 != 0,
            master_slave: value & 0x40 != 0,
            nmi_output: value & 0x80 != 0,
        }
    }
}

impl PPUControl {
    pub fn vram_increment(&self) -> u16 {
        if self.increment_32 {
            32
        } else {
            1
        }
    }

    pub fn sprite_height(&self) -> u8 {
        if self.tall_sprites {
            16
        } else {
            8
        }
    }
}

/* PPUMASK (0x2001), decoded */
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PPUMask {
    pub grayscale: bool,
    pub show_left_background: bool,
    pub show_left_sprites: bool,
    pub show_background: bool,
    pub show_sprites: bool,
    pub tint: u8, /* emphasis bits; stored, not rendered */
}

impl From<u8> for PPUMask {
    fn from(value: u8) -> Self {
        PPUMask {
            grayscale: value & 0x01 != 0,
            show_left_background: value & 0x02 != 0,
            show_left_sprites: value & 0x04 != 0,
            show_background: value & 0x08 != 0,
            show_sprites: value & 0x10 != 0,
            tint: value >> 5,
        }
    }
}

impl PPUMask {
    pub fn rendering_enabled(&self) -> bool {
        self.show_background || self.show_sprites
    }
}
