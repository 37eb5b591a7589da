use crate::mapper::Mapper;
use crate::ppu::{FOUR_SCREEN_NAMETABLE_SIZE, NAMETABLE_SIZE, OAM_SIZE, PALETTE_SIZE};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NametableMirroring {
    Horizontal,       /* pages are mirrored horizontally (appropriate for vertical games) */
    Vertical,         /* pages are mirrored vertically (appropriate for horizontal games) */
    SingleNametable0, /* first nametable mirrored four times */
    SingleNametable1, /* second nametable mirrored four times */
    FourScreen,       /* all four nametable/attribute tables available */
}

impl NametableMirroring {
    /* which physical 1KB page each of the four logical nametables lands on */
    pub fn layout(&self) -> [usize; 4] {
        match self {
            NametableMirroring::Horizontal => [0, 0, 1, 1],
            NametableMirroring::Vertical => [0, 1, 0, 1],
            NametableMirroring::SingleNametable0 => [0, 0, 0, 0],
            NametableMirroring::SingleNametable1 => [1, 1, 1, 1],
            NametableMirroring::FourScreen => [0, 1, 2, 3],
        }
    }
}

/* CIRAM: 2KB on the board, 4KB when the cartridge supplies the other two pages */
#[derive(Debug, Clone)]
pub struct Nametable {
    data: Vec<u8>,
}

impl Nametable {
    pub fn new(mirroring: NametableMirroring) -> Nametable {
        let size = if mirroring == NametableMirroring::FourScreen {
            FOUR_SCREEN_NAMETABLE_SIZE
        } else {
            NAMETABLE_SIZE
        };
        Nametable { data: vec![0; size] }
    }

    fn resolve(&self, mirroring: NametableMirroring, address: u16) -> usize {
        let address = address as usize % 0x1000;
        let page = mirroring.layout()[address / 0x400];
        (page * 0x400 + address % 0x400) % self.data.len()
    }

    pub fn read(&self, mirroring: NametableMirroring, address: u16) -> u8 {
        self.data[self.resolve(mirroring, address)]
    }

    pub fn write(&mut self, mirroring: NametableMirroring, address: u16, value: u8) {
        let index = self.resolve(mirroring, address);
        self.data[index] = value;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug, Clone)]
pub struct PaletteTable {
    data: [u8; PALETTE_SIZE],
}

impl Default for PaletteTable {
    fn default() -> Self {
        PaletteTable { data: [0; PALETTE_SIZE] }
    }
}

impl PaletteTable {
    /* 0x10/0x14/0x18/0x1c are shared with the background entries below them */
    fn index(address: u16) -> usize {
        let index = address as usize % PALETTE_SIZE;
        if index >= 16 && index % 4 == 0 {
            index - 16
        } else {
            index
        }
    }

    pub fn read(&self, address: u16) -> u8 {
        self.data[PaletteTable::index(address)]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.data[PaletteTable::index(address)] = value;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/* Everything the PPU can address: pattern tables live on the cartridge,
 * nametables and palettes live here, as does OAM which has its own bus.
 */
#[derive(Debug, Clone)]
pub struct PPUMemory {
    pub(super) nametable: Nametable,
    pub(super) palette: PaletteTable,
    pub(super) oam: [u8; OAM_SIZE],
}

impl PPUMemory {
    pub fn new(mirroring: NametableMirroring) -> PPUMemory {
        PPUMemory {
            nametable: Nametable::new(mirroring),
            palette: PaletteTable::default(),
            oam: [0; OAM_SIZE],
        }
    }

    pub fn read(&self, mapper: &dyn Mapper, address: u16) -> u8 {
        let address = address % 0x4000;
        if address < 0x2000 {
            mapper.read(address)
        } else if address < 0x3f00 {
            self.nametable
                .read(mapper.get_nametable_mirroring(), address)
        } else {
            self.palette.read(address)
        }
    }

    pub fn write(&mut self, mapper: &mut dyn Mapper, address: u16, value: u8) {
        let address = address % 0x4000;
        if address < 0x2000 {
            mapper.write(address, value);
        } else if address < 0x3f00 {
            let mirroring = mapper.get_nametable_mirroring();
            self.nametable.write(mirroring, address, value);
        } else {
            self.palette.write(address, value);
        }
    }

    pub fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    pub fn nametable(&self) -> &[u8] {
        self.nametable.data()
    }

    pub fn palette(&self) -> &[u8] {
        self.palette.data()
    }

    pub fn flush(&mut self) {
        self.nametable.data.fill(0);
        self.palette.data.fill(0);
        self.oam.fill(0);
    }

    pub fn load(&mut self, nametable: &[u8], palette: &[u8], oam: &[u8]) -> bool {
        if nametable.len() != self.nametable.data.len()
            || palette.len() != PALETTE_SIZE
            || oam.len() != OAM_SIZE
        {
            warn!(
                "Refusing to restore PPU memory of sizes {}/{}/{}",
                nametable.len(),
                palette.len(),
                oam.len()
            );
            return false;
        }
        self.nametable.data.copy_from_slice(nametable);
        self.palette.data.copy_from_slice(palette);
        self.oam.copy_from_slice(oam);
        true
    }
}
