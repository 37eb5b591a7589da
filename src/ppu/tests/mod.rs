mod render_tests;

use crate::mapper::{load_mapper, Mapper};
use crate::ppu::PPU;
use crate::rom::{Rom, PRG_BANK_SIZE};

/* NROM with 8kb of CHR RAM, so tests can put their own tiles in the pattern tables */
pub fn mapper_for_testing(flags_6: u8) -> Box<dyn Mapper> {
    let image = Rom::image_for_testing(0, flags_6, &vec![0; PRG_BANK_SIZE], &[]);
    let rom = Rom::read_rom_data(&image).unwrap();
    load_mapper(&rom).unwrap()
}

pub fn ppu_for_testing(mapper: &dyn Mapper) -> PPU {
    PPU::new(mapper.get_nametable_mirroring())
}

pub fn set_address(ppu: &mut PPU, mapper: &mut dyn Mapper, address: u16) {
    ppu.write_register(0x2006, (address >> 8) as u8, mapper);
    ppu.write_register(0x2006, address as u8, mapper);
}

pub fn write_vram(ppu: &mut PPU, mapper: &mut dyn Mapper, address: u16, data: &[u8]) {
    set_address(ppu, mapper, address);
    for value in data {
        ppu.write_register(0x2007, *value, mapper);
    }
}

/* runs until the pre-render line after a complete frame has been drawn */
pub fn render_frame(ppu: &mut PPU, mapper: &mut dyn Mapper) {
    while ppu.scanline() != 0 {
        ppu.tick(mapper);
    }
    ppu.acknowledge_frame();
    while !ppu.frame_ready() {
        ppu.tick(mapper);
    }
}

pub fn pixel(buffer: &[u8], x: usize, y: usize) -> [u8; 4] {
    let index = 4 * (y * 256 + x);
    [buffer[index], buffer[index + 1], buffer[index + 2], buffer[index + 3]]
}
