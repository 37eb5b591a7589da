mod mapper_tests;

use crate::mapper::{load_mapper, Mapper, PAGE_SIZE, SIZE_1_KB};
use crate::rom::Rom;

/* every byte holds the index of the 1kb page it lives on, so reads tell us the mapping */
pub fn paged_data(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i / PAGE_SIZE) as u8).collect()
}

pub fn mapper_for_testing(mapper_id: u8, flags_6: u8, prg_kb: usize, chr_kb: usize) -> Box<dyn Mapper> {
    let image = Rom::image_for_testing(
        mapper_id,
        flags_6,
        &paged_data(prg_kb * SIZE_1_KB),
        &paged_data(chr_kb * SIZE_1_KB),
    );
    let rom = Rom::read_rom_data(&image).unwrap();
    load_mapper(&rom).unwrap()
}
