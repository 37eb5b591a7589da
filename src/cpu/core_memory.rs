use crate::apu::AudioUnit;
use crate::cpu::Controller;
use crate::mapper::Mapper;
use crate::ppu::PPU;
use log::trace;

pub const RAM_SIZE: usize = 0x800;
pub const ZERO_PAGE_SIZE: usize = 0x100;
pub const STACK_SIZE: usize = 0x100;

/**
 * Everything on the CPU bus besides its own RAM, borrowed from the console for the
 * duration of one CPU tick.
 */
pub struct SharedItems<'a> {
    pub ppu: &'a mut PPU,
    pub apu: &'a mut dyn AudioUnit,
    pub controller: &'a mut Controller,
    pub mapper: &'a mut dyn Mapper,
}

/**
 * The 2 KB of work RAM, and the dispatch of the rest of the 16-bit address space to the
 * hardware that answers it. OAM DMA at 0x4014 is left to the CPU, which has to do the
 * copying and stall for it.
 */
pub struct CoreMemory {
    memory: Box<[u8; RAM_SIZE]>,
}

impl Default for CoreMemory {
    fn default() -> Self {
        CoreMemory::new()
    }
}

impl CoreMemory {
    pub fn new() -> CoreMemory {
        CoreMemory {
            memory: Box::new([0xff; RAM_SIZE]),
        }
    }

    pub fn read(&self, shared_items: &mut SharedItems, address: u16) -> u8 {
        match address {
            0x0000..=0x1fff => self.read_ram(address),
            /* ppu registers, mirrored every 8 bytes */
            0x2000..=0x3fff => shared_items
                .ppu
                .read_register(map_ppu_register(address), shared_items.mapper),
            0x4014 => shared_items.ppu.read_register(address, shared_items.mapper),
            0x4015 => shared_items.apu.read_status(),
            0x4016 => shared_items.controller.read(),
            /* second controller port */
            0x4017 => 0,
            0x4000..=0x5fff => {
                trace!("Read from unmapped I/O address 0x{address:04x}");
                0
            }
            _ => shared_items.mapper.read(address),
        }
    }

    pub fn write(&mut self, shared_items: &mut SharedItems, address: u16, value: u8) {
        match address {
            0x0000..=0x1fff => self.write_ram(address, value),
            0x2000..=0x3fff => {
                shared_items
                    .ppu
                    .write_register(map_ppu_register(address), value, shared_items.mapper)
            }
            0x4016 => shared_items.controller.write(value),
            0x4000..=0x4017 => shared_items.apu.write(address, value),
            0x4018..=0x5fff => {
                trace!("Write 0x{value:02x} to unmapped I/O address 0x{address:04x}")
            }
            _ => shared_items.mapper.write(address, value),
        }
    }

    pub fn read_ram(&self, address: u16) -> u8 {
        self.memory[address as usize % RAM_SIZE]
    }

    pub fn write_ram(&mut self, address: u16, value: u8) {
        self.memory[address as usize % RAM_SIZE] = value;
    }

    /* zero page, stack page, and the rest, as saved */
    pub fn save(&self) -> [Vec<u8>; 3] {
        let (zero_page, rest) = self.memory.split_at(ZERO_PAGE_SIZE);
        let (stack, ram) = rest.split_at(STACK_SIZE);
        [zero_page.to_vec(), stack.to_vec(), ram.to_vec()]
    }

    /* false, leaving memory untouched, if any piece is the wrong size */
    pub fn load(&mut self, zero_page: &[u8], stack: &[u8], ram: &[u8]) -> bool {
        if zero_page.len() != ZERO_PAGE_SIZE
            || stack.len() != STACK_SIZE
            || ram.len() != RAM_SIZE - ZERO_PAGE_SIZE - STACK_SIZE
        {
            return false;
        }
        let (zero_page_dest, rest) = self.memory.split_at_mut(ZERO_PAGE_SIZE);
        let (stack_dest, ram_dest) = rest.split_at_mut(STACK_SIZE);
        zero_page_dest.copy_from_slice(zero_page);
        stack_dest.copy_from_slice(stack);
        ram_dest.copy_from_slice(ram);
        true
    }
}

fn map_ppu_register(address: u16) -> u16 {
    0x2000 | (address & 0x7)
}
