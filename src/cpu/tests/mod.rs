use crate::apu::SilentAPU;
use crate::cpu::tests::test_mapper::TestMapper;
use crate::cpu::{Controller, SharedItems, CPU};
use crate::ppu::{NametableMirroring, PPU};

mod opcode_table_tests;

pub const PROGRAM_START: u16 = 0x8000;

/* a CPU wired to a real PPU, controller and silent APU, over a writable test cartridge */
pub struct TestSystem {
    pub cpu: CPU,
    pub ppu: PPU,
    pub apu: SilentAPU,
    pub controller: Controller,
    pub mapper: TestMapper,
}

impl TestSystem {
    pub fn new() -> TestSystem {
        TestSystem {
            cpu: CPU::new(),
            ppu: PPU::new(NametableMirroring::Horizontal),
            apu: SilentAPU::new(),
            controller: Controller::new(),
            mapper: TestMapper::new(),
        }
    }

    /* the CPU, and a bus over everything else */
    pub fn split(&mut self) -> (&mut CPU, SharedItems<'_>) {
        (
            &mut self.cpu,
            SharedItems {
                ppu: &mut self.ppu,
                apu: &mut self.apu,
                controller: &mut self.controller,
                mapper: &mut self.mapper,
            },
        )
    }

    pub fn write_mem(&mut self, address: u16, value: u8) {
        let (cpu, mut bus) = self.split();
        cpu.write(&mut bus, address, value);
    }

    pub fn read_mem(&mut self, address: u16) -> u8 {
        let (cpu, mut bus) = self.split();
        cpu.read(&mut bus, address)
    }

    pub fn write_slice(&mut self, address: u16, data: &[u8]) {
        for (i, value) in data.iter().enumerate() {
            self.write_mem(address.wrapping_add(i as u16), *value);
        }
    }

    /* places a program at PROGRAM_START and resets into it */
    pub fn load_program(&mut self, program: &[u8]) {
        self.write_slice(PROGRAM_START, program);
        self.write_slice(0xfffc, &[0x00, 0x80]);
        let (cpu, mut bus) = self.split();
        cpu.reset(&mut bus);
    }

    pub fn step(&mut self) -> u16 {
        let (cpu, mut bus) = self.split();
        cpu.tick(&mut bus).unwrap()
    }
}

pub fn system_for_testing() -> TestSystem {
    TestSystem::new()
}
