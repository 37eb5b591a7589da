use crate::apu::{AudioUnit, SilentAPU};
use crate::cpu::{Controller, Interrupt, SharedItems, CPU};
use crate::error::EmulatorError;
use crate::mapper::{load_mapper, Mapper};
use crate::ppu::{FrameBuffers, RenderingMode, CYCLES_PER_SCANLINE, PPU, SCANLINES_PER_FRAME};
use crate::rom::Rom;
use crate::save_state::SaveState;
use log::{debug, info};

#[cfg(test)]
mod tests;

const PPU_TICKS_PER_CPU_CYCLE: u16 = 3;
/* rounded up, so a full frame always fits */
const CPU_CYCLES_PER_FRAME: u64 =
    (CYCLES_PER_SCANLINE as u64 * SCANLINES_PER_FRAME as u64) / PPU_TICKS_PER_CPU_CYCLE as u64 + 1;

/**
 * A whole machine: CPU, PPU, audio unit, first controller and the cartridge. Owns every
 * component and hands the CPU a borrowed view of the rest on each step, so nothing is
 * shared or reference counted.
 */
pub struct Console {
    cpu: CPU,
    ppu: PPU,
    apu: Box<dyn AudioUnit>,
    controller: Controller,
    mapper: Box<dyn Mapper>,
}

impl Console {
    pub fn new(rom: &Rom) -> Result<Console, EmulatorError> {
        Console::with_audio(rom, Box::new(SilentAPU::new()))
    }

    pub fn with_audio(rom: &Rom, apu: Box<dyn AudioUnit>) -> Result<Console, EmulatorError> {
        let mapper = load_mapper(rom)?;
        let mut console = Console {
            cpu: CPU::new(),
            ppu: PPU::new(mapper.get_nametable_mirroring()),
            apu,
            controller: Controller::new(),
            mapper,
        };
        console.reset();
        Ok(console)
    }

    pub fn from_file(path: &str) -> Result<Console, EmulatorError> {
        let rom = Rom::parse_file(path)?;
        Console::new(&rom)
    }

    /* swaps the cartridge; everything but the audio unit starts over */
    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), EmulatorError> {
        let mapper = load_mapper(rom)?;
        let rendering_mode = self.ppu.rendering_mode();
        self.ppu = PPU::new(mapper.get_nametable_mirroring());
        self.ppu.set_rendering_mode(rendering_mode);
        self.mapper = mapper;
        self.cpu = CPU::new();
        self.controller = Controller::new();
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.ppu.reset();
        let (cpu, mut bus) = self.split();
        cpu.reset(&mut bus);
        debug!("Console: reset");
    }

    /**
     * Runs one CPU tick, then the audio unit once and the PPU three times for every cycle
     * it took. Interrupts the PPU raises are queued on the CPU for its next tick. Returns
     * the CPU cycles consumed.
     */
    pub fn step(&mut self) -> Result<u16, EmulatorError> {
        let (cpu, mut bus) = self.split();
        let cycles = cpu.tick(&mut bus)?;

        for _ in 0..cycles {
            self.apu.tick();
        }

        for _ in 0..cycles * PPU_TICKS_PER_CPU_CYCLE {
            match self.ppu.tick(self.mapper.as_mut()) {
                Some(Interrupt::NMI) => self.cpu.trigger_nmi(),
                Some(Interrupt::IRQ) => self.cpu.trigger_irq(),
                None => {}
            }
        }

        Ok(cycles)
    }

    /**
     * Steps until the PPU has a frame ready. Returns false if a frame's worth of CPU time
     * went by without one, which is what happens while rendering is off. A frame that has
     * not been acknowledged yet counts as ready.
     */
    pub fn run_frame(&mut self) -> Result<bool, EmulatorError> {
        let mut elapsed = 0u64;
        while !self.ppu.frame_ready() {
            if elapsed >= CPU_CYCLES_PER_FRAME {
                return Ok(false);
            }
            elapsed += self.step()? as u64;
        }
        Ok(true)
    }

    pub fn frame(&self) -> &FrameBuffers {
        self.ppu.frame()
    }

    pub fn acknowledge_frame(&mut self) {
        self.ppu.acknowledge_frame();
    }

    pub fn set_rendering_mode(&mut self, mode: RenderingMode) {
        self.ppu.set_rendering_mode(mode);
    }

    /* pattern tables 0 and 1 as 128x128 RGBA images */
    pub fn pattern_tables(&self) -> [Vec<u8>; 2] {
        self.ppu.pattern_tables(self.mapper.as_ref())
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    pub fn ppu(&self) -> &PPU {
        &self.ppu
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    /* battery-backed save RAM, None if the cartridge has no battery */
    pub fn save_data(&self) -> Option<Vec<u8>> {
        self.mapper.get_save_data()
    }

    pub fn load_save_data(&mut self, data: &[u8]) {
        self.mapper.set_save_data(data);
    }

    pub fn save_state(&self) -> SaveState {
        let [zero_page, stack, ram] = self.cpu.ram().save();
        let memory = self.ppu.memory();
        SaveState {
            zero_page,
            stack,
            ram,
            nametable: memory.nametable().to_vec(),
            palette: memory.palette().to_vec(),
            oam: memory.oam().to_vec(),
        }
    }

    /* all or nothing: a state that doesn't fit this machine leaves it untouched */
    pub fn load_state(&mut self, state: &SaveState) -> Result<(), EmulatorError> {
        state.validate()?;
        let nametable_size = self.ppu.memory().nametable().len();
        if state.nametable.len() != nametable_size {
            return Err(EmulatorError::InvalidSaveState(format!(
                "nametable is {} bytes, this cartridge has {nametable_size}",
                state.nametable.len()
            )));
        }

        let restored = self
            .cpu
            .ram_mut()
            .load(&state.zero_page, &state.stack, &state.ram)
            && self
                .ppu
                .memory_mut()
                .load(&state.nametable, &state.palette, &state.oam);
        if !restored {
            return Err(EmulatorError::InvalidSaveState(String::from(
                "memory sizes do not match",
            )));
        }
        info!("Restored save state");
        Ok(())
    }

    /* the CPU, and a bus over everything else */
    fn split(&mut self) -> (&mut CPU, SharedItems<'_>) {
        (
            &mut self.cpu,
            SharedItems {
                ppu: &mut self.ppu,
                apu: self.apu.as_mut(),
                controller: &mut self.controller,
                mapper: self.mapper.as_mut(),
            },
        )
    }
}
