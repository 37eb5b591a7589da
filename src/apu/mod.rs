mod length_counter;
mod silent_apu;

#[cfg(test)]
mod tests;

pub use length_counter::LengthCounter;
pub use silent_apu::SilentAPU;

/**
 * The CPU's view of the audio hardware: writes to 0x4000-0x4017 (except the DMA and
 * controller ports), reads of the status register at 0x4015, and one tick per CPU cycle.
 */
pub trait AudioUnit: Send {
    fn read_status(&mut self) -> u8;

    fn write(&mut self, address: u16, value: u8);

    fn tick(&mut self) {}
}
