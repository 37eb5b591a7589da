use crate::apu::{AudioUnit, LengthCounter};
use log::trace;

/* CPU cycles between frame-counter half-frame clocks, 4-step NTSC sequence */
const HALF_FRAME_CYCLES: u16 = 7457;

const PULSE_1_FIRST_ADDR: u16 = 0x4000;
const PULSE_2_FIRST_ADDR: u16 = 0x4004;
const TRIANGLE_FIRST_ADDR: u16 = 0x4008;
const NOISE_FIRST_ADDR: u16 = 0x400c;
const STATUS_ADDR: u16 = 0x4015;
const FRAME_COUNTER_ADDR: u16 = 0x4017;

/**
 * An APU that makes no sound but keeps the channel length counters, so software polling
 * 0x4015 sees notes start and finish.
 */
#[derive(Debug, Clone, Default)]
pub struct SilentAPU {
    apu_counter: u16,
    /* pulse 1, pulse 2, triangle, noise */
    length_counters: [LengthCounter; 4],
}

impl SilentAPU {
    pub fn new() -> SilentAPU {
        SilentAPU::default()
    }

    fn channel(address: u16) -> Option<usize> {
        match address {
            PULSE_1_FIRST_ADDR..=0x4003 => Some(0),
            PULSE_2_FIRST_ADDR..=0x4007 => Some(1),
            TRIANGLE_FIRST_ADDR..=0x400b => Some(2),
            NOISE_FIRST_ADDR..=0x400f => Some(3),
            _ => None,
        }
    }

    fn clock_half_frame(&mut self) {
        for counter in self.length_counters.iter_mut() {
            counter.clock();
        }
    }
}

impl AudioUnit for SilentAPU {
    fn read_status(&mut self) -> u8 {
        self.length_counters
            .iter()
            .enumerate()
            .fold(0, |acc, (i, counter)| acc | ((counter.is_active() as u8) << i))
    }

    fn write(&mut self, address: u16, value: u8) {
        match (address, Self::channel(address)) {
            (STATUS_ADDR, _) => {
                for (i, counter) in self.length_counters.iter_mut().enumerate() {
                    counter.set_enabled(value & (1 << i) != 0);
                }
            }
            /* restarts the sequence; frame IRQs are not generated */
            (FRAME_COUNTER_ADDR, _) => self.apu_counter = 0,
            (_, Some(channel)) => match address % 4 {
                /* the triangle keeps its halt flag in bit 7, the others in bit 5 */
                0 if channel == 2 => self.length_counters[channel].set_halt(value & 0x80 != 0),
                0 => self.length_counters[channel].set_halt(value & 0x20 != 0),
                3 => self.length_counters[channel].set_lc(value),
                _ => {}
            },
            _ => trace!("APU: ignoring write 0x{value:02x} to 0x{address:04x}"),
        }
    }

    fn tick(&mut self) {
        self.apu_counter += 1;
        if self.apu_counter == HALF_FRAME_CYCLES || self.apu_counter == 2 * HALF_FRAME_CYCLES {
            self.clock_half_frame();
        }
        if self.apu_counter == 2 * HALF_FRAME_CYCLES {
            self.apu_counter = 0;
        }
    }
}
