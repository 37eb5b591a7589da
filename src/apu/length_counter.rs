const LENGTH_COUNTER_LOOKUP: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/* counts a note down to silence; the only channel state 0x4015 reports */
#[derive(Debug, Clone, Default)]
pub struct LengthCounter {
    count: u8,
    halt: bool,
    enabled: bool,
}

impl LengthCounter {
    pub fn new() -> LengthCounter {
        LengthCounter::default()
    }

    pub fn clock(&mut self) {
        if !self.halt && self.count != 0 {
            self.count -= 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    pub fn set_halt(&mut self, halt: bool) {
        self.halt = halt;
    }

    /* disabling a channel silences it at once */
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.count = 0;
        }
    }

    /* the top five bits of a channel's last register pick the length */
    pub fn set_lc(&mut self, data: u8) {
        if self.enabled {
            self.count = LENGTH_COUNTER_LOOKUP[(data >> 3) as usize];
        }
    }
}
