use log::trace;

/* buttons in the order the shift register reports them */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/**
 * The standard controller at 0x4016. The host sets which buttons are held; the CPU strobes
 * the port and then reads the buttons back one bit at a time.
 */
#[derive(Debug, Clone, Default)]
pub struct Controller {
    buttons: [bool; 8],
    strobe: bool,
    index: usize,
}

impl Controller {
    pub fn new() -> Controller {
        Controller::default()
    }

    /* bit n of `state` is button n, A in bit 0 */
    pub fn set_buttons(&mut self, state: u8) {
        for (i, button) in self.buttons.iter_mut().enumerate() {
            *button = state & (1 << i) != 0;
        }
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }

    pub fn buttons(&self) -> u8 {
        self.buttons
            .iter()
            .enumerate()
            .fold(0, |acc, (i, pressed)| acc | ((*pressed as u8) << i))
    }

    pub fn write(&mut self, value: u8) {
        self.strobe = value & 1 != 0;
        if self.strobe {
            self.index = 0;
        }
    }

    pub fn read(&mut self) -> u8 {
        if self.strobe {
            return self.buttons[Button::A.index()] as u8;
        }
        match self.buttons.get(self.index) {
            Some(pressed) => {
                self.index += 1;
                *pressed as u8
            }
            None => {
                trace!("Controller: read past the last button");
                1
            }
        }
    }
}
