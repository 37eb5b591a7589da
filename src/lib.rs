pub mod apu;
pub mod console;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod ppu;
pub mod rom;
pub mod save_state;

pub use console::Console;
pub use error::EmulatorError;
pub use rom::Rom;
