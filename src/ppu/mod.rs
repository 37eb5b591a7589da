mod frame;
mod palette;
mod ppu;
mod ppu_internal_registers;
mod ppu_memory;
mod ppu_registers;
mod ppu_timing;
mod sprite_info;
mod tile;

#[cfg(test)]
mod tests;

pub use frame::{FrameBuffers, RenderingMode};
pub use palette::{hue_lookup, COLORS};
pub use ppu::PPU;
pub use ppu_internal_registers::PPUInternalRegisters;
pub use ppu_memory::{Nametable, NametableMirroring, PPUMemory, PaletteTable};
pub use ppu_registers::{PPUControl, PPUMask, PPURegister};
pub use ppu_timing::{CycleType, ScanlineType};
pub use sprite_info::{OamEntry, SpriteInfo};
pub use tile::{decode_tile_row, pixel_to_index, render_pattern_table, TileQueue};

pub const OAM_SIZE: usize = 256;
pub const NAMETABLE_SIZE: usize = 0x800;
pub const FOUR_SCREEN_NAMETABLE_SIZE: usize = 0x1000;
pub const PALETTE_SIZE: usize = 32;

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;
pub const FRAME_BUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

pub const CYCLES_PER_SCANLINE: u16 = 341;
pub const SCANLINES_PER_FRAME: u16 = 262;
