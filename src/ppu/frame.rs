use crate::ppu::palette::{hue_lookup, rgba};
use crate::ppu::{FRAME_BUFFER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingMode {
    #[default]
    Normal,
    Split, /* also fill the per-layer and palette index buffers */
}

/**
 * Output of the PPU. `color` is always the composited RGBA frame; in split mode the
 * background and sprite layers are kept apart as well, and `palette_index` records the
 * hue index of every pixel.
 */
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    pub color: Vec<u8>,
    pub background: Vec<u8>,
    pub sprite: Vec<u8>,
    pub palette_index: Vec<u8>,
}

impl Default for FrameBuffers {
    fn default() -> Self {
        FrameBuffers {
            color: vec![0; FRAME_BUFFER_SIZE],
            background: vec![0; FRAME_BUFFER_SIZE],
            sprite: vec![0; FRAME_BUFFER_SIZE],
            palette_index: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }
}

impl FrameBuffers {
    pub(super) fn write_pixel(
        &mut self,
        mode: RenderingMode,
        x: usize,
        y: usize,
        hue: u8,
        from_background: bool,
    ) {
        let position = y * SCREEN_WIDTH + x;
        let index = position * 4;
        let pixel = rgba(hue_lookup(hue));
        self.color[index..index + 4].copy_from_slice(&pixel);

        if mode == RenderingMode::Split {
            self.palette_index[position] = hue & 0x3f;
            if from_background {
                self.background[index..index + 4].copy_from_slice(&pixel);
            } else {
                self.sprite[index..index + 4].copy_from_slice(&pixel);
                self.background[index..index + 4].fill(0);
            }
        }
    }

    /* the layer buffers only ever hold what was drawn since the last acknowledged frame */
    pub(super) fn clear_layers(&mut self) {
        self.background.fill(0);
        self.sprite.fill(0);
    }

    pub(super) fn clear(&mut self) {
        self.color.fill(0);
        self.palette_index.fill(0);
        self.clear_layers();
    }
}
