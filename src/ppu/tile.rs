use crate::mapper::Mapper;

pub const TILE_QUEUE_CAPACITY: usize = 32;

/* greyscale shades for the pattern table viewer, one per two-bit pixel value */
const PATTERN_SHADES: [u8; 4] = [0xff, 0x33, 0xbf, 0x00];

/**
 * Decodes one row of a tile from its two bitplanes. Each output value is the 4-bit
 * palette offset: attribute bits 2-3, pattern bits 0-1.
 */
pub fn decode_tile_row(attribute: u8, low: u8, high: u8, flip_horizontal: bool) -> [u8; 8] {
    let mut out = [0; 8];
    for (tile_x, value) in out.iter_mut().enumerate() {
        let shift = if flip_horizontal { tile_x } else { 7 - tile_x };
        *value = attribute | ((low >> shift) & 1) | (((high >> shift) & 1) << 1);
    }
    out
}

/**
 * Fixed-capacity FIFO of background pixels. The renderer reads fine_x entries ahead
 * of the head, so reads past the end come back as transparent instead of failing.
 */
#[derive(Debug, Clone)]
pub struct TileQueue {
    data: [u8; TILE_QUEUE_CAPACITY],
    head: usize,
    len: usize,
}

impl Default for TileQueue {
    fn default() -> Self {
        TileQueue {
            data: [0; TILE_QUEUE_CAPACITY],
            head: 0,
            len: 0,
        }
    }
}

impl TileQueue {
    pub fn push(&mut self, value: u8) {
        if self.len == TILE_QUEUE_CAPACITY {
            return;
        }
        self.data[(self.head + self.len) % TILE_QUEUE_CAPACITY] = value;
        self.len += 1;
    }

    pub fn push_row(&mut self, row: &[u8; 8]) {
        for value in row {
            self.push(*value);
        }
    }

    pub fn shift(&mut self) {
        if self.len > 0 {
            self.head = (self.head + 1) % TILE_QUEUE_CAPACITY;
            self.len -= 1;
        }
    }

    pub fn get(&self, index: usize) -> u8 {
        if index < self.len {
            self.data[(self.head + index) % TILE_QUEUE_CAPACITY]
        } else {
            0
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/**
 * Draws one 4kb pattern table as a 16x16 grid of tiles into a 128x128 RGBA buffer.
 * Useful for checking what a mapper currently has banked in.
 */
pub fn render_pattern_table(mapper: &dyn Mapper, table: u16) -> Vec<u8> {
    const WIDTH: usize = 128;
    let mut out = vec![0; WIDTH * WIDTH * 4];
    let base = 0x1000 * (table & 1);

    for tile in 0..256u16 {
        let tile_x = (tile % 16) as usize * 8;
        let tile_y = (tile / 16) as usize * 8;
        for row in 0..8u16 {
            let address = base + tile * 16 + row;
            let pixels = decode_tile_row(0, mapper.read(address), mapper.read(address + 8), false);
            for (col, value) in pixels.iter().enumerate() {
                let shade = PATTERN_SHADES[*value as usize];
                let index = pixel_to_index(WIDTH, tile_x + col, tile_y + row as usize);
                out[index..index + 4].copy_from_slice(&[shade, shade, shade, 0xff]);
            }
        }
    }
    out
}

pub fn pixel_to_index(width: usize, x: usize, y: usize) -> usize {
    4 * (width * y + x)
}
