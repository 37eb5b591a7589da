/* one four-byte OAM entry */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OamEntry {
    pub y: u8,
    pub tile_index: u8,
    pub attrs: u8,
    pub x: u8,
}

impl OamEntry {
    /* create an OamEntry from memory */
    pub fn from_memory(src_slice: &[u8]) -> OamEntry {
        OamEntry {
            y: src_slice[0],
            tile_index: src_slice[1],
            attrs: src_slice[2],
            x: src_slice[3],
        }
    }

    pub fn flip_horizontal(&self) -> bool {
        self.attrs & 0x40 != 0
    }

    pub fn flip_vertical(&self) -> bool {
        self.attrs & 0x80 != 0
    }

    pub fn behind_background(&self) -> bool {
        self.attrs & 0x20 != 0
    }

    /* palette select, already shifted into place next to the pattern bits */
    pub fn palette_attribute(&self) -> u8 {
        (self.attrs & 0x3) << 2
    }
}

/* A sprite picked for the current scanline, with its row of pixels already decoded. */
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteInfo {
    pub(super) row: [u8; 8],
    pub(super) x: u8,
    pub(super) behind_background: bool,
    pub(super) sprite_index: usize,
}

impl SpriteInfo {
    pub fn is_foreground(&self) -> bool {
        !self.behind_background
    }

    /* sprite palette color at screen column x, or None if uncovered or transparent */
    pub(super) fn color_at(&self, x: u16) -> Option<u8> {
        let offset = x.checked_sub(self.x as u16)?;
        if offset > 7 {
            return None;
        }
        let color = self.row[offset as usize] & 0xf;
        if color % 4 == 0 {
            None
        } else {
            Some(color | 0x10)
        }
    }
}
