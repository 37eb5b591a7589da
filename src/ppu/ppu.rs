use crate::cpu::Interrupt;
use crate::mapper::Mapper;
use crate::ppu::sprite_info::{OamEntry, SpriteInfo};
use crate::ppu::tile::{decode_tile_row, render_pattern_table, TileQueue};
use crate::ppu::{
    CycleType, FrameBuffers, NametableMirroring, PPUControl, PPUInternalRegisters, PPUMask,
    PPUMemory, PPURegister, RenderingMode, ScanlineType, CYCLES_PER_SCANLINE, OAM_SIZE,
    SCANLINES_PER_FRAME,
};
use log::{debug, trace};

const PRERENDER_SCANLINE: u16 = SCANLINES_PER_FRAME - 1;
const MAX_SPRITES_PER_SCANLINE: usize = 8;

/**
 * The picture processing unit. Advanced one dot at a time by `tick`; the cartridge is
 * passed in on every call since CHR memory and mirroring live on the board.
 */
pub struct PPU {
    cycle: u16,
    scanline: u16,
    odd_frame: bool,
    pub(super) internal_regs: PPUInternalRegisters,
    /* shared registers */
    pub(super) control: PPUControl,
    pub(super) mask: PPUMask,
    pub(super) oam_addr: u8,
    last_written: u8,
    sprite_overflow: bool,
    sprite_zero_hit: bool,
    nmi_occurred: bool,
    buffered_data: u8,
    pub(super) memory: PPUMemory,
    background_tiles: TileQueue,
    scanline_sprites: [SpriteInfo; MAX_SPRITES_PER_SCANLINE],
    sprite_count: usize,
    frame_ready: bool,
    rendering_mode: RenderingMode,
    frame: FrameBuffers,
}

impl PPU {
    pub fn new(mirroring: NametableMirroring) -> PPU {
        PPU {
            cycle: 0,
            scanline: PRERENDER_SCANLINE,
            odd_frame: false,
            internal_regs: PPUInternalRegisters::default(),
            control: PPUControl::default(),
            mask: PPUMask::default(),
            oam_addr: 0,
            last_written: 0,
            sprite_overflow: false,
            sprite_zero_hit: false,
            nmi_occurred: false,
            buffered_data: 0,
            memory: PPUMemory::new(mirroring),
            background_tiles: TileQueue::default(),
            scanline_sprites: [SpriteInfo::default(); MAX_SPRITES_PER_SCANLINE],
            sprite_count: 0,
            frame_ready: false,
            rendering_mode: RenderingMode::Normal,
            frame: FrameBuffers::default(),
        }
    }

    /* power-on state; memory is cleared and the raster restarts on the pre-render line */
    pub fn reset(&mut self) {
        self.memory.flush();
        self.cycle = 0;
        self.scanline = PRERENDER_SCANLINE;
        self.odd_frame = false;
        self.internal_regs = PPUInternalRegisters::default();
        self.control = PPUControl::default();
        self.mask = PPUMask::default();
        self.oam_addr = 0;
        self.last_written = 0;
        self.sprite_overflow = false;
        self.sprite_zero_hit = false;
        self.nmi_occurred = false;
        self.buffered_data = 0;
        self.background_tiles.clear();
        self.sprite_count = 0;
        self.frame_ready = false;
        self.frame.clear();
    }

    /**
     * Advances one dot. Returns an interrupt for the CPU: NMI at the start of vblank when
     * enabled, IRQ when the mapper's scanline counter fires.
     */
    pub fn tick(&mut self, mapper: &mut dyn Mapper) -> Option<Interrupt> {
        let cycle_type = CycleType::from_cycle(self.cycle);
        let rendering_on = self.mask.rendering_enabled();

        let interrupt = match ScanlineType::from_scanline(self.scanline) {
            ScanlineType::VBlank => self.vblank_scanline(cycle_type),
            ScanlineType::PreRender if rendering_on => self.prerender_scanline(cycle_type, mapper),
            ScanlineType::Visible if rendering_on => self.render_scanline(cycle_type, mapper),
            _ => None,
        };

        self.increment_counters();
        interrupt
    }

    fn increment_counters(&mut self) {
        self.cycle += 1;
        /* odd frames skip the last dot of the pre-render line when the background is on */
        if self.scanline == PRERENDER_SCANLINE
            && self.cycle == CYCLES_PER_SCANLINE - 1
            && self.mask.show_background
            && self.odd_frame
        {
            self.cycle += 1;
        }

        if self.cycle == CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline == SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.odd_frame = !self.odd_frame;
            }
        }
    }

    fn vblank_scanline(&mut self, cycle_type: CycleType) -> Option<Interrupt> {
        match cycle_type {
            CycleType::One => {
                self.nmi_occurred = true;
                if self.control.nmi_output {
                    trace!("PPU: vblank NMI");
                    return Some(Interrupt::NMI);
                }
            }
            CycleType::Sprites => self.sprite_count = 0,
            _ => {}
        }
        None
    }

    fn prerender_scanline(
        &mut self,
        cycle_type: CycleType,
        mapper: &mut dyn Mapper,
    ) -> Option<Interrupt> {
        self.fetch_background(cycle_type, mapper);
        match cycle_type {
            CycleType::One => self.clear_vertical_blank(),
            CycleType::Sprites => self.sprite_count = 0,
            CycleType::CopyY => self.internal_regs.copy_y_bits(),
            _ => {}
        }
        self.update_scrolling(cycle_type);
        self.tick_mapper(cycle_type, mapper)
    }

    fn render_scanline(
        &mut self,
        cycle_type: CycleType,
        mapper: &mut dyn Mapper,
    ) -> Option<Interrupt> {
        /* the pixel is drawn from the queue before it shifts */
        if matches!(cycle_type, CycleType::One | CycleType::Visible) {
            self.render_pixel();
        }
        self.fetch_background(cycle_type, mapper);
        self.update_scrolling(cycle_type);
        if cycle_type == CycleType::Sprites {
            self.sprite_evaluation(mapper);
        }
        self.tick_mapper(cycle_type, mapper)
    }

    fn clear_vertical_blank(&mut self) {
        self.nmi_occurred = false;
        self.frame_ready = true;
    }

    fn fetch_background(&mut self, cycle_type: CycleType, mapper: &dyn Mapper) {
        match cycle_type {
            CycleType::One | CycleType::Visible => {
                self.background_tiles.shift();
                if self.cycle % 8 == 0 {
                    if self.cycle < 256 {
                        self.fetch_background_row(mapper);
                    }
                    self.internal_regs.coarse_x_increment();
                }
            }
            CycleType::FlushTileData => self.background_tiles.clear(),
            /* the first two tiles of the next scanline */
            CycleType::Prefetch if self.cycle % 8 == 0 => {
                self.fetch_background_row(mapper);
                self.internal_regs.coarse_x_increment();
            }
            _ => {}
        }
    }

    fn update_scrolling(&mut self, cycle_type: CycleType) {
        match cycle_type {
            CycleType::IncrementY => self.internal_regs.y_increment(),
            CycleType::CopyX => self.internal_regs.copy_x_bits(),
            _ => {}
        }
    }

    fn tick_mapper(&mut self, cycle_type: CycleType, mapper: &mut dyn Mapper) -> Option<Interrupt> {
        if cycle_type == CycleType::MapperTick && mapper.tick() {
            trace!("PPU: mapper IRQ on scanline {}", self.scanline);
            Some(Interrupt::IRQ)
        } else {
            None
        }
    }

    /* reads the tile at v and queues its eight pixels for the current fine y */
    fn fetch_background_row(&mut self, mapper: &dyn Mapper) {
        let v = self.internal_regs.v;
        let tile_index = self.memory.read(mapper, 0x2000 | (v & 0x0fff)) as u16;

        /* each attribute byte covers a 4x4 tile block, two bits per 2x2 quadrant */
        let attribute_address = 0x23c0 | (v & 0x0c00) | ((v >> 4) & 0x38) | ((v >> 2) & 0x07);
        let shift = ((v >> 4) & 4) | (v & 2);
        let attribute = ((self.memory.read(mapper, attribute_address) >> shift) & 3) << 2;

        let fine_y = self.internal_regs.get_fine_y() as u16;
        let address = 0x1000 * self.control.background_table + tile_index * 16 + fine_y;
        let low = self.memory.read(mapper, address);
        let high = self.memory.read(mapper, address + 8);

        self.background_tiles
            .push_row(&decode_tile_row(attribute, low, high, false));
    }

    /* Finds the first eight sprites on the current scanline, determined by position
     * in the OAM, and decodes the row of each that lands here. A ninth sets the
     * overflow flag.
     */
    fn sprite_evaluation(&mut self, mapper: &dyn Mapper) {
        let sprite_height = self.control.sprite_height() as i32;
        self.sprite_count = 0;

        for sprite_index in 0..OAM_SIZE / 4 {
            let entry =
                OamEntry::from_memory(&self.memory.oam[sprite_index * 4..sprite_index * 4 + 4]);
            let row = self.scanline as i32 - entry.y as i32;
            if row < 0 || row >= sprite_height {
                continue;
            }

            if self.sprite_count < MAX_SPRITES_PER_SCANLINE {
                self.scanline_sprites[self.sprite_count] = SpriteInfo {
                    row: self.fetch_sprite_row(mapper, &entry, row as u8),
                    x: entry.x,
                    behind_background: entry.behind_background(),
                    sprite_index,
                };
            }
            self.sprite_count += 1;

            /* TODO: should we implement the buggy 'diagonal' behavior for this? */
            if self.sprite_count > MAX_SPRITES_PER_SCANLINE {
                self.sprite_count = MAX_SPRITES_PER_SCANLINE;
                self.sprite_overflow = true;
                break;
            }
        }
    }

    fn fetch_sprite_row(&self, mapper: &dyn Mapper, entry: &OamEntry, row: u8) -> [u8; 8] {
        let sprite_height = self.control.sprite_height();
        let mut tile_index = entry.tile_index as u16;
        /* tall sprites pick their pattern table with the low bit of the tile index */
        let pattern_table = if self.control.tall_sprites {
            let table = tile_index & 1;
            tile_index &= 0xfe;
            table
        } else {
            self.control.sprite_table
        };

        let mut row = if entry.flip_vertical() {
            sprite_height - 1 - row
        } else {
            row
        };
        /* double tall sprites are actually two regular 8x8 tiles glued together */
        if row > 7 {
            tile_index += 1;
            row %= 8;
        }

        let address = 0x1000 * pattern_table + tile_index * 16 + row as u16;
        let low = self.memory.read(mapper, address);
        let high = self.memory.read(mapper, address + 8);
        decode_tile_row(entry.palette_attribute(), low, high, entry.flip_horizontal())
    }

    fn background_pixel(&self) -> u8 {
        if !self.mask.show_background {
            return 0;
        }
        self.background_tiles
            .get(self.internal_regs.get_fine_x() as usize)
            & 0x0f
    }

    /* first opaque sprite covering this column, as (slot, palette address) */
    fn sprite_pixel(&self, x: u16) -> Option<(usize, u8)> {
        if !self.mask.show_sprites {
            return None;
        }
        self.scanline_sprites[..self.sprite_count]
            .iter()
            .enumerate()
            .find_map(|(slot, sprite)| sprite.color_at(x).map(|color| (slot, color)))
    }

    fn render_pixel(&mut self) {
        let x = self.cycle - 1;

        let background = if x < 8 && !self.mask.show_left_background {
            0
        } else {
            self.background_pixel()
        };
        let sprite = if x < 8 && !self.mask.show_left_sprites {
            None
        } else {
            self.sprite_pixel(x)
        };

        let background_opaque = background % 4 != 0;
        let (color, from_background) = match (background_opaque, sprite) {
            (false, None) => (0, true),
            (false, Some((_, sprite_color))) => (sprite_color, false),
            (true, None) => (background, true),
            (true, Some((slot, sprite_color))) => {
                let sprite_info = &self.scanline_sprites[slot];
                if sprite_info.sprite_index == 0 && x < 255 {
                    self.sprite_zero_hit = true;
                }
                if sprite_info.is_foreground() {
                    (sprite_color, false)
                } else {
                    (background, true)
                }
            }
        };

        let hue = self.memory.palette.read(color as u16);
        self.frame.write_pixel(
            self.rendering_mode,
            x as usize,
            self.scanline as usize,
            hue,
            from_background,
        );
    }

    pub fn read_register(&mut self, address: u16, mapper: &dyn Mapper) -> u8 {
        match PPURegister::from_addr(address) {
            Some(PPURegister::PPUSTATUS) => self.read_status(),
            Some(PPURegister::OAMDATA) => self.memory.oam[self.oam_addr as usize],
            Some(PPURegister::PPUDATA) => self.read_data(mapper),
            _ => {
                trace!("PPU: read from write-only register 0x{address:04x}");
                0
            }
        }
    }

    fn read_status(&mut self) -> u8 {
        /* reading on the exact dot vblank starts suppresses the flag */
        let vblank = self.nmi_occurred && !(self.cycle == 2 && self.scanline == 241);
        let result = (self.last_written & 0x1f)
            | (self.sprite_overflow as u8) << 5
            | (self.sprite_zero_hit as u8) << 6
            | (vblank as u8) << 7;
        self.nmi_occurred = false;
        self.internal_regs.w = false;
        result
    }

    /* reads below the palettes come from an internal buffer one read behind */
    fn read_data(&mut self, mapper: &dyn Mapper) -> u8 {
        let address = self.internal_regs.v;
        let value = self.memory.read(mapper, address);
        let result = if address % 0x4000 < 0x3f00 {
            std::mem::replace(&mut self.buffered_data, value)
        } else {
            /* the buffer picks up the nametable byte underneath the palette */
            self.buffered_data = self.memory.read(mapper, address.wrapping_sub(0x1000));
            value
        };
        self.internal_regs.increment(self.control.vram_increment());
        result
    }

    pub fn write_register(&mut self, address: u16, value: u8, mapper: &mut dyn Mapper) {
        self.last_written = value;
        match PPURegister::from_addr(address) {
            Some(PPURegister::PPUCTRL) => {
                self.control = PPUControl::from(value);
                self.internal_regs.write_nametable_select(value);
            }
            Some(PPURegister::PPUMASK) => self.mask = PPUMask::from(value),
            Some(PPURegister::OAMADDR) => self.oam_addr = value,
            Some(PPURegister::OAMDATA) => self.write_oam(value),
            Some(PPURegister::PPUSCROLL) => self.internal_regs.write_scroll(value),
            Some(PPURegister::PPUADDR) => self.internal_regs.write_address(value),
            Some(PPURegister::PPUDATA) => {
                self.memory.write(mapper, self.internal_regs.v, value);
                self.internal_regs.increment(self.control.vram_increment());
            }
            _ => trace!("PPU: write 0x{value:02x} to read-only register 0x{address:04x}"),
        }
    }

    pub fn write_oam(&mut self, value: u8) {
        self.memory.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    /* OAM DMA: fills from the current OAM address, wrapping, without moving it */
    pub fn write_oam_block(&mut self, data: &[u8; OAM_SIZE]) {
        for (i, value) in data.iter().enumerate() {
            let index = self.oam_addr.wrapping_add(i as u8) as usize;
            self.memory.oam[index] = *value;
        }
    }

    pub fn oam_address(&self) -> u8 {
        self.oam_addr
    }

    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub fn acknowledge_frame(&mut self) {
        self.frame_ready = false;
        if self.mask.show_sprites {
            self.sprite_overflow = false;
            self.sprite_zero_hit = false;
        }
        self.frame.clear_layers();
    }

    pub fn frame(&self) -> &FrameBuffers {
        &self.frame
    }

    pub fn set_rendering_mode(&mut self, mode: RenderingMode) {
        debug!("PPU: rendering mode {mode:?}");
        self.rendering_mode = mode;
    }

    pub fn rendering_mode(&self) -> RenderingMode {
        self.rendering_mode
    }

    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn memory(&self) -> &PPUMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut PPUMemory {
        &mut self.memory
    }

    /* pattern tables 0 and 1 as 128x128 RGBA images */
    pub fn pattern_tables(&self, mapper: &dyn Mapper) -> [Vec<u8>; 2] {
        [
            render_pattern_table(mapper, 0),
            render_pattern_table(mapper, 1),
        ]
    }
}
