use crate::cpu::Interrupt;
use crate::mapper::{CartridgeMemory, Mapper};
use crate::ppu::tests::{
    mapper_for_testing, pixel, ppu_for_testing, render_frame, write_vram,
};
use crate::ppu::{hue_lookup, RenderingMode, PPU};
use crate::rom::{Rom, PRG_BANK_SIZE};

const BACKDROP: u8 = 0x0f;
const BACKGROUND: u8 = 0x30;
const SPRITE: u8 = 0x16;

fn rgba(hue: u8) -> [u8; 4] {
    let color = hue_lookup(hue);
    [(color >> 16) as u8, (color >> 8) as u8, color as u8, 0xff]
}

/* Every background tile is tile 1: the left half of each row is opaque, the right
 * half transparent. Tile 2 is solid and used for sprites. OAM starts off-screen.
 */
fn setup(mapper: &mut dyn Mapper) -> PPU {
    let mut ppu = ppu_for_testing(mapper);

    write_vram(&mut ppu, mapper, 0x0010, &[0xf0; 8]);
    write_vram(&mut ppu, mapper, 0x0020, &[0xff; 8]);
    write_vram(&mut ppu, mapper, 0x2000, &[1; 960]);
    write_vram(&mut ppu, mapper, 0x3f00, &[BACKDROP, BACKGROUND]);
    write_vram(&mut ppu, mapper, 0x3f11, &[SPRITE]);
    ppu.write_oam_block(&[0xff; 256]);
    reset_scroll(&mut ppu, mapper);
    ppu
}

/* PPUADDR writes go through t, so scroll has to be set again afterwards */
fn reset_scroll(ppu: &mut PPU, mapper: &mut dyn Mapper) {
    ppu.read_register(0x2002, mapper);
    ppu.write_register(0x2000, 0x00, mapper);
    ppu.write_register(0x2005, 0x00, mapper);
    ppu.write_register(0x2005, 0x00, mapper);
}

fn place_sprite(ppu: &mut PPU, mapper: &mut dyn Mapper, index: u8, sprite: [u8; 4]) {
    ppu.write_register(0x2003, index * 4, mapper);
    for value in sprite {
        ppu.write_register(0x2004, value, mapper);
    }
}

#[test]
fn test_background_tiles() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    ppu.write_register(0x2001, 0x0a, mapper);

    render_frame(&mut ppu, mapper);

    let color = &ppu.frame().color;
    for y in [0, 10, 239] {
        assert_eq!(pixel(color, 0, y), rgba(BACKGROUND));
        assert_eq!(pixel(color, 3, y), rgba(BACKGROUND));
        assert_eq!(pixel(color, 4, y), rgba(BACKDROP));
        assert_eq!(pixel(color, 7, y), rgba(BACKDROP));
        assert_eq!(pixel(color, 8, y), rgba(BACKGROUND));
        assert_eq!(pixel(color, 251, y), rgba(BACKGROUND));
        assert_eq!(pixel(color, 255, y), rgba(BACKDROP));
    }
}

#[test]
fn test_fine_x_scroll() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    ppu.write_register(0x2005, 0x02, mapper);
    ppu.write_register(0x2005, 0x00, mapper);
    ppu.write_register(0x2001, 0x0a, mapper);

    render_frame(&mut ppu, mapper);

    let color = &ppu.frame().color;
    assert_eq!(pixel(color, 0, 50), rgba(BACKGROUND));
    assert_eq!(pixel(color, 1, 50), rgba(BACKGROUND));
    assert_eq!(pixel(color, 2, 50), rgba(BACKDROP));
    assert_eq!(pixel(color, 6, 50), rgba(BACKGROUND));
}

#[test]
fn test_attribute_selects_palette() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    /* bottom right quadrant of the first attribute block uses palette 1 */
    write_vram(&mut ppu, mapper, 0x23c0, &[0x40]);
    write_vram(&mut ppu, mapper, 0x3f05, &[0x2a]);
    reset_scroll(&mut ppu, mapper);
    ppu.write_register(0x2001, 0x0a, mapper);

    render_frame(&mut ppu, mapper);

    let color = &ppu.frame().color;
    assert_eq!(pixel(color, 16, 16), rgba(0x2a));
    assert_eq!(pixel(color, 0, 16), rgba(BACKGROUND));
    assert_eq!(pixel(color, 16, 0), rgba(BACKGROUND));
    assert_eq!(pixel(color, 32, 16), rgba(BACKGROUND));
}

#[test]
fn test_left_column_mask() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    ppu.write_register(0x2001, 0x08, mapper);

    render_frame(&mut ppu, mapper);

    let color = &ppu.frame().color;
    assert_eq!(pixel(color, 0, 10), rgba(BACKDROP));
    assert_eq!(pixel(color, 3, 10), rgba(BACKDROP));
    assert_eq!(pixel(color, 8, 10), rgba(BACKGROUND));
}

#[test]
fn test_sprite_in_front_and_sprite_zero_hit() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    place_sprite(&mut ppu, mapper, 0, [20, 2, 0x00, 40]);
    ppu.write_register(0x2001, 0x1e, mapper);

    render_frame(&mut ppu, mapper);

    let color = &ppu.frame().color;
    /* sprites show up one line below their y */
    assert_eq!(pixel(color, 41, 20), rgba(BACKGROUND));
    assert_eq!(pixel(color, 41, 21), rgba(SPRITE));
    assert_eq!(pixel(color, 44, 21), rgba(SPRITE));
    assert_eq!(pixel(color, 47, 28), rgba(SPRITE));
    assert_eq!(pixel(color, 48, 28), rgba(BACKGROUND));
    assert_eq!(pixel(color, 41, 29), rgba(BACKGROUND));

    let status = ppu.read_register(0x2002, mapper);
    assert_eq!(status & 0x40, 0x40);
    assert_eq!(status & 0x20, 0x00);

    /* acknowledging the frame clears the hit while sprites are shown */
    ppu.acknowledge_frame();
    assert_eq!(ppu.read_register(0x2002, mapper) & 0x40, 0x00);
}

#[test]
fn test_sprite_behind_background() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    place_sprite(&mut ppu, mapper, 0, [20, 2, 0x20, 40]);
    ppu.write_register(0x2001, 0x1e, mapper);

    render_frame(&mut ppu, mapper);

    let color = &ppu.frame().color;
    assert_eq!(pixel(color, 41, 21), rgba(BACKGROUND));
    /* where the background is transparent the sprite still shows */
    assert_eq!(pixel(color, 44, 21), rgba(SPRITE));
    assert_eq!(ppu.read_register(0x2002, mapper) & 0x40, 0x40);
}

#[test]
fn test_no_sprite_zero_hit_without_background() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    /* tile 4 is the mirror image of tile 1 */
    write_vram(&mut ppu, mapper, 0x0040, &[0x0f; 8]);
    reset_scroll(&mut ppu, mapper);
    place_sprite(&mut ppu, mapper, 0, [20, 4, 0x00, 40]);
    place_sprite(&mut ppu, mapper, 1, [20, 2, 0x00, 40]);
    ppu.write_register(0x2001, 0x1e, mapper);

    render_frame(&mut ppu, mapper);

    /* sprite 0 is only opaque over transparent background; sprite 1 overlaps opaque
     * background but isn't sprite 0 */
    assert_eq!(pixel(&ppu.frame().color, 41, 21), rgba(SPRITE));
    assert_eq!(pixel(&ppu.frame().color, 44, 21), rgba(SPRITE));
    assert_eq!(ppu.read_register(0x2002, mapper) & 0x40, 0x00);
}

#[test]
fn test_sprite_overflow() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    for i in 0..8 {
        place_sprite(&mut ppu, mapper, i, [100, 0, 0, 10 * i]);
    }
    ppu.write_register(0x2001, 0x18, mapper);
    render_frame(&mut ppu, mapper);
    assert_eq!(ppu.read_register(0x2002, mapper) & 0x20, 0x00);

    place_sprite(&mut ppu, mapper, 30, [104, 0, 0, 200]);
    render_frame(&mut ppu, mapper);
    assert_eq!(ppu.read_register(0x2002, mapper) & 0x20, 0x20);
}

#[test]
fn test_tall_sprites() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    /* tile 3 (the bottom half of the 2/3 pair) only has a top row */
    write_vram(&mut ppu, mapper, 0x0030, &[0xff]);
    reset_scroll(&mut ppu, mapper);
    ppu.write_register(0x2000, 0x20, mapper);
    place_sprite(&mut ppu, mapper, 5, [60, 2, 0x00, 96]);
    ppu.write_register(0x2001, 0x1e, mapper);

    render_frame(&mut ppu, mapper);

    let color = &ppu.frame().color;
    assert_eq!(pixel(color, 97, 61), rgba(SPRITE));
    assert_eq!(pixel(color, 97, 68), rgba(SPRITE));
    assert_eq!(pixel(color, 97, 69), rgba(SPRITE));
    assert_eq!(pixel(color, 97, 70), rgba(BACKGROUND));
    assert_eq!(pixel(color, 97, 77), rgba(BACKGROUND));
}

#[test]
fn test_split_rendering() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    ppu.set_rendering_mode(RenderingMode::Split);
    place_sprite(&mut ppu, mapper, 0, [20, 2, 0x00, 40]);
    ppu.write_register(0x2001, 0x1e, mapper);

    render_frame(&mut ppu, mapper);

    let frame = ppu.frame();
    assert_eq!(pixel(&frame.color, 41, 21), rgba(SPRITE));
    assert_eq!(pixel(&frame.sprite, 41, 21), rgba(SPRITE));
    assert_eq!(pixel(&frame.background, 41, 21), [0, 0, 0, 0]);
    assert_eq!(pixel(&frame.background, 0, 10), rgba(BACKGROUND));
    assert_eq!(pixel(&frame.sprite, 0, 10), [0, 0, 0, 0]);
    assert_eq!(frame.palette_index[21 * 256 + 41], SPRITE);
    assert_eq!(frame.palette_index[10 * 256], BACKGROUND);

    ppu.acknowledge_frame();
    assert_eq!(pixel(&ppu.frame().sprite, 41, 21), [0, 0, 0, 0]);
    /* the composite frame stays until it's drawn over */
    assert_eq!(pixel(&ppu.frame().color, 41, 21), rgba(SPRITE));
}

#[test]
fn test_normal_rendering_leaves_layers_empty() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    ppu.write_register(0x2001, 0x0a, mapper);

    render_frame(&mut ppu, mapper);

    assert!(ppu.frame().background.iter().all(|value| *value == 0));
    assert!(ppu.frame().palette_index.iter().all(|value| *value == 0));
}

#[test]
fn test_pattern_tables() {
    let mut mapper = mapper_for_testing(0);
    let mapper = mapper.as_mut();
    let mut ppu = setup(mapper);
    write_vram(&mut ppu, mapper, 0x1008, &[0x80]);
    reset_scroll(&mut ppu, mapper);

    let [table_0, table_1] = ppu.pattern_tables(mapper);
    assert_eq!(table_0.len(), 128 * 128 * 4);
    let at = |table: &Vec<u8>, x: usize, y: usize| table[4 * (y * 128 + x)];
    /* tile 1: left half is pattern value 1 */
    assert_eq!(at(&table_0, 8, 0), 0x33);
    assert_eq!(at(&table_0, 12, 0), 0xff);
    /* tile 2 is solid */
    assert_eq!(at(&table_0, 16, 7), 0x33);
    /* table 1, tile 0 row 0: high plane only on the leftmost pixel */
    assert_eq!(at(&table_1, 0, 0), 0xbf);
    assert_eq!(at(&table_1, 1, 0), 0xff);
}

/* counts scanline clocks, firing an IRQ on every tenth */
struct CountingMapper {
    cartridge: CartridgeMemory,
    ticks: u32,
}

impl Mapper for CountingMapper {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn cartridge(&self) -> &CartridgeMemory {
        &self.cartridge
    }

    fn cartridge_mut(&mut self) -> &mut CartridgeMemory {
        &mut self.cartridge
    }

    fn write_register(&mut self, _address: u16, _value: u8) {}

    fn tick(&mut self) -> bool {
        self.ticks += 1;
        self.ticks % 10 == 0
    }
}

#[test]
fn test_mapper_clocked_once_per_rendered_scanline() {
    let image = Rom::image_for_testing(0, 0, &vec![0; PRG_BANK_SIZE], &[]);
    let rom = Rom::read_rom_data(&image).unwrap();
    let mut mapper = CountingMapper {
        cartridge: CartridgeMemory::new(&rom),
        ticks: 0,
    };
    let mut ppu = ppu_for_testing(&mapper);

    /* nothing while rendering is off */
    for _ in 0..341 * 262 {
        ppu.tick(&mut mapper);
    }
    assert_eq!(mapper.ticks, 0);

    ppu.write_register(0x2001, 0x08, &mut mapper);
    let mut irqs = 0;
    while mapper.ticks < 241 {
        if ppu.tick(&mut mapper) == Some(Interrupt::IRQ) {
            irqs += 1;
        }
    }
    assert_eq!(irqs, 24);
    /* the 241st clock (pre-render) comes from the last dot of scanline 261 */
    assert_eq!((ppu.scanline(), ppu.cycle()), (0, 0));
}
