use crate::mapper::tests::mapper_for_testing;
use crate::mapper::Mapper;
use crate::ppu::{NametableMirroring, PPU};

/* MMC1 registers are loaded one bit per write, low bit first */
fn mmc1_write(mapper: &mut dyn Mapper, address: u16, value: u8) {
    for bit in 0..5 {
        mapper.write(address, (value >> bit) & 1);
    }
}

#[test]
fn test_nrom() {
    let mut mapper = mapper_for_testing(0, 0x01, 16, 8);
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::Vertical);

    /* a 16kb image shows up at both 0x8000 and 0xc000 */
    assert_eq!(mapper.read(0x8000), 0);
    assert_eq!(mapper.read(0xbfff), 15);
    assert_eq!(mapper.read(0xc000), 0);
    assert_eq!(mapper.read(0xc400), 1);
    assert_eq!(mapper.read(0xffff), 15);

    /* ROM writes are ignored */
    mapper.write(0x8000, 0xff);
    assert_eq!(mapper.read(0x8000), 0);

    /* CHR */
    assert_eq!(mapper.read(0x0000), 0);
    assert_eq!(mapper.read(0x1c00), 7);

    /* a 32kb image fills the window */
    let mapper = mapper_for_testing(0, 0, 32, 8);
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::Horizontal);
    assert_eq!(mapper.read(0x8000), 0);
    assert_eq!(mapper.read(0xc000), 16);
    assert_eq!(mapper.read(0xffff), 31);
}

#[test]
fn test_chr_rom_is_read_only() {
    let mut mapper = mapper_for_testing(0, 0, 16, 8);
    assert!(!mapper.cartridge().chr_is_ram());
    mapper.write(0x0010, 0xaa);
    mapper.write(0x1c00, 0xaa);
    assert_eq!(mapper.read(0x0010), 0);
    assert_eq!(mapper.read(0x1c00), 7);

    /* the same through PPUDATA */
    let mut ppu = PPU::new(mapper.get_nametable_mirroring());
    ppu.write_register(0x2006, 0x00, mapper.as_mut());
    ppu.write_register(0x2006, 0x10, mapper.as_mut());
    ppu.write_register(0x2007, 0xaa, mapper.as_mut());
    assert_eq!(mapper.read(0x0010), 0);
}

#[test]
fn test_save_ram() {
    let mut mapper = mapper_for_testing(0, 0, 16, 8);
    assert_eq!(mapper.read(0x6000), 0xff);
    assert_eq!(mapper.read(0x7fff), 0xff);
    mapper.write(0x6000, 0x42);
    mapper.write(0x7fff, 0x24);
    assert_eq!(mapper.read(0x6000), 0x42);
    assert_eq!(mapper.read(0x7fff), 0x24);

    /* nothing answers between the PPU window and save RAM */
    assert_eq!(mapper.read(0x4020), 0);
    mapper.write(0x5000, 0x11);
    assert_eq!(mapper.read(0x5000), 0);

    /* without a battery nothing is saved or restored */
    assert_eq!(mapper.get_save_data(), None);
    mapper.set_save_data(&[1, 2, 3]);
    assert_eq!(mapper.read(0x6000), 0x42);
}

#[test]
fn test_battery_save_data() {
    let mut mapper = mapper_for_testing(1, 0x02, 32, 8);
    mapper.write(0x6001, 0x99);
    let data = mapper.get_save_data().unwrap();
    assert_eq!(data.len(), 0x2000);
    assert_eq!(data[0], 0xff);
    assert_eq!(data[1], 0x99);

    mapper.set_save_data(&[1, 2, 3]);
    assert_eq!(mapper.read(0x6000), 1);
    assert_eq!(mapper.read(0x6002), 3);
    assert_eq!(mapper.read(0x6003), 0xff);

    /* oversized data is cut to the size of save RAM */
    mapper.set_save_data(&vec![7; 0x3000]);
    assert_eq!(mapper.read(0x7fff), 7);
    assert_eq!(mapper.get_save_data().unwrap().len(), 0x2000);
}

#[test]
fn test_uxrom() {
    let mut mapper = mapper_for_testing(2, 0, 128, 8);
    assert_eq!(mapper.read(0x8000), 0);
    assert_eq!(mapper.read(0xc000), 112);

    mapper.write(0x8000, 3);
    assert_eq!(mapper.read(0x8000), 48);
    assert_eq!(mapper.read(0xbfff), 63);
    /* the upper bank stays on the last one */
    assert_eq!(mapper.read(0xc000), 112);
    assert_eq!(mapper.read(0xffff), 127);

    /* any address in ROM space works, and only the low bits count */
    mapper.write(0xffff, 0x15);
    assert_eq!(mapper.read(0x8000), 80);
    /* banks past the end of the image wrap */
    mapper.write(0x9000, 9);
    assert_eq!(mapper.read(0x8000), 16);
}

#[test]
fn test_mmc1_initial_state() {
    let mapper = mapper_for_testing(1, 0x01, 128, 32);
    /* mirroring comes from the header until the control register is written */
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::Vertical);
    assert_eq!(mapper.read(0x8000), 0);
    assert_eq!(mapper.read(0xc000), 112);
    assert_eq!(mapper.read(0x0000), 0);
    assert_eq!(mapper.read(0x1000), 4);
}

#[test]
fn test_mmc1_prg_modes() {
    let mut mapper = mapper_for_testing(1, 0, 128, 32);

    /* 0xc000 fixed to the last bank, switch 0x8000 */
    mmc1_write(mapper.as_mut(), 0xe000, 2);
    assert_eq!(mapper.read(0x8000), 32);
    assert_eq!(mapper.read(0xc000), 112);

    /* 0x8000 fixed to the first bank, switch 0xc000 */
    mmc1_write(mapper.as_mut(), 0x8000, 0x0a);
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::Vertical);
    mmc1_write(mapper.as_mut(), 0xe000, 5);
    assert_eq!(mapper.read(0x8000), 0);
    assert_eq!(mapper.read(0xc000), 80);

    /* 32kb mode ignores the low bit of the bank number */
    mmc1_write(mapper.as_mut(), 0x8000, 0x00);
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::SingleNametable0);
    mmc1_write(mapper.as_mut(), 0xe000, 5);
    assert_eq!(mapper.read(0x8000), 64);
    assert_eq!(mapper.read(0xc000), 80);
    assert_eq!(mapper.read(0xffff), 95);
}

#[test]
fn test_mmc1_mirroring() {
    let mut mapper = mapper_for_testing(1, 0, 32, 8);
    let expected = [
        NametableMirroring::SingleNametable0,
        NametableMirroring::SingleNametable1,
        NametableMirroring::Vertical,
        NametableMirroring::Horizontal,
    ];
    for (value, mirroring) in expected.iter().enumerate() {
        mmc1_write(mapper.as_mut(), 0x9fff, 0x0c | value as u8);
        assert_eq!(mapper.get_nametable_mirroring(), *mirroring);
    }
}

#[test]
fn test_mmc1_reset() {
    let mut mapper = mapper_for_testing(1, 0, 128, 8);
    mmc1_write(mapper.as_mut(), 0x8000, 0x02);

    /* two bits of a bank write, then a reset throws them away */
    mapper.write(0xe000, 1);
    mapper.write(0xe000, 1);
    mapper.write(0xe000, 0x80);

    /* the reset locks the upper bank but keeps the mirroring bits */
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::Vertical);
    mmc1_write(mapper.as_mut(), 0xe000, 1);
    assert_eq!(mapper.read(0x8000), 16);
    assert_eq!(mapper.read(0xc000), 112);
}

#[test]
fn test_mmc1_chr_modes() {
    let mut mapper = mapper_for_testing(1, 0, 32, 32);

    /* 8kb mode: the low bit is ignored and bank 1 is not used */
    mmc1_write(mapper.as_mut(), 0xa000, 3);
    assert_eq!(mapper.read(0x0000), 8);
    assert_eq!(mapper.read(0x1000), 12);
    mmc1_write(mapper.as_mut(), 0xc000, 6);
    assert_eq!(mapper.read(0x1000), 12);

    /* 4kb mode switches the halves separately */
    mmc1_write(mapper.as_mut(), 0x8000, 0x1c);
    mmc1_write(mapper.as_mut(), 0xa000, 3);
    mmc1_write(mapper.as_mut(), 0xc000, 6);
    assert_eq!(mapper.read(0x0000), 12);
    assert_eq!(mapper.read(0x0fff), 15);
    assert_eq!(mapper.read(0x1000), 24);
    assert_eq!(mapper.read(0x1fff), 27);
}

#[test]
fn test_mmc1_save_ram_writes_skip_the_shift_register() {
    let mut mapper = mapper_for_testing(1, 0, 128, 8);
    mapper.write(0xe000, 1);
    mapper.write(0x6000, 0);
    mapper.write(0x6000, 0);
    mapper.write(0xe000, 0);
    mapper.write(0xe000, 0);
    mapper.write(0xe000, 0);
    mapper.write(0xe000, 0);
    assert_eq!(mapper.read(0x8000), 16);
}

#[test]
fn test_mmc3_prg_banks() {
    let mut mapper = mapper_for_testing(4, 0, 128, 32);
    assert_eq!(mapper.read(0x8000), 0);
    assert_eq!(mapper.read(0xa000), 8);
    assert_eq!(mapper.read(0xc000), 112);
    assert_eq!(mapper.read(0xe000), 120);

    /* R6 */
    mapper.write(0x8000, 6);
    mapper.write(0x8001, 3);
    assert_eq!(mapper.read(0x8000), 24);
    /* R7 */
    mapper.write(0x8000, 7);
    mapper.write(0x8001, 5);
    assert_eq!(mapper.read(0xa000), 40);

    /* PRG mode 1 swaps R6 and the second-to-last bank */
    mapper.write(0x8000, 0x46);
    assert_eq!(mapper.read(0x8000), 112);
    assert_eq!(mapper.read(0xa000), 40);
    assert_eq!(mapper.read(0xc000), 24);
    assert_eq!(mapper.read(0xe000), 120);

    /* bank numbers past the end of the image wrap */
    mapper.write(0x9ffe, 0x06);
    mapper.write(0x9fff, 17);
    assert_eq!(mapper.read(0x8000), 8);
}

#[test]
fn test_mmc3_chr_banks() {
    let mut mapper = mapper_for_testing(4, 0, 32, 32);
    assert_eq!(mapper.read(0x0000), 0);
    assert_eq!(mapper.read(0x0800), 2);
    assert_eq!(mapper.read(0x1000), 4);
    assert_eq!(mapper.read(0x1c00), 7);

    mapper.write(0x8000, 2);
    mapper.write(0x8001, 9);
    assert_eq!(mapper.read(0x1000), 9);

    /* the 2kb registers ignore their low bit */
    mapper.write(0x8000, 0);
    mapper.write(0x8001, 5);
    assert_eq!(mapper.read(0x0000), 4);
    assert_eq!(mapper.read(0x0400), 5);

    /* CHR inversion swaps the halves */
    mapper.write(0x8000, 0x80);
    assert_eq!(mapper.read(0x0000), 9);
    assert_eq!(mapper.read(0x1000), 4);
    assert_eq!(mapper.read(0x1800), 2);
}

#[test]
fn test_mmc3_mirroring() {
    let mut mapper = mapper_for_testing(4, 0, 32, 8);
    mapper.write(0xa000, 0);
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::Vertical);
    mapper.write(0xbffe, 1);
    assert_eq!(mapper.get_nametable_mirroring(), NametableMirroring::Horizontal);

    /* RAM protect is accepted but does not stop writes */
    mapper.write(0xa001, 0x40);
    mapper.write(0x6000, 0x12);
    assert_eq!(mapper.read(0x6000), 0x12);

    let mut four_screen = mapper_for_testing(4, 0x08, 32, 8);
    four_screen.write(0xa000, 0);
    assert_eq!(four_screen.get_nametable_mirroring(), NametableMirroring::FourScreen);
}

#[test]
fn test_mmc3_irq_counter() {
    let mut mapper = mapper_for_testing(4, 0, 32, 8);
    mapper.write(0xc000, 2);
    mapper.write(0xc001, 0);

    /* disabled: the counter runs but nothing is raised */
    assert!(!mapper.tick());
    assert!(!mapper.tick());
    assert!(!mapper.tick());

    mapper.write(0xe001, 0);
    mapper.write(0xc001, 0);
    /* the first clock reloads from the latch, then it counts down */
    assert!(!mapper.tick());
    assert!(!mapper.tick());
    assert!(mapper.tick());
    /* and reloads on the clock after reaching zero */
    assert!(!mapper.tick());
    assert!(!mapper.tick());
    assert!(mapper.tick());

    /* a new latch value only takes effect on the next reload */
    mapper.write(0xc000, 1);
    assert!(!mapper.tick());
    assert!(mapper.tick());

    mapper.write(0xe000, 0);
    assert!(!mapper.tick());
    assert!(!mapper.tick());

    /* other mappers never raise an IRQ */
    let mut nrom = mapper_for_testing(0, 0, 16, 8);
    assert!(!nrom.tick());
}
