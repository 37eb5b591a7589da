
use crate::rom::{Rom, PRG_BANK_SIZE};

/* everything lives in the last 8kb of PRG, which every board maps at 0xe000 on reset */
pub const CODE_START: u16 = 0xe000;
pub const NMI_HANDLER: u16 = 0xe100;
pub const IRQ_HANDLER: u16 = 0xe200;

fn place(prg: &mut [u8], address: u16, bytes: &[u8]) {
    let offset = prg.len() - (0x10000 - address as usize);
    prg[offset..offset + bytes.len()].copy_from_slice(bytes);
}

/* 32kb of NOPs with the program and handlers placed, and the vectors pointing at them */
pub fn rom_for_testing(mapper_id: u8, flags_6: u8, program: &[u8], nmi: &[u8], irq: &[u8]) -> Rom {
    let mut prg = vec![0xea; PRG_BANK_SIZE * 2];
    place(&mut prg, CODE_START, program);
    place(&mut prg, NMI_HANDLER, nmi);
    place(&mut prg, IRQ_HANDLER, irq);
    let vectors: Vec<u8> = [NMI_HANDLER, CODE_START, IRQ_HANDLER]
        .iter()
        .flat_map(|vector| vector.to_le_bytes())
        .collect();
    place(&mut prg, 0xfffa, &vectors);

    let image = Rom::image_for_testing(mapper_id, flags_6, &prg, &[]);
    Rom::read_rom_data(&image).unwrap()
}

/* JMP CODE_START, forever */
pub fn idle_rom() -> Rom {
    rom_for_testing(0, 0, &[0x4c, 0x00, 0xe0], &[0x40], &[0x40])
}
