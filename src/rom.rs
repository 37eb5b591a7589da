use crate::error::EmulatorError;
use crate::ppu::NametableMirroring;
use log::info;
use std::fs;

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
pub const PRG_BANK_SIZE: usize = 1 << 14; /* 16kb */
pub const CHR_BANK_SIZE: usize = 1 << 13; /* 8kb */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ntsc,
    Pal,
}

/**
 * A parsed iNES cartridge image. The core only reads the fields below; everything else
 * in the header is ignored.
 */
#[derive(Debug, Clone)]
pub struct Rom {
    pub prg_data: Vec<u8>,
    pub chr_data: Vec<u8>,
    pub chr_is_ram: bool, /* no CHR banks in the image, so 8kb of writable CHR RAM */
    pub mapper_id: u8,
    pub mirroring: NametableMirroring,
    pub has_battery: bool,
    pub region: Region, /* preserved, not used for timing */
}

impl Rom {
    pub fn parse_file(file_ref: &str) -> Result<Rom, EmulatorError> {
        info!("Loading cartridge image {file_ref}");
        let rom_data: Vec<u8> = fs::read(file_ref)?;
        Rom::read_rom_data(&rom_data)
    }

    pub fn read_rom_data(rom_data: &[u8]) -> Result<Rom, EmulatorError> {
        if rom_data.len() < HEADER_SIZE {
            return Err(EmulatorError::InvalidRom(format!(
                "the image must be at least {HEADER_SIZE} bytes long, got {}",
                rom_data.len()
            )));
        }

        let header_data = &rom_data[0..4];
        if header_data != b"NES\x1A" {
            return Err(EmulatorError::InvalidRom(format!(
                "bad header magic {header_data:?}"
            )));
        }

        /* PRG ROM is in 16kb increments, CHR ROM in 8kb increments (and can be zero) */
        let prg_rom_size = rom_data[4] as usize * PRG_BANK_SIZE;
        let chr_rom_size = rom_data[5] as usize * CHR_BANK_SIZE;
        if prg_rom_size == 0 {
            return Err(EmulatorError::InvalidRom(String::from(
                "the image declares no PRG ROM",
            )));
        }

        let flags_6 = rom_data[6];
        let flags_7 = rom_data[7];

        let mapper_id = (flags_6 >> 4) | (flags_7 & 0xf0);
        let mirroring = if flags_6 & 0x08 != 0 {
            NametableMirroring::FourScreen
        } else if flags_6 & 0x01 != 0 {
            NametableMirroring::Vertical
        } else {
            NametableMirroring::Horizontal
        };
        let has_battery = flags_6 & 0x02 != 0;
        let has_trainer = flags_6 & 0x04 != 0;
        let region = if rom_data[9] & 1 == 0 {
            Region::Ntsc
        } else {
            Region::Pal
        };

        /* the trainer, when present, sits between the header and PRG; we skip it */
        let prg_rom_start = HEADER_SIZE + if has_trainer { TRAINER_SIZE } else { 0 };
        let chr_rom_start = prg_rom_start + prg_rom_size;
        let chr_rom_end = chr_rom_start + chr_rom_size;

        if rom_data.len() < chr_rom_end {
            return Err(EmulatorError::InvalidRom(format!(
                "the image is truncated: expected {chr_rom_end} bytes, got {}",
                rom_data.len()
            )));
        }

        let (chr_data, chr_is_ram) = if chr_rom_size == 0 {
            (vec![0; CHR_BANK_SIZE], true)
        } else {
            (rom_data[chr_rom_start..chr_rom_end].to_vec(), false)
        };

        let rom = Rom {
            prg_data: rom_data[prg_rom_start..chr_rom_start].to_vec(),
            chr_data,
            chr_is_ram,
            mapper_id,
            mirroring,
            has_battery,
            region,
        };

        info!(
            "Cartridge: mapper {}, PRG {}kb, CHR {}kb{}, {:?} mirroring, {:?}{}",
            rom.mapper_id,
            rom.prg_data.len() / 1024,
            rom.chr_data.len() / 1024,
            if rom.chr_is_ram { " (RAM)" } else { "" },
            rom.mirroring,
            rom.region,
            if rom.has_battery { ", battery" } else { "" },
        );

        Ok(rom)
    }

    /* builds an iNES image in memory; prg must be a multiple of 16kb, chr of 8kb */
    #[cfg(test)]
    pub(crate) fn image_for_testing(mapper_id: u8, flags_6: u8, prg: &[u8], chr: &[u8]) -> Vec<u8> {
        let mut image = vec![0u8; HEADER_SIZE];
        image[0..4].copy_from_slice(b"NES\x1A");
        image[4] = (prg.len() / PRG_BANK_SIZE) as u8;
        image[5] = (chr.len() / CHR_BANK_SIZE) as u8;
        image[6] = (flags_6 & 0x0f) | (mapper_id << 4);
        image[7] = mapper_id & 0xf0;
        image.extend_from_slice(prg);
        image.extend_from_slice(chr);
        image
    }
}
