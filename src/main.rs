use anyhow::{Context, Result};
use clap::Parser;
use famicore::ppu::{RenderingMode, SCREEN_HEIGHT, SCREEN_WIDTH};
use famicore::save_state::SaveState;
use famicore::Console;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CommandLineArgs::parse();

    let mut console =
        Console::from_file(&args.rom).with_context(|| format!("Could not load {}", args.rom))?;
    if args.split {
        console.set_rendering_mode(RenderingMode::Split);
    }
    if let Some(savefile) = &args.savefile {
        load_save_file(&mut console, savefile);
    }

    let result = run(&mut console, &args);

    /* save RAM is written even if emulation stopped on an error */
    if let Some(savefile) = &args.savefile {
        run_on_exit(&console, savefile)?;
    }

    result
}

fn run(console: &mut Console, args: &CommandLineArgs) -> Result<()> {
    if let Some(path) = &args.state_in {
        let bytes = fs::read(path).with_context(|| format!("Could not read {path}"))?;
        let state = SaveState::from_bytes(&bytes)?;
        console.load_state(&state)?;
    }

    let mut frames = 0;
    for _ in 0..args.frames {
        if console.run_frame()? {
            frames += 1;
        }
        console.acknowledge_frame();
    }
    info!(
        "Ran {} CPU cycles, {frames} of {} frames rendered",
        console.cpu().cycles,
        args.frames
    );

    if let Some(path) = &args.frame_out {
        write_png(path, &console.frame().color)?;
    }
    if let Some(path) = &args.state_out {
        let bytes = console.save_state().to_bytes()?;
        fs::write(path, bytes).with_context(|| format!("Could not write {path}"))?;
    }
    Ok(())
}

/* a missing save file just means a fresh game */
fn load_save_file(console: &mut Console, savefile: &str) {
    match fs::read(savefile) {
        Ok(data) => console.load_save_data(&data),
        Err(x) => warn!("Not loading save file {savefile}: {x}"),
    }
}

fn run_on_exit(console: &Console, savefile: &str) -> Result<()> {
    if let Some(save_data) = console.save_data() {
        fs::write(savefile, save_data)
            .with_context(|| format!("Failed to write to save file {savefile}"))?;
    }
    Ok(())
}

fn write_png(path: &str, rgba: &[u8]) -> Result<()> {
    let mut file =
        BufWriter::new(File::create(path).with_context(|| format!("Could not create {path}"))?);
    let encoder = PngEncoder::new(&mut file);
    encoder.write_image(
        rgba,
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
        ExtendedColorType::Rgba8,
    )?;
    file.flush()?;
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "Runs a cartridge headless for a number of frames", long_about = None)]
struct CommandLineArgs {
    /// rom file
    rom: String,

    /// how many frames to run
    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    /// save file for games with battery-backed saves
    #[arg(short, long)]
    savefile: Option<String>,

    /// restore this save state before running
    #[arg(long)]
    state_in: Option<String>,

    /// write a save state here when done
    #[arg(long)]
    state_out: Option<String>,

    /// write the last frame here, as a PNG image
    #[arg(long)]
    frame_out: Option<String>,

    /// keep separate background and sprite layers
    #[arg(long)]
    split: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_png() {
        let path = std::env::temp_dir().join(format!("famicore-frame-{}.png", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        let mut rgba = vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * 4];
        rgba[0..4].copy_from_slice(&[0x12, 0x34, 0x56, 0xff]);

        write_png(&path, &rgba).unwrap();
        let image = image::open(&path).unwrap().into_rgba8();
        fs::remove_file(&path).unwrap();

        assert_eq!(image.dimensions(), (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32));
        assert_eq!(image.get_pixel(0, 0).0, [0x12, 0x34, 0x56, 0xff]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }
}
