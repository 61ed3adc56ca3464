//! WAV metadata and parameter mapping display.

use clap::Args;
use muros_core::{Slope, WallCount, WallMaterial};
use muros_io::read_wav_info;
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// WAV file to inspect (omit to only show the parameter mapping)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.input {
        let info = read_wav_info(path)?;
        println!("{}:", path.display());
        println!("  Channels:    {}", info.channels);
        println!("  Sample rate: {} Hz", info.sample_rate);
        println!("  Bit depth:   {}", info.bits_per_sample);
        println!("  Frames:      {}", info.num_frames);
        println!("  Duration:    {:.2}s", info.duration_secs);
        println!();
    }

    println!("Materials (slope):");
    for material in WallMaterial::ALL {
        let slope = Slope::from_material(material);
        println!(
            "  {:<9} {:>2} dB/oct ({} stage{})",
            material.label(),
            slope.db_per_octave(),
            slope.stages(),
            if slope.stages() == 1 { "" } else { "s" },
        );
    }

    println!("Walls in between (cutoff):");
    for walls in WallCount::ALL {
        if walls.is_sentinel() {
            println!("  {:<9} bypass", walls.index());
        } else {
            println!("  {:<9} {} Hz", walls.index(), walls.cutoff_hz());
        }
    }

    Ok(())
}
