//! File-based wall filter processing command.

use crate::preset::Preset;
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use muros_core::WallMaterial;
use muros_host::{WallParams, WallProcessor, load_state, save_state};
use muros_io::{WavSpec, read_wav_stereo, write_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Wall material (glass, wood, drywall, concrete)
    #[arg(short, long)]
    material: Option<String>,

    /// Walls between source and listener (0-4)
    #[arg(short, long)]
    walls: Option<u32>,

    /// Preset file (TOML)
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Restore parameters from a saved state file (JSON)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Save the resolved parameters to a state file (JSON)
    #[arg(long)]
    save_state: Option<PathBuf>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be positive");

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    // Resolve parameters: saved state, then preset, then explicit flags.
    let params = WallParams::new();

    if let Some(path) = &args.state {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading state {}", path.display()))?;
        load_state(&params, &bytes)
            .with_context(|| format!("restoring state {}", path.display()))?;
    }

    if let Some(path) = &args.preset {
        let preset = Preset::from_path(path)?;
        if let Some(name) = &preset.name {
            println!("Loading preset: {name}");
        }
        preset.apply(&params)?;
    }

    if let Some(material) = &args.material {
        let material = WallMaterial::from_label(material)
            .with_context(|| format!("unknown material '{material}'"))?;
        params.set_material(material);
    }

    if let Some(walls) = args.walls {
        anyhow::ensure!(walls <= 4, "wall count {walls} out of range 0-4");
        params.set_walls_index(walls);
    }

    let settings = params.snapshot();
    if settings.walls.is_sentinel() {
        println!("Walls: 0 x {} (bypass)", params.material().label());
    } else {
        println!(
            "Walls: {} x {} ({} Hz cutoff, {} dB/oct)",
            settings.walls.index(),
            params.material().label(),
            settings.walls.cutoff_hz(),
            settings.slope.db_per_octave(),
        );
    }

    let mut processor = WallProcessor::new(params.clone(), sample_rate);
    processor.prepare(sample_rate);

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let input_peak = peak(&samples.left).max(peak(&samples.right));
    let total = samples.len();
    let block_size = args.block_size;

    for (done, (left, right)) in samples
        .left
        .chunks_mut(block_size)
        .zip(samples.right.chunks_mut(block_size))
        .enumerate()
    {
        let mut channels: [&mut [f32]; 2] = [left, right];
        processor.process(&mut channels, 2);
        pb.set_position((((done + 1) * block_size).min(total)) as u64);
    }

    pb.finish_with_message("done");

    let output_peak = peak(&samples.left).max(peak(&samples.right));
    println!("\nStats:");
    println!("  Input peak:  {:.1} dB", linear_to_db(input_peak));
    println!("  Output peak: {:.1} dB", linear_to_db(output_peak));

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &samples, out_spec)?;

    if let Some(path) = &args.save_state {
        let bytes = save_state(&params)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("writing state {}", path.display()))?;
        println!("Saved state to {}", path.display());
    }

    println!("Done!");
    Ok(())
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

fn linear_to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-10).log10()
}
