//! Test signal generation command.

use clap::{Args, Subcommand};
use muros_io::{StereoSamples, WavSpec, write_wav_stereo};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Tone {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            let num_samples = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..num_samples)
                .map(|n| {
                    let t = n as f32 / sample_rate as f32;
                    (core::f32::consts::TAU * freq * t).sin() * amplitude
                })
                .collect();

            println!(
                "Generating {freq} Hz tone: {duration}s at {sample_rate} Hz -> {}",
                output.display()
            );
            write_signal(&output, samples, sample_rate)
        }
        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
        } => {
            let num_samples = (duration * sample_rate as f32) as usize;
            // xorshift32: deterministic, dependency-free white noise.
            let mut seed = 0x9e3779b9u32;
            let samples: Vec<f32> = (0..num_samples)
                .map(|_| {
                    seed ^= seed << 13;
                    seed ^= seed >> 17;
                    seed ^= seed << 5;
                    (seed as f32 / u32::MAX as f32 * 2.0 - 1.0) * amplitude
                })
                .collect();

            println!(
                "Generating white noise: {duration}s at {sample_rate} Hz -> {}",
                output.display()
            );
            write_signal(&output, samples, sample_rate)
        }
    }
}

fn write_signal(output: &Path, samples: Vec<f32>, sample_rate: u32) -> anyhow::Result<()> {
    let stereo = StereoSamples::from_mono(samples);
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav_stereo(output, &stereo, spec)?;
    println!("Done!");
    Ok(())
}
