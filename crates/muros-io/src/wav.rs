//! WAV file reading and writing.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Planar stereo sample storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Creates stereo storage from two equal-length channel buffers.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len());
        Self { left, right }
    }

    /// Duplicates a mono buffer onto both channels.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            left: samples.clone(),
            right: samples,
        }
    }

    /// Deinterleaves an L/R-interleaved buffer.
    pub fn from_interleaved(samples: &[f32]) -> Self {
        let mut left = Vec::with_capacity(samples.len() / 2);
        let mut right = Vec::with_capacity(samples.len() / 2);
        for pair in samples.chunks_exact(2) {
            left.push(pair[0]);
            right.push(pair[1]);
        }
        Self { left, right }
    }

    /// Interleaves into an L/R buffer.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.left.len() * 2);
        for (l, r) in self.left.iter().zip(self.right.iter()) {
            out.push(*l);
            out.push(*r);
        }
        out
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffers hold no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Reads a WAV file as stereo samples plus its spec.
///
/// Mono files are expanded to both channels. Files with more than two
/// channels contribute their first two.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;

    let all_samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let max_val = (1i32 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let stereo = match channels {
        1 => StereoSamples::from_mono(all_samples),
        2 => StereoSamples::from_interleaved(&all_samples),
        _ => {
            let frames = all_samples.len() / channels;
            let mut left = Vec::with_capacity(frames);
            let mut right = Vec::with_capacity(frames);
            for frame in all_samples.chunks(channels) {
                left.push(frame[0]);
                right.push(frame.get(1).copied().unwrap_or(frame[0]));
            }
            StereoSamples::new(left, right)
        }
    };

    Ok((stereo, spec))
}

/// Writes stereo samples to a WAV file.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let mut stereo_spec = spec;
    stereo_spec.channels = 2;

    let hound_spec = hound::WavSpec::from(stereo_spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            let int_l = (*l * max_val).clamp(-max_val, max_val - 1.0) as i32;
            let int_r = (*r * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_l)?;
            writer.write_sample(int_r)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// WAV metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Sample frames per channel.
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Reads WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len());
    let num_frames = total_samples / u64::from(spec.channels);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn stereo_roundtrip_f32() {
        let left: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let right: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).cos()).collect();
        let samples = StereoSamples::new(left.clone(), right.clone());

        let spec = WavSpec::default();
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 48000);
        assert_eq!(loaded.len(), samples.len());

        for (a, b) in left.iter().zip(loaded.left.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
        for (a, b) in right.iter().zip(loaded.right.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn stereo_roundtrip_i16() {
        let left: Vec<f32> = (0..500).map(|i| (i as f32 / 500.0).sin() * 0.9).collect();
        let samples = StereoSamples::new(left.clone(), left.clone());

        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, _) = read_wav_stereo(file.path()).unwrap();
        for (a, b) in left.iter().zip(loaded.left.iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn interleave_roundtrip() {
        let stereo = StereoSamples::new(vec![1.0, 3.0], vec![2.0, 4.0]);
        let interleaved = stereo.to_interleaved();
        assert_eq!(interleaved, vec![1.0, 2.0, 3.0, 4.0]);

        let back = StereoSamples::from_interleaved(&interleaved);
        assert_eq!(back, stereo);
    }

    #[test]
    fn info_reports_frames_and_duration() {
        let samples = StereoSamples::from_mono(vec![0.0; 48000]);
        let spec = WavSpec::default();
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.num_frames, 48000);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
    }
}
