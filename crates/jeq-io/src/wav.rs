//! WAV file reading and writing.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};

use crate::{Error, Result};

/// Left and right channel buffers of equal length.
///
/// ```rust
/// use jeq_io::StereoSamples;
///
/// let samples = StereoSamples::new(vec![1.0; 4], vec![0.5; 4]);
/// assert_eq!(samples.len(), 4);
/// assert_eq!(samples.to_interleaved()[..2], [1.0, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Create new stereo samples from left and right channels.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "Channels must have same length");
        Self { left, right }
    }

    /// Create stereo samples from mono by duplicating to both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    /// Check if the buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to interleaved format (L, R, L, R, ...).
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(&l, &r)| [l, r])
            .collect()
    }

    /// Create from interleaved format (L, R, L, R, ...). A trailing odd
    /// sample is dropped.
    pub fn from_interleaved(interleaved: &[f32]) -> Self {
        Self::from_frames(interleaved, 2)
    }

    /// Take the first two channels of an interleaved buffer with `channels`
    /// channels per frame. Mono input is duplicated.
    fn from_frames(interleaved: &[f32], channels: usize) -> Self {
        if channels <= 1 {
            return Self::from_mono(interleaved.to_vec());
        }
        let (left, right) = interleaved
            .chunks_exact(channels)
            .map(|frame| (frame[0], frame[1]))
            .unzip();
        Self { left, right }
    }
}

/// Audio format of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 16 or 24 (integer) or 32 (float).
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
        let sample_format = if spec.bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        };
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format,
        }
    }
}

/// Read a WAV file as stereo.
///
/// Mono files are duplicated to both channels; channels beyond the second
/// are ignored. Integer samples are scaled into `[-1.0, 1.0)`.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let all_samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let stereo = StereoSamples::from_frames(&all_samples, usize::from(spec.channels));

    tracing::info!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = stereo.len(),
        "read WAV"
    );

    Ok((stereo, spec))
}

/// Write stereo samples to a WAV file.
///
/// The file always has two channels. `spec.bits_per_sample` selects 16 or
/// 24-bit integer (samples clamped) or 32-bit float output.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let path = path.as_ref();
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output (use 16, 24 or 32)",
            spec.bits_per_sample
        )));
    }

    let stereo_spec = WavSpec {
        channels: 2,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(stereo_spec))?;

    if spec.bits_per_sample == 32 {
        for (l, r) in samples.left.iter().zip(&samples.right) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        let quantize = |s: f32| (s * max_val).round().clamp(-max_val, max_val - 1.0) as i32;
        for (l, r) in samples.left.iter().zip(&samples.right) {
            writer.write_sample(quantize(*l))?;
            writer.write_sample(quantize(*r))?;
        }
    }

    writer.finalize()?;

    tracing::info!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "wrote WAV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn test_signal() -> StereoSamples {
        let left: Vec<f32> = (0..1000).map(|i| (i as f32 / 100.0).sin() * 0.9).collect();
        let right: Vec<f32> = (0..1000).map(|i| (i as f32 / 100.0).cos() * 0.9).collect();
        StereoSamples::new(left, right)
    }

    #[test]
    fn test_stereo_samples_from_mono() {
        let mono = vec![1.0, 2.0, 3.0];
        let stereo = StereoSamples::from_mono(mono.clone());
        assert_eq!(stereo.left, mono);
        assert_eq!(stereo.right, mono);
    }

    #[test]
    fn test_stereo_samples_interleaved() {
        let stereo = StereoSamples::new(vec![1.0, 3.0], vec![2.0, 4.0]);
        let interleaved = stereo.to_interleaved();
        assert_eq!(interleaved, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(StereoSamples::from_interleaved(&interleaved), stereo);
        assert_eq!(StereoSamples::from_interleaved(&[1.0, 2.0, 9.0]).len(), 1);
    }

    #[test]
    fn test_extra_channels_ignored() {
        let frames = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let stereo = StereoSamples::from_frames(&frames, 3);
        assert_eq!(stereo.left, vec![1.0, 4.0]);
        assert_eq!(stereo.right, vec![2.0, 5.0]);
    }

    #[test]
    fn test_stereo_roundtrip_f32() {
        let samples = test_signal();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_stereo_roundtrip_int() {
        for bits in [16u16, 24] {
            let samples = test_signal();
            let spec = WavSpec {
                channels: 2,
                sample_rate: 44100,
                bits_per_sample: bits,
            };
            let file = NamedTempFile::new().unwrap();
            write_wav_stereo(file.path(), &samples, spec).unwrap();

            let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
            assert_eq!(loaded_spec.bits_per_sample, bits);
            assert_eq!(loaded.len(), samples.len());
            for (a, b) in samples.left.iter().zip(&loaded.left) {
                assert!((a - b).abs() < 1e-4, "{bits}-bit error too large");
            }
        }
    }

    #[test]
    fn test_read_mono_as_stereo() {
        let file = NamedTempFile::new().unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        for v in [0i16, 16384, -16384] {
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let (stereo, spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(spec.channels, 1);
        assert_eq!(stereo.left, vec![0.0, 0.5, -0.5]);
        assert_eq!(stereo.left, stereo.right);
    }

    #[test]
    fn test_write_clamps_overs() {
        let samples = StereoSamples::new(vec![2.0, -2.0], vec![0.0, 0.0]);
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();
        let (loaded, _) = read_wav_stereo(file.path()).unwrap();
        assert!(loaded.left[0] < 1.0 && loaded.left[0] > 0.999);
        assert_eq!(loaded.left[1], -1.0);
    }

    #[test]
    fn test_unsupported_bit_depth() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 12,
        };
        let err = write_wav_stereo(file.path(), &test_signal(), spec).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_wav_stereo("/nonexistent/jeq/input.wav"),
            Err(Error::Wav(_))
        ));
    }
}
