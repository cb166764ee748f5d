//! WAV encoding for the assembled recording and decoding for local-engine clips.

use crate::audio::buffer::AudioBuffer;
use crate::error::{InterviewTtsError, Result};
use std::fs;
use std::io::{Read, Seek, Write};
use std::path::Path;

/// Output format: 16-bit mono PCM.
fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Decode a 16-bit PCM WAV stream into a mono buffer.
///
/// Stereo input is downmixed by averaging channels. The sample rate is kept
/// as-is; no resampling happens here.
pub fn decode_wav<R: Read>(reader: R) -> Result<AudioBuffer> {
    let mut wav_reader = hound::WavReader::new(reader).map_err(|e| InterviewTtsError::AudioDecode {
        message: format!("Failed to parse WAV data: {}", e),
    })?;

    let spec = wav_reader.spec();

    let raw_samples: Vec<i16> = wav_reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| InterviewTtsError::AudioDecode {
            message: format!("Failed to read WAV samples: {}", e),
        })?;

    let samples = match spec.channels {
        1 => raw_samples,
        2 => raw_samples
            .chunks_exact(2)
            .map(|chunk| {
                let left = chunk[0] as i32;
                let right = chunk[1] as i32;
                ((left + right) / 2) as i16
            })
            .collect(),
        n => {
            return Err(InterviewTtsError::AudioFormatMismatch {
                expected: "mono or stereo".to_string(),
                actual: format!("{} channels", n),
            });
        }
    };

    Ok(AudioBuffer::new(samples, spec.sample_rate))
}

/// Encode a buffer as WAV into any seekable writer.
pub fn write_wav_to<W: Write + Seek>(writer: W, audio: &AudioBuffer) -> Result<()> {
    let write_err = |e: hound::Error| InterviewTtsError::AudioWrite {
        message: e.to_string(),
    };

    let mut wav_writer = hound::WavWriter::new(writer, wav_spec(audio.sample_rate())).map_err(write_err)?;
    for &sample in audio.samples() {
        wav_writer.write_sample(sample).map_err(write_err)?;
    }
    wav_writer.finalize().map_err(write_err)
}

/// Write a buffer to a WAV file, creating parent directories as needed.
pub fn write_wav_file(path: &Path, audio: &AudioBuffer) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_wav_to(std::io::BufWriter::new(file), audio)
}
