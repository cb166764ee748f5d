/// A block of 16-bit PCM mono audio at a known sample rate.
///
/// Produced by a synthesizer for one utterance and consumed by the
/// [`ClipAssembler`](crate::audio::assembler::ClipAssembler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// An empty buffer at the given rate.
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    /// Decode raw little-endian 16-bit PCM bytes.
    ///
    /// A trailing odd byte (half a sample) is ignored.
    pub fn from_pcm_le_bytes(bytes: &[u8], sample_rate: u32) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::new(samples, sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in milliseconds, rounded down.
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pcm_le_bytes_decodes_samples() {
        let bytes = [0x01, 0x00, 0xff, 0xff, 0x00, 0x80];
        let buf = AudioBuffer::from_pcm_le_bytes(&bytes, 16000);
        assert_eq!(buf.samples(), &[1, -1, i16::MIN]);
        assert_eq!(buf.sample_rate(), 16000);
    }

    #[test]
    fn from_pcm_le_bytes_ignores_trailing_byte() {
        let buf = AudioBuffer::from_pcm_le_bytes(&[0x10, 0x00, 0x7f], 8000);
        assert_eq!(buf.samples(), &[16]);
    }

    #[test]
    fn duration_ms_uses_sample_rate() {
        let buf = AudioBuffer::new(vec![0; 22050], 44100);
        assert_eq!(buf.duration_ms(), 500);
        assert_eq!(AudioBuffer::new(vec![0; 10], 0).duration_ms(), 0);
    }

    #[test]
    fn empty_buffer() {
        let buf = AudioBuffer::empty(44100);
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }
}
