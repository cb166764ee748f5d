//! Text-to-speech backends.

pub mod command;
#[cfg(feature = "elevenlabs")]
pub mod elevenlabs;
pub mod synthesizer;

pub use command::CommandSynthesizer;
#[cfg(feature = "elevenlabs")]
pub use elevenlabs::ElevenLabsSynthesizer;
pub use synthesizer::{MockSynthesizer, Synthesizer};
