//! Audio buffers, clip assembly and WAV I/O.

pub mod assembler;
pub mod buffer;
pub mod wav;

pub use assembler::ClipAssembler;
pub use buffer::AudioBuffer;
