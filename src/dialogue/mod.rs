pub mod clean;
pub mod parser;
pub mod types;

pub use clean::clean_text;
pub use parser::parse;
pub use types::{Speaker, Utterance};
