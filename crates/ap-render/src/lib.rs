/// Terminal rendering for asciipic.
///
/// Turns a character grid into text, with optional 24-bit color escapes.
pub mod text;

pub use text::{render_text, write_text};
