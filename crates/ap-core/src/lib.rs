/// Configuration, types, and shared structures for asciipic.
///
/// This crate contains the palette registry, the color arithmetic shared by
/// both renderers, the conversion configuration, and the error taxonomy.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;

pub use charset::{GlyphLut, Palette};
pub use config::RenderConfig;
pub use error::CoreError;
pub use frame::{AsciiCell, AsciiGrid, FrameBuffer};
