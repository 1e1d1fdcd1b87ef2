/// Pixel to glyph conversion engine for asciipic.
///
/// Samples a resized frame into a grid of character cells.
pub mod compositor;
pub mod luminance;

pub use compositor::Compositor;
