/// PNG export for asciipic: glyph rasterization and lossless encoding.

pub mod encoder;
pub mod font;
pub mod rasterizer;

use ap_core::config::RenderConfig;
use ap_core::error::CoreError;
use ap_core::frame::AsciiGrid;

pub use rasterizer::{RasterStyle, Rasterizer};

/// Rasterise la grille et l'écrit en PNG à `config.output_path`.
///
/// `glyphs` lists the characters that may appear in the grid (the active
/// palette); they are rasterized once up front. The embedded fallback face
/// backs up the primary font for glyphs it lacks.
///
/// Returns the canvas dimensions.
///
/// # Errors
/// [`CoreError::Geometry`] if the canvas would be too large (nothing is
/// written), [`CoreError::Io`] for an unreadable external font or an unwritable output,
/// [`CoreError::FontLoad`] for an unparsable font, [`CoreError::Encode`] if
/// PNG encoding fails.
pub fn export_png(
    grid: &AsciiGrid,
    glyphs: &[char],
    config: &RenderConfig,
) -> Result<(u32, u32), CoreError> {
    let font_data = font::load_font_data(config.font_path.as_deref())?;
    let faces = [&*font_data, font::FALLBACK_FONT];
    let rasterizer = Rasterizer::new(&faces, config.font_size, glyphs)?;
    let canvas = rasterizer.render(grid, RasterStyle::from_config(config))?;
    log::info!(
        "Canvas {}×{} pour une grille {}×{}",
        canvas.width,
        canvas.height,
        grid.width,
        grid.height
    );
    encoder::save_png(&canvas, &config.output_path)?;
    Ok((canvas.width, canvas.height))
}
