use ap_core::charset::GlyphLut;
use ap_core::color;
use ap_core::frame::{AsciiCell, AsciiGrid, FrameBuffer};

/// Échantillonne la cellule (cx, cy) de la grille dans `frame`.
///
/// Grid coordinates are mapped proportionally onto pixel coordinates, so a
/// frame already resized to the grid dimensions is read one pixel per cell.
///
/// # Example
/// ```
/// use ap_core::charset::{GlyphLut, palette_or_default};
/// use ap_core::frame::FrameBuffer;
/// use ap_ascii::luminance::sample_cell;
///
/// let frame = FrameBuffer::from_rgb(2, 1, &[(0, 0, 0), (255, 255, 255)]).unwrap();
/// let lut = GlyphLut::new(palette_or_default("a"));
/// assert_eq!(sample_cell(&frame, &lut, 1, 0, 2, 1).ch, '@');
/// ```
#[inline(always)]
#[must_use]
pub fn sample_cell(
    frame: &FrameBuffer,
    lut: &GlyphLut,
    cx: u32,
    cy: u32,
    grid_w: u32,
    grid_h: u32,
) -> AsciiCell {
    // Map grid coords to pixel coords
    let px = (u64::from(cx) * u64::from(frame.width) / u64::from(grid_w.max(1))) as u32;
    let py = (u64::from(cy) * u64::from(frame.height) / u64::from(grid_h.max(1))) as u32;
    let px = px.min(frame.width.saturating_sub(1));
    let py = py.min(frame.height.saturating_sub(1));

    let (r, g, b, _) = frame.pixel(px, py);
    let lum = color::luminance(r, g, b);
    AsciiCell {
        ch: lut.map(lum),
        fg: (r, g, b),
        lum,
    }
}

/// Process a frame into an ASCII grid, one row after the other.
///
/// Reference path for [`crate::compositor::Compositor`], which does the same
/// work row-parallel.
///
/// # Example
/// ```
/// use ap_core::charset::{GlyphLut, palette_or_default};
/// use ap_core::frame::{AsciiGrid, FrameBuffer};
/// use ap_ascii::luminance::process_luminance;
///
/// let frame = FrameBuffer::new(10, 10);
/// let mut grid = AsciiGrid::new(10, 10);
/// let lut = GlyphLut::new(palette_or_default("a"));
/// process_luminance(&frame, &lut, &mut grid);
/// ```
pub fn process_luminance(frame: &FrameBuffer, lut: &GlyphLut, grid: &mut AsciiGrid) {
    if frame.is_empty() {
        return;
    }
    for cy in 0..grid.height {
        for cx in 0..grid.width {
            let cell = sample_cell(frame, lut, cx, cy, grid.width, grid.height);
            grid.set(cx, cy, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ap_core::charset::palette_or_default;

    #[test]
    fn keeps_unboosted_source_color() {
        let frame = FrameBuffer::from_rgb(1, 1, &[(12, 200, 99)]).unwrap();
        let lut = GlyphLut::new(palette_or_default("b"));
        let cell = sample_cell(&frame, &lut, 0, 0, 1, 1);
        assert_eq!(cell.fg, (12, 200, 99));
        assert_eq!(cell.lum, color::luminance(12, 200, 99));
        assert_eq!(cell.ch, palette_or_default("b").glyph(cell.lum));
    }

    #[test]
    fn larger_frame_is_sampled_proportionally() {
        // 4×2 : colonne de gauche noire, droite blanche.
        let px: [(u8, u8, u8); 4] = [
            (0, 0, 0),
            (0, 0, 0),
            (255, 255, 255),
            (255, 255, 255),
        ];
        let frame = FrameBuffer::from_rgb(4, 2, &[px, px].concat()).unwrap();
        let lut = GlyphLut::new(palette_or_default("a"));
        let mut grid = AsciiGrid::new(2, 1);
        process_luminance(&frame, &lut, &mut grid);
        assert_eq!(grid.get(0, 0).ch, ' ');
        assert_eq!(grid.get(1, 0).ch, '@');
    }
}
