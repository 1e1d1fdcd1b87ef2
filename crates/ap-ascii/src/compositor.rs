use ap_core::charset::{GlyphLut, Palette};
use ap_core::frame::{AsciiGrid, FrameBuffer};
use rayon::prelude::*;

use crate::luminance::sample_cell;

/// Compositor: frame redimensionnée → grille de cellules.
///
/// Chaque ligne de la grille est traitée par un seul worker rayon ; les
/// cellules n'ont aucune dépendance entre elles.
///
/// # Example
/// ```
/// use ap_ascii::compositor::Compositor;
/// use ap_core::charset::palette_or_default;
/// let c = Compositor::new(palette_or_default("a"));
/// assert_eq!(c.palette().id, 'a');
/// ```
pub struct Compositor {
    palette: &'static Palette,
    lut: GlyphLut,
}

impl Compositor {
    /// Create a compositor for one palette.
    #[must_use]
    pub fn new(palette: &'static Palette) -> Self {
        Self {
            palette,
            lut: GlyphLut::new(palette),
        }
    }

    /// Palette used by this compositor.
    #[must_use]
    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    /// Fill `grid` from `frame`.
    ///
    /// # Example
    /// ```
    /// use ap_ascii::compositor::Compositor;
    /// use ap_core::charset::palette_or_default;
    /// use ap_core::frame::{AsciiGrid, FrameBuffer};
    ///
    /// let compositor = Compositor::new(palette_or_default("a"));
    /// let frame = FrameBuffer::filled(10, 10, (255, 255, 255));
    /// let mut grid = AsciiGrid::new(10, 10);
    /// compositor.process(&frame, &mut grid);
    /// assert_eq!(grid.get(9, 9).ch, '@');
    /// ```
    pub fn process(&self, frame: &FrameBuffer, grid: &mut AsciiGrid) {
        if frame.is_empty() || grid.width == 0 {
            return;
        }
        let (grid_w, grid_h) = (grid.width, grid.height);
        let lut = &self.lut;

        grid.cells
            .par_chunks_mut(grid_w as usize)
            .enumerate()
            .for_each(|(cy, row)| {
                for (cx, cell) in row.iter_mut().enumerate() {
                    *cell = sample_cell(frame, lut, cx as u32, cy as u32, grid_w, grid_h);
                }
            });
    }

    /// Build a grid with the frame's own dimensions, one cell per pixel.
    ///
    /// # Example
    /// ```
    /// use ap_ascii::compositor::Compositor;
    /// use ap_core::charset::palette_or_default;
    /// use ap_core::frame::FrameBuffer;
    ///
    /// let frame = FrameBuffer::from_rgb(2, 1, &[(0, 0, 0), (255, 255, 255)]).unwrap();
    /// let grid = Compositor::new(palette_or_default("a")).convert(&frame);
    /// assert_eq!((grid.get(0, 0).ch, grid.get(1, 0).ch), (' ', '@'));
    /// ```
    #[must_use]
    pub fn convert(&self, frame: &FrameBuffer) -> AsciiGrid {
        let mut grid = AsciiGrid::new(frame.width, frame.height);
        self.process(frame, &mut grid);
        log::debug!(
            "Grille {}×{} composée avec la palette '{}'",
            grid.width,
            grid.height,
            self.palette.id
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luminance::process_luminance;
    use ap_core::charset::{PALETTES, palette_or_default};

    fn gradient(w: u32, h: u32) -> FrameBuffer {
        let pixels: Vec<_> = (0..w * h)
            .map(|i| {
                let v = (i * 255 / (w * h - 1)) as u8;
                (v, v / 2, 255 - v)
            })
            .collect();
        FrameBuffer::from_rgb(w, h, &pixels).unwrap()
    }

    #[test]
    fn parallel_matches_sequential() {
        let frame = gradient(37, 11);
        for palette in &PALETTES {
            let compositor = Compositor::new(palette);
            let parallel = compositor.convert(&frame);

            let mut sequential = AsciiGrid::new(frame.width, frame.height);
            process_luminance(&frame, &GlyphLut::new(palette), &mut sequential);
            assert_eq!(parallel.cells, sequential.cells, "palette {}", palette.id);
        }
    }

    #[test]
    fn empty_frame_yields_empty_grid() {
        let frame = FrameBuffer::new(5, 0);
        let grid = Compositor::new(palette_or_default("a")).convert(&frame);
        assert_eq!(grid.height, 0);
        assert!(grid.cells.is_empty());
    }

    #[test]
    fn unknown_palette_behaves_like_default() {
        let frame = gradient(8, 8);
        let a = Compositor::new(palette_or_default("a")).convert(&frame);
        let z = Compositor::new(palette_or_default("z")).convert(&frame);
        assert_eq!(a.cells, z.cells);
    }
}
