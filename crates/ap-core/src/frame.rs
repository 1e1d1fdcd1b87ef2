use crate::color::{self, Rgb};

/// Image RGBA décodée, en lecture seule une fois construite.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use ap_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Crée un buffer rempli d'une couleur opaque.
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (5, 5, 5));
    /// assert_eq!(fb.pixel(1, 1), (5, 5, 5, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: Rgb) -> Self {
        let data = [rgb.0, rgb.1, rgb.2, 255].repeat(width as usize * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// Construit un buffer à partir de pixels RGB opaques, row-major.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::from_rgb(2, 1, &[(0, 0, 0), (255, 255, 255)]).unwrap();
    /// assert_eq!(fb.pixel(1, 0), (255, 255, 255, 255));
    /// ```
    #[must_use]
    pub fn from_rgb(width: u32, height: u32, pixels: &[Rgb]) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        let data = pixels.iter().flat_map(|&(r, g, b)| [r, g, b, 255]).collect();
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Luminance perceptuelle du pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(1, 1, (255, 255, 255));
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b, _) = self.pixel(x, y);
        color::luminance(r, g, b)
    }

    /// Vrai si l'image n'a aucun pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Grille de sortie ASCII.
///
/// # Example
/// ```
/// use ap_core::frame::{AsciiGrid, AsciiCell};
/// let mut grid = AsciiGrid::new(80, 24);
/// grid.set(0, 0, AsciiCell { ch: '@', fg: (255, 0, 0), lum: 76 });
/// assert_eq!(grid.get(0, 0).ch, '@');
/// ```
#[derive(Clone, Debug)]
pub struct AsciiGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<AsciiCell>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

/// Single cell in the ASCII grid. Its position is its slot in the grid.
///
/// # Example
/// ```
/// use ap_core::frame::AsciiCell;
/// let cell = AsciiCell::default();
/// assert_eq!(cell.ch, ' ');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsciiCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur source non boostée (RGB).
    pub fg: Rgb,
    /// Luminance de la couleur source.
    pub lum: u8,
}

impl Default for AsciiCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: (0, 0, 0),
            lum: 0,
        }
    }
}

impl AsciiGrid {
    /// Crée une grille pré-allouée.
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::AsciiGrid;
    /// let grid = AsciiGrid::new(80, 24);
    /// assert_eq!(grid.cells.len(), 80 * 24);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![AsciiCell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, cell: AsciiCell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &AsciiCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows, top to bottom.
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::AsciiGrid;
    /// let grid = AsciiGrid::new(3, 2);
    /// assert_eq!(grid.rows().count(), 2);
    /// assert!(grid.rows().all(|row| row.len() == 3));
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = &[AsciiCell]> {
        // chunks(0) panique : une grille de largeur nulle n'a aucune ligne.
        let width = (self.width as usize).max(1);
        self.cells.chunks(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgb_rejects_wrong_length() {
        assert!(FrameBuffer::from_rgb(2, 2, &[(0, 0, 0)]).is_none());
    }

    #[test]
    fn luminance_ignores_alpha() {
        let mut fb = FrameBuffer::filled(1, 1, (255, 255, 255));
        fb.data[3] = 0;
        assert_eq!(fb.luminance(0, 0), 255);
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid = AsciiGrid::new(4, 0);
        assert_eq!(grid.rows().count(), 0);
        let grid = AsciiGrid::new(0, 3);
        assert_eq!(grid.rows().count(), 0);
    }

    #[test]
    fn set_get_roundtrip_uses_row_major() {
        let mut grid = AsciiGrid::new(3, 2);
        let cell = AsciiCell {
            ch: '#',
            fg: (1, 2, 3),
            lum: 9,
        };
        grid.set(2, 1, cell);
        assert_eq!(grid.cells[5], cell);
        assert_eq!(*grid.get(2, 1), cell);
    }
}
