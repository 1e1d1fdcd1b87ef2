use std::fmt::Write as _;
use std::io;

use ap_core::color::{self, Rgb};
use ap_core::frame::{AsciiCell, AsciiGrid};

/// Séquence de reset SGR.
pub const RESET: &str = "\x1b[0m";

/// Écrit une cellule. En couleur, chaque glyphe est autonome :
/// `ESC[38;2;R;G;Bm` + glyphe + `ESC[0m`, sans état reporté entre cellules.
#[inline(always)]
fn push_cell(out: &mut String, cell: &AsciiCell, color_enabled: bool) {
    if color_enabled {
        // Pas de boost côté terminal : couleur source telle quelle.
        let (r, g, b): Rgb = color::transform(cell.fg, 100, None).fg;
        // fmt::Write sur String est infaillible.
        let _ = write!(out, "\x1b[38;2;{r};{g};{b}m{}{RESET}", cell.ch);
    } else {
        out.push(cell.ch);
    }
}

/// Render one grid row, including its trailing line break.
fn render_row(out: &mut String, row: &[AsciiCell], color_enabled: bool) {
    for cell in row {
        push_cell(out, cell, color_enabled);
    }
    out.push('\n');
}

/// Rendu texte complet de la grille : une ligne par rangée, chacune terminée
/// par `\n`.
///
/// # Example
/// ```
/// use ap_core::frame::{AsciiCell, AsciiGrid};
/// use ap_render::text::render_text;
///
/// let mut grid = AsciiGrid::new(2, 1);
/// grid.set(1, 0, AsciiCell { ch: '@', fg: (255, 255, 255), lum: 255 });
/// assert_eq!(render_text(&grid, false), " @\n");
/// assert_eq!(
///     render_text(&grid, true),
///     "\x1b[38;2;0;0;0m \x1b[0m\x1b[38;2;255;255;255m@\x1b[0m\n"
/// );
/// ```
#[must_use]
pub fn render_text(grid: &AsciiGrid, color_enabled: bool) -> String {
    // Capacité : glyphe UTF-8 (≤ 4 octets) + ~24 octets d'échappement par cellule.
    let per_cell = if color_enabled { 28 } else { 4 };
    let mut out = String::with_capacity(grid.cells.len() * per_cell + grid.height as usize);
    for row in grid.rows() {
        render_row(&mut out, row, color_enabled);
    }
    out
}

/// Écrit la grille ligne par ligne dans `w`.
///
/// Each row is handed to the writer as soon as it is built.
///
/// # Errors
/// Propagates any error from the underlying writer.
///
/// # Example
/// ```
/// use ap_core::frame::AsciiGrid;
/// use ap_render::text::write_text;
///
/// let grid = AsciiGrid::new(3, 2);
/// let mut out = Vec::new();
/// write_text(&grid, false, &mut out).unwrap();
/// assert_eq!(out, b"   \n   \n");
/// ```
pub fn write_text<W: io::Write>(grid: &AsciiGrid, color_enabled: bool, w: &mut W) -> io::Result<()> {
    let mut line = String::new();
    for row in grid.rows() {
        line.clear();
        render_row(&mut line, row, color_enabled);
        w.write_all(line.as_bytes())?;
    }
    w.flush()?;
    log::debug!(
        "Texte écrit : {}×{} (couleur : {color_enabled})",
        grid.width,
        grid.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cells() -> AsciiGrid {
        let mut grid = AsciiGrid::new(2, 1);
        grid.set(
            0,
            0,
            AsciiCell {
                ch: ' ',
                fg: (0, 0, 0),
                lum: 0,
            },
        );
        grid.set(
            1,
            0,
            AsciiCell {
                ch: '@',
                fg: (255, 255, 255),
                lum: 255,
            },
        );
        grid
    }

    #[test]
    fn monochrome_is_one_glyph_per_cell() {
        assert_eq!(render_text(&two_cells(), false), " @\n");
    }

    #[test]
    fn color_wraps_every_cell_including_blank() {
        let out = render_text(&two_cells(), true);
        assert_eq!(
            out,
            "\x1b[38;2;0;0;0m \x1b[0m\x1b[38;2;255;255;255m@\x1b[0m\n"
        );
        assert_eq!(out.matches(RESET).count(), 2);
    }

    #[test]
    fn multibyte_glyphs_are_kept_whole() {
        let mut grid = AsciiGrid::new(1, 2);
        let cell = AsciiCell {
            ch: '⣿',
            fg: (1, 2, 3),
            lum: 1,
        };
        grid.set(0, 0, cell);
        grid.set(0, 1, cell);
        assert_eq!(render_text(&grid, false), "⣿\n⣿\n");
        assert_eq!(
            render_text(&grid, true),
            "\x1b[38;2;1;2;3m⣿\x1b[0m\n\x1b[38;2;1;2;3m⣿\x1b[0m\n"
        );
    }

    #[test]
    fn empty_grid_renders_nothing() {
        assert_eq!(render_text(&AsciiGrid::new(5, 0), true), "");
    }

    #[test]
    fn writer_matches_string_renderer() {
        let grid = two_cells();
        for color in [false, true] {
            let mut out = Vec::new();
            write_text(&grid, color, &mut out).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), render_text(&grid, color));
        }
    }
}
