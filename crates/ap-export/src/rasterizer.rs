use std::collections::HashMap;

use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use ap_core::color::{self, CellColors, GLOW_TINT_PERCENT, Rgb};
use ap_core::config::RenderConfig;
use ap_core::error::CoreError;
use ap_core::frame::{AsciiCell, AsciiGrid, FrameBuffer};
use rayon::prelude::*;

/// Marge autour de la grille, sur les quatre côtés (pixels).
pub const PADDING: u32 = 40;

/// Fond du canvas, quasi noir.
pub const CANVAS_BACKGROUND: Rgb = (5, 5, 5);

/// Plus grand côté accepté par le format PNG.
pub const MAX_CANVAS_SIDE: u32 = i32::MAX as u32;

/// Plafond de pixels du canvas (1 Gio en RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Hauteur de cellule = taille de police × 18 / 10.
const LINE_HEIGHT_NUM: u32 = 18;
const LINE_HEIGHT_DEN: u32 = 10;

/// Paramètres de coloration de l'export.
///
/// # Example
/// ```
/// use ap_export::rasterizer::RasterStyle;
/// use ap_core::frame::AsciiCell;
///
/// let mono = RasterStyle { color_enabled: false, brightness_boost: 100 };
/// let cell = AsciiCell { ch: '#', fg: (10, 200, 30), lum: 123 };
/// assert_eq!(mono.cell_colors(&cell).fg, (123, 123, 123));
/// assert_eq!(mono.cell_colors(&cell).bg, None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterStyle {
    /// Colored glyphs on a tinted cell, or gray glyphs on the bare canvas.
    pub color_enabled: bool,
    /// Foreground boost in percent.
    pub brightness_boost: u32,
}

impl RasterStyle {
    /// Extract the raster style from a configuration.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            color_enabled: config.color_enabled,
            brightness_boost: config.brightness_boost,
        }
    }

    /// Couleurs finales d'une cellule.
    ///
    /// Couleur : glyphe boosté sur un fond à 30 % de la couleur source.
    /// Monochrome : gris = luminance boostée, pas de fond.
    #[inline]
    #[must_use]
    pub fn cell_colors(&self, cell: &AsciiCell) -> CellColors {
        if self.color_enabled {
            color::transform(cell.fg, self.brightness_boost, Some(GLOW_TINT_PERCENT))
        } else {
            let gray = color::scale_channel(cell.lum, self.brightness_boost);
            CellColors {
                fg: (gray, gray, gray),
                bg: None,
            }
        }
    }
}

/// Couverture alpha d'un glyphe, relative au coin haut-gauche de la cellule.
struct CachedGlyph {
    left: i32,
    top: i32,
    width: usize,
    coverage: Vec<u8>,
}

/// Convertit une AsciiGrid en canvas RGBA.
///
/// Les glyphes sont rasterisés une seule fois à la construction ; les polices
/// ne sont plus nécessaires ensuite.
pub struct Rasterizer {
    cell_width: u32,
    cell_height: u32,
    baseline: u32,
    glyph_cache: HashMap<char, CachedGlyph>,
}

impl Rasterizer {
    /// Parse les faces et pré-rasterise `glyphs` à `font_size` pixels par em.
    ///
    /// `faces` est une chaîne de repli : chaque glyphe vient de la première
    /// face qui le contient. La première face fixe la baseline. Un glyphe
    /// absent de toutes les faces est dessiné avec le `.notdef` de la
    /// première (une boîte pour les polices usuelles).
    ///
    /// # Errors
    /// [`CoreError::FontLoad`] if `faces` is empty or one of them is not a
    /// valid TrueType/OpenType font.
    ///
    /// # Example
    /// ```
    /// use ap_export::font::EMBEDDED_FONT;
    /// use ap_export::rasterizer::Rasterizer;
    /// let r = Rasterizer::new(&[EMBEDDED_FONT], 10, &[' ', '@']).unwrap();
    /// assert_eq!(r.cell_size(), (10, 18));
    /// assert_eq!(r.canvas_dimensions(1, 1).unwrap(), (90, 98));
    /// ```
    pub fn new(faces: &[&[u8]], font_size: u32, glyphs: &[char]) -> Result<Self, CoreError> {
        let faces = faces
            .iter()
            .map(|data| {
                FontRef::try_from_slice(data).map_err(|e| CoreError::FontLoad(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let Some(primary) = faces.first() else {
            return Err(CoreError::FontLoad("aucune police fournie".into()));
        };

        let font_size = font_size.max(1);
        let em = font_size as f32;
        let ascent = primary.as_scaled(em_scale(primary, em)).ascent().round();

        let mut rasterizer = Self {
            cell_width: font_size,
            cell_height: (font_size.saturating_mul(LINE_HEIGHT_NUM) / LINE_HEIGHT_DEN).max(1),
            baseline: ascent.max(0.0) as u32,
            glyph_cache: HashMap::with_capacity(glyphs.len()),
        };

        let mut fallbacks = 0usize;
        for &ch in glyphs {
            if rasterizer.glyph_cache.contains_key(&ch) {
                continue;
            }
            let found = faces.iter().enumerate().find_map(|(i, face)| {
                let gid = face.glyph_id(ch);
                (gid.0 != 0).then_some((i, face, gid))
            });
            let glyph = match found {
                Some((i, face, gid)) => {
                    if i > 0 {
                        fallbacks += 1;
                    }
                    rasterize_glyph(face, em_scale(face, em), ascent, gid)
                }
                None => {
                    log::warn!(
                        "Glyphe absent des polices : {ch:?} (U+{:04X}), rendu en .notdef",
                        ch as u32
                    );
                    rasterize_glyph(primary, em_scale(primary, em), ascent, GlyphId(0))
                }
            };
            rasterizer.glyph_cache.insert(ch, glyph);
        }

        log::debug!(
            "Rasterizer : cellule {}×{}, baseline {}px, {} glyphes en cache ({fallbacks} en repli)",
            rasterizer.cell_width,
            rasterizer.cell_height,
            rasterizer.baseline,
            rasterizer.glyph_cache.len()
        );
        Ok(rasterizer)
    }

    /// Taille d'une cellule (largeur, hauteur) en pixels.
    #[must_use]
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Distance du haut de cellule à la baseline (ascent arrondi), en pixels.
    #[must_use]
    pub fn baseline(&self) -> u32 {
        self.baseline
    }

    /// Dimensions du canvas pour une grille donnée, marges comprises.
    ///
    /// # Errors
    /// [`CoreError::Geometry`] (grid dimensions) if a side overflows or
    /// exceeds [`MAX_CANVAS_SIDE`], or the area exceeds [`MAX_CANVAS_PIXELS`].
    pub fn canvas_dimensions(&self, grid_w: u32, grid_h: u32) -> Result<(u32, u32), CoreError> {
        let side = |cells: u32, cell: u32| {
            cells
                .checked_mul(cell)
                .and_then(|v| v.checked_add(2 * PADDING))
                .filter(|&v| v <= MAX_CANVAS_SIDE)
        };
        match (side(grid_w, self.cell_width), side(grid_h, self.cell_height)) {
            (Some(w), Some(h)) if u64::from(w) * u64::from(h) <= MAX_CANVAS_PIXELS => Ok((w, h)),
            _ => Err(CoreError::Geometry {
                width: grid_w,
                height: grid_h,
            }),
        }
    }

    /// Rendu de la grille sur un canvas neuf.
    ///
    /// Le canvas est découpé en bandes horizontales d'une hauteur de cellule ;
    /// chaque bande appartient à un seul worker rayon et les glyphes sont
    /// coupés à leur bande.
    ///
    /// # Errors
    /// [`CoreError::Geometry`] if the canvas would be too large, see
    /// [`Self::canvas_dimensions`].
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::AsciiGrid;
    /// use ap_export::font::EMBEDDED_FONT;
    /// use ap_export::rasterizer::{RasterStyle, Rasterizer};
    ///
    /// let r = Rasterizer::new(&[EMBEDDED_FONT], 8, &[' ']).unwrap();
    /// let style = RasterStyle { color_enabled: true, brightness_boost: 110 };
    /// let canvas = r.render(&AsciiGrid::new(4, 2), style).unwrap();
    /// assert_eq!((canvas.width, canvas.height), (4 * 8 + 80, 2 * 14 + 80));
    /// ```
    pub fn render(&self, grid: &AsciiGrid, style: RasterStyle) -> Result<FrameBuffer, CoreError> {
        let (width, height) = self.canvas_dimensions(grid.width, grid.height)?;
        let mut canvas = FrameBuffer::filled(width, height, CANVAS_BACKGROUND);

        let stride = width as usize * 4;
        let band_size = stride * self.cell_height as usize;
        let start = PADDING as usize * stride;
        let end = start + band_size * grid.height as usize;
        let cols = grid.width as usize;

        canvas.data[start..end]
            .par_chunks_exact_mut(band_size)
            .enumerate()
            .for_each(|(gy, band)| {
                let row = &grid.cells[gy * cols..(gy + 1) * cols];
                for (gx, cell) in row.iter().enumerate() {
                    let x0 = PADDING as usize + gx * self.cell_width as usize;
                    self.paint_cell(band, stride, x0, cell, style);
                }
            });

        Ok(canvas)
    }

    /// Fond teinté puis glyphe, dans la bande de la cellule.
    fn paint_cell(
        &self,
        band: &mut [u8],
        stride: usize,
        x0: usize,
        cell: &AsciiCell,
        style: RasterStyle,
    ) {
        let colors = style.cell_colors(cell);
        let cell_w = self.cell_width as usize;
        let cell_h = self.cell_height as usize;

        if let Some((r, g, b)) = colors.bg {
            for y in 0..cell_h {
                let line = &mut band[y * stride + x0 * 4..y * stride + (x0 + cell_w) * 4];
                for px in line.chunks_exact_mut(4) {
                    px.copy_from_slice(&[r, g, b, 255]);
                }
            }
        }

        let Some(glyph) = self.glyph_cache.get(&cell.ch) else {
            return;
        };
        if glyph.width == 0 {
            return;
        }

        let canvas_w = (stride / 4) as i32;
        for (gy, line) in glyph.coverage.chunks_exact(glyph.width).enumerate() {
            let y = glyph.top + gy as i32;
            if y < 0 || y >= cell_h as i32 {
                continue;
            }
            for (gx, &alpha) in line.iter().enumerate() {
                let x = x0 as i32 + glyph.left + gx as i32;
                if alpha == 0 || x < 0 || x >= canvas_w {
                    continue;
                }
                let idx = y as usize * stride + x as usize * 4;
                blend(&mut band[idx..idx + 3], colors.fg, alpha);
            }
        }
    }
}

/// Échelle telle qu'un em fasse `em` pixels (72 dpi : un point = un pixel).
fn em_scale(font: &FontRef, em: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) => PxScale::from(em * font.height_unscaled() / upem),
        None => PxScale::from(em),
    }
}

/// Rasterise un glyphe à l'origine de cellule (0, 0), baseline à `ascent`.
fn rasterize_glyph(font: &FontRef, scale: PxScale, ascent: f32, gid: GlyphId) -> CachedGlyph {
    let glyph = gid.with_scale_and_position(scale, point(0.0, ascent));

    // Espaces et glyphes vides : rien à dessiner.
    let Some(outline) = font.outline_glyph(glyph) else {
        return CachedGlyph {
            left: 0,
            top: 0,
            width: 0,
            coverage: Vec::new(),
        };
    };

    let bounds = outline.px_bounds();
    let width = bounds.width() as usize;
    let height = bounds.height() as usize;
    let mut coverage = vec![0u8; width * height];
    outline.draw(|x, y, v| {
        if let Some(slot) = coverage.get_mut(y as usize * width + x as usize) {
            *slot = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
    });

    CachedGlyph {
        left: bounds.min.x as i32,
        top: bounds.min.y as i32,
        width,
        coverage,
    }
}

/// Composition "over" d'une couleur unie de couverture `alpha` sur `dst` (RGB).
#[inline(always)]
fn blend(dst: &mut [u8], src: Rgb, alpha: u8) {
    let a = u32::from(alpha);
    let inv = 255 - a;
    for (d, s) in dst.iter_mut().zip([src.0, src.1, src.2]) {
        *d = ((u32::from(s) * a + u32::from(*d) * inv + 127) / 255) as u8;
    }
}
