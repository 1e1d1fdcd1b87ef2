/// Identifiant de la palette par défaut.
pub const DEFAULT_PALETTE_ID: char = 'a';

/// Rampe de glyphes nommée, ordonnée du plus sombre au plus clair.
///
/// # Example
/// ```
/// use ap_core::charset::palette_or_default;
/// let p = palette_or_default("b");
/// assert_eq!(p.glyphs, &[' ', '░', '▒', '▓', '█']);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    /// Single-letter identifier, lowercase.
    pub id: char,
    /// Human-readable name shown in listings.
    pub description: &'static str,
    /// Glyphs from visually darkest to brightest. Never empty.
    pub glyphs: &'static [char],
}

/// Registre global des palettes, immuable.
pub static PALETTES: [Palette; 15] = [
    Palette {
        id: 'a',
        description: "Classic ASCII",
        glyphs: &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'],
    },
    Palette {
        id: 'b',
        description: "Blocks",
        glyphs: &[' ', '░', '▒', '▓', '█'],
    },
    Palette {
        id: 'c',
        description: "Dots",
        glyphs: &[' ', '·', '•', '○', '◉', '●'],
    },
    Palette {
        id: 'd',
        description: "Vertical Bars",
        glyphs: &[' ', ' ', '▂', '▃', '▄', '▅', '▆', '▇', '█'],
    },
    Palette {
        id: 'e',
        description: "Braille",
        glyphs: &[' ', '⣀', '⣄', '⣤', '⣦', '⣶', '⣷', '⣿'],
    },
    Palette {
        id: 'f',
        description: "Numbers",
        glyphs: &[' ', '1', '2', '3', '4', '5', '6', '7', '8', '9'],
    },
    Palette {
        id: 'g',
        description: "Letters",
        glyphs: &[' ', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'],
    },
    Palette {
        id: 'h',
        description: "Slashes",
        glyphs: &[' ', '/', '\\', '|', '-', '+', 'x', '*', '#', '@'],
    },
    Palette {
        id: 'i',
        description: "Punctuation",
        glyphs: &[' ', '`', '.', ',', ':', ';', '!', '>', '<', '~'],
    },
    Palette {
        id: 'j',
        description: "Mixed Blocks",
        glyphs: &[' ', '░', '▒', '▓', '█', '▀', '▄', '▌', '▐'],
    },
    Palette {
        id: 'k',
        description: "Braille Advanced",
        glyphs: &['⠀', '⠁', '⠃', '⠇', '⠏', '⠟', '⠿', '⡿', '⣿'],
    },
    Palette {
        id: 'l',
        description: "Circle Fill",
        glyphs: &[' ', '○', '◔', '◐', '◕', '⬤'],
    },
    Palette {
        id: 'm',
        description: "Box Drawing",
        glyphs: &[' ', '┤', '┴', '├', '┬', '┼', '╬', '█'],
    },
    Palette {
        id: 'n',
        description: "Dot Sizes",
        glyphs: &[' ', '˙', '·', '•', '●', '⚫'],
    },
    Palette {
        id: 'o',
        description: "Math Symbols",
        glyphs: &[' ', '⋅', '∘', '∙', '○', '◎', '⦿', '●'],
    },
];

impl Palette {
    /// Index du glyphe pour une luminance : floor(b × N / 256), borné à N − 1.
    ///
    /// # Example
    /// ```
    /// use ap_core::charset::palette_or_default;
    /// let p = palette_or_default("a");
    /// assert_eq!(p.glyph_index(0), 0);
    /// assert_eq!(p.glyph_index(255), 9);
    /// assert_eq!(p.glyph_index(128), 5);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn glyph_index(&self, brightness: u8) -> usize {
        let len = self.glyphs.len();
        (usize::from(brightness) * len / 256).min(len.saturating_sub(1))
    }

    /// Glyphe associé à une luminance.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, brightness: u8) -> char {
        self.glyphs[self.glyph_index(brightness)]
    }

    /// The ramp as a printable string.
    #[must_use]
    pub fn ramp(&self) -> String {
        self.glyphs.iter().collect()
    }
}

/// Recherche stricte, insensible à la casse. `None` si l'identifiant est inconnu.
///
/// # Example
/// ```
/// use ap_core::charset::find;
/// assert!(find("E").is_some());
/// assert!(find("z").is_none());
/// assert!(find("ab").is_none());
/// ```
#[must_use]
pub fn find(id: &str) -> Option<&'static Palette> {
    let mut chars = id.trim().chars();
    let first = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }
    PALETTES.iter().find(|p| p.id == first)
}

/// Palette par défaut (`a`).
#[must_use]
pub fn default_palette() -> &'static Palette {
    &PALETTES[0]
}

/// Recherche tolérante : un identifiant inconnu retombe silencieusement sur `a`.
///
/// # Example
/// ```
/// use ap_core::charset::palette_or_default;
/// assert_eq!(palette_or_default("z").glyphs, palette_or_default("a").glyphs);
/// assert_eq!(palette_or_default("B").id, 'b');
/// ```
#[must_use]
pub fn palette_or_default(id: &str) -> &'static Palette {
    find(id).unwrap_or_else(|| {
        log::debug!("Palette inconnue '{id}', repli sur '{DEFAULT_PALETTE_ID}'");
        default_palette()
    })
}

/// Lookup table mapping luminance [0..255] → glyph.
///
/// Pre-computed once per conversion for O(1) per-pixel cost.
///
/// # Example
/// ```
/// use ap_core::charset::{GlyphLut, palette_or_default};
/// let lut = GlyphLut::new(palette_or_default("a"));
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(255), '@');
/// ```
pub struct GlyphLut {
    lut: [char; 256],
}

impl GlyphLut {
    /// Build a LUT from a palette.
    #[must_use]
    pub fn new(palette: &Palette) -> Self {
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = palette.glyph(i as u8);
        }
        Self { lut }
    }

    /// Map a luminance value [0..255] to a glyph.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }
}
