/// Couleur RGB, composantes [0,255].
pub type Rgb = (u8, u8, u8);

/// Intensité du fond teinté en mode couleur (écho à 30 % de la couleur source).
pub const GLOW_TINT_PERCENT: u32 = 30;

/// Luminance perceptuelle (pondération 0.299 / 0.587 / 0.114), alpha ignoré.
///
/// Arithmétique entière : le blanc pur donne exactement 255.
///
/// # Example
/// ```
/// use ap_core::color::luminance;
/// assert_eq!(luminance(0, 0, 0), 0);
/// assert_eq!(luminance(255, 255, 255), 255);
/// assert_eq!(luminance(255, 0, 0), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000) as u8
}

/// Scale one channel by `percent` / 100, saturating at 255.
///
/// # Example
/// ```
/// use ap_core::color::scale_channel;
/// assert_eq!(scale_channel(200, 110), 220);
/// assert_eq!(scale_channel(250, 200), 255);
/// assert_eq!(scale_channel(99, 30), 29);
/// ```
#[inline(always)]
#[must_use]
pub fn scale_channel(c: u8, percent: u32) -> u8 {
    (u32::from(c) * percent / 100).min(255) as u8
}

/// Scale every channel of `rgb` by `percent` / 100.
#[inline(always)]
#[must_use]
pub fn scale_rgb(rgb: Rgb, percent: u32) -> Rgb {
    (
        scale_channel(rgb.0, percent),
        scale_channel(rgb.1, percent),
        scale_channel(rgb.2, percent),
    )
}

/// Couleurs finales d'une cellule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellColors {
    /// Foreground (glyph) color.
    pub fg: Rgb,
    /// Background tint, `None` when the cell keeps the canvas background.
    pub bg: Option<Rgb>,
}

/// Transformation couleur unique partagée par les deux moteurs de rendu.
///
/// `boost_percent` intensifie le foreground, `tint_percent` produit un fond
/// atténué de la même couleur source. Le rendu terminal appelle cette
/// fonction avec `100` et `None` (identité).
///
/// # Example
/// ```
/// use ap_core::color::{transform, GLOW_TINT_PERCENT};
/// let c = transform((100, 200, 250), 110, Some(GLOW_TINT_PERCENT));
/// assert_eq!(c.fg, (110, 220, 255));
/// assert_eq!(c.bg, Some((30, 60, 75)));
///
/// let identity = transform((1, 2, 3), 100, None);
/// assert_eq!(identity.fg, (1, 2, 3));
/// assert_eq!(identity.bg, None);
/// ```
#[must_use]
pub fn transform(rgb: Rgb, boost_percent: u32, tint_percent: Option<u32>) -> CellColors {
    CellColors {
        fg: scale_rgb(rgb, boost_percent),
        bg: tint_percent.map(|p| scale_rgb(rgb, p)),
    }
}
