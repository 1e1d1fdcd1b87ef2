use std::borrow::Cow;
use std::path::Path;

use ap_core::error::CoreError;

/// Police monospace grasse embarquée (DejaVu Sans Mono Bold, licence dans `assets/`).
pub static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono-Bold.ttf");

/// Face de secours (DejaVu Sans Bold) : braille, `⬤`, `⚫`, absents de la face mono.
pub static FALLBACK_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Octets de la police à utiliser : fichier externe si fourni, sinon la police embarquée.
///
/// Le contenu n'est pas validé ici ; le parsing a lieu dans
/// [`crate::rasterizer::Rasterizer::new`].
///
/// # Errors
/// [`CoreError::Io`] if the external font file cannot be read.
///
/// # Example
/// ```
/// use ap_export::font::{load_font_data, EMBEDDED_FONT};
/// let data = load_font_data(None).unwrap();
/// assert_eq!(data.len(), EMBEDDED_FONT.len());
/// ```
pub fn load_font_data(path: Option<&Path>) -> Result<Cow<'static, [u8]>, CoreError> {
    match path {
        None => Ok(Cow::Borrowed(EMBEDDED_FONT)),
        Some(p) => {
            let data = std::fs::read(p).map_err(|e| CoreError::io(p, e))?;
            log::info!("Police externe chargée : {} ({} octets)", p.display(), data.len());
            Ok(Cow::Owned(data))
        }
    }
}
