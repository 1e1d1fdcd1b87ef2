use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ap_core::error::CoreError;
use ap_core::frame::FrameBuffer;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError};

/// Encode le canvas RGBA en PNG (sans perte) à `path`.
///
/// Le fichier est créé (ou tronqué) avant l'encodage : en cas d'échec un
/// fichier partiel peut rester sur le disque.
///
/// # Errors
/// [`CoreError::Io`] if the file cannot be created or written,
/// [`CoreError::Encode`] if the encoder rejects the buffer.
///
/// # Example
/// ```no_run
/// use ap_core::frame::FrameBuffer;
/// use ap_export::encoder::save_png;
/// use std::path::Path;
/// save_png(&FrameBuffer::filled(4, 4, (5, 5, 5)), Path::new("out.png")).unwrap();
/// ```
pub fn save_png(canvas: &FrameBuffer, path: &Path) -> Result<(), CoreError> {
    // L'encodeur panique sur un buffer de mauvaise taille.
    let expected = canvas.width as usize * canvas.height as usize * 4;
    if canvas.data.len() != expected {
        return Err(CoreError::Encode {
            path: path.to_path_buf(),
            reason: format!(
                "buffer de {} octets pour {}×{} RGBA",
                canvas.data.len(),
                canvas.width,
                canvas.height
            ),
        });
    }

    let file = File::create(path).map_err(|e| CoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    PngEncoder::new(&mut writer)
        .write_image(
            &canvas.data,
            canvas.width,
            canvas.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| match e {
            ImageError::IoError(io) => CoreError::io(path, io),
            other => CoreError::Encode {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

    writer.flush().map_err(|e| CoreError::io(path, e))?;
    log::info!(
        "PNG écrit : {} ({}×{})",
        path.display(),
        canvas.width,
        canvas.height
    );
    Ok(())
}
