use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ap_core::error::CoreError;
use ap_core::frame::FrameBuffer;
use image::{DynamicImage, ImageReader};

/// Charge une image depuis le disque (PNG, JPEG, BMP, GIF) en RGBA8.
///
/// Le format est détecté depuis le contenu, pas l'extension. Pour un GIF
/// animé seule la première frame est décodée.
///
/// # Errors
/// [`CoreError::Io`] if the file cannot be opened or read,
/// [`CoreError::Decode`] if its content is not a supported image.
///
/// # Example
/// ```no_run
/// use ap_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.jpg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer, CoreError> {
    let file = File::open(path).map_err(|e| CoreError::io(path, e))?;
    let reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| CoreError::io(path, e))?;
    let img = reader.decode().map_err(|e| CoreError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let frame = to_frame(img);
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Convertit une image décodée en `FrameBuffer` RGBA8.
///
/// Les couleurs sont prémultipliées par l'alpha : une zone transparente
/// devient noire (et donc un espace), quelle que soit sa couleur cachée.
/// L'alpha est conservé tel quel.
#[must_use]
pub fn to_frame(img: DynamicImage) -> FrameBuffer {
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a < 255 {
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * a + 127) / 255) as u8;
            }
        }
    }
    FrameBuffer {
        data,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Write;

    #[test]
    fn loads_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixel(2, 1), (10, 20, 30, 255));
    }

    #[test]
    fn transparent_pixels_are_premultiplied() {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        img.put_pixel(1, 0, Rgba([200, 100, 50, 128]));
        img.put_pixel(2, 0, Rgba([200, 100, 50, 255]));
        let frame = to_frame(DynamicImage::ImageRgba8(img));
        assert_eq!(frame.pixel(0, 0), (0, 0, 0, 0));
        assert_eq!(frame.pixel(1, 0), (100, 50, 25, 128));
        assert_eq!(frame.pixel(2, 0), (200, 100, 50, 255));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_image(Path::new("/nonexistent/photo.png")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }

    #[test]
    fn garbage_is_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not an image").unwrap();
        let err = load_image(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }
}
