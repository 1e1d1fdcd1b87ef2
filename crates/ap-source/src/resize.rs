use ap_core::error::CoreError;
use ap_core::frame::FrameBuffer;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// Correction verticale : une cellule de glyphe est environ deux fois plus
/// haute que large.
pub const CELL_ASPECT_CORRECTION: f64 = 0.5;

/// Dimensions de la grille pour une largeur cible en caractères.
///
/// `height = round(width × src_h / src_w × 0.5)`. La hauteur peut valoir 0
/// pour une image très large ; l'appelant traite ce cas comme une grille vide.
///
/// # Errors
/// [`CoreError::Geometry`] if the source has a zero width or height.
///
/// # Example
/// ```
/// use ap_source::resize::grid_dimensions;
/// assert_eq!(grid_dimensions(640, 480, 80).unwrap(), (80, 30));
/// assert_eq!(grid_dimensions(2, 1, 2).unwrap(), (2, 1));
/// assert!(grid_dimensions(0, 480, 80).is_err());
/// ```
pub fn grid_dimensions(src_w: u32, src_h: u32, width: u32) -> Result<(u32, u32), CoreError> {
    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Geometry {
            width: src_w,
            height: src_h,
        });
    }
    let aspect = f64::from(src_h) / f64::from(src_w);
    let height = (f64::from(width) * aspect * CELL_ASPECT_CORRECTION).round() as u32;
    Ok((width, height))
}

/// Resizer réutilisable wrappant fast_image_resize (Lanczos3).
///
/// # Example
/// ```
/// use ap_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source, the kernel wants `&mut` on both sides.
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer using a Lanczos3 convolution.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new()
                .resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// [`CoreError::Geometry`] for an empty source, [`CoreError::Resize`] if
    /// the kernel rejects the buffers.
    ///
    /// # Example
    /// ```
    /// use ap_source::resize::Resizer;
    /// use ap_core::frame::FrameBuffer;
    /// let mut r = Resizer::new();
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), CoreError> {
        if src.is_empty() {
            return Err(CoreError::Geometry {
                width: src.width,
                height: src.height,
            });
        }
        if dst.is_empty() {
            return Ok(());
        }
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .map_err(|e| CoreError::Resize(format!("source invalide : {e}")))?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .map_err(|e| CoreError::Resize(format!("destination invalide : {e}")))?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|e| CoreError::Resize(e.to_string()))?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rééchantillonne `src` à la grille `width` × hauteur corrigée.
///
/// # Errors
/// [`CoreError::Geometry`] if the source has a zero dimension.
///
/// # Example
/// ```
/// use ap_source::resize::resize_to_grid;
/// use ap_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_to_grid(&src, 40).unwrap();
/// assert_eq!((dst.width, dst.height), (40, 20));
/// ```
pub fn resize_to_grid(src: &FrameBuffer, width: u32) -> Result<FrameBuffer, CoreError> {
    let (w, h) = grid_dimensions(src.width, src.height, width)?;
    if h == 0 {
        log::warn!(
            "Grille vide : {}×{} ramené à {w} colonnes donne 0 ligne",
            src.width,
            src.height
        );
    }
    let mut dst = FrameBuffer::new(w, h);
    let mut resizer = Resizer::new();
    resizer.resize_into(src, &mut dst)?;
    log::debug!("Redimensionné {}×{} → {w}×{h}", src.width, src.height);
    Ok(dst)
}
