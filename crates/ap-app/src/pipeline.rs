use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ap_ascii::compositor::Compositor;
use ap_core::charset;
use ap_core::config::{RenderConfig, load_config};
use ap_core::error::CoreError;
use ap_core::frame::{AsciiGrid, FrameBuffer};
use ap_source::resize::resize_to_grid;

use crate::cli::Cli;

/// Résout la configuration : défauts < fichier TOML < options CLI.
///
/// # Errors
/// Returns an error if the config file cannot be loaded or the merged
/// configuration is invalid (unknown palette id).
pub fn resolve_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.clamp_all();
    config.validate()?;
    log::debug!("Configuration effective : {config:?}");
    Ok(config)
}

/// Resize `frame` to the configured width and map every cell to a glyph.
///
/// # Errors
/// [`CoreError::Geometry`] for a zero-area frame.
pub fn build_grid(frame: &FrameBuffer, config: &RenderConfig) -> Result<AsciiGrid, CoreError> {
    let palette = charset::palette_or_default(&config.palette);
    let resized = resize_to_grid(frame, config.width)?;
    let grid = Compositor::new(palette).convert(&resized);
    log::info!(
        "Grille {}×{} (palette '{}')",
        grid.width,
        grid.height,
        palette.id
    );
    Ok(grid)
}

/// Issue d'une conversion réussie.
#[derive(Debug, PartialEq, Eq)]
pub enum Conversion {
    /// Text was written to the output stream.
    Text,
    /// A PNG was written at `path` with the given canvas dimensions.
    Image {
        /// Output path.
        path: PathBuf,
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
    },
}

/// Convertit une image déjà décodée et écrit le résultat.
///
/// En mode texte, `out` reçoit l'art ; en mode export, il reçoit la ligne de
/// confirmation.
///
/// # Errors
/// Any pipeline error; nothing is retried.
pub fn convert_frame<W: Write>(
    frame: &FrameBuffer,
    config: &RenderConfig,
    out: &mut W,
) -> Result<Conversion> {
    let grid = build_grid(frame, config)?;

    if config.export_image {
        let palette = charset::palette_or_default(&config.palette);
        let (width, height) = ap_export::export_png(&grid, palette.glyphs, config)
            .context("Échec de l'export PNG")?;
        writeln!(
            out,
            "Exported to: {} (brightness: {}%)",
            config.output_path.display(),
            config.brightness_boost
        )?;
        out.flush()?;
        return Ok(Conversion::Image {
            path: config.output_path.clone(),
            width,
            height,
        });
    }

    ap_render::write_text(&grid, config.color_enabled, out)
        .context("Échec de l'écriture sur la sortie")?;
    Ok(Conversion::Text)
}

/// Charge `input` puis le convertit selon `config`.
///
/// # Errors
/// I/O or decode errors on the input, then any pipeline error.
pub fn convert_file<W: Write>(input: &Path, config: &RenderConfig, out: &mut W) -> Result<Conversion> {
    let frame = ap_source::load_image(input)?;
    convert_frame(&frame, config, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ap_render::render_text;
    use clap::Parser;

    fn black_white() -> FrameBuffer {
        FrameBuffer::from_rgb(2, 1, &[(0, 0, 0), (255, 255, 255)]).unwrap()
    }

    fn config(width: u32) -> RenderConfig {
        RenderConfig {
            width,
            ..RenderConfig::default()
        }
    }

    fn text_of(frame: &FrameBuffer, config: &RenderConfig) -> String {
        let mut out = Vec::new();
        assert_eq!(convert_frame(frame, config, &mut out).unwrap(), Conversion::Text);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn black_and_white_pair_monochrome() {
        assert_eq!(text_of(&black_white(), &config(2)), " @\n");
    }

    #[test]
    fn black_and_white_pair_in_color() {
        let config = RenderConfig {
            color_enabled: true,
            ..config(2)
        };
        assert_eq!(
            text_of(&black_white(), &config),
            "\x1b[38;2;0;0;0m \x1b[0m\x1b[38;2;255;255;255m@\x1b[0m\n"
        );
    }

    #[test]
    fn unknown_palette_renders_like_default() {
        let pixels: Vec<_> = (0..64u32).map(|i| ((i * 4) as u8, (i * 3) as u8, 9)).collect();
        let frame = FrameBuffer::from_rgb(16, 4, &pixels).unwrap();
        let z = RenderConfig {
            palette: "z".into(),
            ..config(16)
        };
        assert_eq!(text_of(&frame, &z), text_of(&frame, &config(16)));
    }

    #[test]
    fn output_has_one_line_per_grid_row() {
        let frame = FrameBuffer::filled(100, 60, (128, 128, 128));
        let text = text_of(&frame, &config(40));
        // 40 × 60/100 × 0.5 = 12
        assert_eq!(text.lines().count(), 12);
        assert!(text.lines().all(|l| l.chars().count() == 40));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn conversion_is_deterministic() {
        let pixels: Vec<_> = (0..50u32 * 40)
            .map(|i| ((i % 256) as u8, (i * 3 % 256) as u8, (i * 11 % 256) as u8))
            .collect();
        let frame = FrameBuffer::from_rgb(50, 40, &pixels).unwrap();
        let config = RenderConfig {
            color_enabled: true,
            palette: "k".into(),
            ..config(23)
        };
        assert_eq!(text_of(&frame, &config), text_of(&frame, &config));
    }

    #[test]
    fn zero_area_frame_is_geometry_error() {
        let frame = FrameBuffer::new(0, 0);
        let err = build_grid(&frame, &config(10)).unwrap_err();
        assert!(matches!(err, CoreError::Geometry { .. }));
    }

    #[test]
    fn wide_image_produces_empty_text() {
        let frame = FrameBuffer::filled(400, 1, (255, 255, 255));
        let grid = build_grid(&frame, &config(10)).unwrap();
        assert_eq!(render_text(&grid, true), "");
    }

    #[test]
    fn png_export_of_single_pixel_has_padded_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("one.png");
        let config = RenderConfig {
            export_image: true,
            font_size: 10,
            output_path: output.clone(),
            ..config(1)
        };
        let frame = FrameBuffer::filled(1, 1, (90, 160, 220));
        let mut out = Vec::new();
        let result = convert_frame(&frame, &config, &mut out).unwrap();
        assert_eq!(
            result,
            Conversion::Image {
                path: output.clone(),
                width: 90,
                height: 98,
            }
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Exported to: {} (brightness: 110%)\n", output.display())
        );
        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (90, 98));
    }

    #[test]
    fn braille_palettes_export_visible_glyphs() {
        let dir = tempfile::tempdir().unwrap();
        let frame = FrameBuffer::filled(16, 16, (255, 255, 255));
        for id in ["e", "k"] {
            let output = dir.path().join(format!("{id}.png"));
            let config = RenderConfig {
                export_image: true,
                palette: id.into(),
                font_size: 12,
                brightness_boost: 100,
                output_path: output.clone(),
                ..config(8)
            };
            convert_frame(&frame, &config, &mut Vec::<u8>::new()).unwrap();
            let png = image::open(&output).unwrap().into_rgba8();
            let inked = png.pixels().filter(|p| p.0 != [5, 5, 5, 255]).count();
            assert!(inked > 0, "palette {id} : canvas vide");
        }
    }

    #[test]
    fn png_export_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let pixels: Vec<_> = (0..30u32 * 20)
            .map(|i| ((i * 7 % 256) as u8, (i % 256) as u8, 200))
            .collect();
        let frame = FrameBuffer::from_rgb(30, 20, &pixels).unwrap();
        let mut bytes = Vec::new();
        for name in ["a.png", "b.png"] {
            let config = RenderConfig {
                export_image: true,
                color_enabled: true,
                palette: "b".into(),
                output_path: dir.path().join(name),
                ..config(12)
            };
            convert_frame(&frame, &config, &mut Vec::<u8>::new()).unwrap();
            bytes.push(std::fs::read(dir.path().join(name)).unwrap());
        }
        assert_eq!(bytes[0], bytes[1]);
    }

    #[test]
    fn convert_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let mut img = image::RgbImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgb([255, 255, 255]));
        img.save(&input).unwrap();

        let mut out = Vec::new();
        convert_file(&input, &config(2), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " @\n");
    }

    #[test]
    fn missing_input_is_reported() {
        let err = convert_file(Path::new("/nonexistent/in.png"), &config(2), &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Io { .. })
        ));
    }

    #[test]
    fn unwritable_output_aborts_export() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            export_image: true,
            output_path: dir.path().join("no").join("such").join("dir.png"),
            ..config(4)
        };
        let frame = FrameBuffer::filled(8, 8, (10, 10, 10));
        let mut out: Vec<u8> = Vec::new();
        assert!(convert_frame(&frame, &config, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn resolve_config_layers_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asciipic.toml");
        std::fs::write(&path, "[render]\nwidth = 120\ncolor_enabled = true\npalette = \"e\"").unwrap();
        let cli = Cli::try_parse_from([
            "asciipic",
            "--config",
            path.to_str().unwrap(),
            "--charset",
            "M",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.width, 120);
        assert!(config.color_enabled);
        assert_eq!(config.palette, "m");
    }

    #[test]
    fn resolve_config_rejects_unknown_palette() {
        let cli = Cli::try_parse_from(["asciipic", "--charset", "q"]).unwrap();
        let err = resolve_config(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::ConfigValidation(_))
        ));
    }
}
