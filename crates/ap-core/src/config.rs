use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset;
use crate::error::CoreError;

/// Bornes du boost de luminosité (pourcentage).
pub const BRIGHTNESS_BOOST_RANGE: (u32, u32) = (50, 200);

/// Bornes de la taille de police pour l'export PNG (pixels).
pub const FONT_SIZE_RANGE: (u32, u32) = (1, 50);

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ap_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.width, 80);
/// assert_eq!(config.palette, "a");
/// assert_eq!(config.brightness_boost, 110);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RenderConfig {
    /// Largeur de la grille en caractères.
    pub width: u32,
    /// Activer la couleur truecolor.
    pub color_enabled: bool,
    /// Identifiant de palette (une lettre, insensible à la casse).
    pub palette: String,
    /// Exporter en PNG au lieu d'écrire sur stdout.
    pub export_image: bool,
    /// Chemin du PNG exporté.
    pub output_path: PathBuf,
    /// Taille de police en pixels pour l'export PNG.
    pub font_size: u32,
    /// Boost de luminosité du foreground en pourcentage (export PNG uniquement).
    pub brightness_boost: u32,
    /// Police TTF/OTF externe. `None` = police embarquée.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 80,
            color_enabled: false,
            palette: charset::DEFAULT_PALETTE_ID.to_string(),
            export_image: false,
            output_path: PathBuf::from("ascii-art.png"),
            font_size: 8,
            brightness_boost: 110,
            font_path: None,
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self) {
        self.width = self.width.max(1);
        self.font_size = self.font_size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
        self.brightness_boost = self
            .brightness_boost
            .clamp(BRIGHTNESS_BOOST_RANGE.0, BRIGHTNESS_BOOST_RANGE.1);
        self.palette = self.palette.trim().to_lowercase();
    }

    /// Reject values the core would otherwise accept silently.
    ///
    /// The core lookup falls back to the default palette on an unknown id;
    /// this is where the boundary refuses it instead.
    ///
    /// # Errors
    /// Returns [`CoreError::ConfigValidation`] for an unknown palette id or an
    /// empty output path in export mode.
    ///
    /// # Example
    /// ```
    /// use ap_core::config::RenderConfig;
    /// let mut config = RenderConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.palette = "z".into();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if charset::find(&self.palette).is_none() {
            return Err(CoreError::ConfigValidation(format!(
                "palette inconnue '{}' (attendu : a-o, voir --list-charsets)",
                self.palette
            )));
        }
        if self.export_image && self.output_path.as_os_str().is_empty() {
            return Err(CoreError::ConfigValidation(
                "chemin de sortie vide pour l'export PNG".into(),
            ));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderSection {
    width: Option<u32>,
    color_enabled: Option<bool>,
    palette: Option<String>,
    export_image: Option<bool>,
    output_path: Option<PathBuf>,
    font_size: Option<u32>,
    brightness_boost: Option<u32>,
    font_path: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ap_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML content and merge it over the defaults.
///
/// # Errors
/// Returns an error if the content is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ap_core::config::parse_config;
/// let config = parse_config("[render]\nwidth = 120\npalette = \"E\"").unwrap();
/// assert_eq!(config.width, 120);
/// assert_eq!(config.palette, "e");
/// assert!(!config.color_enabled);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.width {
            config.width = v;
        }
        if let Some(v) = r.color_enabled {
            config.color_enabled = v;
        }
        if let Some(v) = r.palette {
            config.palette = v;
        }
        if let Some(v) = r.export_image {
            config.export_image = v;
        }
        if let Some(v) = r.output_path {
            config.output_path = v;
        }
        if let Some(v) = r.font_size {
            config.font_size = v;
        }
        if let Some(v) = r.brightness_boost {
            config.brightness_boost = v;
        }
        if let Some(v) = r.font_path {
            config.font_path = Some(v);
        }
    }

    config.clamp_all();
    Ok(config)
}
