use std::path::PathBuf;

use ap_core::config::RenderConfig;
use clap::Parser;

/// asciipic — Image to ASCII art converter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Largeur de sortie en caractères. Défaut : 80.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Couleur truecolor (conserve les couleurs d'origine).
    #[arg(long, default_value_t = false)]
    pub color: bool,

    /// Jeu de caractères (a-o). Voir --list-charsets. Défaut : a.
    #[arg(long)]
    pub charset: Option<String>,

    /// Exporter en image PNG au lieu d'écrire dans le terminal.
    #[arg(long, default_value_t = false)]
    pub png: bool,

    /// Chemin du PNG exporté. Défaut : ascii-art.png.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Taille de police en pixels pour l'export PNG (1-50). Défaut : 8.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub fontsize: Option<u32>,

    /// Boost de luminosité pour l'export PNG (50-200). Défaut : 110 (+10 %).
    #[arg(long, value_parser = clap::value_parser!(u32).range(50..=200))]
    pub brightness: Option<u32>,

    /// Police TTF/OTF pour l'export PNG (remplace la police embarquée).
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Fichier de configuration TOML. Les options en ligne de commande priment.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lister les jeux de caractères disponibles et quitter.
    #[arg(long, default_value_t = false)]
    pub list_charsets: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply the flags given on the command line over `config`.
    ///
    /// Boolean flags can only switch a feature on; a config file setting
    /// `color_enabled = true` stays on without `--color`.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(v) = self.width {
            config.width = v;
        }
        if self.color {
            config.color_enabled = true;
        }
        if let Some(ref v) = self.charset {
            config.palette.clone_from(v);
        }
        if self.png {
            config.export_image = true;
        }
        if let Some(ref v) = self.output {
            config.output_path.clone_from(v);
        }
        if let Some(v) = self.fontsize {
            config.font_size = v;
        }
        if let Some(v) = self.brightness {
            config.brightness_boost = v;
        }
        if let Some(ref v) = self.font {
            config.font_path = Some(v.clone());
        }
    }
}
