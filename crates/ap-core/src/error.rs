use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the conversion pipeline.
///
/// Every variant is fatal to the current conversion: nothing is retried and no
/// partial output is cleaned up.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Dimensions hors limites : image source vide (ratio indéfini) ou grille
    /// dont le canvas PNG dépasserait la taille maximale.
    #[error("Géométrie invalide : {width}×{height}")]
    Geometry {
        /// Source or grid width.
        width: u32,
        /// Source or grid height.
        height: u32,
    },

    /// Resampling kernel refused the source or target buffers.
    #[error("Échec du redimensionnement : {0}")]
    Resize(String),

    /// Source file is not a readable or supported image.
    #[error("Impossible de décoder {path} : {reason}")]
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Font asset could not be parsed.
    #[error("Police invalide : {0}")]
    FontLoad(String),

    /// File could not be opened, created, or written.
    #[error("Erreur d'E/S sur {path} : {source}")]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Canvas could not be encoded into the output format.
    #[error("Échec de l'encodage de {path} : {reason}")]
    Encode {
        /// Output path.
        path: PathBuf,
        /// Encoder message.
        reason: String,
    },

    /// Configuration value rejected at the configuration boundary.
    #[error("Configuration invalide : {0}")]
    ConfigValidation(String),
}

impl CoreError {
    /// Wrap an I/O error with the path it happened on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
