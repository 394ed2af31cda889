use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// Erreurs métier de l'API énergie
#[derive(Debug, Error)]
pub enum EnergyError {
    #[error("type de donnée non reconnu: {0}")]
    UnknownType(String),

    #[error("date invalide: {0}")]
    InvalidDate(String),

    /// Échec d'accès au dossier d'un type (montage absent, permissions)
    #[error("erreur lecture dossier {}", .dir.display())]
    UpstreamIo {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("erreur lecture fichier {}", .file.display())]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("erreur parsing JSON {}: {source}", .file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("aucun fichier trouvé pour {kind} à la date {date}")]
    NotFound { kind: String, date: String },
}

impl EnergyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EnergyError::UnknownType(_) | EnergyError::InvalidDate(_) | EnergyError::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            EnergyError::UpstreamIo { .. } | EnergyError::Read { .. } | EnergyError::Parse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EnergyError::UnknownType(_) => "UNKNOWN_TYPE",
            EnergyError::InvalidDate(_) | EnergyError::NotFound { .. } => "NOT_FOUND",
            EnergyError::UpstreamIo { .. } => "DIRECTORY_READ_ERROR",
            EnergyError::Read { .. } => "FILE_READ_ERROR",
            EnergyError::Parse { .. } => "PARSE_ERROR",
        }
    }

    /// Message renvoyé au client : jamais de chemin interne ni de cause système
    pub fn public_message(&self) -> String {
        match self {
            EnergyError::UpstreamIo { .. } => "Erreur lecture dossier".into(),
            EnergyError::Read { .. } => "Erreur lecture fichier".into(),
            EnergyError::Parse { .. } => "Erreur parsing JSON (fichier complet)".into(),
            EnergyError::InvalidDate(date) => format!("Aucune donnée pour la date {date}"),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for EnergyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, source = ?std::error::Error::source(&self), "requête en échec");
        }
        let body = ErrorBody {
            error: self.error_code(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type EnergyResult<T> = Result<T, EnergyError>;
