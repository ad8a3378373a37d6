use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Erreurs possibles lors d'un calcul électrique
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// Corps non JSON, mauvaise forme ou type incompatible
    #[error("{0}")]
    MalformedInput(String),
    /// Précondition numérique violée (division par zéro, valeur ≤ 0...)
    #[error("{0}")]
    InvalidDomain(&'static str),
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
}

impl CalcError {
    pub fn status(&self) -> StatusCode {
        match self {
            CalcError::MalformedInput(_) | CalcError::InvalidDomain(_) => StatusCode::BAD_REQUEST,
            CalcError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Réponse en texte brut : le message d'erreur seul, avec le code HTTP associé
impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
