use reqwest::StatusCode;
use resumo_auth::AuthError;
use thiserror::Error;

use crate::transport::TransportFailure;

pub(crate) const SESSION_EXPIRED_MESSAGE: &str = "Sessão expirada. Faça login novamente.";
pub(crate) const CONNECTION_ERROR_MESSAGE: &str =
    "Erro de conexão. Verifique se o servidor está rodando.";

/// Every way a call to the backend can fail.
///
/// None of these are fatal: the `Display` text is meant to be shown to the
/// user as-is, and the operation can simply be retried.
#[derive(Debug, Error)]
pub enum RequestError {
    /// 401 or 403. The stored token has already been cleared.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    AuthRejected { status: StatusCode },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Application { message: String, status: StatusCode },

    /// No response was obtained.
    #[error("{message}")]
    Transport { message: String, unreachable: bool },

    #[error("Falha ao serializar a requisição: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    TokenStorage(#[from] AuthError),
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::AuthRejected { status } | Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::AuthRejected { .. })
    }
}

impl From<TransportFailure> for RequestError {
    fn from(failure: TransportFailure) -> Self {
        let message = if failure.unreachable {
            CONNECTION_ERROR_MESSAGE.to_string()
        } else {
            failure.message
        };

        Self::Transport {
            message,
            unreachable: failure.unreachable,
        }
    }
}
