use std::sync::Arc;

use resumo_api::endpoints::summaries::Summary;
use resumo_api::{Client, ReqwestTransport, RequestError, Transport};
use resumo_auth::{guard, AuthError, AuthHandle, AuthProvider, RouteDecision, Settings};
use serde_json::Value;
use thiserror::Error;

use crate::validators::{self, SignupForm};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Validation(String),

    #[error("Você precisa fazer login para continuar")]
    LoginRequired,

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Storage(#[from] AuthError),

    #[error("Resposta inesperada do servidor: {0}")]
    UnexpectedPayload(#[from] serde_json::Error),
}

/// The client, wired to the login state it keeps up to date
pub struct App<T: Transport = ReqwestTransport> {
    client: Client<T>,
    auth: AuthProvider,
}

impl App {
    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        let tokens = Arc::new(settings.token_store()?);
        tracing::debug!(server_url = %settings.server_url, "Creating API client");
        Ok(Self::new(Client::new(settings.server_url.clone(), tokens)))
    }
}

impl<T: Transport> App<T> {
    /// Builds the app and runs the startup login check
    pub fn new(client: Client<T>) -> Self {
        let auth = AuthProvider::start(Arc::clone(client.tokens()));
        Self { client, auth }
    }

    pub fn client(&self) -> &Client<T> {
        &self.client
    }

    pub fn auth(&self) -> AuthHandle {
        self.auth.handle()
    }

    pub fn route(&self) -> RouteDecision {
        guard(&self.auth.snapshot())
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Value, CommandError> {
        let request = validators::validate_signup(form).map_err(CommandError::Validation)?;
        let payload = self.client.signup(&request).await?;
        tracing::info!(username = %request.username, "Account created");
        Ok(payload)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Value, CommandError> {
        let credentials =
            validators::validate_login(username, password).map_err(CommandError::Validation)?;
        let payload = self.client.login(&credentials).await?;
        self.auth.login();
        Ok(payload)
    }

    pub fn logout(&self) -> Result<(), CommandError> {
        self.auth.logout()?;
        Ok(())
    }

    /// Summarize `text` for a logged-in user
    ///
    /// A rejected session also logs the app out, so the next protected
    /// action redirects to login instead of failing again.
    pub async fn summarize(&self, text: &str) -> Result<String, CommandError> {
        if self.route() != RouteDecision::Allow {
            return Err(CommandError::LoginRequired);
        }

        validators::validate_summary_input(text).map_err(CommandError::Validation)?;

        match self.client.summarize_text(text).await {
            Ok(payload) => Ok(Summary::from_payload(payload)?.resumo),
            Err(err) => {
                if err.is_auth_rejected() {
                    if let Err(e) = self.auth.logout() {
                        tracing::warn!("Failed to log out after rejected session: {}", e);
                    }
                }
                Err(err.into())
            }
        }
    }
}
