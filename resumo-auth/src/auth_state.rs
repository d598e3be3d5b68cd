use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AuthError;
use crate::token_storage::TokenStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// The startup token check has not run yet.
    Initializing,
    Ready { logged_in: bool },
}

/// What consumers observe of the session at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub phase: AuthPhase,
}

impl AuthSnapshot {
    pub fn loading(&self) -> bool {
        matches!(self.phase, AuthPhase::Initializing)
    }

    /// `false` while loading; check [`AuthSnapshot::loading`] first.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.phase, AuthPhase::Ready { logged_in: true })
    }
}

/// Owner of the process-wide login state.
///
/// The provider is the only thing able to change the state. Everything else
/// gets an [`AuthHandle`] from [`AuthProvider::handle`] and can only read it.
pub struct AuthProvider {
    state: Arc<RwLock<AuthSnapshot>>,
    tokens: Arc<dyn TokenStorage>,
}

impl AuthProvider {
    /// Creates the provider in the `Initializing` phase.
    pub fn new(tokens: Arc<dyn TokenStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthSnapshot {
                phase: AuthPhase::Initializing,
            })),
            tokens,
        }
    }

    /// Creates the provider and immediately runs the startup check.
    pub fn start(tokens: Arc<dyn TokenStorage>) -> Self {
        let provider = Self::new(tokens);
        provider.initialize();
        provider
    }

    /// Runs the one-time token presence check. Later calls do nothing.
    pub fn initialize(&self) {
        let mut state = self.write();
        if state.phase == AuthPhase::Initializing {
            let logged_in = self.tokens.is_authenticated();
            state.phase = AuthPhase::Ready { logged_in };
            tracing::debug!(logged_in, "Auth state initialized");
        }
    }

    /// Marks the session as active. The caller has already stored the token.
    pub fn login(&self) {
        self.initialize();
        self.write().phase = AuthPhase::Ready { logged_in: true };
        tracing::info!("User logged in");
    }

    /// Clears the token and marks the session as inactive.
    ///
    /// The flag flips even when the token file cannot be removed; the
    /// storage error is still returned to the caller.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.initialize();
        let cleared = self.tokens.clear_token();
        self.write().phase = AuthPhase::Ready { logged_in: false };
        tracing::info!("User logged out");
        cleared
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        *self.read()
    }

    pub fn handle(&self) -> AuthHandle {
        AuthHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthSnapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthSnapshot> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Read-only view of the login state.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    state: Arc<RwLock<AuthSnapshot>>,
}

impl AuthHandle {
    pub fn snapshot(&self) -> AuthSnapshot {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn loading(&self) -> bool {
        self.snapshot().loading()
    }

    pub fn is_logged_in(&self) -> bool {
        self.snapshot().is_logged_in()
    }
}
