use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const TOKEN_FILE: &str = "jwt_token";

/// A single slot holding the opaque session token.
///
/// Presence of a non-empty token is the only thing the client ever checks;
/// the contents are never decoded or validated.
pub trait TokenStorage: Send + Sync {
    fn get_token(&self) -> Result<Option<SecretString>, AuthError>;

    fn set_token(&self, token: &str) -> Result<(), AuthError>;

    /// Removes the token. Clearing an empty slot is not an error.
    fn clear_token(&self) -> Result<(), AuthError>;

    fn is_authenticated(&self) -> bool {
        match self.get_token() {
            Ok(Some(token)) => !token.expose_secret().is_empty(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to read session token: {}", e);
                false
            }
        }
    }
}

/// Token slot persisted as a single file in the user's cache directory.
pub struct FileTokenStore {
    token_path: PathBuf,
}

impl FileTokenStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("resumo");
        Self::in_dir(cache_dir)
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let dir = dir.into();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to create token directory: {}", e))
            })?;
        }

        Ok(Self {
            token_path: dir.join(TOKEN_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }
}

impl TokenStorage for FileTokenStore {
    fn get_token(&self) -> Result<Option<SecretString>, AuthError> {
        match fs::read_to_string(&self.token_path) {
            Ok(contents) => Ok(Some(SecretString::from(contents))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::TokenStorage(format!(
                "Failed to read token: {}",
                e
            ))),
        }
    }

    fn set_token(&self, token: &str) -> Result<(), AuthError> {
        fs::write(&self.token_path, token)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.token_path)
                .map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.token_path, perms).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        tracing::debug!(path = %self.token_path.display(), "Session token saved");
        Ok(())
    }

    fn clear_token(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.token_path) {
            Ok(()) => {
                tracing::debug!(path = %self.token_path.display(), "Session token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStorage(format!(
                "Failed to delete token: {}",
                e
            ))),
        }
    }
}

/// In-process token slot. Nothing survives the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: RwLock::new(Some(SecretString::from(token.to_string()))),
        }
    }
}

impl TokenStorage for MemoryTokenStore {
    fn get_token(&self) -> Result<Option<SecretString>, AuthError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| AuthError::TokenStorage("Token slot poisoned".to_string()))?;
        Ok(slot
            .as_ref()
            .map(|token| SecretString::from(token.expose_secret().to_string())))
    }

    fn set_token(&self, token: &str) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| AuthError::TokenStorage("Token slot poisoned".to_string()))?;
        *slot = Some(SecretString::from(token.to_string()));
        Ok(())
    }

    fn clear_token(&self) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| AuthError::TokenStorage("Token slot poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
