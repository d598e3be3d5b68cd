mod auth_state;
mod error;
mod guard;
mod settings;
mod token_storage;

pub use auth_state::{AuthHandle, AuthPhase, AuthProvider, AuthSnapshot};
pub use error::AuthError;
pub use guard::{guard, RouteDecision};
pub use settings::Settings;
pub use token_storage::{FileTokenStore, MemoryTokenStore, TokenStorage};
