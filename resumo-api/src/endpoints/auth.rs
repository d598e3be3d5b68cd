use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Fields a login response may carry the session token under, in lookup order.
pub const TOKEN_FIELDS: [&str; 3] = ["token", "jwt", "accessToken"];

// Requests

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl SignupRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

fn expose<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

// Responses

/// Pulls the session token out of a login payload.
///
/// The backend has used several field names; the first one holding a
/// non-empty string wins.
pub fn extract_token(payload: &Value) -> Option<&str> {
    TOKEN_FIELDS.iter().find_map(|field| {
        payload
            .get(field)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_token_prefers_token_field() {
        let payload = json!({ "accessToken": "c", "jwt": "b", "token": "a" });
        assert_eq!(extract_token(&payload), Some("a"));
    }

    #[test]
    fn extract_token_falls_through_in_order() {
        assert_eq!(extract_token(&json!({ "jwt": "b", "accessToken": "c" })), Some("b"));
        assert_eq!(extract_token(&json!({ "accessToken": "c" })), Some("c"));
    }

    #[test]
    fn extract_token_skips_empty_and_non_string_values() {
        let payload = json!({ "token": "", "jwt": null, "accessToken": "c" });
        assert_eq!(extract_token(&payload), Some("c"));

        let payload = json!({ "token": 42 });
        assert_eq!(extract_token(&payload), None);
    }

    #[test]
    fn extract_token_without_any_field() {
        assert_eq!(extract_token(&json!({ "user": "ana" })), None);
        assert_eq!(extract_token(&Value::Null), None);
    }

    #[test]
    fn credentials_serialize_password_in_clear() {
        let body = serde_json::to_value(Credentials::new("ana", "s3cret")).unwrap();
        assert_eq!(body, json!({ "username": "ana", "password": "s3cret" }));
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("ana", "s3cret"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn signup_request_body_shape() {
        let body =
            serde_json::to_value(SignupRequest::new("ana", "ana@example.com", "s3cret")).unwrap();
        assert_eq!(
            body,
            json!({ "username": "ana", "email": "ana@example.com", "password": "s3cret" })
        );
    }
}
