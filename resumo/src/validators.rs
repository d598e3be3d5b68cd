use regex::Regex;
use resumo_api::endpoints::auth::{Credentials, SignupRequest};
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_TEXT_LEN: usize = 50;
pub const MAX_TEXT_LEN: usize = 2000;

/// Raw signup form input, before validation
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validate the signup form and build the request body
pub fn validate_signup(form: &SignupForm) -> Result<SignupRequest, String> {
    if form.username.is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err("Por favor, preencha todos os campos".to_string());
    }

    if form.password != form.confirm_password {
        return Err("As senhas não coincidem".to_string());
    }

    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "A senha deve ter pelo menos {} caracteres",
            MIN_PASSWORD_LEN
        ));
    }

    if !is_valid_email(&form.email) {
        return Err("Por favor, insira um email válido".to_string());
    }

    Ok(SignupRequest::new(
        form.username.as_str(),
        form.email.as_str(),
        form.password.as_str(),
    ))
}

pub fn validate_login(username: &str, password: &str) -> Result<Credentials, String> {
    if username.is_empty() || password.is_empty() {
        return Err("Por favor, preencha todos os campos".to_string());
    }

    Ok(Credentials::new(username, password))
}

/// Check text before sending it off for summarization
pub fn validate_summary_input(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Por favor, insira um texto para resumir".to_string());
    }

    let len = text.chars().count();
    if len < MIN_TEXT_LEN {
        return Err(format!(
            "O texto deve ter pelo menos {} caracteres",
            MIN_TEXT_LEN
        ));
    }
    if len > MAX_TEXT_LEN {
        return Err(format!(
            "O texto deve ter no máximo {} caracteres",
            MAX_TEXT_LEN
        ));
    }

    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    static REGEX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
    REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn signup_accepts_valid_form() {
        let request = validate_signup(&form("ana", "ana@example.com", "s3cret", "s3cret")).unwrap();
        assert_eq!(request.username, "ana");
        assert_eq!(request.email, "ana@example.com");
    }

    #[test]
    fn signup_requires_every_field() {
        assert_eq!(
            validate_signup(&form("", "ana@example.com", "s3cret", "s3cret")).unwrap_err(),
            "Por favor, preencha todos os campos"
        );
        assert!(validate_signup(&form("ana", "ana@example.com", "s3cret", "")).is_err());
    }

    #[test]
    fn signup_rejects_mismatched_passwords() {
        assert_eq!(
            validate_signup(&form("ana", "ana@example.com", "s3cret", "s3cre7")).unwrap_err(),
            "As senhas não coincidem"
        );
    }

    #[test]
    fn signup_rejects_short_password() {
        assert_eq!(
            validate_signup(&form("ana", "ana@example.com", "12345", "12345")).unwrap_err(),
            "A senha deve ter pelo menos 6 caracteres"
        );
        assert!(validate_signup(&form("ana", "ana@example.com", "123456", "123456")).is_ok());
    }

    #[test]
    fn signup_rejects_bad_email() {
        for email in ["ana", "ana@example", "ana @example.com", "@example.com", "ana@.com"] {
            assert_eq!(
                validate_signup(&form("ana", email, "s3cret", "s3cret")).unwrap_err(),
                "Por favor, insira um email válido",
                "{}",
                email
            );
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("ana", "").is_err());
        assert!(validate_login("", "pw").is_err());
        assert_eq!(validate_login("ana", "pw").unwrap().username, "ana");
    }

    #[test]
    fn summary_input_rejects_blank() {
        assert_eq!(
            validate_summary_input("   \n ").unwrap_err(),
            "Por favor, insira um texto para resumir"
        );
    }

    #[test]
    fn summary_input_length_bounds() {
        assert!(validate_summary_input(&"a".repeat(49)).is_err());
        assert!(validate_summary_input(&"a".repeat(50)).is_ok());
        assert!(validate_summary_input(&"a".repeat(2000)).is_ok());
        assert_eq!(
            validate_summary_input(&"a".repeat(2001)).unwrap_err(),
            "O texto deve ter no máximo 2000 caracteres"
        );
    }

    #[test]
    fn summary_input_counts_characters_not_bytes() {
        // 50 two-byte characters
        assert!(validate_summary_input(&"ç".repeat(50)).is_ok());
        assert!(validate_summary_input(&"ç".repeat(25)).is_err());
    }
}
