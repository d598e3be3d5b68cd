pub mod auth;
pub mod summaries;

pub const SIGNUP_PATH: &str = "/auth/signup";
pub const LOGIN_PATH: &str = "/auth/login";
pub const SUMMARIZE_PATH: &str = "/resumo";
