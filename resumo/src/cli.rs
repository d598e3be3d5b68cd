use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "resumo", version, about = "Resume textos com IA")]
pub struct Cli {
    /// Backend base URL, overrides the configured `server_url`
    #[arg(long, global = true, env = "RESUMO_SERVER_URL")]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "RESUMO_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Log in and keep the session token for later commands
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "RESUMO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is active
    Status,

    /// Summarize a text (from the argument, a file, or stdin)
    Summarize {
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Also save the summary to a file
        #[arg(long, short, num_args = 0..=1, default_missing_value = "resumo.txt")]
        output: Option<PathBuf>,
    },

    /// Interactive session: paste texts, see history and stats
    Dashboard,
}
