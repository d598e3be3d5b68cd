use anyhow::{Context, Result};
use resumo_api::Transport;
use resumo_auth::RouteDecision;
use std::io::Write;
use tokio::io::{AsyncReadExt, BufReader};

use crate::app::App;
use crate::cli::Command;
use crate::dashboard::{self, DashboardExit, SummaryHistory};
use crate::validators::SignupForm;

/// Execute one CLI command against the app, writing user-facing output to `out`
pub async fn execute<T, W>(command: Command, app: &App<T>, out: &mut W) -> Result<()>
where
    T: Transport,
    W: Write,
{
    match command {
        Command::Signup {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = SignupForm {
                username,
                email,
                password,
                confirm_password,
            };
            app.signup(&form).await?;
            writeln!(
                out,
                "✓ Cadastro realizado com sucesso! Faça login para continuar."
            )?;
        }
        Command::Login { username, password } => {
            app.login(&username, &password).await?;
            writeln!(out, "✓ Login realizado com sucesso!")?;
        }
        Command::Logout => {
            app.logout()?;
            writeln!(out, "✓ Logout realizado com sucesso!")?;
        }
        Command::Status => match app.route() {
            RouteDecision::Allow => writeln!(out, "Sessão ativa")?,
            RouteDecision::RedirectToLogin => {
                writeln!(out, "Nenhuma sessão ativa. Use `resumo login`.")?
            }
            RouteDecision::Wait => writeln!(out, "Verificando sessão...")?,
        },
        Command::Summarize { text, file, output } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => {
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
            };

            let summary = app.summarize(&text).await?;
            writeln!(out, "{}", summary)?;

            if let Some(path) = output {
                tokio::fs::write(&path, &summary)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                writeln!(out, "✓ Resumo salvo em {}", path.display())?;
            }
        }
        Command::Dashboard => {
            let mut history = SummaryHistory::new();
            let input = BufReader::new(tokio::io::stdin());
            let exit = dashboard::run(app, input, out, &mut history).await?;
            tracing::debug!(?exit, summaries = history.total_generated(), "Dashboard closed");
            if exit == DashboardExit::SessionExpired {
                writeln!(out, "Faça login novamente com `resumo login`.")?;
            }
        }
    }

    Ok(())
}
