use std::collections::VecDeque;
use std::io::Write;

use chrono::{DateTime, Local};
use resumo_api::Transport;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::{App, CommandError};

pub const HISTORY_LIMIT: usize = 5;
const PREVIEW_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// First characters of the input, followed by `...`
    pub preview: String,
    pub summary: String,
    pub timestamp: DateTime<Local>,
}

/// The most recent summaries of this session, newest first
#[derive(Debug, Default)]
pub struct SummaryHistory {
    entries: VecDeque<HistoryEntry>,
    total_generated: usize,
    total_chars: usize,
}

impl SummaryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, original: &str, summary: &str) {
        let preview: String = original.chars().take(PREVIEW_LEN).collect();
        self.entries.push_front(HistoryEntry {
            preview: format!("{}...", preview),
            summary: summary.to_string(),
            timestamp: Local::now(),
        });
        self.entries.truncate(HISTORY_LIMIT);

        self.total_generated += 1;
        self.total_chars += original.chars().count();
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_generated(&self) -> usize {
        self.total_generated
    }

    /// Characters of every input recorded this session, including entries
    /// that have already dropped out of the visible history
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardExit {
    Quit,
    LoggedOut,
    SessionExpired,
}

/// Interactive summarize loop.
///
/// Text blocks are separated by a blank line. Lines starting with `:` are
/// commands: `:history`, `:stats`, `:logout`, `:quit`.
pub async fn run<T, R, W>(
    app: &App<T>,
    input: R,
    out: &mut W,
    history: &mut SummaryHistory,
) -> anyhow::Result<DashboardExit>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut block = String::new();

    writeln!(
        out,
        "Cole seu texto (mínimo 50 caracteres) e finalize com uma linha em branco."
    )?;
    writeln!(out, "Comandos: :history, :stats, :logout, :quit")?;

    loop {
        let line = lines.next_line().await?;

        let Some(line) = line else {
            // EOF flushes whatever is pending
            if !block.is_empty() {
                if let Some(exit) = summarize_block(app, &block, out, history).await? {
                    return Ok(exit);
                }
            }
            return Ok(DashboardExit::Quit);
        };

        if block.is_empty() {
            match line.trim() {
                ":quit" | ":q" => return Ok(DashboardExit::Quit),
                ":logout" => {
                    app.logout()?;
                    writeln!(out, "✓ Logout realizado com sucesso!")?;
                    return Ok(DashboardExit::LoggedOut);
                }
                ":history" => {
                    print_history(out, history)?;
                    continue;
                }
                ":stats" => {
                    print_stats(out, history)?;
                    continue;
                }
                _ => {}
            }
        }

        if line.trim().is_empty() {
            if !block.is_empty() {
                let text = std::mem::take(&mut block);
                if let Some(exit) = summarize_block(app, &text, out, history).await? {
                    return Ok(exit);
                }
            }
            continue;
        }

        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str(&line);
    }
}

async fn summarize_block<T, W>(
    app: &App<T>,
    text: &str,
    out: &mut W,
    history: &mut SummaryHistory,
) -> anyhow::Result<Option<DashboardExit>>
where
    T: Transport,
    W: Write,
{
    match app.summarize(text).await {
        Ok(summary) => {
            history.record(text, &summary);
            writeln!(out, "\n{}\n", summary)?;
            writeln!(out, "✓ Resumo gerado com sucesso!")?;
            Ok(None)
        }
        Err(CommandError::Request(err)) if err.is_auth_rejected() => {
            writeln!(out, "✗ {}", err)?;
            Ok(Some(DashboardExit::SessionExpired))
        }
        Err(CommandError::LoginRequired) => {
            writeln!(out, "✗ {}", CommandError::LoginRequired)?;
            Ok(Some(DashboardExit::SessionExpired))
        }
        Err(err) => {
            writeln!(out, "✗ {}", err)?;
            Ok(None)
        }
    }
}

fn print_stats<W: Write>(out: &mut W, history: &SummaryHistory) -> std::io::Result<()> {
    writeln!(out, "Resumos gerados nesta sessão: {}", history.total_generated())?;
    writeln!(
        out,
        "Caracteres processados nesta sessão: {}",
        history.total_chars()
    )
}

fn print_history<W: Write>(out: &mut W, history: &SummaryHistory) -> std::io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "Nenhum resumo ainda.");
    }

    for (i, entry) in history.entries().enumerate() {
        writeln!(
            out,
            "{}. [{}] {}",
            i + 1,
            entry.timestamp.format("%d/%m/%Y %H:%M:%S"),
            entry.preview
        )?;
        writeln!(out, "   {}", entry.summary)?;
    }
    Ok(())
}
