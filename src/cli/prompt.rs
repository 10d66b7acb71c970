//! Interactive yes/no confirmation.

use super::RuntimeConfig;
use crate::error::Result;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Asks `question` and returns the answer.
///
/// `--yes` skips the prompt. On a terminal the question is a `dialoguer`
/// prompt defaulting to no. With piped stdin one line is read and only `y`
/// or `Y` confirms; end of input is a no.
pub async fn confirm(question: &str, runtime_config: &RuntimeConfig) -> Result<bool> {
    if runtime_config.assume_yes() {
        log::info!("Auto-confirmed: {}", question);
        return Ok(true);
    }

    let confirmed = if std::io::stdin().is_terminal() {
        ask_terminal(question).await?
    } else {
        print!("{} [y/N] ", question);
        std::io::stdout().flush()?;
        let answer = read_answer(BufReader::new(tokio::io::stdin())).await?;
        is_affirmative(&answer)
    };

    log::info!("{} -> {}", question, if confirmed { "yes" } else { "no" });
    Ok(confirmed)
}

async fn ask_terminal(question: &str) -> Result<bool> {
    let prompt = question.to_string();
    let answer = tokio::task::spawn_blocking(move || {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
    })
    .await
    .map_err(anyhow::Error::from)?
    .map_err(anyhow::Error::from)?;
    Ok(answer)
}

async fn read_answer<R: AsyncBufRead + Unpin>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(line)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}
