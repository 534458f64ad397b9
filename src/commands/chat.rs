use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::Input;

use crate::assistant::{Assistant, ASSISTANT_NAME};

#[derive(Args)]
pub struct ChatCommand {
    /// Send one message and exit
    #[arg(short, long)]
    message: Option<String>,
}

impl ChatCommand {
    pub async fn execute(self) -> Result<()> {
        let mut assistant = Assistant::new();

        println!("{} — your recovery assistant", ASSISTANT_NAME.bold());
        for insight in assistant.insights() {
            println!("  {}", insight.dimmed());
        }
        println!();

        if let Some(message) = self.message {
            println!("{} {}", "you:".bold(), message);
            let reply = assistant.exchange(message).await;
            println!("{} {}", format!("{}:", ASSISTANT_NAME).cyan(), reply);
            return Ok(());
        }

        println!("Type a message, or 'exit' to leave.");
        println!();

        loop {
            let message: String = Input::new().with_prompt("you").interact_text()?;
            let trimmed = message.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }

            let reply = assistant.exchange(trimmed.to_string()).await;
            println!("{} {}", format!("{}:", ASSISTANT_NAME).cyan(), reply);
        }

        Ok(())
    }
}
