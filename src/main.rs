/// checks for permission to execute a specific command
pub mod checks;
/// All available discord commands
mod commands;
/// discord setup
mod discord;
/// Liveness responder
mod keepalive;
mod logger;
/// Bot Settings
mod settings;
mod task;
/// Reactions to plain messages
mod triggers;
/// Gameserver presence tracking
mod watcher;

use anyhow::{Context, Result};
use settings::Settings;
use task::Task;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init()?;

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) if Settings::exists() => {
            return Err(e).context("Failed to load settings.");
        }
        Err(_) => {
            Settings::default()
                .save()
                .await
                .context("Failed to save default config.")?;
            println!("Created default settings. Please fill out. Exiting...");
            std::process::exit(0);
        }
    };
    settings.validate().context("Invalid settings.")?;

    let keepalive = {
        let address = settings.keepalive_address.clone();
        let message = settings.keepalive_message.clone();
        Task::spawn("keep-alive responder", async move {
            if let Err(e) = keepalive::serve(&address, message).await {
                log::error!("{:?}", e);
            }
        })
    };

    discord::run(settings, keepalive)
        .await
        .context("Failed to start discord.")
}
