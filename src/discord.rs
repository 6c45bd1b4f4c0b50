use anyhow::{Context as _, Result};
use poise::serenity_prelude as serenity;
use std::{collections::HashSet, time::Duration};
use tokio::sync::Mutex;

use crate::{
    commands,
    settings::Settings,
    task::Task,
    triggers::{self, Reaction, KERMIT},
    watcher::{notify::ChannelNotifier, status::HttpStatusSource, Watcher},
};

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared between all commands and event handlers.
pub struct Data {
    pub settings: Settings,
    /// Used for one-off queries, the watcher owns its own clone.
    pub status: HttpStatusSource,
    /// Index of the last praise phrase, never repeated twice in a row.
    pub last_praise: Mutex<Option<usize>>,
    /// Cancelled by `quit`.
    pub tasks: Mutex<Vec<Task>>,
}

pub async fn run(settings: Settings, keepalive: Task) -> Result<()> {
    let status = HttpStatusSource::new(settings.status_url.clone(), settings.request_timeout())
        .context("Failed to create status client.")?;
    log::info!("Polling server status from {}", status.endpoint());
    let token = settings.token.clone();

    let mut owners = HashSet::new();
    owners.insert(serenity::UserId::new(settings.owner));

    let options = poise::FrameworkOptions {
        commands: commands::list(),
        owners,
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(settings.prefix.clone()),
            mention_as_prefix: true,
            case_insensitive_commands: true,
            ..Default::default()
        },
        pre_command: |ctx| {
            Box::pin(async move {
                log::info!(
                    "Got command '{}' by user '{}'",
                    ctx.invocation_string(),
                    ctx.author().tag()
                );
            })
        },
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .options(options)
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                log::info!("Connected as {}", ready.user.name);
                ctx.set_presence(None, serenity::OnlineStatus::Online);

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                if let Some(greeting) = &settings.greeting {
                    let channel = serenity::ChannelId::new(settings.bot_channel);
                    if let Err(e) = channel.say(&ctx.http, greeting).await {
                        log::warn!("Failed to greet in {}: {}", channel, e);
                    }
                }

                let watcher = Watcher::new(
                    status.clone(),
                    ChannelNotifier::new(
                        ctx.http.clone(),
                        serenity::ChannelId::new(settings.presence_channel),
                    ),
                    ctx.clone(),
                    settings.offline_policy,
                    settings.poll_interval(),
                    settings.server_name.clone(),
                );
                let watcher = Task::spawn("presence watcher", watcher.run());

                Ok(Data {
                    settings,
                    status,
                    last_praise: Mutex::new(None),
                    tasks: Mutex::new(vec![keepalive, watcher]),
                })
            })
        })
        .build();

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Failed to create discord client.")?;

    Ok(client.start().await?)
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => on_message(ctx, new_message, data).await,
        serenity::FullEvent::Resume { .. } => {
            log::info!("Connection to discord resumed.");
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn on_message(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) -> Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    for reaction in triggers::reactions(&data.settings, msg.channel_id.get(), &msg.content) {
        match reaction {
            Reaction::Censor => {
                log::info!("Deleting censored message by '{}'", msg.author.tag());
                tokio::time::sleep(Duration::from_millis(200)).await;
                msg.delete(ctx).await?;
                return Ok(());
            }
            Reaction::Wowza => {
                msg.channel_id.say(&ctx.http, &data.settings.wowza_emoji).await?;
            }
            Reaction::Rip => {
                if let Some(path) = data.settings.media.get("rip") {
                    let file = serenity::CreateAttachment::path(path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    msg.channel_id
                        .send_message(&ctx.http, serenity::CreateMessage::new().add_file(file))
                        .await?;
                }
            }
            Reaction::Kermit => {
                for letter in KERMIT {
                    msg.react(ctx, serenity::ReactionType::Unicode(letter.to_string()))
                        .await?;
                }
            }
        }
    }

    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            log::error!("Failed to set up the bot: {:?}", error)
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            log::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let _ = ctx
                .say("Something went wrong. Check the logs for more information.")
                .await;
        }
        // Restricted commands are silently ignored outside their channel.
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                log::error!("Check of `{}` failed: {:?}", ctx.command().name, error);
            }
        }
        poise::FrameworkError::EventHandler { error, .. } => {
            log::warn!("Failed to handle event: {:?}", error)
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                log::error!("Error while handling error: {}", e)
            }
        }
    }
}
