use poise::serenity_prelude as serenity;
use std::time::Duration;

use crate::discord::{Context, Error};

/// Shutdown the bot.
#[poise::command(prefix_command, slash_command, check = "crate::checks::is_owner")]
pub async fn quit(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Shutting down!").await?;

    let tasks = std::mem::take(&mut *ctx.data().tasks.lock().await);
    for task in tasks {
        if task.has_finished() {
            log::warn!("'{}' had already stopped.", task.name());
        }
        task.cancel().await;
    }

    ctx.serenity_context()
        .set_presence(None, serenity::OnlineStatus::Offline);
    ctx.framework().shard_manager().shutdown_all().await;

    Ok(())
}

/// Deletes messages of this channel by id.
#[poise::command(prefix_command, check = "crate::checks::is_owner")]
pub async fn del(
    ctx: Context<'_>,
    #[description = "comma separated message ids"]
    #[rest]
    ids: String,
) -> Result<(), Error> {
    let ids = match message_ids(&ids) {
        Some(ids) => ids,
        None => {
            ctx.say("Usage: del <id>[, <id>...]").await?;
            return Ok(());
        }
    };

    tokio::time::sleep(Duration::from_millis(200)).await;

    let channel = ctx.channel_id();
    for id in ids {
        if let Err(e) = channel.delete_message(ctx.http(), id).await {
            log::warn!("Failed to delete message {} in {}: {}", id, channel, e);
        }
    }

    if let poise::Context::Prefix(prefix) = ctx {
        if let Err(e) = prefix.msg.delete(ctx).await {
            log::warn!("Failed to delete `del` invocation: {}", e);
        }
    }

    Ok(())
}

/// Parses `1, 2,3` into message ids, `None` if any of them is invalid.
fn message_ids(text: &str) -> Option<Vec<serenity::MessageId>> {
    let ids = text
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| match id.parse::<u64>() {
            Ok(0) | Err(_) => None,
            Ok(id) => Some(serenity::MessageId::new(id)),
        })
        .collect::<Option<Vec<_>>>()?;

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}
