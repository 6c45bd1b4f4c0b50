use anyhow::Context as _;
use poise::serenity_prelude as serenity;

use crate::discord::{Context, Error};

/// Sends the file configured under `name` in the `media` settings.
async fn send_media(ctx: Context<'_>, name: &str) -> Result<(), Error> {
    let Some(path) = ctx.data().settings.media.get(name) else {
        ctx.say(format!("No media configured for {}.", name)).await?;
        return Ok(());
    };

    let file = serenity::CreateAttachment::path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    ctx.send(poise::CreateReply::default().attachment(file))
        .await?;

    Ok(())
}

/// Sus.
#[poise::command(
    prefix_command,
    slash_command,
    aliases("statsus"),
    check = "crate::checks::in_bot_channel"
)]
pub async fn sus(ctx: Context<'_>) -> Result<(), Error> {
    send_media(ctx, "sus").await
}

/// Har har.
#[poise::command(prefix_command, slash_command, check = "crate::checks::in_bot_channel")]
pub async fn har(ctx: Context<'_>) -> Result<(), Error> {
    send_media(ctx, "har").await
}

/// Piston.
#[poise::command(prefix_command, slash_command, check = "crate::checks::in_bot_channel")]
pub async fn piston(ctx: Context<'_>) -> Result<(), Error> {
    send_media(ctx, "piston").await
}
