use crate::discord::Context;
use crate::discord::Error;

/// Checks whether the user is the bot owner.
pub async fn is_owner(ctx: Context<'_>) -> Result<bool, Error> {
    if ctx.data().settings.owner == ctx.author().id.get() {
        Ok(true)
    } else {
        ctx.say("You need to be the bot owner to execute this command.")
            .await?;
        Ok(false)
    }
}

/// Checks whether the command was sent in the bot channel.
///
/// Fails silently, these commands are simply ignored elsewhere.
pub async fn in_bot_channel(ctx: Context<'_>) -> Result<bool, Error> {
    let allowed = ctx.channel_id().get() == ctx.data().settings.bot_channel;
    if !allowed {
        log::debug!(
            "Ignoring `{}` outside the bot channel.",
            ctx.command().name
        );
    }
    Ok(allowed)
}
