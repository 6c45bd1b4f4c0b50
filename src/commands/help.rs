use crate::discord::{Context, Error};

/// Shows all commands, or details about one of them.
#[poise::command(prefix_command, track_edits, slash_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"] command: Option<String>,
) -> Result<(), Error> {
    let extra_text_at_bottom = format!(
        "Type {}help <command> for more info on a command.",
        ctx.prefix()
    );

    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom: &extra_text_at_bottom,
            ..Default::default()
        },
    )
    .await?;

    Ok(())
}
