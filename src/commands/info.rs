use poise::serenity_prelude::{self as serenity, MessageBuilder};

use crate::{
    discord::{Context, Error},
    watcher::status::{StatusSnapshot, StatusSource},
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Discord rejects longer messages.
const MESSAGE_LIMIT: usize = 2000;

/// Explains what this bot is about.
#[poise::command(prefix_command, slash_command)]
pub async fn about(ctx: Context<'_>) -> Result<(), Error> {
    let settings = &ctx.data().settings;

    let embed = serenity::CreateEmbed::new()
        .title(format!("Milkyway Bot v{}", VERSION))
        .description(
            MessageBuilder::new()
                .push("Keeping an eye on ")
                .push_mono_safe(&settings.server_name)
                .build(),
        )
        .field(
            "Purpose of this bot",
            "Announce who joins and leaves the server, and be silly.",
            true,
        )
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Copyright © {}",
            chrono::Utc::now().format("%Y")
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Prints the current status of the gameserver.
#[poise::command(prefix_command, slash_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let snapshot = match ctx.data().status.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("Failed to poll server status for `status`: {}", e);
            ctx.say("Could not reach the status service.").await?;
            return Ok(());
        }
    };

    let (players_name, players_value) = players_field(&snapshot);
    let embed = serenity::CreateEmbed::new()
        .title("Server Status")
        .colour(serenity::Colour::new(0x03a9f4))
        .field("Online", snapshot.is_online().to_string(), true)
        .field("Players online:", snapshot.player_count().to_string(), true)
        .field(players_name, players_value, true);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Lists the mods installed on the gameserver.
#[poise::command(
    prefix_command,
    slash_command,
    aliases("mods"),
    check = "crate::checks::in_bot_channel"
)]
pub async fn modding(ctx: Context<'_>) -> Result<(), Error> {
    let snapshot = match ctx.data().status.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("Failed to poll server status for `modding`: {}", e);
            ctx.say("Could not reach the status service.").await?;
            return Ok(());
        }
    };

    ctx.say(mods_message(&snapshot)).await?;
    Ok(())
}

fn players_field(snapshot: &StatusSnapshot) -> (&'static str, String) {
    let name = match snapshot.player_count() {
        1 => "Player:",
        _ => "Players:",
    };

    let value = if snapshot.player_count() == 0 || snapshot.players().is_empty() {
        "No players online!".to_string()
    } else {
        snapshot
            .players()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    (name, value)
}

fn mods_message(snapshot: &StatusSnapshot) -> String {
    if !snapshot.is_online() {
        return "Server offline".to_string();
    }

    let total = snapshot.mods().len();
    let message = format!(
        "The mods are: {}\n**Total: {}**",
        snapshot.mods().join(", "),
        total
    );
    if message.len() <= MESSAGE_LIMIT {
        message
    } else {
        format!("Too many mods to list.\n**Total: {}**", total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_players() {
        let (name, value) = players_field(&StatusSnapshot::online(["Steve", "Alex"]));
        assert_eq!(name, "Players:");
        assert_eq!(value, "Steve, Alex");
    }

    #[test]
    fn single_player_is_singular() {
        let (name, value) = players_field(&StatusSnapshot::online(["Steve"]));
        assert_eq!(name, "Player:");
        assert_eq!(value, "Steve");
    }

    #[test]
    fn nobody_online() {
        for snapshot in [StatusSnapshot::online(Vec::<String>::new()), StatusSnapshot::offline()] {
            assert_eq!(
                players_field(&snapshot),
                ("Players:", "No players online!".to_string())
            );
        }
    }

    #[test]
    fn mods_of_online_server() {
        let snapshot = StatusSnapshot::online(["Steve"]).with_mods(["create", "jei"]);
        assert_eq!(
            mods_message(&snapshot),
            "The mods are: create, jei\n**Total: 2**"
        );
    }

    #[test]
    fn mods_of_offline_server() {
        let snapshot = StatusSnapshot::offline().with_mods(["create"]);
        assert_eq!(mods_message(&snapshot), "Server offline");
    }

    #[test]
    fn huge_modpacks_are_summarized() {
        let mods: Vec<String> = (0..500).map(|i| format!("some-long-mod-name-{}", i)).collect();
        let snapshot = StatusSnapshot::online(["Steve"]).with_mods(mods);
        assert_eq!(
            mods_message(&snapshot),
            "Too many mods to list.\n**Total: 500**"
        );
    }
}
