//! Reactions to plain messages, independent of commands.

use crate::settings::Settings;

/// Regional indicators spelling KERMIT.
pub const KERMIT: [char; 6] = ['🇰', '🇪', '🇷', '🇲', '🇮', '🇹'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Delete the message.
    Censor,
    /// Answer with the wowza emoji.
    Wowza,
    /// Answer with the rip attachment.
    Rip,
    /// Mirror KERMIT back as reactions.
    Kermit,
}

/// Reactions for a message, in the order they should be applied.
pub fn reactions(settings: &Settings, channel: u64, content: &str) -> Vec<Reaction> {
    if settings.is_censored(content) {
        return vec![Reaction::Censor];
    }

    let mut reactions = Vec::new();
    if content.contains("wowza") {
        reactions.push(Reaction::Wowza);
    }
    if content.split(' ').any(|word| word.eq_ignore_ascii_case("rip")) {
        reactions.push(Reaction::Rip);
    }
    if channel == settings.bot_channel && KERMIT.iter().all(|letter| content.contains(*letter)) {
        reactions.push(Reaction::Kermit);
    }
    reactions
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT_CHANNEL: u64 = 42;

    fn settings() -> Settings {
        Settings {
            censored_words: vec!["mario".to_string()],
            bot_channel: BOT_CHANNEL,
            ..Default::default()
        }
    }

    #[test]
    fn plain_message_has_no_reactions() {
        assert!(reactions(&settings(), BOT_CHANNEL, "good morning").is_empty());
    }

    #[test]
    fn censored_message_is_only_deleted() {
        assert_eq!(
            reactions(&settings(), BOT_CHANNEL, "wowza Mario rip 🇰🇪🇷🇲🇮🇹"),
            vec![Reaction::Censor]
        );
    }

    #[test]
    fn rip_must_be_a_whole_word() {
        assert_eq!(
            reactions(&settings(), BOT_CHANNEL, "RIP my base"),
            vec![Reaction::Rip]
        );
        assert!(reactions(&settings(), BOT_CHANNEL, "ripped jeans").is_empty());
        assert!(reactions(&settings(), BOT_CHANNEL, "tripwire").is_empty());
    }

    #[test]
    fn several_reactions_in_order() {
        assert_eq!(
            reactions(&settings(), BOT_CHANNEL, "wowza rip"),
            vec![Reaction::Wowza, Reaction::Rip]
        );
    }

    #[test]
    fn kermit_letters_are_mirrored_in_bot_channel() {
        assert_eq!(
            reactions(&settings(), BOT_CHANNEL, "🇹 🇮 🇲 🇷 🇪 🇰"),
            vec![Reaction::Kermit]
        );
        // Every letter has to be there.
        assert!(reactions(&settings(), BOT_CHANNEL, "🇰 🇪 🇷 🇲 🇮").is_empty());
        assert!(reactions(&settings(), 7, "🇰🇪🇷🇲🇮🇹").is_empty());
    }
}
