use poise::serenity_prelude as serenity;
use rand::Rng;

use crate::{
    discord::{Context, Error},
    triggers::KERMIT,
};

const PRAISES: [&str; 7] = [
    "Praise Kermit!",
    "God's will is in Kermit's hand",
    "Your mistakes will have consequences",
    "Kermit will bring salvation for those who praise it",
    "...just why?",
    "May your L's be many, and your partners few",
    "**no.**",
];

const PLATY: &str = "https://imgur.com/a/6rwwTZI";

/// Spells KERMIT and reacts with it.
#[poise::command(prefix_command, slash_command, check = "crate::checks::in_bot_channel")]
pub async fn kermit(ctx: Context<'_>) -> Result<(), Error> {
    let reply = ctx.say(spaced_indicators("kermit")).await?;
    let message = reply.message().await?;

    for letter in KERMIT {
        message
            .react(ctx, serenity::ReactionType::Unicode(letter.to_string()))
            .await?;
    }

    Ok(())
}

/// Repeats your text in big letters.
#[poise::command(prefix_command, rename = "c")]
pub async fn letters(
    ctx: Context<'_>,
    #[description = "text to spell"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    ctx.say(regional_indicators(&text)).await?;

    if let poise::Context::Prefix(prefix) = ctx {
        if let Err(e) = prefix.msg.delete(ctx).await {
            log::warn!("Failed to delete `c` invocation: {}", e);
        }
    }

    Ok(())
}

/// Praise Kermit.
#[poise::command(prefix_command, slash_command, aliases("boycottkermit"))]
pub async fn praise(ctx: Context<'_>) -> Result<(), Error> {
    let pick = {
        let mut last = ctx.data().last_praise.lock().await;
        let pick = pick_praise(&mut rand::rng(), *last);
        *last = Some(pick);
        pick
    };

    ctx.say(PRAISES[pick]).await?;
    Ok(())
}

/// Platypus.
#[poise::command(prefix_command, slash_command, check = "crate::checks::in_bot_channel")]
pub async fn platy(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(PLATY).await?;
    Ok(())
}

/// Replaces letters by their regional indicator emoji.
fn regional_indicators(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 4);
    for c in text.chars() {
        match c {
            c if c.is_ascii_alphabetic() => {
                out.push_str(":regional_indicator_");
                out.push(c.to_ascii_lowercase());
                out.push(':');
            }
            ' ' => out.push_str("   "),
            c => out.push(c),
        }
    }
    out
}

fn spaced_indicators(word: &str) -> String {
    word.chars()
        .map(|c| regional_indicators(&c.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Random phrase index, never `last` again.
fn pick_praise<R: Rng + ?Sized>(rng: &mut R, last: Option<usize>) -> usize {
    match last {
        Some(last) if last < PRAISES.len() => {
            let pick = rng.random_range(0..PRAISES.len() - 1);
            if pick >= last {
                pick + 1
            } else {
                pick
            }
        }
        _ => rng.random_range(0..PRAISES.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn letters_become_indicators() {
        assert_eq!(
            regional_indicators("Hi 2"),
            ":regional_indicator_h::regional_indicator_i:   2"
        );
        assert_eq!(regional_indicators("é!"), "é!");
    }

    #[test]
    fn kermit_is_spaced() {
        assert_eq!(
            spaced_indicators("kermit"),
            ":regional_indicator_k: :regional_indicator_e: :regional_indicator_r: \
             :regional_indicator_m: :regional_indicator_i: :regional_indicator_t:"
        );
    }

    #[test]
    fn praise_never_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; PRAISES.len()];
        let mut last = None;

        for _ in 0..1000 {
            let pick = pick_praise(&mut rng, last);
            assert_ne!(Some(pick), last);
            seen[pick] = true;
            last = Some(pick);
        }

        assert!(seen.iter().all(|seen| *seen));
    }
}
