use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use thiserror::Error;

use super::presence::PresenceEvent;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to send notification: {0}")]
    Send(#[from] serenity::Error),
}

/// Receives join/leave announcements.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &PresenceEvent) -> Result<(), NotifyError>;
}

/// Shows a short status line, e.g. the bot's activity.
#[async_trait]
pub trait PresenceDisplay: Send + Sync {
    async fn show(&self, text: &str);
}

/// Posts presence events into a discord channel.
#[derive(Clone)]
pub struct ChannelNotifier {
    http: Arc<serenity::Http>,
    channel: serenity::ChannelId,
}

impl ChannelNotifier {
    pub fn new(http: Arc<serenity::Http>, channel: serenity::ChannelId) -> Self {
        Self { http, channel }
    }
}

pub fn announcement(event: &PresenceEvent) -> String {
    format!("```diff\n{}\n```", event)
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, event: &PresenceEvent) -> Result<(), NotifyError> {
        self.channel.say(&self.http, announcement(event)).await?;
        Ok(())
    }
}

#[async_trait]
impl PresenceDisplay for serenity::Context {
    async fn show(&self, text: &str) {
        self.set_activity(Some(serenity::ActivityData::playing(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcements_use_diff_highlighting() {
        assert_eq!(
            announcement(&PresenceEvent::Joined("Steve".into())),
            "```diff\n+ Steve joined!\n```"
        );
        assert_eq!(
            announcement(&PresenceEvent::Left("Alex".into())),
            "```diff\n- Alex left!\n```"
        );
    }
}
