//! Gameserver presence tracking.
//!
//! A [`Watcher`] polls the status service on a fixed interval, diffs the
//! reported player list against the previous one and announces who joined or
//! left. Failed polls are skipped, failed announcements are dropped.

pub mod notify;
pub mod presence;
pub mod status;

use std::time::Duration;

use notify::{Notifier, PresenceDisplay};
use presence::{OfflinePolicy, PresenceEvent, PresenceState};
use status::{FetchError, StatusSource};

pub struct Watcher<S, N, D> {
    source: S,
    notifier: N,
    display: D,
    state: PresenceState,
    interval: Duration,
    server_name: String,
}

impl<S, N, D> Watcher<S, N, D>
where
    S: StatusSource,
    N: Notifier,
    D: PresenceDisplay,
{
    pub fn new(
        source: S,
        notifier: N,
        display: D,
        policy: OfflinePolicy,
        interval: Duration,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            notifier,
            display,
            state: PresenceState::new(policy),
            interval,
            server_name: server_name.into(),
        }
    }

    /// Runs a single poll cycle and returns the events it produced.
    ///
    /// A failed fetch leaves the baseline untouched. Events whose delivery
    /// fails are still returned.
    pub async fn tick(&mut self) -> Result<Vec<PresenceEvent>, FetchError> {
        let snapshot = self.source.fetch().await?;

        self.display
            .show(&snapshot.activity(&self.server_name))
            .await;

        let events = self.state.advance(&snapshot);
        for event in &events {
            if let Err(e) = self.notifier.notify(event).await {
                log::warn!("Dropped presence event '{}': {}", event, e);
            }
        }

        Ok(events)
    }

    /// Polls forever.
    pub async fn run(mut self) {
        log::info!(
            "Watching '{}' every {}s.",
            self.server_name,
            self.interval.as_secs_f32()
        );

        loop {
            match self.tick().await {
                Ok(events) => log::debug!(
                    "Poll produced {} presence events, {} players online.",
                    events.len(),
                    self.state.previous().len()
                ),
                Err(e) => log::warn!("Failed to poll server status: {}", e),
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
