use async_trait::async_trait;
use linked_hash_set::LinkedHashSet;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout or a non-success status code.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed status document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("status document is missing `{0}`")]
    MissingField(&'static str),
}

/// One poll's view of the gameserver.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    online: bool,
    player_count: u32,
    players: LinkedHashSet<String>,
    mods: Vec<String>,
}

impl StatusSnapshot {
    #[cfg(test)]
    pub fn online<I, T>(players: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let players: LinkedHashSet<String> = players.into_iter().map(Into::into).collect();
        Self {
            online: true,
            player_count: u32::try_from(players.len()).unwrap(),
            players,
            mods: Vec::new(),
        }
    }

    pub fn offline() -> Self {
        Self {
            online: false,
            player_count: 0,
            players: LinkedHashSet::new(),
            mods: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_mods<I, T>(mut self, mods: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.mods = mods.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Player count as reported by the status service.
    pub fn player_count(&self) -> u32 {
        self.player_count
    }

    pub fn players(&self) -> &LinkedHashSet<String> {
        &self.players
    }

    pub fn mods(&self) -> &[String] {
        &self.mods
    }

    /// Text shown as the bot's activity.
    pub fn activity(&self, server_name: &str) -> String {
        format!(
            "{}, Online: {}, {} players online",
            server_name, self.online, self.player_count
        )
    }

    pub(crate) fn parse(body: &[u8]) -> Result<Self, FetchError> {
        let document: StatusDocument = serde_json::from_slice(body)?;
        document.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct StatusDocument {
    online: bool,
    players: Option<PlayersDocument>,
    mods: Option<ModsDocument>,
}

#[derive(Debug, Deserialize)]
struct PlayersDocument {
    online: Option<u32>,
    list: Option<LinkedHashSet<String>>,
}

#[derive(Debug, Deserialize)]
struct ModsDocument {
    #[serde(default)]
    names: Vec<String>,
}

impl TryFrom<StatusDocument> for StatusSnapshot {
    type Error = FetchError;

    fn try_from(document: StatusDocument) -> Result<Self, Self::Error> {
        if !document.online {
            return Ok(Self::offline());
        }

        let players = document
            .players
            .ok_or(FetchError::MissingField("players"))?;
        let player_count = players
            .online
            .ok_or(FetchError::MissingField("players.online"))?;
        // A zero count wins over whatever list came with it.
        let list = match (player_count, players.list) {
            (0, _) => LinkedHashSet::new(),
            (_, Some(list)) => list,
            (_, None) => return Err(FetchError::MissingField("players.list")),
        };

        Ok(Self {
            online: true,
            player_count,
            players: list,
            mods: document.mods.map(|m| m.names).unwrap_or_default(),
        })
    }
}

#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError>;
}

/// Polls a mcsrvstat-style JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStatusSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError> {
        let body = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        StatusSnapshot::parse(&body)
    }
}
