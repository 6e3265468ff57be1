use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tokio::sync::{Mutex, MutexGuard};

// Discord epoch: 2015-01-01T00:00:00Z, in milliseconds.
const SNOWFLAKE_EPOCH_MS: i64 = 1_420_070_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PollId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub u64);

impl PollId {
    /// Recover the creation instant from the snowflake's embedded timestamp.
    pub fn created_at(self) -> DateTime<Utc> {
        let millis = SNOWFLAKE_EPOCH_MS + (self.0 >> 22) as i64;
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PollId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PollId)
    }
}

#[derive(Debug)]
pub struct Poll {
    pub id: PollId,
    pub guild_id: GuildId,
    pub author_id: UserId,
    pub title: String,
    // Guarded: every read or write of option/voter state goes through options().
    options: Mutex<Vec<PollOption>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    pub voters: HashSet<UserId>,
}

impl Poll {
    pub fn new(
        id: PollId,
        guild_id: GuildId,
        author_id: UserId,
        title: impl Into<String>,
        options: Vec<PollOption>,
    ) -> Self {
        Self {
            id,
            guild_id,
            author_id,
            title: title.into(),
            options: Mutex::new(options),
        }
    }

    /// Lock the option/voter state. Hold the guard only as long as the
    /// read or write itself takes.
    pub async fn options(&self) -> MutexGuard<'_, Vec<PollOption>> {
        self.options.lock().await
    }
}

impl PollOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voters: HashSet::new(),
        }
    }

    pub fn with_voters<I: IntoIterator<Item = u64>>(text: impl Into<String>, voters: I) -> Self {
        Self {
            text: text.into(),
            voters: voters.into_iter().map(UserId).collect(),
        }
    }
}
