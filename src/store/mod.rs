use crate::error::BoxError;
use crate::models::{GuildId, Poll, PollId};
use async_trait::async_trait;
use std::sync::Arc;

/// Poll persistence lives outside this crate; the export pipeline only ever
/// opens scoped reads through this trait.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Look up a single poll. `Ok(None)` means the id does not resolve;
    /// `Err` is reserved for backend faults.
    async fn get_poll(&self, id: PollId) -> Result<Option<Arc<Poll>>, BoxError>;

    /// All polls visible in a guild, in creation order.
    async fn get_polls_by_guild(&self, guild_id: GuildId) -> Result<Vec<Arc<Poll>>, BoxError>;
}
